use crate::resolver::MatchTier;
use serde::Serialize;

/// Structured notification emitted as chunks are created and grown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChunkEvent {
    /// A new chunk was created from a proposition
    Created {
        id: String,
        index: usize,
        title: String,
        summary: String,
    },
    /// The oracle placed a proposition into an existing chunk
    Matched {
        id: String,
        title: String,
        tier: MatchTier,
    },
    /// A chunk absorbed a proposition (metadata is the post-append state)
    Updated {
        id: String,
        title: String,
        summary: String,
        propositions: usize,
    },
}

impl ChunkEvent {
    #[must_use]
    pub fn chunk_id(&self) -> &str {
        match self {
            Self::Created { id, .. } | Self::Matched { id, .. } | Self::Updated { id, .. } => id,
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Created { .. } => "chunk_created",
            Self::Matched { .. } => "chunk_matched",
            Self::Updated { .. } => "chunk_updated",
        }
    }
}

/// Listener for [`ChunkEvent`]s
pub trait ChunkObserver {
    fn on_event(&self, event: &ChunkEvent);
}

impl<F: Fn(&ChunkEvent)> ChunkObserver for F {
    fn on_event(&self, event: &ChunkEvent) {
        self(event);
    }
}

/// Forwards events to the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl ChunkObserver for LogObserver {
    fn on_event(&self, event: &ChunkEvent) {
        match event {
            ChunkEvent::Created { id, title, .. } => {
                log::info!("Created new chunk ({id}): {title}");
            }
            ChunkEvent::Matched { id, title, tier } => {
                log::info!("Chunk found ({id}, {tier:?} match), adding to: {title}");
            }
            ChunkEvent::Updated {
                id,
                title,
                propositions,
                ..
            } => {
                log::info!("Chunk {id} now '{title}' with {propositions} propositions");
            }
        }
    }
}
