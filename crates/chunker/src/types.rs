use serde::{Deserialize, Serialize};

/// A group of topically related propositions with oracle-derived metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Short id, stable for the chunk's lifetime
    pub id: String,

    /// Short human-readable label
    pub title: String,

    /// One-sentence generalization of all member propositions
    pub summary: String,

    /// Member propositions in arrival order (append-only)
    pub propositions: Vec<String>,

    /// Creation order among all chunks, starting at 0
    pub index: usize,
}

impl Chunk {
    pub(crate) fn new(
        id: String,
        index: usize,
        proposition: String,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            id,
            title: metadata.title,
            summary: metadata.summary,
            propositions: vec![proposition],
            index,
        }
    }

    /// Member propositions joined with single spaces, in arrival order
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.propositions.join(" ")
    }

    /// Number of member propositions
    #[must_use]
    pub fn len(&self) -> usize {
        self.propositions.len()
    }

    /// Chunks always hold their seed proposition, so this is false for stored chunks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.propositions.is_empty()
    }
}

/// Title and summary produced together by the metadata synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkMetadata {
    pub summary: String,
    pub title: String,
}

impl ChunkMetadata {
    #[must_use]
    pub fn new(summary: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            title: title.into(),
        }
    }
}
