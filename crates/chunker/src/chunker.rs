use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::events::{ChunkEvent, ChunkObserver};
use crate::oracle::Oracle;
use crate::resolver::{MatchTier, Placement, PlacementResolver};
use crate::store::{ChunkStore, IdGenerator, UuidIdGenerator};
use crate::synthesizer::MetadataSynthesizer;
use crate::types::Chunk;
use serde::Serialize;
use std::str::FromStr;

/// Main chunker interface: places propositions one at a time
pub struct Chunker<O> {
    config: ChunkerConfig,
    oracle: O,
    store: ChunkStore,
    ids: Box<dyn IdGenerator>,
    observers: Vec<Box<dyn ChunkObserver>>,
}

/// Where a proposition ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Placed {
    Created { id: String, index: usize },
    Appended { id: String, tier: MatchTier },
}

impl Placed {
    #[must_use]
    pub fn chunk_id(&self) -> &str {
        match self {
            Self::Created { id, .. } | Self::Appended { id, .. } => id,
        }
    }
}

/// Selects the shape returned by [`Chunker::get_chunks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkView {
    /// Full keyed structure `id -> chunk`
    #[default]
    Keyed,
    /// One space-joined string per chunk
    ListOfStrings,
}

impl FromStr for ChunkView {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dict" | "keyed" => Ok(Self::Keyed),
            "list_of_strings" | "strings" => Ok(Self::ListOfStrings),
            other => Err(format!(
                "unknown chunk view '{other}' (expected dict or list_of_strings)"
            )),
        }
    }
}

/// Chunks in the shape requested through [`ChunkView`]
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChunksOutput<'a> {
    Keyed(&'a ChunkStore),
    Strings(Vec<String>),
}

impl<O: Oracle> Chunker<O> {
    /// Create a chunker with the default configuration
    pub fn new(oracle: O) -> Self {
        Self::from_parts(oracle, ChunkerConfig::default())
    }

    /// Create a chunker with a validated configuration
    pub fn with_config(oracle: O, config: ChunkerConfig) -> Result<Self> {
        config.validate().map_err(ChunkerError::invalid_config)?;
        Ok(Self::from_parts(oracle, config))
    }

    fn from_parts(oracle: O, config: ChunkerConfig) -> Self {
        Self {
            config,
            oracle,
            store: ChunkStore::new(),
            ids: Box::new(UuidIdGenerator),
            observers: Vec::new(),
        }
    }

    /// Replace the source of chunk ids
    #[must_use]
    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Register a listener for chunk events
    #[must_use]
    pub fn with_observer(mut self, observer: impl ChunkObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    #[must_use]
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &ChunkStore {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> ChunkStore {
        self.store
    }

    /// All chunks in creation order
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        self.store.all()
    }

    #[must_use]
    pub fn chunk(&self, id: &str) -> Option<&Chunk> {
        self.store.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The id/title/summary outline shown to the oracle during placement
    #[must_use]
    pub fn outline(&self) -> String {
        self.store.outline()
    }

    /// Chunks as the keyed structure or as one joined string per chunk
    #[must_use]
    pub fn get_chunks(&self, view: ChunkView) -> ChunksOutput<'_> {
        match view {
            ChunkView::Keyed => ChunksOutput::Keyed(&self.store),
            ChunkView::ListOfStrings => ChunksOutput::Strings(self.store.joined_texts()),
        }
    }

    /// Place every proposition in order; later placements see earlier ones.
    ///
    /// Stops at the first failure. Propositions placed before it stay placed.
    pub fn add_propositions<I, S>(&mut self, propositions: I) -> Result<Vec<Placed>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        propositions
            .into_iter()
            .map(|proposition| self.add_proposition(proposition))
            .collect()
    }

    /// Place one proposition, creating a chunk when no existing one fits.
    ///
    /// Any oracle failure aborts the call and leaves the store unchanged.
    pub fn add_proposition(&mut self, proposition: impl Into<String>) -> Result<Placed> {
        let proposition = proposition.into();
        if proposition.trim().is_empty() {
            return Err(ChunkerError::EmptyProposition);
        }
        log::debug!("Adding: '{proposition}'");

        if self.store.is_empty() {
            log::debug!("No chunks yet, creating the first one");
            return self.create_chunk(proposition);
        }

        let placement = PlacementResolver::new(
            &self.oracle,
            &self.config.prompts,
            self.config.id_length,
        )
        .resolve(&proposition, &self.store)?;

        match placement {
            Placement::Matched { id, tier } => self.append_to_chunk(id, tier, proposition),
            Placement::NoMatch(reason) => {
                log::debug!("No matching chunk ({reason:?})");
                self.create_chunk(proposition)
            }
        }
    }

    fn create_chunk(&mut self, proposition: String) -> Result<Placed> {
        let metadata = MetadataSynthesizer::new(&self.oracle, &self.config.prompts)
            .synthesize_new(&proposition)?;
        let id = self.store.fresh_id(
            self.ids.as_mut(),
            self.config.id_length,
            self.config.max_id_attempts,
        )?;

        let chunk = self.store.create(id, proposition, metadata)?;
        let event = ChunkEvent::Created {
            id: chunk.id.clone(),
            index: chunk.index,
            title: chunk.title.clone(),
            summary: chunk.summary.clone(),
        };
        let placed = Placed::Created {
            id: chunk.id.clone(),
            index: chunk.index,
        };

        self.emit(&event);
        Ok(placed)
    }

    fn append_to_chunk(
        &mut self,
        id: String,
        tier: MatchTier,
        proposition: String,
    ) -> Result<Placed> {
        let current = self
            .store
            .get(&id)
            .ok_or_else(|| ChunkerError::UnknownChunk(id.clone()))?;

        let chunk = if self.config.regenerate_metadata {
            let mut staged = current.clone();
            staged.propositions.push(proposition.clone());
            let metadata = MetadataSynthesizer::new(&self.oracle, &self.config.prompts)
                .refresh(&staged)?;
            self.store.append(&id, proposition)?;
            self.store.set_metadata(&id, metadata)?
        } else {
            self.store.append(&id, proposition)?
        };

        let matched = ChunkEvent::Matched {
            id: chunk.id.clone(),
            title: chunk.title.clone(),
            tier,
        };
        let updated = ChunkEvent::Updated {
            id: chunk.id.clone(),
            title: chunk.title.clone(),
            summary: chunk.summary.clone(),
            propositions: chunk.len(),
        };

        self.emit(&matched);
        self.emit(&updated);
        Ok(Placed::Appended { id, tier })
    }

    fn emit(&self, event: &ChunkEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }
}
