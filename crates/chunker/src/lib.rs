//! # Agentic Chunker
//!
//! Incrementally groups a stream of atomic propositions into topically
//! coherent chunks, each with a title and summary that evolve as the chunk
//! grows.
//!
//! ## Architecture
//!
//! ```text
//! proposition
//!     │
//!     ├──> Placement Resolver
//!     │    ├─> empty store: no match, no oracle call
//!     │    ├─> oracle sees the id/title/summary outline
//!     │    └─> tiered parse of the free-text reply (bias: new chunk)
//!     │
//!     ├──> match ──> append ──> Metadata Synthesizer refresh
//!     │
//!     └──> no match ──> Metadata Synthesizer (summary, then title) ──> new chunk
//! ```
//!
//! The semantic decisions come from an [`Oracle`]: anything that turns a
//! system instruction plus user content into text.
//!
//! ## Example
//!
//! ```rust
//! use agentic_chunker::{Chunker, ChunkView, ChunksOutput, FnOracle, OracleError};
//!
//! // A stand-in oracle: every proposition starts its own chunk.
//! let oracle = FnOracle(|_system: &str, user: &str| {
//!     if user.starts_with("Existing Chunks:") {
//!         Ok::<_, OracleError>("NONE".to_string())
//!     } else {
//!         Ok("Misc".to_string())
//!     }
//! });
//!
//! let mut chunker = Chunker::new(oracle);
//! chunker
//!     .add_propositions(["The month is October.", "The year is 2023."])
//!     .unwrap();
//!
//! if let ChunksOutput::Strings(texts) = chunker.get_chunks(ChunkView::ListOfStrings) {
//!     assert_eq!(texts, vec!["The month is October.", "The year is 2023."]);
//! }
//! ```

mod chunker;
mod config;
mod error;
mod events;
mod oracle;
mod prompts;
pub mod render;
mod resolver;
mod store;
mod synthesizer;
mod types;

pub use chunker::{ChunkView, Chunker, ChunksOutput, Placed};
pub use config::{ChunkerConfig, MAX_ID_LENGTH, MIN_ID_LENGTH};
pub use error::{ChunkerError, OracleError, Result};
pub use events::{ChunkEvent, ChunkObserver, LogObserver};
pub use oracle::{FnOracle, Oracle};
pub use prompts::{PromptKind, PromptTemplates};
pub use resolver::{
    is_no_match_sentinel, parse_placement, MatchTier, NoMatchReason, Placement,
    PlacementResolver, NO_MATCH_SENTINELS,
};
pub use store::{ChunkStore, IdGenerator, UuidIdGenerator};
pub use synthesizer::MetadataSynthesizer;
pub use types::{Chunk, ChunkMetadata};
