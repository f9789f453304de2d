//! Placement of a new proposition against the existing chunks.
//!
//! The oracle answers in free text, so its reply is parsed in tiers:
//!
//! ```text
//! raw reply
//!     │
//!     ├──> no-match sentinel (NONE / NO MATCH / NO CHUNKS / NO) ──> NoMatch
//!     ├──> equals a live id ─────────────────────────────────────> Matched(Exact)
//!     ├──> first id_length chars equal a live id ────────────────> Matched(Prefix)
//!     ├──> exactly one live id occurs inside the reply ──────────> Matched(Substring)
//!     └──> anything else ────────────────────────────────────────> NoMatch
//! ```
//!
//! Past the prefix tier, a reply that names more than one live id is
//! ambiguous and never placed.

use crate::error::Result;
use crate::oracle::{ask, Oracle};
use crate::prompts::{self, PromptKind, PromptTemplates};
use crate::store::ChunkStore;
use serde::Serialize;

/// Replies meaning "no existing chunk fits", compared case-insensitively
pub const NO_MATCH_SENTINELS: [&str; 4] = ["NONE", "NO MATCH", "NO CHUNKS", "NO"];

/// Which parsing tier recognised the chunk id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Exact,
    Prefix,
    Substring,
}

/// Why a proposition was not placed into an existing chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMatchReason {
    /// Nothing to compare against; the oracle was not consulted
    EmptyStore,
    /// The oracle explicitly declined
    Sentinel,
    /// The oracle returned blank text
    EmptyResponse,
    /// The reply named several live ids
    Ambiguous(Vec<String>),
    /// The reply named no live id
    Unrecognized,
}

/// Outcome of placement resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    Matched { id: String, tier: MatchTier },
    NoMatch(NoMatchReason),
}

impl Placement {
    #[must_use]
    pub fn chunk_id(&self) -> Option<&str> {
        match self {
            Self::Matched { id, .. } => Some(id),
            Self::NoMatch(_) => None,
        }
    }

    #[must_use]
    pub fn into_chunk_id(self) -> Option<String> {
        match self {
            Self::Matched { id, .. } => Some(id),
            Self::NoMatch(_) => None,
        }
    }

    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

/// Asks the oracle which chunk, if any, a proposition belongs to
pub struct PlacementResolver<'a, O: ?Sized> {
    oracle: &'a O,
    prompts: &'a PromptTemplates,
    id_length: usize,
}

impl<'a, O: Oracle + ?Sized> PlacementResolver<'a, O> {
    pub fn new(oracle: &'a O, prompts: &'a PromptTemplates, id_length: usize) -> Self {
        Self {
            oracle,
            prompts,
            id_length,
        }
    }

    /// Resolve `proposition` against `store`.
    ///
    /// An empty store short-circuits to [`NoMatchReason::EmptyStore`] without
    /// an oracle call. Oracle failures propagate; unparseable replies do not.
    pub fn resolve(&self, proposition: &str, store: &ChunkStore) -> Result<Placement> {
        if store.is_empty() {
            return Ok(Placement::NoMatch(NoMatchReason::EmptyStore));
        }

        let user = prompts::resolve_placement_user(&store.outline(), proposition);
        let reply = ask(self.oracle, self.prompts, PromptKind::ResolvePlacement, &user)?;
        log::debug!("Placement reply: '{reply}'");

        let placement = parse_placement(&reply, store, self.id_length);
        if let Placement::NoMatch(NoMatchReason::Ambiguous(ids)) = &placement {
            log::warn!("Ambiguous placement reply names {ids:?}; starting a new chunk");
        }
        Ok(placement)
    }
}

/// Interpret a raw placement reply against the live ids in `store`
#[must_use]
pub fn parse_placement(reply: &str, store: &ChunkStore, id_length: usize) -> Placement {
    let cleaned = clean_reply(reply);
    if cleaned.is_empty() {
        return Placement::NoMatch(NoMatchReason::EmptyResponse);
    }
    if is_no_match_sentinel(cleaned) {
        return Placement::NoMatch(NoMatchReason::Sentinel);
    }

    if store.contains(cleaned) {
        return matched(cleaned, MatchTier::Exact);
    }

    let prefix = char_prefix(cleaned, id_length);
    if store.contains(prefix) {
        return matched(prefix, MatchTier::Prefix);
    }

    let mentioned: Vec<&str> = store.ids().filter(|id| cleaned.contains(*id)).collect();
    match mentioned.as_slice() {
        [] => Placement::NoMatch(NoMatchReason::Unrecognized),
        [id] => matched(id, MatchTier::Substring),
        ids => Placement::NoMatch(NoMatchReason::Ambiguous(
            ids.iter().map(|id| (*id).to_string()).collect(),
        )),
    }
}

/// True when `reply` is one of [`NO_MATCH_SENTINELS`], ignoring case and wrapping
#[must_use]
pub fn is_no_match_sentinel(reply: &str) -> bool {
    let normalized = clean_reply(reply)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    NO_MATCH_SENTINELS.contains(&normalized.as_str())
}

fn matched(id: &str, tier: MatchTier) -> Placement {
    Placement::Matched {
        id: id.to_string(),
        tier,
    }
}

fn clean_reply(reply: &str) -> &str {
    reply
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim_end_matches('.')
        .trim()
}

fn char_prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
