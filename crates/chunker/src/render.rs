//! Plain-text views of a chunk store for terminals and reports.

use crate::store::ChunkStore;
use std::fmt::Write;

/// Every chunk with its metadata and propositions
#[must_use]
pub fn pretty_chunks(store: &ChunkStore) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "You have {} chunks\n", store.len());
    for chunk in store.iter() {
        let _ = writeln!(out, "Chunk #{}", chunk.index);
        let _ = writeln!(out, "Chunk ID: {}", chunk.id);
        let _ = writeln!(out, "Title: {}", chunk.title);
        let _ = writeln!(out, "Summary: {}", chunk.summary);
        out.push_str("Propositions:\n");
        for proposition in &chunk.propositions {
            let _ = writeln!(out, "  - {proposition}");
        }
        out.push('\n');
    }
    out
}

/// [`ChunkStore::outline`] under a `Chunk Outline` heading, for display
#[must_use]
pub fn pretty_outline(store: &ChunkStore) -> String {
    format!("Chunk Outline\n\n{}", store.outline())
}
