use crate::error::{ChunkerError, Result};
use crate::types::{Chunk, ChunkMetadata};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use uuid::Uuid;

/// Source of candidate chunk ids
pub trait IdGenerator {
    /// Produce a candidate id of exactly `length` characters
    fn generate(&mut self, length: usize) -> String;
}

/// Random ids taken from the hex digits of a v4 UUID
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&mut self, length: usize) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(length);
        id
    }
}

/// In-memory chunk collection keyed by id, kept in creation order
#[derive(Debug, Default, Clone)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
    positions: HashMap<String, usize>,
    next_index: usize,
}

impl ChunkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Chunk> {
        self.positions.get(id).map(|&pos| &self.chunks[pos])
    }

    /// All chunks in creation order
    #[must_use]
    pub fn all(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Live chunk ids in creation order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().map(|chunk| chunk.id.as_str())
    }

    /// Draw ids from `ids` until one of `length` characters is not live yet
    pub fn fresh_id(
        &self,
        ids: &mut dyn IdGenerator,
        length: usize,
        max_attempts: usize,
    ) -> Result<String> {
        for attempt in 1..=max_attempts {
            let candidate = ids.generate(length);
            if candidate.chars().count() != length {
                log::warn!(
                    "Rejected chunk id '{candidate}': expected {length} characters (attempt {attempt}/{max_attempts})"
                );
                continue;
            }
            if !self.contains(&candidate) {
                return Ok(candidate);
            }
            log::warn!("Chunk id collision on {candidate} (attempt {attempt}/{max_attempts})");
        }
        Err(ChunkerError::IdSpaceExhausted {
            attempts: max_attempts,
        })
    }

    /// Insert a new chunk seeded with one proposition and assign the next index
    pub fn create(
        &mut self,
        id: String,
        proposition: String,
        metadata: ChunkMetadata,
    ) -> Result<&Chunk> {
        if self.contains(&id) {
            return Err(ChunkerError::DuplicateId(id));
        }

        let index = self.next_index;
        self.next_index += 1;

        let pos = self.chunks.len();
        self.positions.insert(id.clone(), pos);
        self.chunks.push(Chunk::new(id, index, proposition, metadata));
        Ok(&self.chunks[pos])
    }

    /// Append a proposition to an existing chunk
    pub fn append(&mut self, id: &str, proposition: String) -> Result<&Chunk> {
        let chunk = self.get_mut(id)?;
        chunk.propositions.push(proposition);
        Ok(&*chunk)
    }

    /// Replace title and summary of an existing chunk together
    pub fn set_metadata(&mut self, id: &str, metadata: ChunkMetadata) -> Result<&Chunk> {
        let chunk = self.get_mut(id)?;
        chunk.summary = metadata.summary;
        chunk.title = metadata.title;
        Ok(&*chunk)
    }

    /// Compact per-chunk listing of id, title and summary.
    ///
    /// This exact text is shown to the oracle during placement.
    #[must_use]
    pub fn outline(&self) -> String {
        let mut outline = String::new();
        for chunk in &self.chunks {
            outline.push_str("Chunk ID: ");
            outline.push_str(&chunk.id);
            outline.push_str("\nChunk Name: ");
            outline.push_str(&chunk.title);
            outline.push_str("\nChunk Summary: ");
            outline.push_str(&chunk.summary);
            outline.push_str("\n\n");
        }
        outline
    }

    /// One space-joined string per chunk, in creation order
    #[must_use]
    pub fn joined_texts(&self) -> Vec<String> {
        self.chunks.iter().map(Chunk::joined_text).collect()
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Chunk> {
        match self.positions.get(id) {
            Some(&pos) => Ok(&mut self.chunks[pos]),
            None => Err(ChunkerError::UnknownChunk(id.to_string())),
        }
    }
}

/// Serializes as a JSON-style object `id -> chunk`, in creation order
impl Serialize for ChunkStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.chunks.len()))?;
        for chunk in &self.chunks {
            map.serialize_entry(&chunk.id, chunk)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Sequence(Vec<&'static str>);

    impl IdGenerator for Sequence {
        fn generate(&mut self, _length: usize) -> String {
            self.0.remove(0).to_string()
        }
    }

    fn meta(tag: &str) -> ChunkMetadata {
        ChunkMetadata::new(format!("{tag} summary"), format!("{tag} title"))
    }

    #[test]
    fn test_create_assigns_increasing_indices() {
        let mut store = ChunkStore::new();
        store.create("aaaaa".into(), "p1".into(), meta("a")).unwrap();
        store.create("bbbbb".into(), "p2".into(), meta("b")).unwrap();

        let indices: Vec<usize> = store.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(store.ids().collect::<Vec<_>>(), vec!["aaaaa", "bbbbb"]);
    }

    #[test]
    fn test_create_rejects_live_id() {
        let mut store = ChunkStore::new();
        store.create("aaaaa".into(), "p1".into(), meta("a")).unwrap();
        let err = store
            .create("aaaaa".into(), "p2".into(), meta("b"))
            .unwrap_err();
        assert!(matches!(err, ChunkerError::DuplicateId(id) if id == "aaaaa"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_append_unknown_id() {
        let mut store = ChunkStore::new();
        let err = store.append("nope0", "p".into()).unwrap_err();
        assert!(matches!(err, ChunkerError::UnknownChunk(_)));
    }

    #[test]
    fn test_fresh_id_regenerates_on_collision() {
        let mut store = ChunkStore::new();
        store.create("aaaaa".into(), "p1".into(), meta("a")).unwrap();

        let mut ids = Sequence(vec!["aaaaa", "aaaaa", "ccccc"]);
        let id = store.fresh_id(&mut ids, 5, 3).unwrap();
        assert_eq!(id, "ccccc");
    }

    #[test]
    fn test_fresh_id_gives_up() {
        let mut store = ChunkStore::new();
        store.create("aaaaa".into(), "p1".into(), meta("a")).unwrap();

        let mut ids = Sequence(vec!["aaaaa", "aaaaa"]);
        let err = store.fresh_id(&mut ids, 5, 2).unwrap_err();
        assert!(matches!(err, ChunkerError::IdSpaceExhausted { attempts: 2 }));
    }

    #[test]
    fn test_fresh_id_skips_wrong_length_candidates() {
        let store = ChunkStore::new();

        let mut ids = Sequence(vec!["", "abc", "abcdef", "abcde"]);
        let id = store.fresh_id(&mut ids, 5, 4).unwrap();
        assert_eq!(id, "abcde");

        let mut ids = Sequence(vec!["", ""]);
        let err = store.fresh_id(&mut ids, 5, 2).unwrap_err();
        assert!(matches!(err, ChunkerError::IdSpaceExhausted { attempts: 2 }));
    }

    #[test]
    fn test_uuid_ids_have_requested_length() {
        let mut ids = UuidIdGenerator;
        for length in [4, 5, 12, 32] {
            let id = ids.generate(length);
            assert_eq!(id.len(), length);
            assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_outline_format_and_idempotence() {
        let mut store = ChunkStore::new();
        store.create("aaaaa".into(), "p1".into(), meta("a")).unwrap();
        store.create("bbbbb".into(), "p2".into(), meta("b")).unwrap();

        let first = store.outline();
        assert_eq!(
            first,
            "Chunk ID: aaaaa\nChunk Name: a title\nChunk Summary: a summary\n\n\
             Chunk ID: bbbbb\nChunk Name: b title\nChunk Summary: b summary\n\n"
        );
        assert_eq!(first, store.outline());
    }

    #[test]
    fn test_serializes_in_creation_order() {
        let mut store = ChunkStore::new();
        store.create("zzzzz".into(), "p1".into(), meta("z")).unwrap();
        store.create("aaaaa".into(), "p2".into(), meta("a")).unwrap();

        let json = serde_json::to_string(&store).unwrap();
        let z = json.find("\"zzzzz\":").unwrap();
        let a = json.find("\"aaaaa\":").unwrap();
        assert!(z < a, "{json}");
    }
}
