use crate::prompts::PromptTemplates;
use serde::{Deserialize, Serialize};

/// Shortest chunk id accepted by [`ChunkerConfig::validate`]
pub const MIN_ID_LENGTH: usize = 4;

/// Longest chunk id accepted (a full simple-form UUID)
pub const MAX_ID_LENGTH: usize = 32;

/// Configuration for proposition chunking behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Length of generated chunk ids, in hex characters
    pub id_length: usize,

    /// Regenerate title and summary after every append.
    /// When false, metadata is frozen after chunk creation.
    pub regenerate_metadata: bool,

    /// How many fresh ids to try before giving up on a collision
    pub max_id_attempts: usize,

    /// System instructions sent with each oracle request
    pub prompts: PromptTemplates,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            id_length: 5,
            regenerate_metadata: true,
            max_id_attempts: 16,
            prompts: PromptTemplates::default(),
        }
    }
}

impl ChunkerConfig {
    /// Create config that keeps the metadata produced at chunk creation
    pub fn frozen_metadata() -> Self {
        Self {
            regenerate_metadata: false,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(MIN_ID_LENGTH..=MAX_ID_LENGTH).contains(&self.id_length) {
            return Err(format!(
                "id_length ({}) must be between {MIN_ID_LENGTH} and {MAX_ID_LENGTH}",
                self.id_length
            ));
        }

        if self.max_id_attempts == 0 {
            return Err("max_id_attempts must be > 0".to_string());
        }

        Ok(())
    }
}
