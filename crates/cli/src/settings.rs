use agentic_chunker::ChunkerConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Contents of the optional `--config` TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chunker: ChunkerConfig,
    pub oracle: OracleSettings,
}

/// Where and how to reach the completion backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleSettings {
    /// Base URL of an OpenAI-compatible API, without `/chat/completions`
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: 0.0,
            timeout_secs: 60,
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let settings: Self = toml::from_str(raw)?;
        settings
            .chunker
            .validate()
            .map_err(|msg| anyhow::anyhow!(msg))?;
        Ok(settings)
    }
}
