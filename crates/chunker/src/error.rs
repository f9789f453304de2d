use crate::prompts::PromptKind;
use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Failure reported by an [`Oracle`](crate::Oracle) implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Network or transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Credentials were rejected
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Backend refused the request because of rate limits
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Backend answered, but not in the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Backend answered with blank text where content was required
    #[error("Empty response for {prompt} prompt")]
    EmptyResponse { prompt: PromptKind },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl OracleError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a rate-limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create a malformed response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

/// Errors that can occur while placing propositions into chunks
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// An oracle call failed; the store was left untouched
    #[error("Oracle failed during {stage} prompt: {source}")]
    Oracle {
        stage: PromptKind,
        #[source]
        source: OracleError,
    },

    /// Append targeted an id that is not in the store
    #[error("Unknown chunk id: {0}")]
    UnknownChunk(String),

    /// Insert attempted with an id that is already live
    #[error("Duplicate chunk id: {0}")]
    DuplicateId(String),

    /// Could not find a fresh id after repeated collisions
    #[error("Could not allocate a unique chunk id after {attempts} attempts")]
    IdSpaceExhausted { attempts: usize },

    /// Blank proposition provided
    #[error("Empty proposition provided")]
    EmptyProposition,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ChunkerError {
    /// Wrap an oracle failure with the prompt it happened in
    pub fn oracle(stage: PromptKind, source: OracleError) -> Self {
        Self::Oracle { stage, source }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True when the error came from the oracle rather than from local state
    #[must_use]
    pub const fn is_oracle(&self) -> bool {
        matches!(self, Self::Oracle { .. })
    }
}
