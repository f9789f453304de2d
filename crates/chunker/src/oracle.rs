use crate::error::{ChunkerError, OracleError, Result};
use crate::prompts::{PromptKind, PromptTemplates};

/// Text-in/text-out generation service the chunker delegates semantic decisions to.
///
/// Implementations are free to be non-deterministic; every caller treats the
/// returned text as untrusted.
pub trait Oracle {
    /// Run one blocking completion for the given system instructions and user content
    fn complete(&self, system: &str, user: &str) -> std::result::Result<String, OracleError>;
}

impl<T: Oracle + ?Sized> Oracle for &T {
    fn complete(&self, system: &str, user: &str) -> std::result::Result<String, OracleError> {
        (**self).complete(system, user)
    }
}

impl<T: Oracle + ?Sized> Oracle for Box<T> {
    fn complete(&self, system: &str, user: &str) -> std::result::Result<String, OracleError> {
        (**self).complete(system, user)
    }
}

/// Adapts a closure into an [`Oracle`]
pub struct FnOracle<F>(pub F);

impl<F> Oracle for FnOracle<F>
where
    F: Fn(&str, &str) -> std::result::Result<String, OracleError>,
{
    fn complete(&self, system: &str, user: &str) -> std::result::Result<String, OracleError> {
        (self.0)(system, user)
    }
}

/// Issue one request and return the trimmed answer, which may be blank
pub(crate) fn ask<O: Oracle + ?Sized>(
    oracle: &O,
    prompts: &PromptTemplates,
    kind: PromptKind,
    user: &str,
) -> Result<String> {
    oracle
        .complete(prompts.system(kind), user)
        .map(|text| text.trim().to_string())
        .map_err(|source| ChunkerError::oracle(kind, source))
}

/// Like [`ask`], but a blank answer is an [`OracleError::EmptyResponse`]
pub(crate) fn ask_non_empty<O: Oracle + ?Sized>(
    oracle: &O,
    prompts: &PromptTemplates,
    kind: PromptKind,
    user: &str,
) -> Result<String> {
    let text = ask(oracle, prompts, kind, user)?;
    if text.is_empty() {
        return Err(ChunkerError::oracle(
            kind,
            OracleError::EmptyResponse { prompt: kind },
        ));
    }
    Ok(text)
}
