use crate::error::Result;
use crate::oracle::{ask_non_empty, Oracle};
use crate::prompts::{self, PromptKind, PromptTemplates};
use crate::types::{Chunk, ChunkMetadata};

/// Builds and refreshes chunk titles and summaries through the oracle.
///
/// Both operations return a complete [`ChunkMetadata`] or an error; callers
/// commit the pair as a unit, so a failed second call never leaves a chunk
/// with a new summary and a stale title.
pub struct MetadataSynthesizer<'a, O: ?Sized> {
    oracle: &'a O,
    prompts: &'a PromptTemplates,
}

impl<'a, O: Oracle + ?Sized> MetadataSynthesizer<'a, O> {
    pub fn new(oracle: &'a O, prompts: &'a PromptTemplates) -> Self {
        Self { oracle, prompts }
    }

    /// Summary of a single seed proposition, then a title derived from that summary
    pub fn synthesize_new(&self, proposition: &str) -> Result<ChunkMetadata> {
        let summary = ask_non_empty(
            self.oracle,
            self.prompts,
            PromptKind::SummarizeProposition,
            &prompts::summarize_proposition_user(proposition),
        )?;

        let title = ask_non_empty(
            self.oracle,
            self.prompts,
            PromptKind::TitleFromSummary,
            &prompts::title_from_summary_user(&summary),
        )?;

        Ok(ChunkMetadata { summary, title })
    }

    /// Regenerate metadata for `chunk` using its current title and summary as anchors.
    ///
    /// The title request sees the refreshed summary.
    pub fn refresh(&self, chunk: &Chunk) -> Result<ChunkMetadata> {
        let summary = ask_non_empty(
            self.oracle,
            self.prompts,
            PromptKind::RefreshSummary,
            &prompts::refresh_summary_user(&chunk.propositions, &chunk.summary),
        )?;

        let title = ask_non_empty(
            self.oracle,
            self.prompts,
            PromptKind::RefreshTitle,
            &prompts::refresh_title_user(&chunk.propositions, &summary, &chunk.title),
        )?;

        Ok(ChunkMetadata { summary, title })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChunkerError, OracleError};
    use crate::oracle::FnOracle;
    use std::cell::RefCell;

    fn recorded_calls<F>(
        respond: F,
    ) -> (
        FnOracle<impl Fn(&str, &str) -> std::result::Result<String, OracleError>>,
        std::rc::Rc<RefCell<Vec<String>>>,
    )
    where
        F: Fn(&str) -> std::result::Result<String, OracleError>,
    {
        let calls = std::rc::Rc::new(RefCell::new(Vec::new()));
        let sink = calls.clone();
        let oracle = FnOracle(move |_system: &str, user: &str| {
            sink.borrow_mut().push(user.to_string());
            respond(user)
        });
        (oracle, calls)
    }

    #[test]
    fn test_synthesize_new_conditions_title_on_summary() {
        let prompts = PromptTemplates::default();
        let (oracle, calls) = recorded_calls(|user| {
            if user.starts_with("Proposition:") {
                Ok("The text is about dates.".to_string())
            } else {
                Ok("Dates & Times".to_string())
            }
        });

        let meta = MetadataSynthesizer::new(&oracle, &prompts)
            .synthesize_new("The month is October.")
            .unwrap();

        assert_eq!(meta, ChunkMetadata::new("The text is about dates.", "Dates & Times"));
        let calls = calls.borrow();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], "Proposition:\nThe month is October.");
        assert_eq!(calls[1], "Summary:\nThe text is about dates.");
    }

    #[test]
    fn test_refresh_anchors_on_current_metadata() {
        let prompts = PromptTemplates::default();
        let (oracle, calls) = recorded_calls(|user| {
            if user.contains("Current summary:") {
                Ok("Calendar facts.".to_string())
            } else {
                Ok("Calendar".to_string())
            }
        });

        let mut chunk = Chunk::new(
            "ab12c".to_string(),
            0,
            "The month is October.".to_string(),
            ChunkMetadata::new("Dates.", "Dates & Times"),
        );
        chunk.propositions.push("The year is 2023.".to_string());

        let meta = MetadataSynthesizer::new(&oracle, &prompts)
            .refresh(&chunk)
            .unwrap();

        assert_eq!(meta, ChunkMetadata::new("Calendar facts.", "Calendar"));
        let calls = calls.borrow();
        assert!(calls[0].contains("The month is October.\nThe year is 2023."));
        assert!(calls[0].ends_with("Current summary:\nDates."));
        assert!(calls[1].contains("Summary:\nCalendar facts."));
        assert!(calls[1].ends_with("Current title:\nDates & Times"));
    }

    #[test]
    fn test_failing_title_call_fails_the_whole_synthesis() {
        let prompts = PromptTemplates::default();
        let (oracle, _calls) = recorded_calls(|user| {
            if user.starts_with("Summary:") {
                Err(OracleError::transport("connection reset"))
            } else {
                Ok("A summary.".to_string())
            }
        });

        let err = MetadataSynthesizer::new(&oracle, &prompts)
            .synthesize_new("Anything.")
            .unwrap_err();
        assert!(matches!(
            err,
            ChunkerError::Oracle {
                stage: PromptKind::TitleFromSummary,
                ..
            }
        ));
    }
}
