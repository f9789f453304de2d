use serde::{Deserialize, Serialize};
use std::fmt;

/// The five distinct requests the chunker sends to the oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// Compress a single proposition into a one-sentence summary
    SummarizeProposition,
    /// Derive a short title from a freshly generated summary
    TitleFromSummary,
    /// Regenerate a chunk summary with its current summary as anchor
    RefreshSummary,
    /// Regenerate a chunk title with its current title as anchor
    RefreshTitle,
    /// Pick the chunk a new proposition belongs to, if any
    ResolvePlacement,
}

impl PromptKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SummarizeProposition => "summarize_proposition",
            Self::TitleFromSummary => "title_from_summary",
            Self::RefreshSummary => "refresh_summary",
            Self::RefreshTitle => "refresh_title",
            Self::ResolvePlacement => "resolve_placement",
        }
    }

    pub const ALL: [Self; 5] = [
        Self::SummarizeProposition,
        Self::TitleFromSummary,
        Self::RefreshSummary,
        Self::RefreshTitle,
        Self::ResolvePlacement,
    ];
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DEFAULT_SUMMARIZE_PROPOSITION: &str = "Summarize the proposition you are given into a single general sentence \
describing its topic, so that similar statements can later be grouped under it. \
Answer with the sentence only.";

const DEFAULT_TITLE_FROM_SUMMARY: &str = "Write a short, general title for the group described by the summary you \
are given (for example 'Dates & Times' or 'Food Preferences'). Answer with the title only.";

const DEFAULT_REFRESH_SUMMARY: &str = "You maintain groups of related sentences. A new proposition has joined the \
group below. Write a one-sentence summary that generalizes the topic of every proposition in the group, \
starting from the current summary. Be concise. Answer with the sentence only.";

const DEFAULT_REFRESH_TITLE: &str = "You maintain titles for groups of related sentences. Given the propositions, \
the group summary and the current title, write a concise, general title for the group \
(for example 'Food Preferences' or 'Dates & Times'). Answer with the title only.";

const DEFAULT_RESOLVE_PLACEMENT: &str = "You decide whether a new proposition belongs to one of the existing chunks.\n\
\n\
1. Compare the proposition with every chunk's name and summary.\n\
2. Look for a shared topic or theme, not only shared keywords.\n\
3. If one chunk clearly fits, answer with that chunk's ID and nothing else.\n\
4. If none fits, or you are unsure, answer NONE.\n\
\n\
Response format: a bare chunk ID such as \"d41a2\", or NONE.";

/// System instructions for every oracle request; each one can be overridden from config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplates {
    #[serde(default = "default_summarize_proposition")]
    pub summarize_proposition: String,
    #[serde(default = "default_title_from_summary")]
    pub title_from_summary: String,
    #[serde(default = "default_refresh_summary")]
    pub refresh_summary: String,
    #[serde(default = "default_refresh_title")]
    pub refresh_title: String,
    #[serde(default = "default_resolve_placement")]
    pub resolve_placement: String,
}

fn default_summarize_proposition() -> String {
    DEFAULT_SUMMARIZE_PROPOSITION.to_string()
}

fn default_title_from_summary() -> String {
    DEFAULT_TITLE_FROM_SUMMARY.to_string()
}

fn default_refresh_summary() -> String {
    DEFAULT_REFRESH_SUMMARY.to_string()
}

fn default_refresh_title() -> String {
    DEFAULT_REFRESH_TITLE.to_string()
}

fn default_resolve_placement() -> String {
    DEFAULT_RESOLVE_PLACEMENT.to_string()
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            summarize_proposition: default_summarize_proposition(),
            title_from_summary: default_title_from_summary(),
            refresh_summary: default_refresh_summary(),
            refresh_title: default_refresh_title(),
            resolve_placement: default_resolve_placement(),
        }
    }
}

impl PromptTemplates {
    #[must_use]
    pub fn system(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::SummarizeProposition => &self.summarize_proposition,
            PromptKind::TitleFromSummary => &self.title_from_summary,
            PromptKind::RefreshSummary => &self.refresh_summary,
            PromptKind::RefreshTitle => &self.refresh_title,
            PromptKind::ResolvePlacement => &self.resolve_placement,
        }
    }
}

pub(crate) fn summarize_proposition_user(proposition: &str) -> String {
    format!("Proposition:\n{proposition}")
}

pub(crate) fn title_from_summary_user(summary: &str) -> String {
    format!("Summary:\n{summary}")
}

pub(crate) fn refresh_summary_user(propositions: &[String], current_summary: &str) -> String {
    format!(
        "Propositions:\n{}\n\nCurrent summary:\n{current_summary}",
        propositions.join("\n")
    )
}

pub(crate) fn refresh_title_user(
    propositions: &[String],
    summary: &str,
    current_title: &str,
) -> String {
    format!(
        "Propositions:\n{}\n\nSummary:\n{summary}\n\nCurrent title:\n{current_title}",
        propositions.join("\n")
    )
}

pub(crate) fn resolve_placement_user(outline: &str, proposition: &str) -> String {
    format!("Existing Chunks:\n{outline}\n\nNew Proposition: {proposition}")
}
