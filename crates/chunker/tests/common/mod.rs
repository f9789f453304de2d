#![allow(dead_code)]

use agentic_chunker::{IdGenerator, Oracle, OracleError};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// How the stub phrases a positive placement answer
#[derive(Clone, Copy)]
pub enum ReplyStyle {
    Bare,
    Sentence,
    Trailing,
}

/// Rule-based oracle: propositions sharing a keyword topic belong together
pub struct TopicOracle {
    style: ReplyStyle,
    always_new: bool,
    fail_on: RefCell<Option<(&'static str, String)>>,
    pub placement_calls: Cell<usize>,
    pub calls: RefCell<Vec<String>>,
}

impl TopicOracle {
    pub fn new() -> Self {
        Self {
            style: ReplyStyle::Bare,
            always_new: false,
            fail_on: RefCell::new(None),
            placement_calls: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Never places a proposition into an existing chunk
    pub fn unrelated() -> Self {
        Self {
            always_new: true,
            ..Self::new()
        }
    }

    pub fn with_style(style: ReplyStyle) -> Self {
        Self {
            style,
            ..Self::new()
        }
    }

    /// Fail every request whose user content starts with `prefix` and mentions `needle`
    pub fn fail_when(&self, prefix: &'static str, needle: &str) {
        *self.fail_on.borrow_mut() = Some((prefix, needle.to_string()));
    }

    pub fn heal(&self) {
        *self.fail_on.borrow_mut() = None;
    }

    fn answer_placement(&self, user: &str) -> String {
        self.placement_calls.set(self.placement_calls.get() + 1);
        if self.always_new {
            return "NONE".to_string();
        }

        let proposition = user
            .rsplit("New Proposition: ")
            .next()
            .unwrap_or_default();
        let wanted = topic_of(proposition);

        let mut current_id = None;
        for line in user.lines() {
            if let Some(id) = line.strip_prefix("Chunk ID: ") {
                current_id = Some(id.to_string());
            } else if let Some(name) = line.strip_prefix("Chunk Name: ") {
                if name == wanted.title {
                    if let Some(id) = current_id.take() {
                        return match self.style {
                            ReplyStyle::Bare => id,
                            ReplyStyle::Sentence => {
                                format!("The proposition belongs to chunk {id}.")
                            }
                            ReplyStyle::Trailing => format!("{id} (same topic)"),
                        };
                    }
                }
            }
        }
        "NONE".to_string()
    }
}

impl Oracle for TopicOracle {
    fn complete(&self, _system: &str, user: &str) -> Result<String, OracleError> {
        self.calls.borrow_mut().push(user.to_string());

        if let Some((prefix, needle)) = self.fail_on.borrow().as_ref() {
            if user.starts_with(*prefix) && user.contains(needle.as_str()) {
                return Err(OracleError::transport("injected failure"));
            }
        }

        if user.starts_with("Existing Chunks:") {
            return Ok(self.answer_placement(user));
        }
        if let Some(proposition) = user.strip_prefix("Proposition:\n") {
            return Ok(format!("About {}.", topic_of(proposition).name));
        }
        if let Some(summary) = user.strip_prefix("Summary:\n") {
            return Ok(title_for_summary(summary));
        }
        if user.starts_with("Propositions:\n") {
            let body = user.trim_start_matches("Propositions:\n");
            let propositions: Vec<&str> = body.split("\n\n").next().unwrap_or("").lines().collect();
            let topic = topic_of(propositions.first().copied().unwrap_or_default());
            if user.contains("Current title:") {
                return Ok(topic.title.to_string());
            }
            return Ok(format!(
                "About {} ({} statements).",
                topic.name,
                propositions.len()
            ));
        }

        Err(OracleError::malformed(format!("unexpected request: {user}")))
    }
}

pub struct Topic {
    pub name: &'static str,
    pub title: &'static str,
}

pub fn topic_of(text: &str) -> Topic {
    let lower = text.to_lowercase();
    if ["month", "year", "october", "date"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Topic {
            name: "dates",
            title: "Dates & Times",
        }
    } else if ["returns", "performance", "put in"]
        .iter()
        .any(|k| lower.contains(k))
    {
        Topic {
            name: "returns",
            title: "Returns on Effort",
        }
    } else {
        Topic {
            name: "misc",
            title: "Miscellany",
        }
    }
}

fn title_for_summary(summary: &str) -> String {
    for topic in ["dates", "returns", "misc"] {
        if summary.contains(topic) {
            return topic_of(topic).title.to_string();
        }
    }
    "Miscellany".to_string()
}

/// Hands out a fixed sequence of ids
pub struct ScriptedIds(pub VecDeque<&'static str>);

impl ScriptedIds {
    pub fn new(ids: &[&'static str]) -> Self {
        Self(ids.iter().copied().collect())
    }
}

impl IdGenerator for ScriptedIds {
    fn generate(&mut self, _length: usize) -> String {
        self.0.pop_front().unwrap_or("zzzzz").to_string()
    }
}

pub const ESSAY: [&str; 5] = [
    "The month is October.",
    "The year is 2023.",
    "One of the most important things that I didn't understand about the world as a child was the degree to which the returns for performance are superlinear.",
    "Teachers and coaches implicitly told us that the returns were linear.",
    "I heard a thousand times that 'You get out what you put in.'",
];
