use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read raw input from a file, or stdin when no path is given
pub fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read propositions from stdin")?;
            Ok(buf)
        }
    }
}

/// Whether the input should be decoded as a JSON array
pub fn is_json_input(path: Option<&Path>, forced: bool) -> bool {
    forced
        || path
            .and_then(|p| p.extension())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Split input into propositions: a JSON array of strings, or one per non-blank line
pub fn parse_propositions(raw: &str, json: bool) -> Result<Vec<String>> {
    let propositions: Vec<String> = if json {
        serde_json::from_str::<Vec<String>>(raw)
            .context("Expected a JSON array of strings")?
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    } else {
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    };
    Ok(propositions)
}
