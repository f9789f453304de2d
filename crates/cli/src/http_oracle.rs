use crate::settings::OracleSettings;
use agentic_chunker::{Oracle, OracleError};
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

/// Oracle backed by an OpenAI-compatible `chat/completions` endpoint
pub struct HttpOracle {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl HttpOracle {
    pub fn new(settings: &OracleSettings, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }
}

impl Oracle for HttpOracle {
    fn complete(&self, system: &str, user: &str) -> std::result::Result<String, OracleError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ],
            "temperature": self.temperature,
        });

        log::debug!(
            "POST {} (system {} chars, user {} chars)",
            self.endpoint,
            system.len(),
            user.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| OracleError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(classify_status(status, &text));
        }

        let value: Value = response
            .json()
            .map_err(|e| OracleError::malformed(e.to_string()))?;
        extract_content(&value)
    }
}

fn classify_status(status: StatusCode, body: &str) -> OracleError {
    let detail = format!("HTTP {status}: {}", body.trim());
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => OracleError::auth(detail),
        StatusCode::TOO_MANY_REQUESTS => OracleError::rate_limited(detail),
        _ => OracleError::transport(detail),
    }
}

fn extract_content(value: &Value) -> std::result::Result<String, OracleError> {
    value["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| OracleError::malformed("missing choices[0].message.content"))
}
