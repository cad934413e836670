//! # Narrator Client
//!
//! Optional HTTP client that asks an OpenAI-compatible chat-completions
//! endpoint to annotate a structured result in prose. Strictly advisory:
//! the engine's output is computed before the narrator sees it and is
//! never altered by the annotation. A missing or failing narrator degrades
//! to responses without an `explanation` field.

use crate::config::NarratorConfig;
use serde_json::Value;
use std::time::Duration;

/// Per-request timeout. The annotation is a nicety; a slow upstream must
/// not stall the response.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// System prompt framing every annotation request.
const SYSTEM_PROMPT: &str = "You are a PC-building assistant. Summarize the \
    attached compatibility or build-plan result for an end user in a short \
    paragraph. State only what the data shows; do not invent parts, prices \
    or compatibility claims.";

// =============================================================================
// NARRATOR
// =============================================================================

/// HTTP client for the annotation endpoint.
pub struct Narrator {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl Narrator {
    /// Build a narrator from config and environment.
    ///
    /// Environment variables win over the config file:
    /// - `RIGPLAN_NARRATOR_URL` / `[narrator] url` — required, else `None`
    /// - `RIGPLAN_NARRATOR_MODEL` / `[narrator] model` — default "gpt-5-nano"
    /// - `RIGPLAN_NARRATOR_API_KEY`, or the variable named by
    ///   `[narrator] api_key_env` — optional Bearer token
    #[must_use]
    pub fn from_config(config: &NarratorConfig) -> Option<Self> {
        let url = std::env::var("RIGPLAN_NARRATOR_URL")
            .ok()
            .or_else(|| config.url.clone())?;

        let model = std::env::var("RIGPLAN_NARRATOR_MODEL")
            .ok()
            .or_else(|| config.model.clone())
            .unwrap_or_else(|| "gpt-5-nano".to_string());

        let api_key = std::env::var("RIGPLAN_NARRATOR_API_KEY").ok().or_else(|| {
            config
                .api_key_env
                .as_ref()
                .and_then(|name| std::env::var(name).ok())
        });

        tracing::info!("Narrator enabled: {} ({})", url, model);

        Some(Self {
            http: reqwest::Client::new(),
            url,
            model,
            api_key,
        })
    }

    /// Ask for a prose annotation of a structured payload.
    ///
    /// Returns `None` on any failure; callers treat that as "no
    /// explanation available".
    pub async fn explain(&self, topic: &str, payload: &Value) -> Option<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("{topic} result:\n{payload}") },
            ],
        });

        let mut request = self.http.post(&self.url).timeout(REQUEST_TIMEOUT).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = match request.send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Narrator request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Narrator returned status {}", response.status());
            return None;
        }

        let json = match response.json::<Value>().await {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!("Narrator response parse failed: {}", e);
                return None;
            }
        };

        let content = json["choices"][0]["message"]["content"].as_str()?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_narrator_is_none() {
        // No env vars set in tests, no url in config.
        let config = NarratorConfig::default();
        assert!(Narrator::from_config(&config).is_none());
    }

    #[test]
    fn config_url_enables_narrator_with_default_model() {
        let config = NarratorConfig {
            url: Some("http://localhost:9999/v1/chat/completions".to_string()),
            model: None,
            api_key_env: None,
        };
        let narrator = Narrator::from_config(&config).expect("narrator");
        assert_eq!(narrator.model, "gpt-5-nano");
        assert!(narrator.api_key.is_none());
    }
}
