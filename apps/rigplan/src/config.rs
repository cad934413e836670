//! # Configuration
//!
//! Optional TOML configuration file for the binary. Everything has a
//! default; a missing file or missing section falls back to it.
//!
//! ```toml
//! [policy]
//! gpu_headroom_w = 250
//!
//! [narrator]
//! url = "https://api.openai.com/v1/chat/completions"
//! model = "gpt-5-nano"
//! api_key_env = "OPENAI_API_KEY"
//! ```

use rigplan_core::{FitPolicy, PlanError};
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fit-policy overrides (defaults reproduce the established behavior).
    pub policy: FitPolicy,
    /// Narrator endpoint settings.
    pub narrator: NarratorConfig,
}

/// Narrator section of the config file.
///
/// Environment variables (`RIGPLAN_NARRATOR_URL`, `RIGPLAN_NARRATOR_MODEL`,
/// `RIGPLAN_NARRATOR_API_KEY`) take precedence over these values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    /// Chat-completions endpoint URL. Unset ⇒ narrator disabled.
    pub url: Option<String>,
    /// Model name sent with each request.
    pub model: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: Option<String>,
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Load configuration from an optional TOML file.
    ///
    /// `None` means no file was given and defaults apply. A given path
    /// must exist and parse; failures are reported, not silently ignored.
    pub fn load(path: Option<&Path>) -> Result<Self, PlanError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .map_err(|e| PlanError::Io(format!("Read config '{}': {}", path.display(), e)))?;

        toml::from_str(&text)
            .map_err(|e| PlanError::InvalidInput(format!("Parse config: {}", e)))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_path_yields_defaults() {
        let config = AppConfig::load(None).expect("defaults");
        assert_eq!(config.policy, FitPolicy::default());
        assert!(config.narrator.url.is_none());
    }

    #[test]
    fn partial_policy_section_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(
            file,
            "[policy]\ngpu_headroom_w = 250\n\n[narrator]\nmodel = \"gpt-5-nano\"\n"
        )
        .expect("write");

        let config = AppConfig::load(Some(file.path())).expect("parse");
        assert_eq!(config.policy.gpu_headroom_w, 250);
        assert_eq!(config.policy.cpu_tdp_default_w, 65);
        assert_eq!(config.narrator.model.as_deref(), Some("gpt-5-nano"));
        assert!(config.narrator.url.is_none());
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let path = Path::new("/nonexistent/rigplan.toml");
        assert!(AppConfig::load(Some(path)).is_err());
    }
}
