//! Configuration loaded from `matchshot.toml`.
//!
//! Values missing from the file use defaults. Environment variables
//! (`REPLICATE_API_TOKEN`, `FACESWAP_API_URL`, `MATCHSHOT_MOCK`) take
//! precedence over the file. The loaded config is passed into client
//! constructors explicitly; nothing else reads ambient process state.

use std::path::Path;

use serde::Deserialize;

use crate::error::MatchshotError;

/// Top-level configuration loaded from `matchshot.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchshotConfig {
    /// Bearer credential for the synthesis service.
    #[serde(default)]
    pub replicate_api_token: String,

    /// Base URL of the synthesis service.
    #[serde(default = "default_synthesis_base_url")]
    pub synthesis_base_url: String,

    /// Base URL of the face-compositing service.
    #[serde(default)]
    pub faceswap_base_url: String,

    /// Use the built-in mock provider instead of live services.
    #[serde(default)]
    pub mock_mode: bool,

    /// Delay between status polls of a synthesis job.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Polls before a permanently pending job reads as timed out.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

fn default_synthesis_base_url() -> String {
    "https://api.replicate.com/v1".to_string()
}

// 2 s between polls.
fn default_poll_interval_ms() -> u64 {
    2000
}

// 90 polls at 2 s is a 3-minute budget.
fn default_max_poll_attempts() -> u32 {
    90
}

impl Default for MatchshotConfig {
    fn default() -> Self {
        Self {
            replicate_api_token: String::new(),
            synthesis_base_url: default_synthesis_base_url(),
            faceswap_base_url: String::new(),
            mock_mode: false,
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

impl MatchshotConfig {
    /// Load `matchshot.toml` from the current directory, then apply
    /// environment overrides. Missing file means defaults.
    pub fn load() -> Result<Self, MatchshotError> {
        Self::load_with_env(Path::new("matchshot.toml"))
    }

    /// Load a specific config file, then apply environment overrides.
    /// The environment always wins over the file, whichever file it is.
    pub fn load_with_env(path: &Path) -> Result<Self, MatchshotError> {
        let mut config = Self::load_path(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Read a config file without environment overrides.
    pub fn load_path(path: &Path) -> Result<Self, MatchshotError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str::<MatchshotConfig>(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn apply_env(&mut self) {
        if let Ok(token) = std::env::var("REPLICATE_API_TOKEN")
            && !token.is_empty()
        {
            self.replicate_api_token = token;
        }
        if let Ok(url) = std::env::var("FACESWAP_API_URL")
            && !url.is_empty()
        {
            self.faceswap_base_url = url;
        }
        if let Ok(flag) = std::env::var("MATCHSHOT_MOCK") {
            self.mock_mode = flag == "true" || flag == "1";
        }
    }

    /// Check that live mode has the credentials and endpoints it needs.
    pub fn validate_live(&self) -> Result<(), MatchshotError> {
        if self.replicate_api_token.is_empty() {
            return Err(MatchshotError::Config(
                "replicate_api_token is required outside mock mode".to_string(),
            ));
        }
        if self.faceswap_base_url.is_empty() {
            return Err(MatchshotError::Config(
                "faceswap_base_url is required outside mock mode".to_string(),
            ));
        }
        Ok(())
    }
}
