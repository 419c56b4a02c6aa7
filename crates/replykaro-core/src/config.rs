use crate::errors::{Error, Result};
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_DRAFT_MODEL: &str = "gpt-4";
pub const DEFAULT_EVAL_MODEL: &str = "gpt-4";
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Upstream API configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret credential for the upstream model API.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Model used for draft generation.
    pub draft_model: String,
    /// Model used for draft evaluation.
    pub eval_model: String,
    /// Model used for audio transcription.
    pub transcription_model: String,
    /// Bound on each outbound call (seconds).
    pub request_timeout_secs: u64,
}

impl Config {
    /// Read configuration from the environment. The API key is the only
    /// required value; everything else falls back to documented defaults.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("OPENAI_API_KEY is not set".to_string()))?;

        Ok(Self {
            api_key,
            base_url: string_from_env("REPLYKARO_BASE_URL", DEFAULT_BASE_URL),
            draft_model: string_from_env("REPLYKARO_DRAFT_MODEL", DEFAULT_DRAFT_MODEL),
            eval_model: string_from_env("REPLYKARO_EVAL_MODEL", DEFAULT_EVAL_MODEL),
            transcription_model: string_from_env(
                "REPLYKARO_TRANSCRIPTION_MODEL",
                DEFAULT_TRANSCRIPTION_MODEL,
            ),
            request_timeout_secs: timeout_from_env(),
        })
    }
}

fn string_from_env(name: &str, default: &str) -> String {
    match std::env::var(name) {
        Ok(raw) => {
            let value = raw.trim();
            if value.is_empty() {
                default.to_string()
            } else {
                value.to_string()
            }
        }
        Err(_) => default.to_string(),
    }
}

fn timeout_from_env() -> u64 {
    match std::env::var("REQUEST_TIMEOUT_SECS") {
        Ok(raw) => match raw.trim().parse::<u64>() {
            Ok(parsed) if parsed > 0 => parsed,
            _ => {
                warn!(
                    "Invalid REQUEST_TIMEOUT_SECS='{}', falling back to {}",
                    raw, DEFAULT_REQUEST_TIMEOUT_SECS
                );
                DEFAULT_REQUEST_TIMEOUT_SECS
            }
        },
        Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
    }
}
