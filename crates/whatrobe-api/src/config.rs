//! Service configuration from environment variables.
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_MODEL_TIMEOUT_MS: u64 = 20_000;
pub const DEFAULT_MODEL_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CONFIG/INVALID: {name}={value}: expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("CONFIG/POLICY: {0}")]
    Policy(String),
    #[error("CONFIG/MODEL: {0}")]
    Model(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub addr: String,
    /// Text-generation endpoint; the proposer is disabled when unset.
    pub model_url: Option<String>,
    pub model_token: Option<String>,
    pub model_timeout: Duration,
    pub model_max_tokens: u32,
    /// YAML compatibility policy; the standard policy when unset.
    pub policy_path: Option<PathBuf>,
    /// Fixed seed for composer shuffles and candidate ids.
    pub seed: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            model_url: None,
            model_token: None,
            model_timeout: Duration::from_millis(DEFAULT_MODEL_TIMEOUT_MS),
            model_max_tokens: DEFAULT_MODEL_MAX_TOKENS,
            policy_path: None,
            seed: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from `WHATROBE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let model_timeout = match var("WHATROBE_MODEL_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse("WHATROBE_MODEL_TIMEOUT_MS", &raw, "milliseconds")?),
            None => defaults.model_timeout,
        };
        let model_max_tokens = match var("WHATROBE_MODEL_MAX_TOKENS") {
            Some(raw) => parse("WHATROBE_MODEL_MAX_TOKENS", &raw, "a positive token count")?,
            None => defaults.model_max_tokens,
        };
        let seed: Option<u64> = var("WHATROBE_SEED")
            .map(|raw| parse("WHATROBE_SEED", &raw, "an unsigned 64-bit integer"))
            .transpose()?;

        Ok(Self {
            addr: var("WHATROBE_ADDR").unwrap_or(defaults.addr),
            model_url: var("WHATROBE_MODEL_URL"),
            model_token: var("WHATROBE_MODEL_TOKEN"),
            model_timeout,
            model_max_tokens,
            policy_path: var("WHATROBE_POLICY").map(PathBuf::from),
            seed,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, raw: &str, expected: &'static str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        expected,
    })
}
