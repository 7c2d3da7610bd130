use dotenvy::dotenv;
use std::env;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/chat/respond";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub char_delay: Duration,
    pub reply_delay: Duration,
    pub fallback_delay: Duration,
    /// `None` keeps the HTTP client's default.
    pub request_timeout: Option<Duration>,
    pub splash: bool,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            char_delay: Duration::from_millis(15),
            reply_delay: Duration::from_millis(500),
            fallback_delay: Duration::from_millis(1500),
            request_timeout: None,
            splash: true,
            seed: None,
        }
    }
}

impl Config {
    /// Read `.env` if present, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            endpoint: get("ASTRA_ENDPOINT")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.endpoint),
            char_delay: match get("ASTRA_CHAR_DELAY_MS") {
                Some(v) => parse_millis("ASTRA_CHAR_DELAY_MS", &v)?,
                None => defaults.char_delay,
            },
            reply_delay: match get("ASTRA_REPLY_DELAY_MS") {
                Some(v) => parse_millis("ASTRA_REPLY_DELAY_MS", &v)?,
                None => defaults.reply_delay,
            },
            fallback_delay: match get("ASTRA_FALLBACK_DELAY_MS") {
                Some(v) => parse_millis("ASTRA_FALLBACK_DELAY_MS", &v)?,
                None => defaults.fallback_delay,
            },
            request_timeout: get("ASTRA_REQUEST_TIMEOUT_SECS")
                .map(|v| parse_secs("ASTRA_REQUEST_TIMEOUT_SECS", &v))
                .transpose()?,
            splash: match get("ASTRA_SPLASH") {
                Some(v) => parse_bool("ASTRA_SPLASH", &v)?,
                None => defaults.splash,
            },
            seed: get("ASTRA_SEED")
                .map(|v| parse_u64("ASTRA_SEED", &v))
                .transpose()?,
        })
    }
}

fn invalid(key: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e| invalid(key, value, e))
}

fn parse_millis(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_u64(key, value).map(Duration::from_millis)
}

fn parse_secs(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    match parse_u64(key, value)? {
        0 => Err(invalid(key, value, "timeout must be positive")),
        secs => Ok(Duration::from_secs(secs)),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}
