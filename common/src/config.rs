//! Process configuration, read once from the environment at startup.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("failed to parse {key}='{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where notifications go: a numeric chat id or a public `@channel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl std::str::FromStr for ChatTarget {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if let Some(name) = raw.strip_prefix('@') {
            if name.is_empty() {
                return Err("channel username is empty".into());
            }
            return Ok(ChatTarget::Username(raw.to_string()));
        }
        raw.parse::<i64>()
            .map(ChatTarget::Id)
            .map_err(|e| format!("expected a numeric chat id or @channelusername: {e}"))
    }
}

impl fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatTarget::Id(id) => write!(f, "{id}"),
            ChatTarget::Username(name) => f.write_str(name),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat: ChatTarget,
    pub endpoint: String,
    pub retry_period: Duration,
}

impl Config {
    /// Load from the process environment. A `.env` file in the working
    /// directory is read first if present; real env vars take precedence.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let opt = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let must = |key: &'static str| opt(key).ok_or(ConfigError::Missing(key));

        let practicum_token = must("PRACTICUM_TOKEN")?;
        let telegram_token = must("TELEGRAM_TOKEN")?;
        let raw_chat_id = must("TELEGRAM_CHAT_ID")?;

        let telegram_chat = raw_chat_id
            .parse::<ChatTarget>()
            .map_err(|reason| ConfigError::Invalid {
                key: "TELEGRAM_CHAT_ID",
                value: raw_chat_id.clone(),
                reason,
            })?;

        let endpoint = opt("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let retry_secs = match opt("RETRY_PERIOD_SECS") {
            Some(raw) => parse_retry_secs(&raw)?,
            None => DEFAULT_RETRY_PERIOD_SECS,
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat,
            endpoint,
            retry_period: Duration::from_secs(retry_secs),
        })
    }

    pub fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }
}

fn parse_retry_secs(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key: "RETRY_PERIOD_SECS",
        value: raw.to_string(),
        reason,
    };
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".into())),
        Ok(secs) => Ok(secs),
        Err(e) => Err(invalid(e.to_string())),
    }
}

/// Debug view of [`Config`] with secrets masked.
pub struct Redacted<'a>(&'a Config);

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.0;
        f.debug_struct("Config")
            .field("practicum_token", &mask(&c.practicum_token))
            .field("telegram_token", &mask(&c.telegram_token))
            .field("telegram_chat", &c.telegram_chat)
            .field("endpoint", &c.endpoint)
            .field("retry_period_secs", &c.retry_period.as_secs())
            .finish()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.redacted().fmt(f)
    }
}

fn mask(s: &str) -> String {
    match s.get(..3) {
        Some(prefix) if s.len() > 6 => format!("{prefix}***"),
        _ => "***".into(),
    }
}
