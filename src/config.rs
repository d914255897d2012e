//! Runtime configuration
//!
//! Settings are read from the process environment. Only the bot token is
//! required; everything else falls back to a default.

use crate::{Error, Result};
use std::fmt;
use std::path::PathBuf;

/// Environment variable holding the bot credential
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
/// Environment variable holding the consent log database path
pub const DB_PATH_VAR: &str = "CONSENT_DB_PATH";
/// Environment variable overriding the Bot API base URL
pub const API_URL_VAR: &str = "TELEGRAM_API_URL";
/// Environment variable overriding the long-poll timeout
pub const POLL_TIMEOUT_VAR: &str = "POLL_TIMEOUT_SECS";

/// Default consent log database path
pub const DEFAULT_DB_PATH: &str = "consent.db";
/// Default Bot API base URL
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
/// Default long-poll timeout in seconds
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;
/// Largest long-poll timeout accepted, matching the Bot API's own cap
pub const MAX_POLL_TIMEOUT_SECS: u64 = 50;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// Bot credential used to authenticate against the Bot API
    pub bot_token: String,
    /// Path of the SQLite consent log
    pub db_path: PathBuf,
    /// Bot API base URL (without trailing slash)
    pub api_url: String,
    /// Long-poll timeout passed to `getUpdates`
    pub poll_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    /// Returns `Error::Config` if `BOT_TOKEN` is missing or blank, or if
    /// `POLL_TIMEOUT_SECS` is not an integer in `0..=MAX_POLL_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup(BOT_TOKEN_VAR)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::Config(format!("Missing {} env var", BOT_TOKEN_VAR)))?;

        let db_path = lookup(DB_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let api_url = lookup(API_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let poll_timeout_secs = match lookup(POLL_TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                Error::Config(format!("Invalid {} value '{}': {}", POLL_TIMEOUT_VAR, raw, e))
            })?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        if poll_timeout_secs > MAX_POLL_TIMEOUT_SECS {
            return Err(Error::Config(format!(
                "{} must be at most {}, got {}",
                POLL_TIMEOUT_VAR, MAX_POLL_TIMEOUT_SECS, poll_timeout_secs
            )));
        }

        Ok(Self {
            bot_token,
            db_path,
            api_url,
            poll_timeout_secs,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("db_path", &self.db_path)
            .field("api_url", &self.api_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .finish()
    }
}
