//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::sync::ReconcileMode;

pub const DEFAULT_WHITEBOARD_API_URL: &str = "http://localhost:3002";
pub const DEFAULT_LOGIN_API_URL: &str = "http://localhost:3003";
pub const DEFAULT_SYNC_INTERVAL_MS: u64 = 4000;
const SESSION_DIR_NAME: &str = "stickyboard";
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unsupported SYNC_RECONCILE mode '{0}' (expected 'replace' or 'diff')")]
    UnknownReconcileMode(String),
    #[error("no user config directory; set STICKYBOARD_SESSION_FILE")]
    NoSessionPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub whiteboard_api_url: String,
    pub login_api_url: String,
    pub sync_interval: Duration,
    pub reconcile: ReconcileMode,
    /// `None` leaves the transport's own defaults in place.
    pub request_timeout: Option<Duration>,
    pub session_file: PathBuf,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `WHITEBOARD_API_URL`: default `http://localhost:3002`
    /// - `LOGIN_API_URL`: default `http://localhost:3003`
    /// - `SYNC_INTERVAL_MS`: default 4000
    /// - `SYNC_RECONCILE`: `replace` (default) or `diff`
    /// - `REQUEST_TIMEOUT_SECS`: unset by default
    /// - `STICKYBOARD_SESSION_FILE`: default `<config dir>/stickyboard/session.json`
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown reconcile mode or when no session file
    /// location can be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let whiteboard_api_url = base_url(lookup("WHITEBOARD_API_URL"), DEFAULT_WHITEBOARD_API_URL);
        let login_api_url = base_url(lookup("LOGIN_API_URL"), DEFAULT_LOGIN_API_URL);
        let sync_interval = Duration::from_millis(
            parse_u64(lookup("SYNC_INTERVAL_MS"))
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_SYNC_INTERVAL_MS),
        );
        let reconcile = parse_reconcile(lookup("SYNC_RECONCILE").as_deref())?;
        let request_timeout = parse_u64(lookup("REQUEST_TIMEOUT_SECS"))
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let session_file = match lookup("STICKYBOARD_SESSION_FILE").filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_session_file().ok_or(ConfigError::NoSessionPath)?,
        };

        Ok(Self { whiteboard_api_url, login_api_url, sync_interval, reconcile, request_timeout, session_file })
    }
}

/// Parse a reconcile mode name; `None` selects the default.
///
/// # Errors
///
/// Returns an error for names other than `replace` and `diff`.
pub fn parse_reconcile(raw: Option<&str>) -> Result<ReconcileMode, ConfigError> {
    match raw.map(str::trim).unwrap_or("replace") {
        "" | "replace" => Ok(ReconcileMode::Replace),
        "diff" => Ok(ReconcileMode::Diff),
        other => Err(ConfigError::UnknownReconcileMode(other.to_owned())),
    }
}

/// Normalize a service base URL, falling back when unset or blank.
#[must_use]
pub fn base_url(raw: Option<String>, default: &str) -> String {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_owned())
        .trim_end_matches('/')
        .to_owned()
}

fn parse_u64(raw: Option<String>) -> Option<u64> {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
}

fn default_session_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SESSION_DIR_NAME).join(SESSION_FILE_NAME))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
