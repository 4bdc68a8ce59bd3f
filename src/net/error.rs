//! Failure taxonomy for whiteboard API calls.
//!
//! ERROR HANDLING
//! ==============
//! There are no retries and no transient/permanent split. Callers decide how
//! loud a failure is: gesture handlers show `user_message()` in an alert,
//! background work (sync, board resolution) only logs it.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Alert text for an HTTP error whose body carried no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Errors produced by whiteboard API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No credential is stored; the caller must send the user to login.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The request never completed (connect, DNS, TLS, I/O).
    #[error("request failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or(UNKNOWN_ERROR))]
    Status { status: u16, message: Option<String> },

    /// A success response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Text shown to the user when a gesture fails.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotAuthenticated => "Please login first!".to_owned(),
            Self::Transport(detail) => format!("Network error: {detail}"),
            Self::Status { message, .. } => message.clone().unwrap_or_else(|| UNKNOWN_ERROR.to_owned()),
            Self::Parse(_) => "Network error: unreadable response from server".to_owned(),
            Self::HttpClientBuild(detail) => format!("Client error: {detail}"),
        }
    }

    /// No credential was stored. A credential the server rejects is an
    /// ordinary `Status` error and does not count.
    #[must_use]
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }
}

/// Pull a human-readable message out of an error response body.
///
/// Accepts `{"error": "..."}`, `{"message": "..."}` and
/// `{"error": {"message": "..."}}`; anything else yields `None`.
#[must_use]
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    let pick = |value: &serde_json::Value| -> Option<String> {
        ["error", "message"].iter().find_map(|key| {
            value
                .get(key)
                .and_then(serde_json::Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        })
    };
    pick(&value).or_else(|| value.get("error").and_then(pick))
}
