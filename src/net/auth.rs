//! Login exchange with the authentication service.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login service issues the bearer token the whiteboard service expects.
//! A successful login stores it through the session store; nothing else in
//! the crate talks to this service.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use tracing::{info, warn};

use super::types::{LoginRequest, LoginResponse};
use crate::config::ClientConfig;
use crate::session::{SessionError, SessionStore};

const LOGIN_PATH: &str = "/api/auth/login";
const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The service answered and refused the credentials.
    #[error("{0}")]
    Rejected(String),

    /// The service could not be reached or answered with something unreadable.
    #[error("could not connect to the login service at {url}: {detail}")]
    Unreachable { url: String, detail: String },

    #[error("storing session failed: {0}")]
    Session(#[from] SessionError),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

pub struct AuthClient {
    http: reqwest::Client,
    login_url: String,
    session: Arc<dyn SessionStore>,
}

impl AuthClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, AuthError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AuthError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, login_url: login_url(&config.login_api_url), session })
    }

    /// Exchange credentials for a token and store it. Returns the token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the server's message when the
    /// login is refused, [`AuthError::Unreachable`] on transport or decode
    /// failure, and [`AuthError::Session`] if the token cannot be stored.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AuthError> {
        let unreachable = |detail: String| AuthError::Unreachable { url: self.login_url.clone(), detail };

        let response = self
            .http
            .post(&self.login_url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| unreachable(e.to_string()))?;
        let text = response
            .text()
            .await
            .map_err(|e| unreachable(e.to_string()))?;

        let parsed = serde_json::from_str::<LoginResponse>(&text).map_err(|e| unreachable(e.to_string()))?;
        let token = match interpret_login(parsed) {
            Ok(token) => token,
            Err(e) => {
                warn!(%username, error = %e, "login rejected");
                return Err(e);
            }
        };

        self.session.set(&token)?;
        info!(%username, "login succeeded");
        Ok(token)
    }
}

fn login_url(base_url: &str) -> String {
    format!("{}{LOGIN_PATH}", base_url.trim_end_matches('/'))
}

/// Decide the outcome of a decoded login response.
fn interpret_login(response: LoginResponse) -> Result<String, AuthError> {
    if response.success {
        if let Some(token) = response.token.filter(|t| !t.is_empty()) {
            return Ok(token);
        }
    }
    let message = response
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| LOGIN_FAILED.to_owned());
    Err(AuthError::Rejected(message))
}
