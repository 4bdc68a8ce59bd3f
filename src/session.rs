//! Bearer-credential storage.
//!
//! DESIGN
//! ======
//! The credential is one string under the well-known key `authToken` in a
//! small JSON key-value file, so other keys written by other tools survive a
//! `set`/`clear`. There is no expiry or refresh: a stale token is only
//! discovered when the service rejects it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::{Map, Value};

/// Key the credential is stored under.
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file I/O failed for {path}: {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("session file {path} is not a JSON object: {detail}")]
    Corrupt { path: PathBuf, detail: String },
    #[error("session encode failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Where the current user's bearer credential lives.
pub trait SessionStore: Send + Sync {
    /// The stored credential, or `None` when not authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self) -> Result<Option<String>, SessionError>;

    /// Store a credential, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, token: &str) -> Result<(), SessionError>;

    /// Forget the credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self) -> Result<(), SessionError>;
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Credential persisted in a JSON key-value file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(SessionError::Io { path: self.path.clone(), source }),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(SessionError::Corrupt { path: self.path.clone(), detail: format!("found {other}") }),
            Err(e) => Err(SessionError::Corrupt { path: self.path.clone(), detail: e.to_string() }),
        }
    }

    fn store(&self, map: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SessionError::Io { path: parent.to_path_buf(), source })?;
        }
        let raw = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, raw).map_err(|source| SessionError::Io { path: self.path.clone(), source })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        let map = self.load()?;
        Ok(map
            .get(AUTH_TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_owned))
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        let mut map = self.load()?;
        map.insert(AUTH_TOKEN_KEY.to_owned(), Value::String(token.to_owned()));
        self.store(&map)
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut map = self.load()?;
        if map.remove(AUTH_TOKEN_KEY).is_none() {
            return Ok(());
        }
        self.store(&map)
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local credential, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<String>, SessionError> {
        Ok(self.slot().clone())
    }

    fn set(&self, token: &str) -> Result<(), SessionError> {
        *self.slot() = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.slot() = None;
        Ok(())
    }
}
