//! Whiteboard REST client.
//!
//! DESIGN
//! ======
//! `WhiteboardApi` is the seam between the board logic and the network so
//! the directory, note store, and view can run against an in-memory fake.
//! `HttpWhiteboardApi` is the real implementation: every call reads the
//! bearer token from the session store at send time, so a logout elsewhere
//! takes effect on the next request. Body decoding lives in pure `parse_*`
//! helpers for testability.
//!
//! ERROR HANDLING
//! ==============
//! A missing token short-circuits with `ApiError::NotAuthenticated` before
//! any request is built. Non-success statuses carry the server's message when
//! the body has one.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::Method;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::{ApiError, error_message_from_body};
use super::types::{Board, NewBoard, NewNote, Note, NoteListing, NotePatch, RecordId};
use crate::config::ClientConfig;
use crate::session::SessionStore;

const BOARDS_PATH: &str = "/api/boards";
const NOTES_PATH: &str = "/api/postits";

// =============================================================================
// TRAIT
// =============================================================================

/// Remote board and note store. Enables fakes in tests.
#[async_trait::async_trait]
pub trait WhiteboardApi: Send + Sync {
    /// `GET /api/boards`.
    async fn list_boards(&self) -> Result<Vec<Board>, ApiError>;

    /// `POST /api/boards`.
    async fn create_board(&self, board: &NewBoard) -> Result<Board, ApiError>;

    /// `GET /api/postits`, unfiltered.
    async fn list_notes(&self) -> Result<Vec<Note>, ApiError>;

    /// `POST /api/postits`.
    async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError>;

    /// `PATCH /api/postits/{id}`. `None` when the service answers with an
    /// empty body.
    async fn update_note(&self, id: &RecordId, patch: &NotePatch) -> Result<Option<Note>, ApiError>;

    /// `DELETE /api/postits/{id}`.
    async fn delete_note(&self, id: &RecordId) -> Result<(), ApiError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpWhiteboardApi {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpWhiteboardApi {
    /// Build a client for the configured whiteboard service.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.whiteboard_api_url.trim_end_matches('/').to_owned(), session })
    }

    /// Build a client with default transport settings against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_base_url(base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), session })
    }

    fn bearer(&self) -> Result<String, ApiError> {
        match self.session.get() {
            Ok(Some(token)) => Ok(format!("Bearer {token}")),
            Ok(None) => Err(ApiError::NotAuthenticated),
            Err(e) => {
                warn!(error = %e, "session read failed; treating as logged out");
                Err(ApiError::NotAuthenticated)
            }
        }
    }

    async fn send<B: Serialize + Sync>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String, ApiError> {
        let auth = self.bearer()?;
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "whiteboard request");

        let request = self.http.request(method, &url).header(AUTHORIZATION, auth);
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        check_status(status, &text)?;
        Ok(text)
    }
}

#[async_trait::async_trait]
impl WhiteboardApi for HttpWhiteboardApi {
    async fn list_boards(&self) -> Result<Vec<Board>, ApiError> {
        let text = self.send::<()>(Method::GET, BOARDS_PATH, None).await?;
        parse_json(&text)
    }

    async fn create_board(&self, board: &NewBoard) -> Result<Board, ApiError> {
        let text = self.send(Method::POST, BOARDS_PATH, Some(board)).await?;
        parse_json(&text)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        let text = self.send::<()>(Method::GET, NOTES_PATH, None).await?;
        parse_note_listing(&text)
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        let text = self.send(Method::POST, NOTES_PATH, Some(note)).await?;
        parse_json(&text)
    }

    async fn update_note(&self, id: &RecordId, patch: &NotePatch) -> Result<Option<Note>, ApiError> {
        let text = self.send(Method::PATCH, &note_path(id), Some(patch)).await?;
        parse_optional_note(&text)
    }

    async fn delete_note(&self, id: &RecordId) -> Result<(), ApiError> {
        self.send::<()>(Method::DELETE, &note_path(id), None)
            .await
            .map(|_| ())
    }
}

// =============================================================================
// PARSING
// =============================================================================

fn note_path(id: &RecordId) -> String {
    format!("{NOTES_PATH}/{id}")
}

/// Map a response status to an error, extracting the server message if any.
fn check_status(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(ApiError::Status { status, message: error_message_from_body(body) })
}

fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Decode a note listing in either the bare or the `postits` envelope shape.
fn parse_note_listing(text: &str) -> Result<Vec<Note>, ApiError> {
    parse_json::<NoteListing>(text).map(NoteListing::into_notes)
}

/// An update may answer with the stored note or with nothing at all.
fn parse_optional_note(text: &str) -> Result<Option<Note>, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "null" || trimmed == "{}" {
        return Ok(None);
    }
    parse_json(trimmed).map(Some)
}
