//! Note store scoped to one board.
//!
//! DESIGN
//! ======
//! The service lists every note the session can see; scoping to the current
//! board happens here, by id string equality. Content edits and position
//! commits go out as separate patch shapes and are never merged.

#[cfg(test)]
#[path = "notes_test.rs"]
mod notes_test;

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use crate::net::api::WhiteboardApi;
use crate::net::error::ApiError;
use crate::net::types::{NewNote, Note, NotePatch, RecordId};
use crate::view::gesture::wire_coordinate;

/// Random spot for a freshly created note: x in `[50, 350)`, y in `[100, 400)`.
pub fn scatter_position<R: Rng + ?Sized>(rng: &mut R) -> (i64, i64) {
    (rng.random_range(0..300) + 50, rng.random_range(0..300) + 100)
}

/// Keep only the notes that belong to `board_id`.
#[must_use]
pub fn filter_board_notes(notes: Vec<Note>, board_id: &RecordId) -> Vec<Note> {
    notes
        .into_iter()
        .filter(|note| note.board_id.as_ref() == Some(board_id))
        .collect()
}

#[derive(Clone)]
pub struct NoteStore {
    api: Arc<dyn WhiteboardApi>,
}

impl NoteStore {
    pub fn new(api: Arc<dyn WhiteboardApi>) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns the API error if the create call fails.
    pub async fn create(&self, note: &NewNote) -> Result<Note, ApiError> {
        let created = self.api.create_note(note).await?;
        info!(note_id = %created.id, board_id = %note.board_id, "note created");
        Ok(created)
    }

    /// Notes on `board_id`, in server order.
    ///
    /// # Errors
    ///
    /// Returns the API error if the listing fails.
    pub async fn list(&self, board_id: &RecordId) -> Result<Vec<Note>, ApiError> {
        let all = self.api.list_notes().await?;
        let total = all.len();
        let notes = filter_board_notes(all, board_id);
        debug!(%board_id, total, kept = notes.len(), "notes listed");
        Ok(notes)
    }

    /// Persist new content and color.
    ///
    /// # Errors
    ///
    /// Returns the API error if the update fails.
    pub async fn update_content(&self, id: &RecordId, content: &str, color: &str) -> Result<Option<Note>, ApiError> {
        let patch = NotePatch::Content { content: content.to_owned(), color: color.to_owned() };
        self.api.update_note(id, &patch).await
    }

    /// Persist a position. Fractional pixels are truncated to integers.
    ///
    /// # Errors
    ///
    /// Returns the API error if the update fails.
    pub async fn update_position(&self, id: &RecordId, x: f64, y: f64) -> Result<Option<Note>, ApiError> {
        let patch = NotePatch::Position { x_position: wire_coordinate(x), y_position: wire_coordinate(y) };
        self.api.update_note(id, &patch).await
    }

    /// # Errors
    ///
    /// Returns the API error if the delete fails.
    pub async fn delete(&self, id: &RecordId) -> Result<(), ApiError> {
        self.api.delete_note(id).await?;
        info!(note_id = %id, "note deleted");
        Ok(())
    }
}
