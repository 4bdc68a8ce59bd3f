//! Board directory: listing, creation, and current-board resolution.
//!
//! DESIGN
//! ======
//! Resolution picks the first board in server order, or creates the default
//! board when the list is empty. Listing failures degrade to an empty list,
//! so a broken list call followed by a working create still lands the user
//! on a fresh board.

#[cfg(test)]
#[path = "directory_test.rs"]
mod directory_test;

use std::sync::Arc;

use tracing::{info, warn};

use crate::net::api::WhiteboardApi;
use crate::net::error::ApiError;
use crate::net::types::{Board, NewBoard, RecordId};

pub const DEFAULT_BOARD_NAME: &str = "My Board";
pub const DEFAULT_BOARD_DESCRIPTION: &str = "Default board";

#[derive(Clone)]
pub struct BoardDirectory {
    api: Arc<dyn WhiteboardApi>,
}

impl BoardDirectory {
    pub fn new(api: Arc<dyn WhiteboardApi>) -> Self {
        Self { api }
    }

    /// All boards visible to the session. Failures are logged and read as empty.
    pub async fn list(&self) -> Vec<Board> {
        match self.api.list_boards().await {
            Ok(boards) => boards,
            Err(e) => {
                warn!(error = %e, "board list failed");
                Vec::new()
            }
        }
    }

    /// Create a board and return its id.
    ///
    /// # Errors
    ///
    /// Returns the API error if the create call fails.
    pub async fn create(&self, name: &str, description: &str, is_public: bool) -> Result<RecordId, ApiError> {
        let body = NewBoard { name: name.to_owned(), description: description.to_owned(), is_public };
        let board = self.api.create_board(&body).await?;
        info!(board_id = %board.id, name = %board.name, "board created");
        Ok(board.id)
    }

    /// Pick the board to show: first listed, else a freshly created default.
    ///
    /// Returns `None` only when listing came back empty and the create failed.
    pub async fn resolve_current(&self) -> Option<RecordId> {
        if let Some(first) = self.list().await.into_iter().next() {
            info!(board_id = %first.id, "current board resolved");
            return Some(first.id);
        }

        match self
            .create(DEFAULT_BOARD_NAME, DEFAULT_BOARD_DESCRIPTION, false)
            .await
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(error = %e, "default board creation failed; continuing without a board");
                None
            }
        }
    }
}
