//! Resource clients layered on [`crate::net::api::WhiteboardApi`].
//!
//! `directory` owns board listing and current-board resolution; `notes`
//! owns note CRUD scoped to one board.

pub mod directory;
pub mod notes;
