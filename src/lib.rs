//! Sticky-note whiteboard client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The whiteboard service owns boards and notes; the login service issues
//! bearer tokens. This crate keeps a local board view in step with the
//! service: it resolves the current board, turns gestures into REST calls,
//! and polls for edits made by other sessions.
//!
//! Layering, leaves first: `session` and `net` talk to storage and HTTP,
//! `board` wraps the REST surface per resource, `view` owns the controller
//! state and the rendering port, and `sync` drives periodic refresh.

pub mod board;
pub mod color;
pub mod config;
pub mod net;
pub mod session;
pub mod shell;
pub mod sync;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
