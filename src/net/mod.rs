//! Networking modules for the whiteboard and login services.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles the bearer-authenticated whiteboard REST calls, `auth` the
//! login exchange, `error` the shared failure taxonomy, and `types` the wire
//! schema.

pub mod api;
pub mod auth;
pub mod error;
pub mod types;
