//! Board view: controller state, gesture commands, and the rendering port.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every gesture and every sync tick becomes a [`Command`] consumed by
//! [`BoardView::dispatch`]. The display surface is reached only through
//! [`RenderPort`], so the whole view runs against a fake in tests and a
//! terminal printer in the CLI.

pub mod controller;
pub mod editor;
pub mod gesture;
pub mod render;

pub use controller::{BoardState, BoardView, Command, Flow};
pub use editor::{EditorTarget, NoteEditor, PALETTE};
pub use gesture::Point;
pub use render::{RenderPort, TerminalRender};
