//! Rendering port and the terminal renderer used by the CLI.
//!
//! DESIGN
//! ======
//! The controller never touches a display directly. A port implementation
//! keeps one visual element per note id; `draw_note` on an id that already
//! has an element replaces it. `TerminalRender` prints every change as a
//! line and reports element backgrounds in computed-style `rgb(...)` form,
//! the same shape a browser gives back.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::BTreeMap;
use std::io::Write;

use super::editor::{EditorTarget, NoteEditor, PALETTE};
use crate::color::parse_hex_rgb;
use crate::net::types::{Board, Note, RecordId};

/// Display surface driven by the board view.
pub trait RenderPort: Send {
    /// Remove every visual note element.
    fn clear_notes(&mut self);
    /// Create the element for `note`, replacing any element with the same id.
    fn draw_note(&mut self, note: &Note);
    fn remove_note(&mut self, id: &RecordId);
    fn move_note(&mut self, id: &RecordId, x: i64, y: i64);
    /// Background color as the display reports it, if the element exists.
    fn note_background(&self, id: &RecordId) -> Option<String>;
    fn show_boards(&mut self, boards: &[Board], current: Option<&RecordId>);
    fn open_editor(&mut self, editor: &NoteEditor);
    fn close_editor(&mut self);
    /// Blocking, user-visible error.
    fn alert(&mut self, message: &str);
    fn redirect_to_login(&mut self);
}

// =============================================================================
// TERMINAL RENDERER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    content: String,
    x: i64,
    y: i64,
    background: (u8, u8, u8),
}

/// Line-oriented renderer writing to any `Write` sink.
pub struct TerminalRender<W: Write + Send> {
    out: W,
    elements: BTreeMap<RecordId, Element>,
}

impl<W: Write + Send> TerminalRender<W> {
    pub fn new(out: W) -> Self {
        Self { out, elements: BTreeMap::new() }
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // A closed stdout has nowhere to report to.
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write + Send> RenderPort for TerminalRender<W> {
    fn clear_notes(&mut self) {
        self.elements.clear();
        self.line("-- notes cleared --");
    }

    fn draw_note(&mut self, note: &Note) {
        let background = parse_hex_rgb(&note.color)
            .or_else(|| parse_hex_rgb(PALETTE[0]))
            .unwrap_or((255, 255, 136));
        let element = Element { content: note.content.clone(), x: note.x_position, y: note.y_position, background };
        let row = format!("+ {}", format_element(&note.id, &element));
        self.elements.insert(note.id.clone(), element);
        self.line(&row);
    }

    fn remove_note(&mut self, id: &RecordId) {
        if self.elements.remove(id).is_some() {
            self.line(&format!("- note {id} removed"));
        }
    }

    fn move_note(&mut self, id: &RecordId, x: i64, y: i64) {
        let Some(element) = self.elements.get_mut(id) else {
            return;
        };
        element.x = x;
        element.y = y;
        self.line(&format!("> note {id} moved to ({x}, {y})"));
    }

    fn note_background(&self, id: &RecordId) -> Option<String> {
        self.elements
            .get(id)
            .map(|el| format!("rgb({}, {}, {})", el.background.0, el.background.1, el.background.2))
    }

    fn show_boards(&mut self, boards: &[Board], current: Option<&RecordId>) {
        self.line("boards:");
        if boards.is_empty() {
            self.line("  (none)");
        }
        for board in boards {
            let marker = if current == Some(&board.id) { '*' } else { ' ' };
            self.line(&format!("  {marker} {} {}", board.id, board.name));
        }
    }

    fn open_editor(&mut self, editor: &NoteEditor) {
        let title = match &editor.target {
            EditorTarget::New => "new note".to_owned(),
            EditorTarget::Existing(id) => format!("note {id}"),
        };
        self.line(&format!("editing {title}: \"{}\" color {}", editor.content, editor.color));
        let palette: Vec<String> = PALETTE
            .iter()
            .enumerate()
            .map(|(i, color)| format!("{}={color}", i + 1))
            .collect();
        self.line(&format!("  palette: {}  (text <..> | color <n|hex> | save | cancel)", palette.join(" ")));
    }

    fn close_editor(&mut self) {
        self.line("editor closed");
    }

    fn alert(&mut self, message: &str) {
        self.line(&format!("! {message}"));
    }

    fn redirect_to_login(&mut self) {
        self.line("! Please login first! Run `stickyboard login`.");
    }
}

fn format_element(id: &RecordId, el: &Element) -> String {
    let (r, g, b) = el.background;
    format!("note {id} at ({}, {}) #{r:02x}{g:02x}{b:02x}: {}", el.x, el.y, el.content)
}
