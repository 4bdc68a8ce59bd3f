//! Note editor modal state.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use crate::color::{css_color_to_hex, normalize_hex_color};
use crate::net::types::{Note, RecordId};

/// Preset colors offered by the editor. The first is the default for new notes.
pub const PALETTE: [&str; 6] = ["#ffff88", "#ff7eb9", "#7afcff", "#feff9c", "#b9f6ca", "#ffcc80"];

/// What a submitted editor writes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorTarget {
    New,
    Existing(RecordId),
}

/// Draft content and color for a note being created or edited.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteEditor {
    pub target: EditorTarget,
    pub content: String,
    /// Canonical `#rrggbb`.
    pub color: String,
}

impl NoteEditor {
    /// Editor for a new note with the prompt's text and the first palette color.
    #[must_use]
    pub fn for_new(content: &str) -> Self {
        Self { target: EditorTarget::New, content: content.to_owned(), color: PALETTE[0].to_owned() }
    }

    /// Editor for an existing note.
    ///
    /// The color comes from what the display reports for the element, which
    /// may be `rgb(...)` or hex; the stored note color is the fallback.
    #[must_use]
    pub fn for_existing(note: &Note, rendered_background: Option<&str>) -> Self {
        let color = rendered_background
            .and_then(css_color_to_hex)
            .unwrap_or_else(|| normalize_hex_color(&note.color, PALETTE[0]));
        Self { target: EditorTarget::Existing(note.id.clone()), content: note.content.clone(), color }
    }

    pub fn set_content(&mut self, content: &str) {
        content.clone_into(&mut self.content);
    }

    /// Pick a color in any supported CSS form. Returns `false` and keeps the
    /// current color when the value is not a color.
    pub fn select_color(&mut self, raw: &str) -> bool {
        match css_color_to_hex(raw) {
            Some(hex) => {
                self.color = hex;
                true
            }
            None => false,
        }
    }

    /// `(content, color)` to persist, or `None` while the content is blank.
    #[must_use]
    pub fn submission(&self) -> Option<(String, String)> {
        if self.content.trim().is_empty() {
            return None;
        }
        Some((self.content.clone(), self.color.clone()))
    }
}
