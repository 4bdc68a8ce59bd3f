//! Wire DTOs for the whiteboard and login services.
//!
//! DESIGN
//! ======
//! Field names mirror the services' camelCase JSON. Record ids may arrive as
//! JSON strings or numbers; `RecordId` compares by string form (the board
//! filter relies on that) but re-serializes numeric ids as numbers so request
//! bodies echo the shape the service used.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Background color given to notes created without an explicit choice.
pub const DEFAULT_NOTE_COLOR: &str = "#ffff88";

// =============================================================================
// RECORD ID
// =============================================================================

/// Server-assigned identifier for a board or note.
#[derive(Clone, Debug)]
pub struct RecordId {
    text: String,
    numeric: bool,
}

impl RecordId {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), numeric: false }
    }

    #[must_use]
    pub fn from_number(value: i64) -> Self {
        Self { text: value.to_string(), numeric: true }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::from_number(value)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(value) = self.text.parse::<i64>() {
                return serializer.serialize_i64(value);
            }
        }
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(text) => Ok(Self::new(text)),
            serde_json::Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    return Ok(Self::from_number(int));
                }
                if let Some(uint) = number.as_u64() {
                    return Ok(Self { text: uint.to_string(), numeric: true });
                }
                Err(D::Error::custom("expected integer id"))
            }
            _ => Err(D::Error::custom("expected string or integer id")),
        }
    }
}

// =============================================================================
// BOARD
// =============================================================================

/// A board as listed by `GET /api/boards`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Body of `POST /api/boards`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub name: String,
    pub description: String,
    pub is_public: bool,
}

// =============================================================================
// NOTE
// =============================================================================

/// A post-it note as stored by the whiteboard service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: RecordId,
    #[serde(default)]
    pub content: String,
    /// Left edge in board pixels.
    #[serde(default, deserialize_with = "deserialize_position")]
    pub x_position: i64,
    /// Top edge in board pixels.
    #[serde(default, deserialize_with = "deserialize_position")]
    pub y_position: i64,
    /// Background color as stored (normally `#rrggbb`).
    #[serde(default = "default_note_color", deserialize_with = "deserialize_color")]
    pub color: String,
    /// Owning board. Notes without one never match a current board.
    #[serde(default)]
    pub board_id: Option<RecordId>,
}

/// Body of `POST /api/postits`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub content: String,
    pub x_position: i64,
    pub y_position: i64,
    pub color: String,
    pub board_id: RecordId,
}

/// Body of `PATCH /api/postits/{id}`.
///
/// Content edits and position commits are separate call sites and never share
/// a payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NotePatch {
    Content {
        content: String,
        color: String,
    },
    #[serde(rename_all = "camelCase")]
    Position {
        x_position: i64,
        y_position: i64,
    },
}

/// `GET /api/postits` answers with either a bare array or `{ "postits": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NoteListing {
    Bare(Vec<Note>),
    Envelope { postits: Vec<Note> },
}

impl NoteListing {
    #[must_use]
    pub fn into_notes(self) -> Vec<Note> {
        match self {
            Self::Bare(notes) | Self::Envelope { postits: notes } => notes,
        }
    }
}

// =============================================================================
// LOGIN
// =============================================================================

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /api/auth/login`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// FIELD HELPERS
// =============================================================================

fn default_note_color() -> String {
    DEFAULT_NOTE_COLOR.to_owned()
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .filter(|color| !color.trim().is_empty())
        .unwrap_or_else(default_note_color))
}

fn deserialize_position<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            number
                .as_f64()
                .and_then(rounded_i64)
                .ok_or_else(|| D::Error::custom("position out of range"))
        }
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(rounded_i64)
            .ok_or_else(|| D::Error::custom(format!("invalid position: {raw}"))),
        _ => Err(D::Error::custom("expected numeric position")),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn rounded_i64(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let rounded = value.round();
    if rounded < i64::MIN as f64 || rounded > i64::MAX as f64 {
        return None;
    }
    Some(rounded as i64)
}
