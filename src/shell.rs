//! Line commands for the interactive terminal board.
//!
//! Each non-empty line maps onto exactly one view [`Command`]; `help` is
//! answered by the shell itself.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use crate::net::types::RecordId;
use crate::view::{Command, PALETTE, Point};

pub const HELP: &str = "\
commands:
  add <text>                 start a new note
  edit <note-id>             edit an existing note
  text <content>             replace the editor text
  color <1-6|#hex|rgb(..)>   pick the editor color
  save | cancel              close the editor
  drag <note-id>             pick up a note
  drop <x> <y> [<ox> <oy>]   drop it at a pointer position (board origin ox, oy)
  trash                      drop it on the trash
  board <board-id>           switch board
  new-board <name> [desc]    create and select a board
  boards                     list boards
  refresh                    re-fetch notes now
  logout | quit";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    Missing { command: &'static str, what: &'static str },
    #[error("`{0}` is not a number")]
    BadNumber(String),
}

/// Parsed line.
#[derive(Clone, Debug, PartialEq)]
pub enum ShellInput {
    Command(Command),
    Help,
}

/// Parse one input line. Blank lines yield `None`.
///
/// # Errors
///
/// Returns an error for unknown commands and missing or malformed arguments.
pub fn parse_line(line: &str) -> Result<Option<ShellInput>, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word {
        "help" | "?" => return Ok(Some(ShellInput::Help)),
        "add" => Command::BeginCreate { content: rest.to_owned() },
        "edit" => Command::OpenEditor { note_id: required_id("edit", rest)? },
        "text" => Command::EditorContent { content: rest.to_owned() },
        "color" => Command::EditorColor { color: palette_color(required("color", rest, "a color")?) },
        "save" => Command::SubmitEditor,
        "cancel" => Command::CancelEditor,
        "drag" => Command::DragStart { note_id: required_id("drag", rest)? },
        "drop" => parse_drop(rest)?,
        "trash" => Command::DropOnTrash,
        "board" => Command::SwitchBoard { board_id: required_id("board", rest)? },
        "new-board" => {
            let rest = required("new-board", rest, "a name")?;
            let (name, description) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(name, description)| (name, description.trim()));
            Command::CreateBoard { name: name.to_owned(), description: description.to_owned(), is_public: false }
        }
        "boards" => Command::ListBoards,
        "refresh" => Command::Refresh,
        "logout" => Command::Logout,
        "quit" | "exit" => Command::Close,
        other => return Err(ShellError::Unknown(other.to_owned())),
    };
    Ok(Some(ShellInput::Command(command)))
}

fn required<'a>(command: &'static str, rest: &'a str, what: &'static str) -> Result<&'a str, ShellError> {
    if rest.is_empty() {
        return Err(ShellError::Missing { command, what });
    }
    Ok(rest)
}

fn required_id(command: &'static str, rest: &str) -> Result<RecordId, ShellError> {
    required(command, rest, "an id").map(RecordId::from)
}

/// `1`..`6` select a palette entry; anything else passes through as a color.
fn palette_color(raw: &str) -> String {
    raw.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| PALETTE.get(i))
        .map_or_else(|| raw.to_owned(), |color| (*color).to_owned())
}

fn parse_drop(rest: &str) -> Result<Command, ShellError> {
    let numbers = rest
        .split_whitespace()
        .map(|part| {
            part.parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ShellError::BadNumber(part.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let (pointer, board_origin) = match numbers.as_slice() {
        [x, y] => (Point::new(*x, *y), Point::default()),
        [x, y, ox, oy] => (Point::new(*x, *y), Point::new(*ox, *oy)),
        _ => return Err(ShellError::Missing { command: "drop", what: "x y or x y ox oy" }),
    };
    Ok(Command::DropOnBoard { pointer, board_origin })
}
