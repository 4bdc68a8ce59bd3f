//! Board view controller: one dispatcher for gestures and sync ticks.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller owns the local projection of the current board and is the
//! only writer of it. Commands are applied one at a time, so at most one
//! controller operation is in flight; sync ticks interleave with gestures on
//! the same queue.
//!
//! ERROR HANDLING
//! ==============
//! Gesture failures are shown through `RenderPort::alert`, including a
//! credential the server rejects. Only a missing credential sends the user
//! to login and ends the view. Background work (start-up loading, sync
//! refresh) only logs.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::editor::{EditorTarget, NoteEditor};
use super::gesture::{Point, drop_position, wire_coordinate};
use super::render::RenderPort;
use crate::board::directory::BoardDirectory;
use crate::board::notes::{NoteStore, scatter_position};
use crate::net::api::WhiteboardApi;
use crate::net::error::ApiError;
use crate::net::types::{Board, NewNote, Note, RecordId};
use crate::session::SessionStore;
use crate::sync::{ReconcileMode, RenderOp, plan};

// =============================================================================
// COMMANDS
// =============================================================================

/// A user gesture or a sync tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Open the editor for a new note pre-filled with `content`.
    BeginCreate { content: String },
    /// Open the editor for an existing note (double-click).
    OpenEditor { note_id: RecordId },
    EditorContent { content: String },
    EditorColor { color: String },
    SubmitEditor,
    CancelEditor,
    DragStart { note_id: RecordId },
    /// Drop the dragged note over the board surface.
    DropOnBoard { pointer: Point, board_origin: Point },
    /// Drop the dragged note over the trash target.
    DropOnTrash,
    SwitchBoard { board_id: RecordId },
    CreateBoard { name: String, description: String, is_public: bool },
    ListBoards,
    /// Re-fetch notes for the current board and reconcile.
    Refresh,
    Logout,
    Close,
}

/// Whether the dispatcher keeps consuming commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

// =============================================================================
// STATE
// =============================================================================

/// Local projection of the current board.
#[derive(Clone, Debug, Default)]
pub struct BoardState {
    /// Board whose notes are shown. `None` until resolved or selected.
    pub current_board_id: Option<RecordId>,
    /// Note picked up by an in-progress drag.
    pub dragged_note_id: Option<RecordId>,
    /// Open note editor, if any.
    pub editor: Option<NoteEditor>,
    /// Boards as last listed, in server order.
    pub boards: Vec<Board>,
    /// Notes currently rendered, keyed by id.
    pub notes: HashMap<RecordId, Note>,
}

// =============================================================================
// VIEW
// =============================================================================

pub struct BoardView<R: RenderPort> {
    state: BoardState,
    directory: BoardDirectory,
    notes: NoteStore,
    session: Arc<dyn SessionStore>,
    render: R,
    reconcile: ReconcileMode,
}

impl<R: RenderPort> BoardView<R> {
    pub fn new(api: Arc<dyn WhiteboardApi>, session: Arc<dyn SessionStore>, render: R, reconcile: ReconcileMode) -> Self {
        Self {
            state: BoardState::default(),
            directory: BoardDirectory::new(api.clone()),
            notes: NoteStore::new(api),
            session,
            render,
            reconcile,
        }
    }

    #[must_use]
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    #[must_use]
    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }

    pub fn into_render(self) -> R {
        self.render
    }

    /// Check the session, resolve the current board, and draw its notes.
    ///
    /// Returns `Flow::Exit` after redirecting when no credential is stored.
    pub async fn start(&mut self) -> Flow {
        if !self.has_session() {
            info!("no stored credential; redirecting to login");
            self.render.redirect_to_login();
            return Flow::Exit;
        }

        self.state.current_board_id = self.directory.resolve_current().await;
        self.reload_boards().await;

        let Some(board_id) = self.state.current_board_id.clone() else {
            warn!("no current board; note commands are inactive");
            return Flow::Continue;
        };
        match self.notes.list(&board_id).await {
            Ok(fetched) => self.apply(ReconcileMode::Replace, &fetched),
            Err(e) => warn!(error = %e, %board_id, "initial note load failed"),
        }
        Flow::Continue
    }

    /// Consume commands until the channel closes or a command ends the view.
    pub async fn run(&mut self, commands: &mut mpsc::Receiver<Command>) {
        while let Some(command) = commands.recv().await {
            if self.dispatch(command).await == Flow::Exit {
                break;
            }
        }
        info!("board view closed");
    }

    /// Apply one command.
    pub async fn dispatch(&mut self, command: Command) -> Flow {
        debug!(?command, "dispatch");
        match command {
            Command::BeginCreate { content } => {
                self.begin_create(&content);
                Flow::Continue
            }
            Command::OpenEditor { note_id } => {
                self.open_editor(&note_id);
                Flow::Continue
            }
            Command::EditorContent { content } => {
                if let Some(editor) = self.state.editor.as_mut() {
                    editor.set_content(&content);
                    self.render.open_editor(editor);
                }
                Flow::Continue
            }
            Command::EditorColor { color } => {
                self.select_color(&color);
                Flow::Continue
            }
            Command::SubmitEditor => self.submit_editor().await,
            Command::CancelEditor => {
                if self.state.editor.take().is_some() {
                    self.render.close_editor();
                }
                Flow::Continue
            }
            Command::DragStart { note_id } => {
                if self.state.notes.contains_key(&note_id) {
                    self.state.dragged_note_id = Some(note_id);
                }
                Flow::Continue
            }
            Command::DropOnBoard { pointer, board_origin } => self.drop_on_board(pointer, board_origin).await,
            Command::DropOnTrash => self.drop_on_trash().await,
            Command::SwitchBoard { board_id } => self.switch_board(board_id).await,
            Command::CreateBoard { name, description, is_public } => {
                match self.directory.create(&name, &description, is_public).await {
                    Ok(board_id) => {
                        self.reload_boards().await;
                        self.switch_board(board_id).await
                    }
                    Err(e) => self.fail("create board", &e),
                }
            }
            Command::ListBoards => {
                self.reload_boards().await;
                Flow::Continue
            }
            Command::Refresh => {
                self.refresh().await;
                Flow::Continue
            }
            Command::Logout => {
                if let Err(e) = self.session.clear() {
                    warn!(error = %e, "session clear failed");
                }
                info!("logged out");
                self.render.redirect_to_login();
                Flow::Exit
            }
            Command::Close => Flow::Exit,
        }
    }

    // =========================================================================
    // EDITOR
    // =========================================================================

    fn begin_create(&mut self, content: &str) {
        if content.trim().is_empty() {
            debug!("empty create prompt ignored");
            return;
        }
        let editor = NoteEditor::for_new(content);
        self.render.open_editor(&editor);
        self.state.editor = Some(editor);
    }

    fn open_editor(&mut self, note_id: &RecordId) {
        let Some(note) = self.state.notes.get(note_id) else {
            debug!(%note_id, "edit of unknown note ignored");
            return;
        };
        let background = self.render.note_background(note_id);
        let editor = NoteEditor::for_existing(note, background.as_deref());
        self.render.open_editor(&editor);
        self.state.editor = Some(editor);
    }

    fn select_color(&mut self, color: &str) {
        let Some(editor) = self.state.editor.as_mut() else {
            return;
        };
        if editor.select_color(color) {
            self.render.open_editor(editor);
        } else {
            self.render.alert(&format!("Not a color: {color}"));
        }
    }

    async fn submit_editor(&mut self) -> Flow {
        let Some(editor) = self.state.editor.clone() else {
            return Flow::Continue;
        };
        let Some((content, color)) = editor.submission() else {
            debug!("blank editor submission ignored");
            return Flow::Continue;
        };

        let result = match editor.target {
            EditorTarget::New => self.create_note(content, color).await,
            EditorTarget::Existing(id) => self.update_content(&id, &content, &color).await,
        };
        match result {
            Ok(()) => {
                self.state.editor = None;
                self.render.close_editor();
                Flow::Continue
            }
            Err(e) => self.fail("save note", &e),
        }
    }

    async fn create_note(&mut self, content: String, color: String) -> Result<(), ApiError> {
        let Some(board_id) = self.state.current_board_id.clone() else {
            warn!("note create without a current board ignored");
            return Ok(());
        };
        let (x_position, y_position) = scatter_position(&mut rand::rng());
        let body = NewNote { content, x_position, y_position, color, board_id };

        let note = self.notes.create(&body).await?;
        self.render.draw_note(&note);
        self.state.notes.insert(note.id.clone(), note);
        Ok(())
    }

    async fn update_content(&mut self, id: &RecordId, content: &str, color: &str) -> Result<(), ApiError> {
        let stored = self.notes.update_content(id, content, color).await?;
        let note = match (stored, self.state.notes.get(id)) {
            (Some(note), _) => note,
            (None, Some(local)) => Note { content: content.to_owned(), color: color.to_owned(), ..local.clone() },
            (None, None) => return Ok(()),
        };
        self.render.draw_note(&note);
        self.state.notes.insert(note.id.clone(), note);
        Ok(())
    }

    // =========================================================================
    // DRAG
    // =========================================================================

    async fn drop_on_board(&mut self, pointer: Point, board_origin: Point) -> Flow {
        let Some(id) = self.state.dragged_note_id.take() else {
            return Flow::Continue;
        };
        let at = drop_position(pointer, board_origin);
        let (x, y) = (wire_coordinate(at.x), wire_coordinate(at.y));

        self.render.move_note(&id, x, y);
        if let Some(note) = self.state.notes.get_mut(&id) {
            note.x_position = x;
            note.y_position = y;
        }

        match self.notes.update_position(&id, at.x, at.y).await {
            Ok(_) => {
                debug!(note_id = %id, x, y, "note moved");
                Flow::Continue
            }
            Err(e) => self.fail("move note", &e),
        }
    }

    async fn drop_on_trash(&mut self) -> Flow {
        let Some(id) = self.state.dragged_note_id.take() else {
            return Flow::Continue;
        };
        match self.notes.delete(&id).await {
            Ok(()) => {
                self.state.notes.remove(&id);
                self.render.remove_note(&id);
                Flow::Continue
            }
            Err(e) => self.fail("delete note", &e),
        }
    }

    // =========================================================================
    // BOARDS & SYNC
    // =========================================================================

    async fn switch_board(&mut self, board_id: RecordId) -> Flow {
        info!(%board_id, "switching board");
        self.state.current_board_id = Some(board_id.clone());
        self.state.dragged_note_id = None;
        self.state.notes.clear();
        self.render.clear_notes();
        self.render
            .show_boards(&self.state.boards, self.state.current_board_id.as_ref());

        match self.notes.list(&board_id).await {
            Ok(fetched) => {
                self.apply(ReconcileMode::Replace, &fetched);
                Flow::Continue
            }
            Err(e) => self.fail("load notes", &e),
        }
    }

    async fn reload_boards(&mut self) {
        self.state.boards = self.directory.list().await;
        self.render
            .show_boards(&self.state.boards, self.state.current_board_id.as_ref());
    }

    async fn refresh(&mut self) {
        let Some(board_id) = self.state.current_board_id.clone() else {
            return;
        };
        match self.notes.list(&board_id).await {
            Ok(fetched) => self.apply(self.reconcile, &fetched),
            Err(e) => warn!(error = %e, %board_id, "sync refresh failed"),
        }
    }

    fn apply(&mut self, mode: ReconcileMode, fetched: &[Note]) {
        for op in plan(mode, &self.state.notes, fetched) {
            match op {
                RenderOp::Clear => {
                    self.state.notes.clear();
                    self.state.dragged_note_id = None;
                    self.render.clear_notes();
                }
                RenderOp::Draw(note) => {
                    self.release_drag(&note.id);
                    self.render.draw_note(&note);
                    self.state.notes.insert(note.id.clone(), note);
                }
                RenderOp::Remove(id) => {
                    self.release_drag(&id);
                    self.state.notes.remove(&id);
                    self.render.remove_note(&id);
                }
            }
        }
    }

    /// A redrawn or removed element loses any drag in progress.
    fn release_drag(&mut self, id: &RecordId) {
        if self.state.dragged_note_id.as_ref() == Some(id) {
            self.state.dragged_note_id = None;
        }
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn has_session(&self) -> bool {
        match self.session.get() {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "session read failed");
                false
            }
        }
    }

    fn fail(&mut self, action: &str, error: &ApiError) -> Flow {
        if error.is_missing_credential() {
            warn!(action, "no stored credential");
            self.render.redirect_to_login();
            return Flow::Exit;
        }
        warn!(action, error = %error, "gesture failed");
        self.render.alert(&error.user_message());
        Flow::Continue
    }
}
