//! Shared fakes for unit tests: an in-memory whiteboard service and a
//! recording render port.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::net::api::WhiteboardApi;
use crate::net::error::ApiError;
use crate::net::types::{Board, DEFAULT_NOTE_COLOR, NewBoard, NewNote, Note, NotePatch, RecordId};
use crate::view::editor::NoteEditor;
use crate::view::render::RenderPort;

// =============================================================================
// FIXTURES
// =============================================================================

pub fn board(id: i64, name: &str) -> Board {
    Board { id: RecordId::from_number(id), name: name.to_owned(), description: None, is_public: false }
}

pub fn note(id: i64, board: i64, content: &str) -> Note {
    Note {
        id: RecordId::from_number(id),
        content: content.to_owned(),
        x_position: 10,
        y_position: 20,
        color: DEFAULT_NOTE_COLOR.to_owned(),
        board_id: Some(RecordId::from_number(board)),
    }
}

pub fn id(value: i64) -> RecordId {
    RecordId::from_number(value)
}

// =============================================================================
// FAKE API
// =============================================================================

/// API operations a test can make fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    ListBoards,
    CreateBoard,
    ListNotes,
    CreateNote,
    UpdateNote,
    DeleteNote,
}

#[derive(Debug, Default)]
pub struct FakeApiState {
    pub boards: Vec<Board>,
    pub notes: Vec<Note>,
    pub next_id: i64,
    /// Ops answering `500 boom`.
    pub failing: HashSet<Op>,
    /// Every op answers `NotAuthenticated`.
    pub unauthenticated: bool,
    /// Every op answers `401 Invalid token`.
    pub token_rejected: bool,
    /// Updates succeed with an empty body.
    pub update_returns_empty: bool,
    pub calls: Vec<Op>,
    pub patches: Vec<(RecordId, NotePatch)>,
    pub created_boards: Vec<NewBoard>,
    pub created_notes: Vec<NewNote>,
    pub deleted: Vec<RecordId>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeApiState>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { state: Mutex::new(FakeApiState { next_id: 100, ..FakeApiState::default() }) })
    }

    pub fn with(boards: Vec<Board>, notes: Vec<Note>) -> Arc<Self> {
        let api = Self::new();
        {
            let mut state = api.state();
            state.boards = boards;
            state.notes = notes;
        }
        api
    }

    pub fn state(&self) -> MutexGuard<'_, FakeApiState> {
        self.state.lock().unwrap()
    }

    pub fn fail(&self, op: Op) {
        self.state().failing.insert(op);
    }

    pub fn heal(&self, op: Op) {
        self.state().failing.remove(&op);
    }

    pub fn count(&self, op: Op) -> usize {
        self.state().calls.iter().filter(|c| **c == op).count()
    }

    /// Replace a stored note as if another session edited it.
    pub fn put_note(&self, note: Note) {
        let mut state = self.state();
        state.notes.retain(|n| n.id != note.id);
        state.notes.push(note);
    }

    pub fn remove_note(&self, id: &RecordId) {
        self.state().notes.retain(|n| &n.id != id);
    }

    fn enter(&self, op: Op) -> Result<MutexGuard<'_, FakeApiState>, ApiError> {
        let mut state = self.state();
        state.calls.push(op);
        if state.unauthenticated {
            return Err(ApiError::NotAuthenticated);
        }
        if state.token_rejected {
            return Err(ApiError::Status { status: 401, message: Some("Invalid token".into()) });
        }
        if state.failing.contains(&op) {
            return Err(ApiError::Status { status: 500, message: Some("boom".into()) });
        }
        Ok(state)
    }
}

#[async_trait::async_trait]
impl WhiteboardApi for FakeApi {
    async fn list_boards(&self) -> Result<Vec<Board>, ApiError> {
        Ok(self.enter(Op::ListBoards)?.boards.clone())
    }

    async fn create_board(&self, board: &NewBoard) -> Result<Board, ApiError> {
        let mut state = self.enter(Op::CreateBoard)?;
        state.next_id += 1;
        let created = Board {
            id: RecordId::from_number(state.next_id),
            name: board.name.clone(),
            description: Some(board.description.clone()),
            is_public: board.is_public,
        };
        state.created_boards.push(board.clone());
        state.boards.push(created.clone());
        Ok(created)
    }

    async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        Ok(self.enter(Op::ListNotes)?.notes.clone())
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note, ApiError> {
        let mut state = self.enter(Op::CreateNote)?;
        state.next_id += 1;
        let created = Note {
            id: RecordId::from_number(state.next_id),
            content: note.content.clone(),
            x_position: note.x_position,
            y_position: note.y_position,
            color: note.color.clone(),
            board_id: Some(note.board_id.clone()),
        };
        state.created_notes.push(note.clone());
        state.notes.push(created.clone());
        Ok(created)
    }

    async fn update_note(&self, id: &RecordId, patch: &NotePatch) -> Result<Option<Note>, ApiError> {
        let mut state = self.enter(Op::UpdateNote)?;
        state.patches.push((id.clone(), patch.clone()));
        let empty = state.update_returns_empty;
        let Some(stored) = state.notes.iter_mut().find(|n| &n.id == id) else {
            return Err(ApiError::Status { status: 404, message: Some("Post-it not found".into()) });
        };
        match patch {
            NotePatch::Content { content, color } => {
                stored.content.clone_from(content);
                stored.color.clone_from(color);
            }
            NotePatch::Position { x_position, y_position } => {
                stored.x_position = *x_position;
                stored.y_position = *y_position;
            }
        }
        Ok(if empty { None } else { Some(stored.clone()) })
    }

    async fn delete_note(&self, id: &RecordId) -> Result<(), ApiError> {
        let mut state = self.enter(Op::DeleteNote)?;
        let before = state.notes.len();
        state.notes.retain(|n| &n.id != id);
        if state.notes.len() == before {
            return Err(ApiError::Status { status: 404, message: Some("Post-it not found".into()) });
        }
        state.deleted.push(id.clone());
        Ok(())
    }
}

// =============================================================================
// FAKE RENDER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    Clear,
    Draw(RecordId),
    Remove(RecordId),
    Move(RecordId, i64, i64),
    Boards(Vec<RecordId>, Option<RecordId>),
    OpenEditor,
    CloseEditor,
    Alert(String),
    RedirectLogin,
}

/// Render port that records every call and keeps the drawn elements.
#[derive(Debug, Default)]
pub struct FakeRender {
    pub events: Vec<RenderEvent>,
    pub elements: BTreeMap<RecordId, Note>,
    /// Reported background per id; defaults to the element's stored color.
    pub backgrounds: HashMap<RecordId, String>,
    pub editor: Option<NoteEditor>,
    pub alerts: Vec<String>,
    pub redirected: bool,
}

impl FakeRender {
    pub fn element(&self, id: &RecordId) -> Option<&Note> {
        self.elements.get(id)
    }

    pub fn element_ids(&self) -> Vec<RecordId> {
        self.elements.keys().cloned().collect()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl RenderPort for FakeRender {
    fn clear_notes(&mut self) {
        self.elements.clear();
        self.events.push(RenderEvent::Clear);
    }

    fn draw_note(&mut self, note: &Note) {
        self.elements.insert(note.id.clone(), note.clone());
        self.events.push(RenderEvent::Draw(note.id.clone()));
    }

    fn remove_note(&mut self, id: &RecordId) {
        self.elements.remove(id);
        self.events.push(RenderEvent::Remove(id.clone()));
    }

    fn move_note(&mut self, id: &RecordId, x: i64, y: i64) {
        if let Some(el) = self.elements.get_mut(id) {
            el.x_position = x;
            el.y_position = y;
        }
        self.events.push(RenderEvent::Move(id.clone(), x, y));
    }

    fn note_background(&self, id: &RecordId) -> Option<String> {
        self.backgrounds
            .get(id)
            .cloned()
            .or_else(|| self.elements.get(id).map(|n| n.color.clone()))
    }

    fn show_boards(&mut self, boards: &[Board], current: Option<&RecordId>) {
        let ids = boards.iter().map(|b| b.id.clone()).collect();
        self.events.push(RenderEvent::Boards(ids, current.cloned()));
    }

    fn open_editor(&mut self, editor: &NoteEditor) {
        self.editor = Some(editor.clone());
        self.events.push(RenderEvent::OpenEditor);
    }

    fn close_editor(&mut self) {
        self.editor = None;
        self.events.push(RenderEvent::CloseEditor);
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
        self.events.push(RenderEvent::Alert(message.to_owned()));
    }

    fn redirect_to_login(&mut self) {
        self.redirected = true;
        self.events.push(RenderEvent::RedirectLogin);
    }
}
