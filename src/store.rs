//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The board
//! itself lives in the engine's `BoardStore`; this store only holds what the
//! view renders, refreshed on every published snapshot.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Board, BoardId, BoardView, Notice, Tag};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Boards shown in the picker
    pub boards: Vec<Board>,
    /// Board currently open, if any
    pub current_board: Option<BoardId>,
    /// Render model of the open board
    pub board: Option<BoardView>,
    /// Tags of the open board
    pub tags: Vec<Tag>,
    /// Set while the open board is being fetched
    pub loading: bool,
    /// Fetch failure for the open board; the view offers a retry
    pub load_error: Option<String>,
    pub notice: Option<Notice>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Update a board in the picker by ID
pub fn store_update_board_title(store: &AppStore, board_id: &BoardId, title: String) {
    if let Some(board) = store.boards().write().iter_mut().find(|b| &b.id == board_id) {
        board.title = title;
    }
}

/// Remove a board from the picker, closing it if it was open
pub fn store_remove_board(store: &AppStore, board_id: &BoardId) {
    store.boards().write().retain(|b| &b.id != board_id);
    if store.current_board().get_untracked().as_ref() == Some(board_id) {
        store.current_board().set(None);
        store.board().set(None);
        store.tags().write().clear();
        store.load_error().set(None);
    }
}

/// Tag lookup for rendering card chips
pub fn store_find_tag(store: &AppStore, tag_id: &crate::models::TagId) -> Option<Tag> {
    store.tags().with(|tags| tags.iter().find(|t| &t.id == tag_id).cloned())
}
