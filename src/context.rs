//! Board Context
//!
//! Shared handle provided via Leptos Context API. Owns the engine for the
//! open board and turns UI intents (drops, form submits, deletes) into
//! dispatcher calls, reporting failures as notices.

use std::future::Future;
use std::rc::Rc;
use std::sync::Arc;

use gloo_timers::future::TimeoutFuture;
use kanban_core::{resolve_drop, BoardCatalog, BoardError, BoardSnapshot, MutationDispatcher};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::{DndContext, DragConfig, DragEnd};

use crate::commands::TauriCommands;
use crate::models::{
    BoardId, CardId, CardUpdate, ColumnId, ColumnUpdate, DragItem, NewBoard, NewCard, NewColumn, NewSubtask, NewTag,
    Notice, NoticeKind, SubtaskId, SubtaskUpdate, TagId, TagUpdate, NOTICE_TIMEOUT_MS,
};
use crate::store::{store_remove_board, store_update_board_title, AppStateStoreFields, AppStore};

type Dispatcher = MutationDispatcher<TauriCommands>;

#[derive(Clone, Copy)]
pub struct BoardContext {
    store: AppStore,
    pub dnd: DndContext<DragItem>,
    dispatcher: StoredValue<Option<Rc<Dispatcher>>, LocalStorage>,
    /// Bumped whenever the open dispatcher is dropped or replaced
    generation: StoredValue<u64>,
    notice_seq: StoredValue<u64>,
}

impl BoardContext {
    pub fn new(store: AppStore) -> Self {
        Self {
            store,
            dnd: DndContext::new(DragConfig::default()),
            dispatcher: StoredValue::new_local(None),
            generation: StoredValue::new(0),
            notice_seq: StoredValue::new(0),
        }
    }

    fn dispatcher(&self) -> Option<Rc<Dispatcher>> {
        self.dispatcher.get_value()
    }

    /// Drop the open dispatcher; late results from it no longer reach the view.
    fn close_dispatcher(&self) -> u64 {
        self.dnd.cancel();
        self.dispatcher.set_value(None);
        self.generation.update_value(|g| *g += 1);
        self.generation.get_value()
    }

    fn catalog() -> BoardCatalog<TauriCommands> {
        BoardCatalog::new(Rc::new(TauriCommands))
    }

    // ========================
    // Notices
    // ========================

    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        self.notice_seq.update_value(|n| *n += 1);
        let id = self.notice_seq.get_value();
        let store = self.store;
        store.notice().set(Some(Notice {
            id,
            kind,
            message: message.into(),
        }));
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            if store.notice().with_untracked(|n| n.as_ref().map(|n| n.id)) == Some(id) {
                store.notice().set(None);
            }
        });
    }

    pub fn dismiss_notice(&self) {
        self.store.notice().set(None);
    }

    fn report(&self, action: &str, err: &BoardError) {
        let message = match err {
            BoardError::Validation(msg) => msg.clone(),
            BoardError::Persistence(msg) => format!("Could not {action}: {msg}. Your change was reverted."),
            other => format!("Could not {action}: {other}"),
        };
        self.notify(NoticeKind::Error, message);
    }

    // ========================
    // Boards
    // ========================

    /// Fetch the board list; opens the first board if none is open.
    pub fn load_boards(&self) {
        let ctx = *self;
        spawn_local(async move {
            match Self::catalog().list().await {
                Ok(boards) => {
                    let first = boards.first().map(|b| b.id.clone());
                    ctx.store.boards().set(boards);
                    if ctx.store.current_board().get_untracked().is_none() {
                        if let Some(board_id) = first {
                            ctx.open_board(board_id);
                        }
                    }
                }
                Err(err) => ctx.report("load boards", &err),
            }
        });
    }

    pub fn open_board(&self, board_id: BoardId) {
        let generation = self.close_dispatcher();
        self.store.current_board().set(Some(board_id.clone()));
        self.store.board().set(None);
        self.store.load_error().set(None);
        self.store.loading().set(true);

        let ctx = *self;
        spawn_local(async move {
            let result = Dispatcher::load(board_id.clone(), Rc::new(TauriCommands)).await;
            // another board (or this one again) may have been opened meanwhile
            if ctx.generation.get_value() != generation {
                return;
            }
            ctx.store.loading().set(false);
            match result {
                Ok(dispatcher) => ctx.install(dispatcher, generation),
                Err(err) => {
                    log::warn!("[ui] board {} failed to load: {}", board_id, err);
                    ctx.store.load_error().set(Some(err.to_string()));
                }
            }
        });
    }

    pub fn retry_load(&self) {
        if let Some(board_id) = self.store.current_board().get_untracked() {
            self.open_board(board_id);
        }
    }

    fn install(&self, dispatcher: Dispatcher, generation: u64) {
        let store = self.store;
        let current = self.generation;
        // a replaced dispatcher may still settle a move and roll back
        let render = while_current(
            move || current.try_get_value(),
            generation,
            move |snapshot: &Arc<BoardSnapshot>| {
                store.board().set(Some(snapshot.view()));
                store.tags().set(snapshot.tags().to_vec());
            },
        );
        render(&dispatcher.snapshot());
        dispatcher.store().borrow_mut().subscribe(render);
        self.dispatcher.set_value(Some(Rc::new(dispatcher)));
    }

    pub fn create_board(&self, title: String) {
        let ctx = *self;
        spawn_local(async move {
            let input = NewBoard {
                title,
                ..Default::default()
            };
            match Self::catalog().create(input).await {
                Ok(board) => {
                    let board_id = board.id.clone();
                    ctx.store.boards().write().push(board);
                    ctx.open_board(board_id);
                }
                Err(err) => ctx.report("create the board", &err),
            }
        });
    }

    pub fn rename_board(&self, board_id: BoardId, title: String) {
        let ctx = *self;
        spawn_local(async move {
            match Self::catalog().rename(&board_id, &title).await {
                Ok(title) => store_update_board_title(&ctx.store, &board_id, title),
                Err(err) => ctx.report("rename the board", &err),
            }
        });
    }

    pub fn delete_board(&self, board_id: BoardId) {
        let ctx = *self;
        spawn_local(async move {
            match Self::catalog().delete(&board_id).await {
                Ok(()) => {
                    if ctx.store.current_board().get_untracked().as_ref() == Some(&board_id) {
                        ctx.close_dispatcher();
                    }
                    store_remove_board(&ctx.store, &board_id);
                }
                Err(err) => ctx.report("delete the board", &err),
            }
        });
    }

    // ========================
    // Drag and drop
    // ========================

    /// Apply a finished drag to the cache right away, persist in the background.
    pub fn handle_drag_end(&self, end: DragEnd<DragItem>) {
        let DragEnd::Dropped { active, over } = end else {
            return;
        };
        let Some(dispatcher) = self.dispatcher() else {
            return;
        };
        let Some(request) = resolve_drop(&dispatcher.snapshot(), &active, &over) else {
            log::debug!("[ui] drop of {:?} over {:?} resolved to nothing", active, over);
            return;
        };
        let pending = match dispatcher.begin_move(&request) {
            Ok(Some(pending)) => pending,
            Ok(None) => return,
            Err(err) => {
                self.report("move that", &err);
                return;
            }
        };
        let ctx = *self;
        spawn_local(async move {
            if let Err(err) = dispatcher.dispatch_move(pending).await {
                ctx.report("save the move", &err);
            }
        });
    }

    // ========================
    // Board edits
    // ========================

    /// Run an engine operation for the open board, reporting failures.
    fn run<F, Fut>(&self, action: &'static str, op: F)
    where
        F: FnOnce(Rc<Dispatcher>) -> Fut + 'static,
        Fut: Future<Output = kanban_core::Result<()>> + 'static,
    {
        let Some(dispatcher) = self.dispatcher() else {
            return;
        };
        let ctx = *self;
        spawn_local(async move {
            if let Err(err) = op(dispatcher).await {
                ctx.report(action, &err);
            }
        });
    }

    pub fn create_column(&self, input: NewColumn) {
        self.run("add the column", |d| async move { d.create_column(input).await.map(|_| ()) });
    }

    pub fn update_column(&self, update: ColumnUpdate) {
        self.run("update the column", |d| async move { d.update_column(update).await });
    }

    pub fn set_column_enabled(&self, column_id: ColumnId, enabled: bool) {
        let Some(board_id) = self.store.current_board().get_untracked() else {
            return;
        };
        let mut update = ColumnUpdate::new(board_id, column_id);
        update.is_enabled = Some(enabled);
        self.update_column(update);
    }

    pub fn delete_column(&self, column_id: ColumnId) {
        self.run("delete the column", |d| async move { d.delete_column(&column_id).await });
    }

    pub fn create_card(&self, input: NewCard) {
        self.run("add the card", |d| async move { d.create_card(input).await.map(|_| ()) });
    }

    pub fn update_card(&self, update: CardUpdate) {
        self.run("update the card", |d| async move { d.update_card(update).await });
    }

    pub fn delete_card(&self, card_id: CardId) {
        self.run("delete the card", |d| async move { d.delete_card(&card_id).await });
    }

    pub fn create_subtask(&self, input: NewSubtask) {
        self.run("add the subtask", |d| async move { d.create_subtask(input).await.map(|_| ()) });
    }

    pub fn update_subtask(&self, update: SubtaskUpdate) {
        self.run("update the subtask", |d| async move { d.update_subtask(update).await });
    }

    pub fn delete_subtask(&self, card_id: CardId, subtask_id: SubtaskId) {
        self.run("delete the subtask", |d| async move { d.delete_subtask(&card_id, &subtask_id).await });
    }

    pub fn create_tag(&self, input: NewTag) {
        self.run("add the tag", |d| async move { d.create_tag(input).await.map(|_| ()) });
    }

    pub fn rename_tag(&self, tag_id: TagId, label: String) {
        let Some(board_id) = self.store.current_board().get_untracked() else {
            return;
        };
        let mut update = TagUpdate::new(board_id, tag_id);
        update.label = Some(label);
        self.run("rename the tag", |d| async move { d.update_tag(update).await });
    }

    pub fn delete_tag(&self, tag_id: TagId) {
        self.run("delete the tag", |d| async move { d.delete_tag(&tag_id).await });
    }

    pub fn set_card_tags(&self, card_id: CardId, tag_ids: Vec<TagId>) {
        self.run("tag the card", |d| async move { d.set_card_tags(&card_id, tag_ids).await });
    }
}

/// Wrap `listener` so it only runs while `current()` still reports `generation`.
fn while_current<T: ?Sized>(
    current: impl Fn() -> Option<u64> + 'static,
    generation: u64,
    listener: impl Fn(&T) + 'static,
) -> impl Fn(&T) + 'static {
    move |value: &T| {
        if current() == Some(generation) {
            listener(value);
        }
    }
}

/// Get the board context
pub fn use_board_context() -> BoardContext {
    expect_context::<BoardContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_reopened_board_ignores_previous_dispatcher() {
        let generation = Rc::new(Cell::new(1u64));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let current = generation.clone();
        let sink = seen.clone();
        let first = while_current(move || Some(current.get()), 1, move |v: &str| sink.borrow_mut().push(v.to_string()));

        // same board opened again: a new generation, a new listener
        generation.set(2);
        let current = generation.clone();
        let sink = seen.clone();
        let second = while_current(move || Some(current.get()), 2, move |v: &str| sink.borrow_mut().push(v.to_string()));

        first("late rollback");
        second("fresh load");
        assert_eq!(*seen.borrow(), vec!["fresh load".to_string()]);
    }

    #[test]
    fn test_disposed_generation_drops_updates() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let listener = while_current(|| None, 3, move |_: &u32| counter.set(counter.get() + 1));
        listener(&7);
        assert_eq!(calls.get(), 0);
    }
}
