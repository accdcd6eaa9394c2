//! In-memory persistence for tests.
//!
//! Holds an authoritative board behind its own [`BoardStore`], so moves are
//! applied with the same remove/clamp/insert/renumber rules the real
//! backend uses. Every call is recorded; `fail_next` makes the next call
//! return a persistence error without touching the authoritative board.
//! `hold_next_load` parks the next card fetch after it has read the board,
//! until `release_load`.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::commands::BoardCommands;
use crate::domain::{
    Board, BoardId, Card, CardId, CardUpdate, Column, ColumnId, ColumnUpdate, Subtask, SubtaskId, SubtaskUpdate, Tag,
    TagId, TagUpdate,
};
use crate::error::{BoardError, Result};
use crate::planner::MoveRequest;
use crate::snapshot::BoardSnapshot;
use crate::store::BoardStore;

pub struct FakeCommands {
    server: RefCell<BoardStore>,
    boards: RefCell<Vec<Board>>,
    calls: RefCell<Vec<String>>,
    failures: Cell<usize>,
    held: Cell<bool>,
    gate: Notify,
}

impl FakeCommands {
    pub fn new(snapshot: BoardSnapshot) -> Self {
        Self {
            server: RefCell::new(BoardStore::new(snapshot)),
            boards: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            failures: Cell::new(0),
            held: Cell::new(false),
            gate: Notify::new(),
        }
    }

    pub fn fail_next(&self) {
        self.failures.set(self.failures.get() + 1);
    }

    pub fn hold_next_load(&self) {
        self.held.set(true);
    }

    pub fn release_load(&self) {
        self.gate.notify_one();
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn server_snapshot(&self) -> Arc<BoardSnapshot> {
        self.server.borrow().snapshot()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call);
        let failures = self.failures.get();
        if failures > 0 {
            self.failures.set(failures - 1);
            return Err(BoardError::Persistence("injected failure".into()));
        }
        Ok(())
    }

    fn on_server<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut BoardStore) -> Result<Arc<BoardSnapshot>>,
    {
        change(&mut self.server.borrow_mut())
            .map(|_| ())
            .map_err(|err| BoardError::Persistence(err.to_string()))
    }

    fn apply_move(&self, request: MoveRequest) -> Result<()> {
        let mut server = self.server.borrow_mut();
        let plan = server
            .plan(&request)
            .map_err(|err| BoardError::Persistence(err.to_string()))?;
        if let Some(plan) = plan {
            server
                .apply(&plan)
                .map_err(|err| BoardError::Persistence(err.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl BoardCommands for FakeCommands {
    async fn load_boards(&self) -> Result<Vec<Board>> {
        self.record("load_boards".into())?;
        Ok(self.boards.borrow().clone())
    }

    async fn create_board(&self, board: &Board) -> Result<()> {
        self.record(format!("create_board {}", board.id))?;
        self.boards.borrow_mut().push(board.clone());
        Ok(())
    }

    async fn rename_board(&self, board_id: &BoardId, title: &str) -> Result<()> {
        self.record(format!("rename_board {board_id}"))?;
        let mut boards = self.boards.borrow_mut();
        let board = boards
            .iter_mut()
            .find(|b| &b.id == board_id)
            .ok_or_else(|| BoardError::Persistence(format!("no board {board_id}")))?;
        board.title = title.to_string();
        Ok(())
    }

    async fn delete_board(&self, board_id: &BoardId) -> Result<()> {
        self.record(format!("delete_board {board_id}"))?;
        self.boards.borrow_mut().retain(|b| &b.id != board_id);
        Ok(())
    }

    async fn load_columns(&self, board_id: &BoardId) -> Result<Vec<Column>> {
        self.record(format!("load_columns {board_id}"))?;
        Ok(self.server_snapshot().columns().to_vec())
    }

    async fn load_cards(&self, board_id: &BoardId) -> Result<Vec<Card>> {
        self.record(format!("load_cards {board_id}"))?;
        let cards = self.server_snapshot().all_cards().cloned().collect();
        if self.held.replace(false) {
            self.gate.notified().await;
        }
        Ok(cards)
    }

    async fn load_tags(&self, board_id: &BoardId) -> Result<Vec<Tag>> {
        self.record(format!("load_tags {board_id}"))?;
        Ok(self.server_snapshot().tags().to_vec())
    }

    async fn create_column(&self, column: &Column) -> Result<()> {
        self.record(format!("create_column {}", column.id))?;
        self.on_server(|server| server.append_column(column.clone()))
    }

    async fn create_card(&self, card: &Card) -> Result<()> {
        self.record(format!("create_card {}", card.id))?;
        self.on_server(|server| server.append_card(card.clone()))
    }

    async fn move_column(&self, board_id: &BoardId, column_id: &ColumnId, target_index: i64) -> Result<()> {
        self.record(format!("move_column {board_id} {column_id} @{target_index}"))?;
        self.apply_move(MoveRequest::column(column_id.clone(), target_index))
    }

    async fn move_card(
        &self,
        board_id: &BoardId,
        card_id: &CardId,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        target_index: i64,
    ) -> Result<()> {
        self.record(format!(
            "move_card {board_id} {card_id} {from_column_id}->{to_column_id} @{target_index}"
        ))?;
        self.apply_move(MoveRequest::card(card_id.clone(), to_column_id.clone(), target_index))
    }

    async fn update_column(&self, update: &ColumnUpdate) -> Result<()> {
        self.record(format!("update_column {}", update.id))?;
        self.on_server(|server| server.update_column(update))
    }

    async fn update_card(&self, update: &CardUpdate) -> Result<()> {
        self.record(format!("update_card {}", update.id))?;
        self.on_server(|server| server.update_card(update))
    }

    async fn delete_column(&self, _board_id: &BoardId, column_id: &ColumnId) -> Result<()> {
        self.record(format!("delete_column {column_id}"))?;
        if !self.server_snapshot().cards_in(column_id).is_empty() {
            return Err(BoardError::Persistence(format!("column {column_id} is not empty")));
        }
        self.on_server(|server| server.remove_column(column_id))
    }

    async fn delete_card(&self, _board_id: &BoardId, card_id: &CardId) -> Result<()> {
        self.record(format!("delete_card {card_id}"))?;
        self.on_server(|server| server.remove_card(card_id))
    }

    async fn create_tag(&self, tag: &Tag) -> Result<()> {
        self.record(format!("create_tag {}", tag.id))?;
        self.on_server(|server| server.add_tag(tag.clone()))
    }

    async fn create_subtask(&self, subtask: &Subtask) -> Result<()> {
        self.record(format!("create_subtask {}", subtask.id))?;
        self.on_server(|server| server.append_subtask(subtask.clone()))
    }

    async fn update_subtask(&self, update: &SubtaskUpdate) -> Result<()> {
        self.record(format!("update_subtask {}", update.id))?;
        self.on_server(|server| server.update_subtask(update))
    }

    async fn delete_subtask(&self, _board_id: &BoardId, card_id: &CardId, subtask_id: &SubtaskId) -> Result<()> {
        self.record(format!("delete_subtask {subtask_id}"))?;
        self.on_server(|server| server.remove_subtask(card_id, subtask_id))
    }

    async fn update_tag(&self, update: &TagUpdate) -> Result<()> {
        self.record(format!("update_tag {}", update.id))?;
        self.on_server(|server| server.update_tag(update))
    }

    async fn delete_tag(&self, _board_id: &BoardId, tag_id: &TagId) -> Result<()> {
        self.record(format!("delete_tag {tag_id}"))?;
        self.on_server(|server| server.remove_tag(tag_id))
    }

    async fn set_card_tags(&self, _board_id: &BoardId, card_id: &CardId, tag_ids: &[TagId]) -> Result<()> {
        self.record(format!("set_card_tags {card_id}"))?;
        self.on_server(|server| server.set_card_tags(card_id, tag_ids))
    }
}
