//! Engine adapter over the Tauri command wrappers.

use async_trait::async_trait;
use kanban_core::{BoardCommands, BoardError, Result};

use crate::models::{
    Board, BoardId, Card, CardId, CardUpdate, Column, ColumnId, ColumnUpdate, Subtask, SubtaskId, SubtaskUpdate, Tag,
    TagId, TagUpdate,
};

/// [`BoardCommands`] backed by `window.__TAURI__.core.invoke`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TauriCommands;

fn persist(result: std::result::Result<(), String>) -> Result<()> {
    result.map_err(BoardError::Persistence)
}

fn load<T>(result: std::result::Result<T, String>) -> Result<T> {
    result.map_err(BoardError::Load)
}

#[async_trait(?Send)]
impl BoardCommands for TauriCommands {
    async fn load_boards(&self) -> Result<Vec<Board>> {
        load(super::load_boards().await)
    }

    async fn create_board(&self, board: &Board) -> Result<()> {
        persist(super::create_board(board).await)
    }

    async fn rename_board(&self, board_id: &BoardId, title: &str) -> Result<()> {
        persist(super::rename_board(board_id, title).await)
    }

    async fn delete_board(&self, board_id: &BoardId) -> Result<()> {
        persist(super::delete_board(board_id).await)
    }

    async fn load_columns(&self, board_id: &BoardId) -> Result<Vec<Column>> {
        load(super::load_columns(board_id).await)
    }

    async fn load_cards(&self, board_id: &BoardId) -> Result<Vec<Card>> {
        load(super::load_cards(board_id).await)
    }

    async fn load_tags(&self, board_id: &BoardId) -> Result<Vec<Tag>> {
        load(super::load_tags(board_id).await)
    }

    async fn create_column(&self, column: &Column) -> Result<()> {
        persist(super::create_column(column).await)
    }

    async fn create_card(&self, card: &Card) -> Result<()> {
        persist(super::create_card(card).await)
    }

    async fn move_column(&self, board_id: &BoardId, column_id: &ColumnId, target_index: i64) -> Result<()> {
        persist(super::move_column(board_id, column_id, target_index).await)
    }

    async fn move_card(
        &self,
        board_id: &BoardId,
        card_id: &CardId,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        target_index: i64,
    ) -> Result<()> {
        persist(super::move_card(board_id, card_id, from_column_id, to_column_id, target_index).await)
    }

    async fn update_column(&self, update: &ColumnUpdate) -> Result<()> {
        persist(super::update_column(update).await)
    }

    async fn update_card(&self, update: &CardUpdate) -> Result<()> {
        persist(super::update_card(update).await)
    }

    async fn delete_column(&self, board_id: &BoardId, column_id: &ColumnId) -> Result<()> {
        persist(super::delete_column(board_id, column_id).await)
    }

    async fn delete_card(&self, board_id: &BoardId, card_id: &CardId) -> Result<()> {
        persist(super::delete_card(board_id, card_id).await)
    }

    async fn create_subtask(&self, subtask: &Subtask) -> Result<()> {
        persist(super::create_subtask(subtask).await)
    }

    async fn update_subtask(&self, update: &SubtaskUpdate) -> Result<()> {
        persist(super::update_subtask(update).await)
    }

    async fn delete_subtask(&self, board_id: &BoardId, card_id: &CardId, subtask_id: &SubtaskId) -> Result<()> {
        persist(super::delete_subtask(board_id, card_id, subtask_id).await)
    }

    async fn create_tag(&self, tag: &Tag) -> Result<()> {
        persist(super::create_tag(tag).await)
    }

    async fn update_tag(&self, update: &TagUpdate) -> Result<()> {
        persist(super::update_tag(update).await)
    }

    async fn delete_tag(&self, board_id: &BoardId, tag_id: &TagId) -> Result<()> {
        persist(super::delete_tag(board_id, tag_id).await)
    }

    async fn set_card_tags(&self, board_id: &BoardId, card_id: &CardId, tag_ids: &[TagId]) -> Result<()> {
        persist(super::set_card_tags(board_id, card_id, tag_ids).await)
    }
}
