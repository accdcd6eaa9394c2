//! Persistence boundary
//!
//! The durable store is reached through an opaque command call. The engine
//! only knows this trait; the frontend implements it over Tauri `invoke`,
//! tests implement it in memory.

use async_trait::async_trait;

use crate::domain::{
    Board, BoardId, Card, CardId, CardUpdate, Column, ColumnId, ColumnUpdate, Subtask, SubtaskId, SubtaskUpdate, Tag,
    TagId, TagUpdate,
};
use crate::error::Result;

#[async_trait(?Send)]
pub trait BoardCommands {
    async fn load_boards(&self) -> Result<Vec<Board>>;
    async fn create_board(&self, board: &Board) -> Result<()>;
    async fn rename_board(&self, board_id: &BoardId, title: &str) -> Result<()>;
    async fn delete_board(&self, board_id: &BoardId) -> Result<()>;

    async fn load_columns(&self, board_id: &BoardId) -> Result<Vec<Column>>;
    async fn load_cards(&self, board_id: &BoardId) -> Result<Vec<Card>>;
    async fn load_tags(&self, board_id: &BoardId) -> Result<Vec<Tag>>;

    /// `column.position` is the board's current column count.
    async fn create_column(&self, column: &Column) -> Result<()>;
    /// `card.position` is the column's current card count.
    async fn create_card(&self, card: &Card) -> Result<()>;

    async fn move_column(&self, board_id: &BoardId, column_id: &ColumnId, target_index: i64) -> Result<()>;
    async fn move_card(
        &self,
        board_id: &BoardId,
        card_id: &CardId,
        from_column_id: &ColumnId,
        to_column_id: &ColumnId,
        target_index: i64,
    ) -> Result<()>;

    async fn update_column(&self, update: &ColumnUpdate) -> Result<()>;
    async fn update_card(&self, update: &CardUpdate) -> Result<()>;
    async fn delete_column(&self, board_id: &BoardId, column_id: &ColumnId) -> Result<()>;
    async fn delete_card(&self, board_id: &BoardId, card_id: &CardId) -> Result<()>;

    /// `subtask.position` is the card's current subtask count.
    async fn create_subtask(&self, subtask: &Subtask) -> Result<()>;
    async fn update_subtask(&self, update: &SubtaskUpdate) -> Result<()>;
    async fn delete_subtask(&self, board_id: &BoardId, card_id: &CardId, subtask_id: &SubtaskId) -> Result<()>;

    async fn create_tag(&self, tag: &Tag) -> Result<()>;
    async fn update_tag(&self, update: &TagUpdate) -> Result<()>;
    async fn delete_tag(&self, board_id: &BoardId, tag_id: &TagId) -> Result<()>;
    async fn set_card_tags(&self, board_id: &BoardId, card_id: &CardId, tag_ids: &[TagId]) -> Result<()>;
}
