//! Column Commands

use serde::Serialize;

use super::{call, call_unit, BoardIdArgs, EntityArgs, Wrapped};
use crate::models::{BoardId, Column, ColumnId, ColumnUpdate};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveColumnArgs<'a> {
    board_id: &'a str,
    column_id: &'a str,
    target_index: i64,
}

pub async fn load_columns(board_id: &BoardId) -> Result<Vec<Column>, String> {
    call("load_columns", &BoardIdArgs { board_id: board_id.as_str() }).await
}

/// Sent flat: `id`, `boardId`, `title`, `position`, ...
pub async fn create_column(column: &Column) -> Result<(), String> {
    call_unit("create_column", column).await
}

pub async fn move_column(board_id: &BoardId, column_id: &ColumnId, target_index: i64) -> Result<(), String> {
    let args = MoveColumnArgs {
        board_id: board_id.as_str(),
        column_id: column_id.as_str(),
        target_index,
    };
    call_unit("move_column", &args).await
}

pub async fn update_column(update: &ColumnUpdate) -> Result<(), String> {
    call_unit("update_column", &Wrapped { args: update }).await
}

pub async fn delete_column(board_id: &BoardId, column_id: &ColumnId) -> Result<(), String> {
    let args = EntityArgs {
        id: column_id.as_str(),
        board_id: board_id.as_str(),
    };
    call_unit("delete_column", &args).await
}
