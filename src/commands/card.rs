//! Card Commands

use serde::Serialize;

use super::{call, call_unit, BoardIdArgs, EntityArgs, Wrapped};
use crate::models::{BoardId, Card, CardId, CardUpdate, ColumnId};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveCardArgs<'a> {
    board_id: &'a str,
    card_id: &'a str,
    from_column_id: &'a str,
    to_column_id: &'a str,
    target_index: i64,
}

pub async fn load_cards(board_id: &BoardId) -> Result<Vec<Card>, String> {
    call("load_cards", &BoardIdArgs { board_id: board_id.as_str() }).await
}

pub async fn create_card(card: &Card) -> Result<(), String> {
    call_unit("create_card", card).await
}

pub async fn move_card(
    board_id: &BoardId,
    card_id: &CardId,
    from_column_id: &ColumnId,
    to_column_id: &ColumnId,
    target_index: i64,
) -> Result<(), String> {
    let args = MoveCardArgs {
        board_id: board_id.as_str(),
        card_id: card_id.as_str(),
        from_column_id: from_column_id.as_str(),
        to_column_id: to_column_id.as_str(),
        target_index,
    };
    call_unit("move_card", &args).await
}

pub async fn update_card(update: &CardUpdate) -> Result<(), String> {
    call_unit("update_card", &Wrapped { args: update }).await
}

pub async fn delete_card(board_id: &BoardId, card_id: &CardId) -> Result<(), String> {
    let args = EntityArgs {
        id: card_id.as_str(),
        board_id: board_id.as_str(),
    };
    call_unit("delete_card", &args).await
}
