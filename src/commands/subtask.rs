//! Subtask Commands

use serde::Serialize;

use super::{call_unit, Wrapped};
use crate::models::{BoardId, CardId, Subtask, SubtaskId, SubtaskUpdate};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSubtaskArgs<'a> {
    id: &'a str,
    board_id: &'a str,
    card_id: &'a str,
    title: &'a str,
    position: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteSubtaskArgs<'a> {
    id: &'a str,
    board_id: &'a str,
    card_id: &'a str,
}

pub async fn create_subtask(subtask: &Subtask) -> Result<(), String> {
    let args = CreateSubtaskArgs {
        id: subtask.id.as_str(),
        board_id: subtask.board_id.as_str(),
        card_id: subtask.card_id.as_str(),
        title: &subtask.title,
        position: subtask.position,
    };
    call_unit("create_subtask", &Wrapped { args: &args }).await
}

pub async fn update_subtask(update: &SubtaskUpdate) -> Result<(), String> {
    call_unit("update_subtask", &Wrapped { args: update }).await
}

pub async fn delete_subtask(board_id: &BoardId, card_id: &CardId, subtask_id: &SubtaskId) -> Result<(), String> {
    let args = DeleteSubtaskArgs {
        id: subtask_id.as_str(),
        board_id: board_id.as_str(),
        card_id: card_id.as_str(),
    };
    call_unit("delete_subtask", &Wrapped { args: &args }).await
}
