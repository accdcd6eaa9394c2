//! Tag Commands

use serde::Serialize;

use super::{call, call_unit, BoardIdArgs, EntityArgs, Wrapped};
use crate::models::{BoardId, CardId, Tag, TagId, TagUpdate};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SetCardTagsArgs<'a> {
    card_id: &'a str,
    board_id: &'a str,
    tag_ids: &'a [TagId],
}

pub async fn load_tags(board_id: &BoardId) -> Result<Vec<Tag>, String> {
    call("load_tags", &BoardIdArgs { board_id: board_id.as_str() }).await
}

pub async fn create_tag(tag: &Tag) -> Result<(), String> {
    call_unit("create_tag", &Wrapped { args: tag }).await
}

pub async fn update_tag(update: &TagUpdate) -> Result<(), String> {
    call_unit("update_tag", &Wrapped { args: update }).await
}

pub async fn delete_tag(board_id: &BoardId, tag_id: &TagId) -> Result<(), String> {
    let args = EntityArgs {
        id: tag_id.as_str(),
        board_id: board_id.as_str(),
    };
    call_unit("delete_tag", &Wrapped { args: &args }).await
}

pub async fn set_card_tags(board_id: &BoardId, card_id: &CardId, tag_ids: &[TagId]) -> Result<(), String> {
    let args = SetCardTagsArgs {
        card_id: card_id.as_str(),
        board_id: board_id.as_str(),
        tag_ids,
    };
    call_unit("set_card_tags", &Wrapped { args: &args }).await
}
