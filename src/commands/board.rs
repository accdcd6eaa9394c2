//! Board Commands

use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::{call_unit, invoke, js_error, Wrapped};
use crate::models::{Board, BoardId};

#[derive(Serialize)]
struct RenameBoardArgs<'a> {
    id: &'a str,
    title: &'a str,
}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

pub async fn load_boards() -> Result<Vec<Board>, String> {
    let result = invoke("load_boards", JsValue::NULL).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn create_board(board: &Board) -> Result<(), String> {
    call_unit("create_board", &Wrapped { args: board }).await
}

pub async fn rename_board(id: &BoardId, title: &str) -> Result<(), String> {
    call_unit("rename_board", &RenameBoardArgs { id: id.as_str(), title }).await
}

/// Cascades to the board's columns, cards and tags.
pub async fn delete_board(id: &BoardId) -> Result<(), String> {
    call_unit("delete_board", &IdArgs { id: id.as_str() }).await
}
