//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain. Wrappers
//! return `Result<T, String>` like the backend does; [`TauriCommands`]
//! lifts them into the engine's error type.

mod board;
mod card;
mod column;
mod subtask;
mod tag;
mod tauri;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// Re-export all public items
pub use board::*;
pub use card::*;
pub use column::*;
pub use subtask::*;
pub use tag::*;
pub use tauri::TauriCommands;

/// Commands taking a single struct parameter expect it under `args`.
#[derive(Serialize)]
struct Wrapped<'a, T: Serialize> {
    args: &'a T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardIdArgs<'a> {
    board_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntityArgs<'a> {
    id: &'a str,
    board_id: &'a str,
}

fn js_error(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

async fn call<A, T>(cmd: &str, args: &A) -> Result<T, String>
where
    A: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    let result = invoke(cmd, js_args).await.map_err(js_error)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Call a command whose result the frontend does not read.
async fn call_unit<A>(cmd: &str, args: &A) -> Result<(), String>
where
    A: Serialize + ?Sized,
{
    let js_args = serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())?;
    invoke(cmd, js_args).await.map_err(js_error)?;
    Ok(())
}
