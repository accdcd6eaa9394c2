//! Kanban Core
//!
//! Ordering and move reconciliation for kanban boards. Columns are ordered
//! within a board and cards within a column by dense integer positions.
//! Moves are planned against the latest cached snapshot, applied
//! optimistically, persisted through [`BoardCommands`], and rolled back
//! if persistence rejects them.
//!
//! Nothing here touches the DOM; the frontend drives it from drag events.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod drop;
pub mod error;
pub mod planner;
pub mod position;
pub mod snapshot;
pub mod store;
pub mod validation;

#[cfg(test)]
mod fake;

pub use catalog::BoardCatalog;
pub use commands::BoardCommands;
pub use config::Limits;
pub use dispatcher::{MoveOutcome, MutationDispatcher, PendingMove};
pub use drop::{resolve_drop, DragItem};
pub use error::{BoardError, Result};
pub use planner::{plan_move, MovePlan, MoveRequest};
pub use snapshot::{BoardSnapshot, BoardView, ColumnView};
pub use store::BoardStore;
