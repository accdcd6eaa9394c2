//! Domain Layer
//!
//! Boards, columns, cards, subtasks and tags as the client sees them.
//! This layer has NO external dependencies (except serde and uuid).

mod board;
mod card;
mod column;
mod entity;
mod ids;
mod subtask;
mod tag;

pub use board::{Board, NewBoard, ALLOWED_BOARD_ICONS, DEFAULT_BOARD_ICON, DEFAULT_WORKSPACE_ID};
pub use card::{Card, CardUpdate, NewCard, Priority};
pub use column::{Column, ColumnUpdate, NewColumn, ALLOWED_COLUMN_ICONS, DEFAULT_COLUMN_ICON};
pub use entity::{find_by_id, index_of, Entity};
pub use ids::{BoardId, CardId, ColumnId, SubtaskId, TagId, WorkspaceId};
pub use subtask::{NewSubtask, Subtask, SubtaskUpdate};
pub use tag::{NewTag, Tag, TagUpdate};
