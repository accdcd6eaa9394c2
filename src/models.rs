//! Frontend Models
//!
//! Entities come from the engine; notices are frontend-only.

pub use kanban_core::domain::{
    Board, BoardId, Card, CardId, CardUpdate, Column, ColumnId, ColumnUpdate, NewBoard, NewCard, NewColumn,
    NewSubtask, NewTag, Priority, Subtask, SubtaskId, SubtaskUpdate, Tag, TagId, TagUpdate,
};
pub use kanban_core::{BoardView, ColumnView, DragItem};

/// How long a notice stays on screen
pub const NOTICE_TIMEOUT_MS: u32 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient message shown in the toast area
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}
