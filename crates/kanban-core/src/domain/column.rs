//! Column Entity
//!
//! An ordered stage of a board. Columns share one dense position space per
//! board whether they are enabled or hidden.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{BoardId, ColumnId};
use crate::position::Positioned;

/// Icon used when a column has none
pub const DEFAULT_COLUMN_ICON: &str = "Circle";

pub const ALLOWED_COLUMN_ICONS: &[&str] = &[
    "Circle",
    "Play",
    "CheckCircle",
    "Loader",
    "AlarmClock",
    "Bolt",
    "Sparkles",
    "Target",
    "CalendarCheck",
    "ClipboardList",
    "Lightbulb",
    "Flag",
    "Timer",
    "Ship",
    "Kanban",
    "TrendingUp",
    "Zap",
    "Rocket",
    "BadgeCheck",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub board_id: BoardId,
    pub title: String,
    pub position: i64,
    /// Soft cap on active cards
    #[serde(default)]
    pub wip_limit: Option<i64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    /// Hidden columns keep their cards and their slot in the ordering
    #[serde(default = "default_true")]
    pub is_enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Column {
    pub fn icon_or_default(&self) -> &str {
        self.icon.as_deref().unwrap_or(DEFAULT_COLUMN_ICON)
    }

    /// True when `active_cards` exceeds the column's WIP limit.
    pub fn is_over_wip_limit(&self, active_cards: usize) -> bool {
        match self.wip_limit {
            Some(limit) => active_cards as i64 > limit,
            None => false,
        }
    }
}

impl Entity for Column {
    type Id = ColumnId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Positioned for Column {
    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

/// User input for a new column
#[derive(Debug, Clone, Default)]
pub struct NewColumn {
    pub title: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub wip_limit: Option<i64>,
}

/// Partial column update. `Some(None)` clears an optional field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnUpdate {
    pub id: ColumnId,
    pub board_id: BoardId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip_limit: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
}

impl ColumnUpdate {
    pub fn new(board_id: BoardId, id: ColumnId) -> Self {
        Self {
            id,
            board_id,
            title: None,
            color: None,
            icon: None,
            wip_limit: None,
            is_enabled: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.color.is_none()
            && self.icon.is_none()
            && self.wip_limit.is_none()
            && self.is_enabled.is_none()
    }

    /// Copy the present fields onto `column`. Position is never touched.
    pub fn apply_to(&self, column: &mut Column) {
        if let Some(title) = &self.title {
            column.title = title.clone();
        }
        if let Some(color) = &self.color {
            column.color = color.clone();
        }
        if let Some(icon) = &self.icon {
            column.icon = icon.clone();
        }
        if let Some(wip_limit) = self.wip_limit {
            column.wip_limit = wip_limit;
        }
        if let Some(is_enabled) = self.is_enabled {
            column.is_enabled = is_enabled;
        }
    }
}
