//! Board Entity
//!
//! Top-level container of columns and cards.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{BoardId, WorkspaceId};

/// Icon used when a board has none
pub const DEFAULT_BOARD_ICON: &str = "Folder";

/// Workspace boards land in when none is chosen
pub const DEFAULT_WORKSPACE_ID: &str = "workspace-default";

pub const ALLOWED_BOARD_ICONS: &[&str] = &[
    "Folder",
    "LayoutDashboard",
    "Layers",
    "Briefcase",
    "ClipboardList",
    "CalendarDays",
    "BarChart3",
    "Target",
    "Users",
    "MessagesSquare",
    "LifeBuoy",
    "Lightbulb",
    "Rocket",
    "Package",
    "Palette",
    "PenTool",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub workspace_id: WorkspaceId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_board_icon")]
    pub icon: String,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

fn default_board_icon() -> String {
    DEFAULT_BOARD_ICON.to_string()
}

impl Entity for Board {
    type Id = BoardId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// User input for a new board, validated before it becomes a [`Board`]
#[derive(Debug, Clone, Default)]
pub struct NewBoard {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub workspace_id: Option<WorkspaceId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_defaults_icon_on_missing_field() {
        let board: Board = serde_json::from_str(
            r#"{"id":"b1","workspaceId":"workspace-default","title":"Roadmap"}"#,
        )
        .unwrap();
        assert_eq!(board.icon, DEFAULT_BOARD_ICON);
        assert_eq!(board.id().as_str(), "b1");
        assert!(board.description.is_none());
    }
}
