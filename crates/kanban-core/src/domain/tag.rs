//! Tag Entity
//!
//! Board-scoped labels, many-to-many with cards.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::ids::{BoardId, TagId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub board_id: BoardId,
    pub label: String,
    /// Color (hex, e.g., "#FF5733")
    #[serde(default)]
    pub color: Option<String>,
}

impl Entity for Tag {
    type Id = TagId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTag {
    pub label: String,
    pub color: Option<String>,
}

/// Partial tag update. `Some(None)` clears the color.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagUpdate {
    pub id: TagId,
    pub board_id: BoardId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Option<String>>,
}

impl TagUpdate {
    pub fn new(board_id: BoardId, id: TagId) -> Self {
        Self {
            id,
            board_id,
            label: None,
            color: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.color.is_none()
    }

    pub fn apply_to(&self, tag: &mut Tag) {
        if let Some(label) = &self.label {
            tag.label = label.clone();
        }
        if let Some(color) = &self.color {
            tag.color = color.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_clears_color() {
        let mut tag = Tag {
            id: TagId::new("t1"),
            board_id: BoardId::new("b1"),
            label: "bug".into(),
            color: Some("#FF0000".into()),
        };
        let mut update = TagUpdate::new(BoardId::new("b1"), TagId::new("t1"));
        update.color = Some(None);
        update.apply_to(&mut tag);
        assert_eq!(tag.color, None);
        assert_eq!(tag.label, "bug");

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["color"], serde_json::Value::Null);
        assert!(json.get("label").is_none());
    }
}
