//! Card Entity
//!
//! A unit of work, ordered densely within its column.

use serde::{Deserialize, Deserializer, Serialize};

use super::entity::Entity;
use super::ids::{BoardId, CardId, ColumnId, TagId};
use super::subtask::Subtask;
use crate::position::Positioned;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    None,
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::None => "none",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "none" => Some(Priority::None),
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub position: i64,
    #[serde(default)]
    pub priority: Priority,
    /// ISO-8601 date or timestamp, passed through untouched
    #[serde(default)]
    pub due_date: Option<String>,
    /// Loaded card rows carry full tag objects under `tags`
    #[serde(default, alias = "tags", deserialize_with = "tag_refs")]
    pub tag_ids: Vec<TagId>,
    /// In position order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,
}

fn tag_refs<'de, D>(deserializer: D) -> Result<Vec<TagId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TagRef {
        Id(TagId),
        Tag { id: TagId },
    }

    let refs = Option::<Vec<TagRef>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(refs
        .into_iter()
        .map(|r| match r {
            TagRef::Id(id) | TagRef::Tag { id } => id,
        })
        .collect())
}

impl Card {
    pub fn has_tag(&self, tag_id: &TagId) -> bool {
        self.tag_ids.contains(tag_id)
    }
}

impl Entity for Card {
    type Id = CardId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Positioned for Card {
    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

/// User input for a new card
#[derive(Debug, Clone)]
pub struct NewCard {
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<String>,
    pub tag_ids: Vec<TagId>,
}

impl NewCard {
    pub fn new(column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            column_id,
            title: title.into(),
            description: None,
            priority: Priority::default(),
            due_date: None,
            tag_ids: Vec::new(),
        }
    }
}

/// Partial card update. `Some(None)` clears an optional field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardUpdate {
    pub id: CardId,
    pub board_id: BoardId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
}

impl CardUpdate {
    pub fn new(board_id: BoardId, id: CardId) -> Self {
        Self {
            id,
            board_id,
            title: None,
            description: None,
            priority: None,
            due_date: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }

    /// Copy the present fields onto `card`. Column and position are never touched.
    pub fn apply_to(&self, card: &mut Card) {
        if let Some(title) = &self.title {
            card.title = title.clone();
        }
        if let Some(description) = &self.description {
            card.description = description.clone();
        }
        if let Some(priority) = self.priority {
            card.priority = priority;
        }
        if let Some(due_date) = &self.due_date {
            card.due_date = due_date.clone();
        }
    }
}
