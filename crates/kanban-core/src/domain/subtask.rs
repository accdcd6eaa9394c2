//! Subtask Entity
//!
//! Checklist items of a card, ordered densely within the card.

use serde::{Deserialize, Deserializer, Serialize};

use super::entity::Entity;
use super::ids::{BoardId, CardId, SubtaskId};
use crate::position::Positioned;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: SubtaskId,
    pub board_id: BoardId,
    pub card_id: CardId,
    pub title: String,
    #[serde(default, deserialize_with = "flag")]
    pub is_completed: bool,
    pub position: i64,
}

/// Completion arrives as a bool from single-row reads and as `0`/`1` when
/// embedded in a card row.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
    })
}

impl Entity for Subtask {
    type Id = SubtaskId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Positioned for Subtask {
    fn position(&self) -> i64 {
        self.position
    }

    fn set_position(&mut self, position: i64) {
        self.position = position;
    }
}

#[derive(Debug, Clone)]
pub struct NewSubtask {
    pub card_id: CardId,
    pub title: String,
}

impl NewSubtask {
    pub fn new(card_id: CardId, title: impl Into<String>) -> Self {
        Self {
            card_id,
            title: title.into(),
        }
    }
}

/// Partial subtask update. `target_position` reorders within the card and is
/// clamped into range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskUpdate {
    pub id: SubtaskId,
    pub board_id: BoardId,
    pub card_id: CardId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_position: Option<i64>,
}

impl SubtaskUpdate {
    pub fn new(board_id: BoardId, card_id: CardId, id: SubtaskId) -> Self {
        Self {
            id,
            board_id,
            card_id,
            title: None,
            is_completed: None,
            target_position: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.is_completed.is_none() && self.target_position.is_none()
    }

    /// Copy title and completion onto `subtask`; ordering is left to the caller.
    pub fn apply_to(&self, subtask: &mut Subtask) {
        if let Some(title) = &self.title {
            subtask.title = title.clone();
        }
        if let Some(done) = self.is_completed {
            subtask.is_completed = done;
        }
    }
}
