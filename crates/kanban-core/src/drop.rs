//! Drop target resolution
//!
//! The drag layer reports what was picked up and what it was released over
//! as [`DragItem`]s. [`resolve_drop`] turns that pair into a [`MoveRequest`]
//! for the planner, or `None` when the drop should be treated as cancelled.

use serde::{Deserialize, Serialize};

use crate::domain::{CardId, ColumnId};
use crate::planner::MoveRequest;
use crate::snapshot::BoardSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum DragItem {
    Column(ColumnId),
    Card(CardId),
    /// The empty region of a column, meaning "append here"
    ContainerSlot(ColumnId),
}

impl DragItem {
    pub fn is_column(&self) -> bool {
        matches!(self, DragItem::Column(_))
    }

    pub fn is_card(&self) -> bool {
        matches!(self, DragItem::Card(_))
    }

    /// Whether a drag of `self` may land on `candidate`.
    ///
    /// Column drags only see other columns; card drags see cards and
    /// container slots.
    pub fn accepts(&self, candidate: &DragItem) -> bool {
        match self {
            DragItem::Column(_) => candidate.is_column(),
            DragItem::Card(_) => !candidate.is_column(),
            DragItem::ContainerSlot(_) => false,
        }
    }
}

/// Resolve a release of `active` over `over` against the current snapshot.
pub fn resolve_drop(snapshot: &BoardSnapshot, active: &DragItem, over: &DragItem) -> Option<MoveRequest> {
    if active == over {
        return None;
    }

    let request = match active {
        DragItem::Column(column_id) => {
            snapshot.column(column_id)?;
            let target_column = match over {
                DragItem::Column(id) | DragItem::ContainerSlot(id) => id.clone(),
                DragItem::Card(card_id) => snapshot.card(card_id)?.column_id.clone(),
            };
            if &target_column == column_id {
                return None;
            }
            let index = snapshot.column_index(&target_column)?;
            MoveRequest::column(column_id.clone(), index as i64)
        }
        DragItem::Card(card_id) => {
            let (from_column, _) = snapshot.locate_card(card_id)?;
            match over {
                // same column: take the hovered card's slot; other column:
                // land in front of the hovered card
                DragItem::Card(over_id) => {
                    let (to_column, over_index) = snapshot.locate_card(over_id)?;
                    MoveRequest::card(card_id.clone(), to_column.clone(), over_index as i64)
                }
                DragItem::ContainerSlot(to_column) | DragItem::Column(to_column) => {
                    snapshot.column(to_column)?;
                    let mut len = snapshot.cards_in(to_column).len();
                    if from_column == to_column {
                        len -= 1;
                    }
                    MoveRequest::card(card_id.clone(), to_column.clone(), len as i64)
                }
            }
        }
        DragItem::ContainerSlot(_) => return None,
    };

    log::debug!("[drop] {:?} over {:?} -> {:?}", active, over, request);
    Some(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan_move;
    use crate::snapshot::fixtures::*;

    fn card(id: &str) -> DragItem {
        DragItem::Card(CardId::new(id))
    }

    fn column(id: &str) -> DragItem {
        DragItem::Column(ColumnId::new(id))
    }

    fn slot(id: &str) -> DragItem {
        DragItem::ContainerSlot(ColumnId::new(id))
    }

    fn resolved_order(layout: &[(&str, &[&str])], active: DragItem, over: DragItem, column_id: &str) -> Vec<String> {
        let snap = snapshot(layout);
        let request = resolve_drop(&snap, &active, &over).unwrap();
        let plan = plan_move(&snap, 0, &request).unwrap().unwrap();
        let mut next = snap.clone();
        match plan {
            crate::planner::MovePlan::Column(m) => next.replace_columns(m.columns),
            crate::planner::MovePlan::Card(m) => {
                next.replace_cards(m.from_column, m.source);
                if let Some(destination) = m.destination {
                    next.replace_cards(m.to_column, destination);
                }
            }
        }
        if column_id.is_empty() {
            column_order(&next)
        } else {
            card_order(&next, column_id)
        }
    }

    #[test]
    fn test_column_over_column_takes_its_index() {
        let layout: &[(&str, &[&str])] = &[("A", &[]), ("B", &[]), ("C", &[]), ("D", &[])];
        assert_eq!(resolved_order(layout, column("D"), column("B"), ""), vec!["A", "D", "B", "C"]);
        assert_eq!(resolved_order(layout, column("A"), column("C"), ""), vec!["B", "C", "A", "D"]);
    }

    #[test]
    fn test_card_within_column_is_array_move() {
        let layout: &[(&str, &[&str])] = &[("A", &["a1", "a2", "a3"])];
        assert_eq!(resolved_order(layout, card("a1"), card("a3"), "A"), vec!["a2", "a3", "a1"]);
        assert_eq!(resolved_order(layout, card("a3"), card("a1"), "A"), vec!["a3", "a1", "a2"]);
    }

    #[test]
    fn test_card_into_other_column_lands_before_hovered() {
        let layout: &[(&str, &[&str])] = &[("A", &["a1", "c"]), ("B", &["b1", "b2"])];
        assert_eq!(resolved_order(layout, card("c"), card("b2"), "B"), vec!["b1", "c", "b2"]);
    }

    #[test]
    fn test_card_over_slot_appends() {
        let layout: &[(&str, &[&str])] = &[("A", &["a1", "a2"]), ("B", &["b1"]), ("C", &[])];
        assert_eq!(resolved_order(layout, card("a1"), slot("B"), "B"), vec!["b1", "a1"]);
        assert_eq!(resolved_order(layout, card("a1"), slot("C"), "C"), vec!["a1"]);
        assert_eq!(resolved_order(layout, card("a1"), slot("A"), "A"), vec!["a2", "a1"]);
    }

    #[test]
    fn test_self_and_unknown_targets_cancel() {
        let snap = snapshot(&[("A", &["a1"]), ("B", &[])]);
        assert_eq!(resolve_drop(&snap, &card("a1"), &card("a1")), None);
        assert_eq!(resolve_drop(&snap, &card("a1"), &card("ghost")), None);
        assert_eq!(resolve_drop(&snap, &card("ghost"), &slot("B")), None);
        assert_eq!(resolve_drop(&snap, &column("A"), &column("A")), None);
        assert_eq!(resolve_drop(&snap, &column("A"), &slot("Z")), None);
    }

    #[test]
    fn test_accepts_filters_by_kind() {
        assert!(column("A").accepts(&column("B")));
        assert!(!column("A").accepts(&card("a1")));
        assert!(card("a1").accepts(&card("b1")));
        assert!(card("a1").accepts(&slot("B")));
        assert!(!card("a1").accepts(&column("B")));
    }

    #[test]
    fn test_drag_item_wire_shape() {
        let json = serde_json::to_string(&slot("A")).unwrap();
        assert_eq!(json, r#"{"kind":"containerSlot","id":"A"}"#);
    }
}
