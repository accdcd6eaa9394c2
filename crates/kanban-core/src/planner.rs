//! Move Planner
//!
//! Turns a move request into a complete position assignment. Every plan
//! renumbers the whole of each affected container, so a plan can never
//! carry duplicate or missing positions.

use crate::domain::{BoardId, Card, CardId, Column, ColumnId};
use crate::error::{BoardError, Result};
use crate::position::{clamp_index, normalize};
use crate::snapshot::BoardSnapshot;

/// What the user asked for: put an entity at `target_index` of a container,
/// counted after the entity has been taken out of its current container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRequest {
    Column {
        column_id: ColumnId,
        target_index: i64,
    },
    Card {
        card_id: CardId,
        to_column: ColumnId,
        target_index: i64,
    },
}

impl MoveRequest {
    pub fn column(column_id: ColumnId, target_index: i64) -> Self {
        MoveRequest::Column {
            column_id,
            target_index,
        }
    }

    pub fn card(card_id: CardId, to_column: ColumnId, target_index: i64) -> Self {
        MoveRequest::Card {
            card_id,
            to_column,
            target_index,
        }
    }
}

/// A computed move, ready to be applied to the cache and sent to persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum MovePlan {
    Column(ColumnMove),
    Card(CardMove),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMove {
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub from_index: usize,
    pub to_index: usize,
    /// The board's full column list, renumbered
    pub columns: Vec<Column>,
    /// Snapshot revision the plan was computed against
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardMove {
    pub board_id: BoardId,
    pub card_id: CardId,
    pub from_column: ColumnId,
    pub to_column: ColumnId,
    pub from_index: usize,
    pub to_index: usize,
    /// Source column after the card left it (the whole column when the move
    /// stays inside one column)
    pub source: Vec<Card>,
    /// Destination column after the card arrived, `None` for same-column moves
    pub destination: Option<Vec<Card>>,
    pub revision: u64,
}

impl MovePlan {
    pub fn board_id(&self) -> &BoardId {
        match self {
            MovePlan::Column(m) => &m.board_id,
            MovePlan::Card(m) => &m.board_id,
        }
    }

    pub fn revision(&self) -> u64 {
        match self {
            MovePlan::Column(m) => m.revision,
            MovePlan::Card(m) => m.revision,
        }
    }

    pub fn to_index(&self) -> usize {
        match self {
            MovePlan::Column(m) => m.to_index,
            MovePlan::Card(m) => m.to_index,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            MovePlan::Column(m) => format!("column {} {}->{}", m.column_id, m.from_index, m.to_index),
            MovePlan::Card(m) => format!(
                "card {} {}[{}]->{}[{}]",
                m.card_id, m.from_column, m.from_index, m.to_column, m.to_index
            ),
        }
    }
}

/// Plan `request` against `snapshot`. `Ok(None)` means the entity is already
/// where it was asked to go.
pub fn plan_move(snapshot: &BoardSnapshot, revision: u64, request: &MoveRequest) -> Result<Option<MovePlan>> {
    let plan = match request {
        MoveRequest::Column {
            column_id,
            target_index,
        } => plan_column_move(snapshot, revision, column_id, *target_index)?.map(MovePlan::Column),
        MoveRequest::Card {
            card_id,
            to_column,
            target_index,
        } => plan_card_move(snapshot, revision, card_id, to_column, *target_index)?.map(MovePlan::Card),
    };
    match &plan {
        Some(plan) => log::debug!("[planner] {}", plan.describe()),
        None => log::debug!("[planner] no-op {:?}", request),
    }
    Ok(plan)
}

fn plan_column_move(
    snapshot: &BoardSnapshot,
    revision: u64,
    column_id: &ColumnId,
    target_index: i64,
) -> Result<Option<ColumnMove>> {
    let from_index = snapshot
        .column_index(column_id)
        .ok_or_else(|| BoardError::ColumnNotFound(column_id.clone()))?;

    let mut columns = snapshot.columns().to_vec();
    let moved = columns.remove(from_index);
    let to_index = clamp_index(target_index, columns.len());
    if to_index == from_index {
        return Ok(None);
    }
    columns.insert(to_index, moved);

    Ok(Some(ColumnMove {
        board_id: snapshot.board_id().clone(),
        column_id: column_id.clone(),
        from_index,
        to_index,
        columns: normalize(columns),
        revision,
    }))
}

fn plan_card_move(
    snapshot: &BoardSnapshot,
    revision: u64,
    card_id: &CardId,
    to_column: &ColumnId,
    target_index: i64,
) -> Result<Option<CardMove>> {
    let (from_column, from_index) = snapshot
        .locate_card(card_id)
        .map(|(column_id, index)| (column_id.clone(), index))
        .ok_or_else(|| BoardError::CardNotFound(card_id.clone()))?;
    if snapshot.column(to_column).is_none() {
        return Err(BoardError::ColumnNotFound(to_column.clone()));
    }

    let mut source = snapshot.cards_in(&from_column).to_vec();
    let mut moved = source.remove(from_index);

    if &from_column == to_column {
        let to_index = clamp_index(target_index, source.len());
        if to_index == from_index {
            return Ok(None);
        }
        source.insert(to_index, moved);
        return Ok(Some(CardMove {
            board_id: snapshot.board_id().clone(),
            card_id: card_id.clone(),
            from_column: from_column.clone(),
            to_column: from_column,
            from_index,
            to_index,
            source: normalize(source),
            destination: None,
            revision,
        }));
    }

    let mut destination = snapshot.cards_in(to_column).to_vec();
    let to_index = clamp_index(target_index, destination.len());
    moved.column_id = to_column.clone();
    destination.insert(to_index, moved);

    Ok(Some(CardMove {
        board_id: snapshot.board_id().clone(),
        card_id: card_id.clone(),
        from_column,
        to_column: to_column.clone(),
        from_index,
        to_index,
        source: normalize(source),
        destination: Some(normalize(destination)),
        revision,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::is_dense;
    use crate::snapshot::fixtures::*;

    fn titles(columns: &[Column]) -> Vec<String> {
        columns.iter().map(|c| c.title.clone()).collect()
    }

    fn ids(cards: &[Card]) -> Vec<String> {
        cards.iter().map(|c| c.id.to_string()).collect()
    }

    #[test]
    fn test_column_reorder_moves_last_to_second() {
        let snap = snapshot(&[("A", &[]), ("B", &[]), ("C", &[]), ("D", &[])]);
        let plan = plan_move(&snap, 0, &MoveRequest::column(ColumnId::new("D"), 1))
            .unwrap()
            .unwrap();

        let MovePlan::Column(m) = plan else { panic!("expected column plan") };
        assert_eq!(titles(&m.columns), vec!["A", "D", "B", "C"]);
        let positions: Vec<_> = m.columns.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert_eq!((m.from_index, m.to_index), (3, 1));
    }

    #[test]
    fn test_column_reorder_includes_disabled_columns() {
        let mut columns = vec![column("A", 0), column("B", 1), column("C", 2)];
        columns[1].is_enabled = false;
        let snap = crate::snapshot::BoardSnapshot::from_parts(board_id(), columns, Vec::new(), Vec::new());

        let plan = plan_move(&snap, 0, &MoveRequest::column(ColumnId::new("A"), 2))
            .unwrap()
            .unwrap();
        let MovePlan::Column(m) = plan else { panic!("expected column plan") };
        assert_eq!(titles(&m.columns), vec!["B", "C", "A"]);
        assert!(!m.columns[0].is_enabled);
    }

    #[test]
    fn test_move_to_own_index_is_noop() {
        let snap = snapshot(&[("A", &["a1", "a2", "a3"]), ("B", &[])]);
        let same_card = MoveRequest::card(CardId::new("a2"), ColumnId::new("A"), 1);
        assert_eq!(plan_move(&snap, 0, &same_card).unwrap(), None);

        let same_column = MoveRequest::column(ColumnId::new("B"), 1);
        assert_eq!(plan_move(&snap, 0, &same_column).unwrap(), None);
    }

    #[test]
    fn test_clamped_request_landing_on_current_slot_is_noop() {
        let snap = snapshot(&[("A", &["a1", "a2", "a3"])]);
        let request = MoveRequest::card(CardId::new("a3"), ColumnId::new("A"), 50);
        assert_eq!(plan_move(&snap, 0, &request).unwrap(), None);
    }

    #[test]
    fn test_cross_column_move() {
        let snap = snapshot(&[("A", &["a1", "c", "a3"]), ("B", &["b1", "b2"])]);
        let plan = plan_move(&snap, 7, &MoveRequest::card(CardId::new("c"), ColumnId::new("B"), 1))
            .unwrap()
            .unwrap();

        let MovePlan::Card(m) = plan else { panic!("expected card plan") };
        assert_eq!(ids(&m.source), vec!["a1", "a3"]);
        assert!(is_dense(&m.source));
        let dest = m.destination.unwrap();
        assert_eq!(ids(&dest), vec!["b1", "c", "b2"]);
        assert!(is_dense(&dest));
        assert_eq!(dest[1].column_id, ColumnId::new("B"));
        assert_eq!(dest[1].position, 1);
        assert_eq!(m.revision, 7);
    }

    #[test]
    fn test_target_index_is_clamped() {
        let snap = snapshot(&[("A", &["a1", "a2"]), ("B", &["b1"])]);

        let plan = plan_move(&snap, 0, &MoveRequest::card(CardId::new("a1"), ColumnId::new("B"), 99))
            .unwrap()
            .unwrap();
        let MovePlan::Card(m) = plan else { panic!("expected card plan") };
        assert_eq!(m.to_index, 1);
        assert_eq!(ids(m.destination.as_ref().unwrap()), vec!["b1", "a1"]);

        let plan = plan_move(&snap, 0, &MoveRequest::card(CardId::new("a2"), ColumnId::new("A"), -3))
            .unwrap()
            .unwrap();
        let MovePlan::Card(m) = plan else { panic!("expected card plan") };
        assert_eq!(ids(&m.source), vec!["a2", "a1"]);
    }

    #[test]
    fn test_same_column_move_down() {
        let snap = snapshot(&[("A", &["a1", "a2", "a3", "a4"])]);
        let plan = plan_move(&snap, 0, &MoveRequest::card(CardId::new("a1"), ColumnId::new("A"), 2))
            .unwrap()
            .unwrap();
        let MovePlan::Card(m) = plan else { panic!("expected card plan") };
        assert_eq!(ids(&m.source), vec!["a2", "a3", "a1", "a4"]);
        assert!(m.destination.is_none());
        assert_eq!(m.from_column, m.to_column);
    }

    #[test]
    fn test_move_into_empty_column() {
        let snap = snapshot(&[("A", &["a1"]), ("B", &[])]);
        let plan = plan_move(&snap, 0, &MoveRequest::card(CardId::new("a1"), ColumnId::new("B"), 0))
            .unwrap()
            .unwrap();
        let MovePlan::Card(m) = plan else { panic!("expected card plan") };
        assert!(m.source.is_empty());
        assert_eq!(ids(m.destination.as_ref().unwrap()), vec!["a1"]);
    }

    #[test]
    fn test_unknown_entities() {
        let snap = snapshot(&[("A", &["a1"])]);
        let err = plan_move(&snap, 0, &MoveRequest::card(CardId::new("zz"), ColumnId::new("A"), 0)).unwrap_err();
        assert_eq!(err, BoardError::CardNotFound(CardId::new("zz")));

        let err = plan_move(&snap, 0, &MoveRequest::card(CardId::new("a1"), ColumnId::new("Q"), 0)).unwrap_err();
        assert_eq!(err, BoardError::ColumnNotFound(ColumnId::new("Q")));

        let err = plan_move(&snap, 0, &MoveRequest::column(ColumnId::new("Q"), 0)).unwrap_err();
        assert_eq!(err, BoardError::ColumnNotFound(ColumnId::new("Q")));
    }
}
