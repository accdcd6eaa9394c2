//! Board Snapshot
//!
//! The client-held copy of one board's columns, cards and tags. Columns are
//! kept in position order; cards are grouped per column, each group in
//! position order, and every card holds its subtasks in position order.
//! Snapshots are immutable once published by the store and shared behind an
//! `Arc`, so identity comparisons are cheap.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::domain::{find_by_id, index_of, BoardId, Card, CardId, Column, ColumnId, SubtaskId, Tag, TagId};
use crate::error::{BoardError, Result};
use crate::position::{is_dense, renumber, sort_by_position};

#[derive(Debug, Clone, PartialEq)]
pub struct BoardSnapshot {
    board_id: BoardId,
    columns: Vec<Column>,
    cards: BTreeMap<ColumnId, Vec<Card>>,
    tags: Vec<Tag>,
}

impl BoardSnapshot {
    pub fn empty(board_id: BoardId) -> Self {
        Self {
            board_id,
            columns: Vec::new(),
            cards: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    /// Build a snapshot from rows fetched from the persistence layer.
    ///
    /// Rows are ordered by position (ties keep fetch order) and renumbered, so
    /// a reader never observes gaps even if the fetched rows had them. Cards
    /// pointing at a column that is not on this board are dropped.
    pub fn from_parts(board_id: BoardId, mut columns: Vec<Column>, cards: Vec<Card>, tags: Vec<Tag>) -> Self {
        sort_by_position(&mut columns);
        if !is_dense(&columns) {
            log::warn!("[snapshot] board {} loaded with non-dense column positions, renumbering", board_id);
            renumber(&mut columns);
        }

        let mut grouped: BTreeMap<ColumnId, Vec<Card>> =
            columns.iter().map(|c| (c.id.clone(), Vec::new())).collect();
        let mut orphans = 0usize;
        for card in cards {
            match grouped.get_mut(&card.column_id) {
                Some(list) => list.push(card),
                None => orphans += 1,
            }
        }
        if orphans > 0 {
            log::warn!("[snapshot] dropped {} cards referencing unknown columns", orphans);
        }
        for (column_id, list) in grouped.iter_mut() {
            sort_by_position(list);
            if !is_dense(list) {
                log::warn!("[snapshot] column {} loaded with non-dense card positions, renumbering", column_id);
                renumber(list);
            }
            for card in list.iter_mut() {
                sort_by_position(&mut card.subtasks);
                if !is_dense(&card.subtasks) {
                    log::warn!("[snapshot] card {} loaded with non-dense subtask positions, renumbering", card.id);
                    renumber(&mut card.subtasks);
                }
            }
        }

        Self {
            board_id,
            columns,
            cards: grouped,
            tags,
        }
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    /// All columns in position order, enabled or not.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        find_by_id(&self.columns, id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        index_of(&self.columns, id)
    }

    /// Cards of one column in position order. Unknown columns yield an empty slice.
    pub fn cards_in(&self, column_id: &ColumnId) -> &[Card] {
        self.cards.get(column_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.values().flatten().find(|c| &c.id == id)
    }

    /// Column and index currently holding `id`.
    pub fn locate_card(&self, id: &CardId) -> Option<(&ColumnId, usize)> {
        self.cards.iter().find_map(|(column_id, list)| {
            index_of(list, id).map(|index| (column_id, index))
        })
    }

    /// Every card on the board, column by column.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values().flatten()
    }

    pub fn card_count(&self) -> usize {
        self.cards.values().map(Vec::len).sum()
    }

    /// Index of `subtask_id` within its card.
    pub fn subtask_index(&self, card_id: &CardId, subtask_id: &SubtaskId) -> Option<usize> {
        self.card(card_id).and_then(|card| index_of(&card.subtasks, subtask_id))
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn tag(&self, id: &TagId) -> Option<&Tag> {
        find_by_id(&self.tags, id)
    }

    pub(crate) fn replace_columns(&mut self, columns: Vec<Column>) {
        for column in &columns {
            self.cards.entry(column.id.clone()).or_default();
        }
        self.cards
            .retain(|column_id, _| columns.iter().any(|c| &c.id == column_id));
        self.columns = columns;
    }

    pub(crate) fn replace_cards(&mut self, column_id: ColumnId, cards: Vec<Card>) {
        self.cards.insert(column_id, cards);
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }

    pub(crate) fn cards_mut(&mut self, column_id: &ColumnId) -> Option<&mut Vec<Card>> {
        self.cards.get_mut(column_id)
    }

    pub(crate) fn all_cards_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.values_mut().flatten()
    }

    pub(crate) fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.all_cards_mut().find(|c| &c.id == id)
    }

    pub(crate) fn tags_mut(&mut self) -> &mut Vec<Tag> {
        &mut self.tags
    }

    /// Check density of every container and id uniqueness across the board.
    pub fn check_invariants(&self) -> Result<()> {
        if !is_dense(&self.columns) {
            return Err(BoardError::InvariantViolation(format!(
                "column positions on board {} are not 0..{}",
                self.board_id,
                self.columns.len()
            )));
        }
        let mut column_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(&column.id) {
                return Err(BoardError::InvariantViolation(format!("duplicate column {}", column.id)));
            }
        }

        let mut card_ids = HashSet::new();
        for (column_id, list) in &self.cards {
            if !column_ids.contains(column_id) {
                return Err(BoardError::InvariantViolation(format!(
                    "cards held for unknown column {}",
                    column_id
                )));
            }
            if !is_dense(list) {
                return Err(BoardError::InvariantViolation(format!(
                    "card positions in column {} are not 0..{}",
                    column_id,
                    list.len()
                )));
            }
            for card in list {
                if &card.column_id != column_id {
                    return Err(BoardError::InvariantViolation(format!(
                        "card {} filed under {} but points at {}",
                        card.id, column_id, card.column_id
                    )));
                }
                if !card_ids.insert(&card.id) {
                    return Err(BoardError::InvariantViolation(format!("duplicate card {}", card.id)));
                }
                if !is_dense(&card.subtasks) {
                    return Err(BoardError::InvariantViolation(format!(
                        "subtask positions in card {} are not 0..{}",
                        card.id,
                        card.subtasks.len()
                    )));
                }
                if let Some(stray) = card.subtasks.iter().find(|s| s.card_id != card.id) {
                    return Err(BoardError::InvariantViolation(format!(
                        "subtask {} filed under card {} but points at {}",
                        stray.id, card.id, stray.card_id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Render model: enabled columns in order, each with its ordered cards.
    pub fn view(&self) -> BoardView {
        let columns = self
            .columns
            .iter()
            .filter(|c| c.is_enabled)
            .map(|column| {
                let cards = self.cards_in(&column.id).to_vec();
                ColumnView {
                    over_limit: column.is_over_wip_limit(cards.len()),
                    column: column.clone(),
                    cards,
                }
            })
            .collect();
        BoardView {
            columns,
            hidden_columns: self.columns.iter().filter(|c| !c.is_enabled).cloned().collect(),
        }
    }
}

/// Read-only render model of a board.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    /// Disabled columns, still holding their slot and cards
    pub hidden_columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub column: Column,
    pub cards: Vec<Card>,
    /// More cards than the column's WIP limit allows
    pub over_limit: bool,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::domain::{Priority, Subtask};

    pub fn board_id() -> BoardId {
        BoardId::new("board")
    }

    pub fn column(id: &str, position: i64) -> Column {
        Column {
            id: ColumnId::new(id),
            board_id: board_id(),
            title: id.to_string(),
            position,
            wip_limit: None,
            color: None,
            icon: None,
            is_enabled: true,
        }
    }

    pub fn card(id: &str, column_id: &str, position: i64) -> Card {
        Card {
            id: CardId::new(id),
            board_id: board_id(),
            column_id: ColumnId::new(column_id),
            title: id.to_string(),
            description: None,
            position,
            priority: Priority::Medium,
            due_date: None,
            tag_ids: Vec::new(),
            subtasks: Vec::new(),
        }
    }

    pub fn subtask(id: &str, card_id: &str, position: i64) -> Subtask {
        Subtask {
            id: SubtaskId::new(id),
            board_id: board_id(),
            card_id: CardId::new(card_id),
            title: id.to_string(),
            is_completed: false,
            position,
        }
    }

    pub fn subtask_order(snapshot: &BoardSnapshot, card_id: &str) -> Vec<String> {
        snapshot
            .card(&CardId::new(card_id))
            .map(|card| card.subtasks.iter().map(|s| s.id.to_string()).collect())
            .unwrap_or_default()
    }

    /// Columns `A..` with the given card ids, e.g. `&[("A", &["a1", "a2"])]`.
    pub fn snapshot(layout: &[(&str, &[&str])]) -> BoardSnapshot {
        let mut columns = Vec::new();
        let mut cards = Vec::new();
        for (ci, (column_id, card_ids)) in layout.iter().enumerate() {
            columns.push(column(column_id, ci as i64));
            for (ki, card_id) in card_ids.iter().enumerate() {
                cards.push(card(card_id, column_id, ki as i64));
            }
        }
        BoardSnapshot::from_parts(board_id(), columns, cards, Vec::new())
    }

    pub fn column_order(snapshot: &BoardSnapshot) -> Vec<String> {
        snapshot.columns().iter().map(|c| c.id.to_string()).collect()
    }

    pub fn card_order(snapshot: &BoardSnapshot, column_id: &str) -> Vec<String> {
        snapshot
            .cards_in(&ColumnId::new(column_id))
            .iter()
            .map(|c| c.id.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_from_parts_sorts_and_renumbers() {
        let columns = vec![column("C", 9), column("A", 1), column("B", 4)];
        let cards = vec![card("x", "A", 5), card("y", "A", 2), card("z", "B", 0)];
        let snap = BoardSnapshot::from_parts(board_id(), columns, cards, Vec::new());

        assert_eq!(column_order(&snap), vec!["A", "B", "C"]);
        assert_eq!(card_order(&snap, "A"), vec!["y", "x"]);
        assert!(snap.check_invariants().is_ok());
        assert_eq!(snap.cards_in(&ColumnId::new("A"))[1].position, 1);
    }

    #[test]
    fn test_from_parts_drops_orphan_cards() {
        let snap = BoardSnapshot::from_parts(
            board_id(),
            vec![column("A", 0)],
            vec![card("x", "A", 0), card("lost", "gone", 0)],
            Vec::new(),
        );
        assert_eq!(snap.card_count(), 1);
        assert!(snap.card(&CardId::new("lost")).is_none());
    }

    #[test]
    fn test_from_parts_renumbers_subtasks() {
        let mut loaded = card("k", "A", 0);
        loaded.subtasks = vec![subtask("s2", "k", 7), subtask("s1", "k", 3)];
        let snap = BoardSnapshot::from_parts(board_id(), vec![column("A", 0)], vec![loaded], Vec::new());

        assert_eq!(subtask_order(&snap, "k"), vec!["s1", "s2"]);
        assert_eq!(snap.card(&CardId::new("k")).unwrap().subtasks[1].position, 1);
        assert_eq!(snap.subtask_index(&CardId::new("k"), &SubtaskId::new("s2")), Some(1));
        assert!(snap.check_invariants().is_ok());
    }

    #[test]
    fn test_locate_card() {
        let snap = snapshot(&[("A", &["a1", "a2"]), ("B", &["b1"])]);
        let (column_id, index) = snap.locate_card(&CardId::new("a2")).unwrap();
        assert_eq!(column_id.as_str(), "A");
        assert_eq!(index, 1);
        assert!(snap.locate_card(&CardId::new("nope")).is_none());
    }

    #[test]
    fn test_check_invariants_rejects_duplicate_positions() {
        let mut snap = snapshot(&[("A", &["a1", "a2"])]);
        snap.cards_mut(&ColumnId::new("A")).unwrap()[1].position = 0;
        assert!(matches!(
            snap.check_invariants(),
            Err(BoardError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_view_hides_disabled_columns_but_keeps_cards() {
        let mut snap = snapshot(&[("A", &["a1"]), ("B", &["b1", "b2"]), ("C", &[])]);
        snap.columns_mut()[1].is_enabled = false;
        snap.columns_mut()[0].wip_limit = Some(0);

        let view = snap.view();
        let titles: Vec<_> = view.columns.iter().map(|c| c.column.id.to_string()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(view.hidden_columns.len(), 1);
        assert!(view.columns[0].over_limit);
        assert_eq!(snap.cards_in(&ColumnId::new("B")).len(), 2);
    }
}
