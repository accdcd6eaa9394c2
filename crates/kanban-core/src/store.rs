//! Optimistic Cache Updater
//!
//! `BoardStore` owns the board snapshot the UI renders from. Mutations are
//! applied synchronously and hand back the snapshot they replaced, so the
//! caller can roll back if persistence later rejects the change. Snapshots
//! are shared behind `Arc`; rollback swaps the exact previous `Arc` back in.
//!
//! Every published snapshot passes [`BoardSnapshot::check_invariants`]. A
//! mutation that would break ordering is refused and leaves the cache as it
//! was.

use std::sync::Arc;

use crate::domain::{
    Card, CardId, CardUpdate, Column, ColumnId, ColumnUpdate, Subtask, SubtaskId, SubtaskUpdate, Tag, TagId, TagUpdate,
};
use crate::error::{BoardError, Result};
use crate::planner::{plan_move, MovePlan, MoveRequest};
use crate::position::{append_position, clamp_index, renumber};
use crate::snapshot::BoardSnapshot;

type Listener = Box<dyn Fn(&Arc<BoardSnapshot>)>;

pub struct BoardStore {
    current: Arc<BoardSnapshot>,
    revision: u64,
    listeners: Vec<Listener>,
}

impl BoardStore {
    pub fn new(snapshot: BoardSnapshot) -> Self {
        Self {
            current: Arc::new(snapshot),
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// The snapshot readers should render.
    pub fn snapshot(&self) -> Arc<BoardSnapshot> {
        Arc::clone(&self.current)
    }

    /// Bumped on every published change, including rollbacks.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Called synchronously after every change with the new snapshot.
    pub fn subscribe(&mut self, listener: impl Fn(&Arc<BoardSnapshot>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Plan a move against the latest (possibly optimistic) snapshot.
    pub fn plan(&self, request: &MoveRequest) -> Result<Option<MovePlan>> {
        plan_move(&self.current, self.revision, request)
    }

    /// Apply a plan and return the snapshot it replaced.
    pub fn apply(&mut self, plan: &MovePlan) -> Result<Arc<BoardSnapshot>> {
        if plan.revision() != self.revision {
            return Err(BoardError::StalePlan {
                planned: plan.revision(),
                current: self.revision,
            });
        }
        if plan.board_id() != self.current.board_id() {
            return Err(BoardError::InvariantViolation(format!(
                "plan for board {} applied to board {}",
                plan.board_id(),
                self.current.board_id()
            )));
        }

        self.mutate(|next| {
            match plan {
                MovePlan::Column(m) => next.replace_columns(m.columns.clone()),
                MovePlan::Card(m) => {
                    next.replace_cards(m.from_column.clone(), m.source.clone());
                    if let Some(destination) = &m.destination {
                        next.replace_cards(m.to_column.clone(), destination.clone());
                    }
                }
            }
            Ok(())
        })
    }

    /// Restore `previous` if it is not already current.
    ///
    /// Returns whether anything changed.
    pub fn rollback(&mut self, previous: &Arc<BoardSnapshot>) -> bool {
        if Arc::ptr_eq(&self.current, previous) {
            return false;
        }
        log::info!("[store] rollback at revision {}", self.revision);
        self.publish(Arc::clone(previous));
        true
    }

    /// Replace the whole snapshot, e.g. after a refresh from persistence.
    pub fn replace(&mut self, snapshot: BoardSnapshot) -> Result<Arc<BoardSnapshot>> {
        snapshot.check_invariants()?;
        let previous = Arc::clone(&self.current);
        self.publish(Arc::new(snapshot));
        Ok(previous)
    }

    pub fn append_column(&mut self, mut column: Column) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            if next.column(&column.id).is_some() {
                return Err(BoardError::InvariantViolation(format!("column {} already exists", column.id)));
            }
            column.position = append_position(next.columns().len());
            let mut columns = next.columns().to_vec();
            columns.push(column);
            next.replace_columns(columns);
            Ok(())
        })
    }

    pub fn append_card(&mut self, mut card: Card) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            if next.card(&card.id).is_some() {
                return Err(BoardError::InvariantViolation(format!("card {} already exists", card.id)));
            }
            let column_id = card.column_id.clone();
            let list = next
                .cards_mut(&column_id)
                .ok_or_else(|| BoardError::ColumnNotFound(column_id.clone()))?;
            card.position = append_position(list.len());
            list.push(card);
            Ok(())
        })
    }

    pub fn update_column(&mut self, update: &ColumnUpdate) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let column = next
                .columns_mut()
                .iter_mut()
                .find(|c| c.id == update.id)
                .ok_or_else(|| BoardError::ColumnNotFound(update.id.clone()))?;
            update.apply_to(column);
            Ok(())
        })
    }

    pub fn update_card(&mut self, update: &CardUpdate) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let card = next
                .all_cards_mut()
                .find(|c| c.id == update.id)
                .ok_or_else(|| BoardError::CardNotFound(update.id.clone()))?;
            update.apply_to(card);
            Ok(())
        })
    }

    /// Remove a column and renumber the remaining ones.
    pub fn remove_column(&mut self, column_id: &ColumnId) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let mut columns = next.columns().to_vec();
            let index = columns
                .iter()
                .position(|c| &c.id == column_id)
                .ok_or_else(|| BoardError::ColumnNotFound(column_id.clone()))?;
            columns.remove(index);
            renumber(&mut columns);
            next.replace_columns(columns);
            Ok(())
        })
    }

    /// Remove a card and renumber its former siblings.
    pub fn remove_card(&mut self, card_id: &CardId) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let (column_id, index) = next
                .locate_card(card_id)
                .map(|(column_id, index)| (column_id.clone(), index))
                .ok_or_else(|| BoardError::CardNotFound(card_id.clone()))?;
            if let Some(list) = next.cards_mut(&column_id) {
                list.remove(index);
                renumber(list);
            }
            Ok(())
        })
    }

    pub fn set_card_tags(&mut self, card_id: &CardId, tag_ids: &[TagId]) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            if let Some(missing) = tag_ids.iter().find(|id| next.tag(id).is_none()) {
                return Err(BoardError::TagNotFound(missing.clone()));
            }
            let card = next
                .all_cards_mut()
                .find(|c| &c.id == card_id)
                .ok_or_else(|| BoardError::CardNotFound(card_id.clone()))?;
            card.tag_ids = tag_ids.to_vec();
            Ok(())
        })
    }

    pub fn append_subtask(&mut self, mut subtask: Subtask) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let card = next
                .card_mut(&subtask.card_id)
                .ok_or_else(|| BoardError::CardNotFound(subtask.card_id.clone()))?;
            if card.subtasks.iter().any(|s| s.id == subtask.id) {
                return Err(BoardError::InvariantViolation(format!("subtask {} already exists", subtask.id)));
            }
            subtask.position = append_position(card.subtasks.len());
            card.subtasks.push(subtask);
            Ok(())
        })
    }

    /// Edit a subtask and, with `target_position`, move it within its card.
    pub fn update_subtask(&mut self, update: &SubtaskUpdate) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let card = next
                .card_mut(&update.card_id)
                .ok_or_else(|| BoardError::CardNotFound(update.card_id.clone()))?;
            let index = card
                .subtasks
                .iter()
                .position(|s| s.id == update.id)
                .ok_or_else(|| BoardError::SubtaskNotFound(update.id.clone()))?;
            update.apply_to(&mut card.subtasks[index]);
            if let Some(target) = update.target_position {
                let moving = card.subtasks.remove(index);
                let to = clamp_index(target, card.subtasks.len());
                card.subtasks.insert(to, moving);
                renumber(&mut card.subtasks);
            }
            Ok(())
        })
    }

    /// Remove a subtask and renumber the rest of its card.
    pub fn remove_subtask(&mut self, card_id: &CardId, subtask_id: &SubtaskId) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let card = next
                .card_mut(card_id)
                .ok_or_else(|| BoardError::CardNotFound(card_id.clone()))?;
            let before = card.subtasks.len();
            card.subtasks.retain(|s| &s.id != subtask_id);
            if card.subtasks.len() == before {
                return Err(BoardError::SubtaskNotFound(subtask_id.clone()));
            }
            renumber(&mut card.subtasks);
            Ok(())
        })
    }

    pub fn add_tag(&mut self, tag: Tag) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            if next.tag(&tag.id).is_some() {
                return Err(BoardError::InvariantViolation(format!("tag {} already exists", tag.id)));
            }
            next.tags_mut().push(tag);
            Ok(())
        })
    }

    pub fn update_tag(&mut self, update: &TagUpdate) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let tag = next
                .tags_mut()
                .iter_mut()
                .find(|t| t.id == update.id)
                .ok_or_else(|| BoardError::TagNotFound(update.id.clone()))?;
            update.apply_to(tag);
            Ok(())
        })
    }

    /// Remove a tag from the board and from every card carrying it.
    pub fn remove_tag(&mut self, tag_id: &TagId) -> Result<Arc<BoardSnapshot>> {
        self.mutate(|next| {
            let before = next.tags().len();
            next.tags_mut().retain(|t| &t.id != tag_id);
            if next.tags().len() == before {
                return Err(BoardError::TagNotFound(tag_id.clone()));
            }
            for card in next.all_cards_mut() {
                card.tag_ids.retain(|id| id != tag_id);
            }
            Ok(())
        })
    }

    /// Run `change` on a copy of the current snapshot and publish the copy if
    /// it still satisfies every ordering invariant.
    fn mutate<F>(&mut self, change: F) -> Result<Arc<BoardSnapshot>>
    where
        F: FnOnce(&mut BoardSnapshot) -> Result<()>,
    {
        let mut next = (*self.current).clone();
        change(&mut next)?;
        if let Err(err) = next.check_invariants() {
            log::error!("[store] refusing mutation at revision {}: {}", self.revision, err);
            return Err(err);
        }
        let previous = Arc::clone(&self.current);
        self.publish(Arc::new(next));
        Ok(previous)
    }

    fn publish(&mut self, snapshot: Arc<BoardSnapshot>) {
        self.current = snapshot;
        self.revision += 1;
        log::debug!("[store] revision {}", self.revision);
        for listener in &self.listeners {
            listener(&self.current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::is_dense;
    use crate::snapshot::fixtures::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn store(layout: &[(&str, &[&str])]) -> BoardStore {
        BoardStore::new(snapshot(layout))
    }

    #[test]
    fn test_apply_then_rollback_restores_previous() {
        let mut store = store(&[("A", &["a1", "a2", "a3"]), ("B", &["b1", "b2"])]);
        let before = store.snapshot();

        let plan = store
            .plan(&MoveRequest::card(CardId::new("a2"), ColumnId::new("B"), 1))
            .unwrap()
            .unwrap();
        let previous = store.apply(&plan).unwrap();
        assert!(Arc::ptr_eq(&previous, &before));
        assert_eq!(card_order(&store.snapshot(), "B"), vec!["b1", "a2", "b2"]);

        assert!(store.rollback(&previous));
        assert!(Arc::ptr_eq(&store.snapshot(), &before));
        assert_eq!(*store.snapshot(), *before);
    }

    #[test]
    fn test_rollback_to_current_is_noop() {
        let mut store = store(&[("A", &["a1"])]);
        let current = store.snapshot();
        let revision = store.revision();
        assert!(!store.rollback(&current));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_second_plan_sees_optimistic_state() {
        let mut store = store(&[("A", &["a1", "a2"]), ("B", &[])]);
        let first = store
            .plan(&MoveRequest::card(CardId::new("a1"), ColumnId::new("B"), 0))
            .unwrap()
            .unwrap();
        store.apply(&first).unwrap();

        // a2 is now the only card in A
        let second = store
            .plan(&MoveRequest::card(CardId::new("a2"), ColumnId::new("B"), 5))
            .unwrap()
            .unwrap();
        assert_eq!(second.to_index(), 1);
        store.apply(&second).unwrap();
        assert_eq!(card_order(&store.snapshot(), "B"), vec!["a1", "a2"]);
        assert!(card_order(&store.snapshot(), "A").is_empty());
    }

    #[test]
    fn test_stale_plan_is_refused() {
        let mut store = store(&[("A", &["a1", "a2"]), ("B", &[])]);
        let stale = store
            .plan(&MoveRequest::card(CardId::new("a1"), ColumnId::new("B"), 0))
            .unwrap()
            .unwrap();
        store.remove_card(&CardId::new("a2")).unwrap();

        let before = store.snapshot();
        assert!(matches!(store.apply(&stale), Err(BoardError::StalePlan { .. })));
        assert!(Arc::ptr_eq(&store.snapshot(), &before));
    }

    #[test]
    fn test_plan_with_broken_positions_is_never_published() {
        let mut store = store(&[("A", &["a1", "a2"]), ("B", &[])]);
        let plan = store
            .plan(&MoveRequest::card(CardId::new("a1"), ColumnId::new("A"), 1))
            .unwrap()
            .unwrap();
        let MovePlan::Card(mut m) = plan else { panic!("expected card plan") };
        m.source[0].position = 1;
        let corrupt = MovePlan::Card(m);

        let before = store.snapshot();
        assert!(matches!(
            store.apply(&corrupt),
            Err(BoardError::InvariantViolation(_))
        ));
        assert!(Arc::ptr_eq(&store.snapshot(), &before));
    }

    #[test]
    fn test_append_uses_container_length() {
        let mut store = store(&[("A", &["a1", "a2"]), ("B", &[])]);
        let mut new_card = card("a3", "A", 99);
        new_card.title = "late".to_string();
        store.append_card(new_card).unwrap();
        let snap = store.snapshot();
        assert_eq!(snap.card(&CardId::new("a3")).unwrap().position, 2);

        store.append_column(column("C", -1)).unwrap();
        assert_eq!(store.snapshot().column(&ColumnId::new("C")).unwrap().position, 2);
    }

    #[test]
    fn test_remove_renumbers_siblings() {
        let mut store = store(&[("A", &["a1", "a2", "a3"]), ("B", &[]), ("C", &[])]);
        store.remove_card(&CardId::new("a1")).unwrap();
        let snap = store.snapshot();
        let positions: Vec<_> = snap.cards_in(&ColumnId::new("A")).iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1]);

        store.remove_column(&ColumnId::new("B")).unwrap();
        assert_eq!(column_order(&store.snapshot()), vec!["A", "C"]);
        assert_eq!(store.snapshot().columns()[1].position, 1);
    }

    #[test]
    fn test_remove_tag_strips_cards() {
        let mut store = store(&[("A", &["a1"])]);
        let tag = Tag {
            id: TagId::new("t1"),
            board_id: board_id(),
            label: "bug".to_string(),
            color: None,
        };
        store.add_tag(tag).unwrap();
        store.set_card_tags(&CardId::new("a1"), &[TagId::new("t1")]).unwrap();
        assert!(store.snapshot().card(&CardId::new("a1")).unwrap().has_tag(&TagId::new("t1")));

        store.remove_tag(&TagId::new("t1")).unwrap();
        assert!(store.snapshot().card(&CardId::new("a1")).unwrap().tag_ids.is_empty());
        assert!(matches!(
            store.set_card_tags(&CardId::new("a1"), &[TagId::new("t1")]),
            Err(BoardError::TagNotFound(_))
        ));
    }

    #[test]
    fn test_subtasks_append_reorder_and_renumber() {
        let mut store = store(&[("A", &["k"])]);
        for id in ["s1", "s2", "s3"] {
            store.append_subtask(subtask(id, "k", 42)).unwrap();
        }
        assert_eq!(subtask_order(&store.snapshot(), "k"), vec!["s1", "s2", "s3"]);

        let mut update = SubtaskUpdate::new(board_id(), CardId::new("k"), SubtaskId::new("s3"));
        update.target_position = Some(-4);
        update.is_completed = Some(true);
        store.update_subtask(&update).unwrap();
        let snap = store.snapshot();
        assert_eq!(subtask_order(&snap, "k"), vec!["s3", "s1", "s2"]);
        assert!(snap.card(&CardId::new("k")).unwrap().subtasks[0].is_completed);

        store.remove_subtask(&CardId::new("k"), &SubtaskId::new("s1")).unwrap();
        let snap = store.snapshot();
        assert_eq!(subtask_order(&snap, "k"), vec!["s3", "s2"]);
        assert!(is_dense(&snap.card(&CardId::new("k")).unwrap().subtasks));
        assert!(matches!(
            store.remove_subtask(&CardId::new("k"), &SubtaskId::new("s1")),
            Err(BoardError::SubtaskNotFound(_))
        ));
    }

    #[test]
    fn test_update_tag_relabels_in_place() {
        let mut store = store(&[("A", &[])]);
        store
            .add_tag(Tag {
                id: TagId::new("t1"),
                board_id: board_id(),
                label: "bug".to_string(),
                color: None,
            })
            .unwrap();
        let mut update = TagUpdate::new(board_id(), TagId::new("t1"));
        update.label = Some("defect".to_string());
        update.color = Some(Some("#00FF00".to_string()));
        store.update_tag(&update).unwrap();

        let snap = store.snapshot();
        let tag = snap.tag(&TagId::new("t1")).unwrap();
        assert_eq!(tag.label, "defect");
        assert_eq!(tag.color.as_deref(), Some("#00FF00"));

        let missing = TagUpdate::new(board_id(), TagId::new("nope"));
        assert!(matches!(store.update_tag(&missing), Err(BoardError::TagNotFound(_))));
    }

    #[test]
    fn test_listeners_fire_on_apply_and_rollback() {
        let mut store = store(&[("A", &[]), ("B", &[])]);
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        let plan = store
            .plan(&MoveRequest::column(ColumnId::new("B"), 0))
            .unwrap()
            .unwrap();
        let previous = store.apply(&plan).unwrap();
        store.rollback(&previous);
        store.rollback(&previous);
        assert_eq!(calls.get(), 2);
    }
}
