//! Mutation Dispatcher
//!
//! Applies a change to the [`BoardStore`] first, then issues exactly one
//! persistence command for it. A rejected command rolls the cache back to
//! the snapshot captured when the change was applied and the error is handed
//! back to the caller; nothing is retried automatically.
//!
//! Moves are split in two so the UI can apply synchronously inside the
//! drag-end handler and persist from a spawned task:
//! [`MutationDispatcher::begin_move`] then [`MutationDispatcher::dispatch_move`].
//! New drags are accepted while earlier ones are still pending and are
//! planned against the latest optimistic snapshot.
//!
//! A rollback while other changes are in flight also discards those later
//! changes from the cache. Their own failures are then ignored by the cache,
//! and once nothing is pending the board is reloaded from persistence.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;
use std::sync::Arc;

use crate::commands::BoardCommands;
use crate::config::Limits;
use crate::domain::{
    BoardId, Card, CardId, CardUpdate, Column, ColumnId, ColumnUpdate, NewCard, NewColumn, NewSubtask, NewTag, Subtask,
    SubtaskId, SubtaskUpdate, Tag, TagId, TagUpdate,
};
use crate::error::{BoardError, Result};
use crate::planner::{MovePlan, MoveRequest};
use crate::position::append_position;
use crate::snapshot::BoardSnapshot;
use crate::store::BoardStore;
use crate::validation::{
    build_card, build_column, build_subtask, build_tag, validate_card_update, validate_column_update,
    validate_subtask_update, validate_tag_update,
};

/// A move already applied to the cache and waiting to be persisted.
#[derive(Debug)]
pub struct PendingMove {
    plan: MovePlan,
    previous: Arc<BoardSnapshot>,
}

impl PendingMove {
    pub fn plan(&self) -> &MovePlan {
        &self.plan
    }

    /// Snapshot the cache returns to if persistence rejects the move.
    pub fn previous(&self) -> &Arc<BoardSnapshot> {
        &self.previous
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Entity was already in place; nothing applied, nothing sent.
    Unchanged,
    /// Applied and confirmed by the persistence layer.
    Persisted,
}

/// An optimistic change: the revision it was applied on and the snapshot
/// that was current at that revision.
struct Applied {
    base: u64,
    previous: Arc<BoardSnapshot>,
}

pub struct MutationDispatcher<C: BoardCommands> {
    board_id: BoardId,
    store: Rc<RefCell<BoardStore>>,
    commands: Rc<C>,
    limits: Limits,
    pending: Cell<usize>,
    stale: Cell<bool>,
    /// Base revisions whose changes a rollback already removed from the cache
    discarded: RefCell<Vec<Range<u64>>>,
}

impl<C: BoardCommands> MutationDispatcher<C> {
    pub fn new(store: Rc<RefCell<BoardStore>>, commands: Rc<C>) -> Self {
        let board_id = store.borrow().snapshot().board_id().clone();
        Self {
            board_id,
            store,
            commands,
            limits: Limits::default(),
            pending: Cell::new(0),
            stale: Cell::new(false),
            discarded: RefCell::new(Vec::new()),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Fetch a board and build a dispatcher around a fresh store.
    pub async fn load(board_id: BoardId, commands: Rc<C>) -> Result<Self> {
        let snapshot = fetch_snapshot(commands.as_ref(), &board_id).await?;
        let store = Rc::new(RefCell::new(BoardStore::new(snapshot)));
        Ok(Self::new(store, commands))
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    pub fn store(&self) -> Rc<RefCell<BoardStore>> {
        Rc::clone(&self.store)
    }

    pub fn snapshot(&self) -> Arc<BoardSnapshot> {
        self.store.borrow().snapshot()
    }

    /// Operations applied to the cache and not yet settled.
    pub fn pending(&self) -> usize {
        self.pending.get()
    }

    /// Set when the cache may disagree with persistence: a rollback happened
    /// while other operations were in flight, or a refresh has not landed yet.
    pub fn is_stale(&self) -> bool {
        self.stale.get()
    }

    /// Plan `request` against the latest snapshot and apply it.
    ///
    /// `Ok(None)` when the entity is already in place: no cache change and no
    /// persistence call will follow.
    pub fn begin_move(&self, request: &MoveRequest) -> Result<Option<PendingMove>> {
        let mut store = self.store.borrow_mut();
        let Some(plan) = store.plan(request)? else {
            return Ok(None);
        };
        let previous = store.apply(&plan)?;
        self.pending.set(self.pending.get() + 1);
        log::info!("[dispatch] applied {} (pending {})", plan.describe(), self.pending.get());
        Ok(Some(PendingMove { plan, previous }))
    }

    /// Persist a move started with [`Self::begin_move`].
    pub async fn dispatch_move(&self, pending: PendingMove) -> Result<()> {
        let PendingMove { plan, previous } = pending;
        let result = match &plan {
            MovePlan::Column(m) => {
                self.commands
                    .move_column(&m.board_id, &m.column_id, m.to_index as i64)
                    .await
            }
            MovePlan::Card(m) => {
                self.commands
                    .move_card(&m.board_id, &m.card_id, &m.from_column, &m.to_column, m.to_index as i64)
                    .await
            }
        };
        let applied = Applied {
            base: plan.revision(),
            previous,
        };
        self.settle(result, &applied, &plan.describe()).await
    }

    /// [`Self::begin_move`] and [`Self::dispatch_move`] in one call.
    pub async fn move_entity(&self, request: &MoveRequest) -> Result<MoveOutcome> {
        match self.begin_move(request)? {
            None => Ok(MoveOutcome::Unchanged),
            Some(pending) => {
                self.dispatch_move(pending).await?;
                Ok(MoveOutcome::Persisted)
            }
        }
    }

    pub async fn create_column(&self, input: NewColumn) -> Result<Column> {
        let (column, applied) = {
            let len = self.store.borrow().snapshot().columns().len();
            let column = build_column(&self.board_id, input, append_position(len), &self.limits)?;
            let applied = self.begin(|store| store.append_column(column.clone()))?;
            (column, applied)
        };
        let result = self.commands.create_column(&column).await;
        self.settle(result, &applied, &format!("create column {}", column.id))
            .await?;
        Ok(column)
    }

    pub async fn create_card(&self, input: NewCard) -> Result<Card> {
        let (card, applied) = {
            let snapshot = self.store.borrow().snapshot();
            if snapshot.column(&input.column_id).is_none() {
                return Err(BoardError::ColumnNotFound(input.column_id));
            }
            if let Some(missing) = input.tag_ids.iter().find(|id| snapshot.tag(id).is_none()) {
                return Err(BoardError::Validation(format!("unknown tag {missing}")));
            }
            let len = snapshot.cards_in(&input.column_id).len();
            let card = build_card(&self.board_id, input, append_position(len), &self.limits)?;
            let applied = self.begin(|store| store.append_card(card.clone()))?;
            (card, applied)
        };
        let result = self.commands.create_card(&card).await;
        self.settle(result, &applied, &format!("create card {}", card.id))
            .await?;
        Ok(card)
    }

    pub async fn update_column(&self, update: ColumnUpdate) -> Result<()> {
        let update = validate_column_update(&update, &self.limits)?;
        if update.is_empty() {
            return Ok(());
        }
        let applied = self.begin(|store| store.update_column(&update))?;
        let result = self.commands.update_column(&update).await;
        self.settle(result, &applied, &format!("update column {}", update.id))
            .await
    }

    pub async fn update_card(&self, update: CardUpdate) -> Result<()> {
        let update = validate_card_update(&update, &self.limits)?;
        if update.is_empty() {
            return Ok(());
        }
        let applied = self.begin(|store| store.update_card(&update))?;
        let result = self.commands.update_card(&update).await;
        self.settle(result, &applied, &format!("update card {}", update.id))
            .await
    }

    /// Delete an empty column; siblings are renumbered.
    pub async fn delete_column(&self, column_id: &ColumnId) -> Result<()> {
        let held = self.store.borrow().snapshot().cards_in(column_id).len();
        if held > 0 {
            return Err(BoardError::Validation(format!(
                "column still holds {held} card(s); move or delete them first"
            )));
        }
        let applied = self.begin(|store| store.remove_column(column_id))?;
        let result = self.commands.delete_column(&self.board_id, column_id).await;
        self.settle(result, &applied, &format!("delete column {column_id}"))
            .await
    }

    pub async fn delete_card(&self, card_id: &CardId) -> Result<()> {
        let applied = self.begin(|store| store.remove_card(card_id))?;
        let result = self.commands.delete_card(&self.board_id, card_id).await;
        self.settle(result, &applied, &format!("delete card {card_id}"))
            .await
    }

    /// Append a subtask to the end of its card's checklist.
    pub async fn create_subtask(&self, input: NewSubtask) -> Result<Subtask> {
        let (subtask, applied) = {
            let len = self
                .store
                .borrow()
                .snapshot()
                .card(&input.card_id)
                .map(|card| card.subtasks.len())
                .ok_or_else(|| BoardError::CardNotFound(input.card_id.clone()))?;
            let subtask = build_subtask(&self.board_id, input, append_position(len), &self.limits)?;
            let applied = self.begin(|store| store.append_subtask(subtask.clone()))?;
            (subtask, applied)
        };
        let result = self.commands.create_subtask(&subtask).await;
        self.settle(result, &applied, &format!("create subtask {}", subtask.id))
            .await?;
        Ok(subtask)
    }

    pub async fn update_subtask(&self, update: SubtaskUpdate) -> Result<()> {
        let update = validate_subtask_update(&update, &self.limits)?;
        if update.is_empty() {
            return Ok(());
        }
        let applied = self.begin(|store| store.update_subtask(&update))?;
        let result = self.commands.update_subtask(&update).await;
        self.settle(result, &applied, &format!("update subtask {}", update.id))
            .await
    }

    /// Delete a subtask; the rest of the checklist is renumbered.
    pub async fn delete_subtask(&self, card_id: &CardId, subtask_id: &SubtaskId) -> Result<()> {
        let applied = self.begin(|store| store.remove_subtask(card_id, subtask_id))?;
        let result = self
            .commands
            .delete_subtask(&self.board_id, card_id, subtask_id)
            .await;
        self.settle(result, &applied, &format!("delete subtask {subtask_id}"))
            .await
    }

    pub async fn set_card_tags(&self, card_id: &CardId, tag_ids: Vec<TagId>) -> Result<()> {
        let applied = self.begin(|store| store.set_card_tags(card_id, &tag_ids))?;
        let result = self
            .commands
            .set_card_tags(&self.board_id, card_id, &tag_ids)
            .await;
        self.settle(result, &applied, &format!("tag card {card_id}"))
            .await
    }

    pub async fn create_tag(&self, input: NewTag) -> Result<Tag> {
        let tag = build_tag(&self.board_id, input, &self.limits)?;
        let applied = self.begin(|store| store.add_tag(tag.clone()))?;
        let result = self.commands.create_tag(&tag).await;
        self.settle(result, &applied, &format!("create tag {}", tag.id))
            .await?;
        Ok(tag)
    }

    pub async fn update_tag(&self, update: TagUpdate) -> Result<()> {
        let update = validate_tag_update(&update, &self.limits)?;
        if update.is_empty() {
            return Ok(());
        }
        let applied = self.begin(|store| store.update_tag(&update))?;
        let result = self.commands.update_tag(&update).await;
        self.settle(result, &applied, &format!("update tag {}", update.id))
            .await
    }

    pub async fn delete_tag(&self, tag_id: &TagId) -> Result<()> {
        let applied = self.begin(|store| store.remove_tag(tag_id))?;
        let result = self.commands.delete_tag(&self.board_id, tag_id).await;
        self.settle(result, &applied, &format!("delete tag {tag_id}"))
            .await
    }

    /// Reload the board from the persistence layer and replace the snapshot.
    ///
    /// If the cache changed while the fetch was in flight, the fetched copy
    /// may predate those changes and is dropped; the cache stays stale and
    /// the last operation to settle reloads again.
    pub async fn refresh(&self) -> Result<()> {
        self.stale.set(true);
        let started_at = self.store.borrow().revision();
        let snapshot = fetch_snapshot(self.commands.as_ref(), &self.board_id).await?;

        let mut store = self.store.borrow_mut();
        if self.pending.get() > 0 || store.revision() != started_at {
            log::info!(
                "[dispatch] board {} changed during refresh (revision {} -> {}), keeping cache",
                self.board_id,
                started_at,
                store.revision()
            );
            return Ok(());
        }
        store.replace(snapshot)?;
        self.stale.set(false);
        log::info!("[dispatch] board {} refreshed", self.board_id);
        Ok(())
    }

    /// Apply an optimistic change and count it as pending.
    fn begin<F>(&self, change: F) -> Result<Applied>
    where
        F: FnOnce(&mut BoardStore) -> Result<Arc<BoardSnapshot>>,
    {
        let mut store = self.store.borrow_mut();
        let base = store.revision();
        let previous = change(&mut *store)?;
        self.pending.set(self.pending.get() + 1);
        Ok(Applied { base, previous })
    }

    /// Reconcile a finished persistence call with the cache.
    async fn settle(&self, result: Result<()>, applied: &Applied, what: &str) -> Result<()> {
        let remaining = self.pending.get().saturating_sub(1);
        self.pending.set(remaining);

        let outcome = match result {
            Ok(()) => {
                log::info!("[dispatch] {} persisted", what);
                Ok(())
            }
            Err(err) => {
                self.roll_back(applied, what, &err, remaining);
                Err(match err {
                    BoardError::Persistence(_) => err,
                    other => BoardError::Persistence(other.to_string()),
                })
            }
        };

        if remaining == 0 {
            self.discarded.borrow_mut().clear();
            if self.stale.get() {
                if let Err(err) = self.refresh().await {
                    log::warn!("[dispatch] refresh after rollback failed: {}", err);
                }
            }
        }
        outcome
    }

    fn roll_back(&self, applied: &Applied, what: &str, err: &BoardError, remaining: usize) {
        let already_gone = self
            .discarded
            .borrow()
            .iter()
            .any(|range| range.contains(&applied.base));
        if already_gone {
            log::warn!("[dispatch] {} failed after an earlier rollback removed it: {}", what, err);
        } else {
            log::warn!("[dispatch] {} failed, rolling back: {}", what, err);
            let mut store = self.store.borrow_mut();
            let reached = store.revision();
            store.rollback(&applied.previous);
            if remaining > 0 {
                // changes applied on top of `previous` went with it
                self.discarded.borrow_mut().push(applied.base..reached);
            }
        }
        if remaining > 0 {
            self.stale.set(true);
        }
    }
}

async fn fetch_snapshot<C: BoardCommands + ?Sized>(commands: &C, board_id: &BoardId) -> Result<BoardSnapshot> {
    let columns = commands.load_columns(board_id).await.map_err(into_load)?;
    let cards = commands.load_cards(board_id).await.map_err(into_load)?;
    let tags = commands.load_tags(board_id).await.map_err(into_load)?;
    log::info!(
        "[dispatch] loaded board {}: {} columns, {} cards, {} tags",
        board_id,
        columns.len(),
        cards.len(),
        tags.len()
    );
    Ok(BoardSnapshot::from_parts(board_id.clone(), columns, cards, tags))
}

fn into_load(err: BoardError) -> BoardError {
    match err {
        BoardError::Load(_) => err,
        BoardError::Persistence(msg) => BoardError::Load(msg),
        other => BoardError::Load(other.to_string()),
    }
}
