//! Board catalog
//!
//! Listing and lifecycle of boards. Boards are not cached optimistically:
//! the picker shows what the persistence layer confirmed.

use std::rc::Rc;

use crate::commands::BoardCommands;
use crate::config::Limits;
use crate::domain::{Board, BoardId, NewBoard};
use crate::error::{BoardError, Result};
use crate::validation::{build_board, validate_title};

pub struct BoardCatalog<C: BoardCommands> {
    commands: Rc<C>,
    limits: Limits,
}

impl<C: BoardCommands> BoardCatalog<C> {
    pub fn new(commands: Rc<C>) -> Self {
        Self {
            commands,
            limits: Limits::default(),
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub async fn list(&self) -> Result<Vec<Board>> {
        let boards = self.commands.load_boards().await.map_err(|err| match err {
            BoardError::Load(_) => err,
            other => BoardError::Load(other.to_string()),
        })?;
        log::info!("[catalog] loaded {} boards", boards.len());
        Ok(boards)
    }

    pub async fn create(&self, input: NewBoard) -> Result<Board> {
        let board = build_board(input, &self.limits)?;
        self.commands.create_board(&board).await?;
        log::info!("[catalog] created board {}", board.id);
        Ok(board)
    }

    /// Returns the normalized title that was stored.
    pub async fn rename(&self, board_id: &BoardId, title: &str) -> Result<String> {
        let title = validate_title(title, "board title", &self.limits)?;
        self.commands.rename_board(board_id, &title).await?;
        Ok(title)
    }

    /// Deletion cascades to the board's columns, cards and tags in the
    /// persistence layer.
    pub async fn delete(&self, board_id: &BoardId) -> Result<()> {
        self.commands.delete_board(board_id).await?;
        log::info!("[catalog] deleted board {}", board_id);
        Ok(())
    }
}
