//! Snapshot module - read-only view of a game for rendering and observers
//!
//! Snapshots are owned copies, so a driver can publish them to other tasks
//! while the engine keeps mutating its own state.

use crate::board::Board;
use crate::game_state::Tetromino;
use crate::highscores::Highscore;
use crate::pieces::shape_of;
use crate::types::{Cell, GameStatus, PieceKind, Rotation, EMPTY};

/// Position and orientation of the falling piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(t: Tetromino) -> Self {
        Self {
            kind: t.kind,
            rotation: t.rotation,
            x: t.x,
            y: t.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub status: GameStatus,
    /// Locked cells only; the active piece is not merged in.
    pub board: Board,
    pub active: ActiveSnapshot,
    /// Row the active piece would land on if hard-dropped.
    pub ghost_y: i32,
    pub next: PieceKind,
    pub lines: u32,
    pub level: u32,
    pub score: u32,
    pub interval_ms: u32,
    pub episode_id: u32,
    pub piece_id: u32,
    /// Ledger entries, best first. Empty when taken straight from the engine.
    pub highscores: Vec<Highscore>,
}

impl GameSnapshot {
    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Best ledger score, or the current score if no ledger is attached.
    pub fn best_score(&self) -> u32 {
        self.highscores
            .first()
            .map(|h| h.score)
            .unwrap_or(self.score)
            .max(self.score)
    }

    /// Value shown at `(x, y)`: the locked cell, or the active piece on top of it.
    ///
    /// While the game is over every cell reads as the locked value only; the
    /// piece that ended the game is already merged.
    pub fn display_cell(&self, x: i32, y: i32) -> Cell {
        let locked = self.board.get(x, y).unwrap_or(EMPTY);
        if locked != EMPTY || self.is_game_over() {
            return locked;
        }
        let shape = shape_of(self.active.kind, self.active.rotation);
        self.board
            .point_value(&shape, self.active.x, self.active.y, x, y)
    }

    /// True if `(x, y)` is covered by the ghost (landing preview) of the active piece.
    pub fn is_ghost_cell(&self, x: i32, y: i32) -> bool {
        if self.is_game_over() || self.ghost_y == self.active.y {
            return false;
        }
        let shape = shape_of(self.active.kind, self.active.rotation);
        shape.value_at(self.active.x, self.ghost_y, x, y) != EMPTY
    }
}
