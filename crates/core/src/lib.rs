//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has no
//! dependency on the terminal or the async runtime; the only I/O it performs is
//! through the highscore store.
//!
//! # Module Structure
//!
//! - [`board`]: game grid with collision detection, merging and line clearing
//! - [`pieces`]: tetromino catalog and precomputed rotation tables
//! - [`rng`]: uniform random (or scripted) piece source
//! - [`scoring`]: line/level/score counters and the gravity table
//! - [`game_state`]: the engine state machine and its lock protocol
//! - [`highscores`]: bounded, persisted score ledger
//! - [`session`]: an engine bound to the ledger
//! - [`snapshot`]: owned read-only views for renderers
//! - [`config`]: defaults and `TRISTE_*` environment overrides
//!
//! # Game Rules
//!
//! - Pieces are drawn uniformly at random (no bag), with one piece of look-ahead.
//! - Rotation is a single clockwise step through a fixed table, with no wall kicks.
//! - There is no lock delay: a downward step that would collide locks immediately.
//! - Clearing 1-4 lines scores 40/100/300/1200 times `level + 1`; the level rises
//!   every 10 lines and speeds up gravity.
//! - The game ends when a lock leaves a block in the top row.
//!
//! # Example
//!
//! ```
//! use triste_core::{GameConfig, GameState};
//! use triste_core::types::{GameAction, GameStatus};
//!
//! let config = GameConfig::default().with_seed(12345);
//! let mut game = GameState::new(&config);
//! assert_eq!(game.status(), GameStatus::Paused);
//!
//! game.apply_action(GameAction::Pause); // resume
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.score(), 0); // nothing cleared yet
//! assert_eq!(game.board().cells().iter().filter(|&&c| c != 0).count(), 4);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod highscores;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;

pub use triste_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use game_state::{GameState, LockEvent, StepOutcome, Tetromino};
pub use highscores::{FileStore, Highscore, HighscoreLedger, HighscoreStore, MemoryStore};
pub use pieces::{rotation_count, shape_of, spawn_position, Shape};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{calculate_level, calculate_line_score, drop_interval_ms, ScoreCounters};
pub use session::Session;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
