//! Game configuration
//!
//! Defaults describe the classic 10x20 game starting paused. `from_env` lets the
//! binary override them through `TRISTE_*` environment variables; invalid values
//! fall back to the defaults.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{
    GameStatus, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_MAX_HIGHSCORES, MAX_BOARD_DIM, MIN_BOARD_DIM,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Status entered by a new game before any reset (`Paused` or `Running`).
    pub initial_status: GameStatus,
    /// Randomizer seed; `None` derives one from the clock.
    pub seed: Option<u32>,
    pub max_highscores: usize,
    pub data_dir: PathBuf,
    /// Write highscores to `data_dir`; otherwise keep them in memory.
    pub persist_highscores: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            initial_status: GameStatus::Paused,
            seed: None,
            max_highscores: DEFAULT_MAX_HIGHSCORES,
            data_dir: PathBuf::from(".triste"),
            persist_highscores: true,
        }
    }
}

impl GameConfig {
    /// Create from `TRISTE_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let dim = |key: &str, fallback: usize| {
            lookup(key)
                .and_then(|s| s.trim().parse::<usize>().ok())
                .filter(|v| (MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(v))
                .unwrap_or(fallback)
        };
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(false)
        };

        let initial_status = if flag("TRISTE_START_RUNNING") {
            GameStatus::Running
        } else {
            GameStatus::Paused
        };

        let seed = lookup("TRISTE_SEED").and_then(|s| s.trim().parse().ok());

        let max_highscores = lookup("TRISTE_MAX_HIGHSCORES")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|&n| n >= 1)
            .unwrap_or(defaults.max_highscores);

        let data_dir = lookup("TRISTE_DATA_DIR")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        Self {
            width: dim("TRISTE_WIDTH", defaults.width),
            height: dim("TRISTE_HEIGHT", defaults.height),
            initial_status,
            seed,
            max_highscores,
            data_dir,
            persist_highscores: !flag("TRISTE_NO_SAVE"),
        }
    }

    /// Set the board size, clamped to `MIN_BOARD_DIM..=MAX_BOARD_DIM`.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        (self.width, self.height) = self.board_size();
        self
    }

    /// `(width, height)` clamped to the accepted range; every piece fits at that width.
    pub fn board_size(&self) -> (usize, usize) {
        (
            self.width.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM),
            self.height.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM),
        )
    }

    pub fn with_initial_status(mut self, status: GameStatus) -> Self {
        self.initial_status = status;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The configured seed, or one derived from the system clock.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
    }
}
