//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, session driver).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (the engine accepts any width/height):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 on top)
//!
//! # Drop Intervals by Level
//!
//! Gravity follows the classic handheld drop-speed curve. Each entry is
//! `floor(1000 * frames / 60)` milliseconds per row:
//!
//! | Level | Frames | Interval |
//! |-------|--------|----------|
//! | 0 | 53 | 883ms |
//! | 1 | 49 | 816ms |
//! | 5 | 33 | 550ms |
//! | 10 | 10 | 166ms |
//! | 22+ | 1 | 16ms |
//!
//! # Examples
//!
//! ```
//! use triste_types::{GameAction, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color(), 6);
//!
//! assert_eq!(Rotation::Up.next(4), Rotation::Right);
//! assert_eq!(Rotation::Up.next(1), Rotation::Up);
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Smallest accepted board dimension.
pub const MIN_BOARD_DIM: usize = 4;

/// Largest accepted board dimension.
pub const MAX_BOARD_DIM: usize = 40;

/// Default number of highscore rows kept by the ledger.
pub const DEFAULT_MAX_HIGHSCORES: usize = 5;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity intervals by level (milliseconds per row).
///
/// Index 0 = level 0, index 22 = level 22+. Derived from a 60 frames-per-second
/// reference rate; values are truncated, not rounded.
pub const DROP_INTERVALS: [u32; 23] = [
    883, 816, 750, 683, 616, 550, 466, 366, 283, 183, 166, 150, 133, 116, 100, 100, 83, 83, 66,
    66, 50, 33, 16,
];

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A cell on the game board.
///
/// `0` is empty; `1..=7` is a locked cell carrying the color tag of the piece
/// kind that produced it (see [`PieceKind::color`]).
pub type Cell = u8;

/// Empty board cell.
pub const EMPTY: Cell = 0;

/// The seven tetromino piece kinds
///
/// Declaration order matches the color tags:
/// - **I** = 1, **J** = 2, **L** = 3, **O** = 4, **S** = 5, **T** = 6, **Z** = 7
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use triste_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter used by the preview panel.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Color tag written into locked board cells (1-7).
    pub fn color(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color`].
    pub fn from_color(cell: Cell) -> Option<Self> {
        match cell {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Discrete rotation states
///
/// The cycle goes: Up → Right → Down → Left → Up. Kinds with fewer
/// states (the O piece has one) wrap earlier, see [`Rotation::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Rotation {
    /// Rotation state for a table index (taken modulo 4).
    pub fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::Up,
            1 => Rotation::Right,
            2 => Rotation::Down,
            _ => Rotation::Left,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Rotation::Up => 0,
            Rotation::Right => 1,
            Rotation::Down => 2,
            Rotation::Left => 3,
        }
    }

    /// Advance one step clockwise within a cycle of `count` states.
    ///
    /// # Examples
    ///
    /// ```
    /// use triste_types::Rotation;
    ///
    /// assert_eq!(Rotation::Left.next(4), Rotation::Up);
    /// assert_eq!(Rotation::Right.next(2), Rotation::Up);
    /// ```
    pub fn next(&self, count: usize) -> Self {
        let count = count.clamp(1, 4);
        Rotation::from_index((self.index() + 1) % count)
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::Up => "up",
            Rotation::Right => "right",
            Rotation::Down => "down",
            Rotation::Left => "left",
        }
    }
}

/// Lifecycle status of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    Running,
    #[default]
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Running => "Playing",
            GameStatus::Paused => "Paused",
            GameStatus::GameOver => "Game Over",
        }
    }
}

/// Player intents accepted by the engine
///
/// Each intent is a zero-argument command; intents that make no sense in the
/// current status are ignored by the engine rather than rejected with an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, locking it if it cannot descend
    SoftDrop,
    /// Drop piece to its resting row and lock it immediately
    HardDrop,
    /// Advance to the next rotation state
    RotateCw,
    /// Discard the current piece and bring in the look-ahead (cheat)
    Skip,
    /// Toggle pause state
    Pause,
    /// Restart the game (when game over or at any time)
    Restart,
}

impl GameAction {
    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use triste_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" | "rotate" => Some(GameAction::RotateCw),
            "skip" => Some(GameAction::Skip),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::Skip => "skip",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_intervals_follow_sixty_hz_frames() {
        let frames = [
            53u32, 49, 45, 41, 37, 33, 28, 22, 17, 11, 10, 9, 8, 7, 6, 6, 5, 5, 4, 4, 3, 2, 1,
        ];
        for (level, f) in frames.iter().enumerate() {
            assert_eq!(DROP_INTERVALS[level], 1000 * f / 60, "level {}", level);
        }
    }

    #[test]
    fn drop_intervals_never_increase() {
        for pair in DROP_INTERVALS.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn color_tags_round_trip_through_kinds() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.color() as usize, i + 1);
            assert_eq!(PieceKind::from_color(kind.color()), Some(*kind));
        }
        assert_eq!(PieceKind::from_color(EMPTY), None);
        assert_eq!(PieceKind::from_color(8), None);
    }

    #[test]
    fn rotation_cycles_respect_state_count() {
        let mut r = Rotation::Up;
        for _ in 0..4 {
            r = r.next(4);
        }
        assert_eq!(r, Rotation::Up);
        assert_eq!(Rotation::Up.next(1), Rotation::Up);
        assert_eq!(Rotation::Up.next(2), Rotation::Right);
        assert_eq!(Rotation::Right.next(2), Rotation::Up);
    }

    #[test]
    fn default_status_is_paused() {
        assert_eq!(GameStatus::default(), GameStatus::Paused);
    }
}
