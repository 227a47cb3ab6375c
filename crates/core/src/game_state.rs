//! Game state module - the engine's state machine
//!
//! This module ties together all core components: board, pieces, RNG, and scoring.
//! It is the only place that replaces the board, and every operation runs to
//! completion before the next one starts.
//!
//! # Lock protocol
//!
//! A downward step (gravity tick or soft drop) proposes `y + 1`. If the current
//! shape would collide there, the piece locks at its current `(x, y)`: it is
//! merged into the board, full rows are cleared, and then either the game ends
//! (row 0 still holds a locked cell) or the counters are updated and the
//! look-ahead piece spawns. Otherwise the piece moves down one row. A single
//! step never does both.

use crate::board::Board;
use crate::config::GameConfig;
use crate::pieces::{rotation_count, shape_of, spawn_position, Shape};
use crate::rng::PieceQueue;
use crate::scoring::ScoreCounters;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameStatus, PieceKind, Rotation};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i32,
    pub y: i32,
}

impl Tetromino {
    /// Create a new tetromino at its catalog spawn position
    pub fn new(kind: PieceKind) -> Self {
        let (x, y) = spawn_position(kind);
        Self {
            kind,
            rotation: Rotation::Up,
            x,
            y,
        }
    }

    /// Spawn on a board of the given width, pulled left if the catalog
    /// column would put the shape past the right wall.
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let mut piece = Self::new(kind);
        let max_x = board_width as i32 - piece.shape().width() as i32;
        piece.x = piece.x.min(max_x.max(0));
        piece
    }

    /// Get the shape for the current rotation
    pub fn shape(&self) -> Shape {
        shape_of(self.kind, self.rotation)
    }
}

/// What an engine operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game is not running (or the intent has no effect in this status).
    Ignored,
    /// The move or rotation would collide; nothing changed.
    Rejected,
    /// The active piece moved or rotated.
    Moved,
    /// The piece locked, lines were scored, and the next piece spawned.
    Locked { lines_cleared: usize },
    /// The lock left a block in the top row; the game is over.
    GameOver { score: u32 },
    /// The current piece was discarded in favour of the look-ahead.
    Skipped,
    Paused,
    Resumed,
    Reset,
}

/// Record of the most recent lock (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: usize,
    pub score_delta: u32,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    width: usize,
    height: usize,
    board: Board,
    active: Tetromino,
    next: PieceKind,
    status: GameStatus,
    counters: ScoreCounters,
    piece_queue: PieceQueue,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Monotonic id for spawned pieces.
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a new game with uniformly random pieces
    pub fn new(config: &GameConfig) -> Self {
        Self::with_queue(config, PieceQueue::random(config.resolved_seed()))
    }

    /// Create a new game drawing pieces from `piece_queue`
    pub fn with_queue(config: &GameConfig, mut piece_queue: PieceQueue) -> Self {
        let (width, height) = config.board_size();
        let current = piece_queue.draw();
        let next = piece_queue.draw();
        let status = match config.initial_status {
            GameStatus::Running => GameStatus::Running,
            _ => GameStatus::Paused,
        };

        Self {
            width,
            height,
            board: Board::new(width, height),
            active: Tetromino::spawn(current, width),
            next,
            status,
            counters: ScoreCounters::reset(),
            piece_queue,
            episode_id: 0,
            piece_id: 1,
            last_event: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn counters(&self) -> ScoreCounters {
        self.counters
    }

    pub fn score(&self) -> u32 {
        self.counters.score
    }

    pub fn level(&self) -> u32 {
        self.counters.level
    }

    pub fn lines(&self) -> u32 {
        self.counters.lines
    }

    /// Milliseconds between gravity ticks at the current level.
    ///
    /// Callers must re-read this after every step; it shrinks as levels rise.
    pub fn gravity_interval_ms(&self) -> u32 {
        self.counters.interval_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Apply a player intent
    pub fn apply_action(&mut self, action: GameAction) -> StepOutcome {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(),
            GameAction::Skip => self.skip(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => self.reset(),
        }
    }

    /// Gravity: one downward step, identical to a soft drop.
    pub fn tick(&mut self) -> StepOutcome {
        self.descend()
    }

    pub fn move_left(&mut self) -> StepOutcome {
        self.try_shift(-1)
    }

    pub fn move_right(&mut self) -> StepOutcome {
        self.try_shift(1)
    }

    pub fn soft_drop(&mut self) -> StepOutcome {
        self.descend()
    }

    /// Advance to the next rotation state if the rotated shape fits in place.
    pub fn rotate(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Ignored;
        }
        let active = self.active;
        let rotation = active.rotation.next(rotation_count(active.kind));
        let shape = shape_of(active.kind, rotation);
        if self.board.collides(&shape, active.x, active.y) {
            return StepOutcome::Rejected;
        }
        self.active.rotation = rotation;
        StepOutcome::Moved
    }

    /// Drop to the resting row and lock without waiting for gravity.
    pub fn hard_drop(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Ignored;
        }
        self.active.y = self.landing_y();
        self.lock()
    }

    /// Throw the current piece away and bring in the look-ahead.
    pub fn skip(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Ignored;
        }
        self.spawn_next();
        StepOutcome::Skipped
    }

    pub fn toggle_pause(&mut self) -> StepOutcome {
        match self.status {
            GameStatus::Running => {
                self.status = GameStatus::Paused;
                StepOutcome::Paused
            }
            GameStatus::Paused => {
                self.status = GameStatus::Running;
                StepOutcome::Resumed
            }
            GameStatus::GameOver => StepOutcome::Ignored,
        }
    }

    /// Start a fresh game: empty board, zero counters, new pieces, running.
    pub fn reset(&mut self) -> StepOutcome {
        let current = self.piece_queue.draw();
        self.next = self.piece_queue.draw();
        self.active = Tetromino::spawn(current, self.width);
        self.board = Board::new(self.width, self.height);
        self.counters = ScoreCounters::reset();
        self.status = GameStatus::Running;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.last_event = None;
        StepOutcome::Reset
    }

    /// Row the active piece would lock at if dropped straight down.
    pub fn landing_y(&self) -> i32 {
        let shape = self.active.shape();
        let mut y = self.active.y;
        while !self.board.collides(&shape, self.active.x, y + 1) {
            y += 1;
        }
        y
    }

    fn try_shift(&mut self, dx: i32) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Ignored;
        }
        let shape = self.active.shape();
        if self.board.collides(&shape, self.active.x + dx, self.active.y) {
            return StepOutcome::Rejected;
        }
        self.active.x += dx;
        StepOutcome::Moved
    }

    /// One atomic downward step: either move down or lock-and-spawn.
    fn descend(&mut self) -> StepOutcome {
        if !self.is_running() {
            return StepOutcome::Ignored;
        }
        let shape = self.active.shape();
        if self.board.collides(&shape, self.active.x, self.active.y + 1) {
            return self.lock();
        }
        self.active.y += 1;
        StepOutcome::Moved
    }

    /// Merge the active piece, clear lines, then end the game or spawn.
    fn lock(&mut self) -> StepOutcome {
        let active = self.active;
        let merged = self.board.merge(&active.shape(), active.x, active.y);
        let (board, lines_cleared) = merged.clear_lines();
        self.board = board;

        if self.board.row_occupied(0) {
            self.status = GameStatus::GameOver;
            self.last_event = Some(LockEvent {
                kind: active.kind,
                lines_cleared,
                score_delta: 0,
                game_over: true,
            });
            return StepOutcome::GameOver {
                score: self.counters.score,
            };
        }

        let before = self.counters.score;
        self.counters = self.counters.apply_line_clear(lines_cleared);
        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared,
            score_delta: self.counters.score - before,
            game_over: false,
        });
        self.spawn_next();
        StepOutcome::Locked { lines_cleared }
    }

    /// The look-ahead becomes current and a new look-ahead is drawn.
    fn spawn_next(&mut self) {
        self.active = Tetromino::spawn(self.next, self.width);
        self.next = self.piece_queue.draw();
        self.piece_id = self.piece_id.wrapping_add(1);
    }

    /// Read-only copy of everything the presentation layer draws.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            status: self.status,
            board: self.board.clone(),
            active: ActiveSnapshot::from(self.active),
            ghost_y: self.landing_y(),
            next: self.next,
            lines: self.counters.lines,
            level: self.counters.level,
            score: self.counters.score,
            interval_ms: self.counters.interval_ms,
            episode_id: self.episode_id,
            piece_id: self.piece_id,
            highscores: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MIN_BOARD_DIM;

    const BOTH_STARTS: [GameStatus; 2] = [GameStatus::Paused, GameStatus::Running];

    fn config(initial: GameStatus) -> GameConfig {
        GameConfig::default()
            .with_initial_status(initial)
            .with_seed(12345)
    }

    fn running_with(kinds: &[PieceKind]) -> GameState {
        GameState::with_queue(
            &config(GameStatus::Running),
            PieceQueue::scripted(kinds.to_vec()),
        )
    }

    fn started(initial: GameStatus) -> GameState {
        let mut state = GameState::new(&config(initial));
        if state.status() == GameStatus::Paused {
            state.toggle_pause();
        }
        state
    }

    #[test]
    fn test_new_game_state() {
        for initial in BOTH_STARTS {
            let state = GameState::new(&config(initial));

            assert_eq!(state.status, initial);
            assert_eq!(state.counters, ScoreCounters::reset());
            assert_eq!(state.episode_id, 0);
            assert_eq!(state.board.width(), 10);
            assert_eq!(state.board.height(), 20);
            assert!(state.board.cells().iter().all(|&c| c == 0));
            assert_eq!(state.active.rotation, Rotation::Up);
            assert_eq!(state.active.y, -1);
        }
    }

    #[test]
    fn game_over_initial_status_is_coerced_to_paused() {
        let state = GameState::new(&config(GameStatus::GameOver));
        assert_eq!(state.status, GameStatus::Paused);
    }

    #[test]
    fn test_tetromino_new() {
        let piece = Tetromino::new(PieceKind::T);

        assert_eq!(piece.kind, PieceKind::T);
        assert_eq!(piece.rotation, Rotation::Up);
        assert_eq!(piece.x, 4);
        assert_eq!(piece.y, -1);
    }

    #[test]
    fn spawn_fits_narrow_boards() {
        let piece = Tetromino::spawn(PieceKind::T, 5);
        assert_eq!(piece.x, 2);
        let piece = Tetromino::spawn(PieceKind::I, 4);
        assert_eq!(piece.x, 0);
        let piece = Tetromino::spawn(PieceKind::I, 10);
        assert_eq!(piece.x, 3);
    }

    #[test]
    fn every_kind_spawns_clear_on_the_narrowest_board() {
        for width in [0, 3, MIN_BOARD_DIM] {
            for kind in PieceKind::ALL {
                let mut cfg = config(GameStatus::Running);
                cfg.width = width;
                let state = GameState::with_queue(&cfg, PieceQueue::scripted(vec![kind]));
                let active = state.active();

                assert_eq!(state.board().width(), MIN_BOARD_DIM);
                assert!(
                    !state.board().collides(&active.shape(), active.x, active.y),
                    "{:?} collides at width {}",
                    kind,
                    width
                );
            }
        }

        let cfg = config(GameStatus::Running).with_size(3, 20);
        let state = GameState::with_queue(&cfg, PieceQueue::scripted(vec![PieceKind::I]));
        let active = state.active();
        assert!(!state.board().collides(&active.shape(), active.x, active.y));
    }

    #[test]
    fn paused_game_ignores_play_intents() {
        let mut state = GameState::new(&config(GameStatus::Paused));
        let before = state.active;

        assert_eq!(state.move_left(), StepOutcome::Ignored);
        assert_eq!(state.move_right(), StepOutcome::Ignored);
        assert_eq!(state.rotate(), StepOutcome::Ignored);
        assert_eq!(state.soft_drop(), StepOutcome::Ignored);
        assert_eq!(state.hard_drop(), StepOutcome::Ignored);
        assert_eq!(state.skip(), StepOutcome::Ignored);
        assert_eq!(state.tick(), StepOutcome::Ignored);

        assert_eq!(state.active, before);
    }

    #[test]
    fn toggle_pause_round_trips() {
        let mut state = GameState::new(&config(GameStatus::Paused));
        assert_eq!(state.toggle_pause(), StepOutcome::Resumed);
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.toggle_pause(), StepOutcome::Paused);
        assert_eq!(state.status, GameStatus::Paused);
    }

    #[test]
    fn test_try_move() {
        for initial in BOTH_STARTS {
            let mut state = started(initial);
            let initial_x = state.active.x;

            assert_eq!(state.move_right(), StepOutcome::Moved);
            assert_eq!(state.active.x, initial_x + 1);

            assert_eq!(state.move_left(), StepOutcome::Moved);
            assert_eq!(state.active.x, initial_x);
        }
    }

    #[test]
    fn moves_stop_at_the_walls() {
        let mut state = running_with(&[PieceKind::O]);
        // O spawns at x=4 and is 2 wide: 4 steps to the left wall, 4 to the right.
        let mut moved = 0;
        for _ in 0..10 {
            if state.move_left() == StepOutcome::Moved {
                moved += 1;
            }
        }
        assert_eq!(moved, 4);
        assert_eq!(state.active.x, 0);
        assert_eq!(state.move_left(), StepOutcome::Rejected);

        for _ in 0..20 {
            state.move_right();
        }
        assert_eq!(state.active.x, 8);
    }

    #[test]
    fn rotation_is_a_closed_cycle() {
        for kind in PieceKind::ALL {
            let mut state = running_with(&[kind]);
            // Move away from the top so every state fits.
            for _ in 0..5 {
                state.soft_drop();
            }
            let start = state.active;
            for _ in 0..rotation_count(kind) {
                assert_eq!(state.rotate(), StepOutcome::Moved);
            }
            assert_eq!(state.active, start, "{:?}", kind);
        }
    }

    #[test]
    fn rotation_blocked_by_locked_cells_is_rejected() {
        let mut state = running_with(&[PieceKind::I]);
        state.soft_drop();
        state.soft_drop();
        // I (Up) at (3, 1) covers row 2; the Right state needs column 5 rows 1..=4.
        state.board.set(5, 4, 3);
        assert_eq!(state.rotate(), StepOutcome::Rejected);
        assert_eq!(state.active.rotation, Rotation::Up);
    }

    #[test]
    fn o_piece_locks_on_the_floor() {
        let mut state = running_with(&[PieceKind::O, PieceKind::T]);
        assert_eq!(state.active.kind, PieceKind::O);
        assert_eq!((state.active.x, state.active.y), (4, -1));
        let next = state.next;

        for _ in 0..19 {
            assert_eq!(state.soft_drop(), StepOutcome::Moved);
        }
        assert_eq!(state.active.y, 18);

        assert_eq!(state.soft_drop(), StepOutcome::Locked { lines_cleared: 0 });
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(state.board.get(x, y), Some(4));
        }
        assert_eq!(state.board.cells().iter().filter(|&&c| c != 0).count(), 4);
        assert_eq!(state.active.kind, next);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn vertical_i_clears_the_bottom_row() {
        let mut state = running_with(&[PieceKind::I, PieceKind::O]);
        for x in 0..9 {
            state.board.set(x, 19, 2);
        }

        assert_eq!(state.rotate(), StepOutcome::Moved);
        // Right state occupies column x + 2; the gap is column 9.
        for _ in 0..4 {
            assert_eq!(state.move_right(), StepOutcome::Moved);
        }
        assert_eq!(state.active.x + 2, 9);

        let mut outcome = StepOutcome::Moved;
        while outcome == StepOutcome::Moved {
            outcome = state.soft_drop();
        }

        assert_eq!(outcome, StepOutcome::Locked { lines_cleared: 1 });
        assert_eq!(state.lines(), 1);
        assert_eq!(state.level(), 0);
        assert_eq!(state.score(), 40);
        // The three I cells above the cleared row shifted down by one.
        for y in 17..20 {
            assert_eq!(state.board.get(9, y), Some(1));
        }
        assert!(!state.board.row_occupied(16));
        assert_eq!(state.active.kind, PieceKind::O);

        let ev = state.take_last_event().unwrap();
        assert_eq!(ev.lines_cleared, 1);
        assert_eq!(ev.score_delta, 40);
        assert!(!ev.game_over);
    }

    #[test]
    fn one_step_locks_once_and_spawns_once() {
        let mut state = running_with(&[PieceKind::T, PieceKind::L, PieceKind::S]);
        // Full-width obstruction at row 10 (leave one gap so it is not cleared).
        for x in 1..10 {
            state.board.set(x, 10, 5);
        }
        // T (Up) bottom row is row y + 1; rest it right above the obstruction.
        while !state
            .board
            .collides(&state.active.shape(), state.active.x, state.active.y + 1)
        {
            state.active.y += 1;
        }
        assert_eq!(state.active.y, 8);
        let piece_id = state.piece_id;

        assert_eq!(state.tick(), StepOutcome::Locked { lines_cleared: 0 });

        assert_eq!(state.piece_id, piece_id + 1);
        assert_eq!(state.active.kind, PieceKind::L);
        assert_eq!(state.next, PieceKind::S);
        assert_eq!(state.active.y, -1);
        assert_eq!(state.board.cells().iter().filter(|&&c| c == 6).count(), 4);
    }

    #[test]
    fn lock_touching_row_zero_ends_the_game() {
        let mut state = running_with(&[PieceKind::O]);
        // Columns 0 and 4 are filled from row 1 down, so the O rests on rows -1..=0.
        for y in 1..20 {
            state.board.set(4, y, 3);
            state.board.set(0, y, 3);
        }
        state.counters = state.counters.apply_line_clear(1);

        let outcome = state.soft_drop();

        assert_eq!(outcome, StepOutcome::GameOver { score: 40 });
        assert_eq!(state.status, GameStatus::GameOver);
        // The merge is kept for display.
        assert_eq!(state.board.get(4, 0), Some(4));
        assert!(state.take_last_event().unwrap().game_over);

        // Terminal until reset.
        assert_eq!(state.toggle_pause(), StepOutcome::Ignored);
        assert_eq!(state.move_left(), StepOutcome::Ignored);
        assert_eq!(state.tick(), StepOutcome::Ignored);
        assert_eq!(state.status, GameStatus::GameOver);
    }

    #[test]
    fn hard_drop_locks_at_the_landing_row() {
        let mut state = running_with(&[PieceKind::O, PieceKind::I]);
        assert_eq!(state.landing_y(), 18);
        assert_eq!(state.hard_drop(), StepOutcome::Locked { lines_cleared: 0 });
        assert_eq!(state.board.get(4, 19), Some(4));
        assert_eq!(state.active.kind, PieceKind::I);
    }

    #[test]
    fn skip_discards_without_locking() {
        let mut state = running_with(&[PieceKind::S, PieceKind::Z, PieceKind::J]);
        assert_eq!(state.skip(), StepOutcome::Skipped);
        assert_eq!(state.active.kind, PieceKind::Z);
        assert_eq!(state.next, PieceKind::J);
        assert!(state.board.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn reset_starts_a_fresh_running_game() {
        for initial in BOTH_STARTS {
            let mut state = started(initial);
            state.hard_drop();
            state.counters = state.counters.apply_line_clear(4);
            state.status = GameStatus::GameOver;

            assert_eq!(state.reset(), StepOutcome::Reset);

            assert_eq!(state.status, GameStatus::Running);
            assert_eq!(state.counters, ScoreCounters::reset());
            assert!(state.board.cells().iter().all(|&c| c == 0));
            assert_eq!(state.active.rotation, Rotation::Up);
            assert_eq!(state.episode_id, 1);
        }
    }

    #[test]
    fn counters_are_monotonic_during_play() {
        let mut state = started(GameStatus::Running);
        let mut prev = state.counters;
        for i in 0..2000 {
            let action = match i % 5 {
                0 => GameAction::MoveLeft,
                1 => GameAction::RotateCw,
                2 => GameAction::MoveRight,
                3 => GameAction::SoftDrop,
                _ => GameAction::HardDrop,
            };
            if let StepOutcome::GameOver { .. } = state.apply_action(action) {
                break;
            }
            let now = state.counters;
            assert!(now.lines >= prev.lines);
            assert!(now.level >= prev.level);
            assert!(now.score >= prev.score);
            prev = now;
        }
    }

    #[test]
    fn active_piece_never_collides_after_accepted_steps() {
        let mut state = started(GameStatus::Paused);
        for i in 0..3000 {
            let action = match (i * 7) % 6 {
                0 => GameAction::MoveLeft,
                1 => GameAction::RotateCw,
                2 => GameAction::MoveRight,
                3 => GameAction::SoftDrop,
                4 => GameAction::SoftDrop,
                _ => GameAction::HardDrop,
            };
            state.apply_action(action);
            if state.status == GameStatus::GameOver {
                state.reset();
                continue;
            }
            let a = state.active;
            assert!(!state.board.collides(&a.shape(), a.x, a.y));
        }
    }

    #[test]
    fn gravity_interval_tracks_level() {
        let mut state = started(GameStatus::Running);
        assert_eq!(state.gravity_interval_ms(), 883);
        state.counters = state
            .counters
            .apply_line_clear(4)
            .apply_line_clear(4)
            .apply_line_clear(2);
        assert_eq!(state.level(), 1);
        assert_eq!(state.gravity_interval_ms(), 816);
    }

    #[test]
    fn snapshot_mirrors_state() {
        let state = running_with(&[PieceKind::T, PieceKind::I]);
        let snap = state.snapshot();
        assert_eq!(snap.status, GameStatus::Running);
        assert_eq!(snap.active.kind, PieceKind::T);
        assert_eq!(snap.next, PieceKind::I);
        assert_eq!(snap.board, state.board);
        assert_eq!(snap.ghost_y, 18);
        assert_eq!(snap.interval_ms, 883);
    }
}
