//! Session module - one engine plus the process-wide highscore ledger
//!
//! The engine reports a finished game through [`StepOutcome::GameOver`]; the
//! session forwards that score to the ledger exactly once. Resets start a new
//! game on the same ledger.

use crate::config::GameConfig;
use crate::game_state::{GameState, StepOutcome};
use crate::highscores::{FileStore, HighscoreLedger};
use crate::rng::PieceQueue;
use crate::snapshot::GameSnapshot;
use crate::types::GameAction;

#[derive(Debug)]
pub struct Session {
    game: GameState,
    ledger: HighscoreLedger,
}

impl Session {
    pub fn new(game: GameState, ledger: HighscoreLedger) -> Self {
        Self { game, ledger }
    }

    /// Build the engine and ledger described by `config`.
    ///
    /// Highscores live in `<data_dir>/highscores.json` unless persistence is off.
    pub fn from_config(config: &GameConfig) -> Self {
        let ledger = if config.persist_highscores {
            HighscoreLedger::load(
                Box::new(FileStore::new(config.data_dir.clone())),
                config.max_highscores,
            )
        } else {
            HighscoreLedger::in_memory(config.max_highscores)
        };
        Self::new(GameState::new(config), ledger)
    }

    /// In-memory session replaying a fixed piece sequence.
    pub fn scripted(config: &GameConfig, queue: PieceQueue) -> Self {
        Self::new(
            GameState::with_queue(config, queue),
            HighscoreLedger::in_memory(config.max_highscores),
        )
    }

    pub fn apply(&mut self, action: GameAction) -> StepOutcome {
        let outcome = self.game.apply_action(action);
        self.record(outcome);
        outcome
    }

    pub fn tick(&mut self) -> StepOutcome {
        let outcome = self.game.tick();
        self.record(outcome);
        outcome
    }

    fn record(&mut self, outcome: StepOutcome) {
        if let StepOutcome::GameOver { score } = outcome {
            self.ledger.add(score);
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn ledger(&self) -> &HighscoreLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut HighscoreLedger {
        &mut self.ledger
    }

    pub fn gravity_interval_ms(&self) -> u32 {
        self.game.gravity_interval_ms()
    }

    /// Engine snapshot with the ledger attached.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = self.game.snapshot();
        snap.highscores = self.ledger.entries().to_vec();
        snap
    }

    pub fn into_parts(self) -> (GameState, HighscoreLedger) {
        (self.game, self.ledger)
    }
}
