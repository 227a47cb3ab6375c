//! Terminal input module (engine-facing).
//!
//! This module is independent of the renderer. It maps `crossterm` key events
//! into [`crate::types::GameAction`] intents. Held keys rely on the terminal's
//! own auto-repeat, so repeat events are treated like presses.

pub mod map;

pub use triste_types as types;

pub use map::{handle_key_event, is_actionable, should_quit};
