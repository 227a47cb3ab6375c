//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget/layout libraries and renders into a plain framebuffer that is diffed
//! and flushed to the terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: pure snapshot-to-framebuffer mapping (testable without a tty)
//! - [`renderer`]: raw-mode terminal session with diff flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use triste_core as core;
pub use triste_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
