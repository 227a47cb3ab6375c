//! Session driver - runs a game on a tokio task
//!
//! The engine in `triste-core` is synchronous and has no notion of time. This
//! crate supplies the two stimuli it reacts to:
//!
//! - **Intents**: [`GameAction`](crate::types::GameAction)s arriving on a bounded
//!   `tokio::sync::mpsc` channel (the terminal input thread sends into it).
//! - **Gravity**: a `tokio::time::sleep_until` deadline at the current level's
//!   interval.
//!
//! Snapshots are published on a `tokio::sync::watch` channel for renderers.
//! Dropping every intent sender ends the session and returns it to the caller,
//! ledger included.
//!
//! # Example
//!
//! ```no_run
//! use triste_core::{GameConfig, Session};
//! use triste_session::{SessionHandle, INTENT_QUEUE};
//! use triste_types::GameAction;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let session = Session::from_config(&GameConfig::from_env());
//! let handle = SessionHandle::spawn(session, INTENT_QUEUE);
//! handle.send(GameAction::Pause).await?;
//! let session = handle.shutdown().await?;
//! println!("best: {}", session.ledger().best());
//! # Ok(())
//! # }
//! ```

pub mod driver;

pub use triste_core as core;
pub use triste_types as types;

pub use driver::{run, SessionHandle, INTENT_QUEUE};
