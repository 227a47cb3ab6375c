//! Triste (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration
//! tests and benches can write `triste::{core,session,term,input,types}`.

pub use triste_core as core;
pub use triste_input as input;
pub use triste_session as session;
pub use triste_term as term;
pub use triste_types as types;
