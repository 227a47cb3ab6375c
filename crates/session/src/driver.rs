//! Session driver - serializes intents and gravity on one task.
//!
//! Both stimuli are funnelled through a single `tokio::select!` loop, so every
//! engine operation runs to completion before the next one starts. Gravity is a
//! deadline re-armed after each tick and whenever the level changes the
//! interval.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::core::{GameSnapshot, Session};
use crate::types::GameAction;

/// Default capacity of the intent channel.
pub const INTENT_QUEUE: usize = 64;

/// Run `session` until every intent sender is dropped, then hand it back.
///
/// A snapshot is published after every intent and every gravity tick.
pub async fn run(
    mut session: Session,
    mut intents: mpsc::Receiver<GameAction>,
    snapshots: watch::Sender<GameSnapshot>,
) -> Session {
    let mut interval_ms = session.gravity_interval_ms();
    let mut deadline = Instant::now() + gravity(interval_ms);

    loop {
        tokio::select! {
            biased;

            intent = intents.recv() => {
                let Some(action) = intent else {
                    break;
                };
                session.apply(action);
            }
            _ = sleep_until(deadline) => {
                session.tick();
                deadline = Instant::now() + gravity(session.gravity_interval_ms());
            }
        }

        let current = session.gravity_interval_ms();
        if current != interval_ms {
            interval_ms = current;
            deadline = Instant::now() + gravity(interval_ms);
        }

        snapshots.send_replace(session.snapshot());
    }

    session
}

fn gravity(interval_ms: u32) -> Duration {
    Duration::from_millis(u64::from(interval_ms))
}

/// A driver task running on the current tokio runtime.
#[derive(Debug)]
pub struct SessionHandle {
    intents: mpsc::Sender<GameAction>,
    snapshots: watch::Receiver<GameSnapshot>,
    task: JoinHandle<Session>,
}

impl SessionHandle {
    /// Spawn the driver for `session` with an intent queue of `capacity`.
    pub fn spawn(session: Session, capacity: usize) -> Self {
        let (intent_tx, intent_rx) = mpsc::channel(capacity.max(1));
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let task = tokio::spawn(run(session, intent_rx, snapshot_tx));

        Self {
            intents: intent_tx,
            snapshots: snapshot_rx,
            task,
        }
    }

    /// Sender for player intents. The session ends once every clone is dropped.
    pub fn intents(&self) -> mpsc::Sender<GameAction> {
        self.intents.clone()
    }

    pub fn snapshots(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Queue one intent.
    pub async fn send(&self, action: GameAction) -> Result<()> {
        self.intents
            .send(action)
            .await
            .context("session driver has stopped")
    }

    /// Drop this handle's sender and wait for the driver to return the session.
    pub async fn shutdown(self) -> Result<Session> {
        drop(self.intents);
        self.task.await.context("session driver task failed")
    }
}
