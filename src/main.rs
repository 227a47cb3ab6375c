//! Terminal runner (default binary).
//!
//! The game runs on a tokio task (see `triste::session`). A blocking thread reads
//! crossterm events and forwards intents; the main task redraws whenever a new
//! snapshot is published or the terminal is resized.

use std::thread;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tokio::sync::mpsc;

use triste::core::{GameConfig, Session};
use triste::input::{handle_key_event, is_actionable, should_quit};
use triste::session::{SessionHandle, INTENT_QUEUE};
use triste::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use triste::types::GameAction;

/// Events from the input thread that the render loop cares about.
enum UiEvent {
    Resize,
    Quit,
    InputFailed(anyhow::Error),
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = GameConfig::from_env();
    let session = Session::from_config(&config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session).await;

    // Always try to restore terminal state.
    let _ = term.exit();

    let mut session = result?;
    report(&config, &mut session);
    Ok(())
}

async fn run(term: &mut TerminalRenderer, session: Session) -> Result<Session> {
    let handle = SessionHandle::spawn(session, INTENT_QUEUE);
    let mut snapshots = handle.snapshots();

    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    spawn_input_thread(handle.intents(), ui_tx);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut input_error = None;

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        {
            let snap = snapshots.borrow_and_update();
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
        }
        term.draw_swap(&mut fb)?;

        tokio::select! {
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            ui = ui_rx.recv() => match ui {
                Some(UiEvent::Resize) => term.invalidate(),
                Some(UiEvent::Quit) | None => break,
                Some(UiEvent::InputFailed(e)) => {
                    input_error = Some(e);
                    break;
                }
            },
        }
    }

    let session = handle.shutdown().await?;
    match input_error {
        Some(e) => Err(e),
        None => Ok(session),
    }
}

/// Read terminal events on a dedicated thread; `event::read` blocks.
///
/// The thread exits (dropping its intent sender) on quit, on a read error, or
/// once the session stops accepting intents.
fn spawn_input_thread(intents: mpsc::Sender<GameAction>, ui: mpsc::UnboundedSender<UiEvent>) {
    thread::spawn(move || loop {
        let ev = match event::read().context("failed to read terminal input") {
            Ok(ev) => ev,
            Err(e) => {
                let _ = ui.send(UiEvent::InputFailed(e));
                return;
            }
        };

        match ev {
            Event::Key(key) if is_actionable(key.kind) => {
                if should_quit(key) {
                    let _ = ui.send(UiEvent::Quit);
                    return;
                }
                if let Some(action) = handle_key_event(key) {
                    if intents.blocking_send(action).is_err() {
                        return;
                    }
                }
            }
            Event::Resize(..) => {
                if ui.send(UiEvent::Resize).is_err() {
                    return;
                }
            }
            _ => {}
        }
    });
}

/// Summary lines, printed after the terminal is restored.
fn report(config: &GameConfig, session: &mut Session) {
    let game = session.game();
    eprintln!(
        "[Triste] Final score {} (level {}, {} lines)",
        game.score(),
        game.level(),
        game.lines()
    );
    eprintln!("[Highscores] Best {}", session.ledger().best());
    if config.persist_highscores {
        eprintln!("[Highscores] Stored in {}", config.data_dir.display());
    }
    if let Some(e) = session.ledger_mut().take_persist_error() {
        eprintln!("[Highscores] Warning: {:#}", e);
    }
}
