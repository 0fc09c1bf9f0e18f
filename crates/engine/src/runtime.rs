//! Event loop: bridges the blocking terminal reader and the async timer and
//! log tasks into one ordered stream of [`HostEvent`]s.
//!
//! Everything that touches game state runs on the loop task, one event at a
//! time, and every event is followed by a redraw.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal;
use tokio::sync::mpsc;

use crate::config::SessionConfig;
use crate::driver::IntervalDriver;
use crate::event::HostEvent;
use crate::input::{is_restart, key_id, should_quit};
use crate::log::EventLog;
use crate::session::{Game, Session};
use crate::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Run a game session until the player quits or input closes.
///
/// The renderer must already be in the alternate screen; restoring the
/// terminal is left to the caller.
pub fn run<W: Write>(renderer: &mut TerminalRenderer<W>, config: SessionConfig) -> Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;
    rt.block_on(event_loop(renderer, config))
}

async fn event_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    config: SessionConfig,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<HostEvent>();
    spawn_terminal_reader(tx.clone());

    let log = match config.log_path.as_deref() {
        Some(path) => EventLog::spawn(path),
        None => EventLog::disabled(),
    };
    let (w, h) = terminal::size().unwrap_or((80, 24));
    let timer = IntervalDriver::current(tx)?;
    let mut session = Game::new(config)
        .with_log(log)
        .start(Viewport::new(w, h), timer)?;

    let result = drive(renderer, &mut session, &mut rx).await;
    session.shutdown().await;
    result
}

async fn drive<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    session: &mut Session<IntervalDriver>,
    rx: &mut mpsc::UnboundedReceiver<HostEvent>,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    session.render_into(&view, &mut fb);
    renderer.draw_swap(&mut fb)?;

    while let Some(event) = rx.recv().await {
        match event {
            HostEvent::Timer(now) => session.on_timer(now),
            HostEvent::Terminal(Event::Key(key)) => {
                if !handle_key(session, key) {
                    return Ok(());
                }
            }
            HostEvent::Terminal(Event::Resize(w, h)) => {
                session.resize(Viewport::new(w, h));
                renderer.invalidate();
            }
            HostEvent::Terminal(_) => continue,
            HostEvent::InputClosed => return Ok(()),
        }

        session.render_into(&view, &mut fb);
        renderer.draw_swap(&mut fb)?;
    }
    Ok(())
}

/// Route one key event; false means quit
fn handle_key(session: &mut Session<IntervalDriver>, key: KeyEvent) -> bool {
    let now = Instant::now();
    match key.kind {
        KeyEventKind::Press => {
            if should_quit(key) {
                return false;
            }
            if session.is_game_over() && is_restart(key) {
                session.restart();
            } else if let Some(id) = key_id(key.code) {
                session.on_key_press(&id, now);
            }
        }
        KeyEventKind::Repeat => {
            if let Some(id) = key_id(key.code) {
                session.on_key_repeat(&id, now);
            }
        }
        KeyEventKind::Release => {
            if let Some(id) = key_id(key.code) {
                session.on_key_release(&id);
            }
        }
    }
    true
}

/// Forward blocking `crossterm` reads into the loop channel
fn spawn_terminal_reader(tx: mpsc::UnboundedSender<HostEvent>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(HostEvent::Terminal(ev)).is_err() {
                    break;
                }
            }
            Err(_) => {
                let _ = tx.send(HostEvent::InputClosed);
                break;
            }
        }
    });
}
