//! Game session: the composition root.
//!
//! [`Game::start`] locates the containers, builds the paint and score surfaces
//! and the input source, wires them to the state machine and starts it. The
//! resulting [`Session`] is what the event loop feeds timer fires, key events
//! and resizes into.

use std::time::Instant;

use thiserror::Error;

use crate::config::SessionConfig;
use crate::core::{GameState, GravityTimer, SimpleRng};
use crate::input::{Input, KeyListener};
use crate::log::{EventLog, LogEvent};
use crate::term::{FrameBuffer, GameView, GridPainter, Layout, LayoutError, ScoreDisplay, Viewport};
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, NEXT_BACKGROUND, NEXT_ID, PLAYFIELD_BACKGROUND, PLAYFIELD_ID,
    PREVIEW_HEIGHT, PREVIEW_WIDTH, SCORE_FORMAT, SCORE_ID,
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("no tokio runtime available for the gravity driver")]
    NoRuntime,
}

/// The state machine wired to terminal surfaces
pub type Logic<T> = GameState<GridPainter, ScoreDisplay, T>;

/// Session builder
#[derive(Debug, Default)]
pub struct Game {
    config: SessionConfig,
    log: EventLog,
}

impl Game {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            log: EventLog::disabled(),
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    /// Build every collaborator and start the state machine.
    ///
    /// Fails before anything starts if a container does not fit `viewport`.
    pub fn start<T: GravityTimer>(
        self,
        viewport: Viewport,
        timer: T,
    ) -> Result<Session<T>, SessionError> {
        let layout = Layout::locate(viewport)?;
        let seed = self.config.resolve_seed();

        let score = ScoreDisplay::new(SCORE_ID, 0, SCORE_FORMAT);
        let playfield = GridPainter::new(
            PLAYFIELD_ID,
            BOARD_WIDTH.into(),
            BOARD_HEIGHT.into(),
            PLAYFIELD_BACKGROUND,
        );
        let next = GridPainter::new(
            NEXT_ID,
            PREVIEW_WIDTH.into(),
            PREVIEW_HEIGHT.into(),
            NEXT_BACKGROUND,
        );
        let input = Input::with_release_timeout_ms(self.config.key_release_ms);

        let mut session = Session {
            logic: GameState::new(playfield, next, score, timer, seed),
            input,
            layout: Ok(layout),
            log: self.log,
            seed,
        };
        session.log.record_event(LogEvent::SessionStarted { seed });
        session.logic.start();
        session.flush_notices();
        Ok(session)
    }
}

/// Adapts the state machine to the input source's callback slots
struct Keys<'a, T>(&'a mut Logic<T>);

impl<T: GravityTimer> KeyListener for Keys<'_, T> {
    fn on_key_down(&mut self, key: &str) {
        self.0.on_key_down(key);
    }

    fn on_key_up(&mut self, key: &str) {
        self.0.on_key_up(key);
    }
}

pub struct Session<T> {
    logic: Logic<T>,
    input: Input,
    /// Current container placement; an error while the terminal is too small
    layout: Result<Layout, LayoutError>,
    log: EventLog,
    seed: u32,
}

impl<T: GravityTimer> Session<T> {
    /// Timer callback: expire stale held keys, then let gravity run
    pub fn on_timer(&mut self, now: Instant) {
        self.input.expire(now, &mut Keys(&mut self.logic));
        self.logic.on_timer(now);
        self.flush_notices();
    }

    pub fn on_key_press(&mut self, key: &str, now: Instant) {
        self.input.press(key, now, &mut Keys(&mut self.logic));
        self.flush_notices();
    }

    /// Terminal auto-repeat of a held key; keeps it held without refiring
    pub fn on_key_repeat(&mut self, key: &str, now: Instant) {
        self.input.touch(key, now);
    }

    pub fn on_key_release(&mut self, key: &str) {
        self.input.release(key, &mut Keys(&mut self.logic));
        self.flush_notices();
    }

    /// Replace the game wholesale: new board, queue and score
    pub fn restart(&mut self) {
        self.seed = SimpleRng::new(self.seed).next_u32();
        self.input.reset();
        self.logic.reset(self.seed);
        self.log.record_event(LogEvent::SessionStarted { seed: self.seed });
        self.logic.start();
        self.flush_notices();
    }

    /// Re-locate the containers; gameplay state is untouched
    pub fn resize(&mut self, viewport: Viewport) {
        self.layout = Layout::locate(viewport);
    }

    pub fn render_into(&self, view: &GameView, fb: &mut FrameBuffer) {
        match &self.layout {
            Ok(layout) => view.render_into(
                layout,
                self.logic.playfield(),
                self.logic.preview(),
                self.logic.score_surface(),
                fb,
            ),
            Err(err) => {
                let LayoutError::ContainerNotFound {
                    viewport_w,
                    viewport_h,
                    ..
                } = *err;
                view.render_too_small(Viewport::new(viewport_w, viewport_h), err, fb);
            }
        }
    }

    fn flush_notices(&mut self) {
        for notice in self.logic.drain_notices() {
            self.log.record(&notice);
        }
    }

    pub fn logic(&self) -> &Logic<T> {
        &self.logic
    }

    pub fn logic_mut(&mut self) -> &mut Logic<T> {
        &mut self.logic
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn layout(&self) -> Result<&Layout, &LayoutError> {
        self.layout.as_ref()
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn is_game_over(&self) -> bool {
        self.logic.is_game_over()
    }

    /// Stop the gravity driver and wait for the event log to drain
    pub async fn shutdown(mut self) {
        self.logic.timer_mut().stop();
        let Session { logic, log, .. } = self;
        drop(logic);
        log.close().await;
    }
}
