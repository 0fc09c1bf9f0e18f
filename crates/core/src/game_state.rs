//! Game state module - the tick-driven state machine
//!
//! Owns the board, the falling piece, the bag queue and the session counters,
//! and reaches the outside world only through the collaborator traits in
//! [`crate::surface`]. Every external stimulus (timer fire, key press) becomes
//! a [`GameEvent`] that goes through the handler of the current
//! [`MachineState`]; handlers may raise a follow-up event, and dispatch always
//! ends with a repaint.

use std::time::{Duration, Instant};

use crate::board::Board;
use crate::levels::delay_for_level;
use crate::piece::FallingPiece;
use crate::pieces;
use crate::rng::PieceQueue;
use crate::scoring::{level_for_lines, line_clear_points, lock_points};
use crate::surface::{GravityTimer, PaintSurface, ScoreSurface};
use crate::types::{
    keys, GameEvent, GameNotice, LockKind, MachineState, PieceKind, Rgb, GAME_OVER_FORMAT,
    MIN_LEVEL, SCORE_FORMAT, TICK_MS,
};

/// Period of the external gravity driver
pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_MS as u64);

pub struct GameState<P, S, T> {
    board: Board,
    falling: Option<FallingPiece>,
    queue: PieceQueue,
    next: PieceKind,
    state: MachineState,
    score: u32,
    level: u32,
    lines: u32,
    /// When gravity last applied; None makes the next timer fire a gravity tick
    last_gravity: Option<Instant>,
    /// Opened by a successful gravity step, closed on every spawn
    rotation_allowed: bool,
    notices: Vec<GameNotice>,
    playfield: P,
    preview: P,
    score_surface: S,
    timer: T,
}

impl<P, S, T> GameState<P, S, T>
where
    P: PaintSurface,
    S: ScoreSurface,
    T: GravityTimer,
{
    pub fn new(playfield: P, preview: P, score_surface: S, timer: T, seed: u32) -> Self {
        let mut queue = PieceQueue::new(seed);
        let next = queue.draw();
        Self {
            board: Board::new(),
            falling: None,
            queue,
            next,
            state: MachineState::SpawnDelay,
            score: 0,
            level: MIN_LEVEL,
            lines: 0,
            last_gravity: None,
            rotation_allowed: false,
            notices: Vec::new(),
            playfield,
            preview,
            score_surface,
            timer,
        }
    }

    /// Reset the score display, start the gravity driver and paint the empty field.
    ///
    /// The machine starts in `SpawnDelay`, so the first timer fire spawns.
    pub fn start(&mut self) {
        self.state = MachineState::SpawnDelay;
        self.last_gravity = None;
        self.score_surface.set_format(SCORE_FORMAT);
        self.score_surface.set_value(self.score);
        self.timer.start(TICK_PERIOD);
        self.repaint();
    }

    /// Discard the current game and set up a fresh one with `seed`.
    ///
    /// Board, queue and counters are replaced; the surfaces and timer are kept.
    /// The timer stays stopped until the next [`GameState::start`].
    pub fn reset(&mut self, seed: u32) {
        self.timer.stop();
        self.board = Board::new();
        self.falling = None;
        self.queue = PieceQueue::new(seed);
        self.next = self.queue.draw();
        self.state = MachineState::SpawnDelay;
        self.score = 0;
        self.level = MIN_LEVEL;
        self.lines = 0;
        self.last_gravity = None;
        self.rotation_allowed = false;
        self.notices.clear();
    }

    /// Gravity driver callback; raises `Tick` once the level's delay has elapsed
    pub fn on_timer(&mut self, now: Instant) {
        if self.state == MachineState::GameOver {
            return;
        }
        let due = match self.last_gravity {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.gravity_delay(),
        };
        if due {
            self.last_gravity = Some(now);
            self.dispatch(GameEvent::Tick);
        }
    }

    /// Key-down callback; only acts while a piece is falling
    pub fn on_key_down(&mut self, key: &str) {
        if self.state != MachineState::Playing || self.falling.is_none() {
            return;
        }
        let event = match key {
            keys::ARROW_LEFT => GameEvent::MoveLeft,
            keys::ARROW_RIGHT => GameEvent::MoveRight,
            keys::ARROW_UP if self.rotation_allowed => GameEvent::Rotate,
            keys::SPACE => GameEvent::HardDrop,
            _ => return,
        };
        self.dispatch(event);
    }

    /// Key-up callback; releases carry no gameplay meaning
    pub fn on_key_up(&mut self, _key: &str) {}

    /// Run `event` and any follow-ups through the state handlers, then repaint
    pub fn dispatch(&mut self, event: GameEvent) {
        let mut pending = Some(event);
        while let Some(event) = pending {
            pending = match self.state {
                MachineState::Playing => self.handle_playing(event),
                MachineState::SpawnDelay => self.handle_spawn_delay(event),
                MachineState::GameOver => None,
            };
        }
        self.repaint();
    }

    fn handle_playing(&mut self, event: GameEvent) -> Option<GameEvent> {
        match event {
            GameEvent::Tick => self.gravity_step(),
            GameEvent::MoveLeft => self.shift(-1),
            GameEvent::MoveRight => self.shift(1),
            GameEvent::Rotate => self.rotate(),
            GameEvent::HardDrop => self.hard_drop(),
            GameEvent::PieceLocked => {
                self.falling = None;
                self.state = MachineState::SpawnDelay;
                None
            }
            GameEvent::GameOver => self.finalize_game_over(),
        }
    }

    fn handle_spawn_delay(&mut self, event: GameEvent) -> Option<GameEvent> {
        match event {
            GameEvent::Tick => self.spawn(),
            GameEvent::GameOver => self.finalize_game_over(),
            _ => None,
        }
    }

    fn spawn(&mut self) -> Option<GameEvent> {
        let piece = FallingPiece::spawn(self.next);
        self.state = MachineState::Playing;
        self.rotation_allowed = false;
        if piece.collides(&self.board) {
            self.falling = None;
            return Some(GameEvent::GameOver);
        }
        self.falling = Some(piece);
        self.next = self.queue.draw();
        self.notices.push(GameNotice::Spawned {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
        });
        None
    }

    fn shift(&mut self, dx: i8) -> Option<GameEvent> {
        let piece = self.falling?;
        let moved = piece.shifted(dx, 0);
        if !moved.collides(&self.board) {
            self.falling = Some(moved);
        }
        None
    }

    fn rotate(&mut self) -> Option<GameEvent> {
        if !self.rotation_allowed {
            return None;
        }
        let piece = self.falling?;
        if let Some(rotated) = piece.rotated(&self.board) {
            self.falling = Some(rotated);
        }
        None
    }

    fn gravity_step(&mut self) -> Option<GameEvent> {
        let piece = self.falling?;
        let moved = piece.shifted(0, 1);
        if moved.collides(&self.board) {
            return self.lock(piece, LockKind::Gravity);
        }
        self.falling = Some(moved);
        self.rotation_allowed = true;
        None
    }

    fn hard_drop(&mut self) -> Option<GameEvent> {
        let piece = self.falling?.dropped(&self.board);
        self.falling = Some(piece);
        self.lock(piece, LockKind::HardDrop)
    }

    /// Commit `piece` to the board.
    ///
    /// A piece with a cell still above the board cannot be placed and raises
    /// `GameOver` instead, except for the final forced lock.
    fn lock(&mut self, piece: FallingPiece, lock: LockKind) -> Option<GameEvent> {
        if lock != LockKind::Final && piece.is_above_board() {
            return Some(GameEvent::GameOver);
        }
        self.board.stamp(&piece.cells(), piece.x, piece.y, piece.kind);
        let points = lock_points(lock, self.level);
        self.score = self.score.saturating_add(points);
        self.notices.push(GameNotice::Locked {
            kind: piece.kind,
            lock,
            points,
        });
        self.clear_lines(piece.kind, lock);
        self.falling = None;
        match lock {
            LockKind::Final => None,
            _ => Some(GameEvent::PieceLocked),
        }
    }

    fn clear_lines(&mut self, kind: PieceKind, lock: LockKind) {
        let limit = pieces::variant(kind).max_lines as usize;
        let cleared = self.board.clear_complete_lines(limit);
        if cleared == 0 {
            return;
        }
        let points = match lock {
            LockKind::Final => 0,
            _ => line_clear_points(cleared, self.level),
        };
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);
        self.notices.push(GameNotice::LinesCleared {
            count: cleared as u32,
            points,
            total_lines: self.lines,
        });

        let level = level_for_lines(self.lines).max(self.level);
        if level != self.level {
            self.level = level;
            self.timer.stop();
            self.timer.start(TICK_PERIOD);
            self.notices.push(GameNotice::LevelChanged {
                level,
                delay_ms: delay_for_level(level),
            });
        }
    }

    fn finalize_game_over(&mut self) -> Option<GameEvent> {
        if let Some(piece) = self.falling.take() {
            self.lock(piece, LockKind::Final);
        }
        self.timer.stop();
        self.falling = None;
        self.state = MachineState::GameOver;
        self.score_surface.set_format(GAME_OVER_FORMAT);
        self.notices.push(GameNotice::GameOver {
            score: self.score,
            lines: self.lines,
            level: self.level,
        });
        None
    }

    /// Sync board, falling piece, preview and score to the surfaces
    pub fn repaint(&mut self) {
        for (y, row) in self.board.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let color = cell.map(|kind| pieces::variant(kind).color);
                paint(&mut self.playfield, x as i32, y as i32, color);
            }
        }
        if let Some(piece) = self.falling {
            let color = pieces::variant(piece.kind).color;
            for (x, y) in piece.board_cells().filter(|&(_, y)| y >= 0) {
                paint(&mut self.playfield, x.into(), y.into(), Some(color));
            }
        }

        for y in 0..self.preview.rows() {
            for x in 0..self.preview.cols() {
                paint(&mut self.preview, x.into(), y.into(), None);
            }
        }
        let color = pieces::variant(self.next).color;
        for (x, y) in pieces::cells(self.next, 0) {
            paint(&mut self.preview, x.into(), y.into(), Some(color));
        }

        self.score_surface.set_value(self.score);
    }

    /// Take every notice raised since the last call
    pub fn drain_notices(&mut self) -> Vec<GameNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Put `piece` under player control, replacing any falling piece.
    ///
    /// Used to seed positions (puzzles, tests); the rotation gate closes
    /// as it does on a regular spawn.
    pub fn place_piece(&mut self, piece: FallingPiece) {
        self.falling = Some(piece);
        self.state = MachineState::Playing;
        self.rotation_allowed = false;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn falling(&self) -> Option<FallingPiece> {
        self.falling
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn rotation_allowed(&self) -> bool {
        self.rotation_allowed
    }

    /// Current gravity delay, read fresh from the level table
    pub fn gravity_delay(&self) -> Duration {
        Duration::from_millis(delay_for_level(self.level) as u64)
    }

    pub fn is_game_over(&self) -> bool {
        self.state == MachineState::GameOver
    }

    pub fn playfield(&self) -> &P {
        &self.playfield
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }

    pub fn score_surface(&self) -> &S {
        &self.score_surface
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

#[inline]
fn paint<P: PaintSurface>(surface: &mut P, x: i32, y: i32, color: Option<Rgb>) {
    let result = surface.paint_cell(x, y, color);
    debug_assert!(result.is_ok(), "invalid paint request: {:?}", result);
}
