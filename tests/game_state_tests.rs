//! State machine scenarios driven through the terminal surfaces

use std::time::{Duration, Instant};

use gridfall::core::{
    delay_for_level, Board, FallingPiece, GameState, GravityTimer, PollTimer, ScoreSurface,
};
use gridfall::term::{GridPainter, ScoreDisplay};
use gridfall::types::{
    keys, GameNotice, MachineState, PieceKind, GAME_OVER_FORMAT, NEXT_BACKGROUND,
    PLAYFIELD_BACKGROUND, SCORE_FORMAT,
};

type Game = GameState<GridPainter, ScoreDisplay, PollTimer>;

fn game(seed: u32) -> Game {
    let mut game = GameState::new(
        GridPainter::new("playfield", 10, 20, PLAYFIELD_BACKGROUND),
        GridPainter::new("next", 4, 4, NEXT_BACKGROUND),
        ScoreDisplay::new("score", 0, SCORE_FORMAT),
        PollTimer::new(),
        seed,
    );
    game.start();
    game
}

fn piece(kind: PieceKind, x: i8, y: i8, rotation: u8) -> FallingPiece {
    FallingPiece {
        kind,
        x,
        y,
        rotation,
    }
}

/// Complete the bottom row with a hard-dropped I
fn clear_one_line(game: &mut Game) {
    *game.board_mut() = Board::from_ascii(&["IIIIII...."]);
    game.place_piece(piece(PieceKind::I, 6, 0, 0));
    game.on_key_down(keys::SPACE);
}

#[test]
fn test_hard_dropped_i_locks_on_bottom_row() {
    let mut game = game(1);
    game.place_piece(piece(PieceKind::I, 3, 0, 0));
    game.on_key_down(keys::SPACE);

    for x in 0..10 {
        let locked = (3..=6).contains(&x);
        assert_eq!(game.board().is_occupied(x, 19), locked, "column {x}");
    }
    assert_eq!(game.score(), 20);
    assert_eq!(game.state(), MachineState::SpawnDelay);

    // The playfield surface shows the locked cells in the I color
    let cyan = gridfall::core::variant(PieceKind::I).color;
    assert_eq!(game.playfield().color_at(3, 19), Some(cyan));
    assert_eq!(game.playfield().color_at(2, 19), Some(PLAYFIELD_BACKGROUND));
    assert_eq!(game.score_surface().lines(), ["Score: 20"]);
}

#[test]
fn test_single_line_clear_scores_and_shifts() {
    let mut game = game(1);
    *game.board_mut() = Board::from_ascii(&["L.........", "IIIIIIIII."]);
    // Vertical I in column 9 (bitmap column 2)
    game.place_piece(piece(PieceKind::I, 7, 0, 1));
    game.on_key_down(keys::SPACE);

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 20 + 100);
    // The L cell from row 18 moved down into row 19
    assert_eq!(game.board().get(0, 19), Some(Some(PieceKind::L)));
    // Three cells of the I remain in column 9
    assert!(game.board().is_occupied(9, 19));
    assert!(game.board().is_occupied(9, 17));
    assert!(!game.board().is_occupied(9, 16));
    assert!(game
        .drain_notices()
        .contains(&GameNotice::LinesCleared {
            count: 1,
            points: 100,
            total_lines: 1,
        }));
}

#[test]
fn test_spawn_overlap_ends_the_game() {
    let mut game = game(1);
    for x in 3..=6 {
        game.board_mut().set(x, 0, Some(PieceKind::S));
    }
    let before = game.board().clone();

    game.on_timer(Instant::now());

    assert_eq!(game.state(), MachineState::GameOver);
    assert!(game.falling().is_none());
    assert_eq!(game.score(), 0);
    assert_eq!(game.board(), &before);
    assert_eq!(game.score_surface().format(), GAME_OVER_FORMAT);
    assert_eq!(game.score_surface().lines(), ["Game over!", "Score: 0"]);
}

#[test]
fn test_ten_lines_advance_one_level() {
    let mut game = game(1);
    for _ in 0..9 {
        clear_one_line(&mut game);
    }
    assert_eq!(game.level(), 1);
    assert_eq!(game.timer().starts(), 1);

    clear_one_line(&mut game);
    assert_eq!(game.lines(), 10);
    assert_eq!(game.level(), 2);
    assert_eq!(game.gravity_delay(), Duration::from_millis(delay_for_level(2).into()));
    assert!(game.gravity_delay() < Duration::from_millis(delay_for_level(1).into()));
    // Level change restarts the driver
    assert_eq!(game.timer().starts(), 2);
}

#[test]
fn test_level_caps_at_ten() {
    let mut game = game(1);
    for _ in 0..120 {
        clear_one_line(&mut game);
    }
    assert_eq!(game.lines(), 120);
    assert_eq!(game.level(), 10);
    assert_eq!(game.gravity_delay(), Duration::from_millis(50));
}

#[test]
fn test_hard_drop_points_scale_with_level() {
    let mut game = game(1);
    for _ in 0..20 {
        clear_one_line(&mut game);
    }
    assert_eq!(game.level(), 3);

    let before = game.score();
    game.place_piece(piece(PieceKind::I, 3, 0, 0));
    game.on_key_down(keys::SPACE);

    assert_eq!(game.lines(), 20);
    assert_eq!(game.score() - before, 20 * 3);
}

#[test]
fn test_rotation_against_left_wall_takes_right_kick() {
    let mut game = game(1);
    game.place_piece(piece(PieceKind::T, -1, 5, 1));

    // Rotation is gated until the piece has fallen once
    game.on_key_down(keys::ARROW_UP);
    assert_eq!(game.falling(), Some(piece(PieceKind::T, -1, 5, 1)));

    game.on_timer(Instant::now());
    assert!(game.rotation_allowed());
    game.on_key_down(keys::ARROW_UP);
    assert_eq!(game.falling(), Some(piece(PieceKind::T, 0, 6, 2)));
}

#[test]
fn test_blocked_rotation_keeps_orientation() {
    let mut game = game(1);
    // Vertical I boxed in by columns 1 and 3
    let mut board = Board::new();
    for y in 0..20 {
        board.set(1, y, Some(PieceKind::J));
        board.set(3, y, Some(PieceKind::J));
    }
    *game.board_mut() = board;
    game.place_piece(piece(PieceKind::I, 0, 2, 1));
    game.on_timer(Instant::now());

    let before = game.falling();
    game.on_key_down(keys::ARROW_UP);
    assert_eq!(game.falling(), before);
    assert_eq!(before.map(|p| p.rotation), Some(1));
}

#[test]
fn test_gravity_waits_for_level_delay() {
    let mut game = game(1);
    let t0 = Instant::now();
    game.on_timer(t0);
    let spawned = game.falling().map(|p| p.y);

    game.on_timer(t0 + Duration::from_millis(450));
    assert_eq!(game.falling().map(|p| p.y), spawned);

    game.on_timer(t0 + Duration::from_millis(500));
    assert_eq!(game.falling().map(|p| p.y), spawned.map(|y| y + 1));
}

#[test]
fn test_sessions_are_independent() {
    let mut a = game(3);
    let mut b = game(3);
    let now = Instant::now();
    a.on_timer(now);
    b.on_timer(now);
    assert_eq!(a.falling(), b.falling());

    a.on_key_down(keys::SPACE);
    assert!(a.score() > 0);
    assert_eq!(b.score(), 0);
    assert!(b.falling().is_some());
    assert!(b.timer().is_running());
}

#[test]
fn test_preview_shows_next_piece() {
    let mut game = game(9);
    game.on_timer(Instant::now());

    let next = game.next_kind();
    let color = gridfall::core::variant(next).color;
    let painted = (0..4)
        .flat_map(|y| (0..4).map(move |x| (x, y)))
        .filter(|&(x, y)| game.preview().color_at(x, y) == Some(color))
        .count();
    assert_eq!(painted, 4);
}
