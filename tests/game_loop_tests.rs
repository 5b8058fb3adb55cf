//! Game loop scenarios driven through a fixed piece sequence

use tui_blockfall::core::{Board, GameEvent, GameState, SequenceSource};
use tui_blockfall::types::{GameAction, Phase, PieceKind};

fn game_of(kinds: &[PieceKind]) -> GameState {
    GameState::new(SequenceSource::new(kinds.to_vec()))
}

/// Move the active piece so its origin sits at column `x`, then hard drop
fn drop_at(game: &mut GameState, x: i8) {
    let current = game.active().map(|p| p.x).unwrap_or(x);
    let (action, steps) = if x < current {
        (GameAction::MoveLeft, current - x)
    } else {
        (GameAction::MoveRight, x - current)
    };
    for _ in 0..steps {
        assert!(game.apply_action(action));
    }
    game.apply_action(GameAction::HardDrop);
}

#[test]
fn test_o_pieces_fill_bottom_rows() {
    let mut game = game_of(&[PieceKind::O]);

    for x in [0, 2, 4, 6] {
        drop_at(&mut game, x);
    }
    assert_eq!(game.score(), 4 * 18);
    assert_eq!(game.lines(), 0);

    drop_at(&mut game, 8);
    assert_eq!(game.lines(), 2);
    // 300 double + 50 combo + 18 drop
    assert_eq!(game.score(), 4 * 18 + 368);
    assert!(game.board().cells().iter().all(|c| c.is_none()));

    let cleared = game
        .drain_events()
        .filter_map(|e| match e {
            GameEvent::LinesCleared { count, rows } => Some((count, rows.to_vec())),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(cleared, vec![(2, vec![19, 18])]);
}

#[test]
fn test_stacking_to_top_ends_game() {
    let mut game = game_of(&[PieceKind::O]);

    for _ in 0..9 {
        game.apply_action(GameAction::HardDrop);
        assert_eq!(game.phase(), Phase::Active);
    }
    game.apply_action(GameAction::HardDrop);

    assert!(game.game_over());
    assert!(game.board().is_game_over());
    assert!(game.active().is_none());
    assert!(game.drain_events().any(|e| e == GameEvent::GameOver));

    // Active-state intents are ignored now
    let score = game.score();
    for action in [
        GameAction::MoveLeft,
        GameAction::RotateCw,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Pause,
    ] {
        assert!(!game.apply_action(action));
    }
    assert!(!game.tick(10_000));
    assert_eq!(game.score(), score);
}

#[test]
fn test_restart_after_game_over() {
    let mut game = game_of(&[PieceKind::O]);
    while !game.game_over() {
        game.apply_action(GameAction::HardDrop);
    }

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.phase(), Phase::Active);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.fall_interval_ms(), 500);
    assert!(game.board().cells().iter().all(|c| c.is_none()));
    assert!(game.active().is_some());
}

#[test]
fn test_spawn_into_blocked_board_is_game_over() {
    let mut board = Board::new();
    board.set(4, 0, Some(PieceKind::L));
    let game = GameState::from_parts(board, SequenceSource::repeat(PieceKind::O));
    assert!(game.game_over());
}

#[test]
fn test_gravity_locks_piece_with_no_drop_bonus() {
    let mut game = game_of(&[PieceKind::O, PieceKind::T]);
    // 18 falls to the floor, one more tick locks
    for _ in 0..19 {
        assert!(game.tick(500));
    }
    assert_eq!(game.board().kind_at(4, 19), Some(PieceKind::O));
    assert_eq!(game.score(), 0);
    assert_eq!(game.active().map(|p| p.kind), Some(PieceKind::T));
    assert_eq!(game.next(), PieceKind::O);
}

#[test]
fn test_step_applies_actions_before_timer() {
    let mut game = game_of(&[PieceKind::T]);
    game.step(&[GameAction::MoveLeft, GameAction::MoveLeft], 500);
    let piece = game.active().unwrap();
    assert_eq!((piece.x, piece.y), (2, 1));

    // Hard drop in the same step as a due fall: the fall applies to the new piece
    game.step(&[GameAction::HardDrop], 500);
    let piece = game.active().unwrap();
    assert_eq!((piece.x, piece.y), (4, 1));
}

#[test]
fn test_pause_toggles_and_freezes_gravity() {
    let mut game = game_of(&[PieceKind::T]);
    game.step(&[GameAction::Pause], 5_000);
    assert_eq!(game.phase(), Phase::Paused);
    assert_eq!(game.active().unwrap().y, 0);

    game.step(&[GameAction::Pause], 0);
    assert_eq!(game.phase(), Phase::Active);

    let events: Vec<_> = game.drain_events().collect();
    assert_eq!(events, vec![GameEvent::Paused, GameEvent::Resumed]);
}

#[test]
fn test_level_up_speeds_up_fall() {
    // Ten rows full except column 0
    let mut board = Board::new();
    for y in 10..20 {
        for x in 0..10 {
            if x != 0 {
                board.set(x, y, Some(PieceKind::J));
            }
        }
    }
    let mut game = GameState::from_parts(board, SequenceSource::repeat(PieceKind::I));

    // Vertical I in column 0 clears four rows at a time
    let mut level_ups = Vec::new();
    for _ in 0..3 {
        game.apply_action(GameAction::RotateCw);
        while game.apply_action(GameAction::MoveLeft) {}
        game.apply_action(GameAction::HardDrop);
        level_ups.extend(game.drain_events().filter_map(|e| match e {
            GameEvent::LevelUp(level) => Some(level),
            _ => None,
        }));
        if game.lines() >= 10 {
            break;
        }
    }

    assert!(game.lines() >= 10);
    assert_eq!(level_ups, vec![2]);
    assert_eq!(game.level(), 2);
    assert_eq!(game.fall_interval_ms(), 450);
}

#[test]
fn test_rotation_failure_reports_event() {
    // Only the spawn row has room: every kick for a vertical I is blocked.
    let mut board = Board::new();
    for y in 0..20 {
        for x in 0..10 {
            if y != 1 || !(4..8).contains(&x) {
                board.set(x, y, Some(PieceKind::S));
            }
        }
    }
    let mut game = GameState::from_parts(board, SequenceSource::repeat(PieceKind::I));
    let before = game.active();
    assert!(before.is_some());

    assert!(!game.apply_action(GameAction::RotateCw));
    assert!(!game.apply_action(GameAction::RotateCcw));
    assert_eq!(game.active(), before);

    let events: Vec<_> = game.drain_events().collect();
    assert_eq!(events, vec![GameEvent::RotateFailed, GameEvent::RotateFailed]);
}
