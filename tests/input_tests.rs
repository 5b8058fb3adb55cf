//! Input mapping and auto-repeat, checked against the game actions they feed

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tui_blockfall::core::{GameState, SequenceSource};
use tui_blockfall::input::{handle_key_event, should_quit, InputHandler};
use tui_blockfall::types::{GameAction, PieceKind};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

#[test]
fn test_every_action_has_a_key() {
    let mapped: Vec<GameAction> = [
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::Char(' '),
        KeyCode::Up,
        KeyCode::Char('z'),
        KeyCode::Char('p'),
        KeyCode::Char('r'),
    ]
    .into_iter()
    .filter_map(|code| handle_key_event(key(code)))
    .collect();

    assert_eq!(
        mapped,
        vec![
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::Pause,
            GameAction::Restart,
        ]
    );
}

#[test]
fn test_vim_and_wasd_aliases() {
    for (a, b) in [('h', 'a'), ('l', 'd'), ('j', 's'), ('k', 'w')] {
        assert_eq!(
            handle_key_event(key(KeyCode::Char(a))),
            handle_key_event(key(KeyCode::Char(b)))
        );
    }
}

#[test]
fn test_quit_is_not_a_game_action() {
    assert!(should_quit(key(KeyCode::Char('q'))));
    assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert_eq!(handle_key_event(key(KeyCode::Char('q'))), None);
}

#[test]
fn test_held_left_walks_piece_to_wall() {
    let mut game = GameState::new(SequenceSource::repeat(PieceKind::O));
    let mut input = InputHandler::with_config(100, 20).with_key_release_timeout_ms(60_000);

    let first = input.handle_key_press(KeyCode::Left).unwrap();
    game.apply_action(first);

    // 100ms DAS, then 3 repeats at 20ms
    let repeats = input.update(160);
    assert_eq!(repeats.len(), 3);
    game.step(&repeats, 0);

    assert_eq!(game.active().unwrap().x, 0);
}
