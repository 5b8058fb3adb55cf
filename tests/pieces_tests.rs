//! Piece shape and rotation tests

use tui_blockfall::core::pieces::{get_shape, ShapeMatrix};
use tui_blockfall::core::srs::{get_kicks, try_rotate, I_KICKS, JLSTZ_KICKS};
use tui_blockfall::core::{Board, Tetromino};
use tui_blockfall::types::{PieceKind, Rotation, RotationDirection, SPAWN_X, SPAWN_Y};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, Rotation::North), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::East), [(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::South), [(0, 2), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(get_shape(PieceKind::I, Rotation::West), [(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(get_shape(PieceKind::T, Rotation::North), [(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::T, Rotation::East), [(1, 0), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, Rotation::South), [(0, 1), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, Rotation::West), [(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_o_piece_shape_is_rotation_invariant() {
    let north = get_shape(PieceKind::O, Rotation::North);
    assert_eq!(north, [(0, 0), (1, 0), (0, 1), (1, 1)]);
    for r in [Rotation::East, Rotation::South, Rotation::West] {
        assert_eq!(get_shape(PieceKind::O, r), north);
    }
}

#[test]
fn test_bounding_box_sizes() {
    assert_eq!(ShapeMatrix::spawn(PieceKind::I).size(), 4);
    assert_eq!(ShapeMatrix::spawn(PieceKind::O).size(), 2);
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::Z, PieceKind::T] {
        assert_eq!(ShapeMatrix::spawn(kind).size(), 3);
    }
}

#[test]
fn test_spawn_position() {
    for kind in PieceKind::ALL {
        let piece = Tetromino::new(kind);
        assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));
        assert_eq!(piece.rotation, Rotation::North);
        assert!(Board::new().is_valid_position(&piece, 0, 0));
    }
}

// ============== Rotation Tests ==============

#[test]
fn test_four_rotations_return_to_start() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
            let start = Tetromino::at(kind, Rotation::North, 3, 8);
            let mut piece = start;
            for _ in 0..4 {
                piece = try_rotate(&piece, direction, &board).unwrap().piece;
            }
            assert_eq!(piece, start, "{:?} {:?}", kind, direction);
        }
    }
}

#[test]
fn test_o_rotation_never_moves_or_kicks() {
    let mut board = Board::new();
    // Box the O in completely; rotation still succeeds in place.
    for y in 0..20 {
        for x in 0..10 {
            board.set(x, y, Some(PieceKind::Z));
        }
    }
    let piece = Tetromino::at(PieceKind::O, Rotation::North, 4, 10);
    for (x, y) in piece.occupied_cells() {
        board.set(x, y, None);
    }

    for direction in [RotationDirection::Clockwise, RotationDirection::CounterClockwise] {
        let rotated = try_rotate(&piece, direction, &board).unwrap();
        assert_eq!(rotated.piece, piece);
        assert_eq!(rotated.kick, (0, 0));
        assert_eq!(rotated.kick_index, 0);
    }
}

#[test]
fn test_kick_tables_are_distinct_per_family() {
    assert_ne!(JLSTZ_KICKS, I_KICKS);
    let kicks = get_kicks(PieceKind::J, Rotation::North, Rotation::East).unwrap();
    assert_eq!(kicks, &[(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]);
    let kicks = get_kicks(PieceKind::I, Rotation::North, Rotation::East).unwrap();
    assert_eq!(kicks, &[(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]);
}

#[test]
fn test_failed_rotation_leaves_piece_untouched() {
    let mut board = Board::new();
    let piece = Tetromino::at(PieceKind::I, Rotation::North, 3, 18);
    // Fill everything except the piece's own row
    for y in 0..20 {
        for x in 0..10 {
            if y != 19 {
                board.set(x, y, Some(PieceKind::L));
            }
        }
    }

    assert!(board.is_valid_position(&piece, 0, 0));
    assert!(try_rotate(&piece, RotationDirection::Clockwise, &board).is_none());
    assert_eq!(piece, Tetromino::at(PieceKind::I, Rotation::North, 3, 18));
}
