//! Rotation system - SRS wall kicks and T-spin detection
//!
//! Kick offsets are tried in table order after rotating in place; the first one
//! that fits wins. Tables are keyed by `(from, to)` rotation state.
//! Offsets are in board coordinates (y grows downward) and are used as listed.
//! Reference: https://tetris.wiki/SRS

use crate::board::Board;
use crate::pieces::Tetromino;
use crate::types::{PieceKind, Rotation, RotationDirection};

/// Five candidate offsets for one rotation transition
pub type Kicks = [(i8, i8); 5];

/// Kick candidates keyed by `(from_state, to_state)`
pub type KickTable = [((usize, usize), Kicks); 8];

/// JLSTZ kick table (shared by J, L, S, T, Z)
pub const JLSTZ_KICKS: KickTable = [
    ((0, 1), [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    ((1, 0), [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
    ((1, 2), [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)]),
    ((2, 1), [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)]),
    ((2, 3), [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
    ((3, 2), [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    ((3, 0), [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)]),
    ((0, 3), [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)]),
];

/// I piece kick table (different from JLSTZ)
pub const I_KICKS: KickTable = [
    ((0, 1), [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),
    ((1, 0), [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),
    ((1, 2), [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),
    ((2, 1), [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),
    ((2, 3), [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)]),
    ((3, 2), [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)]),
    ((3, 0), [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)]),
    ((0, 3), [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)]),
];

/// Corners of the T piece's 3x3 bounding box, relative to its origin
pub const T_CORNERS: [(i8, i8); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];

/// Corners that must be filled for a T-spin
pub const T_SPIN_MIN_CORNERS: usize = 3;

/// Get kick table for a piece kind. The O piece has none.
pub fn get_kick_table(kind: PieceKind) -> Option<&'static KickTable> {
    match kind {
        PieceKind::O => None,
        PieceKind::I => Some(&I_KICKS),
        _ => Some(&JLSTZ_KICKS),
    }
}

/// Kick candidates for a single transition, if the table has one
pub fn get_kicks(kind: PieceKind, from: Rotation, to: Rotation) -> Option<&'static Kicks> {
    let key = (from.index(), to.index());
    get_kick_table(kind)?
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, kicks)| kicks)
}

/// A rotation that found room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotated {
    /// The piece after rotation and kick
    pub piece: Tetromino,
    /// Offset applied to the origin
    pub kick: (i8, i8),
    /// Position of the kick in the table (0 = no kick)
    pub kick_index: usize,
}

/// Try to rotate a piece with wall kicks.
///
/// The input piece is never modified: callers commit `Rotated::piece` on success
/// and keep their current piece on `None`. The O piece always succeeds without
/// consulting any table and without moving or changing rotation state.
pub fn try_rotate(piece: &Tetromino, direction: RotationDirection, board: &Board) -> Option<Rotated> {
    if piece.kind == PieceKind::O {
        return Some(Rotated {
            piece: *piece,
            kick: (0, 0),
            kick_index: 0,
        });
    }

    let rotated = piece.rotated(direction);
    let kicks = get_kicks(piece.kind, piece.rotation, rotated.rotation)?;

    kicks
        .iter()
        .enumerate()
        .find(|&(_, &(dx, dy))| board.is_valid_position(&rotated, dx, dy))
        .map(|(kick_index, &(dx, dy))| Rotated {
            piece: rotated.shifted(dx, dy),
            kick: (dx, dy),
            kick_index,
        })
}

/// Count bounding-box corners of a T piece that are off the board or occupied
pub fn filled_t_corners(piece: &Tetromino, board: &Board) -> usize {
    T_CORNERS
        .iter()
        .filter(|&&(cx, cy)| {
            let x = piece.x + cx;
            let y = piece.y + cy;
            board.is_out_of_bounds(x, y) || board.is_occupied(x, y)
        })
        .count()
}

/// Three-corner T-spin check. Only the T piece qualifies.
///
/// Run right after a successful rotation, with the piece in its post-rotation position.
pub fn is_t_spin(piece: &Tetromino, board: &Board) -> bool {
    piece.kind == PieceKind::T && filled_t_corners(piece, board) >= T_SPIN_MIN_CORNERS
}
