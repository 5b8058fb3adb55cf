//! Pieces module - tetromino shape matrices, rotation, and the falling piece
//!
//! Every shape starts as a square occupancy matrix (I: 4x4, O: 2x2, others 3x3).
//! Rotating a matrix transposes it and reverses rows or columns, so the cells of a
//! piece are always a pure function of `(kind, rotation)`. All 28 orientations are
//! computed once at compile time into [`SHAPES`].

use crate::types::{PieceKind, Rgb, Rotation, RotationDirection, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to the piece's bounding-box origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the origin, in row-major order
pub type PieceShape = [MinoOffset; 4];

/// Largest bounding box side (the I piece)
const MAX_SIZE: usize = 4;

/// Square occupancy matrix for one orientation of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: usize,
    rows: [[bool; MAX_SIZE]; MAX_SIZE],
}

impl ShapeMatrix {
    const fn new(size: usize, bits: [[u8; MAX_SIZE]; MAX_SIZE]) -> Self {
        let mut rows = [[false; MAX_SIZE]; MAX_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                rows[y][x] = bits[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self { size, rows }
    }

    /// Spawn orientation matrix of a piece kind
    pub const fn spawn(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::new(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::J => Self::new(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::L => Self::new(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::O => Self::new(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::S => Self::new(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::Z => Self::new(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::T => Self::new(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        }
    }

    /// Side length of the bounding box
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at column `x`, row `y` of the bounding box is filled
    pub const fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.rows[y][x]
    }

    /// Rotate the matrix 90° clockwise: `new[x][n - 1 - y] = old[y][x]`
    pub const fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut rows = [[false; MAX_SIZE]; MAX_SIZE];
        let mut y = 0;
        while y < n {
            let mut x = 0;
            while x < n {
                rows[x][n - 1 - y] = self.rows[y][x];
                x += 1;
            }
            y += 1;
        }
        Self { size: n, rows }
    }

    /// Rotate the matrix 90° counter-clockwise: `new[n - 1 - x][y] = old[y][x]`
    pub const fn rotated_ccw(&self) -> Self {
        let n = self.size;
        let mut rows = [[false; MAX_SIZE]; MAX_SIZE];
        let mut y = 0;
        while y < n {
            let mut x = 0;
            while x < n {
                rows[n - 1 - x][y] = self.rows[y][x];
                x += 1;
            }
            y += 1;
        }
        Self { size: n, rows }
    }

    pub const fn rotated(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotated_cw(),
            RotationDirection::CounterClockwise => self.rotated_ccw(),
        }
    }

    /// Filled cells as offsets, scanning rows top to bottom.
    ///
    /// Every tetromino matrix has exactly four filled cells.
    pub const fn minos(&self) -> PieceShape {
        let mut out = [(0i8, 0i8); 4];
        let mut n = 0;
        let mut y = 0;
        while y < self.size {
            let mut x = 0;
            while x < self.size {
                if self.rows[y][x] && n < 4 {
                    out[n] = (x as i8, y as i8);
                    n += 1;
                }
                x += 1;
            }
            y += 1;
        }
        out
    }
}

const fn build_shape_table() -> [[PieceShape; 4]; 7] {
    let mut table = [[[(0i8, 0i8); 4]; 4]; 7];
    let mut k = 0;
    while k < PieceKind::ALL.len() {
        let mut matrix = ShapeMatrix::spawn(PieceKind::ALL[k]);
        let mut r = 0;
        while r < 4 {
            table[k][r] = matrix.minos();
            matrix = matrix.rotated_cw();
            r += 1;
        }
        k += 1;
    }
    table
}

/// Mino offsets for every `(kind, rotation)`, indexed `[kind.index()][rotation.index()]`
pub static SHAPES: [[PieceShape; 4]; 7] = build_shape_table();

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Occupancy matrix for a piece kind and rotation
pub fn shape_matrix(kind: PieceKind, rotation: Rotation) -> ShapeMatrix {
    let mut matrix = ShapeMatrix::spawn(kind);
    for _ in 0..rotation.index() {
        matrix = matrix.rotated_cw();
    }
    matrix
}

/// A falling piece: kind, rotation state and bounding-box origin in board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino in spawn orientation at the spawn origin
    pub fn new(kind: PieceKind) -> Self {
        Self::at(kind, Rotation::North, SPAWN_X, SPAWN_Y)
    }

    pub fn at(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Absolute board coordinates of the four minos
    pub fn occupied_cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece moved by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece rotated in place, without wall kicks.
    ///
    /// The O piece is rotation-invariant and comes back unchanged.
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        if self.kind == PieceKind::O {
            return *self;
        }
        Self {
            rotation: self.rotation.rotate(direction),
            ..*self
        }
    }
}
