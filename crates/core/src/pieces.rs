//! Pieces module - Tetromino shapes and rotation tables
//!
//! Every piece kind owns a fixed table of rotation states. Rotating is a table
//! lookup, never a geometric transform at runtime. Shapes are stored as small
//! rectangular grids (SRS bounding boxes: 4x4 for I, 3x3 for J/L/S/T/Z, 2x2 for O)
//! whose non-zero cells carry the kind's color tag.

use crate::types::{Cell, PieceKind, Rotation, EMPTY};

/// A rectangular grid of cells, row-major, row 0 on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: &'static [Cell],
}

impl Shape {
    const fn new(width: usize, height: usize, cells: &'static [Cell]) -> Self {
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell value at (col, row) inside the shape's own grid; 0 outside it.
    pub fn get(&self, col: usize, row: usize) -> Cell {
        if col >= self.width || row >= self.height {
            return EMPTY;
        }
        self.cells[row * self.width + col]
    }

    /// Value of board coordinate `(x, y)` when the shape's origin sits at
    /// `(origin_x, origin_y)`; 0 when the coordinate is outside the footprint.
    ///
    /// This is the single hit-test primitive shared by collision, merge and
    /// rendering overlays.
    #[inline]
    pub fn value_at(&self, origin_x: i32, origin_y: i32, x: i32, y: i32) -> Cell {
        let col = x - origin_x;
        let row = y - origin_y;
        if col < 0 || row < 0 {
            return EMPTY;
        }
        self.get(col as usize, row as usize)
    }

    /// Iterate the non-empty cells as `(col, row, value)` offsets from the origin.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v != EMPTY)
            .map(move |(i, &v)| ((i % self.width) as i32, (i / self.width) as i32, v))
    }

    /// Number of non-empty cells (always 4 for catalog shapes).
    pub fn mino_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != EMPTY).count()
    }
}

const I_SHAPES: [Shape; 4] = [
    Shape::new(4, 4, &[0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0]),
    Shape::new(4, 4, &[0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0]),
    Shape::new(4, 4, &[0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0]),
    Shape::new(4, 4, &[0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0]),
];

const J_SHAPES: [Shape; 4] = [
    Shape::new(3, 3, &[2, 0, 0, 2, 2, 2, 0, 0, 0]),
    Shape::new(3, 3, &[0, 2, 2, 0, 2, 0, 0, 2, 0]),
    Shape::new(3, 3, &[0, 0, 0, 2, 2, 2, 0, 0, 2]),
    Shape::new(3, 3, &[0, 2, 0, 0, 2, 0, 2, 2, 0]),
];

const L_SHAPES: [Shape; 4] = [
    Shape::new(3, 3, &[0, 0, 3, 3, 3, 3, 0, 0, 0]),
    Shape::new(3, 3, &[0, 3, 0, 0, 3, 0, 0, 3, 3]),
    Shape::new(3, 3, &[0, 0, 0, 3, 3, 3, 3, 0, 0]),
    Shape::new(3, 3, &[3, 3, 0, 0, 3, 0, 0, 3, 0]),
];

/// The O piece has a single rotation state.
const O_SHAPES: [Shape; 1] = [Shape::new(2, 2, &[4, 4, 4, 4])];

const S_SHAPES: [Shape; 4] = [
    Shape::new(3, 3, &[0, 5, 5, 5, 5, 0, 0, 0, 0]),
    Shape::new(3, 3, &[0, 5, 0, 0, 5, 5, 0, 0, 5]),
    Shape::new(3, 3, &[0, 0, 0, 0, 5, 5, 5, 5, 0]),
    Shape::new(3, 3, &[5, 0, 0, 5, 5, 0, 0, 5, 0]),
];

const T_SHAPES: [Shape; 4] = [
    Shape::new(3, 3, &[0, 6, 0, 6, 6, 6, 0, 0, 0]),
    Shape::new(3, 3, &[0, 6, 0, 0, 6, 6, 0, 6, 0]),
    Shape::new(3, 3, &[0, 0, 0, 6, 6, 6, 0, 6, 0]),
    Shape::new(3, 3, &[0, 6, 0, 6, 6, 0, 0, 6, 0]),
];

const Z_SHAPES: [Shape; 4] = [
    Shape::new(3, 3, &[7, 7, 0, 0, 7, 7, 0, 0, 0]),
    Shape::new(3, 3, &[0, 0, 7, 0, 7, 7, 0, 7, 0]),
    Shape::new(3, 3, &[0, 0, 0, 7, 7, 0, 0, 7, 7]),
    Shape::new(3, 3, &[0, 7, 0, 7, 7, 0, 7, 0, 0]),
];

fn shape_table(kind: PieceKind) -> &'static [Shape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::Z => &Z_SHAPES,
    }
}

/// Number of distinct rotation states for a kind.
pub fn rotation_count(kind: PieceKind) -> usize {
    shape_table(kind).len()
}

/// Get the shape for a piece kind and rotation.
///
/// The rotation is taken modulo the kind's state count, so every
/// `(kind, rotation)` pair resolves to a shape.
pub fn shape_of(kind: PieceKind, rotation: Rotation) -> Shape {
    let table = shape_table(kind);
    table[rotation.index() % table.len()]
}

/// Board position (x, y) of a freshly spawned piece's shape origin.
///
/// `y` is -1 so the top row of the bounding box starts above the board.
pub fn spawn_position(kind: PieceKind) -> (i32, i32) {
    match kind {
        PieceKind::I => (3, -1),
        _ => (4, -1),
    }
}
