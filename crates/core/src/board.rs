//! Board module - manages the game grid
//!
//! The board is a `width x height` grid of cells. `0` is empty, any positive value
//! is a locked cell carrying a piece color. Storage is a flat row-major vector
//! (`y * width + x`) for cache locality; dimensions never change after creation.
//!
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the board (y < 0) are where pieces spawn and never collide.
//!
//! `merge` and `clear_lines` are non-destructive: they return a new board and
//! leave `self` untouched.

use crate::pieces::Shape;
use crate::types::{Cell, EMPTY};

/// The game board using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Build a board from explicit rows (top row first).
    ///
    /// Returns `None` if the rows are ragged or empty.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some((y as usize) * self.width + (x as usize))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(v) if v != EMPTY)
    }

    /// One row as a slice, or `None` past the bottom.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        let w = self.width;
        (0..self.height).map(move |y| &self.cells[y * w..(y + 1) * w])
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| !row.is_empty() && row.iter().all(|&cell| cell != EMPTY))
            .unwrap_or(false)
    }

    /// Check if a row holds at least one locked cell
    pub fn row_occupied(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().any(|&cell| cell != EMPTY))
            .unwrap_or(false)
    }

    /// Shape value at board coordinate `(x, y)` for a shape placed at the origin.
    pub fn point_value(&self, shape: &Shape, origin_x: i32, origin_y: i32, x: i32, y: i32) -> Cell {
        shape.value_at(origin_x, origin_y, x, y)
    }

    /// Check whether `shape` placed at `(origin_x, origin_y)` overlaps a wall,
    /// the floor, or a locked cell.
    ///
    /// Cells above row 0 are only checked against the side walls.
    pub fn collides(&self, shape: &Shape, origin_x: i32, origin_y: i32) -> bool {
        shape.filled().any(|(dx, dy, _)| {
            let x = origin_x + dx;
            let y = origin_y + dy;
            if x < 0 || x as usize >= self.width {
                return true;
            }
            if y < 0 {
                return false;
            }
            if y as usize >= self.height {
                return true;
            }
            self.is_occupied(x, y)
        })
    }

    /// Return a new board with `shape` added under its footprint.
    ///
    /// Only cells covered by a non-empty shape cell change; anything that would
    /// land outside the grid is dropped.
    pub fn merge(&self, shape: &Shape, origin_x: i32, origin_y: i32) -> Board {
        let mut merged = self.clone();
        for (dx, dy, value) in shape.filled() {
            if let Some(idx) = merged.index(origin_x + dx, origin_y + dy) {
                merged.cells[idx] = merged.cells[idx].saturating_add(value);
            }
        }
        merged
    }

    /// Remove every full row, shift the remaining rows down and refill the top
    /// with empty rows. Returns the new board and the number of rows removed.
    ///
    /// Uses a bottom-up two-pointer pass over a copy of the grid.
    pub fn clear_lines(&self) -> (Board, usize) {
        let mut out = self.clone();
        let width = self.width;
        let mut write_y = self.height;
        let mut cleared = 0;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    out.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        out.cells[..write_y * width].fill(EMPTY);

        (out, cleared)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert to a 2D vector (top row first)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::shape_of;
    use crate::types::{PieceKind, Rotation};

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new(10, 20);

        board.set(0, 0, 1);
        board.set(5, 10, 6);

        assert_eq!(board.get(0, 0), Some(1));
        assert_eq!(board.get(5, 10), Some(6));

        assert_eq!(board.cells[0], 1);
        assert_eq!(board.cells[10 * 10 + 5], 6);
    }

    #[test]
    fn test_board_from_rows_roundtrip() {
        let mut rows = vec![vec![0u8; 6]; 8];
        rows[5][3] = 4;
        rows[7][0] = 3;

        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.width(), 6);
        assert_eq!(board.height(), 8);
        assert_eq!(board.to_rows(), rows);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        assert!(Board::from_rows(&[vec![0, 0], vec![0]]).is_none());
        assert!(Board::from_rows(&[]).is_none());
    }

    #[test]
    fn merge_adds_shape_values_only_under_the_footprint() {
        let mut board = Board::new(10, 20);
        board.set(0, 19, 2);
        let o = shape_of(PieceKind::O, Rotation::Up);

        let merged = board.merge(&o, 4, 18);

        assert_eq!(merged.get(4, 18), Some(4));
        assert_eq!(merged.get(5, 19), Some(4));
        assert_eq!(merged.get(0, 19), Some(2));
        // Input untouched.
        assert_eq!(board.get(4, 18), Some(0));
    }

    #[test]
    fn merge_drops_cells_above_the_board() {
        let board = Board::new(10, 20);
        let o = shape_of(PieceKind::O, Rotation::Up);
        let merged = board.merge(&o, 4, -1);
        assert_eq!(merged.get(4, 0), Some(4));
        assert_eq!(merged.cells().iter().filter(|&&c| c != 0).count(), 2);
    }

    #[test]
    fn clear_lines_keeps_partial_rows_in_order() {
        let mut board = Board::new(4, 5);
        for x in 0..4 {
            board.set(x, 4, 1);
            board.set(x, 2, 1);
        }
        board.set(1, 3, 5);
        board.set(2, 1, 7);

        let (cleared, n) = board.clear_lines();

        assert_eq!(n, 2);
        assert_eq!(cleared.height(), 5);
        assert_eq!(cleared.get(1, 4), Some(5));
        assert_eq!(cleared.get(2, 3), Some(7));
        assert!(!cleared.row_occupied(0));
        assert!(!cleared.row_occupied(1));
        assert!(!cleared.row_occupied(2));
    }

    #[test]
    fn zero_width_board_has_empty_rows() {
        let board = Board::new(0, 5);
        assert_eq!(board.to_rows(), vec![Vec::<Cell>::new(); 5]);
        assert_eq!(board.rows().count(), 5);
        assert!(!board.is_row_full(0));

        let (cleared, n) = board.clear_lines();
        assert_eq!(n, 0);
        assert_eq!(cleared, board);

        assert!(Board::new(3, 0).to_rows().is_empty());
    }
}
