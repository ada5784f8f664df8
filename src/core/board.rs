//! The board: a fixed grid of locked cells with collision, merge, and
//! line-clear logic.
//!
//! Uses a flat array for cache locality and zero allocation. Coordinates are
//! (x, y) with x growing rightwards and y growing downwards; (0, 0) is the
//! top-left visible cell.

use crate::core::piece::Piece;
use crate::types::{Cell, BOARD_COLS, BOARD_ROWS};

const COLS: usize = BOARD_COLS as usize;
const ROWS: usize = BOARD_ROWS as usize;
const BOARD_SIZE: usize = COLS * ROWS;

/// Grid of locked cells, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= COLS as i8 || y < 0 || y >= ROWS as i8 {
            return None;
        }
        Some(y as usize * COLS + x as usize)
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    /// Cell at (x, y), or None when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|i| self.cells[i])
    }

    /// Set a cell. Out-of-bounds writes are dropped; this is what lets a
    /// piece lock while part of it still hangs above row 0.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) {
        if let Some(i) = Self::index(x, y) {
            self.cells[i] = cell;
        }
    }

    fn occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether any occupied cell of `piece` violates an x bound, the bottom
    /// bound, or overlaps a locked cell.
    ///
    /// Cells with y < 0 are checked against the x bounds only, never against
    /// board contents: pieces spawn with their top rows off-grid and must not
    /// conflict there.
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().iter().any(|&(x, y)| {
            x < 0 || x >= COLS as i8 || y >= ROWS as i8 || (y >= 0 && self.occupied(x, y))
        })
    }

    /// Lock `piece` into the grid, tagging cells with its kind.
    ///
    /// The caller has already verified `!collides(piece)` at this position.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    fn row_full(&self, y: usize) -> bool {
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(Cell::is_some)
    }

    /// Remove every full row, shifting the rows above down and inserting
    /// fresh empty rows at the top. Returns the number of rows cleared.
    ///
    /// Single compaction pass: each row is judged on its pre-clear contents,
    /// so simultaneous clears cannot interfere with each other.
    pub fn clear_lines(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut write = ROWS;

        for read in (0..ROWS).rev() {
            if self.row_full(read) {
                cleared += 1;
                continue;
            }
            write -= 1;
            if write != read {
                let src = read * COLS;
                let dst = write * COLS;
                self.cells.copy_within(src..src + COLS, dst);
            }
        }

        for cell in &mut self.cells[..write * COLS] {
            *cell = None;
        }

        cleared
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
