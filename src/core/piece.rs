//! A live piece instance: shape kind, board position, rotation index.

use arrayvec::ArrayVec;

use crate::core::shapes::{frames_for, Frame};
use crate::types::{ShapeKind, BOARD_COLS};

/// The active falling piece. `x`/`y` locate the frame's local (0,0) cell on
/// the board grid; parts of the piece may sit above row 0 while falling into
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub x: i8,
    pub y: i8,
    pub rotation: usize,
}

impl Piece {
    /// Spawn a new piece: rotation 0, horizontally centered, top row at row 0.
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            kind,
            x: BOARD_COLS as i8 / 2 - 1,
            y: 0,
            rotation: 0,
        }
    }

    /// Number of distinct rotation frames for this kind.
    pub fn frame_count(&self) -> usize {
        frames_for(self.kind).len()
    }

    /// The occupancy matrix for the current rotation.
    pub fn frame(&self) -> Frame {
        let frames = frames_for(self.kind);
        frames[self.rotation % frames.len()]
    }

    /// Advance to the next rotation frame, wrapping modulo the frame count.
    ///
    /// There is no wall kick: the caller re-validates against the board and
    /// reverts the rotation index on collision, leaving `x`/`y` untouched.
    pub fn rotate(&mut self) {
        self.rotation = (self.rotation + 1) % self.frame_count();
    }

    /// Absolute board coordinates of the occupied cells (always exactly 4).
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        for (dy, row) in self.frame().iter().enumerate() {
            for (dx, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    out.push((self.x + dx as i8, self.y + dy as i8));
                }
            }
        }
        out
    }
}
