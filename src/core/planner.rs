//! Drop planner: where a piece comes to rest if dropped straight down.

use crate::core::board::Board;
use crate::core::piece::Piece;

/// The lowest y at which `piece` does not collide, probing downward from its
/// current position. Pure: neither piece nor board is mutated.
///
/// Used for the landing preview and as the target of a hard drop. The caller
/// guarantees the piece is currently non-colliding.
pub fn shadow_y(piece: &Piece, board: &Board) -> i8 {
    let mut probe = *piece;
    while !board.collides(&probe) {
        probe.y += 1;
    }
    probe.y - 1
}
