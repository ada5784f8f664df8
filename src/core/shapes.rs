//! Shape catalog: the seven piece kinds and their rotation frames.
//!
//! A frame is a row-major 0/1 matrix of occupied cells. Frame counts vary by
//! kind: O has one frame, I/S/Z toggle between two, L/J/T cycle through four.
//! Rotation indexing wraps modulo the frame count, which is why O never
//! visibly rotates.

use crate::types::ShapeKind;

/// One rotation frame: rows of occupancy flags.
pub type Frame = &'static [&'static [u8]];

const I_FRAMES: [Frame; 2] = [
    &[&[1, 1, 1, 1]],
    &[&[1], &[1], &[1], &[1]],
];

const O_FRAMES: [Frame; 1] = [&[&[1, 1], &[1, 1]]];

const S_FRAMES: [Frame; 2] = [
    &[&[1, 1, 0], &[0, 1, 1]],
    &[&[0, 1], &[1, 1], &[1, 0]],
];

const Z_FRAMES: [Frame; 2] = [
    &[&[0, 1, 1], &[1, 1, 0]],
    &[&[1, 0], &[1, 1], &[0, 1]],
];

const L_FRAMES: [Frame; 4] = [
    &[&[1, 0, 0], &[1, 1, 1]],
    &[&[1, 1], &[1, 0], &[1, 0]],
    &[&[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1], &[0, 1], &[1, 1]],
];

const J_FRAMES: [Frame; 4] = [
    &[&[0, 0, 1], &[1, 1, 1]],
    &[&[1, 0], &[1, 0], &[1, 1]],
    &[&[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1], &[0, 1], &[0, 1]],
];

const T_FRAMES: [Frame; 4] = [
    &[&[0, 1, 0], &[1, 1, 1]],
    &[&[1, 0], &[1, 1], &[1, 0]],
    &[&[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1], &[1, 1], &[0, 1]],
];

/// Ordered rotation frames for a piece kind.
pub fn frames_for(kind: ShapeKind) -> &'static [Frame] {
    match kind {
        ShapeKind::I => &I_FRAMES,
        ShapeKind::O => &O_FRAMES,
        ShapeKind::S => &S_FRAMES,
        ShapeKind::Z => &Z_FRAMES,
        ShapeKind::L => &L_FRAMES,
        ShapeKind::J => &J_FRAMES,
        ShapeKind::T => &T_FRAMES,
    }
}
