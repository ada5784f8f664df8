//! Deterministic RNG for piece selection.
//!
//! Piece kinds are drawn uniformly and independently per spawn; long droughts
//! of a given kind are possible by design (there is no bag scheme).

use crate::types::ShapeKind;

/// Simple LCG using the Numerical Recipes constants. Deterministic per seed,
/// which keeps session tests reproducible.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would produce a degenerate sequence.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Uniform independent choice among the seven kinds.
    pub fn next_kind(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.next_range(ShapeKind::ALL.len() as u32) as usize]
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}
