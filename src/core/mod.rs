//! Core module - pure game logic.
//!
//! Board and piece rules, the drop planner, and the session state machine.
//! Nothing here touches the terminal, audio, or I/O.

pub mod board;
pub mod piece;
pub mod planner;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;

pub use board::Board;
pub use piece::Piece;
pub use planner::shadow_y;
pub use scoring::{fall_interval_ms, score_for};
pub use session::{GameSummary, Session};
pub use shapes::{frames_for, Frame};
