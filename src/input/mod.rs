//! Input decoding: crossterm key events to discrete [`InputEvent`]s.

pub mod map;

pub use map::{map_key_press, map_key_release, should_quit};
