//! Blockfall: a falling-block puzzle game for the terminal.
//!
//! `core` holds the deterministic simulation; `input` and `term` adapt it to
//! crossterm key events and a framebuffer-based terminal renderer; `audio`
//! defines the fire-and-forget cue boundary.

pub mod audio;
pub mod core;
pub mod input;
pub mod term;
pub mod types;
