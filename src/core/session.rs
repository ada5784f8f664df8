//! Game session state machine.
//!
//! A `Session` owns the board, the current piece, and the two-piece lookahead
//! queue, and advances the tick-by-tick simulation: horizontal auto-repeat,
//! gravity, locking, line clears, leveling, and game-over detection. It is an
//! explicit value with no ambient globals; restarting a game means building a
//! fresh `Session`.
//!
//! There are no recoverable errors here. Invalid moves and rotations are
//! rejected by reverting the attempted mutation, and the only terminal
//! condition is a freshly spawned piece colliding at spawn.

use std::mem;

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::piece::Piece;
use crate::core::planner::shadow_y;
use crate::core::rng::SimpleRng;
use crate::core::scoring::{fall_interval_ms, score_for};
use crate::types::{
    AudioCue, InputEvent, CONTINUOUS_MOVE_INTERVAL_MS, INITIAL_MOVE_INTERVAL_MS,
    LEVEL_UP_INTERVAL_MS, LOOKAHEAD_LEN, SOFT_DROP_INTERVAL_MS,
};

/// Held horizontal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveDir {
    Left,
    Right,
}

impl MoveDir {
    fn dx(self) -> i8 {
        match self {
            MoveDir::Left => -1,
            MoveDir::Right => 1,
        }
    }
}

/// Auto-repeat state for a held directional key, advanced once per tick.
///
/// The first repeat waits for the initial interval after key-down (the move
/// on key-down itself happens in `handle_event`); later repeats fire once per
/// continuous interval. Releasing or switching direction resets everything.
#[derive(Debug, Clone, Copy, Default)]
struct AutoRepeat {
    direction: Option<MoveDir>,
    since_last_ms: u32,
    repeated_once: bool,
}

/// Final report handed to the presentation layer at game over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSummary {
    pub level: u32,
    pub score: u32,
    pub elapsed_seconds: f64,
}

/// One complete game. Exclusively owns its board and pieces.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    current: Piece,
    lookahead: ArrayVec<Piece, LOOKAHEAD_LEN>,
    rng: SimpleRng,
    level: u32,
    lines_cleared: u32,
    score: u32,
    elapsed_ms: u64,
    fall_timer_ms: u32,
    level_timer_ms: u32,
    soft_dropping: bool,
    repeat: AutoRepeat,
    game_over: bool,
    cues: ArrayVec<AudioCue, 4>,
}

impl Session {
    /// Start a new game: empty board, random current piece, full lookahead.
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let current = Piece::spawn(rng.next_kind());
        let mut lookahead = ArrayVec::new();
        for _ in 0..LOOKAHEAD_LEN {
            lookahead.push(Piece::spawn(rng.next_kind()));
        }

        Self {
            board: Board::new(),
            current,
            lookahead,
            rng,
            level: 1,
            lines_cleared: 0,
            score: 0,
            elapsed_ms: 0,
            fall_timer_ms: 0,
            level_timer_ms: 0,
            soft_dropping: false,
            repeat: AutoRepeat::default(),
            game_over: false,
            cues: ArrayVec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    /// Upcoming pieces, soonest first.
    pub fn lookahead(&self) -> &[Piece] {
        &self.lookahead
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }

    /// Resting row of the current piece (landing preview / hard-drop target).
    pub fn shadow_y(&self) -> i8 {
        shadow_y(&self.current, &self.board)
    }

    pub fn summary(&self) -> GameSummary {
        GameSummary {
            level: self.level,
            score: self.score,
            elapsed_seconds: self.elapsed_seconds(),
        }
    }

    /// Drain audio cues emitted since the last call.
    pub fn take_cues(&mut self) -> ArrayVec<AudioCue, 4> {
        mem::take(&mut self.cues)
    }

    /// Feed one discrete input event into the state machine.
    ///
    /// Unrecognized situations (e.g. releasing a key that is not held) are
    /// ignored; `Quit` is observed by the runner, not here.
    pub fn handle_event(&mut self, event: InputEvent) {
        if self.game_over {
            return;
        }

        match event {
            InputEvent::MoveLeftDown => self.press_direction(MoveDir::Left),
            InputEvent::MoveRightDown => self.press_direction(MoveDir::Right),
            InputEvent::MoveLeftUp => self.release_direction(MoveDir::Left),
            InputEvent::MoveRightUp => self.release_direction(MoveDir::Right),
            InputEvent::SoftDropDown => self.soft_dropping = true,
            InputEvent::SoftDropUp => self.soft_dropping = false,
            InputEvent::Rotate => self.try_rotate(),
            InputEvent::HardDrop => self.hard_drop(),
            InputEvent::Quit => {}
        }
    }

    /// Advance the simulation by `dt_ms` of real time.
    pub fn tick(&mut self, dt_ms: u32) {
        if self.game_over {
            return;
        }

        self.elapsed_ms += dt_ms as u64;
        self.step_auto_repeat(dt_ms);
        self.step_gravity(dt_ms);
        if self.game_over {
            return;
        }
        self.step_level(dt_ms);
    }

    fn press_direction(&mut self, dir: MoveDir) {
        self.repeat = AutoRepeat {
            direction: Some(dir),
            since_last_ms: 0,
            repeated_once: false,
        };
        self.try_shift(dir.dx());
    }

    fn release_direction(&mut self, dir: MoveDir) {
        if self.repeat.direction == Some(dir) {
            self.repeat = AutoRepeat::default();
        }
    }

    fn step_auto_repeat(&mut self, dt_ms: u32) {
        let Some(dir) = self.repeat.direction else {
            return;
        };

        self.repeat.since_last_ms = self.repeat.since_last_ms.saturating_add(dt_ms);
        loop {
            let gate = if self.repeat.repeated_once {
                CONTINUOUS_MOVE_INTERVAL_MS
            } else {
                INITIAL_MOVE_INTERVAL_MS
            };
            if self.repeat.since_last_ms < gate {
                break;
            }
            self.repeat.since_last_ms -= gate;
            self.repeat.repeated_once = true;
            self.try_shift(dir.dx());
        }
    }

    fn step_gravity(&mut self, dt_ms: u32) {
        self.fall_timer_ms += dt_ms;
        let interval = if self.soft_dropping {
            SOFT_DROP_INTERVAL_MS
        } else {
            fall_interval_ms(self.level)
        };

        if self.fall_timer_ms >= interval {
            self.fall_timer_ms = 0;
            self.current.y += 1;
            if self.board.collides(&self.current) {
                self.current.y -= 1;
                self.lock();
            }
        }
    }

    fn step_level(&mut self, dt_ms: u32) {
        self.level_timer_ms += dt_ms;
        if self.level_timer_ms >= LEVEL_UP_INTERVAL_MS {
            self.level_timer_ms = 0;
            self.level += 1;
        }
    }

    fn try_shift(&mut self, dx: i8) -> bool {
        self.current.x += dx;
        if self.board.collides(&self.current) {
            self.current.x -= dx;
            return false;
        }
        true
    }

    /// Rotate in place; revert exactly on collision (no wall kick).
    fn try_rotate(&mut self) {
        let prev = self.current.rotation;
        self.current.rotate();
        if self.board.collides(&self.current) {
            self.current.rotation = prev;
        }
    }

    /// Teleport to the shadow row and lock immediately.
    fn hard_drop(&mut self) {
        self.current.y = self.shadow_y();
        self.lock();
    }

    /// Lock sequence: merge, clear lines, recompute score, advance the
    /// lookahead queue, detect game over on the fresh spawn.
    fn lock(&mut self) {
        self.board.merge(&self.current);
        let _ = self.cues.try_push(AudioCue::PieceLocked);

        self.lines_cleared += self.board.clear_lines();
        self.score = score_for(self.lines_cleared, self.level);

        self.current = self.lookahead.remove(0);
        self.lookahead.push(Piece::spawn(self.rng.next_kind()));
        self.fall_timer_ms = 0;

        if self.board.collides(&self.current) {
            self.game_over = true;
            let _ = self.cues.try_push(AudioCue::GameOver);
        }
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, BOARD_COLS, BOARD_ROWS};

    fn session() -> Session {
        Session::new(12345)
    }

    #[test]
    fn new_session_has_full_lookahead_and_level_one() {
        let s = session();
        assert_eq!(s.lookahead().len(), LOOKAHEAD_LEN);
        assert_eq!(s.level(), 1);
        assert_eq!(s.lines_cleared(), 0);
        assert_eq!(s.score(), 0);
        assert!(!s.game_over());
    }

    #[test]
    fn move_applies_immediately_on_key_down() {
        let mut s = session();
        let x = s.current().x;
        s.handle_event(InputEvent::MoveLeftDown);
        assert_eq!(s.current().x, x - 1);
    }

    #[test]
    fn auto_repeat_waits_for_initial_interval_then_repeats() {
        let mut s = session();
        let x = s.current().x;
        s.handle_event(InputEvent::MoveRightDown);
        assert_eq!(s.current().x, x + 1);

        // Held but still inside the initial interval: no repeat.
        s.tick(199);
        assert_eq!(s.current().x, x + 1);

        // Crossing 200ms fires the first repeat.
        s.tick(1);
        assert_eq!(s.current().x, x + 2);

        // From then on, one repeat per 50ms.
        s.tick(49);
        assert_eq!(s.current().x, x + 2);
        s.tick(1);
        assert_eq!(s.current().x, x + 3);
        s.tick(100);
        assert_eq!(s.current().x, x + 5);
    }

    #[test]
    fn releasing_the_key_stops_repeats() {
        let mut s = session();
        s.handle_event(InputEvent::MoveRightDown);
        let x = s.current().x;
        s.handle_event(InputEvent::MoveRightUp);
        s.tick(500);
        assert_eq!(s.current().x, x);
    }

    #[test]
    fn switching_direction_resets_the_repeat_timer() {
        let mut s = session();
        s.handle_event(InputEvent::MoveRightDown);
        s.tick(150);
        let x = s.current().x;

        // Opposite key-down: immediate move, timer restarts from zero.
        s.handle_event(InputEvent::MoveLeftDown);
        assert_eq!(s.current().x, x - 1);
        s.tick(199);
        assert_eq!(s.current().x, x - 1);
        s.tick(1);
        assert_eq!(s.current().x, x - 2);
    }

    #[test]
    fn releasing_the_old_direction_does_not_cancel_the_new_one() {
        let mut s = session();
        s.handle_event(InputEvent::MoveRightDown);
        s.handle_event(InputEvent::MoveLeftDown);
        let x = s.current().x;
        // The stale right-key release arrives after the direction switched.
        s.handle_event(InputEvent::MoveRightUp);
        s.tick(200);
        assert_eq!(s.current().x, x - 1);
    }

    #[test]
    fn wall_blocks_shift_without_side_effects() {
        let mut s = session();
        for _ in 0..BOARD_COLS {
            s.handle_event(InputEvent::MoveLeftDown);
        }
        let leftmost = s.current().cells().iter().map(|&(x, _)| x).min().unwrap();
        assert_eq!(leftmost, 0);
    }

    #[test]
    fn soft_drop_overrides_fall_interval() {
        let mut s = session();
        let y = s.current().y;

        s.handle_event(InputEvent::SoftDropDown);
        s.tick(49);
        assert_eq!(s.current().y, y);
        s.tick(1);
        assert_eq!(s.current().y, y + 1);
        s.tick(50);
        assert_eq!(s.current().y, y + 2);

        // Releasing restores the 3000ms level-1 interval.
        s.handle_event(InputEvent::SoftDropUp);
        s.tick(50);
        assert_eq!(s.current().y, y + 2);
    }

    #[test]
    fn gravity_steps_at_the_level_interval() {
        let mut s = session();
        let y = s.current().y;
        s.tick(2999);
        assert_eq!(s.current().y, y);
        s.tick(1);
        assert_eq!(s.current().y, y + 1);
    }

    #[test]
    fn level_increments_every_thirty_seconds() {
        let mut s = session();
        assert_eq!(s.level(), 1);
        s.tick(29_999);
        assert_eq!(s.level(), 1);
        s.tick(1);
        assert_eq!(s.level(), 2);
        s.tick(30_000);
        assert_eq!(s.level(), 3);
    }

    #[test]
    fn hard_drop_locks_and_advances_the_queue() {
        let mut s = session();
        let next_kind = s.lookahead()[0].kind;

        s.handle_event(InputEvent::HardDrop);

        assert_eq!(s.current().kind, next_kind);
        assert_eq!(s.current().y, 0);
        assert_eq!(s.lookahead().len(), LOOKAHEAD_LEN);
        assert_eq!(s.lines_cleared(), 0);
        let filled = s.board().cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(filled, 4);
    }

    #[test]
    fn lock_emits_piece_locked_cue() {
        let mut s = session();
        s.handle_event(InputEvent::HardDrop);
        let cues = s.take_cues();
        assert_eq!(cues.as_slice(), &[AudioCue::PieceLocked]);
        assert!(s.take_cues().is_empty());
    }

    #[test]
    fn level_up_retroactively_raises_the_score_at_next_lock() {
        let mut s = session();
        s.lines_cleared = 3;
        s.level = 2;
        // Score only changes at lock; the pure derivation picks up both.
        assert_eq!(s.score(), 0);
        s.handle_event(InputEvent::HardDrop);
        assert_eq!(s.score(), 6500);
    }

    #[test]
    fn blocked_spawn_ends_the_game() {
        let mut s = session();

        // Park the current piece away from the spawn area, then wall off the
        // spawn rows (leaving a gap so nothing clears).
        s.current.x = 0;
        s.current.y = BOARD_ROWS as i8 - 4;
        for y in 0..4 {
            for x in 2..BOARD_COLS as i8 {
                s.board_mut().set(x, y, Some(ShapeKind::I));
            }
        }

        s.handle_event(InputEvent::HardDrop);

        assert!(s.game_over());
        let cues = s.take_cues();
        assert_eq!(cues.as_slice(), &[AudioCue::PieceLocked, AudioCue::GameOver]);

        // Terminal state: further input and time are inert.
        let board = s.board().clone();
        s.handle_event(InputEvent::HardDrop);
        s.tick(10_000);
        assert_eq!(*s.board(), board);
    }

    #[test]
    fn full_rows_clear_on_lock() {
        let mut s = session();

        // Fill the bottom row except where the current piece will land.
        s.current.x = 0;
        let landing: Vec<(i8, i8)> = {
            let mut probe = s.current;
            probe.y = s.shadow_y();
            probe.cells().into_iter().collect()
        };
        let bottom = BOARD_ROWS as i8 - 1;
        for x in 0..BOARD_COLS as i8 {
            if !landing.contains(&(x, bottom)) {
                s.board_mut().set(x, bottom, Some(ShapeKind::I));
            }
        }

        let before = s.lines_cleared();
        s.handle_event(InputEvent::HardDrop);

        if landing.iter().any(|&(_, y)| y == bottom) {
            assert!(s.lines_cleared() > before);
            assert_eq!(s.score(), score_for(s.lines_cleared(), s.level()));
        }
    }

    #[test]
    fn rotation_reverts_exactly_when_blocked() {
        let mut s = session();

        // Box the piece in so any rotation that changes its footprint fails.
        let piece = *s.current();
        for x in 0..BOARD_COLS as i8 {
            for y in 0..BOARD_ROWS as i8 {
                if !piece.cells().contains(&(x, y)) {
                    s.board_mut().set(x, y, Some(ShapeKind::I));
                }
            }
        }

        let before = *s.current();
        s.handle_event(InputEvent::Rotate);
        let after = *s.current();
        if after.rotation == before.rotation {
            assert_eq!(after, before);
        } else {
            // The rotated frame happened to fit inside the same cells.
            assert_eq!(after.cells(), before.cells());
        }
    }

    #[test]
    fn elapsed_time_accumulates_only_while_running() {
        let mut s = session();
        s.tick(1500);
        assert!((s.elapsed_seconds() - 1.5).abs() < f64::EPSILON);

        s.game_over = true;
        s.tick(1500);
        assert!((s.elapsed_seconds() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_reports_final_counters() {
        let mut s = session();
        s.level = 3;
        s.score = 11_500;
        s.elapsed_ms = 90_000;
        let summary = s.summary();
        assert_eq!(summary.level, 3);
        assert_eq!(summary.score, 11_500);
        assert!((summary.elapsed_seconds - 90.0).abs() < f64::EPSILON);
    }
}
