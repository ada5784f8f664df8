//! Terminal falling-block runner (default binary).
//!
//! crossterm drives input and a framebuffer diff renderer paints frames.
//! The game itself lives in [`blockfall::core::Session`]; this file only
//! pumps events, ticks the clock, and draws.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use blockfall::audio::{AudioSink, NullAudio};
use blockfall::core::Session;
use blockfall::input::{map_key_press, map_key_release, should_quit};
use blockfall::term::{GameView, TerminalRenderer, Viewport};
use blockfall::types::{InputEvent, KEY_RELEASE_FALLBACK_MS, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

enum RoundOutcome {
    Restart,
    Quit,
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let view = GameView::default();
    let mut audio = NullAudio;

    loop {
        match play_round(term, &view, &mut audio)? {
            RoundOutcome::Restart => term.invalidate(),
            RoundOutcome::Quit => return Ok(()),
        }
    }
}

/// Tracks held keys so terminals that never report key releases still get
/// them synthesized after a quiet period.
#[derive(Default)]
struct HeldKeys {
    left: Option<Instant>,
    right: Option<Instant>,
    down: Option<Instant>,
}

impl HeldKeys {
    /// Returns `true` if the press is fresh (not terminal auto-repeat of a
    /// key we already consider held).
    fn press(&mut self, ev: InputEvent, now: Instant) -> bool {
        let slot = match ev {
            InputEvent::MoveLeftDown => &mut self.left,
            InputEvent::MoveRightDown => &mut self.right,
            InputEvent::SoftDropDown => &mut self.down,
            _ => return true,
        };
        let fresh = slot.is_none();
        *slot = Some(now);
        fresh
    }

    fn release(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::MoveLeftUp => self.left = None,
            InputEvent::MoveRightUp => self.right = None,
            InputEvent::SoftDropUp => self.down = None,
            _ => {}
        }
    }

    /// Keys not refreshed within the fallback window are treated as released.
    fn expire(&mut self, now: Instant) -> Vec<InputEvent> {
        let window = Duration::from_millis(KEY_RELEASE_FALLBACK_MS as u64);
        let mut released = Vec::new();
        for (slot, up) in [
            (&mut self.left, InputEvent::MoveLeftUp),
            (&mut self.right, InputEvent::MoveRightUp),
            (&mut self.down, InputEvent::SoftDropUp),
        ] {
            if let Some(seen) = *slot {
                if now.duration_since(seen) >= window {
                    *slot = None;
                    released.push(up);
                }
            }
        }
        released
    }
}

fn play_round(
    term: &mut TerminalRenderer,
    view: &GameView,
    audio: &mut dyn AudioSink,
) -> Result<RoundOutcome> {
    let mut session = Session::new(wall_clock_seed());
    let mut held = HeldKeys::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&session, Viewport::new(w, h));
        term.draw(&fb)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(RoundOutcome::Quit);
                        }
                        if let Some(ev) = map_key_press(key.code) {
                            if held.press(ev, Instant::now()) {
                                session.handle_event(ev);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Refresh held state only; the session owns repeat
                        // pacing.
                        if let Some(ev) = map_key_press(key.code) {
                            held.press(ev, Instant::now());
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(ev) = map_key_release(key.code) {
                            held.release(ev);
                            session.handle_event(ev);
                        }
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();

            for up in held.expire(last_tick) {
                session.handle_event(up);
            }

            session.tick(elapsed.as_millis() as u32);

            for cue in session.take_cues() {
                audio.play(cue);
            }
        }

        if session.game_over() {
            return game_over_screen(term, view, &session);
        }
    }
}

/// Blocks on the summary screen until the player restarts or quits.
fn game_over_screen(
    term: &mut TerminalRenderer,
    view: &GameView,
    session: &Session,
) -> Result<RoundOutcome> {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let fb = view.render_game_over(&session.summary(), Viewport::new(w, h));
    term.invalidate();
    term.draw(&fb)?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(RoundOutcome::Quit);
                }
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R')) {
                    return Ok(RoundOutcome::Restart);
                }
            }
            Event::Resize(..) => {
                let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
                let fb = view.render_game_over(&session.summary(), Viewport::new(w, h));
                term.invalidate();
                term.draw(&fb)?;
            }
            _ => {}
        }
    }
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(0x5eed_cafe)
}
