//! Flushes a framebuffer to the terminal via crossterm.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::term::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to repaint everything (e.g. after a resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a frame, repainting only glyphs that changed since the last one.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        let prev = self
            .last
            .take()
            .filter(|p| p.width() == fb.width() && p.height() == fb.height());

        let mut style: Option<Style> = None;
        match prev {
            None => {
                self.stdout
                    .queue(terminal::Clear(terminal::ClearType::All))?;
                for y in 0..fb.height() {
                    self.stdout.queue(cursor::MoveTo(0, y))?;
                    for x in 0..fb.width() {
                        self.print_glyph(fb, x, y, &mut style)?;
                    }
                }
            }
            Some(prev) => {
                for y in 0..fb.height() {
                    let mut x = 0;
                    while x < fb.width() {
                        if prev.get(x, y) == fb.get(x, y) {
                            x += 1;
                            continue;
                        }
                        // Repaint a run of changed glyphs with one cursor move.
                        self.stdout.queue(cursor::MoveTo(x, y))?;
                        while x < fb.width() && prev.get(x, y) != fb.get(x, y) {
                            self.print_glyph(fb, x, y, &mut style)?;
                            x += 1;
                        }
                    }
                }
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.flush()?;
        self.last = Some(fb.clone());
        Ok(())
    }

    fn print_glyph(
        &mut self,
        fb: &FrameBuffer,
        x: u16,
        y: u16,
        current: &mut Option<Style>,
    ) -> Result<()> {
        let glyph = fb.get(x, y).unwrap_or_default();
        if *current != Some(glyph.style) {
            self.apply_style(glyph.style)?;
            *current = Some(glyph.style);
        }
        self.stdout.queue(Print(glyph.ch))?;
        Ok(())
    }

    fn apply_style(&mut self, style: Style) -> Result<()> {
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout
            .queue(SetForegroundColor(rgb_to_color(style.fg)))?;
        self.stdout
            .queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
        if style.bold {
            self.stdout.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.stdout.queue(SetAttribute(Attribute::Dim))?;
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
