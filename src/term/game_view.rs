//! Maps a `Session` into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested against read-only session state.

use crate::core::session::{GameSummary, Session};
use crate::term::fb::{FrameBuffer, Rgb, Style};
use crate::types::{ShapeKind, BOARD_COLS, BOARD_ROWS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Projects game state into glyphs.
pub struct GameView {
    /// Board cell width in terminal columns; 2x1 compensates for the typical
    /// glyph aspect ratio.
    cell_w: u16,
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render one gameplay frame: board, shadow, current piece, side panel.
    pub fn render(&self, session: &Session, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_w = BOARD_COLS as u16 * self.cell_w;
        let board_h = BOARD_ROWS as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let start_x = viewport.width.saturating_sub(frame_w + 16) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let well = Style {
            fg: Rgb::new(90, 90, 100),
            bg: Rgb::new(20, 20, 26),
            bold: false,
            dim: true,
        };
        fb.fill_rect(start_x + 1, start_y + 1, board_w, board_h, '·', well);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h);

        // Locked cells.
        for y in 0..BOARD_ROWS as i8 {
            for x in 0..BOARD_COLS as i8 {
                if let Some(Some(kind)) = session.board().get(x, y) {
                    self.draw_cell(&mut fb, start_x, start_y, x, y, '█', kind_style(kind));
                }
            }
        }

        // Landing preview under the current piece.
        let shadow = session.shadow_y();
        let piece = session.current();
        let shadow_style = Style {
            fg: Rgb::new(192, 192, 192),
            bg: Rgb::new(20, 20, 26),
            bold: false,
            dim: true,
        };
        for &(x, y) in piece.cells().iter() {
            let dy = y - piece.y;
            self.draw_cell(&mut fb, start_x, start_y, x, shadow + dy, '░', shadow_style);
        }

        // Current piece on top.
        for &(x, y) in piece.cells().iter() {
            self.draw_cell(&mut fb, start_x, start_y, x, y, '█', kind_style(piece.kind));
        }

        self.draw_side_panel(&mut fb, session, viewport, start_x + frame_w + 2, start_y);

        fb
    }

    /// Render the terminal summary screen shown after game over.
    pub fn render_game_over(&self, summary: &GameSummary, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let title = Style {
            fg: Rgb::new(255, 0, 0),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let body = Style::default();
        let hint = Style {
            dim: true,
            ..Style::default()
        };

        let mid_y = viewport.height / 4;
        let lines = [
            ("GAME OVER".to_string(), title),
            (format!("Level: {}", summary.level), body),
            (format!("Score: {}", summary.score), body),
            (
                format!("Time: {:.2} seconds", summary.elapsed_seconds),
                body,
            ),
            (String::new(), body),
            ("CONTINUE [Enter]    QUIT [Q]".to_string(), hint),
        ];

        for (i, (text, style)) in lines.iter().enumerate() {
            let x = viewport.width.saturating_sub(text.chars().count() as u16) / 2;
            fb.put_str(x, mid_y + i as u16 * 2, text, *style);
        }

        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = Style {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.put(x, y, '┌', style);
        fb.put(x + w - 1, y, '┐', style);
        fb.put(x, y + h - 1, '└', style);
        fb.put(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put(x + dx, y, '─', style);
            fb.put(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put(x, y + dy, '│', style);
            fb.put(x + w - 1, y + dy, '│', style);
        }
    }

    /// Draw one board cell; coordinates above row 0 are clipped.
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        ch: char,
        style: Style,
    ) {
        if x < 0 || x >= BOARD_COLS as i8 || y < 0 || y >= BOARD_ROWS as i8 {
            return;
        }
        let px = start_x + 1 + x as u16 * self.cell_w;
        let py = start_y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        session: &Session,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x + 12 >= viewport.width {
            return;
        }

        let label = Style {
            bold: true,
            ..Style::default()
        };
        let value = Style::default();

        let mut y = start_y;
        fb.put_str(panel_x, y, "NEXT", label);
        y += 2;

        // Both queued pieces as mini shape matrices (spawn frames are at
        // most two rows tall).
        for piece in session.lookahead() {
            let style = kind_style(piece.kind);
            for (dy, row) in piece.frame().iter().enumerate() {
                for (dx, &cell) in row.iter().enumerate() {
                    if cell != 0 {
                        fb.fill_rect(
                            panel_x + dx as u16 * self.cell_w,
                            y + dy as u16,
                            self.cell_w,
                            1,
                            '█',
                            style,
                        );
                    }
                }
            }
            y += piece.frame().len() as u16 + 1;
        }

        y += 1;
        for (name, val) in [
            ("LEVEL", session.level().to_string()),
            ("LINES", session.lines_cleared().to_string()),
            ("SCORE", session.score().to_string()),
            ("TIME", format!("{:.0}s", session.elapsed_seconds())),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_str(panel_x, y + 1, &val, value);
            y += 3;
        }
    }
}

fn kind_style(kind: ShapeKind) -> Style {
    let fg = match kind {
        ShapeKind::I => Rgb::new(0, 255, 255),
        ShapeKind::O => Rgb::new(255, 255, 0),
        ShapeKind::S => Rgb::new(0, 255, 0),
        ShapeKind::Z => Rgb::new(255, 0, 0),
        ShapeKind::L => Rgb::new(255, 165, 0),
        ShapeKind::J => Rgb::new(0, 0, 255),
        ShapeKind::T => Rgb::new(128, 0, 128),
    };
    Style {
        fg,
        bg: Rgb::new(20, 20, 26),
        bold: true,
        dim: false,
    }
}
