//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: the next piece on the line above the board frame (at
//! its spawn column), then the framed board. Score and help sit in a side panel.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb, TermCell};
use crate::palette::Palette;
use crate::types::{DropMode, Identity, Phase};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);

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

/// Where the board frame sits in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Top-left corner of the frame border.
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
}

pub struct GameView {
    palette: Palette,
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl GameView {
    /// Two terminal columns per cell keeps cells roughly square.
    pub fn new(palette: Palette) -> Self {
        Self { palette, cell_w: 2 }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TermCell::default());

        let layout = self.layout(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let grid = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();

        self.draw_border(fb, layout, border);

        for (row, cells) in (0..snap.board.rows()).filter_map(|r| Some((r, snap.board.row(r)?))) {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Some(identity) => self.draw_piece(fb, layout, row as i32, col as i32, *identity),
                    None => self.fill_cell(fb, layout, row as i32, col as i32, '·', grid),
                }
            }
        }

        if let Some(active) = snap.active {
            if let Some(ghost_row) = snap.ghost_row.filter(|&g| g > active.row) {
                let ghost = CellStyle::new(self.palette.swatch(active.identity).color, PLAY_BG).dim();
                self.fill_cell(fb, layout, ghost_row, active.col, '░', ghost);
            }
            self.draw_piece(fb, layout, active.row, active.col, active.identity);
        }

        if !snap.game_over() {
            // Row -1 is the top border; the line above it shows the next piece.
            self.draw_piece(fb, layout, -2, snap.next.col, snap.next.identity);
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        match snap.phase {
            Phase::GameOver => {
                self.draw_overlay_text(fb, layout, 0, "GAME OVER");
                self.draw_overlay_text(fb, layout, 1, "r to restart");
            }
            Phase::Idle => self.draw_overlay_text(fb, layout, 0, "LOADING"),
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> Layout {
        let frame_w = (snap.board.columns() as u16).saturating_mul(self.cell_w) + 2;
        let frame_h = snap.board.rows() as u16 + 2;
        // One extra line on top for the next piece.
        let total_h = frame_h + 1;
        Layout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y: viewport.height.saturating_sub(total_h) / 2 + 1,
            frame_w,
            frame_h,
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout, style: CellStyle) {
        let (x, y, w, h) = (l.frame_x, l.frame_y, l.frame_w, l.frame_h);
        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', CellStyle::new(PLAY_BG, PLAY_BG));

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, l: Layout, row: i32, col: i32, identity: Identity) {
        let swatch = self.palette.swatch(identity);
        let Some((px, py)) = self.cell_origin(l, row, col) else {
            return;
        };
        let style = swatch.style();
        fb.put_char(px, py, swatch.letter, style);
        fb.fill_rect(px + 1, py, self.cell_w - 1, 1, ' ', style);
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, l: Layout, row: i32, col: i32, ch: char, style: CellStyle) {
        if let Some((px, py)) = self.cell_origin(l, row, col) {
            fb.fill_rect(px, py, self.cell_w, 1, ch, style);
        }
    }

    /// Terminal position of board cell `(row, col)`. Rows above the board map
    /// onto the lines above the frame.
    fn cell_origin(&self, l: Layout, row: i32, col: i32) -> Option<(u16, u16)> {
        let px = i32::from(l.frame_x) + 1 + col * i32::from(self.cell_w);
        let py = i32::from(l.frame_y) + 1 + row;
        Some((u16::try_from(px).ok()?, u16::try_from(py).ok()?))
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, l: Layout) {
        let panel_x = l.frame_x.saturating_add(l.frame_w).saturating_add(2);
        if panel_x.saturating_add(10) > viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let dim = value.dim();

        let mut y = l.frame_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("BEST", snap.best_score),
            ("CHAIN", snap.chain),
            ("GROUPS", snap.groups_cleared),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        let next = self.palette.swatch(snap.next.identity);
        fb.put_char(panel_x, y + 1, next.letter, next.style());
        fb.put_char(panel_x + 1, y + 1, ' ', next.style());
        y += 3;

        if snap.drop_mode == DropMode::Accelerated {
            fb.put_str(panel_x, y, "SOFT DROP", value.bold());
        }
        y += 2;

        for help in ["←/→ move", "↓/space drop", "r restart", "q quit"] {
            fb.put_str(panel_x, y, help, dim);
            y += 1;
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, l: Layout, line: u16, text: &str) {
        let y = l.frame_y + l.frame_h / 2 + line;
        let text_w = text.chars().count() as u16;
        let x = l.frame_x + l.frame_w.saturating_sub(text_w) / 2;
        fb.put_str(x, y, text, CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ActivePiece, Board};
    use crate::engine::ReadinessGate;

    fn view(identities: u8) -> GameView {
        let mut gate = ReadinessGate::new(identities);
        GameView::new(Palette::build(identities, &mut gate))
    }

    fn snapshot() -> GameSnapshot {
        let mut snap = GameSnapshot::new(4, 3);
        snap.board = Board::from_rows(&["...", "...", "...", "AB."]).unwrap();
        snap.active = Some(ActivePiece::new(Identity::new(2), 0, 1));
        snap.ghost_row = Some(2);
        snap.next = ActivePiece::new(Identity::new(1), 0, 1);
        snap.phase = Phase::Falling;
        snap.score = 42;
        snap
    }

    fn span(fb: &FrameBuffer, x: u16, y: u16, len: u16) -> String {
        (x..x + len).filter_map(|cx| fb.get(cx, y)).map(|c| c.ch).collect()
    }

    #[test]
    fn renders_board_pieces_and_next() {
        let fb = view(3).render(&snapshot(), Viewport::new(40, 12));
        // Frame is 8x6 plus the next line: frame_x = (40 - 8) / 2, frame_y = (12 - 7) / 2 + 1.
        assert_eq!(fb.get(16, 3).map(|c| c.ch), Some('┌'));
        assert_eq!(span(&fb, 19, 2, 2), "B ");
        assert_eq!(span(&fb, 17, 4, 6), "··C ··");
        assert_eq!(span(&fb, 17, 6, 6), "··░░··");
        assert_eq!(span(&fb, 17, 7, 6), "A B ··");
        assert_eq!(fb.get(16, 8).map(|c| c.ch), Some('└'));
    }

    #[test]
    fn side_panel_shows_score() {
        let fb = view(3).render(&snapshot(), Viewport::new(40, 12));
        let panel_x = 16 + 8 + 2;
        assert_eq!(span(&fb, panel_x, 3, 5), "SCORE");
        assert_eq!(span(&fb, panel_x, 4, 2), "42");
    }

    #[test]
    fn game_over_overlay() {
        let mut snap = snapshot();
        snap.phase = Phase::GameOver;
        snap.active = None;
        let fb = view(3).render(&snap, Viewport::new(40, 12));
        let text: String = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("r to restart"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let fb = view(3).render(&snapshot(), Viewport::new(3, 2));
        assert_eq!(fb.width(), 3);
    }
}
