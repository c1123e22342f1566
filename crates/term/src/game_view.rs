//! GameView: maps the game state into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. The view reads the controller and
//! board exclusively through their public accessors — it has no way to mutate
//! the simulation.

use gridfall_core::catalog::{self, TileColors};
use gridfall_core::Game;
use gridfall_types::Rgb;

use crate::fb::{FrameBuffer, TermCell};

/// Terminal dimensions the view should lay out against.
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

/// Board cell width in terminal columns; 2x1 compensates for the typical
/// terminal glyph aspect ratio.
const CELL_W: u16 = 2;
/// Side panel width in terminal columns.
const PANEL_W: u16 = 18;
/// Gap between the playfield frame and the side panel.
const PANEL_GAP: u16 = 2;

const FRAME_FG: Rgb = Rgb::new(200, 200, 200);
const WELL_BG: Rgb = Rgb::new(18, 18, 26);
const GRID_DOT_FG: Rgb = Rgb::new(46, 46, 58);
const TEXT_FG: Rgb = Rgb::new(220, 220, 220);
const LABEL_FG: Rgb = Rgb::new(140, 140, 150);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Renders the playfield, the side panel, and the status overlays.
#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    /// Render the current game state into an existing framebuffer, resizing
    /// it to the viewport when necessary.
    pub fn render_into(&self, game: &Game, viewport: Viewport, fb: &mut FrameBuffer) {
        if fb.width() != viewport.width || fb.height() != viewport.height {
            fb.resize(viewport.width, viewport.height);
        } else {
            fb.clear();
        }

        let board = game.board();
        let cols = board.width() as u16;
        let rows = board.visible_rows() as u16;
        let frame_w = cols * CELL_W + 2;
        let frame_h = rows + 2;
        let total_w = frame_w + PANEL_GAP + PANEL_W;

        let origin_x = viewport.width.saturating_sub(total_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;
        let well_x = origin_x + 1;
        let well_y = origin_y + 1;

        self.draw_frame(fb, origin_x, origin_y, frame_w, frame_h);

        // Well background with faint grid dots.
        for y in 0..rows {
            for x in 0..cols {
                let px = well_x + x * CELL_W;
                fb.set(px, well_y + y, TermCell::new('·', GRID_DOT_FG, WELL_BG));
                fb.set(px + 1, well_y + y, TermCell::new(' ', GRID_DOT_FG, WELL_BG));
            }
        }

        // Locked tiles, visible region only.
        let first_visible = board.first_visible_row();
        for y in 0..rows {
            for x in 0..cols {
                if let Some(Some(kind)) = board.tile(x as i8, y as i8 + first_visible) {
                    self.draw_tile(fb, well_x + x * CELL_W, well_y + y, catalog::colors(kind));
                }
            }
        }

        // The falling piece. Not drawn before the first start command; after
        // game over the frozen piece stays visible under the overlay.
        if !game.is_new_game() {
            if let Some(piece) = game.active() {
                for (dx, dy) in catalog::filled_cells(piece.kind, piece.rotation) {
                    let row = piece.row + dy - first_visible;
                    let col = piece.col + dx;
                    if row < 0 || col < 0 {
                        continue;
                    }
                    self.draw_tile(
                        fb,
                        well_x + col as u16 * CELL_W,
                        well_y + row as u16,
                        catalog::colors(piece.kind),
                    );
                }
            }
        }

        self.draw_panel(fb, game, origin_x + frame_w + PANEL_GAP, well_y);
        self.draw_overlay(fb, game, origin_x, origin_y, frame_w, frame_h);
    }

    /// Convenience wrapper allocating a fresh framebuffer.
    pub fn render(&self, game: &Game, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(game, viewport, &mut fb);
        fb
    }

    fn draw_frame(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let frame = |ch| TermCell::new(ch, FRAME_FG, SCREEN_BG);
        for dx in 1..w.saturating_sub(1) {
            fb.set(x + dx, y, frame('─'));
            fb.set(x + dx, y + h - 1, frame('─'));
        }
        for dy in 1..h.saturating_sub(1) {
            fb.set(x, y + dy, frame('│'));
            fb.set(x + w - 1, y + dy, frame('│'));
        }
        fb.set(x, y, frame('┌'));
        fb.set(x + w - 1, y, frame('┐'));
        fb.set(x, y + h - 1, frame('└'));
        fb.set(x + w - 1, y + h - 1, frame('┘'));
    }

    /// One board cell as a two-column bevel: light left edge, dark right
    /// edge, base color in between.
    fn draw_tile(&self, fb: &mut FrameBuffer, px: u16, py: u16, colors: TileColors) {
        fb.set(px, py, TermCell::new('▌', colors.light, colors.base));
        fb.set(px + 1, py, TermCell::new('▐', colors.dark, colors.base));
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, game: &Game, x: u16, y: u16) {
        fb.text(x, y, "NEXT", LABEL_FG, SCREEN_BG);

        let next = game.next_kind();
        let dim = catalog::dimension(next);
        for (dx, dy) in catalog::filled_cells(next, 0) {
            // Center the preview box horizontally under the label.
            let pad = (4 - dim) as u16;
            self.draw_tile(
                fb,
                x + pad + dx as u16 * CELL_W,
                y + 2 + dy as u16,
                catalog::colors(next),
            );
        }

        fb.text(x, y + 7, "SCORE", LABEL_FG, SCREEN_BG);
        fb.text(x, y + 8, &format!("{:>7}", game.score()), TEXT_FG, SCREEN_BG);
        fb.text(x, y + 10, "LEVEL", LABEL_FG, SCREEN_BG);
        fb.text(x, y + 11, &format!("{:>7}", game.level()), TEXT_FG, SCREEN_BG);

        fb.text(x, y + 14, "A/D  move", LABEL_FG, SCREEN_BG);
        fb.text(x, y + 15, "Q/E  rotate", LABEL_FG, SCREEN_BG);
        fb.text(x, y + 16, "S    drop", LABEL_FG, SCREEN_BG);
        fb.text(x, y + 17, "P    pause", LABEL_FG, SCREEN_BG);
        fb.text(x, y + 18, "ESC  quit", LABEL_FG, SCREEN_BG);
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        game: &Game,
        x: u16,
        y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let mid_y = y + frame_h / 2;
        let centered = |fb: &mut FrameBuffer, row: u16, s: &str| {
            let tx = x + (frame_w.saturating_sub(s.len() as u16)) / 2;
            fb.text(tx, row, s, TEXT_FG, SCREEN_BG);
        };

        if game.is_paused() {
            centered(fb, mid_y, " PAUSED ");
        } else if game.is_new_game() {
            centered(fb, mid_y, " GRIDFALL ");
            centered(fb, mid_y + 2, " press enter ");
        } else if game.is_game_over() {
            centered(fb, mid_y, " GAME OVER ");
            centered(fb, mid_y + 2, " press enter ");
        }
    }
}
