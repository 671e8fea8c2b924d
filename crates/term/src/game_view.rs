//! GameView: lays out one or two player boards into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Piece;
use crate::engine::{GameOutcome, PlayerSnapshot};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, PlayerId};

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

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct MatchView<'a> {
    pub players: &'a [PlayerSnapshot],
    pub paused: bool,
    pub outcome: Option<GameOutcome>,
    pub best_score: Option<u32>,
}

const PANEL_W: u16 = 14;
const PANEL_GAP: u16 = 2;
const BOARD_GAP: u16 = 4;
const PREVIEW_ROWS: u16 = 4;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, view: &MatchView<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let blocks: Vec<(u16, u16)> = view
            .players
            .iter()
            .map(|p| self.frame_size(p))
            .collect();
        let total_w: u16 = blocks
            .iter()
            .map(|&(w, _)| w + PANEL_GAP + PANEL_W)
            .sum::<u16>()
            + BOARD_GAP * (blocks.len().saturating_sub(1) as u16);
        let total_h = blocks.iter().map(|&(_, h)| h).max().unwrap_or(0);

        let mut x = viewport.width.saturating_sub(total_w) / 2;
        let y = viewport.height.saturating_sub(total_h) / 2;

        let versus = view.players.len() > 1;
        for (player, &(frame_w, frame_h)) in view.players.iter().zip(&blocks) {
            self.draw_board(fb, player, x, y);
            self.draw_panel(fb, player, versus, x + frame_w + PANEL_GAP, y, view.best_score);

            if let Some(text) = overlay_text(view, player.id, versus) {
                draw_overlay(fb, x, y, frame_w, frame_h, text);
            }
            x = x.saturating_add(frame_w + PANEL_GAP + PANEL_W + BOARD_GAP);
        }

        if view.outcome.is_some() {
            let hint = "R restart   Q quit";
            let hint_x = viewport.width.saturating_sub(hint.len() as u16) / 2;
            let hint_y = y.saturating_add(total_h);
            fb.put_str(hint_x, hint_y, hint, CellStyle::default().dim());
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, view: &MatchView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(view, viewport, &mut fb);
        fb
    }

    /// Outer size of a board including its border.
    fn frame_size(&self, player: &PlayerSnapshot) -> (u16, u16) {
        (
            player.board.width as u16 * self.cell_w + 2,
            player.board.height as u16 * self.cell_h + 2,
        )
    }

    fn draw_board(&self, fb: &mut FrameBuffer, player: &PlayerSnapshot, x: u16, y: u16) {
        let board = &player.board;
        let (frame_w, frame_h) = self.frame_size(player);
        draw_border(fb, x, y, frame_w, frame_h, CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG));

        let empty = CellStyle::plain(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for row in 0..board.height as usize {
            for col in 0..board.width as usize {
                match PieceKind::from_color(board.cell(col, row)) {
                    Some(kind) => self.draw_cell(fb, x, y, col as i16, row as i16, '█', piece_style(kind)),
                    None => self.draw_cell(fb, x, y, col as i16, row as i16, '·', empty),
                }
            }
        }

        let Some(active) = board.active else {
            return;
        };
        if let Some(ghost_y) = board.ghost_y {
            let ghost = CellStyle::plain(Rgb::new(140, 140, 140), BOARD_BG).dim();
            for (dx, dy) in active.piece.minos() {
                let gx = active.x as i16 + dx as i16;
                let gy = ghost_y as i16 + dy as i16;
                self.draw_cell(fb, x, y, gx, gy, '░', ghost);
            }
        }
        let style = piece_style(active.piece.kind()).bold();
        for (cx, cy) in active.cells() {
            self.draw_cell(fb, x, y, cx as i16, cy as i16, '█', style);
        }
    }

    /// Fill one board cell; cells off the board (e.g. above row 0) are skipped.
    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        frame_x: u16,
        frame_y: u16,
        col: i16,
        row: i16,
        ch: char,
        style: CellStyle,
    ) {
        if col < 0 || row < 0 {
            return;
        }
        let px = frame_x + 1 + col as u16 * self.cell_w;
        let py = frame_y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        player: &PlayerSnapshot,
        versus: bool,
        x: u16,
        y: u16,
        best_score: Option<u32>,
    ) {
        let label = CellStyle::default().bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);
        let mut y = y;

        if versus {
            let name = match player.id {
                PlayerId::One => "PLAYER 1",
                PlayerId::Two => "PLAYER 2",
            };
            fb.put_str(x, y, name, label);
            y += 2;
        }

        for (name, number) in [
            ("SCORE", player.stats.score),
            ("LEVEL", player.stats.level),
            ("LINES", player.stats.lines),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u32(x, y + 1, number, value);
            y += 3;
        }

        fb.put_str(x, y, "HOLD", label);
        let hold_style = if player.board.can_hold { value } else { value.dim() };
        self.draw_preview(fb, player.board.held, x, y + 1, hold_style);
        y += PREVIEW_ROWS + 1;

        fb.put_str(x, y, "NEXT", label);
        self.draw_preview(fb, player.board.next, x, y + 1, value);
        y += PREVIEW_ROWS + 1;

        if let Some(best) = best_score {
            fb.put_str(x, y, "BEST", label);
            fb.put_u32(x, y + 1, best, value);
        }
    }

    /// Small drawing of a piece, trimmed to its occupied rows and columns.
    fn draw_preview(&self, fb: &mut FrameBuffer, piece: Option<Piece>, x: u16, y: u16, style: CellStyle) {
        let Some(piece) = piece else {
            fb.put_str(x, y, "-", style);
            return;
        };
        let minos = piece.minos();
        let min_x = minos.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let min_y = minos.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let color = piece_style(piece.kind());
        let color = CellStyle {
            bg: SCREEN_BG,
            dim: style.dim,
            ..color
        };
        for &(dx, dy) in minos.iter() {
            let row = (dy - min_y) as u16;
            if row >= PREVIEW_ROWS {
                continue;
            }
            let col = (dx - min_x) as u16;
            fb.fill_rect(x + col * 2, y + row, 2, 1, '█', color);
        }
    }
}

fn overlay_text(view: &MatchView<'_>, player: PlayerId, versus: bool) -> Option<&'static str> {
    match view.outcome {
        Some(outcome) if versus => Some(if outcome.winner == Some(player) {
            "YOU WIN!"
        } else {
            "YOU LOSE"
        }),
        Some(_) => Some("GAME OVER"),
        None if view.paused => Some("PAUSED"),
        None => None,
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in x + 1..right {
        fb.put_char(dx, y, '─', style);
        fb.put_char(dx, bottom, '─', style);
    }
    for dy in y + 1..bottom {
        fb.put_char(x, dy, '│', style);
        fb.put_char(right, dy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, frame_w: u16, frame_h: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let tx = x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let ty = y.saturating_add(frame_h / 2);
    fb.put_str(tx, ty, text, CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold());
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    };
    CellStyle::plain(fg, BOARD_BG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, ScriptedSource, Stats};

    fn snapshot(id: PlayerId, kinds: &[PieceKind]) -> PlayerSnapshot {
        let board = Board::new(10, 20, Box::new(ScriptedSource::new(kinds.to_vec())));
        PlayerSnapshot {
            id,
            board: board.snapshot(),
            stats: Stats::default(),
        }
    }

    #[test]
    fn overlay_text_per_state() {
        let players = [snapshot(PlayerId::One, &[PieceKind::T])];
        let mut view = MatchView {
            players: &players,
            paused: true,
            outcome: None,
            best_score: None,
        };
        assert_eq!(overlay_text(&view, PlayerId::One, false), Some("PAUSED"));

        view.outcome = Some(GameOutcome {
            loser: PlayerId::One,
            winner: Some(PlayerId::Two),
        });
        assert_eq!(overlay_text(&view, PlayerId::One, true), Some("YOU LOSE"));
        assert_eq!(overlay_text(&view, PlayerId::Two, true), Some("YOU WIN!"));
        assert_eq!(overlay_text(&view, PlayerId::One, false), Some("GAME OVER"));
    }

    #[test]
    fn active_piece_is_drawn_in_frame() {
        let players = [snapshot(PlayerId::One, &[PieceKind::O])];
        let view = MatchView {
            players: &players,
            paused: false,
            outcome: None,
            best_score: Some(1200),
        };
        let fb = GameView::default().render(&view, Viewport::new(60, 24));
        assert!(fb.contains_text("┌"));
        assert!(fb.contains_text("████"));
        assert!(fb.contains_text("SCORE"));
        assert!(fb.contains_text("BEST"));
        assert!(fb.contains_text("1200"));
    }
}
