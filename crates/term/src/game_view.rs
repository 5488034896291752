//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, Position};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// End-of-run figures shown on the win overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResultView {
    pub final_score: u32,
    pub new_record: bool,
}

/// Format a countdown as `m:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

const BOARD_BG: Rgb = Rgb::new(28, 30, 38);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const TILE: CellStyle = CellStyle::new(Rgb::new(30, 30, 30), Rgb::new(225, 220, 200));
const SELECTED: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(250, 200, 60)).bold();
const HINTED: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(120, 210, 130)).bold();
const WRONG: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(200, 60, 60)).bold();
const PENDING: CellStyle = CellStyle::new(Rgb::new(90, 90, 90), Rgb::new(170, 165, 150)).dim();
const PATH: CellStyle = CellStyle::new(Rgb::new(90, 220, 240), BOARD_BG).bold();
const CURSOR: CellStyle = CellStyle::new(Rgb::new(255, 120, 200), BOARD_BG).bold();
const FRAME: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
const OVERLAY: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
const RECORD: CellStyle = CellStyle::new(Rgb::new(250, 200, 60), PANEL_BG).bold();

/// Terminal renderer for a running board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 3 columns per cell leaves room for a glyph with padding on both sides.
        Self {
            cell_w: 3,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Screen placement of the board frame.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the board frame (border included) for a snapshot.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (snap.width * self.cell_w + 2, snap.height + 2)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        result: Option<&ResultView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(VALUE.fg, PANEL_BG).cell(' '));

        let (w, h) = self.frame_size(snap);
        let frame = Frame {
            x: viewport.width.saturating_sub(w + PANEL_W) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, w - 2, h - 2, ' ', CellStyle::new(PATH.fg, BOARD_BG));
        fb.draw_box(frame.x, frame.y, w, h, FRAME);

        self.draw_tiles(fb, snap, frame);
        self.draw_path(fb, snap, frame);
        if snap.status == GameStatus::Playing {
            if let Some(pos) = cursor {
                self.draw_cursor(fb, pos, frame);
            }
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.status {
            GameStatus::Paused => self.draw_overlay(fb, frame, &[("PAUSED", OVERLAY)]),
            GameStatus::Lost => self.draw_overlay(
                fb,
                frame,
                &[("TIME UP", OVERLAY), ("r: retry  m: menu", VALUE)],
            ),
            GameStatus::Won => {
                let score_line = format!("FINAL {}", result.map_or(snap.score, |r| r.final_score));
                let mut lines = vec![("YOU WIN!", OVERLAY), (score_line.as_str(), VALUE)];
                if result.is_some_and(|r| r.new_record) {
                    lines.push(("NEW RECORD", RECORD));
                }
                lines.push(("n: next  r: replay", VALUE));
                self.draw_overlay(fb, frame, &lines);
            }
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<Position>,
        result: Option<&ResultView>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, result, viewport, &mut fb);
        fb
    }

    /// Top-left screen column/row of a board cell.
    fn cell_origin(&self, frame: Frame, pos: Position) -> (u16, u16) {
        (
            frame.x + 1 + pos.x as u16 * self.cell_w,
            frame.y + 1 + pos.y as u16,
        )
    }

    fn draw_tiles(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let is_in = |pair: Option<(Position, Position)>, pos: Position| {
            matches!(pair, Some((a, b)) if a == pos || b == pos)
        };

        for y in 0..snap.height as i16 {
            for x in 0..snap.width as i16 {
                let pos = Position::new(x, y);
                let Some(symbol) = snap.cell(pos) else {
                    continue;
                };
                let style = if is_in(snap.wrong_pair, pos) {
                    WRONG
                } else if is_in(snap.pending, pos) {
                    PENDING
                } else if snap.selected == Some(pos) {
                    SELECTED
                } else if is_in(snap.hint, pos) {
                    HINTED
                } else {
                    TILE
                };
                let (px, py) = self.cell_origin(frame, pos);
                fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
                fb.put_str_centered(px, py, self.cell_w, snap.glyph(symbol), style);
            }
        }
    }

    fn draw_path(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: Frame) {
        let Some(path) = &snap.connection else {
            return;
        };
        let cells = path.cells();
        for i in 1..cells.len().saturating_sub(1) {
            let (prev, cur, next) = (cells[i - 1], cells[i], cells[i + 1]);
            let (px, py) = self.cell_origin(frame, cur);
            if prev.y == next.y {
                fb.fill_rect(px, py, self.cell_w, 1, '─', PATH);
            } else if prev.x == next.x {
                fb.put_str_centered(px, py, self.cell_w, "│", PATH);
            } else {
                fb.put_str_centered(px, py, self.cell_w, "+", PATH);
            }
        }
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, pos: Position, frame: Frame) {
        if self.cell_w < 3 {
            return;
        }
        let (px, py) = self.cell_origin(frame, pos);
        let style = |cell: Option<crate::fb::Cell>| CellStyle {
            bg: cell.map_or(BOARD_BG, |c| c.style.bg),
            ..CURSOR
        };
        let left = style(fb.get(px, py));
        fb.put_char(px, py, '[', left);
        let right_x = px + self.cell_w - 1;
        let right = style(fb.get(right_x, py));
        fb.put_char(right_x, py, ']', right);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x.saturating_add(PANEL_W - 2) > viewport.width {
            return;
        }

        // Label and value lines, plus a blank spacer when there is room.
        let pitch = if PANEL_ROWS * 3 <= viewport.height {
            3
        } else if PANEL_ROWS * 2 <= viewport.height {
            2
        } else {
            return;
        };
        let mut y = frame.y.min(viewport.height - PANEL_ROWS * pitch);
        let mut row = |fb: &mut FrameBuffer, label: &str, value: &str| {
            fb.put_str(panel_x, y, label, LABEL);
            fb.put_str(panel_x, y + 1, value, VALUE);
            y += pitch;
        };

        row(fb, "SCORE", &snap.score.to_string());
        let combo = if snap.combo > 1 {
            format!("x{}", snap.combo)
        } else {
            "-".to_string()
        };
        row(fb, "COMBO", &combo);
        row(fb, "TIME", &format_time(snap.time_left));
        row(fb, "HINTS", &snap.hints_remaining.to_string());
        row(fb, "SHUFFLES", &snap.shuffles_remaining.to_string());
        row(fb, "LEVEL", snap.level_name);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[(&str, CellStyle)]) {
        let inner_w = lines
            .iter()
            .map(|(s, _)| s.chars().count() as u16)
            .max()
            .unwrap_or(0)
            + 4;
        let box_w = inner_w.min(frame.w);
        let box_h = lines.len() as u16 + 2;
        let x = frame.x + frame.w.saturating_sub(box_w) / 2;
        let y = frame.y + frame.h.saturating_sub(box_h) / 2;

        fb.fill_rect(x, y, box_w, box_h, ' ', OVERLAY);
        fb.draw_box(x, y, box_w, box_h, FRAME);
        for (i, (text, style)) in lines.iter().enumerate() {
            fb.put_str_centered(x, y + 1 + i as u16, box_w, text, *style);
        }
    }
}

/// Columns reserved to the right of the board for the side panel.
const PANEL_W: u16 = 14;

/// Label/value rows in the side panel.
const PANEL_ROWS: u16 = 6;
