//! MenuView: level and theme picker shown while the game is idle.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::{format_time, Viewport};
use crate::types::{LEVELS, THEMES};

/// What the menu shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuState {
    pub level_index: usize,
    pub theme_index: usize,
    /// Best score per built-in level, same order as `LEVELS`.
    pub best: Vec<Option<u32>>,
    pub total_games: u32,
}

#[derive(Debug, Default)]
pub struct MenuView;

const TITLE: CellStyle = CellStyle::new(Rgb::new(250, 200, 60), Rgb::new(0, 0, 0)).bold();
const TEXT: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
const ACTIVE: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(120, 210, 130)).bold();
const HELP: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)).dim();

impl MenuView {
    pub fn render_into(&self, menu: &MenuState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT.cell(' '));

        let body_h = LEVELS.len() as u16 + 9;
        let mut y = viewport.height.saturating_sub(body_h) / 2;
        let w = viewport.width;

        fb.put_str_centered(0, y, w, "O N E T", TITLE);
        y += 1;
        fb.put_str_centered(0, y, w, "connect the pairs", HELP);
        y += 2;

        for (i, level) in LEVELS.iter().enumerate() {
            let best = match menu.best.get(i).copied().flatten() {
                Some(score) => format!("best {score}"),
                None => "best -".to_string(),
            };
            let line = format!(
                "{} {:<9} {}x{} {:>5}  {}",
                i + 1,
                level.name,
                level.cols,
                level.rows,
                format_time(level.time_secs),
                best
            );
            let style = if i == menu.level_index { ACTIVE } else { TEXT };
            fb.put_str_centered(0, y, w, &line, style);
            y += 1;
        }
        y += 1;

        let theme = THEMES.get(menu.theme_index).unwrap_or(&THEMES[0]);
        let sample: String = theme.items.iter().take(6).copied().collect::<Vec<_>>().join(" ");
        fb.put_str_centered(0, y, w, &format!("theme: {}  {}", theme.name, sample), TEXT);
        y += 2;

        fb.put_str_centered(0, y, w, &format!("games played: {}", menu.total_games), HELP);
        y += 2;
        fb.put_str_centered(0, y, w, "1-4 level  t theme  enter start  q quit", HELP);
    }

    pub fn render(&self, menu: &MenuState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(menu, viewport, &mut fb);
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height()).map(|y| fb.row_string(y) + "\n").collect()
    }

    #[test]
    fn lists_every_level_with_best_scores() {
        let menu = MenuState {
            level_index: 1,
            theme_index: 1,
            best: vec![Some(1500), None, None, None],
            total_games: 7,
        };
        let fb = MenuView.render(&menu, Viewport::new(60, 20));
        let text = screen(&fb);
        for level in LEVELS {
            assert!(text.contains(level.name), "missing {}", level.name);
        }
        assert!(text.contains("best 1500"));
        assert!(text.contains("Lowercase"));
        assert!(text.contains("games played: 7"));
    }
}
