use tui_onet::core::{GameConfig, GameSnapshot, GameState};
use tui_onet::term::{FrameBuffer, GameView, MenuState, MenuView, ResultView, Viewport};
use tui_onet::types::{GameAction, GameStatus, Position};

fn beginner_snapshot() -> GameSnapshot {
    let mut game = GameState::new(GameConfig::default(), 1);
    game.apply_action(GameAction::Start {
        level_index: 0,
        theme_index: 2,
    });
    game.snapshot()
}

fn screen(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_string(y))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn term_view_renders_border_corners() {
    let snap = beginner_snapshot();
    let view = GameView::default();
    // 4x6 content plus ring = 6x8 cells, 3 columns each, plus frame.
    assert_eq!(view.frame_size(&snap), (20, 10));

    let fb = view.render(&snap, None, None, Viewport::new(34, 10));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(19, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 9).unwrap().ch, '└');
    assert_eq!(fb.get(19, 9).unwrap().ch, '┘');
}

#[test]
fn term_view_draws_tile_glyph_centered_in_cell() {
    let snap = beginner_snapshot();
    let fb = GameView::default().render(&snap, None, None, Viewport::new(34, 10));

    let pos = Position::new(1, 1);
    let symbol = snap.cell(pos).unwrap();
    let glyph = snap.glyph(symbol).chars().next().unwrap();
    // Frame at (0,0); cell (1,1) starts at column 1 + 3 and row 1 + 1.
    assert_eq!(fb.get(5, 2).unwrap().ch, glyph);
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let mut snap = beginner_snapshot();
    snap.score = 1234;
    snap.combo = 3;

    let fb = GameView::default().render(&snap, None, None, Viewport::new(40, 20));
    let text = screen(&fb);
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("x3"));
    assert!(text.contains("2:00"));
    assert!(text.contains("Beginner"));

    let narrow = GameView::default().render(&snap, None, None, Viewport::new(20, 20));
    assert!(!screen(&narrow).contains("SCORE"));
}

#[test]
fn term_view_shows_cursor_only_while_playing() {
    let mut snap = beginner_snapshot();
    let cursor = Some(Position::new(2, 3));
    let vp = Viewport::new(34, 10);

    let fb = GameView::default().render(&snap, cursor, None, vp);
    // Cell (2,3) starts at column 1 + 6, row 1 + 3.
    assert_eq!(fb.get(7, 4).unwrap().ch, '[');
    assert_eq!(fb.get(9, 4).unwrap().ch, ']');

    snap.status = GameStatus::Paused;
    let fb = GameView::default().render(&snap, cursor, None, vp);
    assert_ne!(fb.get(7, 4).unwrap().ch, '[');
}

#[test]
fn term_view_overlays_match_status() {
    let base = beginner_snapshot();
    let vp = Viewport::new(60, 20);
    let view = GameView::default();

    let paused = GameSnapshot {
        status: GameStatus::Paused,
        ..base.clone()
    };
    assert!(screen(&view.render(&paused, None, None, vp)).contains("PAUSED"));

    let lost = GameSnapshot {
        status: GameStatus::Lost,
        ..base.clone()
    };
    assert!(screen(&view.render(&lost, None, None, vp)).contains("TIME UP"));

    let won = GameSnapshot {
        status: GameStatus::Won,
        ..base
    };
    let result = ResultView {
        final_score: 999,
        new_record: true,
    };
    let text = screen(&view.render(&won, None, Some(&result), vp));
    assert!(text.contains("YOU WIN!"));
    assert!(text.contains("FINAL 999"));
    assert!(text.contains("NEW RECORD"));
}

#[test]
fn menu_lists_levels_best_scores_and_games() {
    let menu = MenuState {
        level_index: 1,
        theme_index: 0,
        best: vec![Some(420), None, None, None],
        total_games: 7,
    };
    let text = screen(&MenuView.render(&menu, Viewport::new(60, 24)));
    assert!(text.contains("O N E T"));
    assert!(text.contains("Beginner"));
    assert!(text.contains("best 420"));
    assert!(text.contains("Zen"));
    assert!(text.contains("games played: 7"));
}
