//! Terminal Onet runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `tui_onet::term`. The game advances on a fixed 16ms tick.

use std::fs::OpenOptions;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tui_onet::core::{GameConfig, GameEvent, GameSnapshot, GameState, SimpleRng};
use tui_onet::input::{handle_key_event, handle_menu_key, should_quit, InputHandler, MenuCommand};
use tui_onet::stats::{GameStats, StatsStore};
use tui_onet::term::{
    FrameBuffer, GameView, MenuState, MenuView, ResultView, TerminalRenderer, Viewport,
};
use tui_onet::types::{GameAction, GameStatus, LEVELS, THEMES, TICK_MS};
use tui_onet::AppConfig;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file when `ONET_LOG_PATH` is set; the terminal is in raw mode.
fn init_logging(config: &AppConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn menu_state(stats: &GameStats, level_index: usize, theme_index: usize) -> MenuState {
    MenuState {
        level_index,
        theme_index,
        best: LEVELS.iter().map(|l| stats.best(l.id)).collect(),
        total_games: stats.total_games,
    }
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let store = StatsStore::new(&config.stats_path);
    let mut stats = store.load();

    let seed = config
        .seed
        .unwrap_or_else(|| SimpleRng::from_time().next_u64());
    let mut game = GameState::new(GameConfig::from_env(), seed);
    info!(seed, stats = %store.path().display(), "starting");

    let mut menu = menu_state(&stats, config.level_index, config.theme_index);
    let game_view = GameView::default();
    let menu_view = MenuView;
    let mut input = InputHandler::new();
    let mut result: Option<ResultView> = None;

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game.snapshot_into(&mut snap);
        if snap.status == GameStatus::Idle {
            menu_view.render_into(&menu, viewport, &mut fb);
        } else {
            input.resize(snap.width, snap.height);
            game_view.render_into(&snap, Some(input.cursor()), result.as_ref(), viewport, &mut fb);
        }
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if game.status() == GameStatus::Idle {
                        match handle_menu_key(key) {
                            Some(MenuCommand::SelectLevel(i)) if i < LEVELS.len() => {
                                menu.level_index = i;
                            }
                            Some(MenuCommand::NextTheme) => {
                                menu.theme_index = (menu.theme_index + 1) % THEMES.len();
                            }
                            Some(MenuCommand::Start) => {
                                let start = GameAction::Start {
                                    level_index: menu.level_index,
                                    theme_index: menu.theme_index,
                                };
                                if game.apply_action(start) {
                                    input.reset();
                                    result = None;
                                }
                            }
                            _ => {}
                        }
                    } else if let Some(action) = handle_key_event(key).and_then(|cmd| input.handle(cmd)) {
                        let changed = game.apply_action(action);
                        match action {
                            GameAction::Restart | GameAction::NextLevel if changed => {
                                input.reset();
                                result = None;
                            }
                            GameAction::Menu if changed => {
                                menu = menu_state(&stats, game.level_index(), game.theme_index());
                            }
                            _ => {}
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);

            for event in game.take_events() {
                match event {
                    GameEvent::Won(summary) => {
                        let outcome = stats.record(&summary, true);
                        result = Some(ResultView {
                            final_score: outcome.final_score,
                            new_record: outcome.new_record,
                        });
                        save_stats(&store, &stats);
                    }
                    GameEvent::Lost(summary) => {
                        stats.record(&summary, false);
                        save_stats(&store, &stats);
                    }
                    _ => {}
                }
            }
        }
    }
}

fn save_stats(store: &StatsStore, stats: &GameStats) {
    if let Err(err) = store.save(stats) {
        error!(error = %err, "failed to save stats");
    }
}
