//! Game state module - the match/selection state machine
//!
//! `GameState` owns everything about one run: the board, the selection, the
//! score and combo, hint/shuffle budgets, the countdown and the delayed
//! effects. It is mutated only through [`GameState::apply_action`] and
//! [`GameState::tick`]; renderers read [`GameState::snapshot`].
//!
//! Time is a play clock in milliseconds that advances only while the status is
//! `Playing`, so pausing freezes the countdown and every pending effect.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::CoreError;
use crate::path::{find_path, ConnectionPath};
use crate::rng::SimpleRng;
use crate::scoring::{calculate_match_score, ComboTracker};
use crate::shuffle::reshuffle;
use crate::snapshot::GameSnapshot;
use crate::solver::{find_available_pair, is_deadlocked};
use crate::timers::{Scheduler, TaskKind};
use crate::types::{
    GameAction, GameStatus, Level, Position, Symbol, Theme, CLOCK_STEP_MS, LEVELS, THEMES,
};

/// End-of-run figures handed to the stats collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub level_id: &'static str,
    /// Position of the level in the level table (0-based).
    pub level_index: usize,
    /// Score from matches, before end-of-run bonuses.
    pub base_score: u32,
    pub hints_remaining: u32,
    pub shuffles_remaining: u32,
    pub time_left: u32,
}

/// Notable things that happened since the last [`GameState::take_events`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Matched {
        first: Position,
        second: Position,
        value: Symbol,
        points: u32,
        combo: u32,
    },
    Mismatched {
        first: Position,
        second: Position,
    },
    Reshuffled {
        attempts: u32,
        manual: bool,
    },
    HintShown {
        first: Position,
        second: Position,
    },
    Won(RunSummary),
    Lost(RunSummary),
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    rng: SimpleRng,
    status: GameStatus,
    level: Level,
    level_index: usize,
    theme: Theme,
    theme_index: usize,
    board: Board,
    selected: Option<Position>,
    hint: Option<(Position, Position)>,
    wrong_pair: Option<(Position, Position)>,
    pending: Option<(Position, Position)>,
    connection: Option<ConnectionPath>,
    score: u32,
    combo: ComboTracker,
    hints_remaining: u32,
    shuffles_remaining: u32,
    time_left: u32,
    /// Play time of the current run.
    clock_ms: u64,
    /// Play time at which `time_left` drops next.
    next_second_ms: u64,
    scheduler: Scheduler,
    events: Vec<GameEvent>,
    /// Monotonic run counter (increments on every successful start).
    run_id: u32,
}

impl GameState {
    /// Create an idle game. Boards are drawn from an RNG seeded with `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let config = config.normalized();
        Self {
            config,
            rng: SimpleRng::new(seed),
            status: GameStatus::Idle,
            level: LEVELS[0],
            level_index: 0,
            theme: THEMES[0],
            theme_index: 0,
            board: Board::default(),
            selected: None,
            hint: None,
            wrong_pair: None,
            pending: None,
            connection: None,
            score: 0,
            combo: ComboTracker::new(),
            hints_remaining: config.initial_hints,
            shuffles_remaining: config.initial_shuffles,
            time_left: 0,
            clock_ms: 0,
            next_second_ms: CLOCK_STEP_MS as u64,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            run_id: 0,
        }
    }

    /// Start a run on a built-in level and theme.
    ///
    /// On error the state is left untouched.
    pub fn start(&mut self, level_index: usize, theme_index: usize) -> Result<(), CoreError> {
        let level = *LEVELS
            .get(level_index)
            .ok_or(CoreError::UnknownLevel(level_index))?;
        let theme = *THEMES
            .get(theme_index)
            .ok_or(CoreError::UnknownTheme(theme_index))?;
        self.begin(level, level_index, theme, theme_index)
    }

    /// Start a run on caller-supplied level and theme definitions.
    ///
    /// Levels not in the built-in table count as the first level for
    /// end-of-run bonuses and `NextLevel`.
    pub fn start_custom(&mut self, level: Level, theme: Theme) -> Result<(), CoreError> {
        let level_index = LEVELS.iter().position(|l| l.id == level.id).unwrap_or(0);
        let theme_index = THEMES.iter().position(|t| t.id == theme.id).unwrap_or(0);
        self.begin(level, level_index, theme, theme_index)
    }

    fn begin(
        &mut self,
        level: Level,
        level_index: usize,
        theme: Theme,
        theme_index: usize,
    ) -> Result<(), CoreError> {
        let mut rng = self.rng.clone();
        let mut board = Board::initialize(&level, &theme, &mut rng)?;
        if is_deadlocked(&board, self.config.max_turns) {
            let attempts = reshuffle(
                &mut board,
                &mut rng,
                self.config.max_turns,
                self.config.max_reshuffle_attempts,
            )?;
            debug!(attempts, "initial board was deadlocked");
        }

        let run_id = self.run_id.wrapping_add(1);
        let events = std::mem::take(&mut self.events);
        *self = Self::new(self.config, 0);
        self.events = events;
        self.rng = rng;
        self.run_id = run_id;
        self.level = level;
        self.level_index = level_index;
        self.theme = theme;
        self.theme_index = theme_index;
        self.board = board;
        self.time_left = level.time_secs;
        self.status = GameStatus::Playing;

        info!(
            run_id,
            level = level.id,
            theme = theme.id,
            tiles = self.board.remaining_count(),
            "run started"
        );
        Ok(())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn theme_index(&self) -> usize {
        self.theme_index
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn hint(&self) -> Option<(Position, Position)> {
        self.hint
    }

    pub fn wrong_pair(&self) -> Option<(Position, Position)> {
        self.wrong_pair
    }

    pub fn pending(&self) -> Option<(Position, Position)> {
        self.pending
    }

    pub fn connection(&self) -> Option<&ConnectionPath> {
        self.connection.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo.count()
    }

    pub fn hints_remaining(&self) -> u32 {
        self.hints_remaining
    }

    pub fn shuffles_remaining(&self) -> u32 {
        self.shuffles_remaining
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn run_id(&self) -> u32 {
        self.run_id
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            level_id: self.level.id,
            level_index: self.level_index,
            base_score: self.score,
            hints_remaining: self.hints_remaining,
            shuffles_remaining: self.shuffles_remaining,
            time_left: self.time_left,
        }
    }

    /// Drain the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.cells.clear();
        out.cells
            .extend(self.board.cells().iter().map(|c| c.map(|t| t.value)));
        out.selected = self.selected;
        out.hint = self.hint;
        out.wrong_pair = self.wrong_pair;
        out.pending = self.pending;
        out.connection = self.connection.clone();
        out.status = self.status;
        out.score = self.score;
        out.combo = self.combo.count();
        out.hints_remaining = self.hints_remaining;
        out.shuffles_remaining = self.shuffles_remaining;
        out.time_left = self.time_left;
        out.remaining_tiles = self.board.remaining_count();
        out.level_id = self.level.id;
        out.level_name = self.level.name;
        out.level_index = self.level_index;
        out.theme_id = self.theme.id;
        out.theme_index = self.theme_index;
        out.glyphs = self.theme.items;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a game action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start {
                level_index,
                theme_index,
            } => match self.start(level_index, theme_index) {
                Ok(()) => true,
                Err(err) => {
                    error!(%err, level_index, theme_index, "failed to start run");
                    false
                }
            },
            GameAction::Tap(pos) => self.tap(pos),
            GameAction::Hint => self.use_hint(),
            GameAction::Shuffle => self.use_shuffle(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Restart => {
                if self.status == GameStatus::Idle {
                    return false;
                }
                self.restart_with(self.level, self.level_index)
            }
            GameAction::NextLevel => {
                if self.status == GameStatus::Idle {
                    return false;
                }
                let next = self.level_index + 1;
                match LEVELS.get(next) {
                    Some(&level) => self.restart_with(level, next),
                    None => false,
                }
            }
            GameAction::Menu => self.to_menu(),
        }
    }

    fn restart_with(&mut self, level: Level, level_index: usize) -> bool {
        match self.begin(level, level_index, self.theme, self.theme_index) {
            Ok(()) => true,
            Err(err) => {
                error!(%err, level = level.id, "failed to restart run");
                false
            }
        }
    }

    fn to_menu(&mut self) -> bool {
        if self.status == GameStatus::Idle {
            return false;
        }
        self.scheduler.cancel_all();
        self.status = GameStatus::Idle;
        self.board = Board::default();
        self.selected = None;
        self.hint = None;
        self.wrong_pair = None;
        self.pending = None;
        self.connection = None;
        info!(run_id = self.run_id, "back to menu");
        true
    }

    fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Playing => {
                self.status = GameStatus::Paused;
                info!(clock_ms = self.clock_ms, "paused");
                true
            }
            GameStatus::Paused => {
                self.status = GameStatus::Playing;
                info!(clock_ms = self.clock_ms, "resumed");
                true
            }
            _ => false,
        }
    }

    fn is_pending(&self, pos: Position) -> bool {
        matches!(self.pending, Some((a, b)) if a == pos || b == pos)
    }

    /// Selection protocol for a tap on `pos`.
    fn tap(&mut self, pos: Position) -> bool {
        if self.status != GameStatus::Playing || self.wrong_pair.is_some() {
            return false;
        }
        if self.is_pending(pos) || !self.board.is_occupied(pos) {
            return false;
        }

        let Some(first) = self.selected else {
            self.selected = Some(pos);
            return true;
        };
        if first == pos {
            self.selected = None;
            return true;
        }

        if self.pending.is_some() {
            // Second match during the removal delay: land the earlier pair first.
            self.commit_removal();
            if self.status != GameStatus::Playing {
                return true;
            }
            if self.selected.is_none() {
                // A reshuffle dropped the selection; start over from this tile.
                self.selected = Some(pos);
                return true;
            }
        }

        self.selected = None;
        let (Some(a), Some(b)) = (self.board.tile(first).copied(), self.board.tile(pos).copied())
        else {
            return true;
        };

        let path = if a.value == b.value {
            find_path(&self.board, first, pos, self.config.max_turns)
        } else {
            None
        };

        match path {
            Some(path) => self.resolve_match(first, pos, a.value, path),
            None => {
                self.wrong_pair = Some((first, pos));
                self.scheduler.schedule(
                    TaskKind::WrongPairClear,
                    self.clock_ms,
                    self.config.wrong_pair_delay_ms,
                );
                self.events.push(GameEvent::Mismatched {
                    first,
                    second: pos,
                });
            }
        }
        true
    }

    fn resolve_match(&mut self, first: Position, second: Position, value: Symbol, path: ConnectionPath) {
        self.hint = None;
        self.scheduler.cancel(TaskKind::HintClear);

        let combo = self
            .combo
            .register_match(self.clock_ms, self.config.combo_window_ms);
        let result = calculate_match_score(
            combo,
            self.config.base_match_points,
            self.config.combo_bonus_step,
        );
        self.score = self.score.saturating_add(result.total);
        self.scheduler.schedule(
            TaskKind::ComboExpiry,
            self.clock_ms,
            self.config.combo_window_ms,
        );

        debug!(
            ?first,
            ?second,
            turns = path.turns(),
            combo,
            points = result.total,
            "pair matched"
        );

        self.connection = Some(path);
        self.pending = Some((first, second));
        self.scheduler.schedule(
            TaskKind::RemovalCommit,
            self.clock_ms,
            self.config.removal_delay_ms,
        );
        self.events.push(GameEvent::Matched {
            first,
            second,
            value,
            points: result.total,
            combo,
        });
    }

    /// Take the pending pair off the board, then settle the outcome.
    fn commit_removal(&mut self) {
        self.scheduler.cancel(TaskKind::RemovalCommit);
        let Some((a, b)) = self.pending.take() else {
            return;
        };
        self.board.clear(a);
        self.board.clear(b);
        self.connection = None;

        if self.board.is_cleared() {
            self.finish(GameStatus::Won);
        } else if is_deadlocked(&self.board, self.config.max_turns) {
            debug!(remaining = self.board.remaining_count(), "deadlock after removal");
            self.reshuffle_board(false);
        }
    }

    /// Reshuffle until solvable. Exhaustion ends the run.
    fn reshuffle_board(&mut self, manual: bool) -> bool {
        match reshuffle(
            &mut self.board,
            &mut self.rng,
            self.config.max_turns,
            self.config.max_reshuffle_attempts,
        ) {
            Ok(attempts) => {
                self.selected = None;
                self.hint = None;
                self.scheduler.cancel(TaskKind::HintClear);
                self.events.push(GameEvent::Reshuffled { attempts, manual });
                true
            }
            Err(err) => {
                error!(%err, "reshuffle failed, ending run");
                self.finish(GameStatus::Lost);
                false
            }
        }
    }

    fn use_hint(&mut self) -> bool {
        if self.status != GameStatus::Playing || self.hints_remaining == 0 {
            return false;
        }
        if self.pending.is_some() {
            self.commit_removal();
            if self.status != GameStatus::Playing {
                return true;
            }
        }
        let Some((first, second)) = find_available_pair(&self.board, self.config.max_turns) else {
            return false;
        };

        self.hint = Some((first, second));
        self.scheduler.schedule(
            TaskKind::HintClear,
            self.clock_ms,
            self.config.hint_duration_ms,
        );
        self.hints_remaining -= 1;
        self.events.push(GameEvent::HintShown { first, second });
        true
    }

    fn use_shuffle(&mut self) -> bool {
        if self.status != GameStatus::Playing || self.shuffles_remaining == 0 {
            return false;
        }
        if self.pending.is_some() {
            self.commit_removal();
            if self.status != GameStatus::Playing {
                return true;
            }
        }

        self.shuffles_remaining -= 1;
        self.reshuffle_board(true);
        true
    }

    fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.scheduler.cancel_all();
        self.selected = None;
        self.hint = None;
        self.wrong_pair = None;
        self.pending = None;
        self.connection = None;

        let summary = self.summary();
        info!(
            run_id = self.run_id,
            status = status.as_str(),
            score = summary.base_score,
            time_left = summary.time_left,
            "run finished"
        );
        match status {
            GameStatus::Won => self.events.push(GameEvent::Won(summary)),
            GameStatus::Lost => self.events.push(GameEvent::Lost(summary)),
            _ => {}
        }
    }

    fn run_task(&mut self, kind: TaskKind) {
        match kind {
            TaskKind::RemovalCommit => self.commit_removal(),
            TaskKind::WrongPairClear => self.wrong_pair = None,
            TaskKind::HintClear => self.hint = None,
            TaskKind::ComboExpiry => self.combo.reset(),
        }
    }

    /// One countdown second elapses at play time `at`.
    fn step_second(&mut self, at: u64) {
        self.clock_ms = at;
        self.next_second_ms = at + CLOCK_STEP_MS as u64;
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.finish(GameStatus::Lost);
        }
    }

    /// Advance the play clock by `elapsed_ms`.
    ///
    /// Countdown steps and due tasks are processed in chronological order, so
    /// a task due before the clock runs out still fires. Returns whether
    /// anything changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }

        let target = self.clock_ms + elapsed_ms as u64;
        let mut changed = false;
        while self.status == GameStatus::Playing {
            let task_at = self.scheduler.next_deadline().filter(|&at| at <= target);
            let second_at = Some(self.next_second_ms).filter(|&at| at <= target);

            match (task_at, second_at) {
                (Some(task), Some(second)) if second < task => self.step_second(second),
                (Some(at), _) => {
                    self.clock_ms = at;
                    if let Some((kind, _)) = self.scheduler.pop_due(at) {
                        self.run_task(kind);
                    }
                }
                (None, Some(second)) => self.step_second(second),
                (None, None) => break,
            }
            changed = true;
        }

        if self.status == GameStatus::Playing {
            self.clock_ms = target;
        }
        changed
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), 1)
    }
}
