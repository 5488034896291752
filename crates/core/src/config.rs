//! Engine configuration.
//!
//! Defaults come from the constants in `tui_onet_types`. A handful of rules can
//! be overridden from the environment:
//!
//! - `ONET_MAX_TURNS`: turn limit for connecting paths (clamped to 0..=3)
//! - `ONET_COMBO_WINDOW_MS`: combo window in milliseconds
//! - `ONET_HINTS`: hints per run
//! - `ONET_SHUFFLES`: manual shuffles per run
//!
//! Unparsable values are ignored.

use crate::types::{
    BASE_MATCH_POINTS, COMBO_BONUS_STEP, COMBO_WINDOW_MS, HINT_DURATION_MS, INITIAL_HINTS,
    INITIAL_SHUFFLES, MAX_RESHUFFLE_ATTEMPTS, MAX_TURNS, MAX_TURNS_LIMIT, REMOVAL_DELAY_MS,
    WRONG_PAIR_DELAY_MS,
};

/// Rule and timing configuration for one [`crate::GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub max_turns: u8,
    pub combo_window_ms: u32,
    pub base_match_points: u32,
    pub combo_bonus_step: u32,
    pub removal_delay_ms: u32,
    pub wrong_pair_delay_ms: u32,
    pub hint_duration_ms: u32,
    pub initial_hints: u32,
    pub initial_shuffles: u32,
    pub max_reshuffle_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_turns: MAX_TURNS,
            combo_window_ms: COMBO_WINDOW_MS,
            base_match_points: BASE_MATCH_POINTS,
            combo_bonus_step: COMBO_BONUS_STEP,
            removal_delay_ms: REMOVAL_DELAY_MS,
            wrong_pair_delay_ms: WRONG_PAIR_DELAY_MS,
            hint_duration_ms: HINT_DURATION_MS,
            initial_hints: INITIAL_HINTS,
            initial_shuffles: INITIAL_SHUFFLES,
            max_reshuffle_attempts: MAX_RESHUFFLE_ATTEMPTS,
        }
    }
}

impl GameConfig {
    /// Create from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn parse<T: std::str::FromStr>(v: Option<String>) -> Option<T> {
            v.and_then(|s| s.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            max_turns: parse(lookup("ONET_MAX_TURNS")).unwrap_or(defaults.max_turns),
            combo_window_ms: parse(lookup("ONET_COMBO_WINDOW_MS"))
                .unwrap_or(defaults.combo_window_ms),
            initial_hints: parse(lookup("ONET_HINTS")).unwrap_or(defaults.initial_hints),
            initial_shuffles: parse(lookup("ONET_SHUFFLES")).unwrap_or(defaults.initial_shuffles),
            ..defaults
        }
        .normalized()
    }

    /// Clamp values the engine cannot honour.
    pub fn normalized(mut self) -> Self {
        self.max_turns = self.max_turns.min(MAX_TURNS_LIMIT);
        self.max_reshuffle_attempts = self.max_reshuffle_attempts.max(1);
        self
    }
}
