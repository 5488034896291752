//! Scoring module - match points and time-windowed combos
//!
//! Every confirmed match is worth a flat base. Matches that follow the
//! previous one within the combo window extend the combo, and each step past
//! the first adds a fixed bonus:
//!
//! | Combo | Base | Bonus | Total (defaults) |
//! |-------|------|-------|------------------|
//! | 1     | 10   | 0     | 10               |
//! | 2     | 10   | 20    | 30               |
//! | 3     | 10   | 40    | 50               |

/// Score calculation result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Flat points for the match itself.
    pub base: u32,
    /// Combo bonus added on top of `base`.
    pub combo_bonus: u32,
    pub total: u32,
    /// Combo counter after this match.
    pub combo: u32,
}

/// Points for a match made at combo `combo` (1-based).
pub fn calculate_match_score(combo: u32, base_points: u32, bonus_step: u32) -> ScoreResult {
    let combo_bonus = bonus_step.saturating_mul(combo.saturating_sub(1));
    ScoreResult {
        base: base_points,
        combo_bonus,
        total: base_points.saturating_add(combo_bonus),
        combo,
    }
}

/// Tracks the running combo against the play clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComboTracker {
    count: u32,
    last_match_ms: Option<u64>,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn last_match_ms(&self) -> Option<u64> {
        self.last_match_ms
    }

    /// Register a match at play time `now_ms` and return the new combo.
    ///
    /// The window is inclusive: a gap of exactly `window_ms` continues the
    /// combo.
    pub fn register_match(&mut self, now_ms: u64, window_ms: u32) -> u32 {
        let within = self
            .last_match_ms
            .is_some_and(|last| now_ms.saturating_sub(last) <= window_ms as u64);
        self.count = if within { self.count + 1 } else { 1 };
        self.last_match_ms = Some(now_ms);
        self.count
    }

    /// Drop the combo back to zero (combo expiry).
    pub fn reset(&mut self) {
        self.count = 0;
    }
}
