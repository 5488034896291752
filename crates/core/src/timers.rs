//! Timers module - named, cancelable delayed effects
//!
//! Each [`TaskKind`] has at most one pending deadline on the play clock.
//! Scheduling a kind again replaces its deadline. Due tasks are handed back in
//! deadline order; ties go to the kind declared first.

/// Delayed effects owned by the game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskKind {
    /// Remove a matched pair after the connection path has been shown.
    RemovalCommit,
    /// Hide the wrong-pair indicator and accept taps again.
    WrongPairClear,
    /// Hide the hint highlight.
    HintClear,
    /// Reset the combo when no match followed in time.
    ComboExpiry,
}

impl TaskKind {
    pub const ALL: [TaskKind; 4] = [
        TaskKind::RemovalCommit,
        TaskKind::WrongPairClear,
        TaskKind::HintClear,
        TaskKind::ComboExpiry,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

/// One deadline slot per task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scheduler {
    deadlines: [Option<u64>; 4],
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `kind` to fire at `now_ms + delay_ms`, replacing any pending one.
    pub fn schedule(&mut self, kind: TaskKind, now_ms: u64, delay_ms: u32) {
        self.deadlines[kind.slot()] = Some(now_ms + delay_ms as u64);
    }

    /// Disarm `kind`. Returns whether it was pending.
    pub fn cancel(&mut self, kind: TaskKind) -> bool {
        self.deadlines[kind.slot()].take().is_some()
    }

    pub fn cancel_all(&mut self) {
        self.deadlines = [None; 4];
    }

    pub fn is_pending(&self, kind: TaskKind) -> bool {
        self.deadlines[kind.slot()].is_some()
    }

    pub fn deadline(&self, kind: TaskKind) -> Option<u64> {
        self.deadlines[kind.slot()]
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadlines.iter().flatten().copied().min()
    }

    /// Remove and return the earliest task due at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(TaskKind, u64)> {
        let (kind, at) = TaskKind::ALL
            .into_iter()
            .filter_map(|k| self.deadlines[k.slot()].map(|at| (k, at)))
            .filter(|&(_, at)| at <= now_ms)
            .min_by_key(|&(k, at)| (at, k))?;
        self.deadlines[kind.slot()] = None;
        Some((kind, at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_and_pop() {
        let mut s = Scheduler::new();
        s.schedule(TaskKind::HintClear, 0, 3000);
        assert_eq!(s.pop_due(2999), None);
        assert_eq!(s.pop_due(3000), Some((TaskKind::HintClear, 3000)));
        assert_eq!(s.pop_due(5000), None);
    }

    #[test]
    fn test_reschedule_replaces_deadline() {
        let mut s = Scheduler::new();
        s.schedule(TaskKind::ComboExpiry, 0, 3000);
        s.schedule(TaskKind::ComboExpiry, 2000, 3000);
        assert_eq!(s.deadline(TaskKind::ComboExpiry), Some(5000));
        assert_eq!(s.pop_due(3000), None);
    }

    #[test]
    fn test_due_tasks_fire_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(TaskKind::ComboExpiry, 0, 100);
        s.schedule(TaskKind::RemovalCommit, 0, 300);
        s.schedule(TaskKind::WrongPairClear, 0, 100);

        assert_eq!(s.pop_due(1000), Some((TaskKind::WrongPairClear, 100)));
        assert_eq!(s.pop_due(1000), Some((TaskKind::ComboExpiry, 100)));
        assert_eq!(s.pop_due(1000), Some((TaskKind::RemovalCommit, 300)));
        assert_eq!(s.pop_due(1000), None);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        s.schedule(TaskKind::RemovalCommit, 0, 300);
        s.schedule(TaskKind::HintClear, 0, 3000);
        assert!(s.cancel(TaskKind::RemovalCommit));
        assert!(!s.cancel(TaskKind::RemovalCommit));
        assert_eq!(s.next_deadline(), Some(3000));
        s.cancel_all();
        assert_eq!(s.next_deadline(), None);
        assert!(!s.is_pending(TaskKind::HintClear));
    }
}
