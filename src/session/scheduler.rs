use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::Action;

/// An action to apply after a fixed presentation delay.
#[derive(Debug, Clone, PartialEq)]
pub struct Deferred {
    pub action: Action,
    pub delay: Duration,
}

impl Deferred {
    pub fn new(action: Action, delay: Duration) -> Self {
        Self { action, delay }
    }
}

/// Fire-once timer queue for deferred actions.
///
/// The clock is injected on every call so callers (and tests) decide what
/// "now" means; nothing here sleeps. Entries fire in submission order when
/// their due times coincide.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: VecDeque<(Instant, Action)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, deferred: Deferred, now: Instant) {
        self.pending.push_back((now + deferred.delay, deferred.action));
    }

    /// Removes and returns every action due at `now`, in submission order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<Action> {
        let mut due = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.pending.len());
        for (at, action) in self.pending.drain(..) {
            if at <= now {
                due.push(action);
            } else {
                remaining.push_back((at, action));
            }
        }
        self.pending = remaining;
        due
    }

    /// The duration until the next pending action, if any.
    pub fn next_due_in(&self, now: Instant) -> Option<Duration> {
        self.pending
            .iter()
            .map(|(at, _)| at.saturating_duration_since(now))
            .min()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drops all pending actions. Called on teardown so nothing fires into
    /// a surface that no longer exists.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Screen;

    #[test]
    fn actions_fire_once_in_submission_order() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        let delay = Duration::from_millis(1500);
        scheduler.schedule(
            Deferred::new(Action::SetScreen(Screen::Dashboard), delay),
            now,
        );
        scheduler.schedule(Deferred::new(Action::ToggleSound, delay), now);

        assert!(scheduler.drain_due(now).is_empty());

        let fired = scheduler.drain_due(now + delay);
        assert_eq!(
            fired,
            vec![Action::SetScreen(Screen::Dashboard), Action::ToggleSound]
        );
        assert!(scheduler.drain_due(now + delay * 2).is_empty());
    }

    #[test]
    fn overlapping_submissions_both_run_to_completion() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        scheduler.schedule(
            Deferred::new(
                Action::SetScreen(Screen::Dashboard),
                Duration::from_millis(1500),
            ),
            now,
        );
        // A second command lands while the first transition is pending.
        scheduler.schedule(
            Deferred::new(
                Action::SetScreen(Screen::AccountsTable),
                Duration::from_millis(1500),
            ),
            now + Duration::from_millis(500),
        );

        let first = scheduler.drain_due(now + Duration::from_millis(1500));
        assert_eq!(first, vec![Action::SetScreen(Screen::Dashboard)]);
        let second = scheduler.drain_due(now + Duration::from_millis(2000));
        assert_eq!(second, vec![Action::SetScreen(Screen::AccountsTable)]);
    }

    #[test]
    fn cancel_all_discards_pending_actions() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        scheduler.schedule(
            Deferred::new(Action::ToggleMatrixRain, Duration::from_millis(100)),
            now,
        );
        scheduler.cancel_all();
        assert!(scheduler.is_idle());
        assert!(scheduler.drain_due(now + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn next_due_in_reports_soonest_deadline() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        scheduler.schedule(
            Deferred::new(Action::ToggleSound, Duration::from_millis(800)),
            now,
        );
        scheduler.schedule(
            Deferred::new(Action::ToggleMatrixRain, Duration::from_millis(300)),
            now,
        );
        assert_eq!(scheduler.next_due_in(now), Some(Duration::from_millis(300)));
    }
}
