use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifier of a scheduled transition. Tickets are never reused within a
/// store, so a host holding an old ticket can't fire a newer timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerTicket(u64);

impl TimerTicket {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    pub(crate) const fn first() -> Self {
        Self(0)
    }

    pub(crate) const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for TimerTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Transition performed when a pending timer fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeferredAction {
    AdvanceQuestion,
    ResolveCareerPaths,
    ResolveRoadmap { career_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingTimer {
    pub ticket: TimerTicket,
    pub action: DeferredAction,
    pub remaining: Duration,
}

impl PendingTimer {
    /// Count down by `elapsed`; true once the timer is due.
    pub fn elapse(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.remaining.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapse_saturates_at_zero() {
        let mut timer = PendingTimer {
            ticket: TimerTicket::first(),
            action: DeferredAction::AdvanceQuestion,
            remaining: Duration::from_millis(300),
        };
        assert!(!timer.elapse(Duration::from_millis(200)));
        assert_eq!(timer.remaining, Duration::from_millis(100));
        assert!(timer.elapse(Duration::from_secs(5)));
        assert!(timer.remaining.is_zero());
    }

    #[test]
    fn tickets_increase() {
        let first = TimerTicket::first();
        let second = first.next();
        assert!(second > first);
        assert_eq!(second.to_string(), "#1");
    }
}
