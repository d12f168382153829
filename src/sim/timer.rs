//! Generation-tagged timers
//!
//! Every armed timer gets a fresh token. A callback that fires with a token
//! other than the live one belongs to a round that no longer exists and is
//! dropped.

use serde::{Deserialize, Serialize};

/// Which slot a timer occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    /// Per-frame countdown of the response window
    Countdown,
    /// One-shot pause before the next round is dealt
    Cooldown,
}

/// Identity of one armed timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken {
    pub generation: u64,
    pub kind: TimerKind,
}

/// The live timer a host should schedule a callback for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingTimer {
    pub token: TimerToken,
    /// Clock time (ms) at which the timer is due
    pub due_at_ms: f64,
}

impl PendingTimer {
    /// Milliseconds until due, never negative
    pub fn delay_from(&self, now_ms: f64) -> f64 {
        (self.due_at_ms - now_ms).max(0.0)
    }
}

/// Hands out monotonically increasing tokens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenSource {
    next_generation: u64,
}

impl TokenSource {
    pub fn issue(&mut self, kind: TimerKind) -> TimerToken {
        self.next_generation += 1;
        TimerToken {
            generation: self.next_generation,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique() {
        let mut source = TokenSource::default();
        let a = source.issue(TimerKind::Countdown);
        let b = source.issue(TimerKind::Countdown);
        let c = source.issue(TimerKind::Cooldown);
        assert_ne!(a, b);
        assert!(b.generation > a.generation);
        assert_eq!(c.kind, TimerKind::Cooldown);
    }

    #[test]
    fn test_tokens_hash_by_generation_and_kind() {
        use std::collections::HashSet;

        let mut source = TokenSource::default();
        let countdown = source.issue(TimerKind::Countdown);
        let cooldown = source.issue(TimerKind::Cooldown);
        let armed: HashSet<TimerToken> = [countdown, cooldown, countdown].into_iter().collect();
        assert_eq!(armed.len(), 2);
        assert!(armed.contains(&cooldown));

        let kinds: HashSet<TimerKind> = [TimerKind::Countdown, TimerKind::Cooldown].into();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_delay_from() {
        let timer = PendingTimer {
            token: TimerToken {
                generation: 1,
                kind: TimerKind::Cooldown,
            },
            due_at_ms: 1700.0,
        };
        assert_eq!(timer.delay_from(1000.0), 700.0);
        assert_eq!(timer.delay_from(2000.0), 0.0);
    }
}
