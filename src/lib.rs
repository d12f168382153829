//! BJJ Reflex - A jiujitsu counter-exchange reaction game
//!
//! Core modules:
//! - `sim`: Deterministic round engine (moves, scoring, stamina, belts, timers)
//! - `feedback`: Audio/haptic cue sink abstraction
//! - `persistence`: Single-slot integer store for the high score
//! - `platform`: Browser/native platform abstraction (clock, key mapping)
//! - `settings`: Player-facing feedback toggles

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod feedback;
pub mod highscore;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use feedback::{FeedbackCue, FeedbackSink, GatedFeedback, NullFeedback};
pub use highscore::HighScore;
pub use persistence::{MemoryStore, ScoreStore, StoreError};
pub use settings::{SettingKey, Settings};
pub use sim::{Belt, Move, RoundEngine, RoundOutcome, RoundPhase, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Response window for the first rounds (ms)
    pub const START_TIME_MS: u32 = 3500;
    /// The window never shrinks below this (ms)
    pub const MIN_TIME_MS: u32 = 2000;
    /// Window shrink per point of score (ms)
    pub const TIME_STEP_PER_POINT_MS: u32 = 20;

    /// Pause between a resolved round and the next deal (ms)
    pub const COOLDOWN_MS: u32 = 700;
    /// How long a belt unlock celebration stays up (ms)
    pub const CELEBRATION_MS: u32 = 3600;

    /// Stamina bounds
    pub const MAX_STAMINA: u8 = 100;
    /// Stamina regained on a win
    pub const WIN_STAMINA_GAIN: u8 = 5;
    /// Stamina lost on a wrong counter
    pub const LOSE_STAMINA_COST: u8 = 15;
    /// Stamina lost when the window runs out
    pub const TIMEOUT_STAMINA_COST: u8 = 10;

    /// Belt XP per win
    pub const XP_PER_WIN: u32 = 20;
    /// Belt XP needed per belt step
    pub const XP_PER_BELT: u32 = 100;
}

/// Response window for a round dealt at the given score.
///
/// Shrinks linearly with score and is floored at [`consts::MIN_TIME_MS`].
#[inline]
pub fn deadline_for_score(score: u32) -> u32 {
    use consts::*;
    let shrink = score.saturating_mul(TIME_STEP_PER_POINT_MS);
    START_TIME_MS.saturating_sub(shrink).max(MIN_TIME_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_deadline_examples() {
        assert_eq!(deadline_for_score(0), 3500);
        assert_eq!(deadline_for_score(1), 3480);
        assert_eq!(deadline_for_score(50), 2500);
        assert_eq!(deadline_for_score(75), 2000);
        assert_eq!(deadline_for_score(100), 2000);
        assert_eq!(deadline_for_score(u32::MAX), 2000);
    }

    proptest! {
        #[test]
        fn deadline_is_non_increasing_and_floored(score in 0u32..1_000_000) {
            let here = deadline_for_score(score);
            let next = deadline_for_score(score + 1);
            prop_assert!(next <= here);
            prop_assert!(here >= consts::MIN_TIME_MS);
            prop_assert!(here <= consts::START_TIME_MS);
        }
    }
}
