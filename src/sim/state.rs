//! Session state and core round types
//!
//! Everything the engine mutates lives in [`SessionState`]; the phase enum
//! carries the live timer for the states that have one.

use serde::{Deserialize, Serialize};

use super::belt::{Belt, xp_progress};
use super::moves::{Move, RoundOutcome};
use super::timer::TimerToken;
use crate::consts::*;

/// Where the round state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No active round; the session may be paused or not started
    Idle,
    /// Countdown running, waiting for the player's counter
    AwaitingInput {
        started_at_ms: f64,
        token: TimerToken,
    },
    /// Round judged, next round dealt when the cooldown fires
    Resolved {
        resume_at_ms: f64,
        token: TimerToken,
    },
    /// Stamina ran out; only start/reset leave this phase
    Exhausted,
}

/// Timer-free view of [`RoundPhase`] for snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    Idle,
    AwaitingInput,
    Resolved,
    Exhausted,
}

impl RoundPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            RoundPhase::Idle => PhaseKind::Idle,
            RoundPhase::AwaitingInput { .. } => PhaseKind::AwaitingInput,
            RoundPhase::Resolved { .. } => PhaseKind::Resolved,
            RoundPhase::Exhausted => PhaseKind::Exhausted,
        }
    }

    /// Token of the timer owned by this phase, if any
    pub fn token(&self) -> Option<TimerToken> {
        match self {
            RoundPhase::AwaitingInput { token, .. } | RoundPhase::Resolved { token, .. } => {
                Some(*token)
            }
            RoundPhase::Idle | RoundPhase::Exhausted => None,
        }
    }
}

/// Coach line shown next to the opponent's move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoachLine {
    CounterNow,
    PerfectDefense,
    Caught,
    TooSlow,
    OutOfGas,
    Paused,
}

impl CoachLine {
    pub fn text(self) -> &'static str {
        match self {
            CoachLine::CounterNow => "Counter now!",
            CoachLine::PerfectDefense => "Nice! Perfect defense.",
            CoachLine::Caught => "Caught you. Adjust your timing.",
            CoachLine::TooSlow => "Too slow. React faster!",
            CoachLine::OutOfGas => "Out of gas. Reset to roll again.",
            CoachLine::Paused => "Paused. Start begins a new round.",
        }
    }

    /// Line for a judged round
    pub fn for_outcome(outcome: RoundOutcome) -> CoachLine {
        match outcome {
            RoundOutcome::Win => CoachLine::PerfectDefense,
            RoundOutcome::Lose => CoachLine::Caught,
            RoundOutcome::Timeout => CoachLine::TooSlow,
        }
    }
}

/// A belt unlock being celebrated on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Celebration {
    pub belt: Belt,
    pub started_at_ms: f64,
}

/// Things that happened during a transition, for presentation effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundDealt {
        round: u32,
        enemy: Move,
        deadline_ms: u32,
    },
    RoundResolved {
        round: u32,
        outcome: RoundOutcome,
    },
    BeltUnlocked(Belt),
    NewHighScore(u32),
    Exhausted,
}

/// The session aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub running: bool,
    pub round_number: u32,
    pub score: u32,
    /// 0..=MAX_STAMINA
    pub stamina: u8,
    pub belt_xp: u32,
    /// Cross-session best, survives reset
    pub high_score: u32,
    pub enemy_move: Option<Move>,
    pub player_choice: Option<Move>,
    /// Response window of the current round
    pub deadline_ms: u32,
    pub last_outcome: Option<RoundOutcome>,
    /// Last value observed by the countdown
    pub time_remaining_ms: u32,
    pub message: Option<CoachLine>,
    pub celebration: Option<Celebration>,
}

impl SessionState {
    /// Fresh session carrying over a previously stored best score
    pub fn new(high_score: u32) -> Self {
        Self {
            running: false,
            round_number: 0,
            score: 0,
            stamina: MAX_STAMINA,
            belt_xp: 0,
            high_score,
            enemy_move: None,
            player_choice: None,
            deadline_ms: START_TIME_MS,
            last_outcome: None,
            time_remaining_ms: START_TIME_MS,
            message: None,
            celebration: None,
        }
    }

    /// Restore defaults, keeping only the high score
    pub fn clear(&mut self) {
        *self = Self::new(self.high_score);
    }

    pub fn belt(&self) -> Belt {
        Belt::for_xp(self.belt_xp)
    }

    /// Apply the scoring rules for one judged round
    pub fn apply_outcome(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win => {
                self.score = self.score.saturating_add(1);
                self.stamina = self.stamina.saturating_add(WIN_STAMINA_GAIN).min(MAX_STAMINA);
                self.belt_xp = self.belt_xp.saturating_add(XP_PER_WIN);
            }
            RoundOutcome::Lose => {
                self.score = self.score.saturating_sub(1);
                self.stamina = self.stamina.saturating_sub(LOSE_STAMINA_COST);
            }
            RoundOutcome::Timeout => {
                self.stamina = self.stamina.saturating_sub(TIMEOUT_STAMINA_COST);
            }
        }
    }

    /// Raise the high score if the current score beats it
    pub fn raise_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.stamina == 0
    }
}

/// Observable state after a transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: PhaseKind,
    pub running: bool,
    pub round_number: u32,
    pub score: u32,
    pub stamina: u8,
    pub high_score: u32,
    pub belt_xp: u32,
    pub belt: Belt,
    pub xp_progress: u32,
    pub enemy_move: Option<Move>,
    pub player_choice: Option<Move>,
    pub last_outcome: Option<RoundOutcome>,
    pub time_remaining_ms: u32,
    pub deadline_ms: u32,
    pub message: String,
    pub celebration: Option<Belt>,
}

impl Snapshot {
    pub fn capture(phase: &RoundPhase, state: &SessionState) -> Self {
        Self {
            phase: phase.kind(),
            running: state.running,
            round_number: state.round_number,
            score: state.score,
            stamina: state.stamina,
            high_score: state.high_score,
            belt_xp: state.belt_xp,
            belt: state.belt(),
            xp_progress: xp_progress(state.belt_xp),
            enemy_move: state.enemy_move,
            player_choice: state.player_choice,
            last_outcome: state.last_outcome,
            time_remaining_ms: state.time_remaining_ms,
            deadline_ms: state.deadline_ms,
            message: state.message.map(CoachLine::text).unwrap_or_default().to_string(),
            celebration: state.celebration.map(|c| c.belt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_win_scoring() {
        let mut state = SessionState::new(0);
        state.stamina = 97;
        state.apply_outcome(RoundOutcome::Win);
        assert_eq!(state.score, 1);
        assert_eq!(state.stamina, 100);
        assert_eq!(state.belt_xp, 20);
    }

    #[test]
    fn test_lose_scoring_floors_at_zero() {
        let mut state = SessionState::new(0);
        state.apply_outcome(RoundOutcome::Lose);
        assert_eq!(state.score, 0);
        assert_eq!(state.stamina, 85);

        state.score = 3;
        state.stamina = 10;
        state.apply_outcome(RoundOutcome::Lose);
        assert_eq!(state.score, 2);
        assert_eq!(state.stamina, 0);
        assert!(state.is_exhausted());
    }

    #[test]
    fn test_timeout_keeps_score() {
        let mut state = SessionState::new(0);
        state.score = 4;
        state.belt_xp = 80;
        state.apply_outcome(RoundOutcome::Timeout);
        assert_eq!(state.score, 4);
        assert_eq!(state.stamina, 90);
        assert_eq!(state.belt_xp, 80);
    }

    #[test]
    fn test_clear_keeps_high_score() {
        let mut state = SessionState::new(12);
        state.running = true;
        state.score = 5;
        state.stamina = 40;
        state.belt_xp = 260;
        state.round_number = 9;
        state.enemy_move = Some(Move::Pass);
        state.message = Some(CoachLine::Caught);
        state.clear();
        assert_eq!(state, SessionState::new(12));
    }

    #[test]
    fn test_raise_high_score() {
        let mut state = SessionState::new(2);
        state.score = 2;
        assert!(!state.raise_high_score());
        state.score = 3;
        assert!(state.raise_high_score());
        assert_eq!(state.high_score, 3);
    }

    #[test]
    fn test_snapshot_message_text() {
        let mut state = SessionState::new(0);
        let snap = Snapshot::capture(&RoundPhase::Idle, &state);
        assert_eq!(snap.message, "");
        state.message = Some(CoachLine::TooSlow);
        let snap = Snapshot::capture(&RoundPhase::Idle, &state);
        assert_eq!(snap.message, "Too slow. React faster!");
    }

    fn outcome_strategy() -> impl Strategy<Value = RoundOutcome> {
        prop_oneof![
            Just(RoundOutcome::Win),
            Just(RoundOutcome::Lose),
            Just(RoundOutcome::Timeout),
        ]
    }

    proptest! {
        #[test]
        fn scoring_stays_in_bounds(outcomes in prop::collection::vec(outcome_strategy(), 0..200)) {
            let mut state = SessionState::new(0);
            let mut last_xp = 0;
            for outcome in outcomes {
                state.apply_outcome(outcome);
                prop_assert!(state.stamina <= MAX_STAMINA);
                prop_assert!(state.belt_xp >= last_xp);
                last_xp = state.belt_xp;
            }
        }
    }
}
