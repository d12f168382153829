//! Round state machine
//!
//! Commands (`start`, `pick`, `pause`, `reset`) and timer callbacks
//! (`advance`, `fire`) are the only ways the session changes. Each returns a
//! [`Snapshot`] of the state after the transition.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::belt::Belt;
use super::moves::{Move, RoundOutcome};
use super::state::{Celebration, CoachLine, GameEvent, RoundPhase, SessionState, Snapshot};
use super::timer::{PendingTimer, TimerKind, TimerToken, TokenSource};
use crate::consts::*;
use crate::deadline_for_score;
use crate::feedback::{FeedbackCue, FeedbackSink};
use crate::highscore::HighScore;
use crate::persistence::ScoreStore;
use crate::platform::Clock;

pub struct RoundEngine {
    state: SessionState,
    phase: RoundPhase,
    rng: Pcg32,
    tokens: TokenSource,
    clock: Box<dyn Clock>,
    high_score: HighScore,
    feedback: Box<dyn FeedbackSink>,
    events: Vec<GameEvent>,
}

impl RoundEngine {
    /// Build an idle engine; the stored high score is read here, once
    pub fn new(
        seed: u64,
        clock: Box<dyn Clock>,
        store: Box<dyn ScoreStore>,
        feedback: Box<dyn FeedbackSink>,
    ) -> Self {
        let high_score = HighScore::new(store);
        let best = high_score.load();
        Self {
            state: SessionState::new(best),
            phase: RoundPhase::Idle,
            rng: Pcg32::seed_from_u64(seed),
            tokens: TokenSource::default(),
            clock,
            high_score,
            feedback,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.phase, &self.state)
    }

    /// Take the events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The timer the current phase is waiting on, if any
    pub fn pending_timer(&self) -> Option<PendingTimer> {
        match self.phase {
            RoundPhase::AwaitingInput {
                started_at_ms,
                token,
            } => Some(PendingTimer {
                token,
                due_at_ms: started_at_ms + f64::from(self.state.deadline_ms),
            }),
            RoundPhase::Resolved {
                resume_at_ms,
                token,
            } => Some(PendingTimer {
                token,
                due_at_ms: resume_at_ms,
            }),
            RoundPhase::Idle | RoundPhase::Exhausted => None,
        }
    }

    /// Begin a fresh session and deal round 1. Restarts mid-session too.
    pub fn start(&mut self) -> Snapshot {
        if self.state.running {
            log::info!("Restarting session at round {}", self.state.round_number);
        }
        self.phase = RoundPhase::Idle;
        self.state.clear();
        self.state.running = true;
        self.feedback.cue(FeedbackCue::Start);
        log::info!("Session started (high score {})", self.state.high_score);
        self.deal_round();
        self.snapshot()
    }

    /// Answer the current round. Only the first answer counts, and one
    /// arriving after the deadline resolves as a timeout.
    pub fn pick(&mut self, choice: Move) -> Snapshot {
        let RoundPhase::AwaitingInput { started_at_ms, .. } = self.phase else {
            log::debug!("Ignoring pick {:?} in {:?}", choice, self.phase.kind());
            return self.snapshot();
        };
        let now = self.clock.now_ms();
        let remaining = self.remaining_ms(started_at_ms, now);
        self.state.time_remaining_ms = remaining;
        if remaining == 0 {
            log::debug!("Pick {:?} arrived after the deadline", choice);
            self.resolve(None, now);
        } else {
            self.resolve(Some(choice), now);
        }
        self.snapshot()
    }

    /// Stop dealing without touching score, stamina or XP
    pub fn pause(&mut self) -> Snapshot {
        match self.phase {
            RoundPhase::AwaitingInput { .. } | RoundPhase::Resolved { .. } => {
                self.phase = RoundPhase::Idle;
                self.state.running = false;
                self.state.message = Some(CoachLine::Paused);
                log::info!("Paused at round {}", self.state.round_number);
            }
            RoundPhase::Idle | RoundPhase::Exhausted => {
                log::debug!("Ignoring pause in {:?}", self.phase.kind());
            }
        }
        self.snapshot()
    }

    /// Drop the session back to defaults, keeping the high score
    pub fn reset(&mut self) -> Snapshot {
        self.phase = RoundPhase::Idle;
        self.state.clear();
        log::debug!("Session reset");
        self.snapshot()
    }

    pub fn dismiss_celebration(&mut self) -> Snapshot {
        self.state.celebration = None;
        self.snapshot()
    }

    /// Per-frame driver: runs the countdown, a due cooldown and the
    /// celebration expiry against the current clock.
    pub fn advance(&mut self) -> Snapshot {
        let now = self.clock.now_ms();
        match self.phase {
            RoundPhase::AwaitingInput { started_at_ms, .. } => {
                self.countdown_tick(started_at_ms, now);
            }
            RoundPhase::Resolved { resume_at_ms, .. } if now >= resume_at_ms => {
                self.deal_round();
            }
            _ => {}
        }
        self.expire_celebration(now);
        self.snapshot()
    }

    /// A scheduled callback firing. Stale tokens are dropped.
    pub fn fire(&mut self, token: TimerToken) -> Snapshot {
        if self.phase.token() != Some(token) {
            log::debug!("Dropping stale timer {:?}", token);
            return self.snapshot();
        }
        let now = self.clock.now_ms();
        match (token.kind, self.phase) {
            (TimerKind::Countdown, RoundPhase::AwaitingInput { started_at_ms, .. }) => {
                self.countdown_tick(started_at_ms, now);
            }
            (TimerKind::Cooldown, RoundPhase::Resolved { .. }) => self.deal_round(),
            _ => {}
        }
        self.snapshot()
    }

    fn remaining_ms(&self, started_at_ms: f64, now: f64) -> u32 {
        let elapsed = (now - started_at_ms).max(0.0);
        (f64::from(self.state.deadline_ms) - elapsed).max(0.0).ceil() as u32
    }

    fn countdown_tick(&mut self, started_at_ms: f64, now: f64) {
        let remaining = self.remaining_ms(started_at_ms, now);
        self.state.time_remaining_ms = remaining;
        if remaining == 0 {
            self.resolve(None, now);
        }
    }

    fn deal_round(&mut self) {
        if !self.state.running {
            log::debug!("Not dealing: session is not running");
            return;
        }
        let now = self.clock.now_ms();
        let enemy = Move::random(&mut self.rng);
        let deadline_ms = deadline_for_score(self.state.score);

        self.state.round_number += 1;
        self.state.deadline_ms = deadline_ms;
        self.state.enemy_move = Some(enemy);
        self.state.player_choice = None;
        self.state.last_outcome = None;
        self.state.time_remaining_ms = deadline_ms;
        self.state.message = Some(CoachLine::CounterNow);
        self.phase = RoundPhase::AwaitingInput {
            started_at_ms: now,
            token: self.tokens.issue(TimerKind::Countdown),
        };

        log::debug!(
            "Round {}: opponent goes {:?}, {} ms to answer",
            self.state.round_number,
            enemy,
            deadline_ms
        );
        self.events.push(GameEvent::RoundDealt {
            round: self.state.round_number,
            enemy,
            deadline_ms,
        });
    }

    fn resolve(&mut self, choice: Option<Move>, now: f64) {
        let Some(enemy) = self.state.enemy_move else {
            log::debug!("Nothing to resolve: no opponent move");
            return;
        };

        let outcome = RoundOutcome::judge(enemy, choice);
        let previous_belt = self.state.belt();
        self.state.apply_outcome(outcome);
        self.state.player_choice = choice;
        self.state.last_outcome = Some(outcome);
        self.state.message = Some(CoachLine::for_outcome(outcome));
        self.feedback.cue(FeedbackCue::for_outcome(outcome));
        self.events.push(GameEvent::RoundResolved {
            round: self.state.round_number,
            outcome,
        });
        log::debug!(
            "Round {} {:?}: score {}, stamina {}",
            self.state.round_number,
            outcome,
            self.state.score,
            self.state.stamina
        );

        if self.state.raise_high_score() {
            self.high_score.save(self.state.high_score);
            self.events.push(GameEvent::NewHighScore(self.state.high_score));
        }

        let belt = self.state.belt();
        if belt != previous_belt {
            self.unlock_belt(belt, now);
        }

        if self.state.is_exhausted() {
            self.state.running = false;
            self.state.message = Some(CoachLine::OutOfGas);
            self.phase = RoundPhase::Exhausted;
            self.events.push(GameEvent::Exhausted);
            log::info!(
                "Out of stamina after {} rounds (score {})",
                self.state.round_number,
                self.state.score
            );
            return;
        }

        self.phase = RoundPhase::Resolved {
            resume_at_ms: now + f64::from(COOLDOWN_MS),
            token: self.tokens.issue(TimerKind::Cooldown),
        };
    }

    fn unlock_belt(&mut self, belt: Belt, now: f64) {
        log::info!("{} unlocked at {} XP", belt.label(), self.state.belt_xp);
        self.state.celebration = Some(Celebration {
            belt,
            started_at_ms: now,
        });
        self.events.push(GameEvent::BeltUnlocked(belt));
    }

    fn expire_celebration(&mut self, now: f64) {
        if let Some(c) = self.state.celebration {
            if now - c.started_at_ms >= f64::from(CELEBRATION_MS) {
                self.state.celebration = None;
            }
        }
    }
}
