//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must stay free of platform
//! dependencies:
//! - Time comes from an injected clock
//! - Seeded RNG only
//! - Timers identified by generation tokens

pub mod belt;
pub mod engine;
pub mod moves;
pub mod state;
pub mod timer;

pub use belt::{Belt, xp_progress};
pub use engine::RoundEngine;
pub use moves::{Move, RoundOutcome};
pub use state::{
    Celebration, CoachLine, GameEvent, PhaseKind, RoundPhase, SessionState, Snapshot,
};
pub use timer::{PendingTimer, TimerKind, TimerToken};
