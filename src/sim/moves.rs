//! Moves and the fixed counter cycle
//!
//! Pass is countered by Sweep, Sweep by Submission, Submission by Pass.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A move the opponent can broadcast or the player can answer with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Pass,
    Sweep,
    Submission,
}

impl Move {
    /// All moves in display order
    pub const ALL: [Move; 3] = [Move::Pass, Move::Sweep, Move::Submission];

    /// The unique move that beats this one
    pub fn counter(self) -> Move {
        match self {
            Move::Pass => Move::Sweep,
            Move::Sweep => Move::Submission,
            Move::Submission => Move::Pass,
        }
    }

    /// Draw a move uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Move {
        Move::ALL[rng.random_range(0..Move::ALL.len())]
    }

    pub fn label(self) -> &'static str {
        match self {
            Move::Pass => "Guard Pass",
            Move::Sweep => "Sweep",
            Move::Submission => "Submission",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Move::Pass => "🛡️",
            Move::Sweep => "🔁",
            Move::Submission => "🥋",
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Correct counter in time
    Win,
    /// Wrong counter in time
    Lose,
    /// No answer before the deadline
    Timeout,
}

impl RoundOutcome {
    /// Judge the player's answer (or lack of one) against the opponent
    pub fn judge(enemy: Move, choice: Option<Move>) -> RoundOutcome {
        match choice {
            None => RoundOutcome::Timeout,
            Some(m) if m == enemy.counter() => RoundOutcome::Win,
            Some(_) => RoundOutcome::Lose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_counter_is_a_three_cycle() {
        for m in Move::ALL {
            assert_ne!(m.counter(), m);
            assert_eq!(m.counter().counter().counter(), m);
        }
        assert_eq!(Move::Pass.counter(), Move::Sweep);
        assert_eq!(Move::Sweep.counter(), Move::Submission);
        assert_eq!(Move::Submission.counter(), Move::Pass);
    }

    #[test]
    fn test_each_move_countered_exactly_once() {
        for target in Move::ALL {
            let beaters = Move::ALL.iter().filter(|m| m.counter() == target).count();
            assert_eq!(beaters, 1);
        }
    }

    #[test]
    fn test_judge() {
        for enemy in Move::ALL {
            assert_eq!(RoundOutcome::judge(enemy, None), RoundOutcome::Timeout);
            for choice in Move::ALL {
                let expected = if choice == enemy.counter() {
                    RoundOutcome::Win
                } else {
                    RoundOutcome::Lose
                };
                assert_eq!(RoundOutcome::judge(enemy, Some(choice)), expected);
            }
        }
    }

    #[test]
    fn test_random_hits_every_move() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let m = Move::random(&mut rng);
            seen[Move::ALL.iter().position(|x| *x == m).unwrap()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
