//! Belt rank, a pure projection of accumulated XP

use serde::{Deserialize, Serialize};

use crate::consts::XP_PER_BELT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Belt {
    White,
    Blue,
    Purple,
    Brown,
    Black,
}

impl Belt {
    /// Belts in rank order
    pub const ORDER: [Belt; 5] = [Belt::White, Belt::Blue, Belt::Purple, Belt::Brown, Belt::Black];

    /// Belt earned with `xp` points, clamped at Black
    pub fn for_xp(xp: u32) -> Belt {
        let index = (xp / XP_PER_BELT) as usize;
        Belt::ORDER[index.min(Belt::ORDER.len() - 1)]
    }

    pub fn label(self) -> &'static str {
        match self {
            Belt::White => "White Belt",
            Belt::Blue => "Blue Belt",
            Belt::Purple => "Purple Belt",
            Belt::Brown => "Brown Belt",
            Belt::Black => "Black Belt",
        }
    }

    /// CSS-friendly color name
    pub fn color(self) -> &'static str {
        match self {
            Belt::White => "white",
            Belt::Blue => "blue",
            Belt::Purple => "purple",
            Belt::Brown => "brown",
            Belt::Black => "black",
        }
    }
}

/// Progress bar fill (0-99) toward the next belt
pub fn xp_progress(xp: u32) -> u32 {
    xp % XP_PER_BELT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_belt_thresholds() {
        assert_eq!(Belt::for_xp(0), Belt::White);
        assert_eq!(Belt::for_xp(99), Belt::White);
        assert_eq!(Belt::for_xp(100), Belt::Blue);
        assert_eq!(Belt::for_xp(250), Belt::Purple);
        assert_eq!(Belt::for_xp(399), Belt::Brown);
        assert_eq!(Belt::for_xp(450), Belt::Black);
        assert_eq!(Belt::for_xp(10_000), Belt::Black);
        assert_eq!(Belt::for_xp(u32::MAX), Belt::Black);
    }

    #[test]
    fn test_xp_progress() {
        assert_eq!(xp_progress(0), 0);
        assert_eq!(xp_progress(20), 20);
        assert_eq!(xp_progress(120), 20);
        assert_eq!(xp_progress(520), 20);
    }

    #[test]
    fn test_order_matches_for_xp() {
        for (i, belt) in Belt::ORDER.iter().enumerate() {
            assert_eq!(Belt::for_xp(i as u32 * XP_PER_BELT), *belt);
        }
    }
}
