//! Keyboard mapping
//!
//! Digits 1-3 pick the moves in display order. The table is fixed.

use crate::sim::Move;

pub fn move_for_key(key: &str) -> Option<Move> {
    match key {
        "1" => Some(Move::Pass),
        "2" => Some(Move::Sweep),
        "3" => Some(Move::Submission),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_table() {
        assert_eq!(move_for_key("1"), Some(Move::Pass));
        assert_eq!(move_for_key("2"), Some(Move::Sweep));
        assert_eq!(move_for_key("3"), Some(Move::Submission));
        assert_eq!(move_for_key("4"), None);
        assert_eq!(move_for_key(" "), None);
    }

    #[test]
    fn test_keys_follow_display_order() {
        for (i, m) in Move::ALL.iter().enumerate() {
            assert_eq!(move_for_key(&(i + 1).to_string()), Some(*m));
        }
    }
}
