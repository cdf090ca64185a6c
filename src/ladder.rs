//! @ai:module:intent Prize ladder constants for the 15-level quiz
//! @ai:module:layer domain
//! @ai:module:public_api PrizeLadder, ZERO_AMOUNT
//! @ai:module:stateless true

/// Prize label shown when a round ends with no correct answers.
pub const ZERO_AMOUNT: &str = "0€";

/// Prize label and Euro value per level, index 0 = level 1.
const PRIZES: [(&str, u64); 15] = [
    ("50€", 50),
    ("100€", 100),
    ("200€", 200),
    ("300€", 300),
    ("500€", 500),
    ("1.000€", 1_000),
    ("2.000€", 2_000),
    ("4.000€", 4_000),
    ("8.000€", 8_000),
    ("16.000€", 16_000),
    ("32.000€", 32_000),
    ("64.000€", 64_000),
    ("125.000€", 125_000),
    ("500.000€", 500_000),
    ("1.000.000€", 1_000_000),
];

/// @ai:intent Fixed mapping from quiz level to monetary prize
/// @ai:effects pure
pub struct PrizeLadder;

impl PrizeLadder {
    /// Number of levels in a full round.
    pub const LEVELS: u32 = 15;

    /// @ai:intent Prize label at stake for a level (1..=15)
    /// @ai:effects pure
    pub fn label(level: u32) -> Option<&'static str> {
        if (1..=Self::LEVELS).contains(&level) {
            Some(PRIZES[(level - 1) as usize].0)
        } else {
            None
        }
    }

    /// @ai:intent Euro value of the prize at a level (1..=15)
    /// @ai:effects pure
    pub fn value(level: u32) -> Option<u64> {
        if (1..=Self::LEVELS).contains(&level) {
            Some(PRIZES[(level - 1) as usize].1)
        } else {
            None
        }
    }

    /// @ai:intent Final payout label for a round with the given correct count
    /// @ai:effects pure
    pub fn payout(correct_answers: u32) -> &'static str {
        Self::label(correct_answers).unwrap_or(ZERO_AMOUNT)
    }

    /// @ai:intent Euro value of a prize label, including the zero label
    /// @ai:effects pure
    pub fn value_of_label(label: &str) -> Option<u64> {
        if label == ZERO_AMOUNT {
            return Some(0);
        }
        PRIZES
            .iter()
            .find(|(name, _)| *name == label)
            .map(|(_, value)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_is_monotonically_increasing() {
        for level in 2..=PrizeLadder::LEVELS {
            assert!(PrizeLadder::value(level).unwrap() > PrizeLadder::value(level - 1).unwrap());
        }
    }

    #[test]
    fn test_label_bounds() {
        assert_eq!(PrizeLadder::label(1), Some("50€"));
        assert_eq!(PrizeLadder::label(15), Some("1.000.000€"));
        assert_eq!(PrizeLadder::label(0), None);
        assert_eq!(PrizeLadder::label(16), None);
    }

    #[test]
    fn test_payout_zero_label() {
        assert_eq!(PrizeLadder::payout(0), ZERO_AMOUNT);
        assert_eq!(PrizeLadder::payout(3), "200€");
        assert_eq!(PrizeLadder::payout(15), "1.000.000€");
    }

    #[test]
    fn test_value_of_label_round_trips() {
        for level in 1..=PrizeLadder::LEVELS {
            let label = PrizeLadder::label(level).unwrap();
            assert_eq!(PrizeLadder::value_of_label(label), PrizeLadder::value(level));
        }
        assert_eq!(PrizeLadder::value_of_label(ZERO_AMOUNT), Some(0));
        assert_eq!(PrizeLadder::value_of_label("7€"), None);
    }
}
