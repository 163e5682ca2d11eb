//! Per-game counters and scoring.

use rust_decimal::Decimal;

/// Mutable bookkeeping for one game, owned by the judge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameSession {
    /// Turns elapsed, including the turn on which the player died.
    pub turns: u32,
    /// Whether the player has picked up a flag.
    pub has_flag: bool,
    /// Cows pushed into the stable.
    pub cows_delivered: u32,
    /// Cows pushed into a wolf.
    pub cows_lost: u32,
    /// Whether a wolf caught the player.
    pub caught: bool,
}

impl GameSession {
    /// Create a session at turn zero.
    pub const fn new() -> Self {
        Self {
            turns: 0,
            has_flag: false,
            cows_delivered: 0,
            cows_lost: 0,
            caught: false,
        }
    }

    /// `2 * delivered - (lost + turns / 100)`, computed exactly.
    pub fn score(&self) -> Decimal {
        let reward = Decimal::from(self.cows_delivered).saturating_mul(Decimal::TWO);
        let time_penalty = Decimal::new(i64::from(self.turns), 2);
        let penalty = Decimal::from(self.cows_lost).saturating_add(time_penalty);
        reward.saturating_sub(penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_scores_zero() {
        assert_eq!(GameSession::new().score(), Decimal::ZERO);
    }

    #[test]
    fn score_matches_reference_values() {
        let session = GameSession {
            turns: 100,
            cows_delivered: 3,
            cows_lost: 1,
            ..GameSession::new()
        };
        assert_eq!(session.score(), Decimal::from(4));
    }

    #[test]
    fn each_turn_costs_a_hundredth() {
        let session = GameSession {
            turns: 250,
            ..GameSession::new()
        };
        assert_eq!(session.score(), Decimal::new(-250, 2));
    }

    #[test]
    fn losses_and_turns_can_push_score_negative() {
        let session = GameSession {
            turns: 7,
            cows_delivered: 1,
            cows_lost: 3,
            ..GameSession::new()
        };
        assert_eq!(session.score(), Decimal::new(-107, 2));
    }
}
