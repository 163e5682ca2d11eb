//! The player seam.
//!
//! Each turn the judge hands the current [`Observation`] to a [`Player`]
//! and applies whatever direction comes back. [`HeuristicAgent`] is the
//! reference player; [`IdlePlayer`] and [`ScriptedPlayer`] exist so the
//! judge can be exercised without the agent.

use std::collections::VecDeque;

use herding_agents::HeuristicAgent;
use herding_types::{Direction, Observation};

/// A source of moves.
pub trait Player {
    /// Choose a move for this turn, or `None` to stay put.
    ///
    /// The returned direction is not trusted: the judge validates it and
    /// ignores invalid moves.
    fn next_move(&mut self, observation: &Observation) -> Option<Direction>;
}

impl Player for HeuristicAgent {
    fn next_move(&mut self, observation: &Observation) -> Option<Direction> {
        self.decide(observation)
    }
}

/// A player that never moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePlayer;

impl Player for IdlePlayer {
    fn next_move(&mut self, _observation: &Observation) -> Option<Direction> {
        None
    }
}

/// A player that replays a fixed list of moves, then idles.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlayer {
    moves: VecDeque<Option<Direction>>,
}

impl ScriptedPlayer {
    /// Create a player that will return `moves` in order.
    pub fn new(moves: impl IntoIterator<Item = Option<Direction>>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }

    /// Moves not yet played.
    pub fn remaining(&self) -> usize {
        self.moves.len()
    }
}

impl Player for ScriptedPlayer {
    fn next_move(&mut self, _observation: &Observation) -> Option<Direction> {
        self.moves.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use herding_types::Position;

    use super::*;

    fn observation() -> Observation {
        Observation {
            turn: 0,
            width: 5,
            height: 5,
            position: Position::new(2, 2),
            stable: Position::new(0, 0),
            has_flag: false,
            neighbors: BTreeSet::new(),
        }
    }

    #[test]
    fn idle_player_never_moves() {
        assert_eq!(IdlePlayer.next_move(&observation()), None);
    }

    #[test]
    fn scripted_player_replays_then_idles() {
        let mut player = ScriptedPlayer::new([Some(Direction::LEFT), None, Some(Direction::UP)]);
        let obs = observation();
        assert_eq!(player.next_move(&obs), Some(Direction::LEFT));
        assert_eq!(player.next_move(&obs), None);
        assert_eq!(player.next_move(&obs), Some(Direction::UP));
        assert_eq!(player.remaining(), 0);
        assert_eq!(player.next_move(&obs), None);
    }
}
