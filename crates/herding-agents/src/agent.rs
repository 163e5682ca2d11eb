//! The heuristic decision policy.
//!
//! Each call to [`HeuristicAgent::decide`] walks a fixed priority list:
//!
//! 1. **Danger update** -- on the first visit to a cell with a wolf
//!    adjacent, spread one unit of wolf belief over the eligible neighbors.
//! 2. **Flee** -- with a wolf adjacent and a remembered last move, return
//!    the reverse of that move and stop.
//! 3. **Goal reinforcement** -- on the first visit to a cell with the flag
//!    adjacent, spread one unit of flag belief the same way.
//! 4. **Seek** -- without the flag, step toward the strongest flag belief;
//!    if there is none yet, explore.
//! 5. **Return** -- with the flag, explore. The stable's location is not
//!    used for steering.
//!
//! Eligible neighbors are the in-bounds 8-neighbors of the current cell,
//! minus the stable and minus the cell occupied on the previous turn.

use herding_types::{CellKind, Direction, Observation, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use tracing::debug;

use crate::belief::{BeliefMap, VisitCounter};
use crate::config::AgentConfig;

/// Offsets probed around a candidate cell when matching it against the
/// worst known wolf belief: every `2 * (dx, dy)` for `dx, dy` in `-1..=1`,
/// including the candidate itself.
const DANGER_PROBES: [Direction; 9] = [
    Direction::new(-2, -2),
    Direction::new(0, -2),
    Direction::new(2, -2),
    Direction::new(-2, 0),
    Direction::new(0, 0),
    Direction::new(2, 0),
    Direction::new(-2, 2),
    Direction::new(0, 2),
    Direction::new(2, 2),
];

/// Which branch of the policy produced a move. Used for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reversed the last move because a wolf is adjacent.
    Flee,
    /// Steered toward the strongest flag belief.
    Seek,
    /// Picked the least-visited available neighbor.
    Explore,
}

/// The reference player: local observations in, one step out.
#[derive(Debug, Clone)]
pub struct HeuristicAgent {
    /// Tunables.
    config: AgentConfig,
    /// Evidence of where the wolf is.
    danger: BeliefMap,
    /// Evidence of where the flag is.
    attraction: BeliefMap,
    /// Visits per cell.
    visits: VisitCounter,
    /// The move returned on the previous turn, if any.
    last_move: Option<Direction>,
    /// The cell the agent stood on during the previous turn.
    previous_position: Option<Position>,
    /// The branch taken on the most recent turn.
    last_phase: Option<Phase>,
    /// Source of all tie-breaking and exploration randomness.
    rng: StdRng,
}

impl HeuristicAgent {
    /// Create an agent with empty beliefs and a seeded random source.
    pub fn new(config: AgentConfig, seed: u64) -> Self {
        Self {
            config,
            danger: BeliefMap::new(),
            attraction: BeliefMap::new(),
            visits: VisitCounter::new(),
            last_move: None,
            previous_position: None,
            last_phase: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Accumulated wolf-danger beliefs.
    pub const fn danger(&self) -> &BeliefMap {
        &self.danger
    }

    /// Accumulated flag-attraction beliefs.
    pub const fn attraction(&self) -> &BeliefMap {
        &self.attraction
    }

    /// Visit counts.
    pub const fn visits(&self) -> &VisitCounter {
        &self.visits
    }

    /// The move returned on the previous turn.
    pub const fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Override the remembered last move. The next wolf sighting reverses
    /// this value.
    pub const fn set_last_move(&mut self, direction: Option<Direction>) {
        self.last_move = direction;
    }

    /// The branch taken on the most recent call to [`decide`](Self::decide).
    pub const fn last_phase(&self) -> Option<Phase> {
        self.last_phase
    }

    /// Choose this turn's step.
    ///
    /// Always returns a cardinal unit step; `None` is reserved for players
    /// that may pass.
    pub fn decide(&mut self, observation: &Observation) -> Option<Direction> {
        let here = observation.position;
        let came_from = self.previous_position.replace(here);
        let first_visit = self.visits.record(here) == 1;
        let eligible = eligible_neighbors(observation, came_from);

        if observation.sees(CellKind::Wolf) {
            if first_visit {
                self.danger.spread(&eligible);
            }
            if let Some(last) = self.last_move {
                let flee = last.reversed();
                self.last_move = Some(flee);
                self.last_phase = Some(Phase::Flee);
                debug!(turn = observation.turn, position = %here, direction = %flee, "Wolf adjacent, fleeing");
                return Some(flee);
            }
        }

        if observation.sees(CellKind::Flag) && first_visit {
            self.attraction.spread(&eligible);
        }

        let target = if observation.has_flag {
            None
        } else {
            self.attraction
                .strongest(observation.width, observation.height, &mut self.rng)
        };

        let (direction, phase) = match target {
            Some(flag) => (self.seek(observation, flag), Phase::Seek),
            None => (self.explore(observation), Phase::Explore),
        };

        self.last_move = Some(direction);
        self.last_phase = Some(phase);
        debug!(
            turn = observation.turn,
            position = %here,
            has_flag = observation.has_flag,
            ?phase,
            %direction,
            "Agent decided"
        );
        Some(direction)
    }

    /// Step toward `flag`: the available cardinal neighbor with the smallest
    /// Manhattan distance, first found wins ties. Falls back to a random
    /// direction when no neighbor is available.
    fn seek(&mut self, observation: &Observation, flag: Position) -> Direction {
        let worst = self.danger.max_score();
        let mut best = random_cardinal(&mut self.rng);
        let mut best_distance = u32::MAX;

        for direction in Direction::CARDINALS {
            let next = observation.position.offset(direction);
            let distance = flag.manhattan_distance(next);
            if distance < best_distance && self.is_available(observation, next, worst) {
                best_distance = distance;
                best = direction;
            }
        }
        best
    }

    /// Step toward the least-visited available cardinal neighbor.
    ///
    /// A random direction is drawn first and redrawn, up to the configured
    /// attempts, while it lands on an unavailable cell. That draw sets the
    /// baseline; a scan of the four cardinals then replaces it with any
    /// available cell visited strictly fewer times.
    fn explore(&mut self, observation: &Observation) -> Direction {
        let here = observation.position;
        let worst = self.danger.max_score();

        let mut choice = random_cardinal(&mut self.rng);
        let mut attempts: u32 = 0;
        while !self.is_available(observation, here.offset(choice), worst)
            && attempts < self.config.exploration_attempts
        {
            choice = random_cardinal(&mut self.rng);
            attempts = attempts.saturating_add(1);
        }
        let mut fewest = self.visits.count(here.offset(choice));

        for direction in Direction::CARDINALS {
            let next = here.offset(direction);
            let visits = self.visits.count(next);
            if visits < fewest && self.is_available(observation, next, worst) {
                fewest = visits;
                choice = direction;
            }
        }
        choice
    }

    /// Whether the agent is willing to step onto `cell`.
    ///
    /// The cell must be on the board and not the stable. When any wolf
    /// belief exists, the cell is also rejected if it, or any cell two steps
    /// away along the 8 compass lines, carries exactly the worst known wolf
    /// score.
    fn is_available(&self, observation: &Observation, cell: Position, worst: Option<Decimal>) -> bool {
        if !observation.is_inside(cell) || cell == observation.stable {
            return false;
        }
        worst.is_none_or(|worst| {
            !DANGER_PROBES
                .iter()
                .any(|probe| self.danger.score(cell.offset(*probe)) == worst)
        })
    }
}

/// Neighbors that receive a share of new evidence.
fn eligible_neighbors(observation: &Observation, came_from: Option<Position>) -> Vec<Position> {
    observation
        .position
        .neighbors8()
        .filter(|p| observation.is_inside(*p))
        .filter(|p| *p != observation.stable)
        .filter(|p| Some(*p) != came_from)
        .collect()
}

/// A uniformly random cardinal step.
fn random_cardinal(rng: &mut impl Rng) -> Direction {
    let index = rng.random_range(0..Direction::CARDINALS.len());
    Direction::CARDINALS
        .get(index)
        .copied()
        .unwrap_or(Direction::LEFT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn observe(position: Position, neighbors: &[CellKind]) -> Observation {
        Observation {
            turn: 0,
            width: 10,
            height: 10,
            position,
            stable: Position::new(9, 9),
            has_flag: false,
            neighbors: neighbors.iter().copied().collect::<BTreeSet<_>>(),
        }
    }

    fn third() -> Decimal {
        Decimal::ONE.checked_div(Decimal::from(3)).unwrap()
    }

    #[test]
    fn always_returns_a_unit_step_inside_the_board() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 5);
        let mut position = Position::new(0, 0);
        for turn in 0..200 {
            let mut obs = observe(position, &[]);
            obs.turn = turn;
            let d = agent.decide(&obs).unwrap();
            assert!(d.is_unit());
            let next = position.offset(d);
            assert!(obs.is_inside(next), "turn {turn}: stepped off board to {next}");
            assert_ne!(next, obs.stable);
            position = next;
        }
    }

    #[test]
    fn wolf_sighting_spreads_danger_on_first_visit() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 1);
        let here = Position::new(5, 5);
        agent.decide(&observe(here, &[CellKind::Wolf]));

        let share = Decimal::ONE.checked_div(Decimal::from(8)).unwrap();
        for n in here.neighbors8() {
            assert_eq!(agent.danger().score(n), share, "neighbor {n}");
        }
        assert_eq!(agent.danger().score(here), Decimal::ZERO);
    }

    #[test]
    fn revisiting_a_cell_does_not_reinforce() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 1);
        let here = Position::new(5, 5);
        agent.decide(&observe(here, &[CellKind::Wolf]));
        let before = agent.danger().clone();
        agent.decide(&observe(Position::new(5, 4), &[]));
        agent.decide(&observe(here, &[CellKind::Wolf]));
        assert_eq!(agent.danger(), &before);
    }

    #[test]
    fn eligible_set_excludes_stable_edges_and_previous_cell() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 2);
        // Turn 1 in the corner next to the stable.
        let mut obs = observe(Position::new(0, 1), &[]);
        obs.stable = Position::new(1, 2);
        agent.decide(&obs);

        // Turn 2 at (0, 0): in-bounds neighbors are (1,0), (0,1), (1,1);
        // (0,1) is where the agent came from.
        let mut obs = observe(Position::new(0, 0), &[CellKind::Flag]);
        obs.stable = Position::new(1, 2);
        agent.decide(&obs);

        let half = Decimal::new(5, 1);
        assert_eq!(agent.attraction().score(Position::new(1, 0)), half);
        assert_eq!(agent.attraction().score(Position::new(1, 1)), half);
        assert_eq!(agent.attraction().score(Position::new(0, 1)), Decimal::ZERO);
    }

    #[test]
    fn flag_sighting_uses_one_over_k() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 9);
        // Corner: three in-bounds neighbors, none is the stable.
        agent.decide(&observe(Position::new(0, 0), &[CellKind::Flag]));
        for n in [Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)] {
            assert_eq!(agent.attraction().score(n), third());
        }
    }

    #[test]
    fn flees_by_reversing_last_move() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 4);
        agent.set_last_move(Some(Direction::RIGHT));
        let d = agent.decide(&observe(Position::new(5, 5), &[CellKind::Wolf]));
        assert_eq!(d, Some(Direction::LEFT));
        assert_eq!(agent.last_move(), Some(Direction::LEFT));
        assert_eq!(agent.last_phase(), Some(Phase::Flee));
    }

    #[test]
    fn no_flee_without_a_previous_move() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 4);
        agent.decide(&observe(Position::new(5, 5), &[CellKind::Wolf]));
        assert_ne!(agent.last_phase(), Some(Phase::Flee));
    }

    #[test]
    fn flee_repeats_every_turn_the_wolf_stays_adjacent() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 4);
        agent.set_last_move(Some(Direction::UP));
        let a = agent.decide(&observe(Position::new(5, 5), &[CellKind::Wolf]));
        let b = agent.decide(&observe(Position::new(5, 6), &[CellKind::Wolf]));
        assert_eq!(a, Some(Direction::DOWN));
        assert_eq!(b, Some(Direction::UP));
    }

    #[test]
    fn seeks_toward_flag_belief() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 6);
        // Sighting at (0, 0) puts flag belief on (1,0), (0,1), (1,1).
        agent.decide(&observe(Position::new(0, 0), &[CellKind::Flag]));
        assert_eq!(agent.last_phase(), Some(Phase::Seek));

        // From far away the agent heads back toward that corner.
        let d = agent.decide(&observe(Position::new(6, 1), &[])).unwrap();
        assert_eq!(agent.last_phase(), Some(Phase::Seek));
        assert_eq!(d, Direction::LEFT);
    }

    #[test]
    fn holding_the_flag_switches_to_exploration() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 6);
        agent.decide(&observe(Position::new(0, 0), &[CellKind::Flag]));
        let mut obs = observe(Position::new(1, 0), &[]);
        obs.has_flag = true;
        agent.decide(&obs);
        assert_eq!(agent.last_phase(), Some(Phase::Explore));
    }

    #[test]
    fn exploration_prefers_unvisited_cells() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 8);
        let center = Position::new(5, 5);
        // Visit three of the four cardinal neighbors.
        for d in [Direction::LEFT, Direction::RIGHT, Direction::UP] {
            agent.decide(&observe(center.offset(d), &[]));
        }
        let d = agent.decide(&observe(center, &[])).unwrap();
        assert_eq!(d, Direction::DOWN);
        assert_eq!(agent.visits().count(center), 1);
        assert_eq!(agent.visits().count(center.offset(Direction::LEFT)), 1);
        assert_eq!(agent.visits().count(center.offset(Direction::DOWN)), 0);
    }

    #[test]
    fn danger_signature_blocks_cells_matching_worst_wolf_score() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 3);
        let obs = observe(Position::new(5, 5), &[]);
        agent.danger.add(Position::new(3, 5), Decimal::ONE);

        let worst = agent.danger.max_score();
        // (5,5) probes (3,5) at offset (-2, 0).
        assert!(!agent.is_available(&obs, Position::new(5, 5), worst));
        // The wolf cell itself probes itself.
        assert!(!agent.is_available(&obs, Position::new(3, 5), worst));
        // (4,5) probes (2,5) and (6,5) horizontally: no match.
        assert!(agent.is_available(&obs, Position::new(4, 5), worst));
    }

    #[test]
    fn seek_steps_around_a_closest_cell_that_matches_the_worst_wolf_score() {
        let mut agent = HeuristicAgent::new(AgentConfig::default(), 3);
        let here = Position::new(5, 5);
        agent.attraction.add(Position::new(2, 5), Decimal::ONE);
        agent.danger.add(Position::new(4, 5), Decimal::ONE);

        // LEFT (4,5) is closest to the flag but is the wolf cell; RIGHT (6,5)
        // sees (4,5) two steps west. UP and DOWN tie, UP is scanned first.
        let d = agent.decide(&observe(here, &[])).unwrap();
        assert_eq!(agent.last_phase(), Some(Phase::Seek));
        assert_eq!(d, Direction::UP);
        assert_eq!(agent.last_move(), Some(Direction::UP));
    }

    #[test]
    fn stable_and_off_board_cells_are_unavailable() {
        let agent = HeuristicAgent::new(AgentConfig::default(), 3);
        let obs = observe(Position::new(9, 8), &[]);
        assert!(!agent.is_available(&obs, obs.stable, None));
        assert!(!agent.is_available(&obs, Position::new(10, 8), None));
        assert!(agent.is_available(&obs, Position::new(8, 8), None));
    }

    #[test]
    fn same_seed_same_decisions() {
        let mut a = HeuristicAgent::new(AgentConfig::default(), 77);
        let mut b = HeuristicAgent::new(AgentConfig::default(), 77);
        let mut pa = Position::new(4, 4);
        let mut pb = pa;
        for _ in 0..50 {
            let da = a.decide(&observe(pa, &[])).unwrap();
            let db = b.decide(&observe(pb, &[])).unwrap();
            assert_eq!(da, db);
            pa = pa.offset(da);
            pb = pb.offset(db);
        }
    }
}
