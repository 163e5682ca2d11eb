//! The judge: authoritative game state, move validation, and resolution.
//!
//! A [`Judge`] owns the [`Board`] and the [`GameSession`] counters. Players
//! only ever see an [`Observation`]; they submit a [`Direction`] and the
//! judge decides what it means. Each turn runs:
//!
//! 1. **Observe** -- build the observation from the player's neighbors
//! 2. **Decide** -- ask the [`Player`] for a direction
//! 3. **Validate** -- unit step, on the board, onto empty/flag/wolf
//! 4. **Resolve** -- move the player, pick up the flag, or die to a wolf
//! 5. **Herd** -- if flagged and alive, push adjacent cows
//! 6. **Advance** -- increment the turn counter
//!
//! Invalid moves are ignored; the turn still counts.

use herding_types::{CellKind, Direction, EndReason, Observation, Position};
use herding_world::Board;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::GameConfig;
use crate::decision::Player;
use crate::error::GameError;
use crate::herding::{self, HerdLimits, HerdReport};
use crate::render::{self, RenderHook};
use crate::session::GameSession;

/// What a single move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player chose not to move.
    Idle,
    /// The move failed validation and changed nothing.
    Rejected {
        /// The offending direction.
        direction: Direction,
    },
    /// The player moved.
    Moved {
        /// Cell the player left.
        from: Position,
        /// Cell the player now occupies.
        to: Position,
        /// Whether this move picked up a flag.
        picked_flag: bool,
        /// Herding results, when the player carries the flag.
        herd: Option<HerdReport>,
    },
    /// The player walked into a wolf and was removed from the board.
    Caught {
        /// The wolf's cell.
        at: Position,
    },
}

/// Referee and owner of the game state.
#[derive(Debug, Clone)]
pub struct Judge {
    /// The grid.
    board: Board,
    /// Counters for this game.
    session: GameSession,
    /// The player's cell, `None` once a wolf caught them.
    player: Option<Position>,
    /// The stable's cell.
    stable: Position,
    /// Cows on the board when the game began.
    initial_cows: u32,
    /// Turn cap.
    max_turns: u32,
    /// Herding bounds.
    limits: HerdLimits,
    /// Seed used for placement and herding.
    seed: u64,
    /// Source for herding fallbacks (and placement, in [`Judge::new`]).
    rng: StdRng,
}

impl Judge {
    /// Set up a fresh game from configuration.
    ///
    /// Entities are placed on random empty cells in the order player,
    /// stable, flags, cows, wolves.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if the configuration is invalid and
    /// [`GameError::World`] if an entity cannot be placed.
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.game.seed);
        let mut board = Board::new(config.board.width, config.board.height)?;

        let player = board.place_random(CellKind::Player, &mut rng)?;
        let stable = board.place_random(CellKind::Stable, &mut rng)?;
        let placements = [
            (CellKind::Flag, config.entities.flags),
            (CellKind::Cow, config.entities.cows),
            (CellKind::Wolf, config.entities.wolves),
        ];
        for (kind, count) in placements {
            for _ in 0..count {
                let at = board.place_random(kind, &mut rng)?;
                debug!(%kind, at = %at, "Placed entity");
            }
        }
        board.clear_changes();

        debug!(player = %player, stable = %stable, "Board initialized");

        Ok(Self {
            initial_cows: board.count(CellKind::Cow),
            board,
            session: GameSession::new(),
            player: Some(player),
            stable,
            max_turns: config.game.max_turns,
            limits: config.herd_limits(),
            seed: config.game.seed,
            rng,
        })
    }

    /// Take over a prepared board. Rules and seed come from `config`;
    /// board size and entity counts come from the board itself.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::MissingEntity`] or [`GameError::DuplicateEntity`]
    /// unless the board holds exactly one player and one stable.
    pub fn from_board(mut board: Board, config: &GameConfig) -> Result<Self, GameError> {
        let player = find_unique(&board, CellKind::Player)?;
        let stable = find_unique(&board, CellKind::Stable)?;
        board.clear_changes();
        let cells = u32::try_from(board.width())
            .unwrap_or(0)
            .saturating_mul(u32::try_from(board.height()).unwrap_or(0));

        Ok(Self {
            initial_cows: board.count(CellKind::Cow),
            board,
            session: GameSession::new(),
            player: Some(player),
            stable,
            max_turns: config.game.max_turns,
            limits: HerdLimits {
                fallback_attempts: config.game.fallback_attempts,
                max_cow_steps: config.game.max_cow_steps.unwrap_or(cells),
            },
            seed: config.game.seed,
            rng: StdRng::seed_from_u64(config.game.seed),
        })
    }

    /// The board.
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The session counters.
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    /// The player's cell, or `None` after being caught.
    pub const fn player_position(&self) -> Option<Position> {
        self.player
    }

    /// The stable's cell.
    pub const fn stable(&self) -> Position {
        self.stable
    }

    /// Cows on the board at the start.
    pub const fn initial_cows(&self) -> u32 {
        self.initial_cows
    }

    /// Turn cap.
    pub const fn max_turns(&self) -> u32 {
        self.max_turns
    }

    /// Seed the game was built with.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Cows still on the board.
    pub fn cows_remaining(&self) -> u32 {
        self.board.count(CellKind::Cow)
    }

    /// True iff `position` lies on the board.
    pub const fn is_inside(&self, position: Position) -> bool {
        self.board.is_inside(position)
    }

    /// The current score.
    pub fn score(&self) -> Decimal {
        self.session.score()
    }

    /// Whether the game is over.
    pub const fn is_finished(&self) -> bool {
        self.session.caught || self.session.turns >= self.max_turns
    }

    /// Why the game ended, if it has.
    pub const fn end_reason(&self) -> Option<EndReason> {
        if self.session.caught {
            Some(EndReason::WolfCaught)
        } else if self.session.turns >= self.max_turns {
            Some(EndReason::TurnLimit)
        } else {
            None
        }
    }

    /// What the player may know this turn. `None` once the player is gone.
    pub fn observation(&self) -> Option<Observation> {
        let position = self.player?;
        Some(Observation {
            turn: self.session.turns,
            width: self.board.width(),
            height: self.board.height(),
            position,
            stable: self.stable,
            has_flag: self.session.has_flag,
            neighbors: self.board.neighbor_kinds(position),
        })
    }

    /// A move is valid when it is a unit cardinal step from the player's
    /// cell onto an in-bounds empty, flag, or wolf cell.
    pub fn is_move_valid(&self, direction: Direction) -> bool {
        let Some(here) = self.player else {
            return false;
        };
        direction.is_unit()
            && self
                .board
                .kind_at(here.offset(direction))
                .is_some_and(CellKind::accepts_player)
    }

    /// Apply a move. Invalid moves change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::World`] if a board write fails.
    pub fn apply_move(
        &mut self,
        direction: Direction,
        hook: &mut dyn RenderHook,
    ) -> Result<MoveOutcome, GameError> {
        let Some(from) = self.player.filter(|_| self.is_move_valid(direction)) else {
            debug!(%direction, "Move rejected");
            return Ok(MoveOutcome::Rejected { direction });
        };
        let to = from.offset(direction);
        let destination = self.board.kind_at(to);

        self.board.set_kind(from, CellKind::Empty)?;

        if destination == Some(CellKind::Wolf) {
            self.session.caught = true;
            self.player = None;
            render::flush(&mut self.board, hook);
            debug!(at = %to, "Player caught by wolf");
            return Ok(MoveOutcome::Caught { at: to });
        }

        let picked_flag = destination == Some(CellKind::Flag);
        if picked_flag {
            self.session.has_flag = true;
            debug!(at = %to, "Flag picked up");
        }

        self.board.set_kind(to, CellKind::Player)?;
        self.player = Some(to);
        render::flush(&mut self.board, hook);

        let herd = if self.session.has_flag {
            let report =
                herding::herd_cows(&mut self.board, to, self.limits, &mut self.rng, hook)?;
            self.session.cows_delivered = self.session.cows_delivered.saturating_add(report.delivered);
            self.session.cows_lost = self.session.cows_lost.saturating_add(report.lost);
            Some(report)
        } else {
            None
        };

        Ok(MoveOutcome::Moved {
            from,
            to,
            picked_flag,
            herd,
        })
    }

    /// Play one turn: observe, ask `player`, apply, and advance the turn
    /// counter. Does nothing once the game is over.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::World`] if a board write fails.
    pub fn play_turn(
        &mut self,
        player: &mut dyn Player,
        hook: &mut dyn RenderHook,
    ) -> Result<MoveOutcome, GameError> {
        if self.is_finished() {
            return Ok(MoveOutcome::Idle);
        }
        let Some(observation) = self.observation() else {
            return Ok(MoveOutcome::Idle);
        };

        let outcome = match player.next_move(&observation) {
            Some(direction) => self.apply_move(direction, hook)?,
            None => MoveOutcome::Idle,
        };
        self.session.turns = self.session.turns.saturating_add(1);

        debug!(turn = observation.turn, ?outcome, "Turn played");
        Ok(outcome)
    }

    /// Notify `hook` of every cell on the board.
    pub fn redraw(&self, hook: &mut dyn RenderHook) {
        let all: Vec<Position> = self.board.positions().collect();
        hook.on_change(&self.board, &all);
    }
}

fn find_unique(board: &Board, kind: CellKind) -> Result<Position, GameError> {
    match board.count(kind) {
        0 => Err(GameError::MissingEntity { kind }),
        1 => board.find(kind).ok_or(GameError::MissingEntity { kind }),
        count => Err(GameError::DuplicateEntity { kind, count }),
    }
}
