//! Cow herding: pushing cows away from a flag-carrying player.
//!
//! When the player holds the flag, every cow 8-adjacent to the player's new
//! cell is pushed directly away from the player, one cell at a time, for as
//! long as the player stays adjacent to it. A push into the stable delivers
//! the cow; a push into a wolf loses it. When the straight push is blocked
//! (off the board, or onto anything other than empty, stable, or wolf) the
//! cow tries random surrounding cells instead.
//!
//! Both the random fallback and the push chain are bounded by
//! [`HerdLimits`], so a boxed-in cow stays where it is instead of spinning.

use herding_types::{CellKind, Direction, Position};
use herding_world::{Board, WorldError};
use rand::Rng;
use tracing::{debug, warn};

use crate::render::{self, RenderHook};

/// Bounds on a single herding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HerdLimits {
    /// Random relocation candidates tried per blocked push.
    pub fallback_attempts: u32,
    /// Moves one cow may make per trigger.
    pub max_cow_steps: u32,
}

/// What happened to one herded cow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CowFate {
    /// Pushed into the stable and removed.
    Delivered,
    /// Pushed into a wolf and removed.
    Eaten,
    /// Moved until it was no longer adjacent to the player.
    Escaped {
        /// Where the cow ended up.
        at: Position,
    },
    /// Every fallback candidate was blocked; the cow stays put.
    Stuck {
        /// Where the cow is stuck.
        at: Position,
    },
    /// The per-cow step cap ran out while still adjacent.
    StepLimit {
        /// Where the cow stopped.
        at: Position,
    },
}

/// Totals for one herding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HerdReport {
    /// Cows delivered to the stable.
    pub delivered: u32,
    /// Cows lost to wolves.
    pub lost: u32,
    /// Single-cell cow moves made.
    pub moves: u32,
    /// Cows left in place because nothing was free.
    pub stuck: u32,
}

impl HerdReport {
    const fn record(&mut self, fate: CowFate) {
        match fate {
            CowFate::Delivered => self.delivered = self.delivered.saturating_add(1),
            CowFate::Eaten => self.lost = self.lost.saturating_add(1),
            CowFate::Stuck { .. } => self.stuck = self.stuck.saturating_add(1),
            CowFate::Escaped { .. } | CowFate::StepLimit { .. } => {}
        }
    }
}

/// Herd every cow adjacent to `player`, in row-major order of where the
/// cows stood when herding began.
///
/// Each mutation is flushed to `hook` as it happens.
///
/// # Errors
///
/// Returns [`WorldError`] only if a board write fails, which cannot happen
/// for in-bounds positions.
pub fn herd_cows(
    board: &mut Board,
    player: Position,
    limits: HerdLimits,
    rng: &mut impl Rng,
    hook: &mut dyn RenderHook,
) -> Result<HerdReport, WorldError> {
    let mut report = HerdReport::default();

    for cow in board.neighbors_of_kind(player, CellKind::Cow) {
        if !board.is(cow, CellKind::Cow) {
            continue;
        }
        let (fate, moves) = herd_one(board, player, cow, limits, rng, hook)?;
        debug!(cow = %cow, ?fate, moves, "Cow herded");
        report.record(fate);
        report.moves = report.moves.saturating_add(moves);
    }

    Ok(report)
}

/// Push a single cow until it leaves the player's neighborhood, is removed,
/// or runs out of options. Returns the fate and the number of moves made.
fn herd_one(
    board: &mut Board,
    player: Position,
    start: Position,
    limits: HerdLimits,
    rng: &mut impl Rng,
    hook: &mut dyn RenderHook,
) -> Result<(CowFate, u32), WorldError> {
    let mut cow = start;
    let mut moves: u32 = 0;

    while cow.is_adjacent8(player) {
        if moves >= limits.max_cow_steps {
            warn!(cow = %cow, steps = moves, "Cow step cap reached");
            return Ok((CowFate::StepLimit { at: cow }, moves));
        }

        let preferred = cow.offset(player.delta_to(cow));
        let target = if accepts_cow(board, preferred) {
            preferred
        } else if let Some(fallback) = random_fallback(board, cow, limits.fallback_attempts, rng) {
            fallback
        } else {
            warn!(
                cow = %cow,
                attempts = limits.fallback_attempts,
                "No free cell around cow, leaving it in place"
            );
            return Ok((CowFate::Stuck { at: cow }, moves));
        };

        match board.kind_at(target) {
            Some(CellKind::Stable) => {
                board.set_kind(cow, CellKind::Empty)?;
                render::flush(board, hook);
                return Ok((CowFate::Delivered, moves));
            }
            Some(CellKind::Wolf) => {
                board.set_kind(cow, CellKind::Empty)?;
                render::flush(board, hook);
                return Ok((CowFate::Eaten, moves));
            }
            _ => {
                board.set_kind(cow, CellKind::Empty)?;
                board.set_kind(target, CellKind::Cow)?;
                render::flush(board, hook);
                cow = target;
                moves = moves.saturating_add(1);
            }
        }
    }

    Ok((CowFate::Escaped { at: cow }, moves))
}

/// Whether a cow may be pushed onto `position`.
fn accepts_cow(board: &Board, position: Position) -> bool {
    matches!(
        board.kind_at(position),
        Some(CellKind::Empty | CellKind::Stable | CellKind::Wolf)
    )
}

/// Draw random surrounding offsets until one accepts the cow.
fn random_fallback(
    board: &Board,
    cow: Position,
    attempts: u32,
    rng: &mut impl Rng,
) -> Option<Position> {
    for _ in 0..attempts {
        let pick = rng.random_range(0..Direction::SURROUNDING.len());
        let Some(&offset) = Direction::SURROUNDING.get(pick) else {
            continue;
        };
        let candidate = cow.offset(offset);
        if accepts_cow(board, candidate) {
            return Some(candidate);
        }
    }
    None
}
