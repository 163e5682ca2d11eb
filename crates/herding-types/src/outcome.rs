//! Final report of a finished game.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::EndReason;

/// Summary of a completed run, emitted once the loop stops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Unique identifier for this run (UUID v7, time-ordered).
    pub run_id: Uuid,
    /// Seed the run was constructed with.
    pub seed: u64,
    /// Why the game stopped.
    pub end_reason: EndReason,
    /// Turns elapsed.
    pub turns: u32,
    /// Cows pushed into the stable.
    pub cows_delivered: u32,
    /// Cows pushed into a wolf.
    pub cows_lost: u32,
    /// Cows still on the board.
    pub cows_remaining: u32,
    /// Whether the player ended holding the flag.
    pub has_flag: bool,
    /// `2 * delivered - (lost + turns / 100)`.
    pub score: Decimal,
    /// Wall-clock time the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock time the run finished.
    pub finished_at: DateTime<Utc>,
}
