//! The per-turn observation handed to the player.
//!
//! The observation is the **only** information a player receives about the
//! board. It is built fresh by the judge each turn and passed by reference;
//! the player never sees the grid itself.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::CellKind;
use crate::geometry::Position;

/// Everything the player is allowed to know on a given turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Zero-based turn index this observation belongs to.
    pub turn: u32,
    /// Board width in cells.
    pub width: i32,
    /// Board height in cells.
    pub height: i32,
    /// The player's current cell.
    pub position: Position,
    /// The stable's cell.
    pub stable: Position,
    /// Whether the player is carrying the flag.
    pub has_flag: bool,
    /// Distinct non-empty kinds among the player's 8 neighbors.
    pub neighbors: BTreeSet<CellKind>,
}

impl Observation {
    /// Whether `kind` is among the neighbors.
    pub fn sees(&self, kind: CellKind) -> bool {
        self.neighbors.contains(&kind)
    }

    /// Whether `position` lies within the observed board bounds.
    pub const fn is_inside(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.width && position.y >= 0 && position.y < self.height
    }
}
