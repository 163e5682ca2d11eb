//! Enumeration types for the herding simulation.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cell kinds
// ---------------------------------------------------------------------------

/// What occupies a single board cell.
///
/// Exactly one kind occupies each coordinate. The board grid is the only
/// record of where entities are; there is no separate entity list.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    /// Nothing here.
    #[default]
    Empty,
    /// A cow waiting to be herded into the stable.
    Cow,
    /// A wolf. Kills the player on contact and eats cows pushed into it.
    Wolf,
    /// The flag. Picking it up lets the player herd cows.
    Flag,
    /// The stable. Cows pushed into it are delivered.
    Stable,
    /// The controlled agent.
    Player,
}

impl CellKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Empty,
        Self::Cow,
        Self::Wolf,
        Self::Flag,
        Self::Stable,
        Self::Player,
    ];

    /// Single-letter symbol used in text dumps (`E`, `C`, `W`, `F`, `S`, `P`).
    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => 'E',
            Self::Cow => 'C',
            Self::Wolf => 'W',
            Self::Flag => 'F',
            Self::Stable => 'S',
            Self::Player => 'P',
        }
    }

    /// Whether the cell holds anything at all.
    pub const fn is_occupied(self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Whether the player may step onto a cell of this kind.
    pub const fn accepts_player(self) -> bool {
        matches!(self, Self::Empty | Self::Flag | Self::Wolf)
    }
}

impl core::fmt::Display for CellKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Cow => "cow",
            Self::Wolf => "wolf",
            Self::Flag => "flag",
            Self::Stable => "stable",
            Self::Player => "player",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// End reasons
// ---------------------------------------------------------------------------

/// Why a game stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// The player walked into a wolf.
    WolfCaught,
    /// The configured turn cap was reached.
    TurnLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_kind_is_empty() {
        assert_eq!(CellKind::default(), CellKind::Empty);
        assert!(!CellKind::Empty.is_occupied());
    }

    #[test]
    fn player_may_enter_only_empty_flag_or_wolf() {
        let allowed: Vec<CellKind> = CellKind::ALL
            .into_iter()
            .filter(|k| k.accepts_player())
            .collect();
        assert_eq!(allowed, vec![CellKind::Empty, CellKind::Wolf, CellKind::Flag]);
    }

    #[test]
    fn symbols_are_distinct() {
        let mut symbols: Vec<char> = CellKind::ALL.iter().map(|k| k.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), CellKind::ALL.len());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&EndReason::WolfCaught).unwrap_or_default();
        assert_eq!(json, "\"wolf_caught\"");
        let kind: Result<CellKind, _> = serde_json::from_str("\"stable\"");
        assert_eq!(kind.ok(), Some(CellKind::Stable));
    }
}
