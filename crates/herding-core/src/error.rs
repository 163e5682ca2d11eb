//! Error types for the `herding-core` crate.

use herding_types::CellKind;
use herding_world::WorldError;

use crate::config::ConfigError;

/// Errors raised while setting up or playing a game.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A board operation failed.
    #[error("board error: {source}")]
    World {
        /// The underlying board error.
        #[from]
        source: WorldError,
    },

    /// The configuration was rejected.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },

    /// A board handed to the judge lacks a required entity.
    #[error("board has no {kind}")]
    MissingEntity {
        /// The kind that was not found.
        kind: CellKind,
    },

    /// A board handed to the judge has more than one of a unique entity.
    #[error("board has {count} cells of {kind}, expected exactly one")]
    DuplicateEntity {
        /// The kind that is duplicated.
        kind: CellKind,
        /// How many were found.
        count: u32,
    },
}
