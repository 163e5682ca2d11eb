//! Shared type definitions for the herding simulation.
//!
//! This crate is the single source of truth for the value types that cross
//! crate boundaries: the board, the agent, and the judge all speak in these
//! terms.
//!
//! # Modules
//!
//! - [`geometry`] -- [`Position`] and [`Direction`] value types
//! - [`enums`] -- [`CellKind`] and [`EndReason`]
//! - [`observation`] -- The per-turn [`Observation`] delivered to the player
//! - [`outcome`] -- The [`GameOutcome`] report of a finished run

pub mod enums;
pub mod geometry;
pub mod observation;
pub mod outcome;

// Re-export all public types at crate root for convenience.
pub use enums::{CellKind, EndReason};
pub use geometry::{Direction, Position};
pub use observation::Observation;
pub use outcome::GameOutcome;
