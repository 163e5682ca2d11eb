//! Board state for the herding simulation.
//!
//! This crate models the physical game board: a fixed-size grid of
//! [`CellKind`] values that is the single source of truth for where every
//! entity stands. It knows nothing about turns, scoring, or players.
//!
//! # Modules
//!
//! - [`board`] -- The [`Board`] grid with bounds checks, seeded placement,
//!   neighbor observation, and a change log for renderers.
//! - [`error`] -- Error types for board operations.
//!
//! [`CellKind`]: herding_types::CellKind

pub mod board;
pub mod error;

// Re-export primary types at crate root.
pub use board::Board;
pub use error::WorldError;
