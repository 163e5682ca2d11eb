//! The reference player for the herding simulation.
//!
//! The agent never sees the board. Each turn it receives an
//! [`Observation`] (its own cell, the stable, whether it holds the flag,
//! and which kinds stand next to it) and returns a step. Between turns it
//! keeps its own bookkeeping:
//!
//! - [`belief`] -- Sparse score maps that accumulate evidence of where the
//!   wolf and the flag are, plus per-cell visit counts.
//! - [`agent`] -- [`HeuristicAgent`], the decision policy.
//! - [`config`] -- [`AgentConfig`] tunables.
//!
//! [`Observation`]: herding_types::Observation

pub mod agent;
pub mod belief;
pub mod config;

// Re-export primary types at crate root for convenience.
pub use agent::{HeuristicAgent, Phase};
pub use belief::{BeliefMap, VisitCounter};
pub use config::AgentConfig;
