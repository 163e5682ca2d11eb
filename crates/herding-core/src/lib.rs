//! Game rules, turn loop, and configuration for the herding simulation.
//!
//! This crate ties the board and the agent together. The [`Judge`] owns
//! the authoritative state and validates every move; the herding engine
//! pushes cows once the player carries the flag; the runner loops turns
//! and reports a [`GameOutcome`].
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration loading ([`GameConfig`])
//! - [`decision`] -- The [`Player`] trait and simple players
//! - [`error`] -- [`GameError`]
//! - [`herding`] -- Cow herding with bounded fallbacks
//! - [`judge`] -- Move validation and resolution ([`Judge`])
//! - [`render`] -- The [`RenderHook`] seam for external renderers
//! - [`runner`] -- [`run_game`] and end-of-game logging
//! - [`session`] -- Counters and scoring ([`GameSession`])
//!
//! [`GameOutcome`]: herding_types::GameOutcome

pub mod config;
pub mod decision;
pub mod error;
pub mod herding;
pub mod judge;
pub mod render;
pub mod runner;
pub mod session;

pub use config::{ConfigError, GameConfig};
pub use decision::{IdlePlayer, Player, ScriptedPlayer};
pub use error::GameError;
pub use herding::{CowFate, HerdLimits, HerdReport};
pub use judge::{Judge, MoveOutcome};
pub use render::{NoOpRenderHook, RenderHook};
pub use runner::{log_game_end, run_game};
pub use session::GameSession;
