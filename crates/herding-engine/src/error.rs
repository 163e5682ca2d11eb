//! Error types for the herding engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the game run.

/// Top-level error for the herding engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: herding_core::ConfigError,
    },

    /// Game setup or a turn failed.
    #[error("game error: {source}")]
    Game {
        /// The underlying game error.
        #[from]
        source: herding_core::GameError,
    },

    /// The `render` section could not be read.
    #[error("render config error: {message}")]
    Render {
        /// Description of the failure.
        message: String,
    },

    /// The final report could not be serialized.
    #[error("report error: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
