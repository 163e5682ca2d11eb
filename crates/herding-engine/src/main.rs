//! Game runner binary for the herding simulation.
//!
//! This is the main entry point that wires together the judge, the
//! heuristic agent, and the optional text renderer. It loads configuration,
//! places the board, plays one game to completion, and prints the score
//! and a JSON report.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `herding-config.yaml` (or the path given as
//!    the first argument)
//! 2. Initialize structured logging (tracing)
//! 3. Load the renderer's tile table from the `render` section
//! 4. Place the board and create the agent
//! 5. Run the game
//! 6. Print the score and the outcome report

mod error;
mod renderer;

use std::path::{Path, PathBuf};

use herding_agents::HeuristicAgent;
use herding_core::config::LoggingConfig;
use herding_core::{GameConfig, Judge, NoOpRenderHook, RenderHook};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::renderer::{RenderConfig, TextRenderer, TileSet};

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "herding-config.yaml";

/// Application entry point for the herding engine.
///
/// # Errors
///
/// Returns an error if configuration, setup, or the game itself fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    // 1. Load configuration.
    let config = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!(path = %config_path.display(), "herding-engine starting");
    info!(
        width = config.board.width,
        height = config.board.height,
        cows = config.entities.cows,
        wolves = config.entities.wolves,
        flags = config.entities.flags,
        seed = config.game.seed,
        max_turns = config.game.max_turns,
        "Configuration loaded"
    );

    // 3. Renderer.
    let render_config = load_render_config(&config_path)?;
    let mut hook: Box<dyn RenderHook> = if render_config.enabled {
        info!(tiles = render_config.tiles.len(), "Text renderer enabled");
        Box::new(TextRenderer::new(TileSet::from_config(&render_config)))
    } else {
        Box::new(NoOpRenderHook)
    };

    // 4. Board and agent.
    let mut judge = Judge::new(&config).map_err(EngineError::from)?;
    let mut agent = HeuristicAgent::new(config.agent_config(), config.agent_seed());
    info!(
        player = ?judge.player_position(),
        stable = %judge.stable(),
        "Board placed"
    );

    // 5. Play.
    let outcome = judge
        .run(&mut agent, hook.as_mut())
        .map_err(EngineError::from)?;

    // 6. Report.
    let report = serde_json::to_string_pretty(&outcome).map_err(EngineError::from)?;
    println!("Your score: {}", outcome.score);
    println!("{report}");

    info!(
        end_reason = ?outcome.end_reason,
        turns = outcome.turns,
        "herding-engine shutdown complete"
    );

    Ok(())
}

/// Install the tracing subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

/// Load the game configuration.
///
/// Falls back to defaults (plus environment overrides) when the file does
/// not exist.
fn load_config(path: &Path) -> Result<GameConfig, EngineError> {
    if path.exists() {
        Ok(GameConfig::from_file(path)?)
    } else {
        let mut config = GameConfig::default();
        config.game.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }
}

/// Load the `render` section from the configuration file.
///
/// If the file does not exist or lacks the `render` key, the renderer
/// stays disabled.
fn load_render_config(path: &Path) -> Result<RenderConfig, EngineError> {
    if !path.exists() {
        return Ok(RenderConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| EngineError::Render {
        message: format!("failed to read config file: {e}"),
    })?;

    // Parse the full YAML and extract just the "render" section.
    let raw: serde_yml::Value = serde_yml::from_str(&contents).map_err(|e| EngineError::Render {
        message: format!("failed to parse config YAML: {e}"),
    })?;

    match raw.get("render") {
        Some(section) => serde_yml::from_value(section.clone()).map_err(|e| EngineError::Render {
            message: format!("failed to parse render config: {e}"),
        }),
        None => Ok(RenderConfig::default()),
    }
}
