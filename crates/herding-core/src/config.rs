//! Configuration loading and typed config structures for the herding game.
//!
//! The canonical configuration lives in `herding-config.yaml` next to the
//! binary's working directory. This module defines strongly-typed structs
//! that mirror the YAML structure and a loader that reads and validates it.
//! Every field has a default, so an empty file (or no file) yields the
//! reference game: a 10x10 board, 5 cows, 1 wolf, 1 flag, 1 stable, and a
//! 250-turn cap.
//!
//! The `render` section is read by the binary, not here.

use std::path::Path;

use herding_agents::AgentConfig;
use serde::Deserialize;

use crate::herding::HerdLimits;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible game.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Board dimensions.
    #[serde(default)]
    pub board: BoardConfig,

    /// How many of each entity to place.
    #[serde(default)]
    pub entities: EntitiesConfig,

    /// Seed, turn cap, and herding bounds.
    #[serde(default)]
    pub game: RulesConfig,

    /// Heuristic agent tunables.
    #[serde(default)]
    pub agent: AgentSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `HERDING_SEED` overrides `game.seed`
    /// - `HERDING_MAX_TURNS` overrides `game.max_turns`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if an override does not parse or
    /// validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.game.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for zero dimensions, a stable count
    /// other than one, or more entities than cells.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.width == 0 || self.board.height == 0 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "board must be at least 1x1, got {}x{}",
                    self.board.width, self.board.height
                ),
            });
        }
        if self.entities.stables != 1 {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "exactly one stable is supported, got {}",
                    self.entities.stables
                ),
            });
        }
        let cells = u64::from(self.board.width).saturating_mul(u64::from(self.board.height));
        let needed = self.entities.total_with_player();
        if needed > cells {
            return Err(ConfigError::Invalid {
                reason: format!("{needed} entities do not fit on {cells} cells"),
            });
        }
        Ok(())
    }

    /// Herding bounds derived from the rules and board size.
    pub fn herd_limits(&self) -> HerdLimits {
        let cells = self.board.width.saturating_mul(self.board.height);
        HerdLimits {
            fallback_attempts: self.game.fallback_attempts,
            max_cow_steps: self.game.max_cow_steps.unwrap_or(cells),
        }
    }

    /// Agent configuration built from the `agent` section.
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            exploration_attempts: self.agent.exploration_attempts,
        }
    }

    /// Seed for the agent's random source: `agent.seed` when set,
    /// otherwise one past the game seed so the two streams differ.
    pub const fn agent_seed(&self) -> u64 {
        match self.agent.seed {
            Some(seed) => seed,
            None => self.game.seed.wrapping_add(1),
        }
    }
}

/// Board dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// Columns.
    #[serde(default = "default_board_side")]
    pub width: u32,

    /// Rows.
    #[serde(default = "default_board_side")]
    pub height: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_board_side(),
            height: default_board_side(),
        }
    }
}

/// Entity counts placed at game start (the player is always one).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntitiesConfig {
    /// Cows to herd.
    #[serde(default = "default_cows")]
    pub cows: u32,

    /// Static wolves.
    #[serde(default = "default_one")]
    pub wolves: u32,

    /// Flags.
    #[serde(default = "default_one")]
    pub flags: u32,

    /// Stables. Only `1` passes validation.
    #[serde(default = "default_one")]
    pub stables: u32,
}

impl EntitiesConfig {
    /// Cells needed for every entity plus the player.
    pub fn total_with_player(&self) -> u64 {
        [self.cows, self.wolves, self.flags, self.stables]
            .into_iter()
            .map(u64::from)
            .fold(1_u64, u64::saturating_add)
    }
}

impl Default for EntitiesConfig {
    fn default() -> Self {
        Self {
            cows: default_cows(),
            wolves: default_one(),
            flags: default_one(),
            stables: default_one(),
        }
    }
}

/// Seed, turn cap, and herding bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Random seed for placement and herding.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Turns before the game ends.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Random relocation candidates tried for a boxed-in cow before it is
    /// left in place.
    #[serde(default = "default_fallback_attempts")]
    pub fallback_attempts: u32,

    /// Moves one cow may make per trigger. Defaults to the board's cell
    /// count.
    #[serde(default)]
    pub max_cow_steps: Option<u32>,
}

impl RulesConfig {
    /// Override seed and turn cap from `HERDING_SEED` and
    /// `HERDING_MAX_TURNS` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set but does not
    /// parse.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the variable and value that
    /// failed to parse. Nothing is changed in that case.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let seed = parse_override(&lookup, SEED_VAR)?;
        let max_turns = parse_override(&lookup, MAX_TURNS_VAR)?;
        if let Some(seed) = seed {
            self.seed = seed;
        }
        if let Some(max_turns) = max_turns {
            self.max_turns = max_turns;
        }
        Ok(())
    }
}

/// Environment variable overriding `game.seed`.
pub const SEED_VAR: &str = "HERDING_SEED";

/// Environment variable overriding `game.max_turns`.
pub const MAX_TURNS_VAR: &str = "HERDING_MAX_TURNS";

fn parse_override<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            reason: format!("{key}={raw:?} is not valid: {e}"),
        })
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_turns: default_max_turns(),
            fallback_attempts: default_fallback_attempts(),
            max_cow_steps: None,
        }
    }
}

/// The `agent` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AgentSection {
    /// Extra random draws during exploration.
    #[serde(default = "default_exploration_attempts")]
    pub exploration_attempts: u32,

    /// Seed for the agent. Derived from `game.seed` when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            exploration_attempts: default_exploration_attempts(),
            seed: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (trace, debug, info, warn,
    /// error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_board_side() -> u32 {
    10
}

const fn default_cows() -> u32 {
    5
}

const fn default_one() -> u32 {
    1
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_turns() -> u32 {
    250
}

const fn default_fallback_attempts() -> u32 {
    64
}

const fn default_exploration_attempts() -> u32 {
    20
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_the_reference_game() {
        let config = GameConfig::default();
        assert_eq!(config.board.width, 10);
        assert_eq!(config.board.height, 10);
        assert_eq!(config.entities.cows, 5);
        assert_eq!(config.entities.wolves, 1);
        assert_eq!(config.entities.flags, 1);
        assert_eq!(config.entities.stables, 1);
        assert_eq!(config.game.max_turns, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
board:
  width: 8
  height: 6

entities:
  cows: 3
  wolves: 2
  flags: 1
  stables: 1

game:
  seed: 123
  max_turns: 90
  fallback_attempts: 10
  max_cow_steps: 12

agent:
  exploration_attempts: 5
  seed: 9

logging:
  level: "debug"
  json: true
"#;
        let config = GameConfig::parse(yaml).unwrap();

        assert_eq!(config.board.width, 8);
        assert_eq!(config.entities.wolves, 2);
        assert_eq!(config.game.seed, 123);
        assert_eq!(config.game.max_turns, 90);
        assert_eq!(config.agent_seed(), 9);
        assert_eq!(config.agent_config().exploration_attempts, 5);
        assert_eq!(config.herd_limits().max_cow_steps, 12);
        assert_eq!(config.herd_limits().fallback_attempts, 10);
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = GameConfig::parse("game:\n  seed: 7\n").unwrap();

        assert_eq!(config.game.seed, 7);
        assert_eq!(config.agent_seed(), 8);
        assert_eq!(config.board.width, 10);
        assert_eq!(config.herd_limits().max_cow_steps, 100);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(GameConfig::parse("").is_ok());
    }

    #[test]
    fn zero_sized_board_is_invalid() {
        let result = GameConfig::parse("board:\n  width: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn two_stables_are_invalid() {
        let result = GameConfig::parse("entities:\n  stables: 2\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn overcrowded_board_is_invalid() {
        let yaml = "board:\n  width: 2\n  height: 2\nentities:\n  cows: 2\n";
        let result = GameConfig::parse(yaml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_yaml_is_a_yaml_error() {
        let result = GameConfig::parse("board: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn overrides_replace_seed_and_turn_cap() {
        let mut rules = RulesConfig::default();
        rules
            .apply_overrides(env(&[(SEED_VAR, "7"), (MAX_TURNS_VAR, " 30 ")]))
            .unwrap();
        assert_eq!(rules.seed, 7);
        assert_eq!(rules.max_turns, 30);
    }

    #[test]
    fn unset_overrides_keep_yaml_values() {
        let mut rules = GameConfig::parse("game:\n  seed: 5\n").unwrap().game;
        rules.apply_overrides(env(&[])).unwrap();
        assert_eq!(rules.seed, 5);
        assert_eq!(rules.max_turns, 250);
    }

    #[test]
    fn unparseable_override_is_an_error() {
        let mut rules = RulesConfig::default();
        let result = rules.apply_overrides(env(&[(SEED_VAR, "abc"), (MAX_TURNS_VAR, "9")]));

        let Err(ConfigError::Invalid { reason }) = result else {
            panic!("expected an invalid-config error, got {result:?}");
        };
        assert!(reason.contains(SEED_VAR), "{reason}");
        assert!(reason.contains("abc"), "{reason}");
        assert_eq!(rules, RulesConfig::default(), "nothing is applied");
    }

    #[test]
    fn negative_turn_cap_override_is_an_error() {
        let mut rules = RulesConfig::default();
        let result = rules.apply_overrides(env(&[(MAX_TURNS_VAR, "-1")]));
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("herding-config.yaml");
        if path.exists() {
            let config = GameConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
