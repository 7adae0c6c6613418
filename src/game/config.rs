use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use super::action::Direction;
use super::state::Position;

/// Smallest board on which a single-segment snake can move without landing
/// on its own old head
pub const MIN_GRID_SIZE: usize = 2;
/// Largest board accepted; keeps coordinates well inside `i32` and frames cheap
pub const MAX_GRID_SIZE: usize = 128;

/// Errors raised while building or loading a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "grid size {grid_size} must be between {} and {}",
        MIN_GRID_SIZE,
        MAX_GRID_SIZE
    )]
    GridSize { grid_size: usize },
    #[error("{what} {pos:?} lies outside the {grid_size}x{grid_size} grid")]
    OutOfBounds {
        what: &'static str,
        pos: Position,
        grid_size: usize,
    },
    #[error("tick interval must be non-zero")]
    ZeroTickInterval,
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square, wrap-around grid
    pub grid_size: usize,
    /// Where the single-segment snake starts each round
    pub initial_head: Position,
    /// Heading at the start of each round
    pub initial_direction: Direction,
    /// Food position at the start of each round
    pub initial_food: Position,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_head: Position::new(10, 10),
            initial_direction: Direction::Right,
            initial_food: Position::new(15, 15),
            tick_interval_ms: 150,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size.
    ///
    /// Start positions are scaled from the defaults so they stay on the grid.
    /// Sizes outside the accepted range are kept as given for [`validate`]
    /// to reject.
    ///
    /// [`validate`]: GameConfig::validate
    pub fn new(grid_size: usize) -> Self {
        let defaults = Self::default();
        let scale = |c: i32| {
            let scaled = (c as usize).saturating_mul(grid_size) / defaults.grid_size;
            i32::try_from(scaled).unwrap_or(i32::MAX)
        };

        Self {
            grid_size,
            initial_head: Position::new(
                scale(defaults.initial_head.x),
                scale(defaults.initial_head.y),
            ),
            initial_food: Position::new(
                scale(defaults.initial_food.x),
                scale(defaults.initial_food.y),
            ),
            ..defaults
        }
    }

    /// Load a configuration from a TOML file. Missing keys take defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the grid size range and that every start position is on the grid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize {
                grid_size: self.grid_size,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        for (what, pos) in [
            ("initial head", self.initial_head),
            ("initial food", self.initial_food),
        ] {
            if !pos.is_within(self.grid_size) {
                return Err(ConfigError::OutOfBounds {
                    what,
                    pos,
                    grid_size: self.grid_size,
                });
            }
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
