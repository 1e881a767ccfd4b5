use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::geometry::Grid;

/// Problems with a game configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("cell size must be greater than zero")]
    ZeroCellSize,
    #[error("board must be at least 2x2 cells, got {width}x{height}")]
    BoardTooSmall { width: u32, height: u32 },
    #[error("board of {width}x{height} cells at {cell_size}px per cell is too large")]
    BoardTooLarge {
        width: u32,
        height: u32,
        cell_size: u32,
    },
    #[error("snake of length {length} does not fit on a board {height} cells high")]
    SnakeDoesNotFit { length: usize, height: u32 },
    #[error("minimum tick interval must be greater than zero")]
    ZeroMinInterval,
    #[error("base interval {base}ms is below the minimum interval {min}ms")]
    BaseBelowMinimum { base: u64, min: u64 },
}

/// Tick timing; the game speeds up as the score grows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Interval at score 0, in milliseconds
    pub base_interval_ms: u64,
    /// Floor the interval never drops below
    pub min_interval_ms: u64,
    /// Milliseconds shaved off per point scored
    pub decay_per_point_ms: u64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 500,
            min_interval_ms: 100,
            decay_per_point_ms: 20,
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: u32,
    /// Height of the game grid in cells
    pub grid_height: u32,
    /// Pixel size of one cell
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    pub speed: SpeedConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            cell_size: 20,
            initial_snake_length: 2,
            speed: SpeedConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height, self.cell_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(ConfigError::BoardTooSmall {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        // Cells and pixels are addressed with i32
        let fits = |cells: u32| {
            cells
                .checked_mul(self.cell_size)
                .is_some_and(|px| i32::try_from(px).is_ok())
        };
        if !fits(self.grid_width) || !fits(self.grid_height) {
            return Err(ConfigError::BoardTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                cell_size: self.cell_size,
            });
        }

        // The body hangs below the centre cell
        let room = (self.grid_height - self.grid_height / 2) as usize;
        if self.initial_snake_length < 2 || self.initial_snake_length > room {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.initial_snake_length,
                height: self.grid_height,
            });
        }

        if self.speed.min_interval_ms == 0 {
            return Err(ConfigError::ZeroMinInterval);
        }
        if self.speed.base_interval_ms < self.speed.min_interval_ms {
            return Err(ConfigError::BaseBelowMinimum {
                base: self.speed.base_interval_ms,
                min: self.speed.min_interval_ms,
            });
        }
        Ok(())
    }
}
