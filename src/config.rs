use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::snake::Position;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default edge length of one cell in logical units.
pub const DEFAULT_CELL_SIZE: u16 = 1;

/// Default spawn cell for the one-segment snake.
pub const DEFAULT_SPAWN: Position = Position { x: 10, y: 10 };

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Problems found while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u16, height: u16 },
    #[error("grid needs at least 2 cells to hold the snake and food")]
    TooFewCells,
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("world extent {width}x{height} cells of size {cell_size} overflows i32")]
    WorldTooLarge {
        width: u16,
        height: u16,
        cell_size: u16,
    },
    #[error("tick interval must be at least {min} ms, got {got} ms")]
    TickIntervalTooShort { got: u64, min: u64 },
    #[error("spawn cell ({x}, {y}) lies outside the {width}x{height} grid")]
    SpawnOutOfBounds {
        x: i32,
        y: i32,
        width: u16,
        height: u16,
    },
}

/// Tunables for one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub cell_size: u16,
    pub spawn: Position,
    pub tick_interval_ms: u64,
    /// First body index that counts for self-collision. `0` checks the whole
    /// pre-advance body.
    pub self_collision_min_index: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            cell_size: DEFAULT_CELL_SIZE,
            spawn: DEFAULT_SPAWN,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            self_collision_min_index: 0,
        }
    }
}

impl GameConfig {
    /// Creates a default configuration for a `width` x `height` grid, spawning
    /// in the center cell.
    #[must_use]
    pub fn with_grid(width: u16, height: u16) -> Self {
        Self {
            grid: GridSize { width, height },
            spawn: Position {
                x: i32::from(width / 2),
                y: i32::from(height / 2),
            },
            ..Self::default()
        }
    }

    /// Reads a JSON config file. Absent fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config = serde_json::from_str::<Self>(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        if self.grid.total_cells() < 2 {
            return Err(ConfigError::TooFewCells);
        }
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }
        let cell_size = i32::from(self.cell_size);
        let fits = |cells: u16| i32::from(cells).checked_mul(cell_size).is_some();
        if !fits(self.grid.width) || !fits(self.grid.height) {
            return Err(ConfigError::WorldTooLarge {
                width: self.grid.width,
                height: self.grid.height,
                cell_size: self.cell_size,
            });
        }
        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::TickIntervalTooShort {
                got: self.tick_interval_ms,
                min: MIN_TICK_INTERVAL_MS,
            });
        }
        if !self.spawn.is_within_bounds(self.grid) {
            return Err(ConfigError::SpawnOutOfBounds {
                x: self.spawn.x,
                y: self.spawn.y,
                width: self.grid.width,
                height: self.grid.height,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
