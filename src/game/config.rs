use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::error::ConfigError;
use super::state::{Cell, SerpentId};

/// Smallest grid on which both spawn cells and the centre food are distinct
pub const MIN_GRID_SIZE: usize = 5;

/// Largest grid a terminal can still lay out
pub const MAX_GRID_SIZE: usize = 1024;

/// Configuration for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cells per side of the square arena
    pub grid_size: usize,
    /// Pixel size of one cell for pixel front-ends
    pub cell_size: u32,
    /// Border around the board in pixels
    pub board_margin: u32,
    /// Lives each serpent starts the match with
    pub starting_lives: u32,

    // Timing
    /// Time between two moves
    pub tick_period_ms: u64,
    /// Time between two food spawn requests
    pub food_spawn_period_ms: u64,
    /// How long a finished round stays frozen on screen before the reset
    pub round_hold_ms: u64,
    /// How long the final result stays on screen
    pub final_hold_ms: u64,
    /// How often input watchers sample their source
    pub input_poll_ms: u64,

    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 25,
            cell_size: 25,
            board_margin: 75,
            starting_lives: 5,
            tick_period_ms: 200,
            food_spawn_period_ms: 3000,
            round_hold_ms: 3000,
            final_hold_ms: 5000,
            input_poll_ms: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
            });
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }
        self.board_extent_px()?;
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        for (name, value) in [
            ("tick period", self.tick_period_ms),
            ("food spawn period", self.food_spawn_period_ms),
            ("input poll interval", self.input_poll_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroPeriod { name });
            }
        }
        Ok(())
    }

    /// Spawn cell and starting direction of each serpent: opposite corners, facing each other
    pub fn spawn(&self, id: SerpentId) -> (Cell, Direction) {
        let far = self.grid_size as i32 - 2;
        match id {
            SerpentId::One => (Cell::new(1, 1), Direction::Right),
            SerpentId::Two => (Cell::new(far, far), Direction::Left),
        }
    }

    /// Width and height of the board including its margin, in pixels
    pub fn board_extent_px(&self) -> Result<u32, ConfigError> {
        u32::try_from(self.grid_size)
            .ok()
            .and_then(|cells| self.cell_size.checked_mul(cells))
            .and_then(|board| self.board_margin.checked_mul(2)?.checked_add(board))
            .ok_or(ConfigError::BoardTooLarge {
                cell_size: self.cell_size,
                margin: self.board_margin,
            })
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn food_spawn_period(&self) -> Duration {
        Duration::from_millis(self.food_spawn_period_ms)
    }

    pub fn round_hold(&self) -> Duration {
        Duration::from_millis(self.round_hold_ms)
    }

    pub fn final_hold(&self) -> Duration {
        Duration::from_millis(self.final_hold_ms)
    }

    pub fn input_poll(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }
}
