use anyhow::{Result, ensure};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Lives at the start of every session
pub const STARTING_LIVES: u32 = 3;
/// Hard cap on the number of stones on the board
pub const MAX_OBSTACLES: usize = 30;
/// Points needed to advance one level
pub const POINTS_PER_LEVEL: u32 = 100;
/// Slowest the level curve can make the tick interval
pub const SPEED_FLOOR_MS: u64 = 60;
/// Tick interval reduction per level gained
pub const LEVEL_SPEED_STEP_MS: u64 = 12;
/// Chance of a power-up each time fruit is eaten
pub const POWER_UP_PROBABILITY: f64 = 0.1;
/// Ticks a power-up stays active
pub const POWER_UP_TICKS: u32 = 60;
/// Tick interval reduction while a power-up is active
pub const POWER_UP_BOOST_MS: u64 = 30;
/// Floor applied to the boosted tick interval
pub const POWER_UP_FLOOR_MS: u64 = 40;

/// Difficulty picked once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tick interval at level 1
    pub fn base_speed_ms(&self) -> u64 {
        match self {
            Difficulty::Easy => 160,
            Difficulty::Medium => 140,
            Difficulty::Hard => 120,
        }
    }

    /// Extra interval reduction applied on top of the level curve
    pub fn speed_bonus_ms(&self) -> u64 {
        match self {
            Difficulty::Hard => 10,
            _ => 0,
        }
    }

    /// Stones present regardless of level
    pub fn obstacle_base(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Stones added per level
    pub fn obstacle_density(&self) -> f64 {
        match self {
            Difficulty::Hard => 2.0,
            _ => 1.5,
        }
    }

    /// Number of stones the board should hold at `level`
    pub fn obstacle_target(&self, level: u32) -> usize {
        let scaled = (level as f64 * self.obstacle_density()).floor() as usize;
        (self.obstacle_base() + scaled).min(MAX_OBSTACLES)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Difficulty for the whole session
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 30,
            grid_height: 20,
            difficulty: Difficulty::Easy,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width >= 2 && self.grid_height >= 2,
            "grid must be at least 2x2, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= i32::MAX as usize && self.grid_height <= i32::MAX as usize,
            "grid dimensions are too large"
        );
        Ok(())
    }
}
