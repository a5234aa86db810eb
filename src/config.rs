//! Level layout and tuning
//!
//! Loaded once at startup from JSON; every field falls back to the defaults in
//! [`crate::consts`], so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{BirdKind, HitTest, ObstacleKind};

/// Configuration loading/validation failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// One projectile slot in the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirdConfig {
    /// Radius, used both for drawing and collision
    pub size: f32,
    pub kind: BirdKind,
}

/// Which cells of the grid are ice and which are piggies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Outer `depth` rings are ice, the core is piggies
    Ring { depth: u32 },
    /// Explicit rows, top row first; `I` = ice, `P` = piggy
    Rows(Vec<String>),
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Ring { depth: 1 }
    }
}

/// Obstacle grid and projectile roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub columns: u32,
    pub rows: u32,
    pub layout: Layout,
    /// Left edge of the obstacle grid
    pub start_x: f32,
    pub birds: Vec<BirdConfig>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            rows: 3,
            layout: Layout::default(),
            start_x: OBSTACLE_START_X,
            birds: vec![
                BirdConfig {
                    size: 10.0,
                    kind: BirdKind::Red,
                },
                BirdConfig {
                    size: 15.0,
                    kind: BirdKind::Black,
                },
            ],
        }
    }
}

impl LevelConfig {
    /// Obstacle kind at a grid cell (row 0 is the bottom row)
    pub fn kind_at(&self, col: u32, row: u32) -> Result<ObstacleKind, ConfigError> {
        match &self.layout {
            Layout::Ring { depth } => {
                let on_ring = col < *depth
                    || col + depth >= self.columns
                    || row < *depth
                    || row + depth >= self.rows;
                Ok(if on_ring {
                    ObstacleKind::Ice
                } else {
                    ObstacleKind::Piggy
                })
            }
            Layout::Rows(lines) => {
                // Rows are written top-first, the grid counts bottom-up
                let ch = self
                    .rows
                    .checked_sub(row + 1)
                    .and_then(|line_idx| lines.get(line_idx as usize))
                    .and_then(|line| line.chars().nth(col as usize))
                    .ok_or_else(|| {
                        ConfigError::Invalid(format!("layout has no cell at ({col}, {row})"))
                    })?;
                match ch.to_ascii_uppercase() {
                    'I' => Ok(ObstacleKind::Ice),
                    'P' => Ok(ObstacleKind::Piggy),
                    other => Err(ConfigError::Invalid(format!(
                        "unknown layout cell '{other}' at ({col}, {row})"
                    ))),
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.columns, self.rows
            )));
        }
        if let Layout::Rows(lines) = &self.layout {
            if lines.len() != self.rows as usize {
                return Err(ConfigError::Invalid(format!(
                    "layout has {} rows, grid has {}",
                    lines.len(),
                    self.rows
                )));
            }
            if let Some(bad) = lines.iter().find(|l| l.chars().count() != self.columns as usize) {
                return Err(ConfigError::Invalid(format!(
                    "layout row '{bad}' does not have {} columns",
                    self.columns
                )));
            }
        }
        if self.birds.iter().any(|b| !(b.size > 0.0)) {
            return Err(ConfigError::Invalid("bird sizes must be positive".into()));
        }
        Ok(())
    }
}

/// Physics and controller tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub ground_height: f32,
    pub cell_size: f32,
    pub momentum_min: f32,
    pub momentum_max: f32,
    pub momentum_start: f32,
    pub power_step: f32,
    /// Radians per simulated second while an aim input is held
    pub aim_speed: f32,
    pub aim_max: f32,
    pub hit_test: HitTest,
    pub max_projectiles: usize,
    pub max_obstacles: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            ground_height: GROUND_HEIGHT,
            cell_size: OBSTACLE_CELL_SIZE,
            momentum_min: MOMENTUM_MIN,
            momentum_max: MOMENTUM_MAX,
            momentum_start: MOMENTUM_START,
            power_step: POWER_STEP,
            aim_speed: AIM_SPEED,
            aim_max: AIM_MAX,
            hit_test: HitTest::default(),
            max_projectiles: MAX_PROJECTILES,
            max_obstacles: MAX_OBSTACLES,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravity > 0.0) {
            return Err(ConfigError::Invalid("gravity must be positive".into()));
        }
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::Invalid("cell_size must be positive".into()));
        }
        if !(self.momentum_min < self.momentum_max) {
            return Err(ConfigError::Invalid(format!(
                "momentum range [{}, {}] is empty",
                self.momentum_min, self.momentum_max
            )));
        }
        if !(self.momentum_min..=self.momentum_max).contains(&self.momentum_start) {
            return Err(ConfigError::Invalid(format!(
                "momentum_start {} outside [{}, {}]",
                self.momentum_start, self.momentum_min, self.momentum_max
            )));
        }
        if !(self.power_step > 0.0) {
            return Err(ConfigError::Invalid("power_step must be positive".into()));
        }
        if !(self.aim_speed >= 0.0) {
            return Err(ConfigError::Invalid("aim_speed must not be negative".into()));
        }
        if !(self.aim_max > 0.0 && self.aim_max <= AIM_MAX) {
            return Err(ConfigError::Invalid(format!(
                "aim_max {} outside (0, {}]",
                self.aim_max, AIM_MAX
            )));
        }
        Ok(())
    }
}

/// Everything needed to build a [`crate::sim::GameState`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub level: LevelConfig,
    pub tuning: Tuning,
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level.validate()?;
        self.tuning.validate()
    }
}
