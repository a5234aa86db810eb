//! Cannon Toss - a cannon-and-obstacles physics toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectiles, collisions, obstacle settling)
//! - `renderer`: Render lists and mesh data for an external graphics backend
//! - `input`: Key/mouse events folded into per-tick input
//! - `config`: Data-driven level layout and tuning

pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;

pub use config::{ConfigError, LevelConfig, SimConfig, Tuning};
pub use input::{InputEvent, InputState};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (flight time advanced per frame)
    pub const SIM_DT: f32 = 0.1;
    /// Downward acceleration applied to projectiles and settling obstacles
    pub const GRAVITY: f32 = 9.8;

    /// World dimensions (orthographic, origin bottom-left)
    pub const WORLD_WIDTH: f32 = 1200.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    pub const GROUND_HEIGHT: f32 = 50.0;

    /// Cannon geometry
    pub const CANNON_WHEEL_CENTER_X: f32 = 100.0;
    pub const CANNON_WHEEL_CENTER_Y: f32 = 80.0;
    pub const CANNON_TUNNEL_LENGTH: f32 = 60.0;
    /// Muzzle offset from a projectile's resting anchor (ground + radius)
    pub const MUZZLE_OFFSET_X: f32 = 60.0;
    pub const MUZZLE_OFFSET_Y: f32 = 20.0;

    /// Launch momentum range (initial speed)
    pub const MOMENTUM_MIN: f32 = 50.0;
    pub const MOMENTUM_MAX: f32 = 150.0;
    pub const MOMENTUM_START: f32 = 100.0;
    /// Momentum change per power key press
    pub const POWER_STEP: f32 = 5.0;

    /// Aim rotation speed while held (radians per simulated second)
    pub const AIM_SPEED: f32 = 0.1;
    /// Maximum tunnel elevation (60 degrees)
    pub const AIM_MAX: f32 = std::f32::consts::FRAC_PI_3;

    /// Obstacle grid
    pub const OBSTACLE_CELL_SIZE: f32 = 40.0;
    pub const OBSTACLE_START_X: f32 = 800.0;
    pub const ICE_PADDING: f32 = 2.0;
    pub const PIGGY_PADDING: f32 = 5.0;

    /// Power gauge geometry
    pub const POWER_PANEL_HALF_LENGTH: f32 = 50.0;
    pub const POWER_PANEL_HALF_WIDTH: f32 = 8.0;

    /// Default entity capacities
    pub const MAX_PROJECTILES: usize = 10;
    pub const MAX_OBSTACLES: usize = 100;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
