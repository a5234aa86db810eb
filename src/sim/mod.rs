//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (projectiles by slot, obstacles column-major)
//! - No rendering or platform dependencies

pub mod cannon;
pub mod collision;
pub mod kinematics;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use cannon::Cannon;
pub use collision::{Hit, HitTest, find_hits};
pub use obstacles::{Obstacle, ObstacleGrid, ObstacleKind};
pub use state::{BirdKind, GameState, Projectile, ProjectileStatus, SimError, SimEvent};
pub use tick::{AimDirection, PowerPress, TickInput, tick};
