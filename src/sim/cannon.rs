//! Launch power and tunnel aim

use serde::{Deserialize, Serialize};

use crate::config::Tuning;

/// Player-adjustable launch parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    /// Launch speed
    pub momentum: f32,
    /// Tunnel elevation (radians above horizontal)
    pub aim: f32,
    momentum_min: f32,
    momentum_max: f32,
    aim_max: f32,
}

impl Cannon {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            momentum: tuning.momentum_start,
            aim: 0.0,
            momentum_min: tuning.momentum_min,
            momentum_max: tuning.momentum_max,
            aim_max: tuning.aim_max,
        }
    }

    /// Change momentum by `delta`, pinned to the allowed range
    pub fn adjust_power(&mut self, delta: f32) -> f32 {
        self.momentum = (self.momentum + delta).clamp(self.momentum_min, self.momentum_max);
        self.momentum
    }

    /// Rotate the tunnel by `delta`, pinned to `[0, aim_max]`
    pub fn adjust_aim(&mut self, delta: f32) -> f32 {
        self.aim = (self.aim + delta).clamp(0.0, self.aim_max);
        self.aim
    }

    /// Momentum as a 0-1 fraction of its range (power gauge fill)
    pub fn power_fraction(&self) -> f32 {
        (self.momentum - self.momentum_min) / (self.momentum_max - self.momentum_min)
    }

    pub fn momentum_range(&self) -> (f32, f32) {
        (self.momentum_min, self.momentum_max)
    }
}
