//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.0, 0.4, 0.8, 1.0];
    pub const GROUND: [f32; 4] = [0.5, 0.12, 0.18, 1.0];
    pub const CANNON_WHEEL: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
    pub const CANNON_TUNNEL: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const GAUGE_FRAME: [f32; 4] = [0.5, 0.3, 0.3, 1.0];
    pub const GAUGE_LOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const GAUGE_MID: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const GAUGE_HIGH: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
    pub const GAUGE_MAX: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BIRD_RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BIRD_BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BEAK: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
    pub const EYE_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const EYE_BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const ICE: [f32; 4] = [0.65, 0.95, 0.94, 1.0];
    pub const PIGGY: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const PIGGY_NOSE: [f32; 4] = [0.0, 0.7, 0.0, 1.0];
}
