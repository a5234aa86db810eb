//! Closed-form projectile motion
//!
//! Positions are evaluated analytically from elapsed flight time rather than
//! integrated step by step, so a shot's arc depends only on (θ, v, t, g).

use glam::Vec2;

use crate::consts::{CANNON_TUNNEL_LENGTH, MUZZLE_OFFSET_X, MUZZLE_OFFSET_Y};
use crate::polar_to_cartesian;

/// Initial velocity for a launch angle (radians) and speed
#[inline]
pub fn launch_velocity(angle: f32, speed: f32) -> Vec2 {
    polar_to_cartesian(speed, angle)
}

/// Displacement from the launch point after `t` seconds of flight
///
/// horizontal = vx·t, vertical = vy·t − ½·g·t²
#[inline]
pub fn displacement(velocity: Vec2, t: f32, gravity: f32) -> Vec2 {
    Vec2::new(
        velocity.x * t,
        velocity.y * t - 0.5 * gravity * t * t,
    )
}

/// Where a projectile of `radius` sits before it is loaded
#[inline]
pub fn rest_position(radius: f32, ground_height: f32) -> Vec2 {
    Vec2::splat(ground_height + radius)
}

/// Centre of a projectile sitting at the mouth of the tunnel
pub fn muzzle_position(aim: f32, radius: f32, ground_height: f32) -> Vec2 {
    rest_position(radius, ground_height)
        + Vec2::new(MUZZLE_OFFSET_X, MUZZLE_OFFSET_Y)
        + polar_to_cartesian(CANNON_TUNNEL_LENGTH, aim)
}

/// Lowest centre height before a projectile of `radius` touches the ground
#[inline]
pub fn ground_level(radius: f32, ground_height: f32) -> f32 {
    ground_height + radius
}

/// Time at which a shot from `origin` returns to `floor`, if it ever does
pub fn time_to_floor(origin: Vec2, velocity: Vec2, gravity: f32, floor: f32) -> Option<f32> {
    // origin.y + vy·t − ½g·t² = floor
    let drop = origin.y - floor;
    let disc = velocity.y * velocity.y + 2.0 * gravity * drop;
    if disc < 0.0 || gravity <= 0.0 {
        return None;
    }
    let t = (velocity.y + disc.sqrt()) / gravity;
    (t >= 0.0).then_some(t)
}
