//! Projectile vs. obstacle hit testing
//!
//! Every obstacle is bounded by a circle, including ice blocks that are drawn
//! as squares. An axis-aligned box test also exists as an alternative; it
//! accepts hits in the corners the circle test rejects, so the two are not
//! interchangeable. The circle test is the default.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacles::{ObstacleGrid, ObstacleKind};

/// Which overlap test the collision pass uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTest {
    /// Euclidean distance between centres ≤ sum of radii
    #[default]
    Circle,
    /// Centre offset within ± the summed radii on both axes
    Box,
}

impl HitTest {
    #[inline]
    pub fn overlaps(self, a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
        match self {
            HitTest::Circle => circles_overlap(a, a_radius, b, b_radius),
            HitTest::Box => boxes_overlap(a, a_radius, b, b_radius),
        }
    }
}

/// Circle/circle overlap, touching counts as a hit
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) <= a_radius + b_radius
}

/// Square/square overlap with half-extents equal to the radii
#[inline]
pub fn boxes_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    let d = (a - b).abs();
    d.x <= reach && d.y <= reach
}

/// An obstacle touched by a projectile this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub kind: ObstacleKind,
    pub id: u32,
}

/// Live obstacles overlapping a projectile at `pos`
///
/// Dead obstacles are skipped, so a second pass over the same spot after
/// removal reports nothing.
pub fn find_hits(pos: Vec2, radius: f32, grid: &ObstacleGrid, test: HitTest) -> Vec<Hit> {
    grid.iter()
        .filter(|o| !o.dead)
        .filter(|o| test.overlaps(pos, radius, o.pos(), o.radius))
        .map(|o| Hit {
            kind: o.kind,
            id: o.id,
        })
        .collect()
}
