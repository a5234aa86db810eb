//! Shape generation for 2D primitives
//!
//! Every mesh goes through [`Mesh::new`], which takes a [`ShapeDesc`]: the
//! primitive, its points, the fill mode and either one color for all vertices
//! or one per vertex. The helpers below only build descriptions.

use std::f32::consts::PI;

use glam::Vec2;
use thiserror::Error;

use super::vertex::Vertex;

/// How the vertex list is assembled into triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Independent triangles, three vertices each
    Triangles,
    /// First vertex is the hub, each following pair forms a triangle
    TriangleFan,
}

/// Polygon fill mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    Fill,
    /// Edges only
    Outline,
}

/// Vertex coloring
#[derive(Debug, Clone, PartialEq)]
pub enum Coloring {
    Uniform([f32; 4]),
    PerVertex(Vec<[f32; 4]>),
}

/// Everything needed to build a mesh
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDesc {
    pub primitive: Primitive,
    pub points: Vec<Vec2>,
    pub fill: FillMode,
    pub coloring: Coloring,
}

/// Rejected shape descriptions
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("{primitive:?} needs at least 3 vertices, got {count}")]
    TooFewVertices { primitive: Primitive, count: usize },
    #[error("triangle list length {0} is not a multiple of 3")]
    IncompleteTriangle(usize),
    #[error("{colors} colors for {vertices} vertices")]
    ColorCountMismatch { vertices: usize, colors: usize },
}

/// Vertex data ready for upload
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub primitive: Primitive,
    pub fill: FillMode,
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(desc: ShapeDesc) -> Result<Self, ShapeError> {
        let count = desc.points.len();
        if count < 3 {
            return Err(ShapeError::TooFewVertices {
                primitive: desc.primitive,
                count,
            });
        }
        if desc.primitive == Primitive::Triangles && count % 3 != 0 {
            return Err(ShapeError::IncompleteTriangle(count));
        }

        let vertices = match desc.coloring {
            Coloring::Uniform(color) => desc
                .points
                .iter()
                .map(|p| Vertex::new(p.x, p.y, color))
                .collect(),
            Coloring::PerVertex(colors) => {
                if colors.len() != count {
                    return Err(ShapeError::ColorCountMismatch {
                        vertices: count,
                        colors: colors.len(),
                    });
                }
                desc.points
                    .iter()
                    .zip(colors)
                    .map(|(p, c)| Vertex::new(p.x, p.y, c))
                    .collect()
            }
        };

        Ok(Self {
            primitive: desc.primitive,
            fill: desc.fill,
            vertices,
        })
    }

    /// Number of triangles the primitive expands to
    pub fn triangle_count(&self) -> usize {
        match self.primitive {
            Primitive::Triangles => self.vertices.len() / 3,
            Primitive::TriangleFan => self.vertices.len().saturating_sub(2),
        }
    }

    /// Expand to an independent triangle list
    pub fn to_triangle_list(&self) -> Vec<Vertex> {
        match self.primitive {
            Primitive::Triangles => self.vertices.clone(),
            Primitive::TriangleFan => {
                let hub = self.vertices[0];
                self.vertices[1..]
                    .windows(2)
                    .flat_map(|w| [hub, w[0], w[1]])
                    .collect()
            }
        }
    }
}

/// Filled circle as a fan: centre, then `sides + 1` rim points closing the loop
pub fn circle(center: Vec2, radius: f32, sides: u32, color: [f32; 4]) -> ShapeDesc {
    let mut points = Vec::with_capacity(sides as usize + 2);
    points.push(center);
    for i in 0..=sides {
        let theta = i as f32 * 2.0 * PI / sides as f32;
        points.push(center + Vec2::new(radius * theta.cos(), radius * theta.sin()));
    }
    ShapeDesc {
        primitive: Primitive::TriangleFan,
        points,
        fill: FillMode::Fill,
        coloring: Coloring::Uniform(color),
    }
}

/// Axis-aligned rectangle as two triangles
pub fn rectangle(center: Vec2, half_width: f32, half_height: f32, color: [f32; 4], fill: FillMode) -> ShapeDesc {
    let (x, y) = (center.x, center.y);
    let top_left = Vec2::new(x - half_width, y + half_height);
    let bottom_left = Vec2::new(x - half_width, y - half_height);
    let bottom_right = Vec2::new(x + half_width, y - half_height);
    let top_right = Vec2::new(x + half_width, y + half_height);
    ShapeDesc {
        primitive: Primitive::Triangles,
        points: vec![
            top_left,
            bottom_left,
            bottom_right,
            bottom_right,
            top_right,
            top_left,
        ],
        fill,
        coloring: Coloring::Uniform(color),
    }
}

/// Rectangle spanning `min`..`max`
pub fn rectangle_between(min: Vec2, max: Vec2, color: [f32; 4], fill: FillMode) -> ShapeDesc {
    let half = (max - min) / 2.0;
    rectangle(min + half, half.x, half.y, color, fill)
}

/// Single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> ShapeDesc {
    ShapeDesc {
        primitive: Primitive::Triangles,
        points: vec![a, b, c],
        fill: FillMode::Fill,
        coloring: Coloring::Uniform(color),
    }
}
