//! Render data for an external graphics backend
//!
//! Nothing here touches a GPU: the crate hands out meshes (built once) and a
//! per-frame list of sprite placements. Uploading and drawing them is the
//! backend's job.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{Entity, PowerGauge, RenderFrame, RenderItem, Sprite, SpriteId, SpriteSheet, build_frame};
pub use shapes::{Coloring, FillMode, Mesh, Primitive, ShapeDesc, ShapeError};
pub use vertex::Vertex;
