//! Per-frame render list
//!
//! Sprites are built once in local coordinates (centred on the entity's
//! position, or on the wheel hub for the cannon). Each frame the renderer
//! receives one [`RenderItem`] per visible entity: which sprite, where, and at
//! what rotation. Dead obstacles are left out.

use std::f32::consts::PI;

use glam::Vec2;

use super::shapes::{self, Coloring, FillMode, Mesh, ShapeError};
use super::vertex::colors;
use crate::consts::*;
use crate::sim::{BirdKind, GameState, ObstacleKind};

/// Rim resolution for circles
const CIRCLE_SIDES: u32 = 360;
/// Gap between the tunnel and the wheel rim, and between gauge and ground
const PADDING: f32 = 5.0;

/// A group of meshes drawn with one transform, in draw order
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub meshes: Vec<Mesh>,
}

impl Sprite {
    fn new(meshes: Vec<Mesh>) -> Self {
        Self { meshes }
    }
}

/// Which sprite to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Ground,
    CannonWheel,
    CannonTunnel,
    GaugeFrame,
    /// Indexed by projectile slot
    Bird(usize),
    Ice,
    Piggy,
}

/// What a render item stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Ground,
    Cannon,
    PowerGauge,
    Projectile { slot: usize },
    Obstacle { kind: ObstacleKind, id: u32 },
}

/// One sprite placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub entity: Entity,
    pub sprite: SpriteId,
    pub translation: Vec2,
    /// Radians, counter-clockwise
    pub rotation: f32,
}

/// Power gauge fill state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerGauge {
    /// 0-1 along the gauge
    pub fraction: f32,
    pub color: [f32; 4],
    /// The gauge hangs just below this line
    pub ground_height: f32,
}

impl PowerGauge {
    pub fn from_fraction(fraction: f32, ground_height: f32) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        let color = if fraction >= 0.75 {
            colors::GAUGE_MAX
        } else if fraction >= 0.5 {
            colors::GAUGE_HIGH
        } else if fraction >= 0.25 {
            colors::GAUGE_MID
        } else {
            colors::GAUGE_LOW
        };
        Self {
            fraction,
            color,
            ground_height,
        }
    }

    /// Fill mesh in world coordinates (left edge fades from the low color)
    pub fn mesh(&self) -> Result<Mesh, ShapeError> {
        let left = CANNON_WHEEL_CENTER_X - POWER_PANEL_HALF_LENGTH;
        let top = self.ground_height - PADDING;
        let bottom = top - POWER_PANEL_HALF_WIDTH * 2.0;
        let right = left + self.fraction * POWER_PANEL_HALF_LENGTH * 2.0;
        let mut desc = shapes::rectangle_between(
            Vec2::new(left, bottom),
            Vec2::new(right, top),
            self.color,
            FillMode::Fill,
        );
        let c = self.color;
        desc.coloring = Coloring::PerVertex(vec![c, colors::GAUGE_LOW, c, c, c, c]);
        Mesh::new(desc)
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub items: Vec<RenderItem>,
    pub gauge: PowerGauge,
}

/// Build the render list for the current state
pub fn build_frame(state: &GameState) -> RenderFrame {
    let mut items = Vec::with_capacity(state.projectiles.len() + state.obstacles.live_count() + 4);

    items.push(RenderItem {
        entity: Entity::Ground,
        sprite: SpriteId::Ground,
        translation: Vec2::ZERO,
        rotation: 0.0,
    });
    items.push(RenderItem {
        entity: Entity::PowerGauge,
        sprite: SpriteId::GaugeFrame,
        translation: Vec2::ZERO,
        rotation: 0.0,
    });

    let hub = Vec2::new(CANNON_WHEEL_CENTER_X, CANNON_WHEEL_CENTER_Y);
    items.push(RenderItem {
        entity: Entity::Cannon,
        sprite: SpriteId::CannonTunnel,
        translation: hub,
        rotation: state.cannon.aim,
    });
    items.push(RenderItem {
        entity: Entity::Cannon,
        sprite: SpriteId::CannonWheel,
        translation: hub,
        rotation: 0.0,
    });

    for p in &state.projectiles {
        items.push(RenderItem {
            entity: Entity::Projectile { slot: p.slot },
            sprite: SpriteId::Bird(p.slot),
            translation: p.pos,
            rotation: 0.0,
        });
    }

    for o in state.obstacles.iter().filter(|o| !o.dead) {
        items.push(RenderItem {
            entity: Entity::Obstacle { kind: o.kind, id: o.id },
            sprite: match o.kind {
                ObstacleKind::Ice => SpriteId::Ice,
                ObstacleKind::Piggy => SpriteId::Piggy,
            },
            translation: o.pos(),
            rotation: 0.0,
        });
    }

    RenderFrame {
        items,
        gauge: PowerGauge::from_fraction(state.cannon.power_fraction(), state.tuning.ground_height),
    }
}

/// All sprites for a level, built once at startup
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    ground: Sprite,
    cannon_wheel: Sprite,
    cannon_tunnel: Sprite,
    gauge_frame: Sprite,
    ice: Sprite,
    piggy: Sprite,
    birds: Vec<Sprite>,
}

impl SpriteSheet {
    pub fn new(state: &GameState) -> Result<Self, ShapeError> {
        let cell = state.obstacles.cell_size;
        let birds = state
            .projectiles
            .iter()
            .map(|p| bird_sprite(p.radius, p.kind))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            ground: ground_sprite(state.tuning.ground_height)?,
            cannon_wheel: cannon_wheel_sprite(state.tuning.ground_height)?,
            cannon_tunnel: cannon_tunnel_sprite(state.tuning.ground_height)?,
            gauge_frame: gauge_frame_sprite(state.tuning.ground_height)?,
            ice: ice_sprite(cell)?,
            piggy: piggy_sprite(cell)?,
            birds,
        })
    }

    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        match id {
            SpriteId::Ground => Some(&self.ground),
            SpriteId::CannonWheel => Some(&self.cannon_wheel),
            SpriteId::CannonTunnel => Some(&self.cannon_tunnel),
            SpriteId::GaugeFrame => Some(&self.gauge_frame),
            SpriteId::Bird(slot) => self.birds.get(slot),
            SpriteId::Ice => Some(&self.ice),
            SpriteId::Piggy => Some(&self.piggy),
        }
    }
}

fn ground_sprite(ground_height: f32) -> Result<Sprite, ShapeError> {
    let desc = shapes::rectangle_between(
        Vec2::ZERO,
        Vec2::new(WORLD_WIDTH, ground_height),
        colors::GROUND,
        FillMode::Fill,
    );
    Ok(Sprite::new(vec![Mesh::new(desc)?]))
}

fn wheel_radius(ground_height: f32) -> f32 {
    CANNON_WHEEL_CENTER_Y - ground_height
}

fn cannon_wheel_sprite(ground_height: f32) -> Result<Sprite, ShapeError> {
    let desc = shapes::circle(Vec2::ZERO, wheel_radius(ground_height), CIRCLE_SIDES, colors::CANNON_WHEEL);
    Ok(Sprite::new(vec![Mesh::new(desc)?]))
}

/// Tunnel pointing along +x from the hub; the item rotation aims it
fn cannon_tunnel_sprite(ground_height: f32) -> Result<Sprite, ShapeError> {
    let bore = wheel_radius(ground_height) - PADDING;
    let desc = shapes::rectangle_between(
        Vec2::ZERO,
        Vec2::new(CANNON_TUNNEL_LENGTH, bore),
        colors::CANNON_TUNNEL,
        FillMode::Fill,
    );
    Ok(Sprite::new(vec![Mesh::new(desc)?]))
}

fn gauge_frame_sprite(ground_height: f32) -> Result<Sprite, ShapeError> {
    let desc = shapes::rectangle(
        Vec2::new(
            CANNON_WHEEL_CENTER_X,
            ground_height - POWER_PANEL_HALF_WIDTH - PADDING,
        ),
        POWER_PANEL_HALF_LENGTH,
        POWER_PANEL_HALF_WIDTH,
        colors::GAUGE_FRAME,
        FillMode::Outline,
    );
    Ok(Sprite::new(vec![Mesh::new(desc)?]))
}

/// Round body, beak pointing forward, one eye up and to the right
fn bird_sprite(radius: f32, kind: BirdKind) -> Result<Sprite, ShapeError> {
    let body = match kind {
        BirdKind::Red => colors::BIRD_RED,
        BirdKind::Black => colors::BIRD_BLACK,
    };
    let half_beak = radius / 2.0;
    let beak = shapes::triangle(
        Vec2::new(0.0, half_beak),
        Vec2::new(radius + half_beak * 2.0, 0.0),
        Vec2::new(0.0, -half_beak),
        colors::BEAK,
    );

    let eye_angle = PI / 6.0;
    let eye_dir = Vec2::new(eye_angle.cos(), eye_angle.sin());
    let iris_radius = radius / 3.0;
    let pupil_radius = iris_radius / 2.0;
    let iris_center = eye_dir * (radius - iris_radius);
    let pupil_center = iris_center + eye_dir * (iris_radius - pupil_radius);

    Ok(Sprite::new(vec![
        Mesh::new(beak)?,
        Mesh::new(shapes::circle(Vec2::ZERO, radius, CIRCLE_SIDES, body))?,
        Mesh::new(shapes::circle(iris_center, iris_radius, CIRCLE_SIDES, colors::EYE_BLACK))?,
        Mesh::new(shapes::circle(pupil_center, pupil_radius, CIRCLE_SIDES, colors::EYE_WHITE))?,
    ]))
}

/// Square block with an outline one padding wider than the fill
fn ice_sprite(cell: f32) -> Result<Sprite, ShapeError> {
    let outline = cell / 2.0;
    let fill = outline - ICE_PADDING;
    Ok(Sprite::new(vec![
        Mesh::new(shapes::rectangle(Vec2::ZERO, outline, outline, colors::ICE, FillMode::Outline))?,
        Mesh::new(shapes::rectangle(Vec2::ZERO, fill, fill, colors::ICE, FillMode::Fill))?,
    ]))
}

/// Pig face centred on its bounding circle
fn piggy_sprite(cell: f32) -> Result<Sprite, ShapeError> {
    let p = PIGGY_PADDING;
    let face_radius = cell / 2.0 - p;
    let eye_angle = PI / 6.0;
    let eye_reach = 3.0 * cell / 8.0 - p;
    let iris_dx = eye_reach * eye_angle.cos() - p / 4.0;
    let iris_dy = eye_reach * eye_angle.sin();

    let iris_y = iris_dy - 0.5 * p;
    let pupil_y = iris_dy - 0.4 * p;
    let pupil_dx = iris_dx + p / 4.0;

    let mut meshes = vec![
        Mesh::new(shapes::circle(Vec2::ZERO, face_radius, CIRCLE_SIDES, colors::PIGGY))?,
        Mesh::new(shapes::circle(
            Vec2::new(0.0, -0.8 * p),
            cell / 9.0,
            CIRCLE_SIDES,
            colors::PIGGY_NOSE,
        ))?,
    ];
    for side in [-1.0, 1.0] {
        meshes.push(Mesh::new(shapes::circle(
            Vec2::new(side * iris_dx, iris_y),
            cell / 10.0,
            CIRCLE_SIDES,
            colors::EYE_WHITE,
        ))?);
    }
    for side in [-1.0, 1.0] {
        meshes.push(Mesh::new(shapes::circle(
            Vec2::new(side * pupil_dx, pupil_y),
            cell / 20.0,
            CIRCLE_SIDES,
            colors::EYE_BLACK,
        ))?);
    }
    Ok(Sprite::new(meshes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::{TickInput, tick};

    fn new_state() -> GameState {
        GameState::new(&SimConfig::default()).unwrap()
    }

    #[test]
    fn test_frame_lists_every_live_entity() {
        let state = new_state();
        let frame = build_frame(&state);
        // ground, gauge, tunnel, wheel + 2 birds + 9 obstacles
        assert_eq!(frame.items.len(), 4 + 2 + 9);
        assert!(frame.items.iter().any(|i| i.sprite == SpriteId::Piggy));
    }

    #[test]
    fn test_frame_skips_dead_obstacles() {
        let mut state = new_state();
        state.obstacles.remove_obstacle(0, ObstacleKind::Piggy);
        let frame = build_frame(&state);
        assert_eq!(frame.items.len(), 4 + 2 + 8);
        assert!(!frame.items.iter().any(|i| i.sprite == SpriteId::Piggy));
    }

    #[test]
    fn test_frame_tunnel_follows_aim() {
        let mut state = new_state();
        state.cannon.adjust_aim(0.4);
        let frame = build_frame(&state);
        let tunnel = frame
            .items
            .iter()
            .find(|i| i.sprite == SpriteId::CannonTunnel)
            .unwrap();
        assert_eq!(tunnel.rotation, 0.4);
    }

    #[test]
    fn test_frame_projectile_translation_tracks_flight() {
        let mut state = new_state();
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);
        let frame = build_frame(&state);
        let bird = frame
            .items
            .iter()
            .find(|i| i.entity == Entity::Projectile { slot: 0 })
            .unwrap();
        assert_eq!(bird.translation, state.projectiles[0].pos);
    }

    #[test]
    fn test_gauge_color_bands() {
        assert_eq!(PowerGauge::from_fraction(0.1, GROUND_HEIGHT).color, colors::GAUGE_LOW);
        assert_eq!(PowerGauge::from_fraction(0.3, GROUND_HEIGHT).color, colors::GAUGE_MID);
        assert_eq!(PowerGauge::from_fraction(0.6, GROUND_HEIGHT).color, colors::GAUGE_HIGH);
        assert_eq!(PowerGauge::from_fraction(0.75, GROUND_HEIGHT).color, colors::GAUGE_MAX);
        assert_eq!(PowerGauge::from_fraction(2.0, GROUND_HEIGHT).fraction, 1.0);
    }

    #[test]
    fn test_gauge_mesh_width() {
        let mesh = PowerGauge::from_fraction(0.5, GROUND_HEIGHT).mesh().unwrap();
        let xs: Vec<f32> = mesh.vertices.iter().map(|v| v.position[0]).collect();
        let width = xs.iter().cloned().fold(f32::MIN, f32::max) - xs.iter().cloned().fold(f32::MAX, f32::min);
        assert!((width - POWER_PANEL_HALF_LENGTH).abs() < 1e-4);
    }

    #[test]
    fn test_gauge_follows_tuned_ground() {
        let mut config = SimConfig::default();
        config.tuning.ground_height = 30.0;
        let state = GameState::new(&config).unwrap();

        let gauge = build_frame(&state).gauge;
        let top = gauge
            .mesh()
            .unwrap()
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(top, 30.0 - PADDING);

        let sheet = SpriteSheet::new(&state).unwrap();
        let frame_top = sheet
            .get(SpriteId::GaugeFrame)
            .unwrap()
            .meshes[0]
            .vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(frame_top, 30.0 - PADDING);
    }

    #[test]
    fn test_sprite_sheet_covers_frame() {
        let state = new_state();
        let sheet = SpriteSheet::new(&state).unwrap();
        for item in build_frame(&state).items {
            let sprite = sheet.get(item.sprite).unwrap();
            assert!(!sprite.meshes.is_empty());
        }
        assert!(sheet.get(SpriteId::Bird(99)).is_none());
    }

    #[test]
    fn test_bird_sprite_scales_with_radius() {
        let small = bird_sprite(10.0, BirdKind::Red).unwrap();
        let large = bird_sprite(15.0, BirdKind::Black).unwrap();
        let extent = |s: &Sprite| {
            s.meshes[1]
                .vertices
                .iter()
                .map(|v| Vec2::from(v.position).length())
                .fold(0.0, f32::max)
        };
        assert!((extent(&small) - 10.0).abs() < 1e-3);
        assert!((extent(&large) - 15.0).abs() < 1e-3);
    }
}
