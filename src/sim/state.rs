//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one owned [`GameState`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::cannon::Cannon;
use super::kinematics::{displacement, ground_level, launch_velocity, muzzle_position, rest_position};
use super::obstacles::{ObstacleGrid, ObstacleKind};
use crate::config::{BirdConfig, ConfigError, SimConfig, Tuning};

/// Setup failures
#[derive(Debug, Error)]
pub enum SimError {
    #[error("projectile roster is full ({capacity} slots)")]
    ProjectilesFull { capacity: usize },
    #[error("obstacle grid is full ({capacity} cells)")]
    ObstaclesFull { capacity: usize },
    #[error("grid cell ({col}, {row}) is already occupied")]
    CellOccupied { col: u32, row: u32 },
    #[error("grid cell ({col}, {row}) is outside the grid")]
    OutOfGrid { col: u32, row: u32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Bird variants (colour and look only; physics depends on size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirdKind {
    #[default]
    Red,
    Black,
}

/// Projectile lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileStatus {
    /// Waiting its turn beside the cannon
    Idle,
    /// In the cannon, following the aim, waiting for fire
    Loaded,
    /// Flying along its launch arc
    InFlight,
    /// Touched the ground (terminal)
    Landed,
}

/// A launched (or launchable) bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Roster index
    pub slot: usize,
    pub kind: BirdKind,
    pub radius: f32,
    pub status: ProjectileStatus,
    /// Launch angle (radians)
    pub angle: f32,
    /// Launch velocity
    pub velocity: Vec2,
    /// Seconds since launch
    pub flight_time: f32,
    /// Launch point
    pub origin: Vec2,
    pub pos: Vec2,
}

impl Projectile {
    pub fn new(slot: usize, bird: &BirdConfig, ground_height: f32) -> Self {
        Self {
            slot,
            kind: bird.kind,
            radius: bird.size,
            status: ProjectileStatus::Idle,
            angle: 0.0,
            velocity: Vec2::ZERO,
            flight_time: 0.0,
            origin: Vec2::ZERO,
            pos: rest_position(bird.size, ground_height),
        }
    }

    /// Move into the cannon
    pub fn load(&mut self, aim: f32, ground_height: f32) {
        if self.status == ProjectileStatus::Idle {
            self.status = ProjectileStatus::Loaded;
            self.follow_aim(aim, ground_height);
        }
    }

    /// Keep a loaded projectile at the mouth of the tunnel
    pub fn follow_aim(&mut self, aim: f32, ground_height: f32) {
        if self.status == ProjectileStatus::Loaded {
            self.pos = muzzle_position(aim, self.radius, ground_height);
        }
    }

    /// Fire a loaded projectile at `angle` with `speed`
    pub fn launch(&mut self, angle: f32, speed: f32, ground_height: f32) -> bool {
        if self.status != ProjectileStatus::Loaded {
            return false;
        }
        self.status = ProjectileStatus::InFlight;
        self.angle = angle;
        self.velocity = launch_velocity(angle, speed);
        self.flight_time = 0.0;
        self.origin = muzzle_position(angle, self.radius, ground_height);
        self.pos = self.origin;
        true
    }

    /// Advance flight time by `dt` and re-evaluate the arc
    ///
    /// Returns `true` on the tick the projectile reaches the ground; it then
    /// rests on the ground rather than below it.
    pub fn advance(&mut self, dt: f32, gravity: f32, ground_height: f32) -> bool {
        if self.status != ProjectileStatus::InFlight {
            return false;
        }
        self.flight_time += dt;
        self.pos = self.origin + displacement(self.velocity, self.flight_time, gravity);
        let floor = ground_level(self.radius, ground_height);
        if self.pos.y <= floor {
            self.pos.y = floor;
            self.status = ProjectileStatus::Landed;
            return true;
        }
        false
    }

    /// Launch speed
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Things that happened during the most recent tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Launched { slot: usize, angle: f32, speed: f32 },
    ObstacleHit { kind: ObstacleKind, id: u32, col: u32, row: u32 },
    Landed { slot: usize, pos: Vec2 },
    Loaded { slot: usize },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub cannon: Cannon,
    /// Roster, ordered by slot
    pub projectiles: Vec<Projectile>,
    pub obstacles: ObstacleGrid,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<SimEvent>,
}

impl GameState {
    /// Build the level described by `config`, with the first projectile loaded
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let tuning = config.tuning.clone();
        let obstacles = ObstacleGrid::build(&config.level, &tuning)?;
        let mut state = Self {
            cannon: Cannon::new(&tuning),
            projectiles: Vec::with_capacity(config.level.birds.len()),
            obstacles,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        };
        for bird in &config.level.birds {
            state.spawn_projectile(bird)?;
        }
        state.load_next();
        Ok(state)
    }

    /// Append a projectile to the roster
    pub fn spawn_projectile(&mut self, bird: &BirdConfig) -> Result<usize, SimError> {
        if self.projectiles.len() >= self.tuning.max_projectiles {
            return Err(SimError::ProjectilesFull {
                capacity: self.tuning.max_projectiles,
            });
        }
        let slot = self.projectiles.len();
        self.projectiles
            .push(Projectile::new(slot, bird, self.tuning.ground_height));
        Ok(slot)
    }

    pub fn in_flight(&self) -> Option<&Projectile> {
        self.projectiles
            .iter()
            .find(|p| p.status == ProjectileStatus::InFlight)
    }

    pub fn loaded(&self) -> Option<&Projectile> {
        self.projectiles
            .iter()
            .find(|p| p.status == ProjectileStatus::Loaded)
    }

    /// Load the next idle projectile, if any
    pub fn load_next(&mut self) -> Option<usize> {
        let aim = self.cannon.aim;
        let ground = self.tuning.ground_height;
        let next = self
            .projectiles
            .iter_mut()
            .find(|p| p.status == ProjectileStatus::Idle)?;
        next.load(aim, ground);
        let slot = next.slot;
        self.events.push(SimEvent::Loaded { slot });
        Some(slot)
    }

    /// No projectile left to fly
    pub fn is_finished(&self) -> bool {
        self.projectiles
            .iter()
            .all(|p| p.status == ProjectileStatus::Landed)
    }

    /// Take the events from the most recent tick
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfig;
    use crate::consts::*;

    fn bird(size: f32) -> BirdConfig {
        BirdConfig {
            size,
            kind: BirdKind::Red,
        }
    }

    #[test]
    fn test_new_state_loads_first_projectile() {
        let state = GameState::new(&SimConfig::default()).unwrap();
        assert_eq!(state.projectiles.len(), 2);
        assert_eq!(state.projectiles[0].status, ProjectileStatus::Loaded);
        assert_eq!(state.projectiles[1].status, ProjectileStatus::Idle);
        assert_eq!(state.cannon.momentum, MOMENTUM_START);
        assert_eq!(state.events, vec![SimEvent::Loaded { slot: 0 }]);
    }

    #[test]
    fn test_spawn_projectile_capacity() {
        let mut config = SimConfig::default();
        config.tuning.max_projectiles = 2;
        let mut state = GameState::new(&config).unwrap();
        let err = state.spawn_projectile(&bird(5.0)).unwrap_err();
        assert!(matches!(err, SimError::ProjectilesFull { capacity: 2 }));
    }

    #[test]
    fn test_roster_over_capacity_at_setup() {
        let mut config = SimConfig::default();
        config.level.birds = vec![bird(5.0); MAX_PROJECTILES + 1];
        assert!(matches!(
            GameState::new(&config),
            Err(SimError::ProjectilesFull { .. })
        ));
    }

    #[test]
    fn test_huge_grid_from_json_is_an_error() {
        let config = SimConfig::from_json(r#"{ "level": { "columns": 65536, "rows": 65536 } }"#).unwrap();
        assert!(matches!(
            GameState::new(&config),
            Err(SimError::ObstaclesFull { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            level: LevelConfig {
                columns: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(GameState::new(&config), Err(SimError::Config(_))));
    }

    #[test]
    fn test_launch_requires_loaded() {
        let mut p = Projectile::new(0, &bird(10.0), GROUND_HEIGHT);
        assert!(!p.launch(0.5, 100.0, GROUND_HEIGHT));
        p.load(0.0, GROUND_HEIGHT);
        assert!(p.launch(0.5, 100.0, GROUND_HEIGHT));
        assert_eq!(p.status, ProjectileStatus::InFlight);
        assert!((p.speed() - 100.0).abs() < 1e-3);
        // Already in flight
        assert!(!p.launch(0.5, 100.0, GROUND_HEIGHT));
    }

    #[test]
    fn test_advance_vertical_closed_form() {
        let mut p = Projectile::new(0, &bird(10.0), GROUND_HEIGHT);
        p.load(0.0, GROUND_HEIGHT);
        let (angle, speed) = (0.6_f32, 120.0_f32);
        p.launch(angle, speed, GROUND_HEIGHT);
        for _ in 0..5 {
            p.advance(SIM_DT, GRAVITY, GROUND_HEIGHT);
        }
        let t = p.flight_time;
        let expected = p.origin.y + speed * angle.sin() * t - 0.5 * GRAVITY * t * t;
        assert!((p.pos.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_landing_triggers_once() {
        let mut p = Projectile::new(0, &bird(10.0), GROUND_HEIGHT);
        p.load(0.0, GROUND_HEIGHT);
        p.launch(0.0, 100.0, GROUND_HEIGHT);

        let mut landings = 0;
        for _ in 0..1000 {
            if p.advance(SIM_DT, GRAVITY, GROUND_HEIGHT) {
                landings += 1;
            }
        }
        assert_eq!(landings, 1);
        assert_eq!(p.status, ProjectileStatus::Landed);
        assert_eq!(p.pos.y, ground_level(10.0, GROUND_HEIGHT));

        // Frozen after landing
        let pos = p.pos;
        assert!(!p.advance(SIM_DT, GRAVITY, GROUND_HEIGHT));
        assert_eq!(p.pos, pos);
    }

    /// In flight from the floor with a vertical speed that returns it there
    /// after exactly one 0.5s step under gravity 2
    fn hop(vy: f32) -> Projectile {
        let mut p = Projectile::new(0, &bird(10.0), GROUND_HEIGHT);
        p.load(0.0, GROUND_HEIGHT);
        p.launch(0.0, 0.0, GROUND_HEIGHT);
        p.origin = Vec2::new(0.0, ground_level(10.0, GROUND_HEIGHT));
        p.velocity = Vec2::new(1.0, vy);
        p
    }

    #[test]
    fn test_landing_at_exact_ground_level() {
        let mut p = hop(0.5);
        assert!(p.advance(0.5, 2.0, GROUND_HEIGHT));
        assert_eq!(p.status, ProjectileStatus::Landed);
        assert_eq!(p.pos, Vec2::new(0.5, ground_level(10.0, GROUND_HEIGHT)));

        // A hair above the floor keeps flying
        let mut p = hop(0.6);
        assert!(!p.advance(0.5, 2.0, GROUND_HEIGHT));
        assert_eq!(p.status, ProjectileStatus::InFlight);
    }

    #[test]
    fn test_fast_landing_rests_on_ground() {
        let mut p = Projectile::new(0, &bird(10.0), GROUND_HEIGHT);
        p.load(0.0, GROUND_HEIGHT);
        p.launch(0.0, 150.0, GROUND_HEIGHT);
        // One long step overshoots the floor by about a hundred units
        assert!(p.advance(5.0, GRAVITY, GROUND_HEIGHT));
        assert_eq!(p.pos.y, ground_level(10.0, GROUND_HEIGHT));
    }

    #[test]
    fn test_loaded_follows_aim() {
        let mut p = Projectile::new(0, &bird(10.0), GROUND_HEIGHT);
        p.load(0.0, GROUND_HEIGHT);
        let before = p.pos;
        p.follow_aim(0.5, GROUND_HEIGHT);
        assert_ne!(p.pos, before);
        assert_eq!(p.pos, muzzle_position(0.5, 10.0, GROUND_HEIGHT));
    }

    #[test]
    fn test_load_next_runs_out() {
        let mut state = GameState::new(&SimConfig::default()).unwrap();
        state.projectiles[0].status = ProjectileStatus::Landed;
        assert_eq!(state.load_next(), Some(1));
        state.projectiles[1].status = ProjectileStatus::Landed;
        assert_eq!(state.load_next(), None);
        assert!(state.is_finished());
    }
}
