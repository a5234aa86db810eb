//! Fixed timestep simulation tick
//!
//! One call per rendered frame. Order within a tick:
//! controller input, launch, obstacle settling, then projectile flight and
//! collisions. Settling runs before collisions, so an obstacle removed this
//! tick starts pulling its column down on the next one.

use serde::{Deserialize, Serialize};

use super::collision::find_hits;
use super::state::{GameState, ProjectileStatus, SimEvent};

/// Direction the tunnel is being rotated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AimDirection {
    #[default]
    Hold,
    /// Increase elevation
    Raise,
    /// Decrease elevation
    Lower,
}

impl AimDirection {
    fn sign(self) -> f32 {
        match self {
            AimDirection::Hold => 0.0,
            AimDirection::Raise => 1.0,
            AimDirection::Lower => -1.0,
        }
    }
}

/// One power key press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerPress {
    Up,
    Down,
}

impl PowerPress {
    fn sign(self) -> f32 {
        match self {
            PowerPress::Up => 1.0,
            PowerPress::Down => -1.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Launch the loaded projectile
    pub fire: bool,
    /// Power key presses since the last tick, in arrival order
    pub power: Vec<PowerPress>,
    /// Held aim rotation
    pub aim: AimDirection,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();
    state.time_ticks += 1;

    // Each press clamps on its own
    for press in &input.power {
        let before = state.cannon.momentum;
        let after = state
            .cannon
            .adjust_power(press.sign() * state.tuning.power_step);
        if after != before {
            log::debug!("Momentum {} -> {}", before, after);
        }
    }
    if input.aim != AimDirection::Hold {
        state
            .cannon
            .adjust_aim(input.aim.sign() * state.tuning.aim_speed * dt);
    }

    let ground = state.tuning.ground_height;
    let gravity = state.tuning.gravity;

    if input.fire {
        fire(state);
    }

    state.obstacles.settle_cascade(gravity * dt);

    let aim = state.cannon.aim;
    for projectile in &mut state.projectiles {
        projectile.follow_aim(aim, ground);
    }

    let Some(idx) = state
        .projectiles
        .iter()
        .position(|p| p.status == ProjectileStatus::InFlight)
    else {
        return;
    };

    let projectile = &mut state.projectiles[idx];
    if projectile.advance(dt, gravity, ground) {
        let (slot, pos) = (projectile.slot, projectile.pos);
        log::info!(
            "Projectile {} landed at ({:.1}, {:.1}) after {:.1}s",
            slot,
            pos.x,
            pos.y,
            projectile.flight_time
        );
        state.events.push(SimEvent::Landed { slot, pos });
        state.load_next();
        return;
    }

    let (pos, radius) = (projectile.pos, projectile.radius);
    for hit in find_hits(pos, radius, &state.obstacles, state.tuning.hit_test) {
        if state.obstacles.remove_obstacle(hit.id, hit.kind) {
            if let Some(o) = state.obstacles.find(hit.id, hit.kind) {
                state.events.push(SimEvent::ObstacleHit {
                    kind: o.kind,
                    id: o.id,
                    col: o.col,
                    row: o.row,
                });
            }
        }
    }
}

/// Launch the loaded projectile unless one is already flying
fn fire(state: &mut GameState) {
    if state.in_flight().is_some() {
        log::debug!("Fire ignored: projectile already in flight");
        return;
    }
    let (angle, speed) = (state.cannon.aim, state.cannon.momentum);
    let ground = state.tuning.ground_height;
    let Some(projectile) = state
        .projectiles
        .iter_mut()
        .find(|p| p.status == ProjectileStatus::Loaded)
    else {
        log::debug!("Fire ignored: nothing loaded");
        return;
    };
    if projectile.launch(angle, speed, ground) {
        log::info!(
            "Projectile {} launched at {:.1}° with momentum {}",
            projectile.slot,
            angle.to_degrees(),
            speed
        );
        state.events.push(SimEvent::Launched {
            slot: projectile.slot,
            angle,
            speed,
        });
    }
}
