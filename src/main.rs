//! Cannon Toss headless runner
//!
//! Plays a level with a seeded autopilot standing in for the player, drives the
//! same input path a window would, and prints a JSON summary.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use cannon_toss::consts::SIM_DT;
use cannon_toss::renderer::{SpriteSheet, build_frame};
use cannon_toss::sim::kinematics::{ground_level, launch_velocity, muzzle_position, time_to_floor};
use cannon_toss::sim::{AimDirection, GameState, ObstacleKind, SimEvent, tick};
use cannon_toss::{InputEvent, InputState, SimConfig};

/// Give up on a level after this many ticks
const MAX_TICKS: u64 = 100_000;

/// Picks an aim and power for each shot, then steers the controls toward them
struct Autopilot {
    rng: Pcg32,
    target: Option<(f32, f32)>,
}

impl Autopilot {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            target: None,
        }
    }

    fn events(&mut self, state: &GameState) -> Vec<InputEvent> {
        let Some(loaded) = state.loaded() else {
            return vec![InputEvent::AimReleased];
        };
        if state.in_flight().is_some() {
            return vec![InputEvent::AimReleased];
        }

        let tuning = &state.tuning;
        let (target_aim, target_power) = *self.target.get_or_insert_with(|| {
            let aim = if tuning.aim_speed > 0.0 {
                self.rng.random_range(0.0..=tuning.aim_max)
            } else {
                state.cannon.aim
            };
            let steps = ((tuning.momentum_max - tuning.momentum_min) / tuning.power_step) as u32;
            let power = tuning.momentum_min + self.rng.random_range(0..=steps) as f32 * tuning.power_step;
            log::debug!("Autopilot target: {:.1}°, momentum {}", aim.to_degrees(), power);
            (aim, power)
        });

        let mut events = Vec::new();
        let aim_tolerance = tuning.aim_speed * SIM_DT;
        let aim_error = target_aim - state.cannon.aim;
        let aim_done = aim_error.abs() <= aim_tolerance;
        events.push(if aim_done {
            InputEvent::AimReleased
        } else if aim_error > 0.0 {
            InputEvent::AimPressed(AimDirection::Raise)
        } else {
            InputEvent::AimPressed(AimDirection::Lower)
        });

        let power_error = target_power - state.cannon.momentum;
        let power_done = power_error.abs() <= tuning.power_step / 2.0;
        if !power_done {
            events.push(if power_error > 0.0 {
                InputEvent::PowerUp
            } else {
                InputEvent::PowerDown
            });
        }

        if aim_done && power_done {
            let (aim, speed) = (state.cannon.aim, state.cannon.momentum);
            let origin = muzzle_position(aim, loaded.radius, tuning.ground_height);
            let floor = ground_level(loaded.radius, tuning.ground_height);
            if let Some(t) = time_to_floor(origin, launch_velocity(aim, speed), tuning.gravity, floor) {
                log::info!(
                    "Firing projectile {}: unobstructed landing at x = {:.1} after {:.1}s",
                    loaded.slot,
                    origin.x + launch_velocity(aim, speed).x * t,
                    t
                );
            }
            events.push(InputEvent::Fire);
            self.target = None;
        }
        events
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    seed: u64,
    ticks: u64,
    shots: usize,
    ice_destroyed: usize,
    piggies_destroyed: usize,
    ice_remaining: usize,
    piggies_remaining: usize,
    hits: Vec<SimEvent>,
}

#[derive(Parser)]
#[command(name = "cannon-toss")]
#[command(about = "Play a Cannon Toss level headless with a seeded autopilot", long_about = None)]
struct Cli {
    /// Path to a JSON level/tuning config (defaults to the built-in level)
    config: Option<PathBuf>,
    /// Seed for the autopilot's shot choices
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Cannon Toss (headless) starting...");

    let Cli { config, seed } = Cli::parse();
    let config = match config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut state = GameState::new(&config)?;
    let sprites = SpriteSheet::new(&state)?;
    log::info!(
        "Level: {}x{} grid, {} projectiles, seed {}",
        config.level.columns,
        config.level.rows,
        state.projectiles.len(),
        seed
    );

    let mut autopilot = Autopilot::new(seed);
    let mut input = InputState::new();
    let mut hits = Vec::new();
    let mut shots = 0;

    while !state.is_finished() && !input.quit_requested() {
        if state.time_ticks >= MAX_TICKS {
            log::warn!("Stopping after {} ticks", MAX_TICKS);
            break;
        }
        for event in autopilot.events(&state) {
            input.apply(event);
        }
        tick(&mut state, &input.take_tick_input(), SIM_DT);

        for event in state.drain_events() {
            match event {
                SimEvent::Launched { .. } => shots += 1,
                SimEvent::ObstacleHit { kind, id, .. } => {
                    log::info!("Hit {:?} {}", kind, id);
                    hits.push(event);
                }
                _ => {}
            }
        }

        let frame = build_frame(&state);
        if let Some(missing) = frame.items.iter().find(|i| sprites.get(i.sprite).is_none()) {
            log::warn!("No sprite for {:?}", missing.entity);
        }
    }

    let count = |kind: ObstacleKind| state.obstacles.iter().filter(|o| o.kind == kind).count();
    let ice_remaining = state.obstacles.live_count_of(ObstacleKind::Ice);
    let piggies_remaining = state.obstacles.live_count_of(ObstacleKind::Piggy);
    let summary = Summary {
        seed,
        ticks: state.time_ticks,
        shots,
        ice_destroyed: count(ObstacleKind::Ice) - ice_remaining,
        piggies_destroyed: count(ObstacleKind::Piggy) - piggies_remaining,
        ice_remaining,
        piggies_remaining,
        hits,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
