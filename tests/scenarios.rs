//! End-to-end scenarios driven through the public tick API

use cannon_toss::config::{Layout, LevelConfig};
use cannon_toss::consts::*;
use cannon_toss::renderer::build_frame;
use cannon_toss::sim::{
    GameState, HitTest, ObstacleKind, ProjectileStatus, SimEvent, TickInput, tick,
};
use cannon_toss::{InputEvent, InputState, SimConfig};

fn ring_level() -> SimConfig {
    SimConfig {
        level: LevelConfig {
            columns: 3,
            rows: 3,
            layout: Layout::Ring { depth: 1 },
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Put the loaded projectile in flight from `origin` with no initial velocity
fn drop_from(state: &mut GameState, origin: glam::Vec2) {
    let p = state
        .projectiles
        .iter_mut()
        .find(|p| p.status == ProjectileStatus::Loaded)
        .unwrap();
    p.launch(0.0, 0.0, GROUND_HEIGHT);
    p.origin = origin;
    p.pos = origin;
}

#[test]
fn test_hit_on_ring_center_only_kills_center() {
    let mut state = GameState::new(&ring_level()).unwrap();
    let center = state.obstacles.cell(1, 1).unwrap().clone();
    assert_eq!(center.kind, ObstacleKind::Piggy);
    let ring_before: Vec<_> = state
        .obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Ice)
        .map(|o| o.pos())
        .collect();

    drop_from(&mut state, center.pos());
    tick(&mut state, &TickInput::default(), SIM_DT);

    assert_eq!(
        state.events,
        vec![SimEvent::ObstacleHit {
            kind: ObstacleKind::Piggy,
            id: center.id,
            col: 1,
            row: 1
        }]
    );
    assert!(state.obstacles.cell(1, 1).unwrap().dead);
    let ring_after: Vec<_> = state
        .obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Ice)
        .collect();
    assert_eq!(ring_after.len(), 8);
    for (o, before) in ring_after.iter().zip(&ring_before) {
        assert!(!o.dead);
        assert_eq!(o.pos(), *before);
        assert_eq!(o.fall, 0.0);
    }
}

#[test]
fn test_cell_above_removed_center_settles() {
    let mut state = GameState::new(&ring_level()).unwrap();
    let center = state.obstacles.cell(1, 1).unwrap().clone();
    drop_from(&mut state, center.pos());
    tick(&mut state, &TickInput::default(), SIM_DT);

    // Park the projectile so it cannot strike anything else
    state.projectiles[0].status = ProjectileStatus::Landed;
    for _ in 0..200 {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }

    let top = state.obstacles.cell(1, 2).unwrap();
    assert!(!top.dead);
    assert_eq!(top.replacing, 1);
    assert_eq!(top.fall, OBSTACLE_CELL_SIZE);
    assert_eq!(top.row, 2);
    for (col, row) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1), (0, 2), (2, 2)] {
        assert_eq!(state.obstacles.cell(col, row).unwrap().fall, 0.0);
    }
}

#[test]
fn test_power_sequence_through_input() {
    let mut config = SimConfig::default();
    config.tuning.momentum_min = 50.0;
    config.tuning.momentum_max = 150.0;
    config.tuning.momentum_start = 100.0;
    config.tuning.power_step = 20.0;
    let mut state = GameState::new(&config).unwrap();
    let mut input = InputState::new();

    let mut seen = vec![state.cannon.momentum];
    for _ in 0..5 {
        input.apply(InputEvent::PowerUp);
        tick(&mut state, &input.take_tick_input(), SIM_DT);
        seen.push(state.cannon.momentum);
    }
    assert_eq!(seen, vec![100.0, 120.0, 140.0, 150.0, 150.0, 150.0]);
}

#[test]
fn test_power_up_then_down_at_max_in_one_frame() {
    let mut state = GameState::new(&SimConfig::default()).unwrap();
    state.cannon.adjust_power(MOMENTUM_MAX);
    let mut input = InputState::new();
    input.apply(InputEvent::PowerUp);
    input.apply(InputEvent::PowerDown);
    tick(&mut state, &input.take_tick_input(), SIM_DT);
    assert_eq!(state.cannon.momentum, MOMENTUM_MAX - POWER_STEP);
}

#[test]
fn test_full_level_shots_land_in_order() {
    let mut state = GameState::new(&SimConfig::default()).unwrap();
    let fire = TickInput {
        fire: true,
        ..Default::default()
    };
    let mut landed = Vec::new();
    for _ in 0..2 {
        tick(&mut state, &fire, SIM_DT);
        while state.in_flight().is_some() {
            tick(&mut state, &TickInput::default(), SIM_DT);
            for e in &state.events {
                if let SimEvent::Landed { slot, .. } = e {
                    landed.push(*slot);
                }
            }
        }
    }
    assert_eq!(landed, vec![0, 1]);
    assert!(state.is_finished());
}

#[test]
fn test_flat_shot_into_wall_breaks_bottom_row() {
    // Low, hard shot straight into a single-column wall
    let mut config = SimConfig::default();
    config.level = LevelConfig {
        columns: 1,
        rows: 4,
        layout: Layout::Rows(vec!["I".into(); 4]),
        start_x: 400.0,
        ..Default::default()
    };
    let mut state = GameState::new(&config).unwrap();
    state.cannon.adjust_power(1000.0);
    tick(
        &mut state,
        &TickInput {
            fire: true,
            ..Default::default()
        },
        SIM_DT,
    );
    let mut hit_rows = Vec::new();
    while state.in_flight().is_some() {
        tick(&mut state, &TickInput::default(), SIM_DT);
        for e in &state.events {
            if let SimEvent::ObstacleHit { row, .. } = e {
                hit_rows.push(*row);
            }
        }
    }
    assert!(!hit_rows.is_empty());
    assert!(hit_rows.contains(&0));
    assert!(state.obstacles.live_count() < 4);
}

#[test]
fn test_box_hit_test_is_looser_than_circle() {
    // A projectile parked diagonally off a block's corner
    let run = |test: HitTest| {
        let mut config = SimConfig::default();
        config.tuning.hit_test = test;
        config.tuning.gravity = 1e-6;
        config.level = LevelConfig {
            columns: 1,
            rows: 1,
            layout: Layout::Rows(vec!["I".into()]),
            ..Default::default()
        };
        let mut state = GameState::new(&config).unwrap();
        let block = state.obstacles.cell(0, 0).unwrap().clone();
        let reach = block.radius + state.projectiles[0].radius - 1.0;
        drop_from(&mut state, block.pos() + glam::Vec2::splat(reach));
        tick(&mut state, &TickInput::default(), SIM_DT);
        state.obstacles.live_count()
    };
    assert_eq!(run(HitTest::Circle), 1);
    assert_eq!(run(HitTest::Box), 0);
}

#[test]
fn test_render_frame_reflects_destroyed_obstacles() {
    let mut state = GameState::new(&ring_level()).unwrap();
    let before = build_frame(&state).items.len();
    let center = state.obstacles.cell(1, 1).unwrap().clone();
    drop_from(&mut state, center.pos());
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(build_frame(&state).items.len(), before - 1);
}
