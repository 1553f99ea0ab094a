//! End-to-end frame-loop scenarios through the public API.

use strider2d::{
    Action, ActionState, CameraMode, CoreConfig, GameWorld, Level, Vec2, VerticalMode,
};

const DT: f32 = 1.0 / 60.0;

fn ground_strip(columns: usize, spawn_col: usize) -> Level {
    let mut rows = vec![vec![0u32; columns]; 3];
    rows[1][spawn_col] = 1;
    rows[2] = vec![2; columns];
    Level::from_rows(&rows, 32.0).unwrap()
}

fn settled_world(columns: usize, spawn_col: usize) -> GameWorld {
    let cfg = CoreConfig::default();
    let level = ground_strip(columns, spawn_col);
    let mut world = GameWorld::new(&cfg, level, Vec2::new(24.0, 32.0)).unwrap();
    let input = ActionState::new();
    for _ in 0..30 {
        world.update(DT, &input);
    }
    assert_eq!(world.player().vertical_mode(), VerticalMode::Grounded);
    world
}

#[test]
fn ten_tile_map_keeps_a_static_camera() {
    // 320px of map against an 800px viewport.
    let mut world = settled_world(10, 0);
    assert_eq!(world.camera().mode(), CameraMode::Static);

    let mut input = ActionState::new();
    input.press(Action::MoveRight);
    for _ in 0..600 {
        world.update(DT, &input);
        assert_eq!(world.camera().offset(), Vec2::ZERO);
    }
    // The player crossed the map; the camera still never moved.
    assert!(world.player().rect().right() >= 320.0 - 1e-3);
}

#[test]
fn hundred_tile_map_follows_then_clamps() {
    // 3200px map, 800px viewport.
    let mut world = settled_world(100, 0);
    assert_eq!(world.camera().mode(), CameraMode::Follow);

    let mut input = ActionState::new();
    input.press(Action::MoveRight);

    // Walk right continuously for 5 seconds.
    for _ in 0..300 {
        world.update(DT, &input);
    }
    let center_x = world.player().rect().center().x;
    assert!(center_x > 400.0, "player should be past the first region");
    assert!(
        (world.camera().offset().x - (center_x - 400.0)).abs() < 1e-3,
        "camera should center on the player in the middle region"
    );

    // Keep going until the right edge pins the camera.
    for _ in 0..2000 {
        world.update(DT, &input);
    }
    assert!(world.player().rect().center().x >= 2800.0);
    assert_eq!(world.camera().offset().x, 3200.0 - 800.0);
}

#[test]
fn charged_jump_peaks_at_base_plus_power() {
    let cfg = CoreConfig::default();
    let mut world = settled_world(40, 4);
    let start_bottom = world.player().rect().bottom();

    let mut input = ActionState::new();
    input.press(Action::ChargeJump);
    for _ in 0..30 {
        world.update(DT, &input);
    }
    assert_eq!(
        world.player().vertical_mode(),
        VerticalMode::ChargingPowerJump
    );
    let power = world.player().jump_power();
    assert!((power - cfg.charge_rate * 0.5).abs() < 1e-3);

    input.release(Action::ChargeJump);
    let mut peak = 0.0f32;
    for _ in 0..240 {
        world.update(DT, &input);
        peak = peak.max(start_bottom - world.player().rect().bottom());
        if world.player().vertical_mode() == VerticalMode::Grounded {
            break;
        }
    }
    let target = cfg.jump_height + power;
    assert!(
        (peak - target).abs() < 0.05,
        "peak {peak} vs target {target}"
    );
}

#[test]
fn landing_round_trip_is_exact() {
    let cfg = CoreConfig::default();
    // Spawn high above the floor: a 12-row level with ground on the last row.
    let mut rows = vec![vec![0u32; 8]; 12];
    rows[0][3] = 1;
    rows[11] = vec![2; 8];
    let level = Level::from_rows(&rows, 32.0).unwrap();
    let mut world = GameWorld::new(&cfg, level, Vec2::new(24.0, 32.0)).unwrap();

    let input = ActionState::new();
    for _ in 0..600 {
        world.update(DT, &input);
        if world.player().vertical_mode() == VerticalMode::Grounded {
            break;
        }
    }
    assert_eq!(world.player().vertical_mode(), VerticalMode::Grounded);
    assert_eq!(world.player().rect().bottom(), 11.0 * 32.0);
}

#[test]
fn jumping_under_a_tile_bumps_into_falling() {
    let cfg = CoreConfig::default();
    // Ground row at the bottom, one ceiling tile above the spawn column.
    let rows = vec![
        vec![0, 0, 0, 0, 2, 0, 0, 0],
        vec![0, 0, 0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 1, 0, 0, 0],
        vec![2, 2, 2, 2, 2, 2, 2, 2],
    ];
    let level = Level::from_rows(&rows, 32.0).unwrap();
    let mut world = GameWorld::new(&cfg, level, Vec2::new(24.0, 32.0)).unwrap();

    let mut input = ActionState::new();
    for _ in 0..30 {
        world.update(DT, &input);
    }
    assert_eq!(world.player().vertical_mode(), VerticalMode::Grounded);

    input.press(Action::Jump);
    world.update(DT, &input);
    input.begin_frame();
    assert_eq!(world.player().vertical_mode(), VerticalMode::Jumping);

    let mut bumped = false;
    for _ in 0..120 {
        world.update(DT, &input);
        if world.player().vertical_mode() == VerticalMode::Falling {
            bumped = true;
            assert!(world.player().rect().top() >= 32.0 - 1e-3);
            break;
        }
        if world.player().vertical_mode() == VerticalMode::Grounded {
            break;
        }
    }
    assert!(bumped, "head bump must force the falling state");
}
