//! Headless demo: drives the movement core through a scripted run and
//! prints frame snapshots. No window, no renderer, just the simulation.

use anyhow::Result;
use strider2d::{Action, ActionState, CoreConfig, GameWorld, Level, Vec2};

const LEVEL: &str = "\
0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 0 0 0 0 2 2 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0
0 1 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0 2 2 2 0 0 0 0 0 0 0 0 0
2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2 2
";

const DT: f32 = 1.0 / 60.0;

/// One segment of the scripted input: hold these actions for `frames`.
struct Phase {
    name: &'static str,
    frames: u32,
    held: &'static [Action],
    tap_jump: bool,
}

fn main() -> Result<()> {
    let config = CoreConfig {
        viewport_width: 512.0,
        viewport_height: 256.0,
        ..CoreConfig::default()
    };
    let level = Level::parse(LEVEL, config.tile_size)?;
    let mut world = GameWorld::new(&config, level, Vec2::new(24.0, 32.0))?;

    let script = [
        Phase { name: "settle", frames: 30, held: &[], tap_jump: false },
        Phase { name: "walk right", frames: 120, held: &[Action::MoveRight], tap_jump: false },
        Phase { name: "jump while walking", frames: 90, held: &[Action::MoveRight], tap_jump: true },
        Phase { name: "charge a power jump", frames: 45, held: &[Action::ChargeJump], tap_jump: false },
        Phase { name: "release and soar", frames: 120, held: &[], tap_jump: false },
        Phase { name: "walk back left", frames: 150, held: &[Action::MoveLeft], tap_jump: false },
    ];

    let mut input = ActionState::new();
    let mut frame = 0u32;
    for phase in &script {
        println!("--- {} ---", phase.name);
        for i in 0..phase.frames {
            input.begin_frame();
            sync_held(&mut input, phase.held);
            if phase.tap_jump && i == 0 {
                input.press(Action::Jump);
            }
            world.update(DT, &input);
            frame += 1;

            if frame % 30 == 0 {
                let p = world.player();
                println!(
                    "t={:6.2}s pos=({:7.2},{:7.2}) u={:6.1} {:?}/{:?} camera.x={:7.2}",
                    frame as f32 * DT,
                    p.position().x,
                    p.position().y,
                    p.horizontal_speed(),
                    p.horizontal_mode(),
                    p.vertical_mode(),
                    world.camera().offset().x,
                );
            }
        }
    }

    println!(
        "done after {frame} frames; player at {:?}, out of bounds: {}",
        world.player().pixel_rect(),
        world.out_of_bounds()
    );
    Ok(())
}

fn sync_held(input: &mut ActionState, held: &[Action]) {
    for action in [
        Action::MoveLeft,
        Action::MoveRight,
        Action::Jump,
        Action::ChargeJump,
    ] {
        if held.contains(&action) {
            input.press(action);
        } else {
            input.release(action);
        }
    }
}
