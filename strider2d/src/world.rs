//! Per-frame orchestration: one `update(dt)` call advances the whole core.
//!
//! Frame order is fixed: horizontal machine, vertical machine, pixel
//! commit (all inside the body update), then neighbour-index rebuild, then
//! camera recompute. Single-threaded and cooperative; the external loop
//! supplies wall-clock `dt` and owns rendering.

use crate::camera::Camera;
use crate::config::{ConfigError, CoreConfig};
use crate::grid::TileGrid;
use crate::input::ActionState;
use crate::level::Level;
use crate::math::Vec2;
use crate::neighbours::NeighbourIndex;
use crate::player::KinematicBody;

/// Upper bound on a single frame's `dt` (seconds). Anything above this is
/// treated as a clock hiccup rather than simulated in one go.
const MAX_FRAME_DT: f32 = 0.1;

/// Owns one level's worth of state: the immutable tile grid, the player
/// body, the per-frame neighbour index, and the camera.
pub struct GameWorld {
    grid: TileGrid,
    player: KinematicBody,
    neighbours: NeighbourIndex,
    camera: Camera,
}

impl GameWorld {
    /// Builds a world from a loaded level. `body_size` comes from the
    /// externally loaded sprite. Fails if the config is unusable.
    pub fn new(config: &CoreConfig, level: Level, body_size: Vec2) -> Result<Self, ConfigError> {
        config.validate()?;
        let (grid, spawn) = level.into_parts();

        let player = KinematicBody::new(config, spawn, body_size);
        let mut neighbours = NeighbourIndex::new();
        neighbours.rebuild(&player.rect(), &grid);

        let camera = Camera::new(
            Vec2::new(grid.pixel_width(), grid.pixel_height()),
            Vec2::new(config.viewport_width, config.viewport_height),
            config.camera_vertical,
        );

        Ok(Self {
            grid,
            player,
            neighbours,
            camera,
        })
    }

    /// Advances the simulation by one frame.
    pub fn update(&mut self, dt: f32, input: &ActionState) {
        let dt = if dt > MAX_FRAME_DT {
            log::warn!("frame dt {dt:.3}s bounded to {MAX_FRAME_DT}s");
            MAX_FRAME_DT
        } else {
            dt.max(0.0)
        };

        self.player.update(dt, input, &self.grid, &self.neighbours);
        self.neighbours.rebuild(&self.player.rect(), &self.grid);
        self.camera.recompute(&self.player.rect());
    }

    /// True once the player has fallen past the bottom of the playfield;
    /// the embedding game typically restarts the level.
    pub fn out_of_bounds(&self) -> bool {
        self.player.rect().top() > self.grid.pixel_height()
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn player(&self) -> &KinematicBody {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn neighbours(&self) -> &NeighbourIndex {
        &self.neighbours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::level::Level;

    fn small_level() -> Level {
        Level::parse("0 0 0 0 0\n0 1 0 0 0\n2 2 2 2 2\n", 32.0).unwrap()
    }

    #[test]
    fn bad_config_fails_construction() {
        let cfg = CoreConfig {
            fall_time: -1.0,
            ..CoreConfig::default()
        };
        assert!(GameWorld::new(&cfg, small_level(), Vec2::new(24.0, 32.0)).is_err());
    }

    #[test]
    fn update_settles_player_and_camera() {
        let cfg = CoreConfig::default();
        let mut world = GameWorld::new(&cfg, small_level(), Vec2::new(24.0, 32.0)).unwrap();
        let input = ActionState::new();

        for _ in 0..120 {
            world.update(1.0 / 60.0, &input);
        }
        assert_eq!(world.player().rect().bottom(), 64.0);
        // 160px map against an 800px viewport never scrolls.
        assert_eq!(world.camera().offset(), Vec2::ZERO);
        assert!(!world.out_of_bounds());
    }

    #[test]
    fn huge_dt_does_not_tunnel_through_the_floor() {
        let cfg = CoreConfig::default();
        let mut world = GameWorld::new(&cfg, small_level(), Vec2::new(24.0, 32.0)).unwrap();
        let input = ActionState::new();

        for _ in 0..60 {
            world.update(5.0, &input);
        }
        assert!(world.player().rect().bottom() <= 64.0 + 1e-3);
        assert!(!world.out_of_bounds());
    }

    #[test]
    fn falling_off_the_map_is_reported() {
        let level = Level::parse("1 0\n2 0\n", 32.0).unwrap();
        let cfg = CoreConfig::default();
        let mut world = GameWorld::new(&cfg, level, Vec2::new(24.0, 32.0)).unwrap();

        let mut input = ActionState::new();
        input.press(crate::input::Action::MoveRight);
        for _ in 0..600 {
            world.update(1.0 / 60.0, &input);
            if world.out_of_bounds() {
                return;
            }
        }
        panic!("player should have walked off the ledge and fallen out");
    }
}
