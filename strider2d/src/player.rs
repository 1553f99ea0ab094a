//! The player's kinematic body: horizontal accel/decel machine, vertical
//! jump/charge/fall machine, and the pixel-commit rounding policy.
//!
//! Trajectories are described by a desired peak height `h` and time-to-peak
//! `t`; launch velocity and acceleration follow from the suvat identities
//! `u = 2h/t`, `a = -2h/t²` (up-positive). Screen space has y growing
//! downward, so the integrated displacement is negated before resolution.

use crate::collision::{self, Axis};
use crate::config::CoreConfig;
use crate::grid::TileGrid;
use crate::input::{Action, ActionState};
use crate::math::{Rect, Vec2};
use crate::neighbours::NeighbourIndex;

/// "Flush" tolerance for landing/support checks, in pixels.
const FLUSH_EPS: f32 = 1e-3;

/// Horizontal movement phase. Exactly one is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalMode {
    Idle,
    Accelerating,
    Decelerating,
}

/// Vertical movement phase. Exactly one is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalMode {
    Grounded,
    Jumping,
    DoubleJumping,
    ChargingPowerJump,
    Falling,
}

/// Which way the body faces; renderers use this to flip the sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Derived kinematic constants, computed once from a validated config.
#[derive(Clone, Copy, Debug)]
struct Kinematics {
    v_max: f32,
    a_accel: f32,
    a_decel: f32,
    jump_height: f32,
    jump_time: f32,
    double_jump_height: f32,
    double_jump_time: f32,
    fall_accel: f32,
    charge_rate: f32,
    /// Extra height the charge may add on top of the base jump.
    charge_headroom: f32,
    /// Per-axis per-frame displacement bound (anti-tunnelling).
    max_step: f32,
}

impl Kinematics {
    fn from_config(cfg: &CoreConfig) -> Self {
        Self {
            v_max: cfg.max_speed,
            a_accel: cfg.max_speed / cfg.accel_time,
            a_decel: cfg.max_speed / cfg.decel_time,
            jump_height: cfg.jump_height,
            jump_time: cfg.jump_time,
            double_jump_height: cfg.double_jump_height,
            double_jump_time: cfg.double_jump_time,
            fall_accel: -2.0 * cfg.fall_height / (cfg.fall_time * cfg.fall_time),
            charge_rate: cfg.charge_rate,
            charge_headroom: (cfg.charge_cap() - cfg.jump_height).max(0.0),
            // Half a tile: a non-indexed tile's edge is always more than
            // half a tile away (the neighbour window is center-based), so
            // this bound is what makes the index guarantee airtight.
            max_step: cfg.tile_size / 2.0,
        }
    }
}

/// The player core. Owns its float position; the committed pixel rect is
/// only derived at the end of each update.
#[derive(Debug)]
pub struct KinematicBody {
    pos: Vec2,
    size: Vec2,
    pixel_rect: Rect,

    u: f32,
    facing: Facing,
    h_mode: HorizontalMode,

    u_v: f32,
    a_v: f32,
    v_mode: VerticalMode,
    jump_power: f32,
    double_jump_used: bool,
    /// Whether the last vertical motion pointed down; drives commit rounding.
    descending: bool,

    k: Kinematics,
}

impl KinematicBody {
    /// Places the body with its bottom edge flush with the top of the spawn
    /// cell. The config must already be validated.
    pub fn new(cfg: &CoreConfig, spawn_cell_top_left: Vec2, size: Vec2) -> Self {
        let k = Kinematics::from_config(cfg);
        let pos = Vec2::new(spawn_cell_top_left.x, spawn_cell_top_left.y - size.y);
        Self {
            pos,
            size,
            pixel_rect: Rect::from_pos_size(pos, size),
            u: 0.0,
            facing: Facing::Right,
            h_mode: HorizontalMode::Idle,
            u_v: 0.0,
            a_v: k.fall_accel,
            v_mode: VerticalMode::Falling,
            jump_power: 0.0,
            double_jump_used: false,
            descending: true,
            k,
        }
    }

    /// Advances the body by one frame: horizontal machine, vertical
    /// machine, then the pixel commit.
    pub fn update(
        &mut self,
        dt: f32,
        input: &ActionState,
        grid: &TileGrid,
        index: &NeighbourIndex,
    ) {
        self.update_horizontal(dt, input, grid, index);
        self.update_vertical(dt, input, grid, index);
        self.commit_pixels(grid);
    }

    // ------------------------------
    // Horizontal sub-machine
    // ------------------------------

    fn update_horizontal(
        &mut self,
        dt: f32,
        input: &ActionState,
        grid: &TileGrid,
        index: &NeighbourIndex,
    ) {
        let left = input.is_down(Action::MoveLeft);
        let right = input.is_down(Action::MoveRight);
        let want = match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };

        if want != 0.0 {
            if self.u == 0.0 {
                self.facing = if want < 0.0 { Facing::Left } else { Facing::Right };
                self.h_mode = HorizontalMode::Accelerating;
            } else if want == self.facing.sign() {
                self.h_mode = HorizontalMode::Accelerating;
            } else {
                // Reversal: decelerate to a stop before turning around.
                self.h_mode = HorizontalMode::Decelerating;
            }
        } else if self.u > 0.0 {
            self.h_mode = HorizontalMode::Decelerating;
        } else {
            self.h_mode = HorizontalMode::Idle;
        }

        let a = match self.h_mode {
            HorizontalMode::Accelerating => self.k.a_accel,
            HorizontalMode::Decelerating => -self.k.a_decel,
            HorizontalMode::Idle => 0.0,
        };

        // A frame that decelerates through zero must not move backwards.
        let s = (self.u * dt + 0.5 * a * dt * dt).max(0.0);
        let dx = self.facing.sign() * self.bound_step(s);

        let allowed = collision::resolve(Axis::X, dx, &self.rect(), index, grid);
        self.pos.x += allowed;
        self.pos.x = self.pos.x.clamp(0.0, (grid.pixel_width() - self.size.x).max(0.0));

        self.u = (self.u + a * dt).clamp(0.0, self.k.v_max);
        if self.u == 0.0 && self.h_mode == HorizontalMode::Decelerating {
            self.h_mode = HorizontalMode::Idle;
        }
    }

    // ------------------------------
    // Vertical sub-machine
    // ------------------------------

    fn update_vertical(
        &mut self,
        dt: f32,
        input: &ActionState,
        grid: &TileGrid,
        index: &NeighbourIndex,
    ) {
        if matches!(
            self.v_mode,
            VerticalMode::Grounded | VerticalMode::ChargingPowerJump
        ) {
            if self.supported(grid) {
                self.update_grounded(dt, input);
                return;
            }
            // Walked off a ledge; gravity takes over this same frame.
            // No launch happened, so the air jump is off the table too.
            self.double_jump_used = true;
            self.enter_falling();
        }
        self.update_airborne(dt, input, grid, index);
    }

    fn update_grounded(&mut self, dt: f32, input: &ActionState) {
        if input.is_pressed(Action::Jump) {
            self.jump_power = 0.0;
            self.launch(self.k.jump_height, self.k.jump_time);
            self.set_vertical_mode(VerticalMode::Jumping);
        } else if input.is_down(Action::ChargeJump) {
            self.set_vertical_mode(VerticalMode::ChargingPowerJump);
            self.jump_power =
                (self.jump_power + self.k.charge_rate * dt).min(self.k.charge_headroom);
        } else if self.v_mode == VerticalMode::ChargingPowerJump {
            // Charge released: launch with the accumulated height.
            let height = self.k.jump_height + self.jump_power;
            self.jump_power = 0.0;
            self.launch(height, self.k.jump_time);
            self.set_vertical_mode(VerticalMode::Jumping);
        }
    }

    fn update_airborne(
        &mut self,
        dt: f32,
        input: &ActionState,
        grid: &TileGrid,
        index: &NeighbourIndex,
    ) {
        if input.is_pressed(Action::Jump)
            && !self.double_jump_used
            && self.v_mode != VerticalMode::DoubleJumping
        {
            self.double_jump_used = true;
            self.launch(self.k.double_jump_height, self.k.double_jump_time);
            self.set_vertical_mode(VerticalMode::DoubleJumping);
        }

        // Up-positive suvat displacement, negated into screen space.
        let s_up = self.u_v * dt + 0.5 * self.a_v * dt * dt;
        let bounded = self.bound_step(s_up.abs());
        let dy = if s_up > 0.0 { -bounded } else { bounded };
        self.descending = dy >= 0.0;

        let allowed = collision::resolve(Axis::Y, dy, &self.rect(), index, grid);
        self.pos.y += allowed;

        if dy < 0.0 && allowed > dy + FLUSH_EPS {
            // Head bump: the peak is forced early so gravity takes over
            // immediately instead of waiting for u_v to decay.
            log::debug!("head bump at y={:.1}", self.pos.y);
            self.enter_falling();
            self.descending = true;
            return;
        }

        self.u_v += self.a_v * dt;

        if dy >= 0.0 {
            if let Some(tile) = grid.closest_ground(&self.rect()) {
                if tile.rect().top() - self.rect().bottom() <= FLUSH_EPS {
                    // Snap the feet exactly onto the tile before landing.
                    self.pos.y = tile.rect().top() - self.size.y;
                    self.land();
                }
            }
        }
    }

    fn launch(&mut self, height: f32, time: f32) {
        self.u_v = 2.0 * height / time;
        self.a_v = -2.0 * height / (time * time);
        self.descending = false;
    }

    fn enter_falling(&mut self) {
        // An interrupted charge is forfeit, power never survives a fall.
        self.jump_power = 0.0;
        self.u_v = 0.0;
        self.a_v = self.k.fall_accel;
        self.set_vertical_mode(VerticalMode::Falling);
    }

    fn land(&mut self) {
        self.jump_power = 0.0;
        self.double_jump_used = false;
        // Base jump parameters restored for the next launch.
        self.u_v = 2.0 * self.k.jump_height / self.k.jump_time;
        self.a_v = -2.0 * self.k.jump_height / (self.k.jump_time * self.k.jump_time);
        self.set_vertical_mode(VerticalMode::Grounded);
    }

    fn set_vertical_mode(&mut self, mode: VerticalMode) {
        if self.v_mode != mode {
            log::debug!("vertical mode {:?} -> {:?}", self.v_mode, mode);
            self.v_mode = mode;
        }
    }

    /// True when the closest ground tile is flush under the feet.
    fn supported(&self, grid: &TileGrid) -> bool {
        grid.closest_ground(&self.rect())
            .is_some_and(|t| t.rect().top() - self.rect().bottom() <= FLUSH_EPS)
    }

    /// Bounds a displacement magnitude to half a tile per frame. An
    /// extreme `dt` spike degrades to slower motion instead of tunnelling.
    fn bound_step(&self, magnitude: f32) -> f32 {
        if magnitude > self.k.max_step {
            log::warn!(
                "displacement {:.1}px clamped to {:.1}px (dt spike?)",
                magnitude,
                self.k.max_step
            );
            self.k.max_step
        } else {
            magnitude
        }
    }

    // ------------------------------
    // Pixel commit
    // ------------------------------

    /// Rounds the float position into the on-screen rect. Moving down with
    /// a ground tile in reach, truncate if that still clears the tile and
    /// snap the feet onto it otherwise; moving up, round to nearest. Keeps
    /// float accumulation from ever drawing the body inside a tile.
    fn commit_pixels(&mut self, grid: &TileGrid) {
        let px = self.pos.x.round();
        let py = if self.descending {
            match grid.closest_ground(&self.rect()) {
                Some(tile) => {
                    let trunc = self.pos.y.trunc();
                    if trunc + self.size.y <= tile.rect().top() {
                        trunc
                    } else {
                        tile.rect().top() - self.size.y
                    }
                }
                None => self.pos.y.round(),
            }
        } else {
            self.pos.y.round()
        };
        self.pixel_rect = Rect::new(px, py, self.size.x, self.size.y);
    }

    // ------------------------------
    // Accessors
    // ------------------------------

    /// The body's float-precision bounding box (physics source of truth).
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// The committed on-screen rect for this frame.
    pub fn pixel_rect(&self) -> &Rect {
        &self.pixel_rect
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Current horizontal speed magnitude (px/s).
    pub fn horizontal_speed(&self) -> f32 {
        self.u
    }

    /// Current vertical velocity, up-positive (px/s).
    pub fn vertical_velocity(&self) -> f32 {
        self.u_v
    }

    pub fn horizontal_mode(&self) -> HorizontalMode {
        self.h_mode
    }

    pub fn vertical_mode(&self) -> VerticalMode {
        self.v_mode
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Accumulated charge height; nonzero only while charging.
    pub fn jump_power(&self) -> f32 {
        self.jump_power
    }
}
