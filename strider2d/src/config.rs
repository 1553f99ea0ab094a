use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::VerticalFollow;

/// Raised when a `CoreConfig` carries values the kinematic equations cannot
/// work with (zero or negative times, sizes, heights).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{name}` must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("`{name}` must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Configuration values shared by every component of the core.
///
/// All lengths are in pixels, all times in seconds. Jump and fall
/// trajectories are described by a desired peak height and time-to-peak;
/// the body derives launch velocity and acceleration from those via the
/// constant-acceleration identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Side length of a square world tile.
    pub tile_size: f32,
    /// Visible playfield width, used by the camera.
    pub viewport_width: f32,
    /// Visible playfield height, used by the camera.
    pub viewport_height: f32,

    /// Top horizontal speed (px/s).
    pub max_speed: f32,
    /// Time to accelerate from rest to `max_speed`.
    pub accel_time: f32,
    /// Time to decelerate from `max_speed` to rest.
    pub decel_time: f32,

    /// Peak height of an uncharged jump.
    pub jump_height: f32,
    /// Time to reach that peak.
    pub jump_time: f32,
    /// Peak height of the double jump.
    pub double_jump_height: f32,
    /// Time to reach the double-jump peak.
    pub double_jump_time: f32,
    /// Reference drop used to derive the falling acceleration.
    pub fall_height: f32,
    /// Time to fall through `fall_height` from rest.
    pub fall_time: f32,

    /// Charge accumulated per second while holding the charge key (px/s).
    pub charge_rate: f32,
    /// Total jump height cap while charged, in tile-size units.
    pub max_charge_tiles: f32,

    /// Whether the camera tracks the player vertically.
    pub camera_vertical: VerticalFollow,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            viewport_width: 800.0,
            viewport_height: 450.0,

            max_speed: 200.0,
            accel_time: 0.5,
            decel_time: 0.3,

            jump_height: 64.0,
            jump_time: 0.35,
            double_jump_height: 48.0,
            double_jump_time: 0.3,
            fall_height: 64.0,
            fall_time: 0.35,

            charge_rate: 112.0,
            max_charge_tiles: 5.5,

            camera_vertical: VerticalFollow::Fixed,
        }
    }
}

impl CoreConfig {
    /// Checks every parameter the kinematic derivations divide by.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("tile_size", self.tile_size),
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("max_speed", self.max_speed),
            ("accel_time", self.accel_time),
            ("decel_time", self.decel_time),
            ("jump_height", self.jump_height),
            ("jump_time", self.jump_time),
            ("double_jump_height", self.double_jump_height),
            ("double_jump_time", self.double_jump_time),
            ("fall_height", self.fall_height),
            ("fall_time", self.fall_time),
            ("max_charge_tiles", self.max_charge_tiles),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.charge_rate < 0.0 {
            return Err(ConfigError::Negative {
                name: "charge_rate",
                value: self.charge_rate,
            });
        }
        Ok(())
    }

    /// Highest total jump height a charged launch may reach, in pixels.
    pub fn charge_cap(&self) -> f32 {
        self.max_charge_tiles * self.tile_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(CoreConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_time_to_peak_is_rejected() {
        let cfg = CoreConfig {
            jump_time: 0.0,
            ..CoreConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { name: "jump_time", .. }));
    }

    #[test]
    fn negative_charge_rate_is_rejected() {
        let cfg = CoreConfig {
            charge_rate: -1.0,
            ..CoreConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn charge_cap_is_in_tile_units() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.charge_cap(), 5.5 * 32.0);
    }
}
