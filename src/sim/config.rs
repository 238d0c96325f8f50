//! Simulation configuration
//!
//! Fixed at construction; a running episode never sees a different config.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a [`Config`] is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must be less than zero, got {value}")]
    NotNegative { field: &'static str, value: f32 },

    #[error("`{min_field}` ({min}) must not exceed `{max_field}` ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{what} ({size}) does not fit in the {available} pixels available")]
    DoesNotFit {
        what: &'static str,
        size: f32,
        available: f32,
    },

    #[error("`max_frame_dt` must not exceed {limit}, got {value}")]
    FrameOutOfRange { value: f32, limit: f32 },

    #[error("`max_step_dt` must be in [{min}, {limit}], got {value}")]
    StepOutOfRange { value: f32, min: f32, limit: f32 },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Gameplay tuning and playfield geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds to survive for a win
    pub survival_seconds: f32,
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Velocity set by a jump (negative = up)
    pub jump_velocity: f32,
    /// Leftward obstacle speed (pixels/s)
    pub obstacle_speed: f32,
    pub spawn_interval_min: f32,
    pub spawn_interval_max: f32,
    pub obstacle_width_min: f32,
    pub obstacle_width_max: f32,
    pub obstacle_height_min: f32,
    pub obstacle_height_max: f32,
    pub field_width: f32,
    pub field_height: f32,
    /// Height of the ground strip at the bottom of the field
    pub ground_height: f32,
    pub character_x: f32,
    pub character_width: f32,
    pub character_height: f32,
    /// Frames longer than this are truncated
    pub max_frame_dt: f32,
    /// Frames are split into sub-steps no longer than this
    pub max_step_dt: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            survival_seconds: SURVIVAL_SECONDS,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            obstacle_speed: OBSTACLE_SPEED,
            spawn_interval_min: SPAWN_INTERVAL_MIN,
            spawn_interval_max: SPAWN_INTERVAL_MAX,
            obstacle_width_min: OBSTACLE_WIDTH_MIN,
            obstacle_width_max: OBSTACLE_WIDTH_MAX,
            obstacle_height_min: OBSTACLE_HEIGHT_MIN,
            obstacle_height_max: OBSTACLE_HEIGHT_MAX,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            character_x: CHARACTER_X,
            character_width: CHARACTER_WIDTH,
            character_height: CHARACTER_HEIGHT,
            max_frame_dt: MAX_FRAME_DT,
            max_step_dt: MAX_STEP_DT,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON override on top of the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Y coordinate of the ground line
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.field_height - self.ground_height
    }

    /// Check every field; the first violation wins
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("survival_seconds", self.survival_seconds),
            ("gravity", self.gravity),
            ("jump_velocity", self.jump_velocity),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_interval_min", self.spawn_interval_min),
            ("spawn_interval_max", self.spawn_interval_max),
            ("obstacle_width_min", self.obstacle_width_min),
            ("obstacle_width_max", self.obstacle_width_max),
            ("obstacle_height_min", self.obstacle_height_min),
            ("obstacle_height_max", self.obstacle_height_max),
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("ground_height", self.ground_height),
            ("character_x", self.character_x),
            ("character_width", self.character_width),
            ("character_height", self.character_height),
            ("max_frame_dt", self.max_frame_dt),
            ("max_step_dt", self.max_step_dt),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        let positive = [
            ("survival_seconds", self.survival_seconds),
            ("gravity", self.gravity),
            ("obstacle_speed", self.obstacle_speed),
            ("spawn_interval_min", self.spawn_interval_min),
            ("obstacle_width_min", self.obstacle_width_min),
            ("obstacle_height_min", self.obstacle_height_min),
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("character_width", self.character_width),
            ("character_height", self.character_height),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::NotNegative {
                field: "jump_velocity",
                value: self.jump_velocity,
            });
        }

        let ranges = [
            (
                ("spawn_interval_min", self.spawn_interval_min),
                ("spawn_interval_max", self.spawn_interval_max),
            ),
            (
                ("obstacle_width_min", self.obstacle_width_min),
                ("obstacle_width_max", self.obstacle_width_max),
            ),
            (
                ("obstacle_height_min", self.obstacle_height_min),
                ("obstacle_height_max", self.obstacle_height_max),
            ),
        ];
        for ((min_field, min), (max_field, max)) in ranges {
            if min > max {
                return Err(ConfigError::InvertedRange {
                    min_field,
                    max_field,
                    min,
                    max,
                });
            }
        }

        if self.max_frame_dt > FRAME_DT_LIMIT {
            return Err(ConfigError::FrameOutOfRange {
                value: self.max_frame_dt,
                limit: FRAME_DT_LIMIT,
            });
        }
        if self.max_step_dt < STEP_DT_MIN || self.max_step_dt > STEP_DT_LIMIT {
            return Err(ConfigError::StepOutOfRange {
                value: self.max_step_dt,
                min: STEP_DT_MIN,
                limit: STEP_DT_LIMIT,
            });
        }

        if self.ground_height < 0.0 || self.ground_height >= self.field_height {
            return Err(ConfigError::DoesNotFit {
                what: "ground_height",
                size: self.ground_height,
                available: self.field_height,
            });
        }
        let floor_y = self.floor_y();
        if self.character_height > floor_y {
            return Err(ConfigError::DoesNotFit {
                what: "character_height",
                size: self.character_height,
                available: floor_y,
            });
        }
        if self.obstacle_height_max > floor_y {
            return Err(ConfigError::DoesNotFit {
                what: "obstacle_height_max",
                size: self.obstacle_height_max,
                available: floor_y,
            });
        }
        if self.character_x < 0.0 || self.character_x + self.character_width > self.field_width {
            return Err(ConfigError::DoesNotFit {
                what: "character",
                size: self.character_x + self.character_width,
                available: self.field_width,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.floor_y(), 470.0);
    }

    #[test]
    fn test_inverted_spawn_interval_rejected() {
        let config = Config {
            spawn_interval_min: 3.0,
            spawn_interval_max: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange {
                min_field: "spawn_interval_min",
                ..
            })
        ));
    }

    #[test]
    fn test_negative_dimensions_rejected() {
        let config = Config {
            character_width: -10.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "character_width",
                ..
            })
        ));

        let config = Config {
            obstacle_height_min: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_upward_gravity_jump_rejected() {
        let config = Config {
            jump_velocity: 750.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotNegative { .. })
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let config = Config {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "gravity", .. })
        ));
    }

    #[test]
    fn test_step_limit() {
        let config = Config {
            max_step_dt: 0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StepOutOfRange { .. })
        ));

        let config = Config {
            max_step_dt: 1e-6,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StepOutOfRange { .. })
        ));

        for max_step_dt in [STEP_DT_MIN, STEP_DT_LIMIT] {
            let config = Config {
                max_step_dt,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_frame_limit() {
        assert!(matches!(
            Config::from_json(r#"{ "max_frame_dt": 1e9 }"#),
            Err(ConfigError::FrameOutOfRange { .. })
        ));

        let config = Config {
            max_frame_dt: FRAME_DT_LIMIT,
            max_step_dt: STEP_DT_MIN,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert!((config.max_frame_dt / config.max_step_dt).ceil() as u32 <= MAX_SUBSTEPS);
    }

    #[test]
    fn test_obstacles_must_fit_above_ground() {
        let config = Config {
            field_height: 200.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DoesNotFit { .. })
        ));
    }

    #[test]
    fn test_from_json_partial_override() {
        let config = Config::from_json(r#"{ "survival_seconds": 30.0, "obstacle_speed": 400 }"#)
            .unwrap();
        assert_eq!(config.survival_seconds, 30.0);
        assert_eq!(config.obstacle_speed, 400.0);
        assert_eq!(config.gravity, GRAVITY);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            Config::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{ "spawn_interval_min": 5.0 }"#),
            Err(ConfigError::InvertedRange { .. })
        ));
    }
}
