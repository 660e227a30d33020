//! Arena dimensions and gameplay tuning
//!
//! Loaded from JSON at startup; any field missing from the file falls back to
//! the defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Ball ===
    pub ball_radius: f32,
    /// Serve speed per axis; each sign is randomized on serve
    pub serve_speed: Vec2,

    // === Paddles ===
    /// Distance of each paddle from the arena center along X
    pub paddle_offset_x: f32,
    /// Half extent along the paddle's free axis (Z)
    pub paddle_half_depth: f32,
    /// Half extent along X
    pub paddle_half_width: f32,
    /// Travel per nominal frame while held
    pub paddle_speed: f32,

    // === Walls ===
    pub wall_offset_z: f32,
    pub wall_half_thickness: f32,
    pub wall_half_length: f32,

    // === Rules ===
    pub goal_threshold: f32,
    pub boost_multiplier: f32,
    pub trail_saturation_level: u32,
    pub scoring_delay_ms: f64,

    // === Timing ===
    pub nominal_frame_ms: f32,
    pub max_frame_ms: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ball_radius: BALL_RADIUS,
            serve_speed: Vec2::new(SERVE_SPEED_X, SERVE_SPEED_Z),

            paddle_offset_x: PADDLE_OFFSET_X,
            paddle_half_depth: PADDLE_HALF_DEPTH,
            paddle_half_width: PADDLE_HALF_WIDTH,
            paddle_speed: PADDLE_SPEED,

            wall_offset_z: WALL_OFFSET_Z,
            wall_half_thickness: WALL_HALF_THICKNESS,
            wall_half_length: WALL_HALF_LENGTH,

            goal_threshold: GOAL_THRESHOLD,
            boost_multiplier: BOOST_MULTIPLIER,
            trail_saturation_level: TRAIL_SATURATION_LEVEL,
            scoring_delay_ms: SCORING_DELAY_MS,

            nominal_frame_ms: NOMINAL_FRAME_MS,
            max_frame_ms: MAX_FRAME_MS,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the config to disk as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GameError> {
        std::fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    /// Check that the arena this config describes can actually be played
    pub fn validate(&self) -> Result<(), GameError> {
        let lengths = [
            ("ball_radius", self.ball_radius),
            ("paddle_offset_x", self.paddle_offset_x),
            ("paddle_half_depth", self.paddle_half_depth),
            ("paddle_half_width", self.paddle_half_width),
            ("paddle_speed", self.paddle_speed),
            ("wall_offset_z", self.wall_offset_z),
            ("wall_half_thickness", self.wall_half_thickness),
            ("wall_half_length", self.wall_half_length),
            ("goal_threshold", self.goal_threshold),
            ("nominal_frame_ms", self.nominal_frame_ms),
            ("max_frame_ms", self.max_frame_ms),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if !self.serve_speed.is_finite() || self.serve_speed.length_squared() == 0.0 {
            return Err(invalid(format!(
                "serve_speed must be a non-zero finite vector, got {}",
                self.serve_speed
            )));
        }

        let travel = self.wall_offset_z - self.wall_half_thickness - self.paddle_half_depth;
        if travel < 0.0 {
            return Err(invalid(format!(
                "paddles (half depth {}) do not fit between the walls",
                self.paddle_half_depth
            )));
        }

        if self.goal_threshold <= self.paddle_offset_x + self.paddle_half_width {
            return Err(invalid(format!(
                "goal_threshold {} must lie beyond the paddle line at {}",
                self.goal_threshold,
                self.paddle_offset_x + self.paddle_half_width
            )));
        }

        if self.goal_threshold >= self.wall_half_length {
            return Err(invalid(format!(
                "goal_threshold {} must lie inside the walls (half length {})",
                self.goal_threshold, self.wall_half_length
            )));
        }

        if !self.boost_multiplier.is_finite() || self.boost_multiplier < 1.0 {
            return Err(invalid(format!(
                "boost_multiplier must be >= 1, got {}",
                self.boost_multiplier
            )));
        }

        if !self.scoring_delay_ms.is_finite() || self.scoring_delay_ms < 0.0 {
            return Err(invalid(format!(
                "scoring_delay_ms must be non-negative, got {}",
                self.scoring_delay_ms
            )));
        }

        Ok(())
    }
}

fn invalid(msg: String) -> GameError {
    GameError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config = GameConfig::from_json(r#"{ "goal_threshold": 9.0 }"#).unwrap();
        assert_eq!(config.goal_threshold, 9.0);
        assert_eq!(config.ball_radius, BALL_RADIUS);
        assert_eq!(config.serve_speed, Vec2::new(SERVE_SPEED_X, SERVE_SPEED_Z));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig {
            scoring_delay_ms: 250.0,
            ..Default::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_goal_inside_paddle_line() {
        let config = GameConfig {
            goal_threshold: 6.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_paddle_taller_than_arena() {
        let config = GameConfig {
            paddle_half_depth: 5.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_shrinking_boost() {
        let config = GameConfig {
            boost_multiplier: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(GameError::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        assert!(matches!(
            GameConfig::load("/definitely/not/here/arena.json"),
            Err(GameError::Io(_))
        ));
    }
}
