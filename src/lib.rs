//! Arena Pong - a two-player arena ball game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (collision resolution, boosts, round state machine)
//! - `config`: Data-driven arena dimensions and tuning
//! - `error`: Startup failures
//!
//! Rendering, audio and effects are external: they consume the [`sim::GameEvent`]
//! stream and read-only snapshots of [`sim::SimulationState`].

pub mod config;
pub mod error;
pub mod sim;

pub use config::GameConfig;
pub use error::GameError;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Nominal frame length the per-frame velocities are tuned for (60 Hz)
    pub const NOMINAL_FRAME_MS: f32 = 1000.0 / 60.0;
    /// Frame deltas above this are clamped to prevent large jumps
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 0.2;
    /// Serve speed along the long axis (units per nominal frame)
    pub const SERVE_SPEED_X: f32 = 0.07;
    /// Serve speed across the arena (units per nominal frame)
    pub const SERVE_SPEED_Z: f32 = 0.04;

    /// Paddle defaults - paddles sit on the long axis and slide along Z
    pub const PADDLE_OFFSET_X: f32 = 6.5;
    pub const PADDLE_HALF_DEPTH: f32 = 1.0;
    pub const PADDLE_HALF_WIDTH: f32 = 0.15;
    /// Paddle travel per nominal frame while a direction key is held
    pub const PADDLE_SPEED: f32 = 0.15;

    /// Side walls
    pub const WALL_OFFSET_Z: f32 = 4.8;
    pub const WALL_HALF_THICKNESS: f32 = 0.25;
    pub const WALL_HALF_LENGTH: f32 = 50.0;

    /// Distance along X beyond which the ball is a goal
    pub const GOAL_THRESHOLD: f32 = 8.0;

    /// Speed multiplier applied to a boosted paddle reflection
    pub const BOOST_MULTIPLIER: f32 = 1.25;
    /// Boost level at which the trail readout saturates
    pub const TRAIL_SATURATION_LEVEL: u32 = 5;

    /// Delay between a goal and the next serve becoming available
    pub const SCORING_DELAY_MS: f64 = 1500.0;
}

/// Lift a motion-plane vector `(x, z)` into world space (y = 0)
#[inline]
pub fn to_world(v: Vec2) -> Vec3 {
    Vec3::new(v.x, 0.0, v.y)
}

/// Project a world vector onto the motion plane, dropping Y
#[inline]
pub fn to_plane(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_round_trip_drops_height() {
        let world = Vec3::new(1.5, 3.0, -2.0);
        let plane = to_plane(world);
        assert_eq!(plane, Vec2::new(1.5, -2.0));
        assert_eq!(to_world(plane), Vec3::new(1.5, 0.0, -2.0));
    }
}
