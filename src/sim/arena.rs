//! Static arena geometry
//!
//! The long axis is X (goals at both ends), paddles slide along Z between two
//! fixed side walls. Everything here is derived once from [`GameConfig`] and
//! never mutated afterwards.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::{Collider, SurfaceId};
use crate::config::GameConfig;

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Defends the -X end
    One,
    /// Defends the +X end
    Two,
}

impl Player {
    pub const BOTH: [Player; 2] = [Player::One, Player::Two];

    /// Slot index for per-player arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

/// A fixed side wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: SurfaceId,
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Wall {
    pub fn collider(&self) -> Collider {
        Collider {
            id: self.id,
            center: self.center,
            half_extents: self.half_extents,
        }
    }
}

/// Arena model: paddle travel limits, walls and goal lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub walls: [Wall; 2],
    /// Highest paddle center Z
    pub upper_limit: f32,
    /// Lowest paddle center Z
    pub lower_limit: f32,
    /// |X| at or beyond which the ball is a goal
    pub goal_threshold: f32,
    /// |X| of both paddle centers
    pub paddle_offset_x: f32,
    pub paddle_half_extents: Vec3,
}

impl Arena {
    pub fn from_config(config: &GameConfig) -> Self {
        let wall_half = Vec3::new(
            config.wall_half_length,
            config.ball_radius,
            config.wall_half_thickness,
        );
        let walls = [
            Wall {
                id: SurfaceId::WallTop,
                center: Vec3::new(0.0, 0.0, config.wall_offset_z),
                half_extents: wall_half,
            },
            Wall {
                id: SurfaceId::WallBottom,
                center: Vec3::new(0.0, 0.0, -config.wall_offset_z),
                half_extents: wall_half,
            },
        ];

        let upper_limit =
            config.wall_offset_z - config.wall_half_thickness - config.paddle_half_depth;
        let lower_limit =
            -config.wall_offset_z + config.wall_half_thickness + config.paddle_half_depth;

        Self {
            walls,
            upper_limit,
            lower_limit,
            goal_threshold: config.goal_threshold,
            paddle_offset_x: config.paddle_offset_x,
            paddle_half_extents: Vec3::new(
                config.paddle_half_width,
                config.ball_radius,
                config.paddle_half_depth,
            ),
        }
    }

    /// Clamp a paddle center into its travel range
    pub fn clamp(&self, paddle_z: f32) -> f32 {
        if paddle_z.is_nan() {
            return self.neutral_z();
        }
        paddle_z.clamp(self.lower_limit, self.upper_limit)
    }

    /// Which player scores with the ball at this X, if any
    pub fn goal_side(&self, ball_x: f32) -> Option<Player> {
        if ball_x <= -self.goal_threshold {
            Some(Player::Two)
        } else if ball_x >= self.goal_threshold {
            Some(Player::One)
        } else {
            None
        }
    }

    /// Paddle rest position along Z
    #[inline]
    pub fn neutral_z(&self) -> f32 {
        (self.upper_limit + self.lower_limit) * 0.5
    }

    /// Fixed X of a player's paddle
    pub fn paddle_x(&self, player: Player) -> f32 {
        match player {
            Player::One => -self.paddle_offset_x,
            Player::Two => self.paddle_offset_x,
        }
    }
}
