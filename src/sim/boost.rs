//! Paddle boosts
//!
//! Each paddle has a held/released boost key. A paddle hit while its key is
//! held speeds up that single reflection and raises the shared boost level.

use serde::{Deserialize, Serialize};

use super::arena::Player;
use super::geometry::SurfaceId;

/// Boost inputs and the shared boost level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostState {
    /// Boost key held, per player
    pub inputs: [bool; 2],
    /// Qualifying boosted hits since the last goal
    pub level: u32,
}

impl BoostState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, player: Player, held: bool) {
        self.inputs[player.index()] = held;
    }

    #[inline]
    pub fn is_active(&self, player: Player) -> bool {
        self.inputs[player.index()]
    }

    /// Register a hit on `surface` and return the multiplier for its reflection
    ///
    /// Only a paddle whose boost key is held qualifies; that bumps the level.
    pub fn on_surface_hit(&mut self, surface: SurfaceId, multiplier: f32) -> f32 {
        match surface.paddle_owner() {
            Some(player) if self.is_active(player) => {
                self.level = self.level.saturating_add(1);
                multiplier
            }
            _ => 1.0,
        }
    }

    /// Drop the level back to zero (goal scored)
    pub fn reset_level(&mut self) {
        self.level = 0;
    }

    /// Forget held keys (input locked)
    pub fn release_all(&mut self) {
        self.inputs = [false; 2];
    }

    /// Presentation-only trail strength in `[0, 1]`
    pub fn trail_intensity(&self, saturation_level: u32) -> f32 {
        if saturation_level == 0 {
            return if self.level > 0 { 1.0 } else { 0.0 };
        }
        (self.level as f32 / saturation_level as f32).min(1.0)
    }
}
