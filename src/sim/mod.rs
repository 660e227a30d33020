//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame, scaled by the frame delta
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod arena;
pub mod boost;
pub mod collision;
pub mod game;
pub mod geometry;
pub mod schedule;
pub mod score;
pub mod state;
pub mod tick;

pub use arena::{Arena, Player, Wall};
pub use boost::BoostState;
pub use collision::{SurfaceHit, reflect, resolve_step};
pub use game::Game;
pub use geometry::{BoxSweep, Collider, SurfaceId, SweepHit, SweepQuery};
pub use schedule::{DeferredAction, DeferredSlot};
pub use score::Score;
pub use state::{
    Ball, GameEvent, GoalExit, InputEvent, Paddle, RoundState, SimulationState, TickInput,
};
pub use tick::{complete_deferred, tick};
