//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one [`SimulationState`].

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena::{Arena, Player};
use super::boost::BoostState;
use super::geometry::{Collider, SurfaceId};
use super::schedule::DeferredSlot;
use super::score::Score;
use crate::config::GameConfig;

/// Round life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    /// Ball centered, waiting for a serve
    AwaitingServe,
    /// Active rally
    Playing,
    /// Rally frozen until the next pause toggle
    Paused,
    /// Goal scored; input locked until the deferred reset runs
    Scoring,
}

/// The ball. Moves in the X/Z plane; `pos.y` never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    /// Planar velocity `(x, z)` in units per nominal frame
    pub vel: Vec2,
    pub radius: f32,
    pub visible: bool,
}

impl Ball {
    /// Hidden on the center spot until served
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec3::ZERO,
            vel: Vec2::ZERO,
            radius,
            visible: false,
        }
    }

    /// Planar position `(x, z)`
    #[inline]
    pub fn plane_pos(&self) -> Vec2 {
        crate::to_plane(self.pos)
    }

    /// Put the ball back on the center spot, at rest
    pub fn center(&mut self) {
        self.pos = Vec3::new(0.0, self.pos.y, 0.0);
        self.vel = Vec2::ZERO;
    }

    /// Serve from the center: fixed speed per axis, each sign a coin flip
    pub fn serve<R: Rng + ?Sized>(&mut self, speed: Vec2, rng: &mut R) {
        let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sz = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.center();
        self.vel = Vec2::new(speed.x.abs() * sx, speed.y.abs() * sz);
        self.visible = true;
    }
}

/// A player's paddle, fixed on X and sliding along Z
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub id: Player,
    pub x: f32,
    pub z: f32,
    pub half_extents: Vec3,
}

impl Paddle {
    pub fn new(id: Player, arena: &Arena) -> Self {
        Self {
            id,
            x: arena.paddle_x(id),
            z: arena.neutral_z(),
            half_extents: arena.paddle_half_extents,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, 0.0, self.z)
    }

    /// Slide by `delta` along Z, then clamp to the arena
    pub fn slide(&mut self, delta: f32, arena: &Arena) {
        self.z = arena.clamp(self.z + delta);
    }

    pub fn collider(&self) -> Collider {
        Collider {
            id: SurfaceId::Paddle(self.id),
            center: self.position(),
            half_extents: self.half_extents,
        }
    }
}

/// Discrete input signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    Paddle1Up,
    Paddle1Down,
    Paddle2Up,
    Paddle2Down,
    Boost1Press,
    Boost1Release,
    Boost2Press,
    Boost2Release,
    PauseToggle,
    Serve,
}

impl InputEvent {
    /// Paddle owner and direction (+1 up, -1 down) for movement events
    pub fn paddle_move(self) -> Option<(Player, f32)> {
        match self {
            InputEvent::Paddle1Up => Some((Player::One, 1.0)),
            InputEvent::Paddle1Down => Some((Player::One, -1.0)),
            InputEvent::Paddle2Up => Some((Player::Two, 1.0)),
            InputEvent::Paddle2Down => Some((Player::Two, -1.0)),
            _ => None,
        }
    }

    /// Player and new key state for boost events
    pub fn boost_change(self) -> Option<(Player, bool)> {
        match self {
            InputEvent::Boost1Press => Some((Player::One, true)),
            InputEvent::Boost1Release => Some((Player::One, false)),
            InputEvent::Boost2Press => Some((Player::Two, true)),
            InputEvent::Boost2Release => Some((Player::Two, false)),
            _ => None,
        }
    }
}

/// Input observed during one frame
///
/// Movement events mean the key was held this frame; the paddle travels
/// `paddle_speed` per nominal frame for each one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn contains(&self, event: InputEvent) -> bool {
        self.events.contains(&event)
    }
}

/// Notifications for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    BallMoved {
        position: Vec3,
    },
    SurfaceHit {
        position: Vec3,
        surface: SurfaceId,
        boost_level: u32,
    },
    RoundScored {
        player: Player,
        score: u32,
    },
    StateChanged {
        state: RoundState,
    },
}

/// Ball exit snapshot recorded when a goal is scored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalExit {
    pub player: Player,
    pub position: Vec3,
    /// Velocity before that tick's collision resolution
    pub velocity: Vec2,
}

/// Complete simulation state, owned by one [`super::Game`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    pub config: GameConfig,
    pub arena: Arena,
    pub phase: RoundState,
    pub ball: Ball,
    /// Indexed by [`Player::index`]
    pub paddles: [Paddle; 2],
    pub boost: BoostState,
    pub score: Score,
    /// True for the whole Scoring state
    pub input_locked: bool,
    /// Simulation clock (sum of clamped frame deltas)
    pub clock_ms: f64,
    /// Ticks processed
    pub time_ticks: u64,
    /// Scoring-to-serve reset
    pub deferred: DeferredSlot,
    /// Where and how fast the ball left the arena on the last goal
    pub last_goal: Option<GoalExit>,
}

impl SimulationState {
    pub fn new(config: GameConfig) -> Self {
        let arena = Arena::from_config(&config);
        let paddles = [
            Paddle::new(Player::One, &arena),
            Paddle::new(Player::Two, &arena),
        ];
        Self {
            ball: Ball::new(config.ball_radius),
            config,
            arena,
            phase: RoundState::AwaitingServe,
            paddles,
            boost: BoostState::new(),
            score: Score::new(),
            input_locked: false,
            clock_ms: 0.0,
            time_ticks: 0,
            deferred: DeferredSlot::new(),
            last_goal: None,
        }
    }

    #[inline]
    pub fn paddle(&self, player: Player) -> &Paddle {
        &self.paddles[player.index()]
    }

    #[inline]
    pub fn paddle_mut(&mut self, player: Player) -> &mut Paddle {
        &mut self.paddles[player.index()]
    }

    /// Both paddles back to the neutral position
    pub fn recenter_paddles(&mut self) {
        let neutral = self.arena.neutral_z();
        for paddle in &mut self.paddles {
            paddle.z = neutral;
        }
    }

    /// Surfaces the ball can bounce off this tick
    pub fn colliders(&self) -> [Collider; 4] {
        [
            self.paddles[0].collider(),
            self.paddles[1].collider(),
            self.arena.walls[0].collider(),
            self.arena.walls[1].collider(),
        ]
    }

    /// Presentation-only trail strength in `[0, 1]`
    pub fn trail_intensity(&self) -> f32 {
        self.boost.trail_intensity(self.config.trail_saturation_level)
    }
}
