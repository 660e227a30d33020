//! Sweep queries against the collidable surfaces
//!
//! The collision resolver never inspects shapes directly. It asks a
//! [`SweepQuery`] for the nearest surface along a ray, which lets a renderer's
//! picking system stand in for the built-in [`BoxSweep`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::arena::Player;
use super::state::Ball;

/// Identifies a collidable surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceId {
    Paddle(Player),
    WallTop,
    WallBottom,
}

impl SurfaceId {
    /// Owning player if this surface is a paddle
    pub fn paddle_owner(self) -> Option<Player> {
        match self {
            SurfaceId::Paddle(player) => Some(player),
            _ => None,
        }
    }
}

/// Axis-aligned box handed to a sweep query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub id: SurfaceId,
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Collider {
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }
}

/// Result of a sweep query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub hit: bool,
    /// Distance from the ray origin to the surface
    pub distance: f32,
    /// Surface normal, pointing away from the surface toward the ray origin
    pub normal: Vec3,
    pub surface: Option<SurfaceId>,
}

impl SweepHit {
    pub fn miss() -> Self {
        Self {
            hit: false,
            distance: f32::MAX,
            normal: Vec3::ZERO,
            surface: None,
        }
    }
}

/// Geometry collaborator consumed by the collision resolver
pub trait SweepQuery {
    /// Nearest intersection of the ray `origin + direction * t`, `0 <= t <= max_distance`,
    /// with any of `candidates`
    fn sweep(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        candidates: &[Collider],
    ) -> SweepHit;

    /// Radius of the sphere bounding the ball
    fn bounding_radius(&self, ball: &Ball) -> f32 {
        ball.radius
    }
}

/// Ray vs axis-aligned box sweeper (slab method)
///
/// A ray starting inside a box does not hit that box.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxSweep;

/// Directions shorter than this on an axis are treated as parallel to its slabs
const PARALLEL_EPS: f32 = 1e-8;

impl SweepQuery for BoxSweep {
    fn sweep(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        candidates: &[Collider],
    ) -> SweepHit {
        let mut best = SweepHit::miss();
        for collider in candidates {
            if let Some((distance, normal)) = ray_box(origin, direction, collider) {
                if distance <= max_distance && distance < best.distance {
                    best = SweepHit {
                        hit: true,
                        distance,
                        normal,
                        surface: Some(collider.id),
                    };
                }
            }
        }
        best
    }
}

/// Entry distance and entry-face normal of a ray against a box
fn ray_box(origin: Vec3, direction: Vec3, collider: &Collider) -> Option<(f32, Vec3)> {
    let min = collider.min();
    let max = collider.max();

    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut normal = Vec3::ZERO;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];

        if d.abs() < PARALLEL_EPS {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (near, far) = {
            let t0 = (min[axis] - o) * inv;
            let t1 = (max[axis] - o) * inv;
            if t0 <= t1 { (t0, t1) } else { (t1, t0) }
        };

        if near > t_enter {
            t_enter = near;
            normal = Vec3::ZERO;
            normal[axis] = -d.signum();
        }
        t_exit = t_exit.min(far);

        if t_enter > t_exit {
            return None;
        }
    }

    // Behind the origin, or the origin is inside the box
    if t_enter < 0.0 || t_exit < 0.0 {
        return None;
    }

    Some((t_enter, normal))
}
