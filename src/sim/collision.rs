//! Ball kinematics and collision response
//!
//! Each tick the ball's displacement is swept against the paddles and walls.
//! On a hit the ball advances to the contact point, reflects, and spends the
//! rest of the displacement along the new direction.
//!
//! Exactly one bounce is resolved per tick. The leftover travel after a
//! reflection is not swept again, so a very fast ball can clip a second
//! surface within the same tick. This is a known, accepted limitation.

use glam::Vec2;

use super::boost::BoostState;
use super::geometry::{Collider, SurfaceId, SweepHit, SweepQuery};
use super::state::Ball;
use crate::{to_plane, to_world};

/// Tolerance when checking that a collaborator's normal is unit length
const NORMAL_TOLERANCE: f32 = 1e-3;

/// A resolved bounce, reported to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ball center at the moment of contact
    pub position: glam::Vec3,
    pub surface: SurfaceId,
    /// Boost level after this hit was counted
    pub boost_level: u32,
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Turn a raw sweep result into `(distance, planar normal, surface)`
///
/// Rejects misses, out-of-range distances and normals that are not unit
/// length within the motion plane.
fn accept_hit(hit: &SweepHit, max_distance: f32) -> Option<(f32, Vec2, SurfaceId)> {
    if !hit.hit {
        return None;
    }
    let surface = hit.surface?;

    if !hit.distance.is_finite() || hit.distance < 0.0 || hit.distance > max_distance {
        log::trace!(
            "Ignoring hit on {:?} at {} (range {})",
            surface,
            hit.distance,
            max_distance
        );
        return None;
    }

    let planar = to_plane(hit.normal);
    let unit = (hit.normal.length() - 1.0).abs() <= NORMAL_TOLERANCE;
    let in_plane = planar.length() >= 1.0 - NORMAL_TOLERANCE;
    if !unit || !in_plane {
        log::trace!("Ignoring degenerate normal {} on {:?}", hit.normal, surface);
        return None;
    }

    Some((hit.distance, planar.normalize(), surface))
}

/// Advance the ball by one tick of `step_scale` nominal frames
///
/// Returns the bounce if one happened. A zero displacement leaves the ball
/// untouched.
pub fn resolve_step<Q: SweepQuery + ?Sized>(
    ball: &mut Ball,
    step_scale: f32,
    colliders: &[Collider],
    query: &Q,
    boost: &mut BoostState,
    boost_multiplier: f32,
) -> Option<SurfaceHit> {
    let displacement = ball.vel * step_scale;
    let step_len = displacement.length();
    if !step_len.is_finite() || step_len <= 0.0 {
        return None;
    }

    let dir = displacement / step_len;
    let radius = query.bounding_radius(ball);
    let max_distance = step_len + radius;
    let origin = ball.pos;

    let raw = query.sweep(origin, to_world(dir), max_distance, colliders);
    let Some((distance, normal, surface)) = accept_hit(&raw, max_distance) else {
        ball.pos = origin + to_world(displacement);
        return None;
    };

    // Move up to the surface, never backwards through it
    let travel = (distance - radius).max(0.0);
    let contact = origin + to_world(dir * travel);

    let multiplier = boost.on_surface_hit(surface, boost_multiplier);
    ball.vel = reflect(ball.vel, normal) * multiplier;

    // Carry on the remaining distance along the new heading
    let remaining = (step_len - travel).max(0.0);
    ball.pos = contact + to_world(ball.vel.normalize_or_zero() * remaining);

    log::debug!(
        "Ball hit {:?} at {} (boost level {})",
        surface,
        contact,
        boost.level
    );

    Some(SurfaceHit {
        position: contact,
        surface,
        boost_level: boost.level,
    })
}
