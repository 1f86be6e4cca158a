//! Ground contact detection and touchdown classification
//!
//! Ground height comes from linear interpolation between terrain vertices, so
//! the collision surface is exactly the drawn polygon edge.

use glam::Vec2;

use super::state::{TerminalState, Vehicle};
use super::terrain::TerrainProfile;
use crate::tuning::{LandingLimits, Tuning};

/// Result of a ground contact check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the vehicle's feet reached the ground
    pub hit: bool,
    /// Interpolated ground height under the vehicle (if over terrain)
    pub ground: Option<f32>,
    /// How far the feet sank below the ground (0 when not hit)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss(ground: Option<f32>) -> Self {
        Self {
            hit: false,
            ground,
            penetration: 0.0,
        }
    }
}

/// Check whether a body at `pos` with the given half-height touches the ground.
///
/// Only the first segment (in increasing x) containing `pos.x` is considered.
pub fn ground_contact(pos: Vec2, half_height: f32, terrain: &TerrainProfile) -> CollisionResult {
    let Some(ground) = terrain.height_at(pos.x) else {
        return CollisionResult::miss(None);
    };

    let feet = pos.y + half_height;
    if feet >= ground {
        CollisionResult {
            hit: true,
            ground: Some(ground),
            penetration: feet - ground,
        }
    } else {
        CollisionResult::miss(Some(ground))
    }
}

/// Landed only if slow on both axes and nearly upright
pub fn classify(vehicle: &Vehicle, limits: &LandingLimits) -> TerminalState {
    if vehicle.vel.y.abs() < limits.max_vy
        && vehicle.vel.x.abs() < limits.max_vx
        && vehicle.angle.abs() < limits.max_angle
    {
        TerminalState::Landed
    } else {
        TerminalState::Crashed
    }
}

/// Resolve ground contact for one tick.
///
/// On contact the vehicle is classified, snapped onto the surface and
/// stopped. A vehicle that is no longer flying is returned unchanged.
pub fn resolve(vehicle: &Vehicle, terrain: &TerrainProfile, tuning: &Tuning) -> Vehicle {
    if !vehicle.is_flying() {
        return *vehicle;
    }

    let contact = ground_contact(vehicle.pos, tuning.half_height, terrain);
    let Some(ground) = contact.ground.filter(|_| contact.hit) else {
        return *vehicle;
    };

    let mut next = *vehicle;
    next.terminal = classify(vehicle, &tuning.landing);
    next.pos.y = ground - tuning.half_height;
    next.vel = Vec2::ZERO;
    next
}
