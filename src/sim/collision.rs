//! Proximity collision tests
//!
//! Both tests use a z-slice plus radial distance approximation instead of
//! real bounding volumes: the two points must be within a window along the
//! travel axis and within a radius in the x/y plane. Boundaries are strict
//! (a distance exactly equal to the threshold does not hit).
//!
//! Any non-finite input component is a miss.

use glam::Vec3;

use crate::consts::*;
use crate::{is_finite_vec3, radial_distance};

/// Does an obstacle at `obstacle` hit the player at `player`?
pub fn player_hit(obstacle: Vec3, player: Vec3) -> bool {
    slice_hit(obstacle, player, PLAYER_HIT_Z, PLAYER_HIT_RADIUS)
}

/// Does an obstacle at `obstacle` get hit by a projectile at `projectile`?
pub fn projectile_hit(obstacle: Vec3, projectile: Vec3) -> bool {
    slice_hit(obstacle, projectile, PROJECTILE_HIT_Z, PROJECTILE_HIT_RADIUS)
}

#[inline]
fn slice_hit(a: Vec3, b: Vec3, z_window: f32, radius: f32) -> bool {
    if !is_finite_vec3(a) || !is_finite_vec3(b) {
        return false;
    }
    (a.z - b.z).abs() < z_window && radial_distance(a, b) < radius
}
