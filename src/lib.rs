//! Spinner Chase - entity simulation core for an endless 3D arcade chase
//!
//! Core modules:
//! - `sim`: Frame-synchronous simulation (pools, motion, collisions, difficulty)
//! - `session`: Start/play/pause/game-over wrapper around the simulation
//! - `audio`: Sound cue queue for an external synthesizer
//! - `settings`: Configuration

pub mod audio;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{GamePhase, Session};
pub use settings::{Settings, SimConfig};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Pool capacities
    pub const OBSTACLE_CAPACITY: usize = 100;
    pub const PROJECTILE_CAPACITY: usize = 20;
    pub const PARTICLE_CAPACITY: usize = 300;

    /// Difficulty curve
    pub const BASE_ACTIVE_OBSTACLES: usize = 20;
    /// Score needed per extra active obstacle
    pub const SCORE_STEP_PER_OBSTACLE: u64 = 50;
    pub const SPEED_SCORE_DIVISOR: f64 = 5000.0;
    /// Added on top of the scaled world speed so obstacles never stall
    pub const SPEED_FLOOR: f32 = 30.0;

    /// Player vs obstacle z-slice window and radial hit distance
    pub const PLAYER_HIT_Z: f32 = 2.0;
    pub const PLAYER_HIT_RADIUS: f32 = 2.5;
    /// Projectile vs obstacle (wider z window: projectiles move ~250 units/s)
    pub const PROJECTILE_HIT_Z: f32 = 5.0;
    pub const PROJECTILE_HIT_RADIUS: f32 = 3.0;

    /// Projectile motion
    pub const PROJECTILE_SPEED: f32 = 250.0;
    pub const PROJECTILE_RANGE_Z: f32 = -800.0;
    /// Spawn point relative to the shooter (below and ahead)
    pub const PROJECTILE_SPAWN_OFFSET: Vec3 = Vec3::new(0.0, -0.5, -2.0);
    /// Stretched bolt
    pub const PROJECTILE_SCALE: Vec3 = Vec3::new(1.0, 1.0, 10.0);

    /// Obstacle lifecycle boundaries along z
    pub const OBSTACLE_NEAR_BOUNDARY: f32 = 20.0;
    pub const OBSTACLE_REACTIVATE_Z: f32 = -5.0;
    /// Over-limit slots are parked in (RESERVE_Z - RESERVE_Z_SPREAD, RESERVE_Z]
    pub const OBSTACLE_RESERVE_Z: f32 = -1000.0;
    pub const OBSTACLE_RESERVE_Z_SPREAD: f32 = 500.0;
    /// Respawn z band (RESPAWN_Z - RESPAWN_Z_SPREAD, RESPAWN_Z]
    pub const OBSTACLE_RESPAWN_Z: f32 = -600.0;
    pub const OBSTACLE_RESPAWN_Z_SPREAD: f32 = 400.0;
    pub const OBSTACLE_RESPAWN_WIDTH: f32 = 30.0;
    pub const OBSTACLE_RESPAWN_Y_MIN: f32 = -2.0;
    pub const OBSTACLE_RESPAWN_Y_MAX: f32 = 6.0;
    /// Initial layout (playable area)
    pub const PLAYFIELD_WIDTH: f32 = 35.0;
    pub const PLAYFIELD_HEIGHT: f32 = 15.0;
    pub const OBSTACLE_INITIAL_Z: f32 = -100.0;
    pub const OBSTACLE_INITIAL_Z_SPREAD: f32 = 800.0;
    pub const OBSTACLE_MIN_SCALE: f32 = 0.8;
    pub const OBSTACLE_SCALE_SPREAD: f32 = 0.5;
    pub const OBSTACLE_MAX_SPIN: f32 = 2.0;

    /// Particle bursts
    pub const PARTICLES_PER_BURST: usize = 15;
    pub const PARTICLE_BASE_LIFE: f32 = 1.0;
    pub const PARTICLE_LIFE_SPREAD: f32 = 0.5;
    pub const PARTICLE_MIN_SPEED: f32 = 10.0;
    pub const PARTICLE_MAX_SPEED: f32 = 30.0;
    pub const PARTICLE_DECAY_RATE: f32 = 3.0;
    /// Per-tick multiplicative velocity damping
    pub const PARTICLE_DRAG: f32 = 0.95;

    /// Session rules
    pub const WORLD_SPEED: f32 = 40.0;
    pub const BOOST_MULTIPLIER: f32 = 2.5;
    pub const MAX_HEALTH: u32 = 100;
    pub const PLAYER_HIT_DAMAGE: u32 = 20;
    pub const SCORE_PER_SECOND: u64 = 100;
    pub const PLAYER_START: Vec3 = Vec3::new(0.0, 0.0, -5.0);
}

/// Clamp a frame delta to a usable value (negative or non-finite -> 0)
#[inline]
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Distance between two points ignoring the z axis
#[inline]
pub fn radial_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

#[inline]
pub fn is_finite_vec3(v: Vec3) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_delta() {
        assert_eq!(sanitize_delta(0.016), 0.016);
        assert_eq!(sanitize_delta(-0.5), 0.0);
        assert_eq!(sanitize_delta(f32::NAN), 0.0);
        assert_eq!(sanitize_delta(f32::INFINITY), 0.0);
        assert_eq!(sanitize_delta(0.0), 0.0);
    }

    #[test]
    fn test_radial_distance_ignores_z() {
        let a = Vec3::new(3.0, 4.0, 100.0);
        let b = Vec3::new(0.0, 0.0, -50.0);
        assert!((radial_distance(a, b) - 5.0).abs() < 1e-6);
    }
}
