//! Shared simulation types
//!
//! Events emitted by the simulation, color tags for particle bursts, and the
//! single seeded random source every simulator draws from.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// What an obstacle collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitKind {
    /// Obstacle rammed the player craft
    Player,
    /// Obstacle destroyed by a projectile
    Obstacle,
}

/// Notifications queued during a tick, drained by collaborators afterwards
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A collision resolved at the obstacle's position
    Hit { position: Vec3, kind: HitKind },
    /// A projectile was spawned
    ShotFired,
}

/// Packed 0xRRGGBB color carried by particles into the instance snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColorTag(pub u32);

impl ColorTag {
    /// Player crash burst
    pub const CRASH: ColorTag = ColorTag(0xff0000);
    /// Destroyed obstacle debris
    pub const DEBRIS: ColorTag = ColorTag(0xffaa00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorTag(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Burst color for a resolved hit
    pub fn for_hit(kind: HitKind) -> Self {
        match kind {
            HitKind::Player => Self::CRASH,
            HitKind::Obstacle => Self::DEBRIS,
        }
    }
}

/// Seeded random source shared by all simulators
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Restart the sequence from the original seed
    pub fn reseed(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }

    /// Uniform in [0, 1)
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform in [min, min + spread)
    #[inline]
    pub fn spread(&mut self, min: f32, spread: f32) -> f32 {
        min + self.unit() * spread
    }

    /// Uniform in [-width/2, width/2)
    #[inline]
    pub fn centered(&mut self, width: f32) -> f32 {
        (self.unit() - 0.5) * width
    }

    /// Uniformly distributed direction on the unit sphere
    ///
    /// Azimuth uniform in [0, 2π), polar angle `acos(2u - 1)`.
    pub fn unit_sphere(&mut self) -> Vec3 {
        let theta = self.unit() * std::f32::consts::TAU;
        let phi = (self.unit() * 2.0 - 1.0).acos();
        Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
    }
}
