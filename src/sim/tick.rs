//! Per-frame simulation tick
//!
//! Orchestrates the fixed update order: difficulty from score, projectiles,
//! obstacles (with collisions), particles. Events raised along the way are
//! queued and drained by the caller after the tick returns.

use glam::Vec3;

use super::difficulty::{Difficulty, DifficultyScaler};
use super::instance::InstanceTransform;
use super::obstacle::{ObstacleFrame, ObstacleSimulator};
use super::particle::ParticleEffectSystem;
use super::projectile::ProjectileSimulator;
use super::state::{ColorTag, GameEvent, SimRng};
use crate::sanitize_delta;
use crate::settings::SimConfig;

/// Collaborator inputs for a single tick, captured before it runs
#[derive(Debug, Clone, Copy)]
pub struct TickInput {
    /// Player craft position from the steering component
    pub player_position: Vec3,
    /// Cumulative score
    pub score: u64,
    /// Current world scroll speed
    pub world_speed: f32,
    /// When false the tick does nothing (start screen, pause, game over)
    pub active: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            player_position: crate::consts::PLAYER_START,
            score: 0,
            world_speed: crate::consts::WORLD_SPEED,
            active: true,
        }
    }
}

/// The whole entity simulation
#[derive(Debug, Clone)]
pub struct Simulation {
    rng: SimRng,
    scaler: DifficultyScaler,
    obstacles: ObstacleSimulator,
    projectiles: ProjectileSimulator,
    particles: ParticleEffectSystem,
    events: Vec<GameEvent>,
    difficulty: Difficulty,
    time_ticks: u64,
}

impl Simulation {
    /// Preallocate every pool. Nothing allocates after this as long as the
    /// event queue is drained each frame.
    pub fn new(config: &SimConfig) -> Self {
        let mut rng = SimRng::new(config.seed);
        let obstacles = ObstacleSimulator::new(config.obstacle_capacity, &mut rng);
        let scaler = DifficultyScaler::new(config.obstacle_capacity);
        log::info!(
            "Simulation created (seed {}, pools {}/{}/{})",
            config.seed,
            config.obstacle_capacity,
            config.projectile_capacity,
            config.particle_capacity
        );
        Self {
            rng,
            scaler,
            obstacles,
            projectiles: ProjectileSimulator::new(config.projectile_capacity),
            particles: ParticleEffectSystem::new(config.particle_capacity),
            // Every obstacle can resolve at most one hit per tick
            events: Vec::with_capacity(config.obstacle_capacity + config.projectile_capacity * 2),
            difficulty: scaler.scale(0),
            time_ticks: 0,
        }
    }

    /// Restore the initial randomized layout (same seed, same layout)
    pub fn reset(&mut self) {
        self.rng.reseed();
        self.obstacles.reset(&mut self.rng);
        self.projectiles.reset();
        self.particles.reset();
        self.events.clear();
        self.difficulty = self.scaler.scale(0);
        self.time_ticks = 0;
    }

    /// Restart from the initial layout of a different seed
    pub fn reset_with_seed(&mut self, seed: u64) {
        self.rng = SimRng::new(seed);
        self.reset();
    }

    /// Advance by `dt` seconds. Negative or non-finite deltas count as zero;
    /// a non-finite world speed or player position skips the tick.
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if !input.active {
            return;
        }
        if !input.world_speed.is_finite() || !crate::is_finite_vec3(input.player_position) {
            log::warn!(
                "Skipping tick with invalid input (speed {}, player {:?})",
                input.world_speed,
                input.player_position
            );
            return;
        }
        let dt = sanitize_delta(dt);
        self.time_ticks += 1;

        self.difficulty = self.scaler.scale(input.score);

        self.projectiles.advance(dt);

        let frame = ObstacleFrame {
            dt,
            active_limit: self.difficulty.active_limit,
            speed: self.difficulty.obstacle_speed(input.world_speed),
            player: input.player_position,
        };
        self.obstacles.advance(
            &frame,
            &mut self.projectiles,
            &mut self.rng,
            &mut self.events,
        );

        self.particles.advance(dt);
    }

    /// Input-layer entry point. Returns whether a projectile was spawned.
    pub fn request_shoot(&mut self, origin: Vec3) -> bool {
        let fired = self.projectiles.shoot(origin);
        if fired {
            self.events.push(GameEvent::ShotFired);
        }
        fired
    }

    /// Burst particles at `position`. Returns how many were spawned.
    pub fn request_explosion(&mut self, position: Vec3, color: ColorTag) -> usize {
        self.particles.explode(position, color, &mut self.rng)
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Difficulty used by the most recent tick
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn obstacles(&self) -> &ObstacleSimulator {
        &self.obstacles
    }

    /// Mutable obstacle access for collaborators that script placements
    pub fn obstacles_mut(&mut self) -> &mut ObstacleSimulator {
        &mut self.obstacles
    }

    pub fn projectiles(&self) -> &ProjectileSimulator {
        &self.projectiles
    }

    pub fn particles(&self) -> &ParticleEffectSystem {
        &self.particles
    }

    pub fn obstacle_instances(&self) -> &[InstanceTransform] {
        self.obstacles.instances()
    }

    pub fn projectile_instances(&self) -> &[InstanceTransform] {
        self.projectiles.instances()
    }

    pub fn particle_instances(&self) -> &[InstanceTransform] {
        self.particles.instances()
    }

    /// Whether particle snapshots changed since the last call
    pub fn take_particles_dirty(&mut self) -> bool {
        self.particles.take_dirty()
    }
}
