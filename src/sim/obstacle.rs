//! Obstacle stream
//!
//! Obstacles drift toward the player along +z. Each tick every slot goes
//! through the same state machine:
//!
//! 1. Slots at or beyond the difficulty limit are parked at a far reserve z,
//!    deactivated, and skipped.
//! 2. Slots within the limit advance and spin.
//! 3. Active slots test against the player, then against every live
//!    projectile.
//! 4. Slots that passed the player (`z > 20`), or inactive slots that drifted
//!    past `z > -5`, respawn at a new random far position. So does any slot
//!    whose position went non-finite.
//!
//! The limit check always runs first, so a slot that is both over the limit
//! and eligible for respawn stays parked.

use glam::{Vec2, Vec3};

use super::collision::player_hit;
use super::instance::InstanceTransform;
use super::pool::{EntityPool, Poolable};
use super::projectile::ProjectileSimulator;
use super::state::{GameEvent, HitKind, SimRng};
use crate::consts::*;

/// An obstacle slot
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub position: Vec3,
    /// Euler angles; only x and y spin
    pub rotation: Vec3,
    /// Angular rates about x and y (radians/sec)
    pub spin: Vec2,
    /// Render scale while active
    pub scale: f32,
    pub active: bool,
}

impl Obstacle {
    /// Fresh obstacle scattered over the initial approach corridor
    pub fn random(rng: &mut SimRng) -> Self {
        let position = Vec3::new(
            rng.centered(PLAYFIELD_WIDTH),
            rng.centered(PLAYFIELD_HEIGHT),
            OBSTACLE_INITIAL_Z - rng.unit() * OBSTACLE_INITIAL_Z_SPREAD,
        );
        let rotation = Vec3::new(
            rng.unit() * std::f32::consts::PI,
            rng.unit() * std::f32::consts::PI,
            0.0,
        );
        Self {
            position,
            rotation,
            scale: rng.spread(OBSTACLE_MIN_SCALE, OBSTACLE_SCALE_SPREAD),
            spin: Vec2::new(rng.unit() * OBSTACLE_MAX_SPIN, rng.unit() * OBSTACLE_MAX_SPIN),
            active: true,
        }
    }

    /// Move to a new random far position and reactivate
    pub fn respawn(&mut self, rng: &mut SimRng) {
        self.position.z = OBSTACLE_RESPAWN_Z - rng.unit() * OBSTACLE_RESPAWN_Z_SPREAD;
        self.position.x = rng.centered(OBSTACLE_RESPAWN_WIDTH);
        self.position.y = rng
            .centered(PLAYFIELD_HEIGHT)
            .clamp(OBSTACLE_RESPAWN_Y_MIN, OBSTACLE_RESPAWN_Y_MAX);
        self.active = true;
    }

    /// Park beyond the visible range. Already-parked slots keep their z; a
    /// non-finite position is pulled back onto the axis and re-rolled.
    fn park(&mut self, rng: &mut SimRng) {
        let corrupt = !self.position.is_finite();
        if corrupt {
            self.position.x = 0.0;
            self.position.y = 0.0;
        }
        if corrupt || self.position.z > OBSTACLE_RESERVE_Z {
            self.position.z = OBSTACLE_RESERVE_Z - rng.unit() * OBSTACLE_RESERVE_Z_SPREAD;
        }
        self.active = false;
    }

    fn should_respawn(&self) -> bool {
        !self.position.is_finite()
            || self.position.z > OBSTACLE_NEAR_BOUNDARY
            || (!self.active && self.position.z > OBSTACLE_REACTIVATE_Z)
    }

    fn instance(&self) -> InstanceTransform {
        let scale = if self.active { self.scale } else { 0.0 };
        InstanceTransform::new(self.position, self.rotation, Vec3::splat(scale), 0, self.active)
    }
}

impl Poolable for Obstacle {
    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) {
        self.active = false;
    }
}

/// Per-tick inputs for [`ObstacleSimulator::advance`]
#[derive(Debug, Clone, Copy)]
pub struct ObstacleFrame {
    pub dt: f32,
    /// Slots with index >= this are held in reserve
    pub active_limit: usize,
    /// Approach speed along +z (units/sec)
    pub speed: f32,
    pub player: Vec3,
}

/// Owns the obstacle pool and its render snapshot
#[derive(Debug, Clone)]
pub struct ObstacleSimulator {
    pool: EntityPool<Obstacle>,
    instances: Box<[InstanceTransform]>,
}

impl ObstacleSimulator {
    pub fn new(capacity: usize, rng: &mut SimRng) -> Self {
        let pool = EntityPool::from_fn(capacity, |_| Obstacle::random(rng));
        let instances = pool.iter().map(Obstacle::instance).collect();
        Self { pool, instances }
    }

    /// Scatter every slot over a fresh initial layout
    pub fn reset(&mut self, rng: &mut SimRng) {
        for (obstacle, instance) in self.pool.iter_mut().zip(self.instances.iter_mut()) {
            *obstacle = Obstacle::random(rng);
            *instance = obstacle.instance();
        }
    }

    /// Run one tick of the per-slot state machine.
    ///
    /// Hits are pushed onto `events`; projectiles that score a hit are
    /// consumed through `projectiles`.
    pub fn advance(
        &mut self,
        frame: &ObstacleFrame,
        projectiles: &mut ProjectileSimulator,
        rng: &mut SimRng,
        events: &mut Vec<GameEvent>,
    ) {
        let slots = self.pool.iter_mut().zip(self.instances.iter_mut());
        for (index, (obstacle, instance)) in slots.enumerate() {
            if index >= frame.active_limit {
                obstacle.park(rng);
                *instance = InstanceTransform::hidden_at(obstacle.position);
                continue;
            }

            obstacle.position.z += frame.speed * frame.dt;
            obstacle.rotation.x += obstacle.spin.x * frame.dt;
            obstacle.rotation.y += obstacle.spin.y * frame.dt;

            if obstacle.active {
                let rammed = player_hit(obstacle.position, frame.player);
                if rammed {
                    log::debug!("Obstacle {} hit player at {:?}", index, obstacle.position);
                    events.push(GameEvent::Hit {
                        position: obstacle.position,
                        kind: HitKind::Player,
                    });
                }

                // Every overlapping projectile is spent, one event each
                let shots = projectiles.consume_hits(obstacle.position);
                if shots > 0 {
                    log::debug!(
                        "Obstacle {} destroyed by {} projectile(s) at {:?}",
                        index,
                        shots,
                        obstacle.position
                    );
                }
                for _ in 0..shots {
                    events.push(GameEvent::Hit {
                        position: obstacle.position,
                        kind: HitKind::Obstacle,
                    });
                }

                if rammed || shots > 0 {
                    obstacle.active = false;
                }
            }

            if obstacle.should_respawn() {
                obstacle.respawn(rng);
            }

            *instance = obstacle.instance();
        }
    }

    /// Read-only view of the pool
    pub fn pool(&self) -> &EntityPool<Obstacle> {
        &self.pool
    }

    /// Direct slot access for collaborators that place obstacles explicitly
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Obstacle> {
        self.pool.get_mut(index)
    }

    pub fn instances(&self) -> &[InstanceTransform] {
        &self.instances
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }
}
