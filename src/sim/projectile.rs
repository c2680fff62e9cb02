//! Player projectiles
//!
//! Projectiles are spawned just below and ahead of the shooter and fly
//! straight down the -z axis until they hit an obstacle or run out of range.

use glam::Vec3;

use super::collision::projectile_hit;
use super::instance::InstanceTransform;
use super::pool::{EntityPool, Poolable};
use crate::consts::*;

/// A projectile slot
#[derive(Debug, Clone, Copy, Default)]
pub struct Projectile {
    pub position: Vec3,
    pub active: bool,
}

impl Poolable for Projectile {
    fn is_active(&self) -> bool {
        self.active
    }

    fn release(&mut self) {
        self.active = false;
    }
}

/// Owns the projectile pool and its render snapshot
#[derive(Debug, Clone)]
pub struct ProjectileSimulator {
    pool: EntityPool<Projectile>,
    instances: Box<[InstanceTransform]>,
}

impl ProjectileSimulator {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: EntityPool::from_fn(capacity, |_| Projectile::default()),
            instances: vec![InstanceTransform::HIDDEN; capacity].into_boxed_slice(),
        }
    }

    /// Deactivate every projectile
    pub fn reset(&mut self) {
        for projectile in self.pool.iter_mut() {
            *projectile = Projectile::default();
        }
        self.instances.fill(InstanceTransform::HIDDEN);
    }

    /// Spawn a projectile from `origin`.
    ///
    /// Returns `false` when the pool is exhausted (the shot is dropped) or
    /// the origin is not finite.
    pub fn shoot(&mut self, origin: Vec3) -> bool {
        if !crate::is_finite_vec3(origin) {
            return false;
        }
        let Some((index, projectile)) = self.pool.acquire() else {
            log::debug!("Projectile pool exhausted, shot dropped");
            return false;
        };
        projectile.position = origin + PROJECTILE_SPAWN_OFFSET;
        projectile.active = true;
        log::trace!("Projectile {} fired from {:?}", index, origin);
        true
    }

    /// Move active projectiles and refresh every slot's snapshot
    pub fn advance(&mut self, dt: f32) {
        for (projectile, instance) in self.pool.iter_mut().zip(self.instances.iter_mut()) {
            if projectile.active {
                projectile.position.z -= PROJECTILE_SPEED * dt;
                if projectile.position.z < PROJECTILE_RANGE_Z {
                    projectile.active = false;
                }
            }

            // Inactive slots are re-hidden every tick
            *instance = if projectile.active {
                InstanceTransform::new(projectile.position, Vec3::ZERO, PROJECTILE_SCALE, 0, true)
            } else {
                InstanceTransform::HIDDEN
            };
        }
    }

    /// Destroy every active projectile that hits an obstacle at `obstacle`.
    ///
    /// Returns how many were consumed. Used by the obstacle simulator so
    /// the projectile pool is only ever mutated by its owner.
    pub fn consume_hits(&mut self, obstacle: Vec3) -> usize {
        let mut consumed = 0;
        for projectile in self.pool.iter_mut() {
            if projectile.active && projectile_hit(obstacle, projectile.position) {
                projectile.release();
                consumed += 1;
            }
        }
        consumed
    }

    /// Read-only view of the pool
    pub fn pool(&self) -> &EntityPool<Projectile> {
        &self.pool
    }

    pub fn instances(&self) -> &[InstanceTransform] {
        &self.instances
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shoot_applies_offset() {
        let mut sim = ProjectileSimulator::new(PROJECTILE_CAPACITY);
        assert!(sim.shoot(Vec3::new(1.0, 2.0, -5.0)));
        let p = sim.pool().get(0).unwrap();
        assert!(p.active);
        assert_eq!(p.position, Vec3::new(1.0, 1.5, -7.0));
    }

    #[test]
    fn test_full_pool_drops_shot() {
        let mut sim = ProjectileSimulator::new(PROJECTILE_CAPACITY);
        for _ in 0..PROJECTILE_CAPACITY {
            assert!(sim.shoot(Vec3::ZERO));
        }
        let before: Vec<Vec3> = sim.pool().iter().map(|p| p.position).collect();

        assert!(!sim.shoot(Vec3::new(9.0, 9.0, 9.0)));

        let after: Vec<Vec3> = sim.pool().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(sim.active_count(), PROJECTILE_CAPACITY);
    }

    #[test]
    fn test_advance_and_range_limit() {
        let mut sim = ProjectileSimulator::new(4);
        sim.shoot(Vec3::ZERO);
        sim.advance(0.1);
        let p = sim.pool().get(0).unwrap();
        assert!((p.position.z - (-2.0 - 25.0)).abs() < 1e-4);
        assert_eq!(sim.instances()[0].scale, [1.0, 1.0, 10.0]);
        assert_eq!(sim.instances()[1], InstanceTransform::HIDDEN);

        // 800 units at 250/s takes a bit over 3.2s
        for _ in 0..40 {
            sim.advance(0.1);
        }
        assert_eq!(sim.active_count(), 0);
        assert!(!sim.instances()[0].is_visible());
    }

    #[test]
    fn test_consume_hits_releases_every_overlap() {
        let mut sim = ProjectileSimulator::new(4);
        sim.shoot(Vec3::new(0.0, 0.5, 2.0));
        sim.shoot(Vec3::new(0.0, 0.5, 1.0));
        sim.shoot(Vec3::new(40.0, 0.5, 2.0));

        assert_eq!(sim.consume_hits(Vec3::ZERO), 2);
        assert_eq!(sim.active_count(), 1);
        assert!(!sim.pool().get(0).unwrap().active);
        assert!(!sim.pool().get(1).unwrap().active);
        assert!(sim.pool().get(2).unwrap().active);

        assert_eq!(sim.consume_hits(Vec3::new(-50.0, 0.0, 0.0)), 0);
        assert_eq!(sim.active_count(), 1);
    }

    #[test]
    fn test_non_finite_origin_rejected() {
        let mut sim = ProjectileSimulator::new(2);
        assert!(!sim.shoot(Vec3::new(f32::NAN, 0.0, 0.0)));
        assert_eq!(sim.active_count(), 0);
    }
}
