//! Explosion particles
//!
//! Bursts pull up to [`PARTICLES_PER_BURST`] free slots from the pool and
//! fling them outward in uniformly random directions. Particles shrink as
//! their life drains and are hidden exactly once when it runs out.

use glam::Vec3;

use super::instance::InstanceTransform;
use super::pool::{EntityPool, Poolable};
use super::state::{ColorTag, SimRng};
use crate::consts::*;

/// A particle slot. `life <= 0` means free.
#[derive(Debug, Clone, Copy, Default)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub life: f32,
    pub color: ColorTag,
    /// Set once the zero-scale snapshot has been written after expiry;
    /// `advance` skips hidden slots
    hidden: bool,
}

impl Particle {
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

impl Poolable for Particle {
    fn is_active(&self) -> bool {
        self.life > 0.0
    }

    fn release(&mut self) {
        self.life = 0.0;
    }
}

/// Owns the particle pool and its render snapshot
#[derive(Debug, Clone)]
pub struct ParticleEffectSystem {
    pool: EntityPool<Particle>,
    instances: Box<[InstanceTransform]>,
    /// Any snapshot rewritten since the last `take_dirty`
    dirty: bool,
}

impl ParticleEffectSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            pool: EntityPool::from_fn(capacity, |_| Particle {
                hidden: true,
                ..Particle::default()
            }),
            instances: vec![InstanceTransform::HIDDEN; capacity].into_boxed_slice(),
            dirty: false,
        }
    }

    /// Kill every particle and hide every slot
    pub fn reset(&mut self) {
        for particle in self.pool.iter_mut() {
            *particle = Particle {
                hidden: true,
                ..Particle::default()
            };
        }
        self.instances.fill(InstanceTransform::HIDDEN);
        self.dirty = true;
    }

    /// Spawn a burst at `position`, returning how many particles were used.
    ///
    /// Stops after [`PARTICLES_PER_BURST`] regardless of how many slots are
    /// free; a full pool spawns nothing.
    pub fn explode(&mut self, position: Vec3, color: ColorTag, rng: &mut SimRng) -> usize {
        if !crate::is_finite_vec3(position) {
            return 0;
        }

        let mut spawned = 0;
        for particle in self.pool.iter_mut() {
            if spawned >= PARTICLES_PER_BURST {
                break;
            }
            if particle.is_active() {
                continue;
            }
            particle.life = rng.spread(PARTICLE_BASE_LIFE, PARTICLE_LIFE_SPREAD);
            particle.position = position;
            particle.velocity = rng.unit_sphere()
                * rng.spread(PARTICLE_MIN_SPEED, PARTICLE_MAX_SPEED - PARTICLE_MIN_SPEED);
            particle.color = color;
            particle.hidden = false;
            spawned += 1;
        }

        if spawned < PARTICLES_PER_BURST {
            log::debug!(
                "Particle pool saturated: burst spawned {}/{}",
                spawned,
                PARTICLES_PER_BURST
            );
        }
        spawned
    }

    /// Decay, drag and move live particles; hide the ones that just expired
    /// or were released since the last tick
    pub fn advance(&mut self, dt: f32) {
        for (particle, instance) in self.pool.iter_mut().zip(self.instances.iter_mut()) {
            if particle.hidden {
                continue;
            }
            if particle.is_active() {
                particle.life -= dt * PARTICLE_DECAY_RATE;
                particle.velocity *= PARTICLE_DRAG;
                particle.position += particle.velocity * dt;
            }

            if particle.is_active() {
                *instance = InstanceTransform::new(
                    particle.position,
                    Vec3::ZERO,
                    Vec3::splat(particle.life),
                    particle.color.0,
                    true,
                );
            } else {
                *instance = InstanceTransform::hidden_at(particle.position);
                particle.hidden = true;
            }
            self.dirty = true;
        }
    }

    /// Whether any snapshot changed since the last call; clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn pool(&self) -> &EntityPool<Particle> {
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
    fn test_burst_is_capped() {
        let mut rng = SimRng::new(11);
        let mut fx = ParticleEffectSystem::new(PARTICLE_CAPACITY);

        let spawned = fx.explode(Vec3::new(1.0, 2.0, 3.0), ColorTag::DEBRIS, &mut rng);

        assert_eq!(spawned, 15);
        assert_eq!(fx.active_count(), 15);
        for (_, p) in fx.pool().iter_active() {
            assert!(p.life >= 1.0 && p.life <= 1.5);
            let speed = p.velocity.length();
            assert!((10.0 - 1e-3..30.0 + 1e-3).contains(&speed));
            assert_eq!(p.position, Vec3::new(1.0, 2.0, 3.0));
            assert_eq!(p.color, ColorTag::DEBRIS);
        }
    }

    #[test]
    fn test_saturated_pool_spawns_partial_burst() {
        let mut rng = SimRng::new(12);
        let mut fx = ParticleEffectSystem::new(20);
        assert_eq!(fx.explode(Vec3::ZERO, ColorTag::CRASH, &mut rng), 15);
        assert_eq!(fx.explode(Vec3::ZERO, ColorTag::CRASH, &mut rng), 5);
        assert_eq!(fx.explode(Vec3::ZERO, ColorTag::CRASH, &mut rng), 0);
        assert_eq!(fx.active_count(), 20);
    }

    #[test]
    fn test_life_decreases_and_expires() {
        let mut rng = SimRng::new(13);
        let mut fx = ParticleEffectSystem::new(PARTICLE_CAPACITY);
        fx.explode(Vec3::ZERO, ColorTag::DEBRIS, &mut rng);

        let dt = 0.125;
        // ceil(1.5 / (dt * 3)) ticks for the longest possible life
        let max_ticks = (1.5f32 / (dt * PARTICLE_DECAY_RATE)).ceil() as usize;
        let mut last: Vec<f32> = fx.pool().iter().map(|p| p.life).collect();
        for _ in 0..max_ticks {
            fx.advance(dt);
            for (p, prev) in fx.pool().iter().zip(last.iter()) {
                if *prev > 0.0 {
                    assert!(p.life < *prev);
                }
            }
            last = fx.pool().iter().map(|p| p.life).collect();
        }
        assert_eq!(fx.active_count(), 0);
    }

    #[test]
    fn test_drag_and_scale() {
        let mut rng = SimRng::new(14);
        let mut fx = ParticleEffectSystem::new(1);
        fx.explode(Vec3::ZERO, ColorTag::DEBRIS, &mut rng);
        let v0 = fx.pool().get(0).unwrap().velocity;
        let life0 = fx.pool().get(0).unwrap().life;

        fx.advance(0.1);

        let p = *fx.pool().get(0).unwrap();
        assert!((p.velocity - v0 * 0.95).length() < 1e-4);
        assert!((p.position - v0 * 0.95 * 0.1).length() < 1e-4);
        assert!((p.life - (life0 - 0.3)).abs() < 1e-5);
        assert!((fx.instances()[0].scale[0] - p.life).abs() < 1e-6);
        assert_eq!(fx.instances()[0].color, 0xffaa00);
    }

    #[test]
    fn test_expired_particle_hidden_once() {
        let mut rng = SimRng::new(15);
        let mut fx = ParticleEffectSystem::new(2);
        fx.explode(Vec3::ZERO, ColorTag::CRASH, &mut rng);
        assert!(!fx.pool().get(0).unwrap().is_hidden());
        fx.take_dirty();

        // One big step drains the whole life; the transition tick writes the hide
        fx.advance(1.0);
        assert!(fx.take_dirty());
        let p = fx.pool().get(0).unwrap();
        assert!(p.life <= 0.0);
        assert!(p.is_hidden());
        assert!(!fx.instances()[0].is_visible());

        // Nothing left to write
        fx.advance(0.016);
        assert!(!fx.take_dirty());
        fx.advance(0.016);
        assert!(!fx.take_dirty());
    }

    #[test]
    fn test_released_particle_is_hidden_next_tick() {
        let mut rng = SimRng::new(16);
        let mut fx = ParticleEffectSystem::new(4);
        fx.explode(Vec3::ZERO, ColorTag::DEBRIS, &mut rng);
        fx.advance(0.016);
        assert!(fx.instances()[0].is_visible());
        fx.take_dirty();

        fx.pool.release(0);
        fx.advance(0.016);

        assert!(fx.take_dirty());
        assert!(fx.pool().get(0).unwrap().is_hidden());
        assert!(!fx.instances()[0].is_visible());
        assert!(fx.instances()[1].is_visible());
        assert_eq!(fx.active_count(), 3);
    }
}
