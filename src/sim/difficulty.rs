//! Score-driven difficulty curve
//!
//! Difficulty is never stored: it is recomputed from the cumulative score
//! every tick, so the same score always yields the same parameters.

use crate::consts::*;

/// Difficulty parameters for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    /// Number of obstacle slots (from index 0) allowed to move and collide
    pub active_limit: usize,
    /// Multiplier applied to the world speed. Kept in f64 so it still rises
    /// with every point at scores far past where f32 would round.
    pub speed_multiplier: f64,
}

impl Difficulty {
    /// Obstacle approach speed for the given world speed
    #[inline]
    pub fn obstacle_speed(&self, world_speed: f32) -> f32 {
        (f64::from(world_speed) * self.speed_multiplier) as f32 + SPEED_FLOOR
    }
}

/// Maps cumulative score to [`Difficulty`], capped by the obstacle pool size
#[derive(Debug, Clone, Copy)]
pub struct DifficultyScaler {
    capacity: usize,
}

impl Default for DifficultyScaler {
    fn default() -> Self {
        Self::new(OBSTACLE_CAPACITY)
    }
}

impl DifficultyScaler {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn scale(&self, score: u64) -> Difficulty {
        let extra = usize::try_from(score / SCORE_STEP_PER_OBSTACLE).unwrap_or(usize::MAX);
        Difficulty {
            active_limit: BASE_ACTIVE_OBSTACLES.saturating_add(extra).min(self.capacity),
            speed_multiplier: 1.0 + score as f64 / SPEED_SCORE_DIVISOR,
        }
    }
}
