//! Entity simulation module
//!
//! All gameplay motion and collision lives here:
//! - Fixed-capacity pools, no allocation after construction
//! - One seeded RNG shared by every simulator
//! - Stable iteration order (by slot index)
//! - No rendering or audio dependencies; output is events plus instance snapshots

pub mod collision;
pub mod difficulty;
pub mod instance;
pub mod obstacle;
pub mod particle;
pub mod pool;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::{player_hit, projectile_hit};
pub use difficulty::{Difficulty, DifficultyScaler};
pub use instance::InstanceTransform;
pub use obstacle::{Obstacle, ObstacleFrame, ObstacleSimulator};
pub use particle::{Particle, ParticleEffectSystem};
pub use pool::{EntityPool, Poolable};
pub use projectile::{Projectile, ProjectileSimulator};
pub use state::{ColorTag, GameEvent, HitKind, SimRng};
pub use tick::{Simulation, TickInput};
