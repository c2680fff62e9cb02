//! Game session
//!
//! Thin state machine around the simulation: start, pause, resume, game
//! over. Owns the score timer, player health and boost, and turns simulation
//! events into explosions, damage and sound cues.

use glam::Vec3;

use crate::audio::{AudioCues, SoundEffect};
use crate::consts::*;
use crate::sanitize_delta;
use crate::settings::Settings;
use crate::sim::{ColorTag, GameEvent, HitKind, Simulation, TickInput};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, nothing moves
    Start,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Health ran out
    GameOver,
}

/// Running totals for the current run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub shots_fired: u32,
    pub obstacles_destroyed: u32,
    pub player_hits: u32,
}

#[derive(Debug)]
pub struct Session {
    sim: Simulation,
    cues: AudioCues,
    /// None = draw a new seed on every restart
    fixed_seed: Option<u64>,
    phase: GamePhase,
    health: u32,
    score: u64,
    /// Seconds accumulated toward the next score increment
    score_clock: f32,
    boosting: bool,
    player_position: Vec3,
    stats: SessionStats,
    /// Reused each frame while handling simulation events
    event_buf: Vec<GameEvent>,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        let config = settings.sim_config();
        let sim = Simulation::new(&config);
        let event_buf = Vec::with_capacity(config.obstacle_capacity + config.projectile_capacity * 2);
        Self {
            sim,
            cues: AudioCues::new(settings.sfx_enabled, config.obstacle_capacity),
            fixed_seed: settings.seed,
            phase: GamePhase::Start,
            health: MAX_HEALTH,
            score: 0,
            score_clock: 0.0,
            boosting: false,
            player_position: PLAYER_START,
            stats: SessionStats::default(),
            event_buf,
        }
    }

    /// Begin a run from the seed's initial layout
    pub fn start(&mut self) {
        self.sim.reset();
        self.begin_run();
        log::info!("Session started (seed {})", self.sim.seed());
    }

    /// New run after game over (or at any time)
    pub fn restart(&mut self) {
        match self.fixed_seed {
            Some(_) => self.sim.reset(),
            None => self.sim.reset_with_seed(rand::random()),
        }
        self.begin_run();
        log::info!("Session restarted (seed {})", self.sim.seed());
    }

    fn begin_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.health = MAX_HEALTH;
        self.score = 0;
        self.score_clock = 0.0;
        self.boosting = false;
        self.stats = SessionStats::default();
        self.cues.clear();
    }

    /// Playing <-> Paused; ignored in other phases
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::info!("Resumed");
        }
    }

    pub fn set_boost(&mut self, boosting: bool) {
        self.boosting = boosting;
    }

    /// Snapshot from the steering component; applied before the next frame
    pub fn set_player_position(&mut self, position: Vec3) {
        self.player_position = position;
    }

    pub fn set_sfx_enabled(&mut self, enabled: bool) {
        self.cues.set_enabled(enabled);
    }

    /// Fire from the player's current position. Only while playing.
    pub fn shoot(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.sim.request_shoot(self.player_position)
    }

    /// Current world scroll speed (0 unless playing)
    pub fn world_speed(&self) -> f32 {
        match (self.phase, self.boosting) {
            (GamePhase::Playing, true) => WORLD_SPEED * BOOST_MULTIPLIER,
            (GamePhase::Playing, false) => WORLD_SPEED,
            _ => 0.0,
        }
    }

    /// Advance one rendered frame
    pub fn frame(&mut self, dt: f32) {
        let dt = sanitize_delta(dt);
        let playing = self.phase == GamePhase::Playing;

        if playing {
            self.score_clock += dt;
            while self.score_clock >= 1.0 {
                self.score_clock -= 1.0;
                self.score += SCORE_PER_SECOND;
            }
        }

        let input = TickInput {
            player_position: self.player_position,
            score: self.score,
            world_speed: self.world_speed(),
            active: playing,
        };
        self.sim.tick(&input, dt);
        self.handle_events();
    }

    fn handle_events(&mut self) {
        let mut events = std::mem::take(&mut self.event_buf);
        events.extend(self.sim.drain_events());
        for event in events.drain(..) {
            match event {
                GameEvent::ShotFired => {
                    self.stats.shots_fired += 1;
                    self.cues.play(SoundEffect::LaserShot);
                }
                GameEvent::Hit { position, kind } => {
                    self.sim.request_explosion(position, ColorTag::for_hit(kind));
                    match kind {
                        HitKind::Player => {
                            self.cues.play(SoundEffect::Crash);
                            self.damage();
                        }
                        HitKind::Obstacle => {
                            self.cues.play(SoundEffect::Explosion);
                            self.stats.obstacles_destroyed += 1;
                        }
                    }
                }
            }
        }
        self.event_buf = events;
    }

    fn damage(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.stats.player_hits += 1;
        self.health = self.health.saturating_sub(PLAYER_HIT_DAMAGE);
        log::debug!("Player hit, health {}", self.health);
        if self.health == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("Game over: score {}", self.score);
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn player_position(&self) -> Vec3 {
        self.player_position
    }

    pub fn cues(&mut self) -> &mut AudioCues {
        &mut self.cues
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }
}
