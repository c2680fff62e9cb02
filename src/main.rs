//! Spinner Chase headless driver
//!
//! Runs a scripted session at 60 Hz without a renderer: the craft weaves
//! across the lanes, boosts in bursts and fires on a fixed cadence. Useful
//! for soak-testing the simulation and eyeballing the difficulty curve.
//!
//! Usage: `spinner-chase [settings.json]` (log level via `RUST_LOG`)

use glam::Vec3;

use spinner_chase::consts::PLAYER_START;
use spinner_chase::{GamePhase, Session, Settings};

/// Frame delta (60 fps)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Length of the scripted run
const RUN_SECONDS: f32 = 90.0;
/// Frames between shots
const SHOT_INTERVAL: u32 = 12;

fn main() {
    env_logger::init();
    log::info!("Spinner Chase (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };

    let mut session = Session::new(&settings);
    session.start();

    let total_frames = (RUN_SECONDS / FRAME_DT) as u32;
    let mut frame = 0u32;

    while frame < total_frames && session.phase() == GamePhase::Playing {
        let t = frame as f32 * FRAME_DT;

        // Steering stand-in: weave across the lanes, bob vertically
        let steer = Vec3::new((t * 0.7).sin() * 12.0, (t * 1.3).sin() * 3.0, 0.0);
        session.set_player_position(PLAYER_START + steer);
        session.set_boost((t as u32) % 10 >= 7);

        if frame % SHOT_INTERVAL == 0 {
            session.shoot();
        }

        session.frame(FRAME_DT);

        // No synthesizer attached; log the cues instead
        for cue in session.cues().drain() {
            log::trace!("cue {:?}", cue);
        }

        if frame % 600 == 0 {
            let sim = session.simulation();
            let difficulty = sim.difficulty();
            log::info!(
                "t={:>5.1}s score={:>5} health={:>3} obstacles={:>3}/{:<3} speed x{:.2}",
                t,
                session.score(),
                session.health(),
                sim.obstacles().active_count(),
                difficulty.active_limit,
                difficulty.speed_multiplier
            );
        }
        frame += 1;
    }

    let stats = session.stats();
    log::info!(
        "Run finished after {:.1}s: phase={:?} score={} health={} shots={} destroyed={} hits taken={}",
        frame as f32 * FRAME_DT,
        session.phase(),
        session.score(),
        session.health(),
        stats.shots_fired,
        stats.obstacles_destroyed,
        stats.player_hits
    );
}
