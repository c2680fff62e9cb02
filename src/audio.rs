//! Sound cues
//!
//! Tone synthesis happens outside this crate. The session only records which
//! cue should play; the audio layer drains the queue once per frame.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Projectile fired
    LaserShot,
    /// Obstacle destroyed by a projectile
    Explosion,
    /// Obstacle rammed the player
    Crash,
}

/// Pending cues for the external synthesizer
#[derive(Debug, Clone)]
pub struct AudioCues {
    queue: Vec<SoundEffect>,
    enabled: bool,
}

impl AudioCues {
    pub fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            queue: Vec::with_capacity(capacity),
            enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queue a cue (dropped while sfx are off)
    pub fn play(&mut self, effect: SoundEffect) {
        if self.enabled {
            self.queue.push(effect);
        }
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, SoundEffect> {
        self.queue.drain(..)
    }

    pub fn pending(&self) -> &[SoundEffect] {
        &self.queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_cues_are_dropped() {
        let mut cues = AudioCues::new(false, 4);
        cues.play(SoundEffect::Crash);
        assert!(cues.pending().is_empty());

        cues.set_enabled(true);
        cues.play(SoundEffect::LaserShot);
        cues.play(SoundEffect::Explosion);
        assert_eq!(
            cues.drain().collect::<Vec<_>>(),
            vec![SoundEffect::LaserShot, SoundEffect::Explosion]
        );
        assert!(cues.pending().is_empty());
    }

    #[test]
    fn test_disabling_clears_queue() {
        let mut cues = AudioCues::new(true, 4);
        cues.play(SoundEffect::Crash);
        cues.set_enabled(false);
        assert!(cues.pending().is_empty());
    }
}
