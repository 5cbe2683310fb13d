//! Difficulty curve
//!
//! Everything scales off the wave, and the wave is a pure function of score.

use serde::{Deserialize, Serialize};

use crate::consts::SCORE_PER_WAVE;

/// Multipliers read by the spawners and entity velocities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub wave: u32,
    /// Spawn rate multiplier (timers are divided by it)
    pub density: f32,
    /// Velocity multiplier for spawned hazards
    pub speed: f32,
}

/// `1 + floor(score / 80)`
#[inline]
pub fn wave_for_score(score: u32) -> u32 {
    1 + score / SCORE_PER_WAVE
}

impl Difficulty {
    pub fn for_wave(wave: u32) -> Self {
        let w = wave.max(1) as f32;
        Self {
            wave: wave.max(1),
            density: (0.8 + w * 0.35).clamp(1.0, 6.0),
            speed: (1.0 + w * 0.08).clamp(1.0, 1.9),
        }
    }

    pub fn for_score(score: u32) -> Self {
        Self::for_wave(wave_for_score(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wave_boundaries() {
        assert_eq!(wave_for_score(0), 1);
        assert_eq!(wave_for_score(79), 1);
        assert_eq!(wave_for_score(80), 2);
        assert_eq!(wave_for_score(240), 4);
        assert_eq!(wave_for_score(999), 13);
    }

    #[test]
    fn test_first_wave_multipliers() {
        let d = Difficulty::for_wave(1);
        assert!((d.density - 1.15).abs() < 1e-5);
        assert!((d.speed - 1.08).abs() < 1e-5);
    }

    #[test]
    fn test_multipliers_saturate() {
        let d = Difficulty::for_wave(40);
        assert_eq!(d.density, 6.0);
        assert_eq!(d.speed, 1.9);
    }

    proptest! {
        #[test]
        fn wave_is_monotonic(a in 0u32..=999, b in 0u32..=999) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(wave_for_score(lo) <= wave_for_score(hi));
        }

        #[test]
        fn multipliers_stay_in_range(score in 0u32..=999) {
            let d = Difficulty::for_score(score);
            prop_assert!((1.0..=6.0).contains(&d.density));
            prop_assert!((1.0..=1.9).contains(&d.speed));
            prop_assert_eq!(d.wave, wave_for_score(score));
        }
    }
}
