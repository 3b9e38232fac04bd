//! Bounded random perturbation applied before clamping
//!
//! The scorer draws exactly one sample per call from a [`JitterSource`].
//! Tests pin it with [`NoJitter`] or [`FixedJitter`]; reproducible runs use
//! [`SeededJitter`].

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;

/// Default half-width of the jitter interval
pub const DEFAULT_JITTER: f64 = 0.05;

/// Larger offsets would already saturate the final clamp
const MAX_AMPLITUDE: f64 = 1.0;

/// Non-finite amplitudes disable jitter; the sign is ignored
fn usable_amplitude(amplitude: f64) -> f64 {
    if amplitude.is_finite() {
        amplitude.abs().min(MAX_AMPLITUDE)
    } else {
        0.0
    }
}

/// Source of the jitter term. Must be shareable across request threads.
pub trait JitterSource: Send + Sync + std::fmt::Debug {
    /// Draw one offset, uniformly from `[-amplitude, +amplitude]`
    fn sample(&self) -> f64;
}

/// Thread-local RNG, a fresh draw per call
#[derive(Debug, Clone, Copy)]
pub struct UniformJitter {
    amplitude: f64,
}

impl UniformJitter {
    pub fn new(amplitude: f64) -> Self {
        Self {
            amplitude: usable_amplitude(amplitude),
        }
    }
}

impl Default for UniformJitter {
    fn default() -> Self {
        Self::new(DEFAULT_JITTER)
    }
}

impl JitterSource for UniformJitter {
    fn sample(&self) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        rand::rng().random_range(-self.amplitude..=self.amplitude)
    }
}

/// ChaCha8 stream from a fixed seed. Same seed, same sequence of offsets.
#[derive(Debug)]
pub struct SeededJitter {
    amplitude: f64,
    rng: Mutex<ChaCha8Rng>,
}

impl SeededJitter {
    pub fn new(amplitude: f64, seed: u64) -> Self {
        Self {
            amplitude: usable_amplitude(amplitude),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&self) -> f64 {
        if self.amplitude == 0.0 {
            return 0.0;
        }
        // A poisoned lock still holds a usable generator
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.random_range(-self.amplitude..=self.amplitude)
    }
}

/// Always zero
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&self) -> f64 {
        0.0
    }
}

/// Always the same offset
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_jitter_stays_in_bounds() {
        let jitter = UniformJitter::default();
        for _ in 0..1000 {
            let s = jitter.sample();
            assert!((-DEFAULT_JITTER..=DEFAULT_JITTER).contains(&s), "out of range: {s}");
        }
    }

    #[test]
    fn test_zero_amplitude_is_silent() {
        assert_eq!(UniformJitter::new(0.0).sample(), 0.0);
        assert_eq!(SeededJitter::new(0.0, 7).sample(), 0.0);
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let a = SeededJitter::new(DEFAULT_JITTER, 42);
        let b = SeededJitter::new(DEFAULT_JITTER, 42);
        let xs: Vec<f64> = (0..16).map(|_| a.sample()).collect();
        let ys: Vec<f64> = (0..16).map(|_| b.sample()).collect();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|x| x.abs() <= DEFAULT_JITTER));
    }

    #[test]
    fn test_non_finite_amplitude_disables_jitter() {
        for amplitude in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(UniformJitter::new(amplitude).sample(), 0.0);
            assert_eq!(SeededJitter::new(amplitude, 3).sample(), 0.0);
        }
    }

    #[test]
    fn test_huge_amplitude_is_capped() {
        let jitter = SeededJitter::new(f64::MAX, 11);
        for _ in 0..100 {
            assert!(jitter.sample().abs() <= MAX_AMPLITUDE);
        }
        assert!(UniformJitter::new(1e300).sample().abs() <= MAX_AMPLITUDE);
    }

    #[test]
    fn test_negative_amplitude_is_normalized() {
        let jitter = UniformJitter::new(-0.02);
        for _ in 0..100 {
            assert!(jitter.sample().abs() <= 0.02);
        }
    }
}
