//! Random source for the rain.
//!
//! Every random decision the animator makes goes through [`Entropy`], so a
//! seeded generator or a scripted sequence can drive it deterministically.

use rand::Rng;

/// Source of the coin flips and picks that drive the rain.
pub trait Entropy {
    /// Returns `true` with the given probability (clamped to `0.0..=1.0`).
    fn chance(&mut self, probability: f32) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Uniform gap in `0..max`, or 0 when `max` is 0.
    fn restart_gap(&mut self, max: u32) -> u32;
}

impl<R: Rng + ?Sized> Entropy for R {
    fn chance(&mut self, probability: f32) -> bool {
        self.gen_bool(f64::from(probability.clamp(0.0, 1.0)))
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn restart_gap(&mut self, max: u32) -> u32 {
        if max == 0 { 0 } else { self.gen_range(0..max) }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!((0..100).all(|_| rng.chance(1.0)));
        assert!((0..100).all(|_| !rng.chance(0.0)));
        assert!(rng.chance(3.0));
    }

    #[test]
    fn test_index_and_gap_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(rng.index(8) < 8);
            assert!(rng.restart_gap(30) < 30);
        }
        assert_eq!(rng.restart_gap(0), 0);
    }
}
