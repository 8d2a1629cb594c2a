//! Sampling ranges for synthetic metric fields.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Half-open integer range `[min, min + span)` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    min: u64,
    span: u64,
}

impl IntRange {
    /// Create a range covering `span` consecutive integers starting at `min`.
    ///
    /// # Panics
    ///
    /// Panics if `span` is zero (in const context this is a compile error).
    #[must_use]
    pub const fn new(min: u64, span: u64) -> Self {
        assert!(span > 0, "IntRange span must be positive");
        Self { min, span }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> u64 {
        self.min
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn max_exclusive(&self) -> u64 {
        self.min + self.span
    }

    #[must_use]
    pub const fn span(&self) -> u64 {
        self.span
    }

    #[must_use]
    pub const fn contains(&self, value: u64) -> bool {
        value >= self.min && value < self.max_exclusive()
    }

    /// Draw one value; equivalent to `min + floor(uniform * span)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        self.min + rng.gen_range(0..self.span)
    }
}

/// Float range `center ± half_width` sampled uniformly.
///
/// Bounds are checked inclusively: `center + u` may round up to the upper
/// bound for `u` just below `half_width`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterRange {
    center: f64,
    half_width: f64,
}

impl JitterRange {
    /// `half_width` is expected to be strictly positive.
    #[must_use]
    pub const fn new(center: f64, half_width: f64) -> Self {
        Self { center, half_width }
    }

    #[must_use]
    pub const fn center(&self) -> f64 {
        self.center
    }

    #[must_use]
    pub fn low(&self) -> f64 {
        self.center - self.half_width
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.center + self.half_width
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low() && value <= self.high()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.center + rng.gen_range(-self.half_width..self.half_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_int_range_bounds() {
        let r = IntRange::new(25, 30);
        assert_eq!(r.min(), 25);
        assert_eq!(r.max_exclusive(), 55);
        assert!(r.contains(25));
        assert!(r.contains(54));
        assert!(!r.contains(55));
        assert!(!r.contains(24));
    }

    #[test]
    fn test_int_range_single_value() {
        let r = IntRange::new(5, 1);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert_eq!(r.sample(&mut rng), 5);
        }
    }

    #[test]
    fn test_int_range_hits_both_ends() {
        let r = IntRange::new(92, 5);
        let mut rng = StdRng::seed_from_u64(7);
        let seen: std::collections::HashSet<u64> = (0..2_000).map(|_| r.sample(&mut rng)).collect();
        assert_eq!(seen.len(), 5);
        assert!(seen.contains(&92));
        assert!(seen.contains(&96));
    }

    #[test]
    fn test_jitter_range_bounds() {
        let r = JitterRange::new(98.0, 0.2);
        assert!((r.low() - 97.8).abs() < 1e-9);
        assert!((r.high() - 98.2).abs() < 1e-9);
        assert!(r.contains(98.0));
        assert!(!r.contains(97.7));
        assert!(!r.contains(98.3));
    }

    proptest! {
        #[test]
        fn prop_int_sample_in_range(seed in any::<u64>(), min in 0u64..1_000_000, span in 1u64..10_000) {
            let r = IntRange::new(min, span);
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..32 {
                prop_assert!(r.contains(r.sample(&mut rng)));
            }
        }

        #[test]
        fn prop_jitter_sample_in_range(seed in any::<u64>(), center in 0.0f64..1000.0, hw in 0.001f64..10.0) {
            let r = JitterRange::new(center, hw);
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..32 {
                prop_assert!(r.contains(r.sample(&mut rng)));
            }
        }
    }
}
