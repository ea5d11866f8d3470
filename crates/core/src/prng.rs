//! Deterministic PRNG based on the Mulberry32 algorithm.
//!
//! A 32-bit state advanced by a fixed odd increment and finalized with two
//! xorshift-multiply rounds. Pure wrapping integer arithmetic, so the same
//! seed yields the same sequence on every platform.

use serde::{Deserialize, Serialize};

/// Mulberry32 deterministic PRNG. Same seed always produces the same sequence.
///
/// Every seed, including 0, is valid: the increment is added before mixing,
/// so there is no all-zeros fixed point to guard against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Odd increment added to the state on every draw.
    const INCREMENT: u32 = 0x6D2B_79F5;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state by one step and returns the next 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(Self::INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Divides the 32-bit output by 2^32, so every value is exactly
    /// representable and reproducible bit-for-bit.
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- Golden values --

    #[test]
    fn next_f64_matches_golden_vector_for_seed_0() {
        // If this test breaks, the PRNG changed and every saved scene
        // parameter set renders differently.
        let expected: [f64; 5] = [
            0.266_429_208_684_712_65,
            0.000_329_745_700_582_861_9,
            0.223_272_027_447_819_7,
            0.146_202_147_938_311_1,
            0.467_327_822_931_110_86,
        ];
        let mut rng = Mulberry32::new(0);
        for (i, &want) in expected.iter().enumerate() {
            let got = rng.next_f64();
            assert_eq!(
                got.to_bits(),
                want.to_bits(),
                "draw {i}: got {got}, want {want}"
            );
        }
    }

    #[test]
    fn next_u32_matches_golden_vector_for_seed_1() {
        let mut rng = Mulberry32::new(1);
        assert_eq!(rng.next_u32(), 2_693_262_067);
        assert_eq!(rng.next_u32(), 11_749_833);
        assert_eq!(rng.next_u32(), 2_265_367_787);
    }

    #[test]
    fn next_u32_matches_golden_vector_for_seed_42() {
        let mut rng = Mulberry32::new(42);
        assert_eq!(rng.next_u32(), 2_581_720_956);
        assert_eq!(rng.next_u32(), 1_925_393_290);
    }

    #[test]
    fn max_seed_wraps_instead_of_overflowing() {
        let mut rng = Mulberry32::new(u32::MAX);
        let v = rng.next_f64();
        assert!((0.0..1.0).contains(&v));
    }

    // -- Determinism --

    #[test]
    fn two_instances_with_same_seed_produce_identical_sequences() {
        let mut rng_a = Mulberry32::new(42);
        let mut rng_b = Mulberry32::new(42);
        for i in 0..1000 {
            assert_eq!(
                rng_a.next_u32(),
                rng_b.next_u32(),
                "sequences diverged at index {i}"
            );
        }
    }

    #[test]
    fn different_seeds_produce_different_first_values() {
        let a = Mulberry32::new(1).next_u32();
        let b = Mulberry32::new(2).next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Mulberry32::new(7);
        for _ in 0..50 {
            rng.next_u32();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Mulberry32 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(
                rng.next_u32(),
                restored.next_u32(),
                "sequences diverged after deserialization at index {i}"
            );
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u32) {
                let mut rng = Mulberry32::new(seed);
                for _ in 0..200 {
                    let v = rng.next_f64();
                    prop_assert!(
                        (0.0..1.0).contains(&v),
                        "next_f64() = {v} out of [0, 1) for seed {seed}"
                    );
                }
            }

            #[test]
            fn next_f64_approximate_uniformity(seed: u32) {
                let mut rng = Mulberry32::new(seed);
                let mut buckets = [0u32; 10];
                for _ in 0..10_000 {
                    let idx = (rng.next_f64() * 10.0).min(9.0) as usize;
                    buckets[idx] += 1;
                }
                // Expected ~1000 per bucket; loose bound to avoid flakes.
                for (i, &count) in buckets.iter().enumerate() {
                    prop_assert!(
                        count >= 500,
                        "bucket {i} has only {count} values for seed {seed}"
                    );
                }
            }
        }
    }
}
