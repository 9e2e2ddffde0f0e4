//! Seedable random number generation for dealing.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the identical deal sequence
//! - **Uniform**: Shuffles are Fisher-Yates permutations via `SliceRandom`
//! - **Entropy-backed**: Production games seed from the OS
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//!
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seedable RNG used for every deal of a game.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The chosen seed is kept so a surprising deal can be reproduced.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (uniform permutation).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range_usize(0..1000), rng2.gen_range_usize(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // Each of the 6 permutations of 3 items should show up about 1/6 of the time.
        let mut rng = GameRng::new(2024);
        let mut counts = rustc_hash::FxHashMap::<[u8; 3], u32>::default();
        let trials = 6000;

        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            rng.shuffle(&mut items);
            *counts.entry(items).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!(
                (800..=1200).contains(&count),
                "permutation {:?} seen {} times",
                perm,
                count
            );
        }
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let rng = GameRng::from_entropy();
        let mut replay = GameRng::new(rng.seed());
        let mut original = rng.clone();

        assert_eq!(original.gen_range_usize(0..1_000_000), replay.gen_range_usize(0..1_000_000));
    }
}
