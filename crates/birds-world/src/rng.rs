//! Random sources for the engine.
//!
//! Engine functions take any [`rand::Rng`]. Real runs use a seedable
//! [`ChaCha8Rng`]; [`ScriptedRng`] replays fixed uniform draws so a whole
//! year transition can be stepped through by hand.

use rand::{Error, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Inclusive bounds of a freshly settled bird's age during initialization.
pub const INITIAL_AGE_MIN: u32 = 1;
pub const INITIAL_AGE_MAX: u32 = 5;

/// Seeded when `seed` is given, entropy-seeded otherwise.
pub fn simulation_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

const FRACTION_BITS: u32 = 53;

/// Replays a fixed sequence of uniform values in `[0, 1)`, cycling once
/// exhausted.
///
/// Each value is served as the high bits of the next word, so
/// `rng.gen::<f64>()` returns the smallest 53-bit fraction not below it and
/// `gen_range(0..n)` returns `floor(value * n)`. `rand`'s integer sampling
/// rejects words whose remainder `value * n - floor(value * n)` lands in the
/// upper part of its zone; a rejected value just consumes the next one.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    words: Vec<u64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted rng needs at least one value");
        let words = values.into_iter().map(Self::encode).collect();
        Self { words, cursor: 0 }
    }

    /// Always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of words drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn encode(value: f64) -> u64 {
        assert!(
            (0.0..1.0).contains(&value),
            "scripted value {value} outside [0, 1)"
        );
        let scale = (1u64 << FRACTION_BITS) as f64;
        let fraction = ((value * scale).ceil() as u64).min((1u64 << FRACTION_BITS) - 1);
        fraction << (64 - FRACTION_BITS)
    }

    fn next_word(&mut self) -> u64 {
        let word = self.words[self.cursor % self.words.len()];
        self.cursor += 1;
        word
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::seq::SliceRandom;
    use rand::Rng;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = simulation_rng(Some(42));
        let mut b = simulation_rng(Some(42));
        for _ in 0..16 {
            assert_eq!(a.gen::<f64>(), b.gen::<f64>());
        }
    }

    #[test]
    fn test_scripted_uniform_draws() {
        let mut rng = ScriptedRng::new(vec![0.6, 0.75, 0.0]);
        assert_eq!(rng.gen::<f64>(), 0.6);
        assert_eq!(rng.gen::<f64>(), 0.75);
        assert_eq!(rng.gen::<f64>(), 0.0);
        // cycles
        assert_eq!(rng.gen::<f64>(), 0.6);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_scripted_draws_never_round_below_value() {
        for value in [0.05, 0.1, 0.3, 0.49] {
            let mut rng = ScriptedRng::constant(value);
            let drawn = rng.gen::<f64>();
            assert!(drawn >= value);
            assert!(drawn - value < 1e-15);
        }
    }

    #[test]
    fn test_scripted_range_draws() {
        let mut rng = ScriptedRng::new(vec![0.0, 0.25, 0.9]);
        assert_eq!(rng.gen_range(0..4u32), 0);
        assert_eq!(rng.gen_range(0..4u32), 1);
        assert_eq!(rng.gen_range(INITIAL_AGE_MIN..=INITIAL_AGE_MAX), 5);
        assert_eq!(rng.draws(), 3);
    }

    #[test]
    fn test_zero_draws_choose_first() {
        let mut rng = ScriptedRng::constant(0.0);
        let items = ['a', 'b', 'c', 'd'];
        assert_eq!(items.choose(&mut rng), Some(&'a'));

        let empty: [char; 0] = [];
        assert_eq!(empty.choose(&mut rng), None);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_shuffle_with_zero_draws_rotates() {
        // Every swap picks index 0: [a, b, c] -> swap(2,0) -> [c, b, a] -> swap(1,0) -> [b, c, a]
        let mut rng = ScriptedRng::constant(0.0);
        let mut items = vec!['a', 'b', 'c'];
        items.shuffle(&mut rng);
        assert_eq!(items, vec!['b', 'c', 'a']);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn test_initial_age_range() {
        let mut rng = simulation_rng(Some(3));
        for _ in 0..500 {
            let age = rng.gen_range(INITIAL_AGE_MIN..=INITIAL_AGE_MAX);
            assert!((INITIAL_AGE_MIN..=INITIAL_AGE_MAX).contains(&age));
        }
    }
}
