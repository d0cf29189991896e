//! Random number generation for combat
//!
//! Uses a seeded ChaCha RNG for reproducibility (replays and tests).
//! A [`RollMode`] other than `Random` pins every draw to one end of its
//! range, which lets tests force a guaranteed hit or a minimal roll.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// How draws are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RollMode {
    /// Uniform draws from the seeded stream
    #[default]
    Random,
    /// Every draw returns the lowest value of its range
    Min,
    /// Every draw returns the highest value of its range
    Max,
}

/// Game random number generator
///
/// Wraps ChaCha8Rng for reproducible random number generation.
/// Note: RNG state is not serialized - a restored stream restarts from its seed.
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: ChaCha8Rng,
    seed: u64,
    mode: RollMode,
}

#[derive(Serialize, Deserialize)]
struct RngSeed {
    seed: u64,
    #[serde(default)]
    mode: RollMode,
}

// Custom serialization - only serialize seed and mode, recreate RNG on deserialize
impl Serialize for GameRng {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        RngSeed {
            seed: self.seed,
            mode: self.mode,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for GameRng {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let RngSeed { seed, mode } = RngSeed::deserialize(deserializer)?;
        Ok(GameRng::with_mode(seed, mode))
    }
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_mode(seed, RollMode::Random)
    }

    /// Create an RNG whose draws follow `mode`
    pub fn with_mode(seed: u64, mode: RollMode) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            mode,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mode(&self) -> RollMode {
        self.mode
    }

    /// Switch the roll mode, keeping the stream position
    pub fn set_mode(&mut self, mode: RollMode) {
        self.mode = mode;
    }

    /// Equivalent to NetHack's rn2(n) - returns 0..n-1
    ///
    /// Returns 0 if n is 0.
    pub fn rn2(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        match self.mode {
            RollMode::Random => self.rng.gen_range(0..n),
            RollMode::Min => 0,
            RollMode::Max => n - 1,
        }
    }

    /// Equivalent to NetHack's rnd(n) - returns 1..n
    ///
    /// Returns 0 if n is 0.
    pub fn rnd(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.rn2(n) + 1
    }

    /// Equivalent to NetHack's rn1(x, y) - returns y..y+x-1
    pub fn rn1(&mut self, x: u32, y: u32) -> u32 {
        self.rn2(x) + y
    }

    /// Equivalent to NetHack's d(n, m) - roll n dice with m sides
    ///
    /// Returns sum of n rolls of 1..m
    pub fn dice(&mut self, n: u32, m: u32) -> u32 {
        (0..n).map(|_| self.rnd(m)).sum()
    }

    /// Returns true with probability 1/n
    pub fn one_in(&mut self, n: u32) -> bool {
        self.rn2(n) == 0
    }

    /// Choose a random element from a slice
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            None
        } else {
            Some(&items[self.rn2(items.len() as u32) as usize])
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rn2_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let n = rng.rn2(10);
            assert!(n < 10);
        }
    }

    #[test]
    fn test_rnd_bounds() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let n = rng.rnd(6);
            assert!((1..=6).contains(&n));
        }
    }

    #[test]
    fn test_dice() {
        let mut rng = GameRng::new(42);
        for _ in 0..1000 {
            let n = rng.dice(2, 6); // 2d6
            assert!((2..=12).contains(&n));
        }
    }

    #[test]
    fn test_reproducibility() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.rn2(100), rng2.rn2(100));
        }
    }

    #[test]
    fn test_zero_inputs() {
        let mut rng = GameRng::new(42);
        assert_eq!(rng.rn2(0), 0);
        assert_eq!(rng.rnd(0), 0);
        assert_eq!(rng.dice(0, 6), 0);
        assert_eq!(rng.dice(2, 0), 0);
    }

    #[test]
    fn test_pinned_modes() {
        let mut low = GameRng::with_mode(7, RollMode::Min);
        assert_eq!(low.rn2(20), 0);
        assert_eq!(low.rnd(20), 1);
        assert_eq!(low.dice(4, 6), 4);
        assert!(low.one_in(50));

        let mut high = GameRng::with_mode(7, RollMode::Max);
        assert_eq!(high.rn2(20), 19);
        assert_eq!(high.rnd(20), 20);
        assert_eq!(high.dice(4, 6), 24);
        assert_eq!(high.rn1(10, 5), 14);
    }

    #[test]
    fn test_serde_keeps_seed_and_mode() {
        let rng = GameRng::with_mode(99, RollMode::Max);
        let json = serde_json::to_string(&rng).unwrap();
        let back: GameRng = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed(), 99);
        assert_eq!(back.mode(), RollMode::Max);
    }
}
