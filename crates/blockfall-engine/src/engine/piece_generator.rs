use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;

use crate::PieceKind;

/// Picks piece kinds uniformly at random.
///
/// Each draw is independent; there is no bag, so droughts and repeats are
/// possible.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.next_kind(), b.next_kind());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator seeded from the thread RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Creates a generator that yields the same sequence for the same seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// 128-bit seed for [`PieceGenerator`].
///
/// Written and parsed as 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid piece seed '{input}': expected 32 hex digits")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const SEED: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_seed_parse_and_display() {
        let seed: PieceSeed = SEED.parse().unwrap();
        assert_eq!(seed.to_string(), SEED);
    }

    #[test]
    fn test_seed_parse_errors() {
        assert!("abc".parse::<PieceSeed>().is_err());
        assert!("zz23456789abcdef0123456789abcdef".parse::<PieceSeed>().is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: PieceSeed = SEED.parse().unwrap();
        let mut a = PieceGenerator::with_seed(seed);
        let mut b = PieceGenerator::with_seed(seed);
        let seq_a: Vec<_> = (0..50).map(|_| a.next_kind()).collect();
        let seq_b: Vec<_> = (0..50).map(|_| b.next_kind()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_all_kinds_are_drawn() {
        let mut generator = PieceGenerator::with_seed(SEED.parse().unwrap());
        let kinds: HashSet<_> = (0..500).map(|_| generator.next_kind()).collect();
        assert_eq!(kinds.len(), PieceKind::LEN);
    }
}
