//! RNG module - piece sources
//!
//! The board never picks pieces itself; it pulls them from a [`PieceSource`].
//! Two sources are provided:
//!
//! - [`UniformSource`]: each draw is an independent, uniform pick over the
//!   seven kinds, driven by a seeded LCG so games are reproducible.
//! - [`ScriptedSource`]: replays a fixed sequence, for tests and replays.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits of the LCG output; the low bits of a power-of-two
    /// modulus LCG cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state (usable as a seed to resume the sequence).
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplies the kinds of newly drawn pieces.
pub trait PieceSource: Send {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform random piece selection over all seven kinds.
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl PieceSource for UniformSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Replays a fixed sequence of kinds, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedSource {
    /// An empty script falls back to an endless stream of `O` pieces.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of kinds drawn so far.
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.kinds.is_empty() {
            return PieceKind::O;
        }
        let kind = self.kinds[self.cursor % self.kinds.len()];
        self.cursor += 1;
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..10_000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_uniform_source_is_roughly_uniform() {
        let mut source = UniformSource::new(2024);
        let mut counts = [0u32; 7];
        let draws = 70_000;
        for _ in 0..draws {
            counts[(source.next_kind().color() - 1) as usize] += 1;
        }

        // Expected 10_000 per kind; allow +-5%.
        for (i, &count) in counts.iter().enumerate() {
            assert!(
                (9_500..=10_500).contains(&count),
                "kind {} drawn {} times",
                i + 1,
                count
            );
        }
    }

    #[test]
    fn test_uniform_source_same_seed_same_sequence() {
        let mut a = UniformSource::new(7);
        let mut b = UniformSource::new(7);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_scripted_source_wraps() {
        let mut source = ScriptedSource::new([PieceKind::I, PieceKind::T]);
        assert_eq!(source.next_kind(), PieceKind::I);
        assert_eq!(source.next_kind(), PieceKind::T);
        assert_eq!(source.next_kind(), PieceKind::I);
        assert_eq!(source.drawn(), 3);
    }

    #[test]
    fn test_scripted_source_empty_falls_back() {
        let mut source = ScriptedSource::new(Vec::<PieceKind>::new());
        assert_eq!(source.next_kind(), PieceKind::O);
    }
}
