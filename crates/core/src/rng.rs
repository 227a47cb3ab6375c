//! RNG module - uniform random piece generation
//!
//! Pieces are independent uniform draws over the seven kinds. There is no bag:
//! the same kind can come up several times in a row.
//!
//! A seeded LCG keeps games reproducible, and a scripted queue replays a fixed
//! sequence for demos and tests.

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
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

#[derive(Debug, Clone)]
enum Source {
    Random(SimpleRng),
    Scripted { kinds: Vec<PieceKind>, index: usize },
}

/// Source of new pieces for the engine.
#[derive(Debug, Clone)]
pub struct PieceQueue {
    source: Source,
}

impl PieceQueue {
    /// Uniform random pieces from the given seed
    pub fn random(seed: u32) -> Self {
        Self {
            source: Source::Random(SimpleRng::new(seed)),
        }
    }

    /// Replay `kinds` in order, cycling when exhausted.
    ///
    /// An empty script falls back to a seeded random queue.
    pub fn scripted(kinds: Vec<PieceKind>) -> Self {
        if kinds.is_empty() {
            return Self::random(1);
        }
        Self {
            source: Source::Scripted { kinds, index: 0 },
        }
    }

    /// Draw the next piece
    pub fn draw(&mut self) -> PieceKind {
        match &mut self.source {
            Source::Random(rng) => {
                PieceKind::ALL[rng.next_range(PieceKind::ALL.len() as u32) as usize]
            }
            Source::Scripted { kinds, index } => {
                let kind = kinds[*index % kinds.len()];
                *index = (*index + 1) % kinds.len();
                kind
            }
        }
    }

    /// Current RNG state, `None` for scripted queues
    pub fn seed(&self) -> Option<u32> {
        match &self.source {
            Source::Random(rng) => Some(rng.state()),
            Source::Scripted { .. } => None,
        }
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::random(1)
    }
}
