//! RNG module - seeded randomness and piece generation
//!
//! Two piece policies are available:
//!
//! - **Uniform**: every draw picks one of the seven kinds independently.
//! - **Bag**: each bag holds one of every kind, shuffled; the bag is emptied
//!   in order before a fresh one is shuffled.
//!
//! Both are infinite, lazy and non-restartable iterators of [`Piece`]s. The
//! randomness comes from a small LCG so that equal seeds replay equal games.

use crate::pieces::Piece;
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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales the full 32-bit output instead of taking a remainder: the low
    /// bits of an LCG cycle with very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// How the generator picks the next kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorPolicy {
    /// Independent uniform draws
    Uniform,
    /// Shuffled bags of all seven kinds
    #[default]
    Bag,
}

impl GeneratorPolicy {
    /// Parse a policy name (`uniform`, `random`, `bag`, `7bag`, `bag7`)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "uniform" | "random" => Some(GeneratorPolicy::Uniform),
            "bag" | "7bag" | "bag7" => Some(GeneratorPolicy::Bag),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorPolicy::Uniform => "uniform",
            GeneratorPolicy::Bag => "bag",
        }
    }
}

/// Infinite source of fresh pieces
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    policy: GeneratorPolicy,
    rng: SimpleRng,
    /// Current bag of pieces (bag policy only)
    bag: [PieceKind; 7],
    /// Index into current bag; 7 means "shuffle before the next draw"
    bag_index: usize,
}

impl PieceGenerator {
    pub fn new(policy: GeneratorPolicy, seed: u32) -> Self {
        Self {
            policy,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
        }
    }

    pub fn uniform(seed: u32) -> Self {
        Self::new(GeneratorPolicy::Uniform, seed)
    }

    pub fn bag(seed: u32) -> Self {
        Self::new(GeneratorPolicy::Bag, seed)
    }

    pub fn policy(&self) -> GeneratorPolicy {
        self.policy
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next kind
    pub fn draw(&mut self) -> PieceKind {
        match self.policy {
            GeneratorPolicy::Uniform => {
                let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[i]
            }
            GeneratorPolicy::Bag => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
        }
    }

    /// Whether the next bag draw starts a fresh cycle
    pub fn at_cycle_boundary(&self) -> bool {
        self.bag_index >= self.bag.len()
    }
}

impl Iterator for PieceGenerator {
    type Item = Piece;

    fn next(&mut self) -> Option<Piece> {
        Some(Piece::new(self.draw()))
    }
}
