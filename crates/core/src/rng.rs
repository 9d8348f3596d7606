//! RNG module - deterministic color draws
//!
//! The engine never touches a global RNG. Every random color comes from a
//! [`ColorSource`], so a fixed seed reproduces the initial grid and every
//! refill exactly.

/// Source of uniform indices used to pick palette colors
pub trait ColorSource {
    /// Return an index in `[0, bound)`. `bound` is never 0.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<T: ColorSource + ?Sized> ColorSource for &mut T {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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
    /// Low bits of a power-of-two LCG cycle with short periods, so the draw
    /// uses the upper half of the state.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ColorSource for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.next_range(bound as u32) as usize
    }
}
