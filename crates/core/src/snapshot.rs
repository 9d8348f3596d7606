//! Plain-data views of engine state for observers

use std::hash::Hasher;

use crate::engine::GridEngine;
use crate::grid::Grid;
use crate::rng::ColorSource;

/// Stable 64-bit FNV-1a hasher.
///
/// `DefaultHasher` output is not guaranteed stable across Rust versions or
/// platforms, so hashes that leave the process use this instead.
#[derive(Debug, Clone)]
pub struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// FNV-1a over a byte slice
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hasher = Fnv1aHasher::new();
    hasher.write(bytes);
    hasher.finish()
}

/// Grid contents, score and move count at one instant
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GridSnapshot {
    pub size: usize,
    /// Row-major wire codes (0 empty, 1..=6 colors)
    pub cells: Vec<u8>,
    pub score: u32,
    pub moves: u32,
    /// FNV-1a of `cells`
    pub board_hash: u64,
}

impl GridSnapshot {
    /// Overwrite `self` with the contents of `grid`, reusing the cell buffer
    pub fn fill_from_grid(&mut self, grid: &Grid) {
        self.size = grid.size();
        self.cells.clear();
        self.cells.extend(grid.cells().iter().map(|c| c.code()));
        self.board_hash = fnv1a64(&self.cells);
    }

    /// Cell codes as rows, top to bottom
    pub fn rows(&self) -> Vec<Vec<u8>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }
}

impl<R: ColorSource> GridEngine<R> {
    /// Write the current state into `out` without reallocating its cell buffer
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.fill_from_grid(self.grid());
        out.score = self.score();
        out.moves = self.moves();
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut out = GridSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}
