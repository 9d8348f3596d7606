//! Match detection
//!
//! Scans every row and column with a sliding window of three cells. Each
//! window whose three cells are filled with one color marks all three
//! coordinates; overlapping windows extend runs longer than three, and a cell
//! shared by a horizontal and a vertical run is marked once.

use crate::grid::Grid;
use crate::types::{Cell, Coord, MIN_RUN_LENGTH};

/// Coordinates covered by at least one run, in row-major order without repeats
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSet {
    coords: Vec<Coord>,
}

impl MatchSet {
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.coords.binary_search(&coord).is_ok()
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords.iter().copied()
    }
}

#[inline(always)]
fn same_filled(a: Cell, b: Cell, c: Cell) -> bool {
    match (a, b, c) {
        (Cell::Filled(x), Cell::Filled(y), Cell::Filled(z)) => x == y && y == z,
        _ => false,
    }
}

/// Window of three cells starting at (row, col)
#[derive(Debug, Clone, Copy)]
enum Run {
    Horizontal { row: usize, col: usize },
    Vertical { row: usize, col: usize },
}

/// Visit every window of three same-colored cells, rows first then columns.
/// Stops as soon as `visit` returns false; returns whether any run was seen.
fn scan_runs<F>(grid: &Grid, mut visit: F) -> bool
where
    F: FnMut(Run) -> bool,
{
    let n = grid.size();
    let span = MIN_RUN_LENGTH - 1;
    let mut any = false;

    for row in 0..n {
        for col in 0..n - span {
            if same_filled(grid.at(row, col), grid.at(row, col + 1), grid.at(row, col + 2)) {
                any = true;
                if !visit(Run::Horizontal { row, col }) {
                    return true;
                }
            }
        }
    }

    for col in 0..n {
        for row in 0..n - span {
            if same_filled(grid.at(row, col), grid.at(row + 1, col), grid.at(row + 2, col)) {
                any = true;
                if !visit(Run::Vertical { row, col }) {
                    return true;
                }
            }
        }
    }

    any
}

/// Find all matched coordinates on `grid`. Empty when the grid is settled.
pub fn find_matches(grid: &Grid) -> MatchSet {
    let n = grid.size();
    let mut mask = vec![false; n * n];
    let any = scan_runs(grid, |run| {
        for k in 0..MIN_RUN_LENGTH {
            let idx = match run {
                Run::Horizontal { row, col } => row * n + col + k,
                Run::Vertical { row, col } => (row + k) * n + col,
            };
            mask[idx] = true;
        }
        true
    });
    if !any {
        return MatchSet::default();
    }

    let coords = mask
        .iter()
        .enumerate()
        .filter(|(_, marked)| **marked)
        .map(|(idx, _)| Coord::new(idx / n, idx % n))
        .collect();
    MatchSet { coords }
}

/// Cheaper check used where only the yes/no answer matters
pub fn has_matches(grid: &Grid) -> bool {
    scan_runs(grid, |_| false)
}
