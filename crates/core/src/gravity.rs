//! Gravity - removal, column collapse and refill

use crate::grid::Grid;
use crate::matches::MatchSet;
use crate::palette::Palette;
use crate::rng::ColorSource;
use crate::types::Cell;

/// Empty every matched cell. Returns the number of cells cleared.
pub fn clear_matches(grid: &mut Grid, matches: &MatchSet) -> usize {
    let mut cleared = 0;
    for coord in matches.iter() {
        if grid.set(coord, Cell::Empty) {
            cleared += 1;
        }
    }
    cleared
}

/// Slide filled cells to the bottom of every column, preserving their
/// top-to-bottom order; vacated cells at the top become empty.
///
/// Two-pointer pass per column, zero allocation. Returns the number of cells
/// that moved.
pub fn collapse(grid: &mut Grid) -> usize {
    let n = grid.size();
    let mut moved = 0;

    for col in 0..n {
        let mut write_row = n;

        // Scan from bottom to top
        for read_row in (0..n).rev() {
            let cell = grid.at(read_row, col);
            if cell.is_filled() {
                write_row -= 1;
                if write_row != read_row {
                    grid.put(write_row, col, cell);
                    moved += 1;
                }
            }
        }

        // Clear the remaining rows at the top
        for row in 0..write_row {
            grid.put(row, col, Cell::Empty);
        }
    }

    moved
}

/// Give every empty cell a fresh color, column by column, top to bottom.
/// Returns the number of cells filled.
pub fn refill<R: ColorSource>(grid: &mut Grid, palette: &Palette, rng: &mut R) -> usize {
    let n = grid.size();
    let mut filled = 0;
    for col in 0..n {
        for row in 0..n {
            if grid.at(row, col).is_empty() {
                grid.put(row, col, Cell::Filled(palette.pick(rng)));
                filled += 1;
            }
        }
    }
    filled
}
