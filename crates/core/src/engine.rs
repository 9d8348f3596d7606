//! Grid engine - the swap / match / cascade state machine
//!
//! Between calls the grid is always *settled*: no run of three, no empty cell.
//! [`GridEngine::attempt_swap`] is the only transition and is atomic from the
//! caller's point of view: it either resolves to a new settled grid with a
//! higher score, or leaves grid and score exactly as they were.

use crate::error::EngineError;
use crate::gravity::{clear_matches, collapse, refill};
use crate::grid::Grid;
use crate::matches::{find_matches, has_matches};
use crate::palette::Palette;
use crate::rng::{ColorSource, SimpleRng};
use crate::scoring::record_pass;
use crate::types::{
    CascadeReport, Cell, Coord, SwapOutcome, SwapRejection, DEFAULT_GRID_SIZE,
    LONG_CASCADE_PASSES,
};

/// Construction parameters for a [`GridEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub grid_size: usize,
    pub palette: Palette,
    pub seed: u32,
    /// Resolve runs present in a freshly generated grid (without scoring them).
    /// Off by default: a new grid may start with matches on it.
    pub settle_on_start: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            palette: Palette::default(),
            seed: 1,
            settle_on_start: false,
        }
    }
}

/// Fresh `n` x `n` grid of independent draws; may contain runs
pub fn initialize<R: ColorSource>(
    n: usize,
    palette: &Palette,
    rng: &mut R,
) -> Result<Grid, EngineError> {
    Grid::random(n, palette, rng)
}

/// Read one cell; None if `coord` is outside the grid
pub fn cell_at(grid: &Grid, coord: Coord) -> Option<Cell> {
    grid.get(coord)
}

/// 4-connected adjacency; the only gate on whether a swap is attempted
pub fn are_adjacent(a: Coord, b: Coord) -> bool {
    a.is_adjacent(b)
}

/// Detect, remove, collapse and refill until a pass finds nothing.
///
/// Loops without a pass limit. Refill draws are unconstrained, so a refill can
/// in principle keep producing new runs.
pub fn cascade_resolve<R: ColorSource>(
    grid: &mut Grid,
    palette: &Palette,
    rng: &mut R,
) -> CascadeReport {
    let mut report = CascadeReport::default();

    loop {
        let matches = find_matches(grid);
        if matches.is_empty() {
            break;
        }

        let removed = clear_matches(grid, &matches);
        collapse(grid);
        refill(grid, palette, rng);
        record_pass(&mut report, removed);

        tracing::debug!(pass = report.passes, removed, "cascade pass resolved");
        if report.passes == LONG_CASCADE_PASSES {
            tracing::warn!(
                passes = report.passes,
                total_removed = report.total_removed,
                "cascade still running"
            );
        }
    }

    report
}

/// Complete puzzle state: grid, score and the color stream used for refills
#[derive(Debug, Clone)]
pub struct GridEngine<R = SimpleRng> {
    grid: Grid,
    palette: Palette,
    rng: R,
    score: u32,
    moves: u32,
    settle_on_start: bool,
}

impl GridEngine<SimpleRng> {
    /// Create an engine seeded from `config.seed`
    pub fn new(config: &EngineConfig) -> Result<Self, EngineError> {
        Self::with_source(config, SimpleRng::new(config.seed))
    }
}

impl<R: ColorSource> GridEngine<R> {
    /// Create an engine drawing colors from `rng`
    pub fn with_source(config: &EngineConfig, mut rng: R) -> Result<Self, EngineError> {
        let mut grid = initialize(config.grid_size, &config.palette, &mut rng)?;
        if config.settle_on_start {
            cascade_resolve(&mut grid, &config.palette, &mut rng);
        }
        Ok(Self {
            grid,
            palette: config.palette.clone(),
            rng,
            score: 0,
            moves: 0,
            settle_on_start: config.settle_on_start,
        })
    }

    /// Wrap an existing grid (hand-built positions, replays)
    pub fn from_grid(grid: Grid, palette: Palette, rng: R) -> Self {
        Self {
            grid,
            palette,
            rng,
            score: 0,
            moves: 0,
            settle_on_start: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at `coord`, None if out of bounds
    pub fn cell_at(&self, coord: Coord) -> Option<Cell> {
        cell_at(&self.grid, coord)
    }

    /// Cumulative score
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of swaps that resolved
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// True when the grid holds no run and no empty cell
    pub fn is_settled(&self) -> bool {
        self.grid.is_full() && !has_matches(&self.grid)
    }

    /// Try to swap two cells.
    ///
    /// Checks bounds, then identity, then adjacency; a failed check returns
    /// `Rejected` with nothing changed. A swap that creates no run is undone.
    pub fn attempt_swap(&mut self, a: Coord, b: Coord) -> SwapOutcome {
        if !self.grid.contains(a) || !self.grid.contains(b) {
            return SwapOutcome::Rejected(SwapRejection::InvalidCoordinate);
        }
        if a == b {
            return SwapOutcome::Rejected(SwapRejection::Identical);
        }
        if !are_adjacent(a, b) {
            return SwapOutcome::Rejected(SwapRejection::NonAdjacent);
        }

        self.grid.swap(a, b);
        if !has_matches(&self.grid) {
            self.grid.swap(a, b);
            return SwapOutcome::NoMatch;
        }

        let report = cascade_resolve(&mut self.grid, &self.palette, &mut self.rng);
        self.score = self.score.saturating_add(report.score_delta);
        self.moves += 1;
        tracing::debug!(
            ?a,
            ?b,
            removed = report.total_removed,
            passes = report.passes,
            score = self.score,
            "swap resolved"
        );
        SwapOutcome::Resolved(report)
    }

    /// Resolve any runs on the current grid without crediting score
    pub fn settle(&mut self) -> CascadeReport {
        cascade_resolve(&mut self.grid, &self.palette, &mut self.rng)
    }

    /// Replace the grid with a fresh random one and reset score and moves.
    /// The color stream continues; it is not reseeded.
    pub fn restart(&mut self) {
        self.grid.clear();
        refill(&mut self.grid, &self.palette, &mut self.rng);
        if self.settle_on_start {
            self.settle();
        }
        self.score = 0;
        self.moves = 0;
        tracing::debug!(size = self.grid.size(), "grid restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color::{self, *};

    /// Repeats a fixed list of palette indices
    struct Script {
        seq: Vec<usize>,
        pos: usize,
    }

    impl ColorSource for Script {
        fn next_index(&mut self, bound: usize) -> usize {
            let v = self.seq[self.pos % self.seq.len()] % bound;
            self.pos += 1;
            v
        }
    }

    fn grid_of(rows: &[&[Color]]) -> Grid {
        Grid::from_colors(&rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>()).unwrap()
    }

    fn engine(rows: &[&[Color]], seq: Vec<usize>) -> GridEngine<Script> {
        GridEngine::from_grid(grid_of(rows), Palette::default(), Script { seq, pos: 0 })
    }

    #[test]
    fn test_rejections_leave_state_untouched() {
        let mut e = engine(
            &[&[Red, Green, Red], &[Green, Red, Green], &[Blue, Blue, Red]],
            vec![0],
        );
        let before = e.grid().clone();

        assert_eq!(
            e.attempt_swap(Coord::new(0, 0), Coord::new(0, 3)),
            SwapOutcome::Rejected(SwapRejection::InvalidCoordinate)
        );
        assert_eq!(
            e.attempt_swap(Coord::new(1, 1), Coord::new(1, 1)),
            SwapOutcome::Rejected(SwapRejection::Identical)
        );
        assert_eq!(
            e.attempt_swap(Coord::new(0, 0), Coord::new(1, 1)),
            SwapOutcome::Rejected(SwapRejection::NonAdjacent)
        );
        assert_eq!(e.grid(), &before);
        assert_eq!(e.score(), 0);
    }

    #[test]
    fn test_out_of_bounds_checked_before_identity() {
        let mut e = engine(
            &[&[Red, Green, Red], &[Green, Red, Green], &[Blue, Blue, Red]],
            vec![0],
        );
        assert_eq!(
            e.attempt_swap(Coord::new(5, 5), Coord::new(5, 5)),
            SwapOutcome::Rejected(SwapRejection::InvalidCoordinate)
        );
    }

    #[test]
    fn test_no_match_swap_is_undone() {
        let mut e = engine(
            &[&[Red, Green, Red], &[Green, Red, Green], &[Blue, Yellow, Red]],
            vec![0],
        );
        let before = e.grid().clone();
        assert_eq!(
            e.attempt_swap(Coord::new(2, 0), Coord::new(2, 1)),
            SwapOutcome::NoMatch
        );
        assert_eq!(e.grid(), &before);
        assert_eq!(e.moves(), 0);
    }

    #[test]
    fn test_small_swap_resolves_with_scripted_refill() {
        // Swapping (1,2) with (2,2) lines up three greens on the bottom row.
        let mut e = engine(
            &[&[Red, Blue, Red], &[Blue, Red, Green], &[Green, Green, Blue]],
            vec![3, 4, 5],
        );
        let outcome = e.attempt_swap(Coord::new(1, 2), Coord::new(2, 2));
        let SwapOutcome::Resolved(report) = outcome else {
            panic!("expected resolved, got {:?}", outcome);
        };
        assert_eq!(report.passes, 1);
        assert_eq!(report.total_removed, 3);
        assert_eq!(report.score_delta, 30);
        assert_eq!(e.score(), 30);
        assert_eq!(e.moves(), 1);
        assert!(e.is_settled());
        // Each column dropped by one; row 0 is the refill.
        assert_eq!(
            e.grid().to_rows()[0],
            vec![Cell::Filled(Yellow), Cell::Filled(Purple), Cell::Filled(Cyan)]
        );
    }

    #[test]
    fn test_settle_does_not_score() {
        let mut e = engine(
            &[&[Red, Red, Red], &[Green, Blue, Green], &[Blue, Green, Blue]],
            vec![3, 4, 5],
        );
        let report = e.settle();
        assert_eq!(report.total_removed, 3);
        assert_eq!(e.score(), 0);
        assert!(e.is_settled());
    }

    #[test]
    fn test_seeded_engines_agree() {
        let config = EngineConfig {
            seed: 2024,
            ..EngineConfig::default()
        };
        let a = GridEngine::new(&config).unwrap();
        let b = GridEngine::new(&config).unwrap();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_restart_resets_score_and_keeps_size() {
        let config = EngineConfig {
            grid_size: 6,
            seed: 9,
            settle_on_start: true,
            ..EngineConfig::default()
        };
        let mut e = GridEngine::new(&config).unwrap();
        assert!(e.is_settled());
        e.restart();
        assert_eq!(e.grid().size(), 6);
        assert_eq!(e.score(), 0);
        assert!(e.is_settled());
    }
}
