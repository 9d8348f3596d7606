//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so the engine, the
//! session adapter and any presentation layer can share them.
//!
//! # Grid Dimensions
//!
//! - **Default size**: 8x8 cells
//! - **Minimum size**: 3x3 (a run needs three cells)
//! - **Coordinates**: `(row, col)`, row 0 at the top, increasing downward
//!
//! # Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_CELL` | 10 | Score credited for every removed cell, every pass |
//! | `MIN_RUN_LENGTH` | 3 | Shortest run that counts as a match |
//!
//! # Examples
//!
//! ```
//! use color_blocks_types::{Cell, Color, Coord, DEFAULT_GRID_SIZE};
//!
//! let cell = Cell::Filled(Color::Red);
//! assert_eq!(cell.color(), Some(Color::Red));
//! assert_eq!(Color::from_str("cyan"), Some(Color::Cyan));
//!
//! let a = Coord::new(2, 3);
//! assert!(a.is_adjacent(Coord::new(2, 4)));
//! assert!(!a.is_adjacent(Coord::new(3, 4)));
//!
//! assert_eq!(DEFAULT_GRID_SIZE, 8);
//! ```

/// Default grid dimension (8x8)
pub const DEFAULT_GRID_SIZE: usize = 8;

/// Smallest grid that can hold a run
pub const MIN_GRID_SIZE: usize = 3;

/// Minimum number of distinct colors a palette must carry
pub const MIN_PALETTE_SIZE: usize = 3;

/// Shortest run that counts as a match
pub const MIN_RUN_LENGTH: usize = 3;

/// Score credited per removed cell
pub const POINTS_PER_CELL: u32 = 10;

/// Number of passes after which a single resolution is logged as unusually long
pub const LONG_CASCADE_PASSES: u32 = 32;

/// The six tile colors
///
/// Wire codes are stable: 0 is reserved for an empty cell, colors use 1..=6 in
/// declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
}

impl Color {
    /// Every color in canonical order
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
        Color::Cyan,
    ];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use color_blocks_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("PURPLE"), Some(Color::Purple));
    /// assert_eq!(Color::from_str("magenta"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "blue" => Some(Color::Blue),
            "yellow" => Some(Color::Yellow),
            "purple" => Some(Color::Purple),
            "cyan" => Some(Color::Cyan),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
            Color::Cyan => "cyan",
        }
    }

    /// Stable wire code (1..=6)
    pub fn code(&self) -> u8 {
        match self {
            Color::Red => 1,
            Color::Green => 2,
            Color::Blue => 3,
            Color::Yellow => 4,
            Color::Purple => 5,
            Color::Cyan => 6,
        }
    }

    /// Inverse of [`Color::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=6 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }
}

/// A cell on the grid
///
/// Cells have no identity of their own; two cells are interchangeable when
/// their contents compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(*color),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// Wire code: 0 for empty, otherwise [`Color::code`]
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled(color) => color.code(),
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        if code == 0 {
            Some(Cell::Empty)
        } else {
            Color::from_code(code).map(Cell::Filled)
        }
    }
}

impl From<Color> for Cell {
    fn from(value: Color) -> Self {
        Cell::Filled(value)
    }
}

/// Grid coordinate, `row` increasing downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 4-connected adjacency: exactly one axis differs, by exactly one
    ///
    /// # Examples
    ///
    /// ```
    /// use color_blocks_types::Coord;
    ///
    /// let origin = Coord::new(0, 0);
    /// assert!(origin.is_adjacent(Coord::new(1, 0)));
    /// assert!(origin.is_adjacent(Coord::new(0, 1)));
    /// assert!(!origin.is_adjacent(Coord::new(1, 1)));
    /// assert!(!origin.is_adjacent(Coord::new(2, 0)));
    /// assert!(!origin.is_adjacent(origin));
    /// ```
    pub fn is_adjacent(&self, other: Coord) -> bool {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Why a swap was refused without touching the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapRejection {
    /// One of the coordinates lies outside the grid
    InvalidCoordinate,
    /// The coordinates are not 4-adjacent
    NonAdjacent,
    /// Both coordinates name the same cell
    Identical,
}

impl SwapRejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapRejection::InvalidCoordinate => "invalid_coordinate",
            SwapRejection::NonAdjacent => "non_adjacent",
            SwapRejection::Identical => "identical",
        }
    }
}

/// Trace of one cascade resolution
///
/// `score_delta` is always `total_removed * POINTS_PER_CELL`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeReport {
    /// Cells removed across every pass
    pub total_removed: u32,
    /// Number of removal passes
    pub passes: u32,
    /// Score credited for this resolution
    pub score_delta: u32,
    /// Cells removed by each pass, in order
    pub removed_per_pass: Vec<u32>,
}

/// Result of a swap attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Precondition failed; nothing changed
    Rejected(SwapRejection),
    /// Swap produced no match and was undone
    NoMatch,
    /// Swap produced at least one match and the grid was resolved
    Resolved(CascadeReport),
}

impl SwapOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SwapOutcome::Resolved(_))
    }

    /// Score credited by this outcome (0 unless resolved)
    pub fn score_delta(&self) -> u32 {
        match self {
            SwapOutcome::Resolved(report) => report.score_delta,
            _ => 0,
        }
    }
}
