//! Grid module - the N x N playfield
//!
//! The grid is a square of cells stored as one flat row-major vector, so swap,
//! collapse and equality are plain value operations on a single buffer.
//! Coordinates: `(row, col)`, row 0 at the top.

use crate::error::EngineError;
use crate::palette::Palette;
use crate::rng::ColorSource;
use crate::types::{Cell, Color, Coord, MIN_GRID_SIZE};

/// The playfield - `size` x `size` cells using flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn empty(size: usize) -> Result<Self, EngineError> {
        if size < MIN_GRID_SIZE {
            return Err(EngineError::GridTooSmall(size));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Create a grid where every cell is an independent draw from `palette`.
    ///
    /// The result may already contain runs; nothing here resolves them.
    pub fn random<R: ColorSource>(
        size: usize,
        palette: &Palette,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        let mut grid = Self::empty(size)?;
        for cell in &mut grid.cells {
            *cell = Cell::Filled(palette.pick(rng));
        }
        Ok(grid)
    }

    /// Build a grid from explicit rows (top to bottom)
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, EngineError> {
        let size = rows.len();
        if size < MIN_GRID_SIZE {
            return Err(EngineError::GridTooSmall(size));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(EngineError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            cells.extend(values);
        }
        Ok(Self { size, cells })
    }

    /// Build a fully filled grid from rows of colors
    pub fn from_colors(rows: &[Vec<Color>]) -> Result<Self, EngineError> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().copied().map(Cell::Filled).collect())
                .collect(),
        )
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.row >= self.size || coord.col >= self.size {
            return None;
        }
        Some(coord.row * self.size + coord.col)
    }

    /// Grid dimension (rows == columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Get cell at `coord`
    /// Returns None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Set cell at `coord`
    /// Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the contents of two cells. Empty cells are exchanged like any other.
    /// Returns false (and changes nothing) if either coordinate is out of bounds.
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Cell at a known in-bounds position (row, col)
    #[inline(always)]
    pub(crate) fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Cell::is_filled)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// Column contents, top to bottom
    pub fn column(&self, col: usize) -> Vec<Cell> {
        if col >= self.size {
            return Vec::new();
        }
        (0..self.size).map(|row| self.at(row, col)).collect()
    }

    /// Convert to rows (top to bottom)
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.chunks(self.size).map(|row| row.to_vec()).collect()
    }
}
