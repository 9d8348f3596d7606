//! Two-step selection: pick a cell, then pick a neighbour to swap with it

use crate::engine::{are_adjacent, GridEngine};
use crate::rng::ColorSource;
use crate::types::{Coord, SwapOutcome};

/// What a call to [`Selection::select`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing was pending; `coord` is now selected
    Selected(Coord),
    /// A pending selection was dropped without a swap
    Cleared,
    /// The pending cell and its neighbour were handed to the engine
    Swapped {
        from: Coord,
        to: Coord,
        outcome: SwapOutcome,
    },
    /// Out of bounds; selection unchanged
    Ignored,
}

/// Pending first pick, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Coord>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Feed one pick.
    ///
    /// A second pick always ends the selection. It swaps when the two cells are
    /// adjacent, otherwise it just clears (re-picking the same cell deselects).
    pub fn select<R: ColorSource>(
        &mut self,
        engine: &mut GridEngine<R>,
        coord: Coord,
    ) -> SelectOutcome {
        if !engine.grid().contains(coord) {
            return SelectOutcome::Ignored;
        }

        match self.selected.take() {
            None => {
                self.selected = Some(coord);
                SelectOutcome::Selected(coord)
            }
            Some(from) if are_adjacent(from, coord) => SelectOutcome::Swapped {
                from,
                to: coord,
                outcome: engine.attempt_swap(from, coord),
            },
            Some(_) => SelectOutcome::Cleared,
        }
    }
}
