//! Core grid logic - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules: the grid, run detection, removal,
//! gravity, refill, cascade resolution and scoring. It has **no dependencies**
//! on rendering, input devices, networking or I/O, making it:
//!
//! - **Deterministic**: same color stream produces identical grids and refills
//! - **Testable**: a scripted [`ColorSource`] pins every refill in tests
//! - **Portable**: runs headless, behind the TCP adapter, or under any front end
//!
//! # Module Structure
//!
//! - [`grid`]: N x N playfield in flat row-major storage
//! - [`matches`]: horizontal and vertical run detection
//! - [`gravity`]: clearing, column collapse, refill
//! - [`engine`]: swap validation and the cascade loop
//! - [`selection`]: two-pick selection feeding swaps
//! - [`scoring`]: 10 points per removed cell, every pass
//! - [`snapshot`]: plain-data views and stable hashing
//! - [`rng`]: seeded LCG and the [`ColorSource`] seam
//!
//! # Rules
//!
//! - **Swap**: only 4-adjacent cells, and only if the swap creates a run of three
//!   or more; otherwise the grid is restored.
//! - **Match**: every cell covered by a horizontal or vertical run of at least
//!   three equal colors. Cells in two runs count once.
//! - **Cascade**: remove, drop, refill from the top, repeat until nothing matches.
//!
//! # Example
//!
//! ```
//! use color_blocks_core::{EngineConfig, GridEngine, SwapOutcome};
//! use color_blocks_types::Coord;
//!
//! let mut engine = GridEngine::new(&EngineConfig {
//!     seed: 12345,
//!     settle_on_start: true,
//!     ..EngineConfig::default()
//! })
//! .unwrap();
//!
//! match engine.attempt_swap(Coord::new(0, 0), Coord::new(0, 1)) {
//!     SwapOutcome::Resolved(report) => assert_eq!(report.score_delta, engine.score()),
//!     SwapOutcome::NoMatch => assert_eq!(engine.score(), 0),
//!     SwapOutcome::Rejected(_) => unreachable!(),
//! }
//! assert!(engine.is_settled());
//! ```

pub mod engine;
pub mod error;
pub mod gravity;
pub mod grid;
pub mod matches;
pub mod palette;
pub mod rng;
pub mod scoring;
pub mod selection;
pub mod snapshot;

pub use color_blocks_types as types;

// Re-export commonly used types for convenience
pub use engine::{are_adjacent, cascade_resolve, cell_at, initialize, EngineConfig, GridEngine};
pub use error::EngineError;
pub use grid::Grid;
pub use matches::{find_matches, has_matches, MatchSet};
pub use palette::Palette;
pub use rng::{ColorSource, SimpleRng};
pub use selection::{SelectOutcome, Selection};
pub use snapshot::{fnv1a64, Fnv1aHasher, GridSnapshot};
pub use types::{CascadeReport, Cell, Color, Coord, SwapOutcome, SwapRejection};
