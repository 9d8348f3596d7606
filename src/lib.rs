//! Color Blocks (workspace facade crate).
//!
//! Exposes `color_blocks::{core,adapter,types}` while the implementation lives
//! in dedicated crates under `crates/`, plus the process [`config`].

pub mod config;

pub use color_blocks_adapter as adapter;
pub use color_blocks_core as core;
pub use color_blocks_types as types;
