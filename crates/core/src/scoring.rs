//! Scoring module
//!
//! Every removal pass credits a flat amount per removed cell. Cascade passes
//! score exactly like the first pass; there is no multiplier.

use crate::types::{CascadeReport, POINTS_PER_CELL};

/// Points for one removal pass
pub fn pass_score(removed: usize) -> u32 {
    (removed as u32).saturating_mul(POINTS_PER_CELL)
}

/// Append one pass to a running report
pub fn record_pass(report: &mut CascadeReport, removed: usize) {
    let removed = removed as u32;
    report.passes += 1;
    report.total_removed = report.total_removed.saturating_add(removed);
    report.score_delta = report.score_delta.saturating_add(pass_score(removed as usize));
    report.removed_per_pass.push(removed);
}
