//! Load-based desirability of a destination.
//!
//! The matching score adds two inverse factors, one for the queue and
//! one for compute:
//!
//! * queue factor `qm = 1 / (median queue time × queued jobs)`
//! * compute factor `cm = 1 / (median run time × running jobs)`
//!
//! A factor whose inputs are missing or not positive is
//! [`Measure::Unknown`]. An idle or unmeasured axis is treated as
//! infinitely attractive rather than penalized, and it carries through
//! the sum. Higher scores are better.

use crate::destination::Destination;
use crate::measure::Measure;

/// Queued jobs assumed when the destination does not report any.
pub const DEFAULT_QUEUE_COUNT: f64 = 1.0;

/// Running jobs assumed when the destination does not report any.
pub const DEFAULT_RUN_COUNT: f64 = 1.0;

/// `1 / (median_time × count)` when both are positive. An absent
/// median counts as not positive.
fn inverse_load(median_time: Option<f64>, count: f64) -> Measure {
    match median_time {
        Some(median) if median > 0.0 && count > 0.0 => Measure::new(1.0 / (median * count)),
        _ => Measure::Unknown,
    }
}

/// Calculates the matching score of a destination from its live queue
/// and runtime statistics.
pub fn calculate_matching_score(destination: &Destination) -> Measure {
    let qm = inverse_load(
        destination.dest_tool_median_queue_time,
        destination.dest_queue_count.unwrap_or(DEFAULT_QUEUE_COUNT),
    );
    let cm = inverse_load(
        destination.dest_tool_median_run_time,
        destination.dest_run_count.unwrap_or(DEFAULT_RUN_COUNT),
    );
    debug!(
        "{}: queue factor {}, compute factor {}",
        destination.destination_id, qm, cm
    );
    qm + cm
}
