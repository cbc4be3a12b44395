//! Ranking error types.
//!
//! Missing statistics and unresolvable data locality are not errors:
//! they degrade to [`Measure::Unknown`](crate::measure::Measure). Only
//! caller contract violations end up here.

use thiserror::Error;

/// Errors that fail a ranking request.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("destination {destination_id}: {histogram} histogram key {key:?} is not an integer")]
    InvalidHistogramKey {
        destination_id: String,
        histogram: &'static str,
        key: String,
    },

    #[error("malformed ranking request: {0}")]
    MalformedRequest(#[from] serde_json::Error),
}

pub type RankingResult<T> = Result<T, RankingError>;
