//! Definition of the ranker's output records.

use serde::Serialize;

use super::measure::Measure;

/// Which rule placed a destination in the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankReason {
    /// Resource-feasible; ordered by descending matching score.
    MatchingScore,
    /// No destination was feasible; ordered by ascending distance to
    /// the input data.
    DataProximity,
}

/// One entry of a ranking, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDestination {
    pub destination_id: String,

    /// The sort key: the matching score for
    /// [`RankReason::MatchingScore`], the distance in kilometers for
    /// [`RankReason::DataProximity`].
    pub score_or_distance: Measure,

    /// Distance in kilometers from the destination to the closest
    /// object store holding the job's inputs. Informational on the
    /// matching-score path.
    pub distance_to_data: Measure,

    pub rank_reason: RankReason,
}
