//! Struct definitions and implementations for [`Destination`], the
//! record describing one candidate compute resource pool.
//!
//! A destination carries three groups of data, all collected by an
//! upstream metrics pipeline and handed to the ranker pre-fetched:
//!
//! * identity and liveness (`destination_id`, `dest_status`),
//! * a geographic [`Location`] used as a data-locality proxy,
//! * live utilization: free-resource [`Histogram`]s and aggregate
//!   queue/run statistics.
//!
//! Field names follow the boundary records verbatim so that the
//! scheduler can pass its JSON through unchanged. The ranker only reads
//! these records; derived values are returned separately as
//! [`ScoredDestination`](super::ranking::ScoredDestination)s.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::location::{AsLocation, Location};
use super::status::Status;
use crate::error::{RankingError, RankingResult};

/// Free-resource histogram of a cluster.
///
/// Keys are the amount of a resource free on a node (cores, or MB of
/// memory) encoded as strings; values are how many nodes currently
/// report that amount. Only the keys matter for feasibility, so counts
/// are kept as plain numbers and never validated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Histogram(pub BTreeMap<String, f64>);

impl Histogram {
    /// Whether at least one node reports `required` or more of the
    /// resource free.
    ///
    /// # Errors
    /// A bucket key that is not an integer is a caller contract
    /// violation and fails with [`RankingError::InvalidHistogramKey`].
    pub fn has_bucket_at_least(
        &self,
        required: f64,
        destination_id: &str,
        histogram: &'static str,
    ) -> RankingResult<bool> {
        let mut sufficient = false;
        for key in self.0.keys() {
            let free = key
                .trim()
                .parse::<i64>()
                .map_err(|_| RankingError::InvalidHistogramKey {
                    destination_id: destination_id.to_string(),
                    histogram,
                    key: key.clone(),
                })?;
            if free as f64 >= required {
                sufficient = true;
            }
        }
        Ok(sufficient)
    }
}

impl<const N: usize> From<[(&str, u64); N]> for Histogram {
    fn from(buckets: [(&str, u64); N]) -> Self {
        Histogram(
            buckets
                .into_iter()
                .map(|(key, count)| (key.to_string(), count as f64))
                .collect(),
        )
    }
}

/// A candidate compute destination.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Destination {
    /// Stable identifier returned in the ranking.
    pub destination_id: String,

    /// Liveness. Absent or `null` deserializes as [`Status::Unknown`].
    #[serde(default)]
    pub dest_status: Status,

    /// Denotes the geographical position of the destination.
    #[serde(flatten)]
    pub location: Location,

    /// Free cores per node.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dest_cpu_histogram: Histogram,

    /// Free memory (MB) per node.
    #[serde(default, deserialize_with = "null_as_default")]
    pub dest_memory_histogram: Histogram,

    /// Median time jobs for this tool spent queued.
    #[serde(default)]
    pub dest_tool_median_queue_time: Option<f64>,

    /// Jobs currently queued. Defaults to 1 when absent.
    #[serde(default)]
    pub dest_queue_count: Option<f64>,

    /// Median run time of jobs for this tool.
    #[serde(default)]
    pub dest_tool_median_run_time: Option<f64>,

    /// Jobs currently running. Defaults to 1 when absent.
    #[serde(default)]
    pub dest_run_count: Option<f64>,
}

impl Destination {
    /// Creates an online destination with empty histograms and no
    /// statistics.
    pub fn new(destination_id: impl Into<String>, latitude: f64, longitude: f64) -> Destination {
        Destination {
            destination_id: destination_id.into(),
            dest_status: Status::Online,
            location: Location {
                latitude,
                longitude,
            },
            ..Default::default()
        }
    }

    pub fn is_online(&self) -> bool {
        self.dest_status.is_online()
    }
}

impl AsLocation for Destination {
    fn as_location(&self) -> &Location {
        &self.location
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
