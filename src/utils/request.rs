//! Decoding of ranking requests handed over by the scheduler.
//!
//! The scheduler gathers job requirements, live destination status,
//! the object-store registry and the job's dataset attributes, and
//! passes them in one JSON document:
//!
//! ```json
//! {
//!   "job": {"cores": 4, "memory": 16},
//!   "destinations": [{"destination_id": "...", "dest_status": "online", ...}],
//!   "object_stores": {"1": {"latitude": 50.1, "longitude": 8.7}},
//!   "dataset_attributes": {"input_1": {"object_store_id": 1}}
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::destination::Destination;
use crate::error::RankingResult;
use crate::job::JobRequirement;
use crate::object_store::{DatasetAttributes, ObjectStores};
use crate::ranker::{get_sorted_destinations, rank_destinations};
use crate::ranking::ScoredDestination;

/// All inputs of one ranking call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankingRequest {
    pub job: JobRequirement,

    #[serde(default)]
    pub destinations: Vec<Destination>,

    #[serde(default)]
    pub object_stores: ObjectStores,

    #[serde(default)]
    pub dataset_attributes: DatasetAttributes,
}

impl RankingRequest {
    /// Parses a request document.
    ///
    /// # Errors
    /// [`RankingError::MalformedRequest`](crate::error::RankingError::MalformedRequest)
    /// if the document is not valid JSON or a field has the wrong type.
    pub fn from_json(json: &str) -> RankingResult<RankingRequest> {
        let request: RankingRequest = serde_json::from_str(json)?;
        debug!(
            "decoded request: {} destinations, {} object stores, {} datasets",
            request.destinations.len(),
            request.object_stores.len(),
            request.dataset_attributes.len()
        );
        Ok(request)
    }

    /// Ranks the request's destinations. See
    /// [`rank_destinations`](crate::ranker::rank_destinations).
    pub fn rank(&self) -> RankingResult<Vec<ScoredDestination>> {
        rank_destinations(
            &self.job,
            &self.destinations,
            &self.object_stores,
            &self.dataset_attributes,
        )
    }

    /// Destination ids, best first. See
    /// [`get_sorted_destinations`](crate::ranker::get_sorted_destinations).
    pub fn sorted_destinations(&self) -> RankingResult<Vec<String>> {
        get_sorted_destinations(
            &self.job,
            &self.destinations,
            &self.object_stores,
            &self.dataset_attributes,
        )
    }
}
