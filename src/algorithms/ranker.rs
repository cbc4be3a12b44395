//! Ranks candidate destinations for a pending job.
//!
//! Ranking is a two-tier policy:
//!
//! 1. Keep destinations that are `online` and where at least one node
//!    has enough free CPU and at least one node (not necessarily the
//!    same one) has enough free memory. If any survive, order them by
//!    descending [matching score](crate::matching).
//! 2. Otherwise fall back to every `online` destination ordered by
//!    ascending [distance to the job's input data](crate::proximity).
//!
//! Both sorts are stable: ties keep the caller's order. Destination
//! records are never mutated; derived values are returned as
//! [`ScoredDestination`]s, so concurrent callers may share one snapshot.

use crate::destination::Destination;
use crate::error::RankingResult;
use crate::job::JobRequirement;
use crate::matching::calculate_matching_score;
use crate::object_store::{DatasetAttributes, ObjectStores};
use crate::proximity::closest_destination;
use crate::ranking::{RankReason, ScoredDestination};

/// Whether a destination is online and can fit the job somewhere.
///
/// # Errors
/// Fails if one of the destination's histograms has a non-integer key.
pub fn is_feasible(
    destination: &Destination,
    cores: f64,
    memory_mb: f64,
) -> RankingResult<bool> {
    if !destination.is_online() {
        debug!(
            "{}: status {:?}, skipping",
            destination.destination_id, destination.dest_status
        );
        return Ok(false);
    }
    let id = destination.destination_id.as_str();
    let has_cpu = destination
        .dest_cpu_histogram
        .has_bucket_at_least(cores, id, "cpu")?;
    let has_memory = destination
        .dest_memory_histogram
        .has_bucket_at_least(memory_mb, id, "memory")?;
    debug!(
        "{}: sufficient cpu: {}, sufficient memory: {}",
        id, has_cpu, has_memory
    );
    Ok(has_cpu && has_memory)
}

/// Ranks the destinations for the job, best first.
///
/// # Arguments
/// * `job` - Cores and memory (GB) the job asks for.
/// * `destinations` - Candidate destinations with live statistics.
/// * `object_stores` - Registry of object-store coordinates.
/// * `dataset_attributes` - The job's input datasets.
///
/// # Returns
/// One entry per ranked destination. Offline destinations never
/// appear; the result is empty when no destination is online.
///
/// # Errors
/// Fails on a non-integer histogram key of an online destination.
pub fn rank_destinations(
    job: &JobRequirement,
    destinations: &[Destination],
    object_stores: &ObjectStores,
    dataset_attributes: &DatasetAttributes,
) -> RankingResult<Vec<ScoredDestination>> {
    info!("Ranking {} destinations", destinations.len());
    let cores = job.cores;
    let memory_mb = job.required_memory_mb();
    debug!("required cores: {}, required memory: {} MB", cores, memory_mb);

    let mut feasible = Vec::new();
    for destination in destinations {
        if is_feasible(destination, cores, memory_mb)? {
            let distance = closest_destination(destination, object_stores, dataset_attributes);
            debug!("{}: distance to data {}", destination.destination_id, distance);
            feasible.push((destination, distance));
        }
    }

    let ranking = if feasible.is_empty() {
        info!("No destination has enough free resources, ranking by data proximity");
        let mut online: Vec<ScoredDestination> = destinations
            .iter()
            .filter(|destination| destination.is_online())
            .map(|destination| {
                let distance = closest_destination(destination, object_stores, dataset_attributes);
                debug!("{}: distance to data {}", destination.destination_id, distance);
                ScoredDestination {
                    destination_id: destination.destination_id.clone(),
                    score_or_distance: distance,
                    distance_to_data: distance,
                    rank_reason: RankReason::DataProximity,
                }
            })
            .collect();
        online.sort_by(|a, b| a.score_or_distance.cmp(&b.score_or_distance));
        online
    } else {
        let mut scored: Vec<ScoredDestination> = feasible
            .into_iter()
            .map(|(destination, distance)| {
                let score = calculate_matching_score(destination);
                debug!("{}: matching score {}", destination.destination_id, score);
                ScoredDestination {
                    destination_id: destination.destination_id.clone(),
                    score_or_distance: score,
                    distance_to_data: distance,
                    rank_reason: RankReason::MatchingScore,
                }
            })
            .collect();
        scored.sort_by(|a, b| b.score_or_distance.cmp(&a.score_or_distance));
        scored
    };

    info!("Finished ranking, {} destinations ranked", ranking.len());
    Ok(ranking)
}

/// Sorts the destinations for the job and returns their ids, best
/// first. See [`rank_destinations`].
pub fn get_sorted_destinations(
    job: &JobRequirement,
    destinations: &[Destination],
    object_stores: &ObjectStores,
    dataset_attributes: &DatasetAttributes,
) -> RankingResult<Vec<String>> {
    let ranking = rank_destinations(job, destinations, object_stores, dataset_attributes)?;
    let ids: Vec<String> = ranking.into_iter().map(|d| d.destination_id).collect();
    debug!("sorted destinations: {:?}", ids);
    Ok(ids)
}

#[cfg(test)]
mod ranker_tests {
    use super::*;
    use crate::destination::Histogram;
    use crate::error::RankingError;
    use crate::measure::Measure;
    use crate::object_store::{DatasetAttribute, ObjectStoreInfo};
    use crate::status::Status;

    /// Object store in Paris holding every input dataset.
    fn paris_store() -> (ObjectStores, DatasetAttributes) {
        (
            ObjectStores::from([("paris".to_string(), ObjectStoreInfo::new(48.8566, 2.3522))]),
            DatasetAttributes::from([
                ("input_1".to_string(), DatasetAttribute::stored_in("paris")),
                ("input_2".to_string(), DatasetAttribute::stored_in("paris")),
            ]),
        )
    }

    /// An online destination with 16 free cores and 32 GB free on some
    /// node, and the given queue/run medians.
    fn destination(
        id: &str,
        latitude: f64,
        longitude: f64,
        queue_time: f64,
        run_time: f64,
    ) -> Destination {
        Destination {
            dest_cpu_histogram: Histogram::from([("2", 10), ("16", 1)]),
            dest_memory_histogram: Histogram::from([("4096", 10), ("32768", 1)]),
            dest_tool_median_queue_time: Some(queue_time),
            dest_queue_count: Some(1.0),
            dest_tool_median_run_time: Some(run_time),
            dest_run_count: Some(1.0),
            ..Destination::new(id, latitude, longitude)
        }
    }

    fn ids(ranking: &[ScoredDestination]) -> Vec<&str> {
        ranking.iter().map(|d| d.destination_id.as_str()).collect()
    }

    #[test]
    fn test_sorted_by_matching_score() {
        let (stores, attrs) = paris_store();
        let destinations = vec![
            destination("busy", 48.85, 2.35, 100.0, 100.0),
            destination("idle", 35.68, 139.69, 1.0, 1.0),
            destination("medium", 40.71, -74.0, 10.0, 10.0),
        ];
        let job = JobRequirement::new(8.0, 16.0);

        let ranking = rank_destinations(&job, &destinations, &stores, &attrs).unwrap();
        assert_eq!(ids(&ranking), vec!["idle", "medium", "busy"]);
        assert!(ranking
            .iter()
            .all(|d| d.rank_reason == RankReason::MatchingScore));
        assert!(ranking
            .windows(2)
            .all(|w| w[0].score_or_distance >= w[1].score_or_distance));
        // Distance is computed for feasible destinations but not used.
        assert!(ranking.iter().all(|d| !d.distance_to_data.is_unknown()));
        assert!(ranking[2].distance_to_data < ranking[0].distance_to_data);
    }

    #[test]
    fn test_unknown_score_ranks_first() {
        let (stores, attrs) = paris_store();
        let destinations = vec![
            destination("measured", 0.0, 0.0, 1.0, 1.0),
            destination("unmeasured", 0.0, 0.0, 0.0, 0.0),
        ];
        let sorted =
            get_sorted_destinations(&JobRequirement::new(1.0, 1.0), &destinations, &stores, &attrs)
                .unwrap();
        assert_eq!(sorted, vec!["unmeasured", "measured"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let (stores, attrs) = paris_store();
        let destinations = vec![
            destination("b", 0.0, 0.0, 0.0, 0.0),
            destination("a", 10.0, 10.0, 5.0, 5.0),
            destination("c", 20.0, 20.0, 0.0, 0.0),
            destination("d", 30.0, 30.0, 5.0, 5.0),
        ];
        let sorted =
            get_sorted_destinations(&JobRequirement::new(1.0, 1.0), &destinations, &stores, &attrs)
                .unwrap();
        assert_eq!(sorted, vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_infeasible_cpu_excluded() {
        let (stores, attrs) = paris_store();
        let mut small = destination("small", 48.85, 2.35, 1.0, 1.0);
        small.dest_cpu_histogram = Histogram::from([("4", 1)]);
        let destinations = vec![small, destination("large", 0.0, 0.0, 50.0, 50.0)];

        let sorted =
            get_sorted_destinations(&JobRequirement::new(8.0, 1.0), &destinations, &stores, &attrs)
                .unwrap();
        assert_eq!(sorted, vec!["large"]);
    }

    #[test]
    fn test_cpu_and_memory_checked_independently() {
        let (stores, attrs) = paris_store();
        let mut split = destination("split", 0.0, 0.0, 1.0, 1.0);
        // The node with many cores has little memory and vice versa.
        split.dest_cpu_histogram = Histogram::from([("16", 1), ("1", 1)]);
        split.dest_memory_histogram = Histogram::from([("1024", 1), ("65536", 1)]);

        let job = JobRequirement::new(16.0, 64.0);
        assert!(is_feasible(&split, job.cores, job.required_memory_mb()).unwrap());
        let sorted = get_sorted_destinations(&job, &[split], &stores, &attrs).unwrap();
        assert_eq!(sorted, vec!["split"]);
    }

    #[test]
    fn test_memory_converted_from_gb() {
        let mut dest = destination("d", 0.0, 0.0, 1.0, 1.0);
        dest.dest_memory_histogram = Histogram::from([("8192", 1)]);
        assert!(is_feasible(&dest, 1.0, JobRequirement::new(1.0, 8.0).required_memory_mb()).unwrap());
        assert!(!is_feasible(&dest, 1.0, JobRequirement::new(1.0, 9.0).required_memory_mb()).unwrap());
    }

    #[test]
    fn test_fallback_sorted_by_distance() {
        let (stores, attrs) = paris_store();
        let destinations = vec![
            destination("tokyo", 35.68, 139.69, 1.0, 1.0),
            destination("london", 51.5074, -0.1278, 1.0, 1.0),
            destination("new_york", 40.71, -74.0, 1.0, 1.0),
        ];
        let job = JobRequirement::new(64.0, 16.0);

        let ranking = rank_destinations(&job, &destinations, &stores, &attrs).unwrap();
        assert_eq!(ids(&ranking), vec!["london", "new_york", "tokyo"]);
        assert!(ranking
            .iter()
            .all(|d| d.rank_reason == RankReason::DataProximity
                && d.score_or_distance == d.distance_to_data));
        let london = ranking[0].score_or_distance.value().unwrap();
        assert!((343.0..=344.0).contains(&london), "got {london}");
    }

    #[test]
    fn test_fallback_unknown_distance_sorts_last() {
        let attrs = DatasetAttributes::from([(
            "input".to_string(),
            DatasetAttribute::stored_in("paris"),
        )]);
        let stores = ObjectStores::from([("paris".to_string(), ObjectStoreInfo::new(48.8566, 2.3522))]);
        let destinations = vec![
            destination("far", -33.87, 151.21, 1.0, 1.0),
            destination("near", 50.11, 8.68, 1.0, 1.0),
        ];
        let job = JobRequirement::new(128.0, 1.0);
        let sorted = get_sorted_destinations(&job, &destinations, &stores, &attrs).unwrap();
        assert_eq!(sorted, vec!["near", "far"]);

        // Without any locality signal every distance is unknown and the
        // input order is kept.
        let ranking =
            rank_destinations(&job, &destinations, &stores, &DatasetAttributes::new()).unwrap();
        assert_eq!(ids(&ranking), vec!["far", "near"]);
        assert!(ranking.iter().all(|d| d.score_or_distance == Measure::Unknown));
    }

    #[test]
    fn test_offline_never_ranked() {
        let (stores, attrs) = paris_store();
        let mut offline = destination("offline", 48.8566, 2.3522, 0.0, 0.0);
        offline.dest_status = Status::Other("offline".to_string());
        let mut unknown = destination("unknown", 48.8566, 2.3522, 0.0, 0.0);
        unknown.dest_status = Status::Unknown;
        let online = destination("online", 0.0, 0.0, 100.0, 100.0);
        let destinations = vec![offline, unknown, online];

        // Primary path.
        let sorted =
            get_sorted_destinations(&JobRequirement::new(1.0, 1.0), &destinations, &stores, &attrs)
                .unwrap();
        assert_eq!(sorted, vec!["online"]);

        // Fallback path.
        let sorted = get_sorted_destinations(
            &JobRequirement::new(1000.0, 1.0),
            &destinations,
            &stores,
            &attrs,
        )
        .unwrap();
        assert_eq!(sorted, vec!["online"]);
    }

    #[test]
    fn test_empty_inputs() {
        let (stores, attrs) = paris_store();
        let job = JobRequirement::new(1.0, 1.0);
        assert!(get_sorted_destinations(&job, &[], &stores, &attrs)
            .unwrap()
            .is_empty());

        let mut offline = destination("offline", 0.0, 0.0, 1.0, 1.0);
        offline.dest_status = Status::Other("down".to_string());
        assert!(get_sorted_destinations(&job, &[offline], &stores, &attrs)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_invalid_histogram_key_fails() {
        let (stores, attrs) = paris_store();
        let mut broken = destination("broken", 0.0, 0.0, 1.0, 1.0);
        broken.dest_cpu_histogram = Histogram::from([("eight", 1)]);
        let res = get_sorted_destinations(&JobRequirement::new(1.0, 1.0), &[broken], &stores, &attrs);
        assert!(matches!(
            res,
            Err(RankingError::InvalidHistogramKey { histogram: "cpu", .. })
        ));
    }

    #[test]
    fn test_offline_histograms_not_parsed() {
        let (stores, attrs) = paris_store();
        let mut broken = destination("broken", 0.0, 0.0, 1.0, 1.0);
        broken.dest_cpu_histogram = Histogram::from([("eight", 1)]);
        broken.dest_status = Status::Other("offline".to_string());
        let ok = destination("ok", 0.0, 0.0, 1.0, 1.0);
        let sorted =
            get_sorted_destinations(&JobRequirement::new(1.0, 1.0), &[broken, ok], &stores, &attrs)
                .unwrap();
        assert_eq!(sorted, vec!["ok"]);
    }

    #[test]
    fn test_idempotent_and_inputs_untouched() {
        let (stores, attrs) = paris_store();
        let destinations = vec![
            destination("a", 10.0, 10.0, 3.0, 7.0),
            destination("b", 20.0, 20.0, 1.0, 2.0),
            destination("c", 30.0, 30.0, 9.0, 1.0),
        ];
        let snapshot = destinations.clone();
        let job = JobRequirement::new(2.0, 2.0);

        let first = rank_destinations(&job, &destinations, &stores, &attrs).unwrap();
        let second = rank_destinations(&job, &destinations, &stores, &attrs).unwrap();
        assert_eq!(first, second);
        assert_eq!(destinations, snapshot);
    }
}
