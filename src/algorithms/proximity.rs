//! Data-locality scoring of a destination.

use crate::haversine;
use crate::location::AsLocation;
use crate::measure::Measure;
use crate::object_store::{DatasetAttributes, ObjectStores};
use crate::resolver::get_object_store;

/// Calculates the minimum distance in kilometers between a destination
/// and the object stores holding the job's input datasets.
///
/// # Returns
/// [`Measure::Unknown`] when no dataset names an object store, or when
/// none of the named stores are in the registry. Stores missing from
/// the registry are skipped.
pub fn closest_destination(
    destination: &dyn AsLocation,
    object_stores: &ObjectStores,
    dataset_attributes: &DatasetAttributes,
) -> Measure {
    get_object_store(dataset_attributes)
        .iter()
        .filter_map(|id| {
            let store = object_stores.get(id);
            if store.is_none() {
                debug!("object store {} not in registry, skipping", id);
            }
            store
        })
        .map(|store| Measure::new(haversine::distance_between(store, destination)))
        .min()
        .unwrap_or(Measure::Unknown)
}
