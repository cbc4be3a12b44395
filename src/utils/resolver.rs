//! Resolves which object stores hold a job's input datasets.

use crate::object_store::DatasetAttributes;

/// Extracts the distinct object-store ids referenced by the datasets,
/// in first-seen order.
///
/// Datasets without a store (or with an empty id) are skipped. An empty
/// result means the data locality of the job is unknown.
pub fn get_object_store(dataset_attributes: &DatasetAttributes) -> Vec<String> {
    let mut object_stores: Vec<String> = Vec::new();
    for id in dataset_attributes.values().filter_map(|a| a.object_store()) {
        if !object_stores.iter().any(|known| known == id) {
            object_stores.push(id.to_string());
        }
    }
    debug!("object stores: {:?}", object_stores);
    object_stores
}
