//! Object-store registry entries and dataset attributes.
//!
//! Both are owned by external registries. The ranker reads them to
//! work out where a job's input data lives.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};

use super::location::{AsLocation, Location};

/// Object-store registry keyed by object-store id.
pub type ObjectStores = HashMap<String, ObjectStoreInfo>;

/// Dataset attributes of a job keyed by dataset key.
///
/// Ordered so that resolving object stores is deterministic.
pub type DatasetAttributes = BTreeMap<String, DatasetAttribute>;

/// Registry entry of one storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectStoreInfo {
    #[serde(flatten)]
    pub location: Location,
}

impl ObjectStoreInfo {
    pub fn new(latitude: f64, longitude: f64) -> ObjectStoreInfo {
        ObjectStoreInfo {
            location: Location {
                latitude,
                longitude,
            },
        }
    }
}

impl AsLocation for ObjectStoreInfo {
    fn as_location(&self) -> &Location {
        &self.location
    }
}

/// One input dataset of a job. Only the backing store is relevant here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetAttribute {
    /// Backing object store, if known. Registries commonly use integer
    /// keys, so numbers are accepted and rendered as strings. Integer
    /// `0` is not a valid key and counts as absent.
    #[serde(default, deserialize_with = "string_or_number")]
    pub object_store_id: Option<String>,
}

impl DatasetAttribute {
    pub fn stored_in(object_store_id: impl Into<String>) -> DatasetAttribute {
        DatasetAttribute {
            object_store_id: Some(object_store_id.into()),
        }
    }

    /// The backing store id, treating an empty id as absent.
    pub fn object_store(&self) -> Option<&str> {
        self.object_store_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<RawId>::deserialize(deserializer)?.and_then(|raw| match raw {
            RawId::Text(text) => Some(text),
            RawId::Integer(0) => None,
            RawId::Integer(number) => Some(number.to_string()),
        }),
    )
}
