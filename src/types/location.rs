//! Struct definitions and implementations for [`Location`].
//!
//! Destinations and object stores are both pinned to a geographic
//! coordinate that serves as a proxy for network locality. Neither
//! record "is" a location, so the [`AsLocation`] trait lets distance
//! functions accept any located record without copying coordinates.

use serde::{Deserialize, Serialize};

/// A [`Location`] is an interface type that represents the geographic
/// position of a compute destination or a storage backend, in decimal
/// degrees.
///
/// Values outside the geodetic range are accepted as-is. They produce
/// mathematically defined (if meaningless) distances.
#[derive(Debug, PartialEq, Copy, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    /// The latitude of the location.
    pub latitude: f64,

    /// The longitude of the location.
    pub longitude: f64,
}

/// Since Rust doesn't allow for inheritance, records that carry a
/// position implement this trait to be usable wherever a [`Location`]
/// is expected.
pub trait AsLocation {
    /// Returns the coordinate the object is pinned to.
    fn as_location(&self) -> &Location;
}

impl AsLocation for Location {
    fn as_location(&self) -> &Location {
        self
    }
}
