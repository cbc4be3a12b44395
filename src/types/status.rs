//! Definition for the [`Status`] type, implemented by an enum.

use serde::{Deserialize, Serialize};

/// Boundary spelling of the only status eligible for ranking.
pub const ONLINE: &str = "online";

/// Represents the liveness status of a
/// [`Destination`](super::destination::Destination).
///
/// Upstream collectors report the status as a free-form string. Only
/// `"online"` is meaningful to the ranker; every other value is kept
/// verbatim for logging.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Status {
    /// The destination accepts jobs.
    Online,
    /// No status was reported.
    #[default]
    Unknown,
    /// Any other reported status (`"offline"`, `"maintenance"`, ...).
    Other(String),
}

impl Status {
    /// Whether the destination may appear in a ranking.
    pub fn is_online(&self) -> bool {
        matches!(self, Status::Online)
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        if value == ONLINE {
            Status::Online
        } else {
            Status::Other(value)
        }
    }
}

impl From<Option<String>> for Status {
    fn from(value: Option<String>) -> Self {
        value.map(Status::from).unwrap_or_default()
    }
}

impl From<Status> for Option<String> {
    fn from(status: Status) -> Self {
        match status {
            Status::Online => Some(ONLINE.to_string()),
            Status::Unknown => None,
            Status::Other(value) => Some(value),
        }
    }
}
