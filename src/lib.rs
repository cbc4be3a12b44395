//! Destination Ranking Library.
//!
//! Ranks candidate compute destinations for a pending job by combining
//! the proximity of the job's input data to each destination with a
//! load heuristic derived from live queue and runtime statistics.
//!
//! The entry points are [`get_sorted_destinations`], which returns
//! destination ids best first, and [`rank_destinations`], which also
//! returns the score or distance that placed each destination.
//! Everything is pure and synchronous over pre-fetched inputs.

#[macro_use]
extern crate log;

pub mod error;

pub mod types {
    pub mod destination;
    pub mod job;
    pub mod location;
    pub mod measure;
    pub mod object_store;
    pub mod ranking;
    pub mod status;
}

pub mod utils {
    pub mod haversine;
    pub mod request;
    pub mod resolver;
}

pub mod algorithms {
    pub mod matching;
    pub mod proximity;
    pub mod ranker;
}

pub use algorithms::*;
pub use types::*;
pub use utils::*;

pub use error::{RankingError, RankingResult};
pub use ranker::{get_sorted_destinations, rank_destinations};
pub use request::RankingRequest;
