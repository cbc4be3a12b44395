//! Definition of [`JobRequirement`].

use serde::{Deserialize, Serialize};

/// Cluster metrics report free memory in MB while job requirements
/// are expressed in GB.
pub const MB_PER_GB: f64 = 1024.0;

/// The resource ask of a pending job.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JobRequirement {
    /// Required CPU cores.
    pub cores: f64,

    /// Required memory in GB.
    pub memory: f64,
}

impl JobRequirement {
    pub fn new(cores: f64, memory: f64) -> JobRequirement {
        JobRequirement { cores, memory }
    }

    /// Required memory in MB, the unit of destination memory histograms.
    pub fn required_memory_mb(&self) -> f64 {
        self.memory * MB_PER_GB
    }
}
