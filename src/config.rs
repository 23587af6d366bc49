//! File-backed estimator configuration.
//!
//! ```json
//! {
//!   "acoustic": { "speed_of_sound_fps": 1125.0 },
//!   "solver": { "max_distance_yards": 3000.0 }
//! }
//! ```
//!
//! Missing sections and fields fall back to their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::acoustic::AcousticConfig;
use crate::error::Result;
use crate::solver::SolverConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    pub acoustic: AcousticConfig,
    pub solver: SolverConfig,
}

impl EstimatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EstimatorConfig = serde_json::from_str(json)?;
        config.solver.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }
}
