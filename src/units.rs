// Unit handling for user-facing input and output. The model works in
// ft/s and yards throughout; metric values are converted at the edges.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::constants::{FPS_TO_MPS, YARDS_TO_METERS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// ft/s and yards
    #[default]
    Imperial,
    /// m/s and meters
    Metric,
}

impl UnitSystem {
    pub fn velocity_to_fps(self, val: f64) -> f64 {
        match self {
            UnitSystem::Imperial => val,
            UnitSystem::Metric => val / FPS_TO_MPS,
        }
    }

    pub fn distance_to_yards(self, val: f64) -> f64 {
        match self {
            UnitSystem::Imperial => val,
            UnitSystem::Metric => val / YARDS_TO_METERS,
        }
    }

    pub fn distance_from_yards(self, yards: f64) -> f64 {
        match self {
            UnitSystem::Imperial => yards,
            UnitSystem::Metric => yards * YARDS_TO_METERS,
        }
    }

    pub fn velocity_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "ft/s",
            UnitSystem::Metric => "m/s",
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            UnitSystem::Imperial => "yards",
            UnitSystem::Metric => "meters",
        }
    }
}
