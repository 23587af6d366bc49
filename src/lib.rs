//! # Bang-Thump
//!
//! Distance estimation from the interval between a rifle's muzzle blast and the
//! sound of the bullet striking the target. Bullet flight time comes from a
//! linear velocity-decay model fitted to one downrange velocity sample, the
//! return leg from the speed of sound, and the distance from a bounded
//! bisection over the sum.

// Re-export the main types and functions
pub use acoustic::{sound_time, AcousticConfig};
pub use config::EstimatorConfig;
pub use error::{BangThumpError, Result};
pub use solver::{find_distance, DistanceSolution, DistanceSolver, SolverConfig};
pub use total_time::{
    checked_total_flight_time, total_flight_time, total_flight_time_legacy, TotalTime,
};
pub use units::UnitSystem;
pub use velocity_model::{bullet_flight_time, BallisticSample, FlightTime};

// Module declarations
pub mod constants;
pub mod ffi;
mod acoustic;
mod config;
mod error;
mod solver;
mod total_time;
mod units;
mod velocity_model;
