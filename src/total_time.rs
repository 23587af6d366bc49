//! Forward model: distance to observed bang-thump time.

use crate::acoustic::AcousticConfig;
use crate::constants::UNREACHABLE_FLIGHT_TIME_S;
use crate::error::{require_non_negative, Result};
use crate::velocity_model::{BallisticSample, FlightTime};

/// Breakdown of the bang-thump interval for one candidate distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalTime {
    pub bullet: FlightTime,
    pub sound_seconds: f64,
}

impl TotalTime {
    /// Bullet plus sound time, or `None` if the bullet never arrives
    pub fn seconds(&self) -> Option<f64> {
        self.bullet.seconds().map(|t| t + self.sound_seconds)
    }

    /// Same as [`TotalTime::seconds`] but with the unreachable sentinel
    /// standing in for the bullet leg, as the scalar model reports it.
    pub fn seconds_or_sentinel(&self) -> f64 {
        match self.bullet {
            FlightTime::Valid(t) => t + self.sound_seconds,
            FlightTime::Unreachable => UNREACHABLE_FLIGHT_TIME_S + self.sound_seconds,
        }
    }
}

/// Evaluate the forward model at `distance_yards`.
///
/// Strictly increasing in distance while the muzzle velocity is positive and
/// the bullet has not decelerated to zero; the distance solver relies on it.
pub fn total_flight_time(
    distance_yards: f64,
    sample: &BallisticSample,
    acoustic: &AcousticConfig,
) -> TotalTime {
    TotalTime {
        bullet: sample.flight_time(distance_yards),
        sound_seconds: acoustic.sound_time(distance_yards),
    }
}

/// [`total_flight_time`] with the inputs validated first.
///
/// A zero muzzle velocity or speed of sound would otherwise come back as an
/// infinite time rather than an error.
pub fn checked_total_flight_time(
    distance_yards: f64,
    sample: &BallisticSample,
    acoustic: &AcousticConfig,
) -> Result<TotalTime> {
    require_non_negative("distance_yards", distance_yards)?;
    sample.validate()?;
    acoustic.validate()?;
    Ok(total_flight_time(distance_yards, sample, acoustic))
}

/// Scalar form of [`total_flight_time`]; unreachable distances include the sentinel.
pub fn total_flight_time_legacy(
    distance_yards: f64,
    muzzle_velocity_fps: f64,
    reference_velocity_fps: f64,
    reference_distance_yards: f64,
    speed_of_sound_fps: f64,
) -> f64 {
    let sample = BallisticSample::new(
        muzzle_velocity_fps,
        reference_velocity_fps,
        reference_distance_yards,
    );
    total_flight_time(
        distance_yards,
        &sample,
        &AcousticConfig::new(speed_of_sound_fps),
    )
    .seconds_or_sentinel()
}
