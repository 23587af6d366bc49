//! Linear velocity-decay model for bullet flight time.
//!
//! Velocity is assumed to fall off linearly with downrange distance,
//! `v(x) = v0 + slope * x`, fitted through the muzzle velocity and one
//! measured downrange sample. Flight time over `d` yards is the closed form
//! of `∫ 3 dx / v(x)` from 0 to `d`:
//!
//! ```text
//! t = (3 / slope) * ln((v0 + slope * d) / v0)
//! ```
//!
//! which reduces to `3 d / v0` as the slope goes to zero.

use serde::{Deserialize, Serialize};

use crate::constants::{MIN_SLOPE_THRESHOLD, UNREACHABLE_FLIGHT_TIME_S, YARDS_TO_FEET};
use crate::error::{require_finite, require_non_negative, require_positive, Result};

/// Muzzle velocity plus one downrange velocity measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallisticSample {
    pub muzzle_velocity_fps: f64,
    pub reference_velocity_fps: f64,
    pub reference_distance_yards: f64,
}

/// Bullet flight time over a given distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightTime {
    /// Seconds from muzzle to target
    Valid(f64),
    /// The linear model stops the bullet (or starts it at a non-positive
    /// speed) before it reaches the requested distance
    Unreachable,
}

impl FlightTime {
    pub fn seconds(self) -> Option<f64> {
        match self {
            FlightTime::Valid(t) => Some(t),
            FlightTime::Unreachable => None,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, FlightTime::Valid(_))
    }

    /// Collapse to a scalar, using [`UNREACHABLE_FLIGHT_TIME_S`] for the
    /// unreachable case. Intended for legacy scalar outputs only.
    pub fn seconds_or_sentinel(self) -> f64 {
        self.seconds().unwrap_or(UNREACHABLE_FLIGHT_TIME_S)
    }
}

impl BallisticSample {
    pub fn new(
        muzzle_velocity_fps: f64,
        reference_velocity_fps: f64,
        reference_distance_yards: f64,
    ) -> Self {
        Self {
            muzzle_velocity_fps,
            reference_velocity_fps,
            reference_distance_yards,
        }
    }

    /// Reject samples the model cannot evaluate to a finite time: a
    /// non-positive muzzle velocity, a non-finite reference velocity, or a
    /// negative reference distance.
    pub fn validate(&self) -> Result<()> {
        require_positive("muzzle_velocity_fps", self.muzzle_velocity_fps)?;
        require_finite("reference_velocity_fps", self.reference_velocity_fps)?;
        require_non_negative("reference_distance_yards", self.reference_distance_yards)
    }

    /// Velocity change per yard (ft/s per yard).
    ///
    /// A zero reference distance carries no decay information, so the slope
    /// is defined as zero there.
    pub fn slope(&self) -> f64 {
        if self.reference_distance_yards == 0.0 {
            0.0
        } else {
            (self.reference_velocity_fps - self.muzzle_velocity_fps)
                / self.reference_distance_yards
        }
    }

    /// Modelled velocity (ft/s) at `distance_yards` downrange
    pub fn velocity_at(&self, distance_yards: f64) -> f64 {
        self.muzzle_velocity_fps + self.slope() * distance_yards
    }

    /// Distance (yards) at which the linear model reaches zero velocity.
    ///
    /// `None` when the velocity never decays to zero (non-negative slope).
    pub fn zero_velocity_distance(&self) -> Option<f64> {
        let slope = self.slope();
        if slope < -MIN_SLOPE_THRESHOLD && self.muzzle_velocity_fps > 0.0 {
            Some(-self.muzzle_velocity_fps / slope)
        } else {
            None
        }
    }

    /// Time for the bullet to cover `distance_yards`.
    ///
    /// In the constant-velocity regime the result is `3 d / v0` with no
    /// guard on `v0`, matching the scalar model: a zero muzzle velocity gives
    /// an infinite or NaN time there. Public solver entry points reject such
    /// samples before they get this far.
    pub fn flight_time(&self, distance_yards: f64) -> FlightTime {
        let slope = self.slope();
        let v0 = self.muzzle_velocity_fps;

        if slope.abs() < MIN_SLOPE_THRESHOLD {
            return FlightTime::Valid(distance_yards * YARDS_TO_FEET / v0);
        }

        let v_end = v0 + slope * distance_yards;
        if v_end <= 0.0 || v0 <= 0.0 {
            return FlightTime::Unreachable;
        }

        FlightTime::Valid((YARDS_TO_FEET / slope) * (v_end / v0).ln())
    }
}

/// Scalar bullet flight time in seconds.
///
/// Unphysical combinations return [`UNREACHABLE_FLIGHT_TIME_S`] instead of
/// failing. This is deliberate: the value propagates through the total-time
/// objective and steers the bisection toward shorter distances.
pub fn bullet_flight_time(
    distance_yards: f64,
    muzzle_velocity_fps: f64,
    reference_velocity_fps: f64,
    reference_distance_yards: f64,
) -> f64 {
    BallisticSample::new(
        muzzle_velocity_fps,
        reference_velocity_fps,
        reference_distance_yards,
    )
    .flight_time(distance_yards)
    .seconds_or_sentinel()
}
