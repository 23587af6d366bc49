//! Travel time of the impact sound back to the shooter.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_SPEED_OF_SOUND_FPS, FAHRENHEIT_TO_RANKINE, SPEED_OF_SOUND_COEFF_FPS, YARDS_TO_FEET,
};
use crate::error::{require_positive, Result};

/// Ambient acoustic conditions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcousticConfig {
    /// Speed of sound (ft/s). Must be positive.
    pub speed_of_sound_fps: f64,
}

impl Default for AcousticConfig {
    fn default() -> Self {
        Self {
            speed_of_sound_fps: DEFAULT_SPEED_OF_SOUND_FPS,
        }
    }
}

impl AcousticConfig {
    pub fn new(speed_of_sound_fps: f64) -> Self {
        Self { speed_of_sound_fps }
    }

    /// Derive the speed of sound from air temperature in °F.
    ///
    /// Dry air, ideal gas. Humidity raises the result by well under 1%
    /// and is ignored.
    pub fn from_temperature_f(temperature_f: f64) -> Self {
        let rankine = (temperature_f + FAHRENHEIT_TO_RANKINE).max(0.0);
        Self {
            speed_of_sound_fps: SPEED_OF_SOUND_COEFF_FPS * rankine.sqrt(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("speed_of_sound_fps", self.speed_of_sound_fps)
    }

    /// Seconds for sound to travel `distance_yards`
    pub fn sound_time(&self, distance_yards: f64) -> f64 {
        sound_time(distance_yards, self.speed_of_sound_fps)
    }
}

/// Seconds for sound to travel `distance_yards` at `speed_of_sound_fps`.
///
/// Caller guarantees `speed_of_sound_fps > 0`.
#[inline]
pub fn sound_time(distance_yards: f64, speed_of_sound_fps: f64) -> f64 {
    distance_yards * YARDS_TO_FEET / speed_of_sound_fps
}
