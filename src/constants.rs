/// Physical and numerical constants used by the bang-thump model

/// Conversion factor: yards to feet
///
/// Distances are entered in yards while velocities are in feet per second,
/// so every distance is multiplied by this before dividing by a speed.
pub const YARDS_TO_FEET: f64 = 3.0;

/// Conversion factor: yards to meters
pub const YARDS_TO_METERS: f64 = 0.9144;

/// Conversion factor: feet per second to meters per second
pub const FPS_TO_MPS: f64 = 0.3048;

/// Default speed of sound used by the estimator (ft/s)
///
/// Value: 1100.0 ft/s
/// Corresponds to roughly 1000 ft above sea level on a mild day. The
/// standard-atmosphere sea level value at 59°F is closer to 1116 ft/s.
pub const DEFAULT_SPEED_OF_SOUND_FPS: f64 = 1100.0;

/// Speed of sound coefficient for dry air in imperial units
///
/// c = 49.0223 * sqrt(T_rankine) ft/s, from c = sqrt(gamma * R * T) with
/// gamma = 1.4 and R = 1716.49 ft·lbf/(slug·°R).
pub const SPEED_OF_SOUND_COEFF_FPS: f64 = 49.0223;

/// Offset from degrees Fahrenheit to degrees Rankine
pub const FAHRENHEIT_TO_RANKINE: f64 = 459.67;

/// Default upper bound of the distance search (yards)
pub const DEFAULT_MAX_DISTANCE_YARDS: f64 = 5000.0;

/// Default number of bisection passes
///
/// 100 halvings of a 5000 yard bracket resolve far below any float spacing,
/// so in practice the time tolerance exit fires long before the budget runs out.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Absolute tolerance on total time for the early exit (seconds)
pub const DEFAULT_TIME_TOLERANCE_S: f64 = 1e-6;

/// Slopes with a magnitude below this are treated as constant velocity
pub const MIN_SLOPE_THRESHOLD: f64 = 1e-12;

/// Flight time reported for unphysical velocity combinations (seconds)
///
/// Roughly 116 days. Any realistic small-arms flight time is a few seconds,
/// so the value cannot be confused with a real result. Only surfaces at the
/// legacy scalar boundaries; the model itself reports `FlightTime::Unreachable`.
pub const UNREACHABLE_FLIGHT_TIME_S: f64 = 9_999_999.0;
