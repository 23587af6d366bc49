//! C ABI for embedding the estimator in mobile and desktop apps

use std::os::raw::{c_char, c_double, c_int};

use crate::acoustic::AcousticConfig;
use crate::solver::{find_distance, SolverConfig};
use crate::total_time::total_flight_time;
use crate::velocity_model::BallisticSample;

// Status codes returned by bangthump_find_distance
pub const BANGTHUMP_OK: c_int = 0;
pub const BANGTHUMP_NULL_POINTER: c_int = -1;
pub const BANGTHUMP_INVALID_INPUT: c_int = -2;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FFIBallisticSample {
    pub muzzle_velocity_fps: c_double,
    pub reference_velocity_fps: c_double,
    pub reference_distance_yards: c_double,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FFIDistanceSolution {
    pub distance_yards: c_double,
    pub residual_seconds: c_double,
    pub iterations_used: c_int,
    pub converged: c_int, // 0=false, 1=true
}

impl From<&FFIBallisticSample> for BallisticSample {
    fn from(sample: &FFIBallisticSample) -> Self {
        BallisticSample::new(
            sample.muzzle_velocity_fps,
            sample.reference_velocity_fps,
            sample.reference_distance_yards,
        )
    }
}

// Solve for distance. Pass NAN for max_distance_yards to use the default bracket.
#[no_mangle]
pub extern "C" fn bangthump_find_distance(
    sample: *const FFIBallisticSample,
    total_time_s: c_double,
    speed_of_sound_fps: c_double,
    max_distance_yards: c_double,
    out: *mut FFIDistanceSolution,
) -> c_int {
    if sample.is_null() || out.is_null() {
        return BANGTHUMP_NULL_POINTER;
    }

    let sample = BallisticSample::from(unsafe { &*sample });
    let mut config = SolverConfig::default();
    if !max_distance_yards.is_nan() {
        config.max_distance_yards = max_distance_yards;
    }

    let (status, solution) = match find_distance(
        total_time_s,
        &sample,
        &AcousticConfig::new(speed_of_sound_fps),
        &config,
    ) {
        Ok(solution) => (
            BANGTHUMP_OK,
            FFIDistanceSolution {
                distance_yards: solution.distance_yards,
                residual_seconds: solution.residual_seconds,
                iterations_used: solution.iterations_used as c_int,
                converged: solution.converged as c_int,
            },
        ),
        Err(_) => (
            BANGTHUMP_INVALID_INPUT,
            FFIDistanceSolution {
                distance_yards: f64::NAN,
                residual_seconds: f64::NAN,
                iterations_used: 0,
                converged: 0,
            },
        ),
    };

    unsafe {
        *out = solution;
    }
    status
}

// Forward model. Distances the bullet cannot reach include the 9999999 s sentinel.
#[no_mangle]
pub extern "C" fn bangthump_total_flight_time(
    distance_yards: c_double,
    sample: *const FFIBallisticSample,
    speed_of_sound_fps: c_double,
) -> c_double {
    if sample.is_null() {
        return f64::NAN;
    }

    let sample = BallisticSample::from(unsafe { &*sample });
    total_flight_time(
        distance_yards,
        &sample,
        &AcousticConfig::new(speed_of_sound_fps),
    )
    .seconds_or_sentinel()
}

#[no_mangle]
pub extern "C" fn bangthump_get_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::UNREACHABLE_FLIGHT_TIME_S;
    use std::ffi::CStr;
    use std::ptr;

    fn sample() -> FFIBallisticSample {
        FFIBallisticSample {
            muzzle_velocity_fps: 2700.0,
            reference_velocity_fps: 2100.0,
            reference_distance_yards: 300.0,
        }
    }

    fn empty_solution() -> FFIDistanceSolution {
        FFIDistanceSolution {
            distance_yards: 0.0,
            residual_seconds: 0.0,
            iterations_used: 0,
            converged: 0,
        }
    }

    #[test]
    fn test_ffi_round_trip() {
        let s = sample();
        let t = bangthump_total_flight_time(500.0, &s, 1100.0);
        assert!((t - 2.0576).abs() < 1e-3);

        let mut out = empty_solution();
        let status = bangthump_find_distance(&s, t, 1100.0, f64::NAN, &mut out);
        assert_eq!(status, BANGTHUMP_OK);
        assert_eq!(out.converged, 1);
        assert!((out.distance_yards - 500.0).abs() < 1e-2);
    }

    #[test]
    fn test_ffi_invalid_input() {
        let mut s = sample();
        s.muzzle_velocity_fps = 0.0;

        let mut out = empty_solution();
        let status = bangthump_find_distance(&s, 2.0, 1100.0, 5000.0, &mut out);
        assert_eq!(status, BANGTHUMP_INVALID_INPUT);
        assert!(out.distance_yards.is_nan());
        assert_eq!(out.converged, 0);
    }

    #[test]
    fn test_ffi_null_pointers() {
        let mut out = empty_solution();
        assert_eq!(
            bangthump_find_distance(ptr::null(), 2.0, 1100.0, 5000.0, &mut out),
            BANGTHUMP_NULL_POINTER
        );
        let s = sample();
        assert_eq!(
            bangthump_find_distance(&s, 2.0, 1100.0, 5000.0, ptr::null_mut()),
            BANGTHUMP_NULL_POINTER
        );
        assert!(bangthump_total_flight_time(100.0, ptr::null(), 1100.0).is_nan());
    }

    #[test]
    fn test_ffi_sentinel() {
        let s = FFIBallisticSample {
            muzzle_velocity_fps: 0.0,
            reference_velocity_fps: 1500.0,
            reference_distance_yards: 300.0,
        };
        let t = bangthump_total_flight_time(400.0, &s, 1100.0);
        assert!(t >= UNREACHABLE_FLIGHT_TIME_S);
    }

    #[test]
    fn test_ffi_version() {
        let version = unsafe { CStr::from_ptr(bangthump_get_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
    }
}
