//! Bisection inversion of the forward model.
//!
//! Searches `[0, max_distance]` for the distance whose bullet-plus-sound time
//! matches an observed bang-thump interval. The loop runs a fixed number of
//! passes with an early exit once the time residual is inside tolerance, so
//! every call terminates in bounded time. A root beyond `max_distance` is
//! never found; the result then sits at the top of the bracket with
//! `converged = false`.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::acoustic::AcousticConfig;
use crate::constants::{
    DEFAULT_MAX_DISTANCE_YARDS, DEFAULT_MAX_ITERATIONS, DEFAULT_TIME_TOLERANCE_S, YARDS_TO_METERS,
};
use crate::error::{require_non_negative, require_positive, BangThumpError, Result};
use crate::total_time::total_flight_time;
use crate::velocity_model::BallisticSample;

/// Bisection search parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Upper end of the search bracket (yards). Targets further out are
    /// reported at this boundary.
    pub max_distance_yards: f64,
    /// Number of bisection passes before giving up on the early exit
    pub max_iterations: usize,
    /// Absolute time residual (seconds) that ends the search early
    pub time_tolerance_s: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_distance_yards: DEFAULT_MAX_DISTANCE_YARDS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            time_tolerance_s: DEFAULT_TIME_TOLERANCE_S,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        require_positive("max_distance_yards", self.max_distance_yards)?;
        require_non_negative("time_tolerance_s", self.time_tolerance_s)?;
        if self.max_iterations == 0 {
            return Err(BangThumpError::Config(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a distance solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSolution {
    pub distance_yards: f64,
    pub iterations_used: usize,
    /// Modelled total time at `distance_yards` minus the observed time
    pub residual_seconds: f64,
    pub converged: bool,
}

impl DistanceSolution {
    pub fn distance_meters(&self) -> f64 {
        self.distance_yards * YARDS_TO_METERS
    }
}

/// Distance solver bound to one set of validated ballistic and acoustic inputs
#[derive(Debug, Clone)]
pub struct DistanceSolver {
    sample: BallisticSample,
    acoustic: AcousticConfig,
    config: SolverConfig,
}

impl DistanceSolver {
    /// Validate inputs and build a solver.
    ///
    /// Rejects non-finite values, a non-positive muzzle velocity or speed of
    /// sound, and a negative reference distance. Reference velocities that
    /// stop the bullet inside the bracket are accepted; those distances are
    /// simply unreachable to the model.
    pub fn new(
        sample: BallisticSample,
        acoustic: AcousticConfig,
        config: SolverConfig,
    ) -> Result<Self> {
        sample.validate()?;
        acoustic.validate()?;
        config.validate()?;

        if let Some(stop) = sample.zero_velocity_distance() {
            if stop < config.max_distance_yards {
                debug!(
                    "velocity model reaches zero at {:.1} yd, inside search range of {:.1} yd",
                    stop, config.max_distance_yards
                );
            }
        }

        Ok(Self {
            sample,
            acoustic,
            config,
        })
    }

    pub fn sample(&self) -> &BallisticSample {
        &self.sample
    }

    pub fn acoustic(&self) -> &AcousticConfig {
        &self.acoustic
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Objective for the bisection. Unreachable distances evaluate to the
    /// sentinel, which is larger than any observed time and pulls the upper
    /// bound in.
    fn modelled_time(&self, distance_yards: f64) -> f64 {
        total_flight_time(distance_yards, &self.sample, &self.acoustic).seconds_or_sentinel()
    }

    /// Find the distance whose total time matches `observed_total_time_s`
    pub fn solve(&self, observed_total_time_s: f64) -> Result<DistanceSolution> {
        require_non_negative("total_time_s", observed_total_time_s)?;

        let tolerance = self.config.time_tolerance_s;
        let mut lower = 0.0;
        let mut upper = self.config.max_distance_yards;

        debug!(
            "solving for T = {:.6} s over [0, {:.1}] yd, {} passes max",
            observed_total_time_s, upper, self.config.max_iterations
        );

        for iteration in 1..=self.config.max_iterations {
            let mid = 0.5 * (lower + upper);
            let t = self.modelled_time(mid);
            let residual = t - observed_total_time_s;
            trace!("pass {iteration}: d = {mid:.6} yd, t = {t:.9} s, residual = {residual:.3e}");

            if residual.abs() < tolerance {
                debug!("converged at {:.4} yd after {} passes", mid, iteration);
                return Ok(DistanceSolution {
                    distance_yards: mid,
                    iterations_used: iteration,
                    residual_seconds: residual,
                    converged: true,
                });
            }

            if t < observed_total_time_s {
                lower = mid;
            } else {
                upper = mid;
            }
        }

        let distance = 0.5 * (lower + upper);
        let residual = self.modelled_time(distance) - observed_total_time_s;
        let converged = residual.abs() < tolerance;
        if !converged {
            warn!(
                "no distance in [0, {:.1}] yd matches {:.6} s; \
                 best estimate {:.1} yd (residual {:.3e} s)",
                self.config.max_distance_yards, observed_total_time_s, distance, residual
            );
        }

        Ok(DistanceSolution {
            distance_yards: distance,
            iterations_used: self.config.max_iterations,
            residual_seconds: residual,
            converged,
        })
    }
}

/// Validate inputs and solve for distance in one call
pub fn find_distance(
    observed_total_time_s: f64,
    sample: &BallisticSample,
    acoustic: &AcousticConfig,
    config: &SolverConfig,
) -> Result<DistanceSolution> {
    DistanceSolver::new(*sample, *acoustic, *config)?.solve(observed_total_time_s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::total_time::total_flight_time_legacy;

    fn reference_sample() -> BallisticSample {
        BallisticSample::new(2700.0, 2100.0, 300.0)
    }

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.max_distance_yards, 5000.0);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.time_tolerance_s, 1e-6);
    }

    #[test]
    fn test_reference_scenario() {
        // 500 yd takes 2.05757 s; the rounded 2.057 s reading lands ~0.13 yd short
        let solution = find_distance(
            2.057,
            &reference_sample(),
            &AcousticConfig::default(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert!(solution.converged);
        assert!((solution.distance_yards - 500.0).abs() < 0.15);

        let exact = find_distance(
            2.057_572,
            &reference_sample(),
            &AcousticConfig::default(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert!((exact.distance_yards - 500.0).abs() < 1e-2);
    }

    #[test]
    fn test_recovers_forward_model_distance() {
        let acoustic = AcousticConfig::new(1125.0);
        let solver =
            DistanceSolver::new(reference_sample(), acoustic, SolverConfig::default()).unwrap();

        for &d in &[1.0, 25.0, 180.0, 612.5, 1049.0] {
            let t = total_flight_time_legacy(d, 2700.0, 2100.0, 300.0, 1125.0);
            let solution = solver.solve(t).unwrap();
            assert!(solution.converged);
            assert!(
                (solution.distance_yards - d).abs() < 1e-2,
                "expected {d}, got {}",
                solution.distance_yards
            );
            assert!(solution.residual_seconds.abs() < 1e-6);
        }
    }

    #[test]
    fn test_root_beyond_bracket_stays_in_bracket() {
        // Constant velocity, so the 6000 yard time is well defined
        let sample = BallisticSample::new(3000.0, 3000.0, 300.0);
        let t = total_flight_time_legacy(6000.0, 3000.0, 3000.0, 300.0, 1100.0);

        let solution =
            find_distance(t, &sample, &AcousticConfig::default(), &SolverConfig::default())
                .unwrap();
        assert!(!solution.converged);
        assert_eq!(solution.iterations_used, 100);
        assert!(solution.distance_yards >= 0.0 && solution.distance_yards <= 5000.0);
        assert!((solution.distance_yards - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn test_unreachable_region_pulls_bracket_down() {
        // Bullet stops at 270 yd; a time past anything reachable ends up near the stop point
        let sample = BallisticSample::new(2700.0, 1700.0, 100.0);
        let solution = find_distance(
            100.0,
            &sample,
            &AcousticConfig::default(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert!(!solution.converged);
        assert!((solution.distance_yards - 270.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_time_is_zero_distance() {
        let solution = find_distance(
            0.0,
            &reference_sample(),
            &AcousticConfig::default(),
            &SolverConfig::default(),
        )
        .unwrap();
        assert!(solution.distance_yards < 1e-3);
    }

    #[test]
    fn test_smaller_bracket_and_budget() {
        let config = SolverConfig {
            max_distance_yards: 1000.0,
            max_iterations: 10,
            time_tolerance_s: 0.0,
        };
        let t = total_flight_time_legacy(400.0, 2700.0, 2100.0, 300.0, 1100.0);
        let solution =
            find_distance(t, &reference_sample(), &AcousticConfig::default(), &config).unwrap();
        assert_eq!(solution.iterations_used, 10);
        // 1000 / 2^10 bracket width
        assert!((solution.distance_yards - 400.0).abs() < 1.0);
    }

    #[test]
    fn test_rejects_invalid_inputs() {
        let acoustic = AcousticConfig::default();
        let config = SolverConfig::default();

        let zero_mv = BallisticSample::new(0.0, 2100.0, 300.0);
        assert!(DistanceSolver::new(zero_mv, acoustic, config).is_err());

        let negative_ref = BallisticSample::new(2700.0, 2100.0, -300.0);
        assert!(DistanceSolver::new(negative_ref, acoustic, config).is_err());

        let nan_ref = BallisticSample::new(2700.0, f64::NAN, 300.0);
        assert!(DistanceSolver::new(nan_ref, acoustic, config).is_err());

        assert!(
            DistanceSolver::new(reference_sample(), AcousticConfig::new(0.0), config).is_err()
        );

        let no_passes = SolverConfig {
            max_iterations: 0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            DistanceSolver::new(reference_sample(), acoustic, no_passes),
            Err(BangThumpError::Config(_))
        ));

        let solver = DistanceSolver::new(reference_sample(), acoustic, config).unwrap();
        assert!(solver.solve(-1.0).is_err());
        assert!(solver.solve(f64::INFINITY).is_err());
    }

    #[test]
    fn test_distance_meters() {
        let solution = DistanceSolution {
            distance_yards: 1000.0,
            iterations_used: 1,
            residual_seconds: 0.0,
            converged: true,
        };
        assert!((solution.distance_meters() - 914.4).abs() < 1e-9);
    }
}
