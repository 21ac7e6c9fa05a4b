//! Kepler's equation solver
//!
//! Solves `M = E - e·sin(E)` for the eccentric anomaly `E` using
//! Newton–Raphson iteration seeded with `E₀ = M + e·sin(M)`.
//!
//! The stopping rule is an absolute bound on the Newton correction `|ΔE|`,
//! not on the residual of Kepler's equation. Near the root the iteration is
//! quadratic, so the residual after the final step is far below the bound.

use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{EphemerisError, Result};

/// Default absolute tolerance on the Newton correction, in radians
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Default cap on Newton iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Outcome of a successful solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in radians
    pub eccentric_anomaly: f64,
    /// Number of Newton steps taken
    pub iterations: usize,
    /// Magnitude of the final correction step
    pub last_correction: f64,
}

/// Newton–Raphson solver for Kepler's equation with a bounded iteration count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerSolver {
    /// Stop once `|ΔE|` falls to or below this value (radians)
    pub tolerance: f64,
    /// Give up with [`EphemerisError::DidNotConverge`] after this many steps
    pub max_iterations: usize,
}

impl Default for KeplerSolver {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl KeplerSolver {
    /// Create a solver with the given tolerance and iteration cap
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Solve for the eccentric anomaly.
    ///
    /// # Arguments
    /// * `mean_anomaly` - Mean anomaly `M` in radians (any value, not wrapped)
    /// * `eccentricity` - Orbital eccentricity `e`; convergence is only
    ///   guaranteed for `0 <= e < 1`
    ///
    /// # Errors
    /// [`EphemerisError::DidNotConverge`] when the iteration cap is reached or an
    /// iterate becomes non-finite (the derivative `1 - e·cos(E)` vanishes at
    /// `e = 1, E = 0`).
    pub fn solve(&self, mean_anomaly: f64, eccentricity: f64) -> Result<KeplerSolution> {
        let m = mean_anomaly;
        let e = eccentricity;

        let mut ecc_anomaly = m + e * m.sin();
        let mut correction = f64::INFINITY;

        for iteration in 1..=self.max_iterations {
            correction = (ecc_anomaly - e * ecc_anomaly.sin() - m) / (1.0 - e * ecc_anomaly.cos());
            ecc_anomaly -= correction;

            if !ecc_anomaly.is_finite() {
                warn!("Kepler iteration diverged at step {iteration} (M={m}, e={e})");
                return Err(EphemerisError::DidNotConverge {
                    iterations: iteration,
                    last_correction: correction.abs(),
                });
            }

            if correction.abs() <= self.tolerance {
                trace!("Kepler solve converged in {iteration} iterations (M={m}, e={e})");
                return Ok(KeplerSolution {
                    eccentric_anomaly: ecc_anomaly,
                    iterations: iteration,
                    last_correction: correction.abs(),
                });
            }
        }

        warn!(
            "Kepler solve hit the {} iteration cap (M={m}, e={e}, |ΔE|={:e})",
            self.max_iterations,
            correction.abs()
        );
        Err(EphemerisError::DidNotConverge {
            iterations: self.max_iterations,
            last_correction: correction.abs(),
        })
    }
}

/// Solve Kepler's equation with the default tolerance and iteration cap,
/// returning only the eccentric anomaly in radians.
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64> {
    KeplerSolver::default()
        .solve(mean_anomaly, eccentricity)
        .map(|solution| solution.eccentric_anomaly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_circular_orbit_is_identity() {
        for k in 0..36 {
            let m = k as f64 * TAU / 36.0;
            let e_anom = solve_eccentric_anomaly(m, 0.0).unwrap();
            assert_abs_diff_eq!(e_anom, m, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_known_value() {
        // Textbook case: M = 1 rad, e = 0.5 gives E ≈ 1.498701
        let e_anom = solve_eccentric_anomaly(1.0, 0.5).unwrap();
        assert_abs_diff_eq!(e_anom, 1.498701, epsilon = 1e-6);
    }

    #[test]
    fn test_apsides_are_fixed_points() {
        let solver = KeplerSolver::default();
        let at_periapsis = solver.solve(0.0, 0.7).unwrap();
        assert_eq!(at_periapsis.eccentric_anomaly, 0.0);
        assert_eq!(at_periapsis.iterations, 1);

        let at_apoapsis = solver.solve(PI, 0.7).unwrap();
        assert_abs_diff_eq!(at_apoapsis.eccentric_anomaly, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_residual_within_tolerance() {
        let solver = KeplerSolver::default();
        for e in [0.0, 0.1, 0.5, 0.9, 0.99] {
            for k in 0..64 {
                let m = k as f64 * TAU / 64.0;
                let solution = solver.solve(m, e).unwrap();
                let e_anom = solution.eccentric_anomaly;
                let recomputed = e_anom - e * e_anom.sin();
                assert!(
                    (recomputed - m).abs() <= solver.tolerance,
                    "e={e} M={m}: residual {}",
                    (recomputed - m).abs()
                );
                assert!(solution.last_correction <= solver.tolerance);
                assert!(solution.iterations <= solver.max_iterations);
            }
        }
    }

    #[test]
    fn test_unwrapped_mean_anomaly() {
        // Mean anomalies beyond one revolution solve to the shifted root
        let base = solve_eccentric_anomaly(0.8, 0.3).unwrap();
        let shifted = solve_eccentric_anomaly(0.8 + 2.0 * TAU, 0.3).unwrap();
        assert_abs_diff_eq!(shifted - base, 2.0 * TAU, epsilon = 1e-9);
    }

    #[test]
    fn test_iteration_cap_reports_failure() {
        let solver = KeplerSolver::new(1e-300, 1);
        match solver.solve(0.5, 0.9) {
            Err(EphemerisError::DidNotConverge {
                iterations,
                last_correction,
            }) => {
                assert_eq!(iterations, 1);
                assert!(last_correction > 0.0);
            }
            other => panic!("expected DidNotConverge, got {other:?}"),
        }
    }

    #[test]
    fn test_parabolic_singularity_reports_failure() {
        // e = 1 at M = 0 makes the Newton denominator exactly zero
        let result = solve_eccentric_anomaly(0.0, 1.0);
        assert!(matches!(result, Err(EphemerisError::DidNotConverge { .. })));
    }

    #[test]
    fn test_non_finite_input_reports_failure() {
        let result = solve_eccentric_anomaly(f64::NAN, 0.1);
        assert!(matches!(result, Err(EphemerisError::DidNotConverge { .. })));
    }

    #[test]
    fn test_zero_iteration_cap() {
        let solver = KeplerSolver::new(1e-6, 0);
        assert!(matches!(
            solver.solve(1.0, 0.1),
            Err(EphemerisError::DidNotConverge { iterations: 0, .. })
        ));
    }
}
