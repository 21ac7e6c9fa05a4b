//! Heliocentric position from orbital elements
//!
//! Pipeline for a single body at time `T`:
//! 1. mean anomaly `M = L(T) - ϖ`, where `L(T)` comes from a [`MeanLongitudeModel`]
//! 2. eccentric anomaly `E` from Kepler's equation
//! 3. orbital-plane coordinates `x = a(cos E - e)`, `y = a√(1-e²) sin E`
//! 4. true anomaly `ν` and radius `r`
//! 5. rotation by `ω`, `i` and `Ω` into the ecliptic frame
//!
//! Every function here is pure; concurrent calls share nothing.

use std::f64::consts::TAU;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::angles::degrees_to_radians;
use crate::catalog::Catalog;
use crate::elements::{OrbitalElements, Position};
use crate::error::{EphemerisError, Result};
use crate::kepler::KeplerSolver;

/// How the mean longitude evolves with time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanLongitudeModel {
    /// `L` is held at its epoch value; time has no effect (epoch snapshot)
    #[default]
    Fixed,
    /// `L + rate·T` with the rate taken from the elements (continuous animation)
    Linear,
}

impl MeanLongitudeModel {
    /// Mean longitude in degrees at `time`
    pub fn mean_longitude_at(&self, elements: &OrbitalElements, time: f64) -> f64 {
        match self {
            MeanLongitudeModel::Fixed => elements.mean_longitude,
            MeanLongitudeModel::Linear => {
                elements.mean_longitude + elements.mean_longitude_rate * time
            }
        }
    }
}

impl std::fmt::Display for MeanLongitudeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeanLongitudeModel::Fixed => write!(f, "fixed"),
            MeanLongitudeModel::Linear => write!(f, "linear"),
        }
    }
}

/// Rotate orbital-plane coordinates (periapsis along +x) into the ecliptic frame
fn orbital_plane_to_ecliptic(x_orb: f64, y_orb: f64, elements: &OrbitalElements) -> Position {
    let nu = y_orb.atan2(x_orb);
    let r = x_orb.hypot(y_orb);

    let w = degrees_to_radians(elements.argument_of_periapsis());
    let i = degrees_to_radians(elements.inclination);
    let node = degrees_to_radians(elements.longitude_of_ascending_node);

    let (sin_u, cos_u) = (nu + w).sin_cos();
    let (sin_node, cos_node) = node.sin_cos();
    let (sin_i, cos_i) = i.sin_cos();

    Position {
        x: r * (cos_node * cos_u - sin_node * sin_u * cos_i),
        y: r * (sin_node * cos_u + cos_node * sin_u * cos_i),
        z: r * (sin_u * sin_i),
    }
}

/// Orbital-plane coordinates for a given eccentric anomaly
fn orbital_plane_coordinates(elements: &OrbitalElements, eccentric_anomaly: f64) -> (f64, f64) {
    let a = elements.semi_major_axis;
    let e = elements.eccentricity;
    let (sin_e, cos_e) = eccentric_anomaly.sin_cos();
    (a * (cos_e - e), a * (1.0 - e * e).sqrt() * sin_e)
}

/// Position engine configured with a time model and a Kepler solver
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionEngine {
    pub model: MeanLongitudeModel,
    pub solver: KeplerSolver,
}

impl PositionEngine {
    pub fn new(model: MeanLongitudeModel, solver: KeplerSolver) -> Self {
        debug!(
            "Position engine: model={model}, tolerance={:e}, max_iterations={}",
            solver.tolerance, solver.max_iterations
        );
        Self { model, solver }
    }

    /// Heliocentric ecliptic position of a body with `elements` at `time`.
    ///
    /// # Errors
    /// * [`EphemerisError::InvalidElements`] if the elements are not a bound ellipse
    /// * [`EphemerisError::DidNotConverge`] if Kepler's equation cannot be solved
    pub fn position(&self, time: f64, elements: &OrbitalElements) -> Result<Position> {
        elements.validate()?;

        let mean_longitude = self.model.mean_longitude_at(elements, time);
        let mean_anomaly =
            degrees_to_radians(mean_longitude - elements.longitude_of_periapsis);
        let solution = self.solver.solve(mean_anomaly, elements.eccentricity)?;

        let (x_orb, y_orb) = orbital_plane_coordinates(elements, solution.eccentric_anomaly);
        Ok(orbital_plane_to_ecliptic(x_orb, y_orb, elements))
    }

    /// Position of the named body from `catalog`
    ///
    /// # Errors
    /// [`EphemerisError::UnknownBody`] if the catalog has no entry for `name`,
    /// otherwise as [`PositionEngine::position`].
    pub fn position_of(&self, catalog: &Catalog, name: &str, time: f64) -> Result<Position> {
        let elements = catalog.get(name)?;
        self.position(time, elements)
    }

    /// Positions of every catalog body at the same `time`, sorted by name
    pub fn positions(&self, catalog: &Catalog, time: f64) -> Result<Vec<(String, Position)>> {
        let mut positions = catalog
            .iter()
            .map(|(name, elements)| -> Result<(String, Position)> {
                Ok((name.to_string(), self.position(time, elements)?))
            })
            .collect::<Result<Vec<_>>>()?;
        positions.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(positions)
    }
}

/// Position at `time` using the default Kepler solver
pub fn compute_position(
    time: f64,
    elements: &OrbitalElements,
    model: MeanLongitudeModel,
) -> Result<Position> {
    PositionEngine {
        model,
        solver: KeplerSolver::default(),
    }
    .position(time, elements)
}

/// Sample the full orbit ellipse at `samples` evenly spaced eccentric anomalies,
/// starting at periapsis. Useful for drawing orbit paths.
///
/// # Errors
/// [`EphemerisError::InvalidElements`] if the elements are not a bound ellipse
/// or `samples` is zero.
pub fn orbit_track(elements: &OrbitalElements, samples: usize) -> Result<Vec<Position>> {
    elements.validate()?;
    if samples == 0 {
        return Err(EphemerisError::InvalidElements(
            "orbit track needs at least one sample".to_string(),
        ));
    }

    let step = TAU / samples as f64;
    Ok((0..samples)
        .into_par_iter()
        .map(|k| {
            let (x_orb, y_orb) = orbital_plane_coordinates(elements, k as f64 * step);
            orbital_plane_to_ecliptic(x_orb, y_orb, elements)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use nalgebra::{Rotation3, Vector3};

    fn earth_like() -> OrbitalElements {
        OrbitalElements::new(1.0, 0.0167, 0.0, 100.4646, 102.9377, 0.0)
    }

    fn inclined() -> OrbitalElements {
        OrbitalElements::new(1.52371034, 0.0933941, 1.84969142, -4.55343205, -23.94362959, 49.55953891)
    }

    #[test]
    fn test_earth_like_at_epoch() {
        let p = compute_position(0.0, &earth_like(), MeanLongitudeModel::Fixed).unwrap();
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);
        let r = p.radius();
        assert!((0.983..=1.017).contains(&r), "radius {r}");
    }

    #[test]
    fn test_periapsis_lies_along_longitude_of_periapsis() {
        // L = ϖ puts the body at periapsis
        let elements = OrbitalElements::new(2.0, 0.5, 0.0, 40.0, 40.0, 0.0);
        let p = compute_position(0.0, &elements, MeanLongitudeModel::Fixed).unwrap();
        assert_relative_eq!(p.radius(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(p.y.atan2(p.x), degrees_to_radians(40.0), epsilon = 1e-9);
    }

    #[test]
    fn test_apoapsis_distance() {
        let elements = OrbitalElements::new(2.0, 0.5, 10.0, 220.0, 40.0, 15.0);
        let p = compute_position(0.0, &elements, MeanLongitudeModel::Fixed).unwrap();
        assert_relative_eq!(p.radius(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_model_ignores_time() {
        let elements = inclined();
        let a = compute_position(0.0, &elements, MeanLongitudeModel::Fixed).unwrap();
        let b = compute_position(12.5, &elements, MeanLongitudeModel::Fixed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_linear_model_is_periodic_in_one_time_unit() {
        // With the default 360°/unit rate one unit of time is one revolution
        let elements = inclined();
        let start = compute_position(0.0, &elements, MeanLongitudeModel::Linear).unwrap();
        let later = compute_position(1.0, &elements, MeanLongitudeModel::Linear).unwrap();
        assert_abs_diff_eq!(start.x, later.x, epsilon = 1e-6);
        assert_abs_diff_eq!(start.y, later.y, epsilon = 1e-6);
        assert_abs_diff_eq!(start.z, later.z, epsilon = 1e-6);

        let half = compute_position(0.5, &elements, MeanLongitudeModel::Linear).unwrap();
        assert!(start.distance_to(&half) > 1.0);
    }

    #[test]
    fn test_linear_model_matches_fixed_at_zero() {
        let elements = inclined();
        let fixed = compute_position(0.0, &elements, MeanLongitudeModel::Fixed).unwrap();
        let linear = compute_position(0.0, &elements, MeanLongitudeModel::Linear).unwrap();
        assert_eq!(fixed, linear);
    }

    #[test]
    fn test_matches_rotation_matrix_composition() {
        let elements = inclined();
        let solver = KeplerSolver::default();
        let m = degrees_to_radians(elements.mean_longitude - elements.longitude_of_periapsis);
        let ecc = solver.solve(m, elements.eccentricity).unwrap().eccentric_anomaly;
        let (x_orb, y_orb) = orbital_plane_coordinates(&elements, ecc);

        let rotation = Rotation3::from_axis_angle(
            &Vector3::z_axis(),
            degrees_to_radians(elements.longitude_of_ascending_node),
        ) * Rotation3::from_axis_angle(&Vector3::x_axis(), degrees_to_radians(elements.inclination))
            * Rotation3::from_axis_angle(
                &Vector3::z_axis(),
                degrees_to_radians(elements.argument_of_periapsis()),
            );
        let expected = rotation * Vector3::new(x_orb, y_orb, 0.0);

        let actual = compute_position(0.0, &elements, MeanLongitudeModel::Fixed)
            .unwrap()
            .to_vector();
        assert_abs_diff_eq!(actual, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_unbound_orbit() {
        let hyperbolic = OrbitalElements {
            eccentricity: 1.2,
            ..earth_like()
        };
        assert!(matches!(
            compute_position(0.0, &hyperbolic, MeanLongitudeModel::Fixed),
            Err(EphemerisError::InvalidElements(_))
        ));
    }

    #[test]
    fn test_solver_failure_propagates() {
        let engine = PositionEngine::new(MeanLongitudeModel::Fixed, KeplerSolver::new(1e-300, 1));
        let elements = OrbitalElements::new(1.0, 0.9, 0.0, 30.0, 0.0, 0.0);
        assert!(matches!(
            engine.position(0.0, &elements),
            Err(EphemerisError::DidNotConverge { .. })
        ));
    }

    #[test]
    fn test_orbit_track_spans_apsides() {
        let elements = inclined();
        let track = orbit_track(&elements, 360).unwrap();
        assert_eq!(track.len(), 360);

        assert_relative_eq!(track[0].radius(), elements.periapsis_distance(), epsilon = 1e-9);
        assert_relative_eq!(track[180].radius(), elements.apoapsis_distance(), epsilon = 1e-9);
        for p in &track {
            assert!(p.radius() >= elements.periapsis_distance() - 1e-9);
            assert!(p.radius() <= elements.apoapsis_distance() + 1e-9);
        }
    }

    #[test]
    fn test_orbit_track_rejects_zero_samples() {
        assert!(orbit_track(&earth_like(), 0).is_err());
    }

    #[test]
    fn test_model_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MeanLongitudeModel::Linear).unwrap(),
            "\"linear\""
        );
        let parsed: MeanLongitudeModel = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(parsed, MeanLongitudeModel::Fixed);
    }
}
