//! Classical orbital elements and heliocentric positions

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::{EphemerisError, Result};

/// Default rate of the linear mean-longitude model, in degrees per time unit
pub const DEFAULT_MEAN_LONGITUDE_RATE: f64 = 360.0;

fn default_mean_longitude_rate() -> f64 {
    DEFAULT_MEAN_LONGITUDE_RATE
}

/// Six classical Keplerian elements of a heliocentric orbit.
///
/// Angles are stored in degrees, the semi-major axis in astronomical units.
/// Values are immutable reference data; nothing in the crate mutates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis `a` (AU)
    pub semi_major_axis: f64,
    /// Eccentricity `e`, `0 <= e < 1` for the elliptical orbits handled here
    pub eccentricity: f64,
    /// Inclination `I` to the ecliptic (degrees)
    pub inclination: f64,
    /// Mean longitude `L` at the reference epoch (degrees)
    pub mean_longitude: f64,
    /// Longitude of periapsis `ϖ` (degrees)
    pub longitude_of_periapsis: f64,
    /// Longitude of the ascending node `Ω` (degrees)
    pub longitude_of_ascending_node: f64,
    /// Advance of the mean longitude per unit of time (degrees), used by
    /// [`MeanLongitudeModel::Linear`](crate::transform::MeanLongitudeModel::Linear)
    #[serde(default = "default_mean_longitude_rate")]
    pub mean_longitude_rate: f64,
}

impl OrbitalElements {
    /// Build elements from the six classical values with the default
    /// mean-longitude rate
    pub const fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination: f64,
        mean_longitude: f64,
        longitude_of_periapsis: f64,
        longitude_of_ascending_node: f64,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity,
            inclination,
            mean_longitude,
            longitude_of_periapsis,
            longitude_of_ascending_node,
            mean_longitude_rate: DEFAULT_MEAN_LONGITUDE_RATE,
        }
    }

    /// Replace the mean-longitude rate (degrees per time unit)
    pub fn with_mean_longitude_rate(mut self, rate: f64) -> Self {
        self.mean_longitude_rate = rate;
        self
    }

    /// Check the bound elliptical-orbit precondition.
    ///
    /// # Errors
    /// [`EphemerisError::InvalidElements`] if any field is non-finite, the
    /// semi-major axis is not positive, or the eccentricity is outside `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("semi_major_axis", self.semi_major_axis),
            ("eccentricity", self.eccentricity),
            ("inclination", self.inclination),
            ("mean_longitude", self.mean_longitude),
            ("longitude_of_periapsis", self.longitude_of_periapsis),
            ("longitude_of_ascending_node", self.longitude_of_ascending_node),
            ("mean_longitude_rate", self.mean_longitude_rate),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(EphemerisError::InvalidElements(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.semi_major_axis <= 0.0 {
            return Err(EphemerisError::InvalidElements(format!(
                "semi-major axis must be positive, got {}",
                self.semi_major_axis
            )));
        }

        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(EphemerisError::InvalidElements(format!(
                "eccentricity must be in [0, 1) for an elliptical orbit, got {}",
                self.eccentricity
            )));
        }

        Ok(())
    }

    /// Argument of periapsis `ω = ϖ - Ω` (degrees)
    pub fn argument_of_periapsis(&self) -> f64 {
        self.longitude_of_periapsis - self.longitude_of_ascending_node
    }

    /// Closest distance to the sun, `a(1 - e)` (AU)
    pub fn periapsis_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the sun, `a(1 + e)` (AU)
    pub fn apoapsis_distance(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Semi-minor axis `a·√(1 - e²)` (AU)
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity).sqrt()
    }
}

/// Cartesian position in the heliocentric ecliptic frame (AU)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the origin (the sun)
    pub fn radius(&self) -> f64 {
        self.to_vector().norm()
    }

    /// Straight-line distance to another position
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Position> for Vector3<f64> {
    fn from(position: Position) -> Self {
        position.to_vector()
    }
}

impl From<Vector3<f64>> for Position {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6}) AU", self.x, self.y, self.z)
    }
}
