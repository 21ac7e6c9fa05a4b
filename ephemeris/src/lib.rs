//! Keplerian planetary position engine
//!
//! Computes heliocentric ecliptic positions of bodies on bound elliptical
//! orbits from their six classical orbital elements. This is a first-order
//! two-body model intended for visualization: no perturbations, no
//! relativistic corrections and no velocities.
//!
//! ```
//! use ephemeris::{Catalog, MeanLongitudeModel, PositionEngine};
//!
//! let engine = PositionEngine::new(MeanLongitudeModel::Fixed, Default::default());
//! let earth = engine.position_of(Catalog::solar_system(), "Earth", 0.0)?;
//! assert!(earth.z.abs() < 1e-12);
//! # Ok::<(), ephemeris::EphemerisError>(())
//! ```

pub mod angles;
pub mod catalog;
pub mod config;
pub mod elements;
pub mod epoch;
pub mod error;
pub mod kepler;
pub mod transform;

pub use catalog::{Body, Catalog};
pub use config::EngineConfig;
pub use elements::{OrbitalElements, Position};
pub use error::{EphemerisError, Result};
pub use kepler::{solve_eccentric_anomaly, KeplerSolution, KeplerSolver};
pub use transform::{compute_position, orbit_track, MeanLongitudeModel, PositionEngine};
