//! Planetary orbital element catalog
//!
//! Elements are the J2000.0 Keplerian elements of the major planets
//! (Standish, "Keplerian Elements for Approximate Positions of the Major
//! Planets", valid 1800 AD - 2050 AD).

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::elements::OrbitalElements;
use crate::error::{EphemerisError, Result};

/// The eight major planets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// All planets in order of distance from the sun
    pub const ALL: [Body; 8] = [
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }

    /// J2000.0 orbital elements
    pub fn elements(&self) -> &'static OrbitalElements {
        match self {
            Body::Mercury => &MERCURY,
            Body::Venus => &VENUS,
            Body::Earth => &EARTH,
            Body::Mars => &MARS,
            Body::Jupiter => &JUPITER,
            Body::Saturn => &SATURN,
            Body::Uranus => &URANUS,
            Body::Neptune => &NEPTUNE,
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Body {
    type Err = EphemerisError;

    /// Parse a planet name, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Body::ALL
            .iter()
            .find(|body| body.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| EphemerisError::UnknownBody(s.to_string()))
    }
}

// a, e, I, L, long.peri, long.node
pub const MERCURY: OrbitalElements =
    OrbitalElements::new(0.38709927, 0.20563593, 7.00497902, 252.2503235, 77.45779628, 48.33076593);
pub const VENUS: OrbitalElements =
    OrbitalElements::new(0.72333566, 0.00677672, 3.39467605, 181.9790995, 131.60246718, 76.67984255);
pub const EARTH: OrbitalElements =
    OrbitalElements::new(1.00000261, 0.01671123, 0.0, 100.46457166, 102.93768193, 0.0);
pub const MARS: OrbitalElements =
    OrbitalElements::new(1.52371034, 0.0933941, 1.84969142, -4.55343205, -23.94362959, 49.55953891);
pub const JUPITER: OrbitalElements =
    OrbitalElements::new(5.202887, 0.04838624, 1.30439695, 34.39644051, 14.72847983, 100.47390909);
pub const SATURN: OrbitalElements =
    OrbitalElements::new(9.53667594, 0.05386179, 2.48599187, 49.95424423, 92.59887831, 113.66242448);
pub const URANUS: OrbitalElements =
    OrbitalElements::new(19.18916464, 0.04725744, 0.77263783, 313.23810451, 170.9542763, 74.01692503);
pub const NEPTUNE: OrbitalElements =
    OrbitalElements::new(30.06992276, 0.00859048, 1.77004347, -55.12002969, 44.96476227, 131.78422574);

static SOLAR_SYSTEM: Lazy<Catalog> = Lazy::new(|| {
    Body::ALL
        .iter()
        .fold(Catalog::new(), |catalog, body| {
            catalog.with_body(body.name(), *body.elements())
        })
});

/// Mapping from body name to orbital elements.
///
/// Lookups are exact, case-sensitive matches on the stored name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    bodies: HashMap<String, OrbitalElements>,
}

impl Catalog {
    /// Empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The eight major planets keyed by their capitalized names
    pub fn solar_system() -> &'static Catalog {
        &SOLAR_SYSTEM
    }

    /// Add or replace a body
    pub fn with_body(mut self, name: impl Into<String>, elements: OrbitalElements) -> Self {
        self.bodies.insert(name.into(), elements);
        self
    }

    /// Look up a body's elements.
    ///
    /// # Errors
    /// [`EphemerisError::UnknownBody`] if `name` is not in the catalog.
    pub fn get(&self, name: &str) -> Result<&OrbitalElements> {
        self.bodies
            .get(name)
            .ok_or_else(|| EphemerisError::UnknownBody(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bodies.contains_key(name)
    }

    /// Body names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.bodies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OrbitalElements)> {
        self.bodies.iter().map(|(name, elements)| (name.as_str(), elements))
    }

    /// Save as a JSON object of name → elements
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON object of name → elements.
    ///
    /// Every entry is validated; a catalog with an unbound orbit is rejected.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog: Catalog = serde_json::from_str(&json)?;
        for (name, elements) in catalog.iter() {
            elements
                .validate()
                .map_err(|e| EphemerisError::InvalidElements(format!("{name}: {e}")))?;
        }
        debug!(
            "Loaded catalog with {} bodies from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }
}
