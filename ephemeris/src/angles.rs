//! Angle conversion and normalization helpers
//!
//! Orbital elements are stored in degrees; every trigonometric call in the
//! crate goes through [`degrees_to_radians`] first.

use std::f64::consts::{PI, TAU};

/// Convert degrees to radians
pub fn degrees_to_radians(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// Convert radians to degrees
pub fn radians_to_degrees(rad: f64) -> f64 {
    rad * (180.0 / PI)
}

/// Wrap an angle in degrees into [0, 360)
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap an angle in radians into [0, 2π)
pub fn normalize_radians(rad: f64) -> f64 {
    let wrapped = rad.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
