//! Time conventions for the position engine
//!
//! Two callers drive the engine with different clocks:
//! - epoch snapshots measure time in Julian centuries since J2000.0
//! - continuous animation measures elapsed simulated years
//!
//! Both reduce to a single `f64` time value handed to the transform.

use std::time::Duration;

use time::OffsetDateTime;

/// Julian date of the J2000.0 reference epoch (2000-01-01 12:00 TT)
pub const J2000_JULIAN_DATE: f64 = 2451545.0;

/// Julian date of the Unix epoch (1970-01-01 00:00 UTC)
pub const UNIX_EPOCH_JULIAN_DATE: f64 = 2440587.5;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36525.0;

/// Days in a Julian year
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

const SECONDS_PER_DAY: f64 = 86400.0;

/// Julian centuries elapsed since J2000.0; negative before the epoch
pub fn julian_centuries_since_j2000(julian_date: f64) -> f64 {
    (julian_date - J2000_JULIAN_DATE) / DAYS_PER_JULIAN_CENTURY
}

/// Julian date of a calendar instant.
///
/// The UTC/TT offset (about a minute) is ignored; it is far below the
/// precision of the Keplerian model.
pub fn julian_date_from_datetime(datetime: OffsetDateTime) -> f64 {
    let unix_seconds = datetime.unix_timestamp() as f64 + datetime.nanosecond() as f64 * 1e-9;
    unix_seconds / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DATE
}

/// Julian centuries since J2000.0 for a calendar instant
pub fn julian_centuries_from_datetime(datetime: OffsetDateTime) -> f64 {
    julian_centuries_since_j2000(julian_date_from_datetime(datetime))
}

/// Simulated years elapsed for an animation clock.
///
/// `time_scale` is the number of simulated days that pass per wall-clock
/// second; dividing by the Julian year turns the result into years.
pub fn elapsed_simulated_years(elapsed: Duration, time_scale: f64) -> f64 {
    elapsed.as_secs_f64() * time_scale / DAYS_PER_JULIAN_YEAR
}
