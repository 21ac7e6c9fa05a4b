//! Print heliocentric planet positions
//!
//! Resolves bodies from the built-in solar system catalog (or a JSON catalog
//! file) and prints their ecliptic coordinates for a Julian date, a calendar
//! instant, or an elapsed simulated time.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use ephemeris::epoch::{julian_centuries_from_datetime, julian_centuries_since_j2000, J2000_JULIAN_DATE};
use ephemeris::{orbit_track, Catalog, EngineConfig, MeanLongitudeModel};
use log::info;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Time model selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Mean longitude held at its epoch value
    Fixed,
    /// Mean longitude advances with time
    Linear,
}

impl From<Mode> for MeanLongitudeModel {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Fixed => MeanLongitudeModel::Fixed,
            Mode::Linear => MeanLongitudeModel::Linear,
        }
    }
}

fn parse_datetime(s: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(s.trim(), &Rfc3339).map_err(|e| format!("Invalid RFC 3339 date '{s}': {e}"))
}

#[derive(Parser, Debug)]
#[command(
    name = "Planet Positions",
    about = "Computes heliocentric ecliptic planet positions from Keplerian elements",
    long_about = None
)]
struct Args {
    /// Body to report (default: every body in the catalog)
    #[arg(long)]
    body: Option<String>,

    /// Julian date of the snapshot
    #[arg(long, default_value_t = J2000_JULIAN_DATE, conflicts_with_all = ["date", "elapsed_years"])]
    jd: f64,

    /// Calendar instant of the snapshot (RFC 3339, e.g. "2024-03-20T03:06:00Z")
    #[arg(long, value_parser = parse_datetime, conflicts_with = "elapsed_years")]
    date: Option<OffsetDateTime>,

    /// Elapsed simulated years, used directly as the time value
    #[arg(long)]
    elapsed_years: Option<f64>,

    /// Mean longitude time model (overrides the config file)
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Kepler solver tolerance in radians (overrides the config file)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Kepler solver iteration cap (overrides the config file)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Engine configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Orbital element catalog JSON file (default: built-in planets)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Also print this many points along the selected body's orbit
    #[arg(long, requires = "body")]
    track: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(mode) = args.mode {
        config.mean_longitude = mode.into();
    }
    if let Some(tolerance) = args.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }
    let engine = config.engine()?;

    let loaded;
    let catalog = match &args.catalog {
        Some(path) => {
            loaded = Catalog::load_from_file(path)?;
            &loaded
        }
        None => Catalog::solar_system(),
    };

    let time = if let Some(years) = args.elapsed_years {
        years
    } else if let Some(date) = args.date {
        julian_centuries_from_datetime(date)
    } else {
        julian_centuries_since_j2000(args.jd)
    };
    info!("Evaluating {} bodies at T = {time} ({})", catalog.len(), config.mean_longitude);

    let positions = match &args.body {
        Some(name) => vec![(name.clone(), engine.position_of(catalog, name, time)?)],
        None => engine.positions(catalog, time)?,
    };

    println!("Heliocentric ecliptic positions at T = {time:.8}:");
    for (name, p) in &positions {
        println!(
            "  {:<10} pos=({:>12.6}, {:>12.6}, {:>12.6}) AU  |r|={:.6} AU",
            name,
            p.x,
            p.y,
            p.z,
            p.radius()
        );
    }

    if let (Some(samples), Some(name)) = (args.track, &args.body) {
        let elements = catalog.get(name)?;
        println!("\nOrbit track of {name} ({samples} points):");
        for p in orbit_track(elements, samples)? {
            println!("  {:>12.6} {:>12.6} {:>12.6}", p.x, p.y, p.z);
        }
    }

    Ok(())
}
