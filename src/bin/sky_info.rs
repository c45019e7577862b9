//! Sky Position Information Tool
//!
//! Prints where an object with the given right ascension and declination
//! appears for an observer, and when it rises, transits and sets that day.
//!
//! Usage:
//!   cargo run --bin sky_info -- --lat 40.7 --lon -74.0 --ra 6.75 --dec -16.7
//!   cargo run --bin sky_info -- --config sky.json --ra 2.53 --dec 89.26 --time 2024-03-20T12:00:00Z

use clap::{ArgAction, Parser, ValueEnum};
use skywatch::almanac::{horizontal_position, is_star_visible, rise_transit_set};
use skywatch::config::SkyConfig;
use skywatch::time::local_sidereal_time;
use skywatch::{Equatorial, HorizonStatus, Observer, Time, TransitSolver};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverArg {
    Linear,
    Iterative,
}

/// Sky Position Information Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Shows the horizontal position and rise/transit/set times of a sky object",
    long_about = None
)]
struct Args {
    /// JSON settings file (observer, render radius, rise/set settings)
    #[arg(short, long)]
    config: Option<String>,

    /// Observer latitude in degrees, north positive (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees, east positive (overrides the config file)
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Right ascension in hours
    #[arg(long)]
    ra: f64,

    /// Declination in degrees
    #[arg(long, allow_negative_numbers = true)]
    dec: f64,

    /// UTC instant in RFC 3339 form; defaults to now
    #[arg(short, long)]
    time: Option<String>,

    /// How sidereal time is mapped back to clock time
    #[arg(long, value_enum)]
    solver: Option<SolverArg>,

    /// Print the render-frame points as well
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

/// Helper to print named values in a formatted way
fn print_named_value(name: &str, value: impl std::fmt::Display) {
    println!("{:<22}{}", format!("{}:", name), value);
}

fn load_config(args: &Args) -> Result<SkyConfig> {
    let mut config = match &args.config {
        Some(path) => SkyConfig::from_file(path)?,
        None => SkyConfig::new(Observer::new(0.0, 0.0)?),
    };

    if args.lat.is_some() || args.lon.is_some() {
        let lat = args.lat.unwrap_or(config.observer.latitude());
        let lon = args.lon.unwrap_or(config.observer.longitude());
        config.observer = Observer::new(lat, lon)?;
    } else if args.config.is_none() {
        return Err("either --config or --lat/--lon is required".into());
    }

    if let Some(solver) = args.solver {
        config.rise_set.solver = match solver {
            SolverArg::Linear => TransitSolver::LinearApproximation,
            SolverArg::Iterative => TransitSolver::Iterative,
        };
    }
    config.validate()?;
    Ok(config)
}

fn format_event(event: Option<Time>) -> String {
    event.map_or_else(|| "-".to_string(), |t| t.to_string())
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let time = match &args.time {
        Some(s) => Time::parse_rfc3339(s)?,
        None => Time::now(),
    };
    let observer = config.observer;
    let target = Equatorial::try_new(args.ra, args.dec)?;

    print_section_header("Observer");
    print_named_value("Latitude", format!("{:.4}°", observer.latitude()));
    print_named_value("Longitude", format!("{:.4}°", observer.longitude()));
    print_named_value("Time (UTC)", time);
    print_named_value("Julian date", format!("{:.6}", time.julian_date()));
    print_named_value("GMST", time.gmst());
    print_named_value("LST", local_sidereal_time(&time, observer.longitude()));

    let horizontal = horizontal_position(&target, &observer, &time);
    print_section_header("Position");
    print_named_value("RA / Dec", format!("{:.4}h / {:+.4}°", target.ra_hours, target.dec_degrees));
    print_named_value("Altitude", format!("{:+.4}°", horizontal.altitude));
    print_named_value("Azimuth", format!("{:.4}°", horizontal.azimuth));
    print_named_value("Above horizon", horizontal.is_above_horizon());
    print_named_value(
        "Ever visible",
        is_star_visible(target.dec_degrees, observer.latitude()),
    );

    if args.verbose {
        let radius = config.render_radius;
        let local = horizontal.to_cartesian(radius);
        let sphere = target.to_sky_sphere(radius);
        print_named_value("Horizon point", format!("({:.3}, {:.3}, {:.3})", local.x, local.y, local.z));
        print_named_value("Sky-sphere point", format!("({:.3}, {:.3}, {:.3})", sphere.x, sphere.y, sphere.z));
    }

    let result = rise_transit_set(&target, &observer, &time, &config.rise_set);
    print_section_header("Rise / Transit / Set");
    let status = match result.status {
        HorizonStatus::RisesAndSets => "rises and sets",
        HorizonStatus::Circumpolar => "circumpolar (never sets)",
        HorizonStatus::NeverRises => "never rises",
        HorizonStatus::Undefined => "undefined (coordinates or date out of range)",
    };
    print_named_value("Status", status);
    print_named_value("cos H", format!("{:.6}", result.cos_hour_angle));
    print_named_value("Rise", format_event(result.rise));
    print_named_value("Transit", result.transit);
    print_named_value("Set", format_event(result.set));

    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
