//! Constants module for sidereal time and horizon calculations

// Time constants
/// Milliseconds in a day
pub const DAY_MS: f64 = 86_400_000.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Julian date of the Unix epoch (1970-01-01T00:00:00Z)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Days in a Julian century
pub const JULIAN_CENTURY_DAYS: f64 = 36_525.0;
/// Hours in a day (solar or sidereal)
pub const HOURS_PER_DAY: f64 = 24.0;
/// Milliseconds in an hour
pub const HOUR_MS: f64 = 3_600_000.0;

// Sidereal time (IAU 1982 GMST expressed in degrees)
/// GMST at J2000.0 in degrees
pub const GMST_J2000_DEG: f64 = 280.460_618_37;
/// Mean sidereal rotation per day in degrees
pub const GMST_RATE_DEG_PER_DAY: f64 = 360.985_647_366_29;
/// Quadratic GMST coefficient in degrees per century squared
pub const GMST_T2_DEG: f64 = 0.000_387_933;
/// Divisor of the cubic GMST term
pub const GMST_T3_DIVISOR: f64 = 38_710_000.0;
/// Sidereal hours elapsed per solar hour
pub const SIDEREAL_PER_SOLAR: f64 = 1.002_737_909_35;

// Angles
/// Degrees in a full circle
pub const DEG360: f64 = 360.0;
/// Degrees of rotation per hour of right ascension or hour angle
pub const DEG_PER_HOUR: f64 = 15.0;

// Horizon
/// Sine of the standard horizon depression (-0.8333°, refraction plus solar semidiameter),
/// entered with a positive sign: `sin(h0) = -HORIZON_REFRACTION_SINE`
pub const HORIZON_REFRACTION_SINE: f64 = 0.014_54;
/// Below this magnitude a trigonometric denominator is treated as zero
pub const SINGULARITY_EPS: f64 = 1e-12;
