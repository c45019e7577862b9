//! Rise, transit and set times and horizon visibility
//!
//! For an object with fixed equatorial coordinates the semi-diurnal arc `H`
//! follows from spherical trigonometry:
//!
//! ```text
//! cos H = (sin h0 − sin φ · sin δ) / (cos φ · cos δ),   sin h0 = −0.01454
//! ```
//!
//! where `h0 ≈ −0.833°` accounts for refraction at the horizon. The object
//! transits when its hour angle is zero (local sidereal time equals its right
//! ascension) and rises and sets `H` before and after that.
//!
//! `cos H ≥ 1` means the object never clears the horizon, `cos H ≤ −1` means it
//! never goes below it. Neither is an error: both come back as a
//! [`VisibilityResult`] with no rise or set and a [`HorizonStatus`] saying which.
//! An object that only grazes the horizon (an arc that rounds to zero at
//! millisecond resolution) counts as never rising.

use crate::constants::{
    DEG_PER_HOUR, HORIZON_REFRACTION_SINE, HOUR_MS, SIDEREAL_PER_SOLAR, SINGULARITY_EPS,
};
use crate::coordinates::angle::{normalize_hours, wrap_signed_hours};
use crate::coordinates::{equatorial_to_horizontal, Equatorial, Horizontal};
use crate::observer::Observer;
use crate::time::{local_sidereal_time, Time};
use serde::{Deserialize, Serialize};

/// Maximum refinement steps for the iterative sidereal solver.
const MAX_ITERATIONS: usize = 5;

/// Convergence threshold in sidereal hours (one millisecond).
const CONVERGENCE_HOURS: f64 = 1.0 / HOUR_MS;

/// How a target local sidereal time is turned back into a UTC instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitSolver {
    /// Treat sidereal hours after midnight as solar hours after midnight.
    ///
    /// Cheap and compatible with older sky-map code, but ignores the ~0.27%
    /// rate difference between the two clocks, so late in the day the result
    /// drifts by up to about four minutes.
    LinearApproximation,
    /// Scale by the sidereal/solar ratio, then correct against the actual
    /// sidereal time until it agrees to within a millisecond.
    #[default]
    Iterative,
}

/// Parameters for rise/set computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiseSetConfig {
    /// `−sin(h0)` for the horizon altitude `h0` at which an object counts as risen
    pub horizon_sine: f64,
    pub solver: TransitSolver,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            horizon_sine: HORIZON_REFRACTION_SINE,
            solver: TransitSolver::default(),
        }
    }
}

/// Whether and how an object crosses the horizon on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonStatus {
    /// Rises and sets once per sidereal day
    RisesAndSets,
    /// Always above the horizon
    Circumpolar,
    /// Always below the horizon, or touching it without ever clearing it
    NeverRises,
    /// Nothing could be computed: non-finite coordinates or horizon setting, or
    /// a rise or set outside the representable calendar range
    Undefined,
}

/// Rise, transit and set for one object, observer and date
///
/// `rise` and `set` are both `Some` exactly when `status` is
/// [`HorizonStatus::RisesAndSets`], and then `rise < transit < set`. `transit`
/// is always defined; for an object that never rises it is the moment of its
/// highest (still negative) altitude, and for [`HorizonStatus::Undefined`]
/// from non-finite coordinates it is midnight of the requested date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityResult {
    pub rise: Option<Time>,
    pub transit: Time,
    pub set: Option<Time>,
    pub status: HorizonStatus,
    /// The raw `cos H`; may lie outside `[-1, 1]` or be infinite at the poles
    pub cos_hour_angle: f64,
}

impl VisibilityResult {
    fn without_events(transit: Time, status: HorizonStatus, cos_hour_angle: f64) -> Self {
        Self {
            rise: None,
            transit,
            set: None,
            status,
            cos_hour_angle,
        }
    }

    pub fn is_circumpolar(&self) -> bool {
        self.status == HorizonStatus::Circumpolar
    }

    pub fn never_rises(&self) -> bool {
        self.status == HorizonStatus::NeverRises
    }

    /// Whether `time` lies between this result's rise and set.
    ///
    /// Circumpolar objects are always up and objects that never rise never are.
    pub fn is_up_at(&self, time: &Time) -> bool {
        match (self.status, self.rise, self.set) {
            (HorizonStatus::Circumpolar, _, _) => true,
            (HorizonStatus::RisesAndSets, Some(rise), Some(set)) => rise <= *time && *time <= set,
            _ => false,
        }
    }
}

/// Cosine of the hour angle at which an object crosses the horizon.
///
/// When `cos φ · cos δ` vanishes (observer or object at a pole) the altitude
/// never changes during the day: the result is `−∞` if the object sits at or
/// above the horizon altitude and `+∞` otherwise, so the circumpolar and
/// never-rises branches still apply.
pub fn horizon_hour_angle_cosine(dec_deg: f64, lat_deg: f64, horizon_sine: f64) -> f64 {
    let dec = dec_deg.to_radians();
    let lat = lat_deg.to_radians();
    let numerator = -horizon_sine - lat.sin() * dec.sin();
    let denominator = lat.cos() * dec.cos();
    if denominator.abs() < SINGULARITY_EPS {
        log::debug!("polar geometry (lat {lat_deg}, dec {dec_deg}): hour angle undefined");
        return if numerator > 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        };
    }
    numerator / denominator
}

/// The instant on the UTC date of `date` at which local sidereal time equals
/// `target_lst_hours`.
///
/// Only the calendar date of `date` matters; its time of day is ignored and
/// `date` itself is left untouched.
pub fn lst_to_instant(
    target_lst_hours: f64,
    longitude_deg: f64,
    date: &Time,
    solver: TransitSolver,
) -> Time {
    let midnight = date.start_of_day();
    let lst_midnight = local_sidereal_time(&midnight, longitude_deg).hours();
    let sidereal_offset = normalize_hours(target_lst_hours - lst_midnight);

    match solver {
        TransitSolver::LinearApproximation => midnight.add_hours(sidereal_offset),
        TransitSolver::Iterative => {
            let mut t = midnight.add_hours(sidereal_offset / SIDEREAL_PER_SOLAR);
            for iteration in 0..MAX_ITERATIONS {
                let lst = local_sidereal_time(&t, longitude_deg).hours();
                let error = wrap_signed_hours(target_lst_hours - lst);
                log::trace!("lst solver step {iteration}: t={t} error={error:.3e}h");
                if error.abs() < CONVERGENCE_HOURS {
                    return t;
                }
                t = t.add_hours(error / SIDEREAL_PER_SOLAR);
            }
            log::warn!(
                "lst solver did not converge to {target_lst_hours}h within {MAX_ITERATIONS} steps"
            );
            t
        }
    }
}

/// Meridian transit of right ascension `ra_hours` on the UTC date of `date`
pub fn transit_instant(
    ra_hours: f64,
    observer: &Observer,
    date: &Time,
    solver: TransitSolver,
) -> Time {
    lst_to_instant(ra_hours, observer.longitude(), date, solver)
}

/// Rise, transit and set of a fixed equatorial position.
///
/// The transit falls on the UTC date of `date`; rise and set are placed
/// symmetrically around it, so the rise may land on the previous date and the
/// set on the next one. Under [`TransitSolver::LinearApproximation`] the
/// semi-diurnal arc is applied as solar hours unchanged; under
/// [`TransitSolver::Iterative`] it is converted from sidereal hours.
pub fn rise_transit_set(
    position: &Equatorial,
    observer: &Observer,
    date: &Time,
    config: &RiseSetConfig,
) -> VisibilityResult {
    let cos_h = horizon_hour_angle_cosine(
        position.dec_degrees,
        observer.latitude(),
        config.horizon_sine,
    );

    if !position.ra_hours.is_finite() || cos_h.is_nan() {
        log::warn!(
            "cannot place ra {} dec {} with horizon sine {}",
            position.ra_hours,
            position.dec_degrees,
            config.horizon_sine
        );
        return VisibilityResult::without_events(
            date.start_of_day(),
            HorizonStatus::Undefined,
            cos_h,
        );
    }

    let transit = transit_instant(position.ra_hours, observer, date, config.solver);

    let status = if cos_h >= 1.0 {
        HorizonStatus::NeverRises
    } else if cos_h <= -1.0 {
        HorizonStatus::Circumpolar
    } else {
        HorizonStatus::RisesAndSets
    };

    if status != HorizonStatus::RisesAndSets {
        log::debug!(
            "dec {} from latitude {}: {status:?} (cos H = {cos_h})",
            position.dec_degrees,
            observer.latitude()
        );
        return VisibilityResult::without_events(transit, status, cos_h);
    }

    let arc_sidereal_hours = cos_h.acos().to_degrees() / DEG_PER_HOUR;
    let arc_hours = match config.solver {
        TransitSolver::LinearApproximation => arc_sidereal_hours,
        TransitSolver::Iterative => arc_sidereal_hours / SIDEREAL_PER_SOLAR,
    };

    let (Some(rise), Some(set)) = (
        transit.checked_add_hours(-arc_hours),
        transit.checked_add_hours(arc_hours),
    ) else {
        log::warn!("rise or set around {transit} is outside the calendar range");
        return VisibilityResult::without_events(transit, HorizonStatus::Undefined, cos_h);
    };

    if rise == transit || set == transit {
        log::debug!("dec {} only grazes the horizon (cos H = {cos_h})", position.dec_degrees);
        return VisibilityResult::without_events(transit, HorizonStatus::NeverRises, cos_h);
    }

    VisibilityResult {
        rise: Some(rise),
        transit,
        set: Some(set),
        status,
        cos_hour_angle: cos_h,
    }
}

/// Whether an object at declination `dec_deg` can ever be seen from latitude `lat_deg`.
///
/// A quick necessary test (`dec > lat − 90`), not a statement about the
/// current moment; use [`is_above_horizon`] for that.
pub fn is_star_visible(dec_deg: f64, lat_deg: f64) -> bool {
    dec_deg > lat_deg - 90.0
}

/// Horizontal position of an object for an observer at an instant
pub fn horizontal_position(position: &Equatorial, observer: &Observer, time: &Time) -> Horizontal {
    let lst = local_sidereal_time(time, observer.longitude());
    equatorial_to_horizontal(position, lst, observer.latitude())
}

/// Whether an object is above the geometric horizon right now
pub fn is_above_horizon(position: &Equatorial, observer: &Observer, time: &Time) -> bool {
    horizontal_position(position, observer, time).is_above_horizon()
}
