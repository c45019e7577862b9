//! Solar system bodies and the ephemeris provider boundary
//!
//! Positions of the Sun, Moon and planets are not computed here. An external
//! provider implements [`EphemerisProvider`] and hands back apparent
//! equatorial coordinates for a [`Body`] at an instant; everything else in the
//! crate works from those.

use crate::coordinates::Equatorial;
use crate::observer::Observer;
use crate::time::Time;
use crate::{Result, SkyError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Enum representing the solar system bodies a provider can be asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Every supported body, Sun first
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Body::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SkyError::ObjectNotFound(s.to_string()))
    }
}

/// Apparent position of a body as supplied by the ephemeris provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub equatorial: Equatorial,
    /// Distance from the observer in AU
    pub distance_au: f64,
    /// Apparent visual magnitude
    pub magnitude: f64,
}

/// Source of body positions
///
/// Implementations must be deterministic for a given `(body, time, observer)`;
/// the clock driver may call from any thread.
pub trait EphemerisProvider: Send + Sync {
    fn position(&self, body: Body, time: &Time, observer: &Observer) -> Result<BodyPosition>;
}

/// Provider backed by a fixed table; positions do not change with time
#[derive(Debug, Clone, Default)]
pub struct FixedEphemeris {
    positions: HashMap<Body, BodyPosition>,
}

impl FixedEphemeris {
    /// Create a new empty ephemeris
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the position of a body
    pub fn with_body(mut self, body: Body, position: BodyPosition) -> Self {
        self.positions.insert(body, position);
        self
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl EphemerisProvider for FixedEphemeris {
    fn position(&self, body: Body, _time: &Time, _observer: &Observer) -> Result<BodyPosition> {
        self.positions
            .get(&body)
            .copied()
            .ok_or_else(|| SkyError::ObjectNotFound(body.name().to_string()))
    }
}
