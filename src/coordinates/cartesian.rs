//! # Render-Frame Cartesian Module
//!
//! This module provides the 3D point handed to a renderer. Two projections
//! produce it and they are not interchangeable:
//!
//! - [`Horizontal::to_cartesian`](super::Horizontal::to_cartesian) places an
//!   object on the observer's local sky dome: +y is the zenith, +z north,
//!   +x east. The point moves as time passes.
//! - [`Equatorial::to_sky_sphere`](super::Equatorial::to_sky_sphere) places an
//!   object on a fixed celestial sphere with the north celestial pole at +y.
//!   The point never moves.
//!
//! Both share the "+y is up" convention common to 3D scene graphs, and the
//! radius is whatever the scene wants.
//!
//! ## Examples
//!
//! ```rust
//! use skywatch::coordinates::{Cartesian3, Horizontal};
//!
//! let zenith = Horizontal::new(90.0, 0.0).to_cartesian(100.0);
//! assert!((zenith.y - 100.0).abs() < 1e-9);
//!
//! let back = zenith.to_horizontal();
//! assert!((back.altitude - 90.0).abs() < 1e-9);
//! ```

use super::angle::{clamp_unit, normalize_degrees};
use super::Horizontal;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// A point in the render frame (+y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cartesian3 {
    /// X-component (east on the local sky dome)
    pub x: f64,
    /// Y-component (up)
    pub y: f64,
    /// Z-component (north on the local sky dome)
    pub z: f64,
}

impl Cartesian3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Cartesian3 { x, y, z }
    }

    /// Distance from the origin
    pub fn magnitude(&self) -> f64 {
        self.to_vector3().norm()
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Cartesian3) -> f64 {
        (self.to_vector3() - other.to_vector3()).norm()
    }

    pub fn dot(&self, other: &Cartesian3) -> f64 {
        self.to_vector3().dot(&other.to_vector3())
    }

    /// Recover altitude and azimuth from a horizon-relative point.
    ///
    /// This inverts [`Horizontal::to_cartesian`] for any radius. The origin has
    /// no direction and maps to altitude 0, azimuth 0.
    pub fn to_horizontal(&self) -> Horizontal {
        let r = self.magnitude();
        if r == 0.0 {
            return Horizontal::new(0.0, 0.0);
        }
        let altitude = clamp_unit(self.y / r).asin().to_degrees();
        let azimuth = normalize_degrees(self.x.atan2(self.z).to_degrees());
        Horizontal::new(altitude, azimuth)
    }

    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn from_vector3(vec: Vector3<f64>) -> Self {
        Cartesian3::new(vec.x, vec.y, vec.z)
    }
}

impl From<Cartesian3> for Vector3<f64> {
    fn from(point: Cartesian3) -> Self {
        point.to_vector3()
    }
}
