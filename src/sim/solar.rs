//! Direction cosines of the sun ray and of a tilted surface normal.
//!
//! Conventions:
//! - Altitude: degrees above the horizon (negative below).
//! - Azimuth: degrees from south, west positive, for both the sun and the surface.
//! - Tilt: degrees from horizontal (0 = facing up, 90 = vertical).
use serde::{Deserialize, Serialize};

/// Position of the sun (or of any sampled source direction).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    /// Altitude angle in degrees.
    pub altitude: f64,
    /// Azimuth angle in degrees from south, west positive.
    pub azimuth: f64,
}

impl SunPosition {
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Self { altitude, azimuth }
    }

    /// Returns true if the sun is above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    /// Direction cosines `(s_h, s_w, s_s)` of the ray pointing toward the sun.
    pub fn direction_cosines(&self) -> DirectionCosines {
        let alt = self.altitude.to_radians();
        let azi = self.azimuth.to_radians();
        DirectionCosines {
            vertical: alt.sin(),
            west: alt.cos() * azi.sin(),
            south: alt.cos() * azi.cos(),
        }
    }
}

/// Components of a unit vector along the zenith, west and south axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionCosines {
    pub vertical: f64,
    pub west: f64,
    pub south: f64,
}

impl DirectionCosines {
    pub fn dot(&self, other: &Self) -> f64 {
        self.vertical * other.vertical + self.west * other.west + self.south * other.south
    }
}

/// Orientation of a tilted plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOrientation {
    /// Tilt in degrees.
    pub tilt: f64,
    /// Azimuth in degrees from south, west positive.
    pub azimuth: f64,
}

impl SurfaceOrientation {
    pub fn new(tilt: f64, azimuth: f64) -> Self {
        Self { tilt, azimuth }
    }

    /// Direction cosines `(w_z, w_w, w_s)` of the outward surface normal.
    pub fn normal(&self) -> DirectionCosines {
        let tilt = self.tilt.to_radians();
        let azi = self.azimuth.to_radians();
        DirectionCosines {
            vertical: tilt.cos(),
            west: tilt.sin() * azi.sin(),
            south: tilt.sin() * azi.cos(),
        }
    }
}

/// Sun ray and surface normal for one evaluation, with the incidence cosine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarGeometry {
    pub sun: DirectionCosines,
    pub normal: DirectionCosines,
    /// Cosine of the angle of incidence.
    pub cos_theta: f64,
}

impl SolarGeometry {
    pub fn new(sun: SunPosition, surface: SurfaceOrientation) -> Self {
        let sun = sun.direction_cosines();
        let normal = surface.normal();
        Self {
            sun,
            normal,
            cos_theta: sun.dot(&normal),
        }
    }
}
