//! Shadow of a front-rim point on the back plane of a block of given depth.
use std::fmt;

use super::solar::{SolarGeometry, SunPosition, SurfaceOrientation};

/// Below this incidence cosine the sun is behind (or grazing) the surface.
pub const ERROR_TOLERANCE: f64 = 1e-4;

/// Offset of a rim point's shadow at the back plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowDisplacement {
    /// Vertical and horizontal shift [mm].
    Shifted { vertical: f64, horizontal: f64 },
    /// The sun is behind the surface: nothing is transmitted.
    Undefined,
}

impl ShadowDisplacement {
    pub fn new(vertical: f64, horizontal: f64) -> Self {
        ShadowDisplacement::Shifted {
            vertical,
            horizontal,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, ShadowDisplacement::Shifted { .. })
    }

    /// `(vertical, horizontal)` or `None` when undefined.
    pub fn components(&self) -> Option<(f64, f64)> {
        match *self {
            ShadowDisplacement::Shifted {
                vertical,
                horizontal,
            } => Some((vertical, horizontal)),
            ShadowDisplacement::Undefined => None,
        }
    }
}

impl fmt::Display for ShadowDisplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        match self {
            ShadowDisplacement::Shifted {
                vertical,
                horizontal,
            } => write!(
                f,
                "Shifted(vertical={:.prec$}, horizontal={:.prec$})",
                vertical,
                horizontal,
                prec = prec
            ),
            ShadowDisplacement::Undefined => write!(f, "Undefined"),
        }
    }
}

/// Profile-angle and surface solar-azimuth tangents for one sun position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowAngles {
    pub cos_theta: f64,
    pub tan_phi: f64,
    pub tan_gamma: f64,
}

impl ShadowAngles {
    /// Returns `None` when the sun is behind the surface.
    pub fn calculate(sun: SunPosition, surface: SurfaceOrientation) -> Option<Self> {
        let geo = SolarGeometry::new(sun, surface);
        let cos_theta = geo.cos_theta;
        if cos_theta < ERROR_TOLERANCE {
            return None;
        }
        let s = geo.sun;
        let tilt = surface.tilt.to_radians();
        let azi = surface.azimuth.to_radians();

        let tan_phi = (s.vertical * tilt.sin()
            - s.west * tilt.cos() * azi.sin()
            - s.south * tilt.cos() * azi.cos())
            / cos_theta;
        let tan_gamma = (s.west * azi.cos() - s.south * azi.sin()) / cos_theta;

        Some(Self {
            cos_theta,
            tan_phi,
            tan_gamma,
        })
    }

    pub fn displacement(&self, depth: f64) -> ShadowDisplacement {
        ShadowDisplacement::new(depth * self.tan_phi, depth * self.tan_gamma)
    }
}

/// Shadow displacement of a rim point for a block of the given depth and orientation.
pub fn shadow_displacement(
    tilt: f64,
    azimuth: f64,
    depth: f64,
    sun_altitude: f64,
    sun_azimuth: f64,
) -> ShadowDisplacement {
    let sun = SunPosition::new(sun_altitude, sun_azimuth);
    let surface = SurfaceOrientation::new(tilt, azimuth);
    match ShadowAngles::calculate(sun, surface) {
        Some(angles) => angles.displacement(depth),
        None => ShadowDisplacement::Undefined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_angles() {
        let angles = ShadowAngles::calculate(
            SunPosition::new(50.0, 20.0),
            SurfaceOrientation::new(90.0, 0.0),
        )
        .unwrap();
        assert!((angles.tan_phi - 1.268237683507072).abs() < 1e-9);
        assert!((angles.tan_gamma - 20f64.to_radians().tan()).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_displacement() {
        let d = shadow_displacement(90.0, 0.0, 100.0, 50.0, 20.0);
        let (v, h) = d.components().unwrap();
        assert!((v - 126.82376835070718).abs() < 1e-6, "vertical = {v}");
        assert!((h - 36.39702342662024).abs() < 1e-6, "horizontal = {h}");
    }

    #[test]
    fn test_sun_behind_surface() {
        let d = shadow_displacement(90.0, 0.0, 100.0, 30.0, 180.0);
        assert_eq!(d, ShadowDisplacement::Undefined);
        assert!(!d.is_defined());
        // Grazing incidence is treated the same way
        let d = shadow_displacement(90.0, 0.0, 100.0, 0.0, 90.0);
        assert_eq!(d, ShadowDisplacement::Undefined);
    }

    #[test]
    fn test_normal_incidence_has_no_shift() {
        let d = shadow_displacement(90.0, 0.0, 100.0, 0.0, 0.0);
        let (v, h) = d.components().unwrap();
        assert!(v.abs() < 1e-12 && h.abs() < 1e-12);
    }

    #[test]
    fn test_zero_depth_has_no_shift() {
        let d = shadow_displacement(90.0, 0.0, 0.0, 40.0, 30.0);
        assert_eq!(d, ShadowDisplacement::new(0.0, 0.0));
    }

    #[test]
    fn test_rotated_surface_matches_south() {
        // Turning both surface and sun by the same azimuth leaves the shadow unchanged.
        let south = shadow_displacement(90.0, 0.0, 100.0, 35.0, 10.0);
        let west = shadow_displacement(90.0, 90.0, 100.0, 35.0, 100.0);
        let (v0, h0) = south.components().unwrap();
        let (v1, h1) = west.components().unwrap();
        assert!((v0 - v1).abs() < 1e-9 && (h0 - h1).abs() < 1e-9);
    }
}
