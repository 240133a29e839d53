use crate::error::{ApertureError, Result};

use super::shape::ApertureSpec;

/// A screen block: a front panel carrying one or more openings.
///
/// Every opening shares the panel's tilt and azimuth.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenAssembly {
    openings: Vec<ApertureSpec>,
    front_width: f64,
    front_height: f64,
    front_area: f64,
    tilt: f64,
    azimuth: f64,
}

impl ScreenAssembly {
    pub fn new(
        openings: Vec<ApertureSpec>,
        front_width: f64,
        front_height: f64,
        tilt: f64,
        azimuth: f64,
    ) -> Result<Self> {
        if openings.is_empty() {
            return Err(ApertureError::InvalidParameter(
                "screen block needs at least one opening".to_string(),
            ));
        }
        if !(front_width.is_finite() && front_width > 0.0)
            || !(front_height.is_finite() && front_height > 0.0)
        {
            return Err(ApertureError::InvalidParameter(format!(
                "front face must be positive, got {front_width} x {front_height}"
            )));
        }
        for (i, opening) in openings.iter().enumerate() {
            if opening.tilt() != tilt || opening.azimuth() != azimuth {
                return Err(ApertureError::InvalidParameter(format!(
                    "opening {i} is oriented at tilt={}, azimuth={} but the panel at tilt={tilt}, azimuth={azimuth}",
                    opening.tilt(),
                    opening.azimuth()
                )));
            }
        }
        Ok(Self {
            openings,
            front_width,
            front_height,
            front_area: front_width * front_height,
            tilt,
            azimuth,
        })
    }

    /// Builds an assembly after turning every opening to the panel's orientation.
    pub fn oriented(
        openings: &[ApertureSpec],
        front_width: f64,
        front_height: f64,
        tilt: f64,
        azimuth: f64,
    ) -> Result<Self> {
        let openings = openings
            .iter()
            .map(|o| o.with_orientation(tilt, azimuth))
            .collect::<Result<Vec<_>>>()?;
        Self::new(openings, front_width, front_height, tilt, azimuth)
    }

    /// Returns a copy of this assembly facing another azimuth.
    pub fn with_azimuth(&self, azimuth: f64) -> Result<Self> {
        Self::oriented(
            &self.openings,
            self.front_width,
            self.front_height,
            self.tilt,
            azimuth,
        )
    }

    pub fn openings(&self) -> &[ApertureSpec] {
        &self.openings
    }

    pub fn front_width(&self) -> f64 {
        self.front_width
    }

    pub fn front_height(&self) -> f64 {
        self.front_height
    }

    /// Front face area [mm^2].
    pub fn front_area(&self) -> f64 {
        self.front_area
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Total opening area over the front face area.
    pub fn opening_area_rate(&self) -> f64 {
        let total: f64 = self.openings.iter().map(|o| o.area()).sum();
        total / self.front_area
    }

    /// Area of the partitions lining the openings (perimeter times depth),
    /// over twice the front face area.
    pub fn partition_area_rate(&self) -> f64 {
        let total: f64 = self
            .openings
            .iter()
            .map(|o| o.perimeter() * o.depth())
            .sum();
        total / (self.front_area * 2.0)
    }
}
