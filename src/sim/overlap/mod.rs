//! Overlap between an opening and its shadow-displaced copy.
//!
//! Two interchangeable models share the [`OverlapModel`] trait:
//! [`Analytic`] (closed form per shape) and [`Raster`] (pixel counting,
//! used to validate the closed forms).
pub mod analytic;
pub mod raster;

use serde::{Deserialize, Serialize};

use crate::aperture::{ApertureSpec, ShapeKind};
use crate::error::Result;

use super::shadow::ShadowDisplacement;

pub use analytic::Analytic;
pub use raster::Raster;

/// Strategy computing the fraction of an opening left clear by a shadow shift.
pub trait OverlapModel {
    /// Overlap ratio in [0, 1] for a defined shift [mm].
    fn overlap_ratio(&self, aperture: &ApertureSpec, vertical: f64, horizontal: f64)
    -> Result<f64>;

    fn method(&self) -> Method;

    /// Transmittance for a displacement. An undefined displacement transmits nothing.
    fn transmittance(
        &self,
        aperture: &ApertureSpec,
        displacement: ShadowDisplacement,
    ) -> Result<f64> {
        match displacement.components() {
            Some((vertical, horizontal)) => self
                .overlap_ratio(aperture, vertical, horizontal)
                .map(|r| r.clamp(0.0, 1.0)),
            None => Ok(0.0),
        }
    }
}

/// Overlap model selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Analytic,
    Raster,
}

/// Result of one overlap evaluation, tagged for cross-validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmittanceSample {
    pub ratio: f64,
    pub method: Method,
    pub kind: ShapeKind,
}

impl TransmittanceSample {
    pub fn evaluate(
        model: &dyn OverlapModel,
        aperture: &ApertureSpec,
        displacement: ShadowDisplacement,
    ) -> Result<Self> {
        Ok(Self {
            ratio: model.transmittance(aperture, displacement)?,
            method: model.method(),
            kind: aperture.kind(),
        })
    }
}

/// Direct-beam transmittance of one opening.
///
/// `resolution` is only read by the raster method (pixels per inch); `None` uses
/// [`raster::DEFAULT_RESOLUTION`].
pub fn direct_transmittance(
    aperture: &ApertureSpec,
    displacement: ShadowDisplacement,
    method: Method,
    resolution: Option<f64>,
) -> Result<f64> {
    match method {
        Method::Analytic => Analytic.transmittance(aperture, displacement),
        Method::Raster => {
            let raster = Raster::new(resolution.unwrap_or(raster::DEFAULT_RESOLUTION))?;
            raster.transmittance(aperture, displacement)
        }
    }
}
