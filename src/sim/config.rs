use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::diffuse::SampleDensity;
use super::overlap::raster::{DEFAULT_RESOLUTION, Raster};
use super::overlap::{Analytic, Method, OverlapModel};
use super::shadow::ERROR_TOLERANCE;

/// Configuration for a screen transmittance evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmittanceConfig {
    /// Overlap model used for the direct beam.
    pub method: Method,
    /// Raster resolution [px/inch], read only by the raster method.
    pub raster_resolution: f64,
    /// Target number of directions for the diffuse integrator.
    pub diffuse_sample_count: usize,
    /// Irradiance below this value is treated as zero.
    pub error_tolerance: f64,
}

impl TransmittanceConfig {
    pub fn new() -> Self {
        Self {
            method: Method::Analytic,
            raster_resolution: DEFAULT_RESOLUTION,
            diffuse_sample_count: SampleDensity::SCREENING.0,
            error_tolerance: ERROR_TOLERANCE,
        }
    }

    pub fn sample_density(&self) -> SampleDensity {
        SampleDensity(self.diffuse_sample_count)
    }

    /// Overlap model selected by [`Self::method`].
    pub fn overlap_model(&self) -> Result<Box<dyn OverlapModel + Send + Sync>> {
        Ok(match self.method {
            Method::Analytic => Box::new(Analytic),
            Method::Raster => Box::new(Raster::new(self.raster_resolution)?),
        })
    }
}

impl Default for TransmittanceConfig {
    fn default() -> Self {
        Self::new()
    }
}
