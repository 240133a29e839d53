//! Direction-independent transmittance for sky and ground-reflected light.
//!
//! The direct-beam overlap is averaged over a fixed grid of source directions:
//! altitudes follow a cosine-weighted hemisphere mapping, azimuths are uniform
//! over the frontal half relative to the surface normal. The average is a plain
//! arithmetic mean over the grid, not a solid-angle integral.
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aperture::ApertureSpec;
use crate::vecutils::mean;

use super::overlap::{Analytic, OverlapModel};
use super::shadow::shadow_displacement;

/// Light source modelled by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffuseMode {
    /// Diffuse daylight from the upper hemisphere.
    Sky,
    /// Ground-reflected light, an equivalent source below the horizon.
    Reflected,
}

/// Target number of sampled directions (before the frontal-half filter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleDensity(pub usize);

impl SampleDensity {
    /// Screening runs.
    pub const SCREENING: SampleDensity = SampleDensity(10_000);
    /// Production diffuse-rate runs.
    pub const PRODUCTION: SampleDensity = SampleDensity(1_000_000);

    /// Number of intervals per axis; each axis holds `intervals + 1` samples.
    pub fn intervals(&self) -> usize {
        ((self.0 as f64).sqrt().round() as usize).max(1)
    }

    /// Evenly spaced samples `i / n` for `i = 0..=n`.
    pub fn unit_samples(&self) -> Vec<f64> {
        let n = self.intervals();
        (0..=n).map(|i| i as f64 / n as f64).collect()
    }
}

impl Default for SampleDensity {
    fn default() -> Self {
        Self::SCREENING
    }
}

/// Averages analytic overlap ratios over a deterministic grid of directions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffuseIntegrator {
    density: SampleDensity,
}

impl DiffuseIntegrator {
    pub fn new(density: SampleDensity) -> Self {
        Self { density }
    }

    pub fn density(&self) -> SampleDensity {
        self.density
    }

    /// Source altitudes [deg]: `90 - acos(sqrt(1 - u))`, negated for reflected light.
    pub fn altitudes(&self, mode: DiffuseMode) -> Vec<f64> {
        self.density
            .unit_samples()
            .into_iter()
            .map(|u| {
                let alt = 90.0 - (1.0 - u).max(0.0).sqrt().acos().to_degrees();
                match mode {
                    DiffuseMode::Sky => alt,
                    DiffuseMode::Reflected => -alt,
                }
            })
            .collect()
    }

    /// Source azimuths [deg] relative to the surface normal, within [-90, 90].
    ///
    /// `360·u` is wrapped into (-180, 180] and samples behind the surface are dropped.
    pub fn relative_azimuths(&self) -> Vec<f64> {
        self.density
            .unit_samples()
            .into_iter()
            .map(|u| {
                let azi = 360.0 * u;
                if azi > 180.0 { azi - 360.0 } else { azi }
            })
            .filter(|azi| (-90.0..=90.0).contains(azi))
            .collect()
    }

    fn row(&self, aperture: &ApertureSpec, altitude: f64, azimuths: &[f64]) -> Vec<f64> {
        azimuths
            .iter()
            .map(|rel| {
                let d = shadow_displacement(
                    aperture.tilt(),
                    aperture.azimuth(),
                    aperture.depth(),
                    altitude,
                    aperture.azimuth() + rel,
                );
                // The analytic model cannot fail
                Analytic.transmittance(aperture, d).unwrap_or(0.0)
            })
            .collect()
    }

    fn reduce(&self, aperture: &ApertureSpec, mode: DiffuseMode, rows: Vec<Vec<f64>>) -> f64 {
        let ratios: Vec<f64> = rows.into_iter().flatten().collect();
        if ratios.is_empty() {
            warn!("No diffuse samples for {} opening", aperture.kind());
            return 0.0;
        }
        let value = mean(&ratios);
        debug!(
            "Diffuse {mode:?} transmittance of {} opening: {value:.6} over {} samples",
            aperture.kind(),
            ratios.len()
        );
        value
    }

    /// Transmittance averaged over the sample grid. Altitude rows run in parallel;
    /// the reduction runs in grid order so results do not depend on threading.
    pub fn transmittance(&self, aperture: &ApertureSpec, mode: DiffuseMode) -> f64 {
        let azimuths = self.relative_azimuths();
        let rows: Vec<Vec<f64>> = self
            .altitudes(mode)
            .into_par_iter()
            .map(|alt| self.row(aperture, alt, &azimuths))
            .collect();
        self.reduce(aperture, mode, rows)
    }

    /// Single-threaded variant of [`Self::transmittance`].
    pub fn transmittance_sequential(&self, aperture: &ApertureSpec, mode: DiffuseMode) -> f64 {
        let azimuths = self.relative_azimuths();
        let rows: Vec<Vec<f64>> = self
            .altitudes(mode)
            .into_iter()
            .map(|alt| self.row(aperture, alt, &azimuths))
            .collect();
        self.reduce(aperture, mode, rows)
    }
}

/// Diffuse transmittance of one opening.
pub fn diffuse_transmittance(
    aperture: &ApertureSpec,
    mode: DiffuseMode,
    density: SampleDensity,
) -> f64 {
    DiffuseIntegrator::new(density).transmittance(aperture, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aperture::Placement;
    use crate::geom::point::Point;

    fn square() -> ApertureSpec {
        ApertureSpec::square(130.0, 130.0, Placement::vertical(100.0)).unwrap()
    }

    #[test]
    fn test_unit_samples() {
        let s = SampleDensity(100).unit_samples();
        assert_eq!(s.len(), 11);
        assert_eq!(s[0], 0.0);
        assert_eq!(s[10], 1.0);
        assert_eq!(SampleDensity(0).intervals(), 1);
        assert_eq!(SampleDensity::PRODUCTION.intervals(), 1000);
    }

    #[test]
    fn test_altitudes_span_hemisphere() {
        let integ = DiffuseIntegrator::new(SampleDensity(100));
        let sky = integ.altitudes(DiffuseMode::Sky);
        assert!((sky[0] - 90.0).abs() < 1e-12);
        assert!(sky[10].abs() < 1e-12);
        assert!(sky.windows(2).all(|w| w[0] >= w[1]));
        let ground = integ.altitudes(DiffuseMode::Reflected);
        assert!(sky.iter().zip(ground.iter()).all(|(s, g)| *s == -*g));
    }

    #[test]
    fn test_azimuths_are_frontal() {
        let integ = DiffuseIntegrator::new(SampleDensity::SCREENING);
        let azimuths = integ.relative_azimuths();
        assert_eq!(azimuths.len(), 52);
        assert!(azimuths.iter().all(|a| (-90.0..=90.0).contains(a)));
        assert!(azimuths.contains(&90.0));
        assert!(azimuths.contains(&-90.0));
    }

    #[test]
    fn test_square_sky_screening_value() {
        let value = diffuse_transmittance(&square(), DiffuseMode::Sky, SampleDensity::SCREENING);
        assert!((value - 0.09453074913577604).abs() < 1e-9, "got {value}");
    }

    #[test]
    fn test_vertical_square_sky_equals_reflected() {
        let integ = DiffuseIntegrator::default();
        let sky = integ.transmittance(&square(), DiffuseMode::Sky);
        let ground = integ.transmittance(&square(), DiffuseMode::Reflected);
        assert!((sky - ground).abs() < 1e-12);
    }

    #[test]
    fn test_parallel_matches_sequential_bitwise() {
        let tri = ApertureSpec::triangle(
            [Point::new(0., 0.), Point::new(0., 130.), Point::new(130., 130.)],
            Placement::new(100.0, 60.0, 30.0),
        )
        .unwrap();
        let integ = DiffuseIntegrator::new(SampleDensity(2_500));
        for mode in [DiffuseMode::Sky, DiffuseMode::Reflected] {
            let a = integ.transmittance(&tri, mode);
            let b = integ.transmittance_sequential(&tri, mode);
            let c = integ.transmittance(&tri, mode);
            assert_eq!(a.to_bits(), b.to_bits());
            assert_eq!(a.to_bits(), c.to_bits());
            assert!((0.0..=1.0).contains(&a));
        }
    }

    #[test]
    fn test_orientation_invariance_for_vertical_block() {
        let south = square();
        let west = south.with_orientation(90.0, 90.0).unwrap();
        let integ = DiffuseIntegrator::new(SampleDensity(400));
        let a = integ.transmittance(&south, DiffuseMode::Sky);
        let b = integ.transmittance(&west, DiffuseMode::Sky);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn test_zero_depth_transmits_frontal_samples() {
        let thin = ApertureSpec::circle(65.0, Placement::vertical(0.0)).unwrap();
        let value = diffuse_transmittance(&thin, DiffuseMode::Sky, SampleDensity(100));
        // Only the zenith row is grazing and transmits nothing
        assert!(value > 0.5 && value < 1.0, "got {value}");
    }
}
