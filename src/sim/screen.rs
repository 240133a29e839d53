//! Time-step evaluation of a screen block against incident irradiance.
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::aperture::ScreenAssembly;
use crate::error::Result;

use super::config::TransmittanceConfig;
use super::diffuse::{DiffuseIntegrator, DiffuseMode};
use super::overlap::OverlapModel;
use super::shadow::{ShadowDisplacement, shadow_displacement};
use super::solar::SunPosition;

/// Incident irradiance on the panel plane for one time step [W/m2].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrradianceStep {
    pub sun: SunPosition,
    pub direct_w_m2: f64,
    pub sky_w_m2: f64,
    pub reflected_w_m2: f64,
}

impl IrradianceStep {
    pub fn new(sun: SunPosition, direct_w_m2: f64, sky_w_m2: f64, reflected_w_m2: f64) -> Self {
        Self {
            sun,
            direct_w_m2,
            sky_w_m2,
            reflected_w_m2,
        }
    }

    pub fn total_w_m2(&self) -> f64 {
        self.direct_w_m2 + self.sky_w_m2 + self.reflected_w_m2
    }
}

/// Source of sun positions and plane-of-panel irradiance.
pub trait SolarIrradianceProvider {
    fn time_steps(&self) -> Vec<IrradianceStep>;
}

impl SolarIrradianceProvider for [IrradianceStep] {
    fn time_steps(&self) -> Vec<IrradianceStep> {
        self.to_vec()
    }
}

impl SolarIrradianceProvider for Vec<IrradianceStep> {
    fn time_steps(&self) -> Vec<IrradianceStep> {
        self.clone()
    }
}

/// Transmittance of one opening in one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningResult {
    pub displacement: ShadowDisplacement,
    pub direct_rate: f64,
    pub sky_rate: f64,
    pub reflected_rate: f64,
    /// Irradiance-weighted rate over all components.
    pub total_rate: f64,
}

/// Output row of [`ScreenEvaluator::evaluate_step`]. Powers are in W.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub sun: SunPosition,
    pub openings: Vec<OpeningResult>,
    pub direct_transmitted_w: f64,
    pub sky_transmitted_w: f64,
    pub reflected_transmitted_w: f64,
    pub front_incident_w: f64,
    pub screen_rate: f64,
}

impl StepResult {
    pub fn transmitted_w(&self) -> f64 {
        self.direct_transmitted_w + self.sky_transmitted_w + self.reflected_transmitted_w
    }
}

#[derive(Debug, Clone, Copy)]
struct DiffuseRates {
    sky: f64,
    reflected: f64,
}

/// Evaluates a screen assembly step by step.
///
/// Diffuse transmittance does not depend on the sun, so it is integrated once per
/// opening when the evaluator is built.
pub struct ScreenEvaluator {
    assembly: ScreenAssembly,
    config: TransmittanceConfig,
    model: Box<dyn OverlapModel + Send + Sync>,
    diffuse: Vec<DiffuseRates>,
}

impl ScreenEvaluator {
    pub fn new(assembly: ScreenAssembly, config: TransmittanceConfig) -> Result<Self> {
        let model = config.overlap_model()?;
        let integrator = DiffuseIntegrator::new(config.sample_density());
        let diffuse: Vec<DiffuseRates> = assembly
            .openings()
            .iter()
            .map(|opening| DiffuseRates {
                sky: integrator.transmittance(opening, DiffuseMode::Sky),
                reflected: integrator.transmittance(opening, DiffuseMode::Reflected),
            })
            .collect();
        info!(
            "Screen evaluator ready: {} openings, method {:?}, front {}x{} mm",
            assembly.openings().len(),
            config.method,
            assembly.front_width(),
            assembly.front_height()
        );
        Ok(Self {
            assembly,
            config,
            model,
            diffuse,
        })
    }

    pub fn assembly(&self) -> &ScreenAssembly {
        &self.assembly
    }

    pub fn config(&self) -> &TransmittanceConfig {
        &self.config
    }

    /// Cached sky transmittance of opening `i`.
    pub fn sky_transmittance(&self, i: usize) -> Option<f64> {
        self.diffuse.get(i).map(|d| d.sky)
    }

    /// Cached ground-reflected transmittance of opening `i`.
    pub fn reflected_transmittance(&self, i: usize) -> Option<f64> {
        self.diffuse.get(i).map(|d| d.reflected)
    }

    pub fn evaluate_step(&self, step: &IrradianceStep) -> Result<StepResult> {
        let tol = self.config.error_tolerance;
        let incident = step.total_w_m2();

        let mut openings = Vec::with_capacity(self.diffuse.len());
        let mut direct_w = 0.0;
        let mut sky_w = 0.0;
        let mut reflected_w = 0.0;

        for (opening, rates) in self.assembly.openings().iter().zip(&self.diffuse) {
            let displacement = shadow_displacement(
                self.assembly.tilt(),
                self.assembly.azimuth(),
                opening.depth(),
                step.sun.altitude,
                step.sun.azimuth,
            );
            let direct_rate = if step.direct_w_m2 < tol {
                0.0
            } else {
                self.model.transmittance(opening, displacement)?
            };
            let total_rate = if incident < tol {
                0.0
            } else {
                (step.direct_w_m2 * direct_rate
                    + step.sky_w_m2 * rates.sky
                    + step.reflected_w_m2 * rates.reflected)
                    / incident
            };

            let area_m2 = opening.area() * 1e-6;
            direct_w += step.direct_w_m2 * direct_rate * area_m2;
            sky_w += step.sky_w_m2 * rates.sky * area_m2;
            reflected_w += step.reflected_w_m2 * rates.reflected * area_m2;

            openings.push(OpeningResult {
                displacement,
                direct_rate,
                sky_rate: rates.sky,
                reflected_rate: rates.reflected,
                total_rate,
            });
        }

        let front_incident_w = incident * self.assembly.front_area() * 1e-6;
        let transmitted = direct_w + sky_w + reflected_w;
        let screen_rate = if front_incident_w < tol {
            0.0
        } else {
            transmitted / front_incident_w
        };
        debug!(
            "Step at sun ({:.2}, {:.2}): transmitted {transmitted:.4} W of {front_incident_w:.4} W",
            step.sun.altitude, step.sun.azimuth
        );

        Ok(StepResult {
            sun: step.sun,
            openings,
            direct_transmitted_w: direct_w,
            sky_transmitted_w: sky_w,
            reflected_transmitted_w: reflected_w,
            front_incident_w,
            screen_rate,
        })
    }

    /// Evaluates every step of `provider`, in the provider's order.
    pub fn run<P>(&self, provider: &P) -> Result<Vec<StepResult>>
    where
        P: SolarIrradianceProvider + ?Sized,
    {
        let steps = provider.time_steps();
        info!("Evaluating {} time steps", steps.len());
        steps
            .par_iter()
            .map(|step| self.evaluate_step(step))
            .collect()
    }
}

/// Transmitted power over incident power across `rows`. Zero when nothing is incident.
pub fn period_transmittance(rows: &[StepResult]) -> f64 {
    let incident: f64 = rows.iter().map(|r| r.front_incident_w).sum();
    if incident <= 0.0 {
        return 0.0;
    }
    rows.iter().map(StepResult::transmitted_w).sum::<f64>() / incident
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aperture::{ApertureSpec, Placement};
    use crate::sim::diffuse::{SampleDensity, diffuse_transmittance};
    use crate::sim::overlap::{Method, direct_transmittance};

    fn almost_equal(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn evaluator() -> ScreenEvaluator {
        let square = ApertureSpec::square(130.0, 130.0, Placement::vertical(100.0)).unwrap();
        let assembly = ScreenAssembly::new(vec![square], 150.0, 150.0, 90.0, 0.0).unwrap();
        ScreenEvaluator::new(assembly, TransmittanceConfig::new()).unwrap()
    }

    #[test]
    fn test_diffuse_is_cached_per_opening() {
        let ev = evaluator();
        let opening = &ev.assembly().openings()[0];
        let expected = diffuse_transmittance(opening, DiffuseMode::Sky, SampleDensity::SCREENING);
        assert_eq!(ev.sky_transmittance(0), Some(expected));
        assert!(ev.reflected_transmittance(0).is_some());
        assert_eq!(ev.sky_transmittance(1), None);
    }

    #[test]
    fn test_evaluate_step() {
        let ev = evaluator();
        let sun = SunPosition::new(50.0, 20.0);
        let step = IrradianceStep::new(sun, 500.0, 100.0, 50.0);
        let row = ev.evaluate_step(&step).unwrap();

        let opening = &ev.assembly().openings()[0];
        let disp = shadow_displacement(90.0, 0.0, 100.0, 50.0, 20.0);
        let tau_d = direct_transmittance(opening, disp, Method::Analytic, None).unwrap();
        assert!(almost_equal(tau_d, 0.01759199625209366, 1e-12));

        let result = row.openings[0];
        assert_eq!(result.direct_rate, tau_d);
        let tau_s = result.sky_rate;
        let tau_r = result.reflected_rate;
        let expected_total = (500.0 * tau_d + 100.0 * tau_s + 50.0 * tau_r) / 650.0;
        assert!(almost_equal(result.total_rate, expected_total, 1e-12));

        let area_m2 = 130.0 * 130.0 * 1e-6;
        assert!(almost_equal(row.direct_transmitted_w, 500.0 * tau_d * area_m2, 1e-12));
        assert!(almost_equal(row.sky_transmitted_w, 100.0 * tau_s * area_m2, 1e-12));
        assert!(almost_equal(row.front_incident_w, 650.0 * 150.0 * 150.0 * 1e-6, 1e-12));
        assert!(almost_equal(
            row.screen_rate,
            row.transmitted_w() / row.front_incident_w,
            1e-12
        ));
    }

    #[test]
    fn test_sun_behind_panel_blocks_direct() {
        let ev = evaluator();
        let step = IrradianceStep::new(SunPosition::new(30.0, 180.0), 400.0, 80.0, 20.0);
        let row = ev.evaluate_step(&step).unwrap();
        assert!(!row.openings[0].displacement.is_defined());
        assert_eq!(row.openings[0].direct_rate, 0.0);
        assert_eq!(row.direct_transmitted_w, 0.0);
        assert!(row.sky_transmitted_w > 0.0);
    }

    #[test]
    fn test_negligible_direct_is_ignored() {
        let ev = evaluator();
        let step = IrradianceStep::new(SunPosition::new(50.0, 0.0), 0.0, 100.0, 0.0);
        let row = ev.evaluate_step(&step).unwrap();
        assert_eq!(row.openings[0].direct_rate, 0.0);
        assert!(almost_equal(row.openings[0].total_rate, row.openings[0].sky_rate, 1e-12));
    }

    #[test]
    fn test_dark_step() {
        let ev = evaluator();
        let step = IrradianceStep::new(SunPosition::new(-10.0, 0.0), 0.0, 0.0, 0.0);
        let row = ev.evaluate_step(&step).unwrap();
        assert_eq!(row.openings[0].total_rate, 0.0);
        assert_eq!(row.front_incident_w, 0.0);
        assert_eq!(row.screen_rate, 0.0);
    }

    #[test]
    fn test_run_and_period_transmittance() {
        let ev = evaluator();
        let steps = vec![
            IrradianceStep::new(SunPosition::new(20.0, -40.0), 300.0, 60.0, 30.0),
            IrradianceStep::new(SunPosition::new(50.0, 20.0), 500.0, 100.0, 50.0),
            IrradianceStep::new(SunPosition::new(-5.0, 0.0), 0.0, 0.0, 0.0),
        ];
        let rows = ev.run(&steps).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].sun, steps[1].sun);

        let incident = rows[0].front_incident_w + rows[1].front_incident_w;
        let transmitted = rows[0].transmitted_w() + rows[1].transmitted_w();
        assert!(almost_equal(period_transmittance(&rows), transmitted / incident, 1e-12));
        assert_eq!(period_transmittance(&rows[2..]), 0.0);
        assert_eq!(period_transmittance(&[]), 0.0);
    }
}
