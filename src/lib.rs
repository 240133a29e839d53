pub mod aperture;
pub mod error;
pub mod geom;
pub mod io;
pub mod sim;
pub mod vecutils;

// Prelude
pub use aperture::{ApertureParams, ApertureShape, ApertureSpec, Placement, ScreenAssembly, ShapeKind};
pub use error::ApertureError;
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use sim::config::TransmittanceConfig;
pub use sim::diffuse::{DiffuseIntegrator, DiffuseMode, SampleDensity, diffuse_transmittance};
pub use sim::directions::Compass;
pub use sim::overlap::{Analytic, Method, OverlapModel, Raster, direct_transmittance};
pub use sim::screen::{
    IrradianceStep, ScreenEvaluator, SolarIrradianceProvider, StepResult, period_transmittance,
};
pub use sim::shadow::{ShadowDisplacement, shadow_displacement};
pub use sim::solar::SunPosition;
