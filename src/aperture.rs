//! Aperture openings and the screen blocks that carry them.
pub mod assembly;
pub mod shape;

pub use assembly::ScreenAssembly;
pub use shape::{ApertureParams, ApertureShape, ApertureSpec, Placement, ShapeKind};
