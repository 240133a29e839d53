//! Planar geometry used to describe aperture openings on the panel front plane.
//!
//! Coordinates are in millimetres, `x` along the panel's horizontal and `y` along
//! its vertical.
pub mod bboxes;
pub mod line;
pub mod point;
pub mod triangles;
pub mod vector;

/// Geometric precision
pub const EPS: f64 = 1e-13;
