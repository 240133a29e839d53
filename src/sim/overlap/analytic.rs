//! Closed-form overlap ratios per opening shape.
use std::f64::consts::PI;

use crate::aperture::{ApertureShape, ApertureSpec};
use crate::error::Result;
use crate::geom::line::Line;
use crate::geom::point::Point;
use crate::geom::triangles::is_point_inside_triangle;
use crate::geom::vector::Vector;

use super::{Method, OverlapModel};

/// Closed-form overlap model.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analytic;

impl OverlapModel for Analytic {
    fn overlap_ratio(
        &self,
        aperture: &ApertureSpec,
        vertical: f64,
        horizontal: f64,
    ) -> Result<f64> {
        let ratio = match *aperture.shape() {
            ApertureShape::Square { width, height } => {
                square_ratio(width, height, vertical, horizontal)
            }
            ApertureShape::Circle { radius } => circle_ratio(radius, vertical, horizontal),
            ApertureShape::Triangle { vertices } => triangle_ratio(&vertices, vertical, horizontal),
        };
        Ok(ratio)
    }

    fn method(&self) -> Method {
        Method::Analytic
    }
}

/// Overlap of a `width` x `height` rectangle with its shifted copy.
pub fn square_ratio(width: f64, height: f64, vertical: f64, horizontal: f64) -> f64 {
    let dx = horizontal.abs();
    let dy = vertical.abs();
    if dx >= width || dy >= height {
        return 0.0;
    }
    (width - dx) * (height - dy) / (width * height)
}

/// Overlap of a circle with its shifted copy (lens area over circle area).
pub fn circle_ratio(radius: f64, vertical: f64, horizontal: f64) -> f64 {
    let d = vertical.hypot(horizontal);
    if d >= 2.0 * radius {
        return 0.0;
    }
    let full = PI * radius.powi(2);
    let angle = 2.0 * (d / (2.0 * radius)).acos();
    let sector = full * angle / (2.0 * PI);
    let triangle = 0.5 * radius.powi(2) * angle.sin();
    2.0 * (sector - triangle) / full
}

/// Returns a fresh copy of `vertices` shifted by `(horizontal, vertical)`.
pub fn translate_vertices(vertices: &[Point; 3], vertical: f64, horizontal: f64) -> [Point; 3] {
    let shift = Vector::new(horizontal, vertical);
    vertices.map(|p| p + shift)
}

/// Overlap of triangle ABC with its shifted copy A'B'C'.
///
/// The overlap of a triangle with a translate of itself is a similar triangle.
/// One of its corners is a vertex of one triangle lying inside the other. The
/// first such vertex in the order A, B, C, A', B', C' is used; the area ratio is
/// the squared ratio of its distance to the opposite side of the other triangle
/// over the distance of the matching vertex to that side.
pub fn triangle_ratio(vertices: &[Point; 3], vertical: f64, horizontal: f64) -> f64 {
    let shifted = translate_vertices(vertices, vertical, horizontal);

    for idx in 0..6 {
        let (own, other) = if idx < 3 {
            (vertices, &shifted)
        } else {
            (&shifted, vertices)
        };
        let k = idx % 3;
        let inside = own[k];
        if !is_point_inside_triangle(inside, other[0], other[1], other[2]) {
            continue;
        }
        let base = other[k];
        let side = Line::through_points(other[(k + 1) % 3], other[(k + 2) % 3]);
        let h = side.distance_to(base);
        let h_inside = side.distance_to(inside);
        if h <= 0.0 {
            return 0.0;
        }
        return (h_inside / h).powi(2).min(1.0);
    }

    0.0
}
