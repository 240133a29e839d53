//! Pixel-counting overlap model.
//!
//! The opening and its shifted copy are plotted on square boolean grids; the
//! ratio is the number of pixels set in both over the number set in the first.
//! Independent of the closed forms in [`super::analytic`], so it is used to
//! check them. The resolution trades accuracy for cost.
use log::{debug, warn};
use ndarray::Array2;

use crate::aperture::{ApertureShape, ApertureSpec};
use crate::error::{ApertureError, Result};
use crate::geom::bboxes::{bounding_box, is_point_inside_bbox};
use crate::geom::point::Point;
use crate::geom::triangles::is_point_inside_convex_polygon;
use crate::geom::vector::Vector;

use super::{Method, OverlapModel};

/// Default resolution [px/inch].
pub const DEFAULT_RESOLUTION: f64 = 350.0;

/// Millimetres per inch.
const MM_PER_INCH: f64 = 25.4;

/// Raster overlap model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raster {
    resolution: f64,
}

impl Raster {
    pub fn new(resolution: f64) -> Result<Self> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(ApertureError::InvalidParameter(format!(
                "raster resolution must be positive, got {resolution}"
            )));
        }
        Ok(Self { resolution })
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Converts a length in millimetres to whole pixels.
    pub fn to_pixels(&self, mm: f64) -> f64 {
        (self.resolution * mm / MM_PER_INCH).round()
    }

    /// Plots the opening shifted by `(horizontal, vertical)` [mm] on a square grid.
    ///
    /// The grid spans the larger side of the opening's bounding box; the box's
    /// lower-left corner sits at pixel (0, 0). Rows are `y`, columns are `x`.
    pub fn rasterize(
        &self,
        aperture: &ApertureSpec,
        vertical: f64,
        horizontal: f64,
    ) -> Array2<bool> {
        let (pmin, pmax) = aperture.extents();
        let side = self.to_pixels((pmax.x - pmin.x).max(pmax.y - pmin.y)).max(0.0) as usize;
        let shift = Vector::new(self.to_pixels(horizontal), self.to_pixels(vertical));
        let shape = PixelShape::new(self, aperture.shape(), pmin, shift);

        if shift.dx.abs() >= side as f64 || shift.dy.abs() >= side as f64 {
            warn!("Raster shift {shift} leaves the {side}x{side} grid");
        }

        Array2::from_shape_fn((side, side), |(row, col)| {
            shape.contains(Point::new(col as f64, row as f64))
        })
    }
}

impl OverlapModel for Raster {
    fn overlap_ratio(
        &self,
        aperture: &ApertureSpec,
        vertical: f64,
        horizontal: f64,
    ) -> Result<f64> {
        let grid = self.rasterize(aperture, 0.0, 0.0);
        let shifted = self.rasterize(aperture, vertical, horizontal);

        let all_pixels = grid.iter().filter(|&&b| b).count();
        if all_pixels == 0 {
            return Err(ApertureError::InvalidParameter(format!(
                "{} opening covers no pixels at resolution {}",
                aperture.kind(),
                self.resolution
            )));
        }
        let overlap_pixels = grid
            .iter()
            .zip(shifted.iter())
            .filter(|&(&a, &b)| a && b)
            .count();

        debug!(
            "Raster overlap for {}: {overlap_pixels}/{all_pixels} pixels on a {}x{} grid",
            aperture.kind(),
            grid.nrows(),
            grid.ncols()
        );
        Ok(overlap_pixels as f64 / all_pixels as f64)
    }

    fn method(&self) -> Method {
        Method::Raster
    }
}

/// Opening outline converted to pixel coordinates.
enum PixelShape {
    Polygon { pts: Vec<Point>, pmin: Point, pmax: Point },
    Disc { center: Point, radius: f64 },
}

impl PixelShape {
    fn new(raster: &Raster, shape: &ApertureShape, origin: Point, shift: Vector) -> Self {
        let to_px = |p: Point| {
            Point::new(
                raster.to_pixels(p.x - origin.x),
                raster.to_pixels(p.y - origin.y),
            ) + shift
        };
        match *shape {
            ApertureShape::Circle { radius } => PixelShape::Disc {
                center: to_px(Point::new(radius, radius)),
                radius: raster.to_pixels(radius),
            },
            ApertureShape::Square { .. } | ApertureShape::Triangle { .. } => {
                let pts: Vec<Point> = shape
                    .outline()
                    .unwrap_or_default()
                    .into_iter()
                    .map(to_px)
                    .collect();
                let (pmin, pmax) = bounding_box(&pts).unwrap_or((origin, origin));
                PixelShape::Polygon { pts, pmin, pmax }
            }
        }
    }

    fn contains(&self, pt: Point) -> bool {
        match self {
            PixelShape::Polygon { pts, pmin, pmax } => {
                is_point_inside_bbox(pt, *pmin, *pmax) && is_point_inside_convex_polygon(pt, pts)
            }
            PixelShape::Disc { center, radius } => pt.distance(center) <= *radius,
        }
    }
}
