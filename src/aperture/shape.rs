use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ApertureError, Result};
use crate::geom::bboxes::bounding_box;
use crate::geom::point::Point;
use crate::geom::point::check::{are_points_collinear, are_points_distinct};
use crate::geom::triangles::triangle_area;

/// Kind of opening cut through a screen block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ApertureError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(ShapeKind::Square),
            "circle" => Ok(ShapeKind::Circle),
            "triangle" => Ok(ShapeKind::Triangle),
            _ => Err(ApertureError::InvalidShapeKind(s.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outline of a single opening, in millimetres on the panel front plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ApertureShape {
    /// Rectangle with its lower-left corner at the origin.
    Square { width: f64, height: f64 },
    /// Circle whose bounding box has its lower-left corner at the origin.
    Circle { radius: f64 },
    /// Arbitrary triangle, vertices labelled A, B, C in this order.
    Triangle { vertices: [Point; 3] },
}

impl ApertureShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ApertureShape::Square { .. } => ShapeKind::Square,
            ApertureShape::Circle { .. } => ShapeKind::Circle,
            ApertureShape::Triangle { .. } => ShapeKind::Triangle,
        }
    }

    fn validate(&self) -> Result<()> {
        match *self {
            ApertureShape::Square { width, height } => {
                check_positive("width", width)?;
                check_positive("height", height)
            }
            ApertureShape::Circle { radius } => check_positive("radius", radius),
            ApertureShape::Triangle { vertices: [a, b, c] } => {
                if [a, b, c].iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                    return Err(ApertureError::InvalidParameter(
                        "triangle vertices must be finite".to_string(),
                    ));
                }
                if !are_points_distinct(&[a, b, c]) || are_points_collinear(a, b, c) {
                    return Err(ApertureError::InvalidParameter(format!(
                        "degenerate triangle {a}, {b}, {c}"
                    )));
                }
                Ok(())
            }
        }
    }

    pub fn area(&self) -> f64 {
        match *self {
            ApertureShape::Square { width, height } => width * height,
            ApertureShape::Circle { radius } => PI * radius.powi(2),
            ApertureShape::Triangle { vertices: [a, b, c] } => triangle_area(a, b, c),
        }
    }

    pub fn perimeter(&self) -> f64 {
        match *self {
            ApertureShape::Square { width, height } => 2.0 * (width + height),
            ApertureShape::Circle { radius } => 2.0 * PI * radius,
            ApertureShape::Triangle { vertices: [a, b, c] } => {
                a.distance(&b) + b.distance(&c) + c.distance(&a)
            }
        }
    }

    /// Bounding box `(min, max)` of the opening.
    pub fn extents(&self) -> (Point, Point) {
        match *self {
            ApertureShape::Square { width, height } => {
                (Point::new(0., 0.), Point::new(width, height))
            }
            ApertureShape::Circle { radius } => {
                (Point::new(0., 0.), Point::new(2. * radius, 2. * radius))
            }
            ApertureShape::Triangle { vertices } => {
                // Vertices always hold three points
                bounding_box(&vertices).unwrap_or((vertices[0], vertices[0]))
            }
        }
    }

    /// Polygon vertices, counter-clockwise for the square. `None` for the circle.
    pub fn outline(&self) -> Option<Vec<Point>> {
        match *self {
            ApertureShape::Square { width, height } => Some(vec![
                Point::new(0., 0.),
                Point::new(width, 0.),
                Point::new(width, height),
                Point::new(0., height),
            ]),
            ApertureShape::Circle { .. } => None,
            ApertureShape::Triangle { vertices } => Some(vertices.to_vec()),
        }
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ApertureError::InvalidParameter(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// Depth and orientation of the block an opening is cut through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Block depth [mm].
    pub depth: f64,
    /// Surface tilt in degrees (90 = vertical).
    pub tilt: f64,
    /// Surface azimuth in degrees (0 = south, west positive).
    pub azimuth: f64,
}

impl Placement {
    pub fn new(depth: f64, tilt: f64, azimuth: f64) -> Self {
        Self {
            depth,
            tilt,
            azimuth,
        }
    }

    /// South-facing vertical block of the given depth.
    pub fn vertical(depth: f64) -> Self {
        Self::new(depth, 90.0, 0.0)
    }

    fn validate(&self) -> Result<()> {
        if !self.depth.is_finite() || self.depth < 0.0 {
            return Err(ApertureError::InvalidParameter(format!(
                "depth must be non-negative, got {}",
                self.depth
            )));
        }
        if !self.tilt.is_finite() || !self.azimuth.is_finite() {
            return Err(ApertureError::InvalidParameter(
                "tilt and azimuth must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::vertical(0.0)
    }
}

/// Raw shape parameters of one opening, as found in a configuration row.
///
/// Only the fields relevant to the kind passed to [`ApertureSpec::build`] are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApertureParams {
    /// Rectangle width [mm].
    pub width: f64,
    /// Rectangle height [mm].
    pub height: f64,
    /// Circle radius [mm].
    pub radius: f64,
    /// Triangle vertices A, B, C as `[x, y]` [mm].
    pub vertices: Vec<[f64; 2]>,
    /// Block depth [mm].
    pub depth: f64,
    /// Tilt [deg].
    pub tilt: f64,
    /// Azimuth [deg].
    pub azimuth: f64,
}

impl Default for ApertureParams {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            radius: 0.0,
            vertices: Vec::new(),
            depth: 0.0,
            tilt: 90.0,
            azimuth: 0.0,
        }
    }
}

/// One opening with its placement and derived area and perimeter.
///
/// Immutable: any change of geometry or orientation goes through a constructor
/// so derived values always match the raw parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ApertureSpec {
    shape: ApertureShape,
    placement: Placement,
    area: f64,
    perimeter: f64,
}

impl ApertureSpec {
    pub fn new(shape: ApertureShape, placement: Placement) -> Result<Self> {
        shape.validate()?;
        placement.validate()?;
        Ok(Self {
            shape,
            placement,
            area: shape.area(),
            perimeter: shape.perimeter(),
        })
    }

    pub fn square(width: f64, height: f64, placement: Placement) -> Result<Self> {
        Self::new(ApertureShape::Square { width, height }, placement)
    }

    pub fn circle(radius: f64, placement: Placement) -> Result<Self> {
        Self::new(ApertureShape::Circle { radius }, placement)
    }

    pub fn triangle(vertices: [Point; 3], placement: Placement) -> Result<Self> {
        Self::new(ApertureShape::Triangle { vertices }, placement)
    }

    /// Builds an opening from a kind name (`square`, `circle`, `triangle`) and raw parameters.
    pub fn build(kind: &str, params: &ApertureParams) -> Result<Self> {
        let placement = Placement::new(params.depth, params.tilt, params.azimuth);
        let shape = match kind.parse::<ShapeKind>()? {
            ShapeKind::Square => ApertureShape::Square {
                width: params.width,
                height: params.height,
            },
            ShapeKind::Circle => ApertureShape::Circle {
                radius: params.radius,
            },
            ShapeKind::Triangle => {
                let [a, b, c] = params.vertices.as_slice() else {
                    return Err(ApertureError::InvalidParameter(format!(
                        "triangle needs 3 vertices, got {}",
                        params.vertices.len()
                    )));
                };
                ApertureShape::Triangle {
                    vertices: [
                        Point::new(a[0], a[1]),
                        Point::new(b[0], b[1]),
                        Point::new(c[0], c[1]),
                    ],
                }
            }
        };
        Self::new(shape, placement)
    }

    /// Returns a copy of this opening turned to another tilt and azimuth.
    pub fn with_orientation(&self, tilt: f64, azimuth: f64) -> Result<Self> {
        let placement = Placement::new(self.placement.depth, tilt, azimuth);
        Self::new(self.shape, placement)
    }

    pub fn shape(&self) -> &ApertureShape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn depth(&self) -> f64 {
        self.placement.depth
    }

    pub fn tilt(&self) -> f64 {
        self.placement.tilt
    }

    pub fn azimuth(&self) -> f64 {
        self.placement.azimuth
    }

    /// Opening area [mm^2].
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Opening perimeter [mm].
    pub fn perimeter(&self) -> f64 {
        self.perimeter
    }

    pub fn extents(&self) -> (Point, Point) {
        self.shape.extents()
    }
}

impl fmt::Display for ApertureSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2);
        write!(
            f,
            "ApertureSpec({}, area={:.prec$}, depth={:.prec$}, tilt={:.prec$}, azimuth={:.prec$})",
            self.kind(),
            self.area,
            self.placement.depth,
            self.placement.tilt,
            self.placement.azimuth,
            prec = prec
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_derived_values() -> Result<()> {
        let spec = ApertureSpec::square(130.0, 100.0, Placement::vertical(100.0))?;
        assert_eq!(spec.kind(), ShapeKind::Square);
        assert!((spec.area() - 13000.0).abs() < 1e-9);
        assert!((spec.perimeter() - 460.0).abs() < 1e-9);
        let (pmin, pmax) = spec.extents();
        assert!(pmin.is_close(&Point::new(0., 0.)));
        assert!(pmax.is_close(&Point::new(130., 100.)));
        Ok(())
    }

    #[test]
    fn test_circle_derived_values() -> Result<()> {
        let spec = ApertureSpec::circle(50.0, Placement::vertical(100.0))?;
        assert!((spec.area() - PI * 2500.0).abs() < 1e-9);
        assert!((spec.perimeter() - PI * 100.0).abs() < 1e-9);
        let (_, pmax) = spec.extents();
        assert!(pmax.is_close(&Point::new(100., 100.)));
        Ok(())
    }

    #[test]
    fn test_triangle_derived_values() -> Result<()> {
        let vertices = [Point::new(0., 0.), Point::new(0., 130.), Point::new(130., 0.)];
        let spec = ApertureSpec::triangle(vertices, Placement::vertical(100.0))?;
        assert!((spec.area() - 8450.0).abs() < 1e-9);
        let expected = 260.0 + 130.0 * 2f64.sqrt();
        assert!((spec.perimeter() - expected).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_build_from_params() -> Result<()> {
        let params = ApertureParams {
            vertices: vec![[0., 0.], [0., 130.], [130., 130.]],
            depth: 150.0,
            ..Default::default()
        };
        let spec = ApertureSpec::build("Triangle", &params)?;
        assert_eq!(spec.kind(), ShapeKind::Triangle);
        assert_eq!(spec.depth(), 150.0);
        assert_eq!(spec.tilt(), 90.0);
        Ok(())
    }

    #[test]
    fn test_build_rejects_unknown_kind() {
        let err = ApertureSpec::build("hexagon", &ApertureParams::default()).unwrap_err();
        assert_eq!(err, ApertureError::InvalidShapeKind("hexagon".to_string()));
    }

    #[test]
    fn test_build_rejects_bad_dimensions() {
        let params = ApertureParams {
            width: 130.0,
            height: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            ApertureSpec::build("square", &params),
            Err(ApertureError::InvalidParameter(_))
        ));
        let params = ApertureParams {
            radius: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            ApertureSpec::build("circle", &params),
            Err(ApertureError::InvalidParameter(_))
        ));
        let params = ApertureParams {
            vertices: vec![[0., 0.], [0., 130.]],
            ..Default::default()
        };
        assert!(matches!(
            ApertureSpec::build("triangle", &params),
            Err(ApertureError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_degenerate_triangles() {
        let collinear = [Point::new(0., 0.), Point::new(10., 10.), Point::new(20., 20.)];
        assert!(ApertureSpec::triangle(collinear, Placement::default()).is_err());
        let duplicate = [Point::new(0., 0.), Point::new(0., 0.), Point::new(20., 0.)];
        assert!(ApertureSpec::triangle(duplicate, Placement::default()).is_err());
    }

    #[test]
    fn test_with_orientation_keeps_original() -> Result<()> {
        let spec = ApertureSpec::square(130.0, 130.0, Placement::vertical(100.0))?;
        let turned = spec.with_orientation(90.0, -90.0)?;
        assert_eq!(spec.azimuth(), 0.0);
        assert_eq!(turned.azimuth(), -90.0);
        assert_eq!(turned.area(), spec.area());
        assert_eq!(turned.depth(), 100.0);
        Ok(())
    }

    #[test]
    fn test_kind_round_trip_names() {
        for kind in [ShapeKind::Square, ShapeKind::Circle, ShapeKind::Triangle] {
            assert_eq!(kind.as_str().parse::<ShapeKind>(), Ok(kind));
        }
    }
}
