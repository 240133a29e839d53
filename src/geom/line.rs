use crate::geom::point::Point;

/// Tolerance below which two x-coordinates are treated as a vertical line.
const VERTICAL_TOL: f64 = 1e-4;

/// Straight line `p·x + q·y + r = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p: f64,
    pub q: f64,
    pub r: f64,
}

impl Line {
    /// Line through two points.
    ///
    /// When both points share the same x-coordinate the line is written as
    /// `x - x1 = 0` instead of dividing by `x2 - x1`.
    pub fn through_points(pt1: Point, pt2: Point) -> Self {
        if (pt1.x - pt2.x).abs() < VERTICAL_TOL {
            return Self {
                p: 1.0,
                q: 0.0,
                r: -pt1.x,
            };
        }
        let dx = pt2.x - pt1.x;
        Self {
            p: (pt2.y - pt1.y) / dx,
            q: -1.0,
            r: (pt2.x * pt1.y - pt1.x * pt2.y) / dx,
        }
    }

    /// Perpendicular distance from `pt` to the line.
    pub fn distance_to(&self, pt: Point) -> f64 {
        (self.p * pt.x + self.q * pt.y + self.r).abs() / self.p.hypot(self.q)
    }
}
