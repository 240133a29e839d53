use crate::geom::EPS;
use crate::geom::vector::Vector;
use std::fmt;
use std::ops::{Add, Sub};

pub mod check;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS && (self.y - other.y).abs() < EPS
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        (*other - *self).length()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(f, "Point({:.prec$}, {:.prec$})", self.x, self.y, prec = prec)
    }
}

// Implement +
impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
        }
    }
}

// Implement -
impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Self) -> Vector {
        Vector::from_points(other, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_close() {
        let pa = Point::new(5., 5.);
        let pb = Point::new(5.00000000000001, 5.);
        let pc = Point::new(5.0001, 5.);
        assert!(pa.is_close(&pb));
        assert!(!pa.is_close(&pc));
    }

    #[test]
    fn test_add_and_sub() {
        let p0 = Point::new(1., 1.);
        let p1 = p0 + Vector::new(3., 4.);
        assert!(p1.is_close(&Point::new(4., 5.)));
        let v = p1 - p0;
        assert!((v.dx - 3.).abs() < EPS && (v.dy - 4.).abs() < EPS);
        assert!((p0.distance(&p1) - 5.).abs() < EPS);
    }

    #[test]
    fn test_display() {
        let p = Point::new(1.0, 2.5);
        assert_eq!(format!("{}", p), "Point(1.00, 2.50)");
        assert_eq!(format!("{:.1}", p), "Point(1.0, 2.5)");
    }
}
