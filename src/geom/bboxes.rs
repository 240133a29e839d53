use crate::geom::point::Point;
use crate::vecutils::{max, min};

/// Returns the (min, max) corners of the box holding all points `pts`.
///
/// Returns `None` for an empty slice.
pub fn bounding_box(pts: &[Point]) -> Option<(Point, Point)> {
    if pts.is_empty() {
        return None;
    }
    let x: Vec<f64> = pts.iter().map(|p| p.x).collect();
    let y: Vec<f64> = pts.iter().map(|p| p.y).collect();
    let pmin = Point::new(min(&x), min(&y));
    let pmax = Point::new(max(&x), max(&y));

    Some((pmin, pmax))
}

/// Checks whether a point is inside (or on the boundary of) the box `pmin`-`pmax`.
pub fn is_point_inside_bbox(ptest: Point, pmin: Point, pmax: Point) -> bool {
    ptest.x >= pmin.x && ptest.x <= pmax.x && ptest.y >= pmin.y && ptest.y <= pmax.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box() {
        let pts = [
            Point::new(10., -5.),
            Point::new(-2., 3.),
            Point::new(4., 8.),
        ];
        let (pmin, pmax) = bounding_box(&pts).unwrap();
        assert!(pmin.is_close(&Point::new(-2., -5.)));
        assert!(pmax.is_close(&Point::new(10., 8.)));
        assert!(bounding_box(&[]).is_none());
    }

    #[test]
    fn test_is_point_inside_bbox() {
        let pmin = Point::new(0., 0.);
        let pmax = Point::new(1., 1.);
        assert!(is_point_inside_bbox(Point::new(0.5, 0.5), pmin, pmax));
        assert!(is_point_inside_bbox(Point::new(1.0, 0.0), pmin, pmax));
        assert!(!is_point_inside_bbox(Point::new(1.5, 0.5), pmin, pmax));
    }
}
