use crate::geom::EPS;
use crate::geom::point::Point;

/// Barycentric coordinates `(s, t)` of `ptest` in the frame spanned by edges AB and AC:
/// `ptest = A + s·(B - A) + t·(C - A)`.
///
/// Solved with Cramer's rule. Returns `None` if A, B, C are collinear.
pub fn barycentric(ptest: Point, a: Point, b: Point, c: Point) -> Option<(f64, f64)> {
    let ab = b - a;
    let ac = c - a;
    let det = ab.cross(ac);
    if det.abs() < EPS {
        return None;
    }
    let ap = ptest - a;
    let s = ap.cross(ac) / det;
    let t = ab.cross(ap) / det;
    Some((s, t))
}

/// Tests if point `ptest` lies inside the triangle `(a, b, c)`.
///
/// Points on edges and vertices count as inside.
pub fn is_point_inside_triangle(ptest: Point, a: Point, b: Point, c: Point) -> bool {
    match barycentric(ptest, a, b, c) {
        Some((s, t)) => s >= -EPS && t >= -EPS && s + t <= 1.0 + EPS,
        None => false,
    }
}

/// Tests if `ptest` lies inside the convex polygon `pts` (either winding).
///
/// Half-plane test: the cross product of every edge with the vector to `ptest`
/// must have the same sign. Boundary points count as inside.
pub fn is_point_inside_convex_polygon(ptest: Point, pts: &[Point]) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    let mut any_pos = false;
    let mut any_neg = false;
    for i in 0..n {
        let p1 = pts[i];
        let p2 = pts[(i + 1) % n];
        let c = (p2 - p1).cross(ptest - p1);
        if c > 0.0 {
            any_pos = true;
        } else if c < 0.0 {
            any_neg = true;
        }
        if any_pos && any_neg {
            return false;
        }
    }
    true
}

/// Area of the triangle `(a, b, c)` from the shoelace formula.
pub fn triangle_area(a: Point, b: Point, c: Point) -> f64 {
    0.5 * (b - a).cross(c - a).abs()
}
