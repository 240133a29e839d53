use super::*;

/// Checks if three points are collinear (this includes coincident points).
pub fn are_points_collinear(p1: Point, p2: Point, p3: Point) -> bool {
    let v12 = p2 - p1;
    let v13 = p3 - p1;
    let scale = v12.length().max(v13.length()).max(1.0);
    v12.cross(v13).abs() < EPS * scale * scale
}

/// Checks if all points are pairwise distinct.
pub fn are_points_distinct(pts: &[Point]) -> bool {
    for (i, pi) in pts.iter().enumerate() {
        for pj in pts.iter().skip(i + 1) {
            if pi.is_close(pj) {
                return false;
            }
        }
    }
    true
}
