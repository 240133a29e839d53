//! Vector utility functions like min(), max(), mean()

/// Returns the maximum of a non-empty slice (`NEG_INFINITY` if empty).
pub fn max(vec: &[f64]) -> f64 {
    vec.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
}

/// Returns the minimum of a non-empty slice (`INFINITY` if empty).
pub fn min(vec: &[f64]) -> f64 {
    vec.iter().cloned().fold(f64::INFINITY, f64::min)
}

/// Arithmetic mean, summed in slice order. Returns 0 for an empty slice.
pub fn mean(vec: &[f64]) -> f64 {
    if vec.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    for x in vec {
        sum += x;
    }
    sum / vec.len() as f64
}
