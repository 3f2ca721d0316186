//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::Vector3;

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;

/// Generates `n` linearly spaced samples in [start, stop]; the last sample is exactly `stop`.
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| if i + 1 == n { stop } else { start + step * i as Scalar })
                .collect()
        }
    }
}

/// Generates `n` evenly spaced points on the segment from `a` to `b`, endpoints included.
#[must_use]
pub fn linspace_points(a: &R3, b: &R3, n: usize) -> Vec<R3> {
    match n {
        0 => Vec::new(),
        1 => vec![*a],
        _ => {
            let step = (b - a) / (n as Scalar - 1.0);
            (0..n)
                .map(|i| if i + 1 == n { *b } else { a + step * i as Scalar })
                .collect()
        }
    }
}

/// Per-vertex derivative of a point sequence with uniform parameter `spacing`.
///
/// Interior vertices use central differences, the two ends use one-sided first differences.
/// Sequences shorter than two points have no tangent and yield zeros.
#[must_use]
pub fn central_gradient(points: &[R3], spacing: Scalar) -> Vec<R3> {
    let n = points.len();
    if n < 2 {
        return vec![R3::zeros(); n];
    }
    (0..n)
        .map(|i| {
            let diff = if i == 0 {
                points[1] - points[0]
            } else if i == n - 1 {
                points[n - 1] - points[n - 2]
            } else {
                (points[i + 1] - points[i - 1]) * 0.5
            };
            diff / spacing
        })
        .collect()
}
