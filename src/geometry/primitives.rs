use std::f64::consts::PI;

use crate::errors::{ensure_finite, ensure_positive, CoilError, Result};
use crate::math::{linspace, linspace_points, R3, Scalar};

use super::path::Path;

/// Sense in which [`arc`] parametrizes its circle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcDirection {
    /// `(cx + r·sin θ, cy + r·cos θ)`: increasing θ runs clockwise seen from +z.
    #[default]
    Clockwise,
    /// `(cx - r·sin θ, cy - r·cos θ)`: the clockwise arc mirrored through the center.
    Anticlockwise,
}

/// Evenly spaced points on the straight segment from `start` to `end`.
///
/// The point count is `ceil(distance / max_seg_len) + 1` unless `n_points` overrides it.
/// Fails when the endpoints coincide, when `max_seg_len` is not positive or when the segment
/// is shorter than `max_seg_len`.
pub fn line(start: &R3, end: &R3, max_seg_len: Scalar, n_points: Option<usize>) -> Result<Path> {
    if start == end {
        return Err(CoilError::invalid("line endpoints must differ"));
    }
    ensure_positive("maximum segment length", max_seg_len)?;
    let distance = (end - start).norm();
    if distance < max_seg_len {
        return Err(CoilError::invalid(format!(
            "line of length {distance} is shorter than the maximum segment length {max_seg_len}"
        )));
    }
    let n = n_points.unwrap_or_else(|| (distance / max_seg_len).ceil() as usize + 1);
    Path::new(linspace_points(start, end, n))
}

/// Points on a circle of `radius` around `center`, sweeping `sweep` radians from `start_angle`.
///
/// The arc lies in the plane `z = center.z`. Without `n_points` the count is
/// `floor(radius·sweep / max_seg_len) + 1`, never less than two.
pub fn arc(
    center: &R3,
    radius: Scalar,
    start_angle: Scalar,
    sweep: Scalar,
    max_seg_len: Scalar,
    n_points: Option<usize>,
    direction: ArcDirection,
) -> Result<Path> {
    ensure_positive("arc radius", radius)?;
    ensure_positive("arc sweep angle", sweep)?;
    ensure_finite("arc start angle", start_angle)?;
    let n = match n_points {
        Some(n) => n,
        None => {
            ensure_positive("maximum segment length", max_seg_len)?;
            ((radius * sweep / max_seg_len).floor() as usize + 1).max(2)
        }
    };
    let sign = match direction {
        ArcDirection::Clockwise => 1.0,
        ArcDirection::Anticlockwise => -1.0,
    };
    let points = linspace(start_angle, start_angle + sweep, n)
        .into_iter()
        .map(|theta| {
            R3::new(
                center.x + sign * radius * theta.sin(),
                center.y + sign * radius * theta.cos(),
                center.z,
            )
        })
        .collect();
    Path::new(points)
}

/// Helical winding of `turns` full turns around the z axis through `origin`.
///
/// The angular samples come from a clockwise [`arc`] of `turns·2π`; z then advances
/// linearly per point from `origin.z` to `origin.z + axial_length`, so the helix is uniform
/// in angle per point.
pub fn helicoid(
    turns: u32,
    origin: &R3,
    axial_length: Scalar,
    radius: Scalar,
    max_seg_len: Scalar,
) -> Result<Path> {
    if turns == 0 {
        return Err(CoilError::invalid("a helicoid needs at least one turn"));
    }
    ensure_finite("axial length", axial_length)?;
    let total_angle = Scalar::from(turns) * 2.0 * PI;
    let mold = arc(origin, radius, 0.0, total_angle, max_seg_len, None, ArcDirection::Clockwise)?;
    let zs = linspace(origin.z, origin.z + axial_length, mold.len());
    let points = mold
        .into_points()
        .into_iter()
        .zip(zs)
        .map(|(p, z)| R3::new(p.x, p.y, z))
        .collect();
    Path::new(points)
}
