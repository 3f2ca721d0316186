use std::f64::consts::{FRAC_PI_2, PI};

use tracing::trace;

use crate::errors::{ensure_finite, ensure_positive, CoilError, Result};
use crate::math::{R3, Scalar};

use super::path::{Path, PathBuilder};
use super::primitives::{arc, line, ArcDirection};

/// Closed racetrack outline: a `width × length` rectangle around `center` with rounded corners.
///
/// Four clockwise quarter arcs of `inner_radius` sit on the rectangle corners (starting at
/// the `+x, +y` corner and proceeding clockwise seen from +z). Each straight side runs from
/// one arc's last point to the *second* point of the next arc, and the next arc is then
/// appended whole. Side lengths, and therefore the total wire length, depend on this join.
pub fn race_track(
    center: &R3,
    width: Scalar,
    length: Scalar,
    max_seg_len: Scalar,
    inner_radius: Scalar,
) -> Result<Path> {
    ensure_positive("racetrack width", width)?;
    ensure_positive("racetrack length", length)?;
    let (hw, hl) = (width / 2.0, length / 2.0);
    let corners = [
        R3::new(center.x + hw, center.y + hl, center.z),
        R3::new(center.x + hw, center.y - hl, center.z),
        R3::new(center.x - hw, center.y - hl, center.z),
        R3::new(center.x - hw, center.y + hl, center.z),
    ];
    let start_angles = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];

    let arcs = corners
        .iter()
        .zip(start_angles)
        .map(|(corner, start)| {
            arc(corner, inner_radius, start, FRAC_PI_2, max_seg_len, None, ArcDirection::Clockwise)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut builder = PathBuilder::new();
    for (i, current) in arcs.iter().enumerate() {
        let next = &arcs[(i + 1) % arcs.len()];
        let side = line(current.last(), &next.points()[1], max_seg_len, None)?;
        builder.append(current).append(&side);
    }
    builder.build()
}

/// Flat winding of nested racetracks grown outward from the innermost one.
///
/// `floor(thickness / max_seg_len)` turns are wound; turn `k` widens width, length and
/// corner radius by `k · max_seg_len`. Turns are concatenated from the inside out.
pub fn racetrack_2d(
    center: &R3,
    inner_width: Scalar,
    inner_length: Scalar,
    max_seg_len: Scalar,
    inner_radius: Scalar,
    thickness: Scalar,
) -> Result<Path> {
    ensure_positive("maximum segment length", max_seg_len)?;
    ensure_finite("winding thickness", thickness)?;
    let turns = (thickness / max_seg_len).floor();
    if turns < 1.0 {
        return Err(CoilError::invalid(format!(
            "winding thickness {thickness} is thinner than one segment of {max_seg_len}"
        )));
    }
    let turns = turns as usize;
    trace!(turns, "winding flat racetrack");

    let tracks = (0..turns)
        .map(|k| {
            let grow = max_seg_len * k as Scalar;
            race_track(
                center,
                inner_width + grow,
                inner_length + grow,
                max_seg_len,
                inner_radius + grow,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    let mut builder = PathBuilder::new();
    builder.extend(&tracks);
    builder.build()
}

/// Racetrack winding extruded along z in layers of [`racetrack_2d`].
///
/// A zero `height` yields exactly the single flat layer. Otherwise `floor(height / max_seg_len)`
/// layers are stacked at `center.z + k · max_seg_len` and concatenated bottom to top.
pub fn racetrack_3d(
    center: &R3,
    inner_width: Scalar,
    inner_length: Scalar,
    max_seg_len: Scalar,
    inner_radius: Scalar,
    thickness: Scalar,
    height: Scalar,
) -> Result<Path> {
    if height == 0.0 {
        return racetrack_2d(center, inner_width, inner_length, max_seg_len, inner_radius, thickness);
    }
    ensure_positive("winding height", height)?;
    ensure_positive("maximum segment length", max_seg_len)?;
    let layers = (height / max_seg_len).floor();
    if layers < 1.0 {
        return Err(CoilError::invalid(format!(
            "winding height {height} is lower than one segment of {max_seg_len}"
        )));
    }
    let layers = layers as usize;
    trace!(layers, "stacking racetrack layers");

    let stack = (0..layers)
        .map(|k| {
            let layer_center = R3::new(center.x, center.y, center.z + max_seg_len * k as Scalar);
            racetrack_2d(&layer_center, inner_width, inner_length, max_seg_len, inner_radius, thickness)
        })
        .collect::<Result<Vec<_>>>()?;

    let mut builder = PathBuilder::new();
    builder.extend(&stack);
    builder.build()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn racetrack_closes_on_second_point_of_first_arc() {
        let center = R3::zeros();
        let path = race_track(&center, 1.0, 2.0, 0.05, 0.25).unwrap();
        let first_arc = arc(
            &R3::new(0.5, 1.0, 0.0),
            0.25,
            0.0,
            FRAC_PI_2,
            0.05,
            None,
            ArcDirection::Clockwise,
        )
        .unwrap();
        assert_eq!(path.first(), first_arc.first());
        assert_eq!(path.last(), &first_arc.points()[1]);
        let (lo, hi) = path.bounds();
        assert_relative_eq!(hi.x, 0.75, epsilon = 1.0e-12);
        assert_relative_eq!(lo.y, -1.25, epsilon = 1.0e-12);
    }

    #[test]
    fn racetrack_length_is_close_to_stadium_perimeter() {
        let path = race_track(&R3::zeros(), 1.0, 2.0, 0.01, 0.25).unwrap();
        let perimeter = 2.0 * (1.0 + 2.0) + 2.0 * PI * 0.25;
        assert_relative_eq!(path.length(), perimeter, max_relative = 2.0e-2);
    }

    #[test]
    fn racetrack_sides_must_fit_a_segment() {
        assert!(race_track(&R3::zeros(), 1.0, 2.0, 5.0, 0.25).is_err());
        assert!(race_track(&R3::zeros(), 0.0, 2.0, 0.05, 0.25).is_err());
        assert!(race_track(&R3::zeros(), 1.0, 2.0, 0.05, 0.0).is_err());
    }

    #[test]
    fn flat_winding_nests_turns() {
        let center = R3::new(0.0, 0.0, 0.1);
        let single = race_track(&center, 1.0, 2.0, 0.05, 0.25).unwrap();
        let wound = racetrack_2d(&center, 1.0, 2.0, 0.05, 0.25, 0.16).unwrap();
        let grow = |k: f64| 0.05 * k;
        let second = race_track(&center, 1.0 + grow(1.0), 2.0 + grow(1.0), 0.05, 0.25 + grow(1.0)).unwrap();
        let third = race_track(&center, 1.0 + grow(2.0), 2.0 + grow(2.0), 0.05, 0.25 + grow(2.0)).unwrap();
        assert_eq!(wound.len(), single.len() + second.len() + third.len());
        assert_eq!(&wound.points()[..single.len()], single.points());
        assert_eq!(wound.last(), third.last());
        assert!(wound.points().iter().all(|p| p.z == 0.1));
    }

    #[test]
    fn flat_winding_needs_one_turn() {
        assert!(racetrack_2d(&R3::zeros(), 1.0, 2.0, 0.05, 0.25, 0.01).is_err());
    }

    #[test]
    fn zero_height_stack_is_the_flat_winding() {
        let center = R3::new(0.2, -0.1, 0.0);
        let flat = racetrack_2d(&center, 1.0, 1.5, 0.05, 0.2, 0.1).unwrap();
        let stacked = racetrack_3d(&center, 1.0, 1.5, 0.05, 0.2, 0.1, 0.0).unwrap();
        assert_eq!(flat, stacked);
    }

    #[test]
    fn layers_are_offset_along_z() {
        let flat = racetrack_2d(&R3::zeros(), 1.0, 1.5, 0.05, 0.2, 0.1).unwrap();
        let stacked = racetrack_3d(&R3::zeros(), 1.0, 1.5, 0.05, 0.2, 0.1, 0.16).unwrap();
        assert_eq!(stacked.len(), 3 * flat.len());
        assert_relative_eq!(stacked.last().z, 0.1, epsilon = 1.0e-12);
        let rise = R3::new(0.0, 0.0, 0.05);
        let join = (flat.first() + rise - flat.last()).norm();
        assert_relative_eq!(stacked.length(), 3.0 * flat.length() + 2.0 * join, max_relative = 1.0e-9);
        assert!(racetrack_3d(&R3::zeros(), 1.0, 1.5, 0.05, 0.2, 0.1, -1.0).is_err());
    }

    #[test]
    fn single_track_point_count_and_length() {
        let path = race_track(&R3::zeros(), 1.0, 2.0, 0.05, 0.25).unwrap();
        assert_eq!(path.len(), 164);
        assert_eq!(path.seams().len(), 4);
        assert_relative_eq!(path.length(), 7.958_026_643_291_6, max_relative = 1.0e-12);
    }

    #[test]
    fn stacked_winding_is_plain_concatenation_of_tracks() {
        let (max, thickness, height) = (0.05, 0.1, 0.1);
        let stacked = racetrack_3d(&R3::zeros(), 1.0, 2.0, max, 0.25, thickness, height).unwrap();

        let mut points = Vec::new();
        for layer in 0..2 {
            let center = R3::new(0.0, 0.0, max * f64::from(layer));
            for turn in 0..2 {
                let grow = max * f64::from(turn);
                let track = race_track(&center, 1.0 + grow, 2.0 + grow, max, 0.25 + grow).unwrap();
                points.extend_from_slice(track.points());
            }
        }
        let length: f64 = points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();

        assert_eq!(stacked.points(), points.as_slice());
        assert_relative_eq!(stacked.length(), length, max_relative = 1.0e-12);
        assert_eq!(stacked.seams().len(), 4 * 4);
    }
}
