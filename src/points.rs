//! Point arrays exchanged with callers and their row/column orientation.
//!
//! Callers hand coordinates over either row-oriented (`[[x, y, z], ...]`) or
//! column-oriented (`[[x...], [y...], [z...]]`). The orientation is resolved once here and
//! carried alongside the points so results can be returned in the caller's layout.

use crate::errors::{CoilError, Result};
use crate::math::{R3, Scalar};

/// Layout of a nested coordinate array.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// One row per point: `[[x, y, z], ...]`.
    #[default]
    RowMajor,
    /// One row per axis: `[[x...], [y...], [z...]]`.
    ColumnMajor,
}

impl Orientation {
    /// Infers the layout of `rows` from its shape.
    ///
    /// A 3×3 array fits both layouts and an empty array fits neither; both are reported as
    /// [`CoilError::ShapeMismatch`] instead of being guessed.
    pub fn infer(rows: &[Vec<Scalar>]) -> Result<Self> {
        let all_triples = rows.iter().all(|row| row.len() == 3);
        let three_even_rows = rows.len() == 3 && rows.iter().all(|row| row.len() == rows[0].len());
        match (all_triples, three_even_rows) {
            _ if rows.is_empty() => Err(CoilError::shape(
                "cannot infer the orientation of an empty point array",
            )),
            (true, true) => Err(CoilError::shape(
                "a 3x3 point array is ambiguous; pass an explicit orientation",
            )),
            (true, false) => Ok(Self::RowMajor),
            (false, true) => Ok(Self::ColumnMajor),
            (false, false) => Err(CoilError::shape(format!(
                "point array with {} rows is neither Nx3 nor 3xN",
                rows.len()
            ))),
        }
    }
}

/// Parses a nested coordinate array into points, resolving the layout once.
///
/// When `orientation` is `None` the layout is inferred with [`Orientation::infer`].
pub fn parse_points(
    rows: &[Vec<Scalar>],
    orientation: Option<Orientation>,
) -> Result<(Vec<R3>, Orientation)> {
    let orientation = match orientation {
        Some(o) => o,
        None => Orientation::infer(rows)?,
    };

    let points: Vec<R3> = match orientation {
        Orientation::RowMajor => {
            if let Some(bad) = rows.iter().position(|row| row.len() != 3) {
                return Err(CoilError::shape(format!(
                    "row {bad} has {} coordinates, expected 3",
                    rows[bad].len()
                )));
            }
            rows.iter().map(|row| R3::new(row[0], row[1], row[2])).collect()
        }
        Orientation::ColumnMajor => {
            if rows.len() != 3 {
                return Err(CoilError::shape(format!(
                    "column-major array needs 3 axis rows, got {}",
                    rows.len()
                )));
            }
            let n = rows[0].len();
            if rows[1].len() != n || rows[2].len() != n {
                return Err(CoilError::shape(format!(
                    "axis rows differ in length: {}, {}, {}",
                    n,
                    rows[1].len(),
                    rows[2].len()
                )));
            }
            (0..n).map(|i| R3::new(rows[0][i], rows[1][i], rows[2][i])).collect()
        }
    };

    if let Some(bad) = points.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
        return Err(CoilError::invalid(format!("point {bad} has a non-finite coordinate")));
    }
    Ok((points, orientation))
}

/// Field points for batch evaluation, remembering the layout they arrived in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointSet {
    points: Vec<R3>,
    orientation: Orientation,
}

impl PointSet {
    /// Wraps already-structured points; results are laid out row-major.
    #[must_use]
    pub const fn from_points(points: Vec<R3>) -> Self {
        Self {
            points,
            orientation: Orientation::RowMajor,
        }
    }

    /// Parses a nested coordinate array, see [`parse_points`].
    pub fn from_nested(rows: &[Vec<Scalar>], orientation: Option<Orientation>) -> Result<Self> {
        let (points, orientation) = parse_points(rows, orientation)?;
        Ok(Self {
            points,
            orientation,
        })
    }

    /// Requests a different output layout for results computed from this set.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Points in input order.
    #[must_use]
    pub fn points(&self) -> &[R3] {
        &self.points
    }

    /// Layout the points were supplied in.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<R3>> for PointSet {
    fn from(points: Vec<R3>) -> Self {
        Self::from_points(points)
    }
}
