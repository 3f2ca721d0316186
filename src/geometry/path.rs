use crate::errors::{CoilError, Result};
use crate::math::{R3, Scalar};
use crate::points::{parse_points, Orientation};

/// Ordered sequence of 3D points describing a thin wire.
///
/// Point order is the direction of current flow. A path always holds at least two finite
/// points, and its first segment has non-zero length. Consecutive repeated points only occur
/// at the seams recorded by [`PathBuilder`].
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawPath")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<R3>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    seams: Vec<usize>,
}

impl Path {
    /// Validates and wraps caller-supplied points.
    ///
    /// Rejects paths with fewer than two points, non-finite coordinates or consecutive
    /// duplicate points (a zero-length segment has no tangent).
    pub fn new(points: Vec<R3>) -> Result<Self> {
        check_points(&points, &[])?;
        Ok(Self {
            points,
            seams: Vec::new(),
        })
    }

    /// Parses a nested coordinate array, see [`crate::points::parse_points`].
    pub fn from_nested(rows: &[Vec<Scalar>], orientation: Option<Orientation>) -> Result<Self> {
        let (points, _) = parse_points(rows, orientation)?;
        Self::new(points)
    }

    /// Points in current-flow order.
    #[must_use]
    pub fn points(&self) -> &[R3] {
        &self.points
    }

    /// Indices `i` at which `points[i]` may repeat `points[i - 1]`.
    #[must_use]
    pub fn seams(&self) -> &[usize] {
        &self.seams
    }

    /// Consumes the path, returning its points.
    #[must_use]
    pub fn into_points(self) -> Vec<R3> {
        self.points
    }

    /// Number of points (one more than the number of segments).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point.
    #[must_use]
    pub fn first(&self) -> &R3 {
        &self.points[0]
    }

    /// Last point.
    #[must_use]
    pub fn last(&self) -> &R3 {
        &self.points[self.points.len() - 1]
    }

    /// Wire length: the sum of the Euclidean norms of consecutive segments.
    #[must_use]
    pub fn length(&self) -> Scalar {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// The same wire traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        let n = points.len();
        let mut seams: Vec<usize> = self.seams.iter().map(|&s| n - s).collect();
        seams.sort_unstable();
        Self { points, seams }
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    #[must_use]
    pub fn bounds(&self) -> (R3, R3) {
        self.points.iter().skip(1).fold(
            (self.points[0], self.points[0]),
            |(lo, hi), p| (lo.inf(p), hi.sup(p)),
        )
    }
}

/// Seams lie in `2..=len - 2`, so neither end segment can collapse.
fn check_points(points: &[R3], seams: &[usize]) -> Result<()> {
    if points.len() < 2 {
        return Err(CoilError::invalid(format!(
            "a path needs at least 2 points, got {}",
            points.len()
        )));
    }
    if let Some(bad) = points.iter().position(|p| !p.iter().all(|c| c.is_finite())) {
        return Err(CoilError::invalid(format!("point {bad} has a non-finite coordinate")));
    }
    if let Some(bad) = seams.iter().find(|&&s| s < 2 || s + 2 > points.len()) {
        return Err(CoilError::invalid(format!(
            "seam {bad} lies outside the interior of a {}-point path",
            points.len()
        )));
    }
    for (i, w) in points.windows(2).enumerate() {
        if w[0] == w[1] && !seams.contains(&(i + 1)) {
            return Err(CoilError::invalid(format!(
                "points {i} and {} coincide, zero-length segment",
                i + 1
            )));
        }
    }
    Ok(())
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawPath {
    points: Vec<R3>,
    #[serde(default)]
    seams: Vec<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPath> for Path {
    type Error = CoilError;

    fn try_from(raw: RawPath) -> Result<Self> {
        check_points(&raw.points, &raw.seams)?;
        Ok(Self {
            points: raw.points,
            seams: raw.seams,
        })
    }
}

/// Concatenates paths end-to-end into one winding.
///
/// Pieces are appended whole and in order. A repeated point is tolerated where a piece
/// begins exactly on the previous piece's last point; windings that connect an arc end to
/// the next arc through a straight line rely on this. Seams already inside a piece are
/// carried over, so composed windings can be composed again.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    points: Vec<R3>,
    seams: Vec<usize>,
}

impl PathBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every point of `path` after the current tail.
    pub fn append(&mut self, path: &Path) -> &mut Self {
        let offset = self.points.len();
        if offset > 0 {
            self.seams.push(offset);
        }
        self.seams.extend(path.seams().iter().map(|&s| s + offset));
        self.points.extend_from_slice(path.points());
        self
    }

    /// Appends every path yielded by `paths`, in order.
    pub fn extend<'a>(&mut self, paths: impl IntoIterator<Item = &'a Path>) -> &mut Self {
        for path in paths {
            self.append(path);
        }
        self
    }

    /// Finishes the composite path.
    ///
    /// Only joins that actually repeat a point are kept as seams.
    pub fn build(self) -> Result<Path> {
        let Self { points, seams } = self;
        let seams: Vec<usize> = seams
            .into_iter()
            .filter(|&s| points[s - 1] == points[s])
            .collect();
        check_points(&points, &seams)?;
        Ok(Path { points, seams })
    }
}
