use tracing::{debug, info_span};

use crate::config::{Axis, CloudConfig, EvaluationConfig, PlaneSlice};
use crate::errors::{ensure_finite, CoilError, Result};
use crate::geometry::Path;
use crate::math::{linspace, R3, Scalar};
use crate::points::Orientation;

use super::batch::{field_values, ProgressFn};
use super::biot_savart::{FieldSource, Quadrature};
use super::magnetic::{FieldSample, FieldTable};

/// Regular lattice of field points around a path.
///
/// Positions are flattened with y varying slowest, then x, then z fastest; the index of
/// sample `(ix, iy, iz)` is `(iy · n + ix) · n + iz`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingGrid {
    axes: [Vec<Scalar>; 3],
    positions: Vec<R3>,
}

impl SamplingGrid {
    /// Grid of `samples_per_axis` points per axis spanning the bounding box of `path`
    /// grown by `padding` on every side.
    pub fn around(path: &Path, padding: Scalar, samples_per_axis: usize) -> Result<Self> {
        ensure_finite("padding", padding)?;
        if padding < 0.0 {
            return Err(CoilError::invalid(format!("padding must not be negative, got {padding}")));
        }
        if samples_per_axis < 2 {
            return Err(CoilError::invalid(format!(
                "a sampling grid needs at least 2 samples per axis, got {samples_per_axis}"
            )));
        }
        let total = samples_per_axis.checked_pow(3).ok_or_else(|| {
            CoilError::invalid(format!(
                "a grid of {samples_per_axis} samples per axis has too many points"
            ))
        })?;
        let (lo, hi) = path.bounds();
        let axes = [0usize, 1, 2].map(|a| linspace(lo[a] - padding, hi[a] + padding, samples_per_axis));
        let [xs, ys, zs] = &axes;
        let mut positions = Vec::with_capacity(total);
        for &y in ys {
            for &x in xs {
                for &z in zs {
                    positions.push(R3::new(x, y, z));
                }
            }
        }
        Ok(Self { axes, positions })
    }

    /// Sample coordinates along `axis`, ascending.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &[Scalar] {
        &self.axes[axis.index()]
    }

    /// Spacing between neighbouring samples along `axis`.
    #[must_use]
    pub fn step(&self, axis: Axis) -> Scalar {
        let values = self.axis(axis);
        values[1] - values[0]
    }

    /// Flattened grid positions.
    #[must_use]
    pub fn positions(&self) -> &[R3] {
        &self.positions
    }

    /// Total number of grid points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false for a constructed grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Indices of the grid points within half a band thickness of the requested plane.
    pub fn slice(&self, slice: &PlaneSlice) -> Result<SliceView> {
        let values = self.axis(slice.axis);
        let value = match slice.value {
            Some(v) => {
                ensure_finite("slice plane value", v)?;
                v
            }
            None => 0.5 * (values[0] + values[values.len() - 1]),
        };
        let thickness = match slice.thickness {
            Some(t) if t > 0.0 => {
                ensure_finite("slice thickness", t)?;
                t
            }
            _ => self.step(slice.axis).abs(),
        };
        let a = slice.axis.index();
        let indices = self
            .positions
            .iter()
            .enumerate()
            .filter(|(_, p)| (p[a] - value).abs() <= thickness / 2.0)
            .map(|(i, _)| i)
            .collect();
        Ok(SliceView {
            axis: slice.axis,
            value,
            thickness,
            indices,
        })
    }
}

/// Subset of a sampling grid lying in a planar band; indexes into the grid.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SliceView {
    /// Axis normal to the plane.
    pub axis: Axis,
    /// Resolved plane coordinate.
    pub value: Scalar,
    /// Resolved band thickness.
    pub thickness: Scalar,
    /// Grid indices inside the band, ascending.
    pub indices: Vec<usize>,
}

/// Field over a sampling grid, with magnitudes and an optional planar slice.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CloudField {
    /// Lattice the field was sampled on.
    pub grid: SamplingGrid,
    /// One sample per grid position, same order.
    pub samples: Vec<FieldSample>,
    /// `|B|` per sample.
    pub magnitudes: Vec<Scalar>,
    /// Planar band, when requested.
    pub slice: Option<SliceView>,
}

impl CloudField {
    /// Samples inside the slice band; empty when no slice was requested.
    pub fn slice_samples(&self) -> impl Iterator<Item = &FieldSample> + '_ {
        self.slice
            .iter()
            .flat_map(|view| view.indices.iter().map(|&i| &self.samples[i]))
    }

    /// Position, field and magnitude of every grid point as a row-major table.
    #[must_use]
    pub fn table(&self) -> FieldTable {
        FieldTable::new(self.samples.clone(), Orientation::RowMajor).with_magnitude(true)
    }
}

/// Field of `source` over a sampling grid around its path.
pub fn cloud<S: FieldSource + ?Sized>(
    source: &S,
    cloud: &CloudConfig,
    config: &EvaluationConfig,
) -> Result<CloudField> {
    evaluate_cloud(source, cloud, config, None)
}

/// Like [`cloud`], calling `on_progress(done, total)` as chunks of grid points finish.
pub fn cloud_with_progress<S, F>(
    source: &S,
    cloud: &CloudConfig,
    config: &EvaluationConfig,
    on_progress: F,
) -> Result<CloudField>
where
    S: FieldSource + ?Sized,
    F: Fn(usize, usize) + Sync,
{
    evaluate_cloud(source, cloud, config, Some(&on_progress))
}

fn evaluate_cloud<S: FieldSource + ?Sized>(
    source: &S,
    cloud: &CloudConfig,
    config: &EvaluationConfig,
    progress: Option<ProgressFn<'_>>,
) -> Result<CloudField> {
    config.validate()?;
    let total = cloud.point_count();
    if let Some(max) = cloud.max_points {
        if total > max {
            return Err(CoilError::invalid(format!(
                "sampling grid of {total} points exceeds the limit of {max}"
            )));
        }
    }

    let span = info_span!("cloud", points = total, method = %config.method);
    let _entered = span.enter();

    let grid = SamplingGrid::around(source.path(), cloud.padding, cloud.samples_per_axis)?;
    let slice = cloud.slice.as_ref().map(|s| grid.slice(s)).transpose()?;
    let quadrature = Quadrature::new(source.path(), config.method);
    let fields = field_values(&quadrature, grid.positions(), config, progress);

    let samples: Vec<FieldSample> = grid
        .positions()
        .iter()
        .zip(fields)
        .map(|(position, field)| FieldSample::new(*position, field))
        .collect();
    let magnitudes = samples.iter().map(FieldSample::magnitude).collect();
    debug!(
        slice_points = slice.as_ref().map_or(0, |s: &SliceView| s.indices.len()),
        "cloud evaluated"
    );

    Ok(CloudField {
        grid,
        samples,
        magnitudes,
        slice,
    })
}
