use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::config::{EvaluationConfig, Execution};
use crate::errors::Result;
use crate::math::R3;
use crate::points::PointSet;

use super::biot_savart::{FieldSource, Quadrature};
use super::magnetic::{FieldSample, FieldTable};

/// Points handled between two progress reports.
const PROGRESS_CHUNK: usize = 4096;

pub(crate) type ProgressFn<'a> = &'a (dyn Fn(usize, usize) + Sync);

/// Field of `source` at every point of `points`, in input order.
///
/// Each point is integrated independently; the table is laid out in the orientation the
/// points were supplied in.
pub fn field_at_points<S: FieldSource + ?Sized>(
    source: &S,
    points: &PointSet,
    config: &EvaluationConfig,
) -> Result<FieldTable> {
    evaluate(source, points, config, None)
}

/// Like [`field_at_points`], calling `on_progress(done, total)` as chunks of points finish.
///
/// With parallel execution the callback may run on worker threads and chunks may complete
/// out of order; `done` is always the running total.
pub fn field_at_points_with_progress<S, F>(
    source: &S,
    points: &PointSet,
    config: &EvaluationConfig,
    on_progress: F,
) -> Result<FieldTable>
where
    S: FieldSource + ?Sized,
    F: Fn(usize, usize) + Sync,
{
    evaluate(source, points, config, Some(&on_progress))
}

fn evaluate<S: FieldSource + ?Sized>(
    source: &S,
    points: &PointSet,
    config: &EvaluationConfig,
    progress: Option<ProgressFn<'_>>,
) -> Result<FieldTable> {
    config.validate()?;
    let quadrature = Quadrature::new(source.path(), config.method);
    let fields = field_values(&quadrature, points.points(), config, progress);
    let samples = points
        .points()
        .iter()
        .zip(fields)
        .map(|(position, field)| FieldSample::new(*position, field))
        .collect();
    Ok(FieldTable::new(samples, points.orientation()))
}

/// Field vectors for `points` under a prepared quadrature.
pub(crate) fn field_values(
    quadrature: &Quadrature,
    points: &[R3],
    config: &EvaluationConfig,
    progress: Option<ProgressFn<'_>>,
) -> Vec<R3> {
    let total = points.len();
    let done = AtomicUsize::new(0);
    let current = config.current;
    let run_chunk = |chunk: &[R3]| -> Vec<R3> {
        let fields = chunk.iter().map(|p| quadrature.field(p, current)).collect();
        if let Some(report) = progress {
            let finished = done.fetch_add(chunk.len(), Ordering::Relaxed) + chunk.len();
            report(finished, total);
        }
        fields
    };

    debug!(points = total, method = %config.method, execution = ?config.execution, "evaluating field batch");
    let chunks: Vec<Vec<R3>> = match config.execution {
        Execution::Serial => points.chunks(PROGRESS_CHUNK).map(run_chunk).collect(),
        Execution::Parallel => points.par_chunks(PROGRESS_CHUNK).map(run_chunk).collect(),
    };
    chunks.into_iter().flatten().collect()
}
