//! Groups of coils carrying the same current: superposed fields and series quantities.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::coil::Coil;
use crate::config::{EvaluationConfig, Execution};
use crate::errors::{CoilError, Result};
use crate::fields::{FieldSample, FieldTable, Quadrature};
use crate::math::{R3, Scalar};
use crate::points::PointSet;

/// Total wire length (m) of `coils` connected in series.
#[must_use]
pub fn series_length(coils: &[Coil]) -> Scalar {
    coils.iter().map(Coil::length).sum()
}

/// Resistance (Ω) of `coils` connected in series.
///
/// The total length is combined with the resistivity and cross-sectional area of the
/// *first* coil; the group is assumed to be wound from one homogeneous wire. A warning is
/// logged when later coils use a different material.
pub fn series_resistance(coils: &[Coil]) -> Result<Scalar> {
    let first = coils
        .first()
        .ok_or_else(|| CoilError::invalid("series resistance of an empty coil list"))?;
    let material = first.material();
    let mismatched = coils.iter().filter(|c| c.material() != material).count();
    if mismatched > 0 {
        warn!(
            mismatched,
            resistivity = material.resistivity(),
            area = material.cross_sectional_area(),
            "coils differ in material; series resistance uses the first coil's wire"
        );
    }
    Ok(material.resistance_of(series_length(coils)))
}

/// Superposed field of `coils`, all carrying `config.current`, at every point of `points`.
///
/// Each coil is evaluated independently and the components are summed in list order. With
/// `with_magnitude` the nested table carries `|B|` as an extra column (or row).
pub fn combined_field(
    coils: &[Coil],
    points: &PointSet,
    config: &EvaluationConfig,
    with_magnitude: bool,
) -> Result<FieldTable> {
    if coils.is_empty() {
        return Err(CoilError::invalid("combined field of an empty coil list"));
    }
    let per_coil = |(index, coil): (usize, &Coil)| -> Result<Vec<R3>> {
        debug!(coil = index + 1, of = coils.len(), "evaluating coil");
        let table = coil.field_at_points(points, config)?;
        Ok(table.into_samples().into_iter().map(|s| s.field).collect())
    };
    let fields: Vec<Vec<R3>> = match config.execution {
        Execution::Serial => coils.iter().enumerate().map(per_coil).collect::<Result<_>>()?,
        Execution::Parallel => coils.par_iter().enumerate().map(per_coil).collect::<Result<_>>()?,
    };

    let mut total = vec![R3::zeros(); points.len()];
    for coil_fields in &fields {
        for (sum, field) in total.iter_mut().zip(coil_fields) {
            *sum += field;
        }
    }
    let samples = points
        .points()
        .iter()
        .zip(total)
        .map(|(position, field)| FieldSample::new(*position, field))
        .collect();
    Ok(FieldTable::new(samples, points.orientation()).with_magnitude(with_magnitude))
}

/// Superposed field of `coils` at a single point.
pub fn combined_field_at(coils: &[Coil], point: &R3, config: &EvaluationConfig) -> Result<R3> {
    if coils.is_empty() {
        return Err(CoilError::invalid("combined field of an empty coil list"));
    }
    config.validate()?;
    Ok(coils
        .iter()
        .map(|coil| Quadrature::new(coil.path(), config.method).field(point, config.current))
        .fold(R3::zeros(), |acc, b| acc + b))
}
