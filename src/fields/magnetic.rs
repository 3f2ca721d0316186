use crate::math::{R3, Scalar};
use crate::points::Orientation;

/// Magnetic flux density (T) at one position.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Field point in meters.
    pub position: R3,
    /// Flux density vector in tesla.
    pub field: R3,
}

impl FieldSample {
    /// Pairs a position with its field.
    #[must_use]
    pub const fn new(position: R3, field: R3) -> Self {
        Self { position, field }
    }

    /// Flux density magnitude (T).
    #[must_use]
    pub fn magnitude(&self) -> Scalar {
        self.field.norm()
    }

    /// Unit direction of the field, or zero where the field vanishes.
    #[must_use]
    pub fn direction(&self) -> R3 {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            R3::zeros()
        } else {
            self.field / magnitude
        }
    }
}

/// Batch of field samples in input order, laid out for the caller's orientation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldTable {
    samples: Vec<FieldSample>,
    orientation: Orientation,
    with_magnitude: bool,
}

impl FieldTable {
    /// Wraps samples; the nested layout follows `orientation`.
    #[must_use]
    pub const fn new(samples: Vec<FieldSample>, orientation: Orientation) -> Self {
        Self {
            samples,
            orientation,
            with_magnitude: false,
        }
    }

    /// Appends `|B|` to the nested layout when `enabled`.
    #[must_use]
    pub fn with_magnitude(mut self, enabled: bool) -> Self {
        self.with_magnitude = enabled;
        self
    }

    /// Samples in input order.
    #[must_use]
    pub fn samples(&self) -> &[FieldSample] {
        &self.samples
    }

    /// Consumes the table, returning its samples.
    #[must_use]
    pub fn into_samples(self) -> Vec<FieldSample> {
        self.samples
    }

    /// Layout used by [`Self::to_nested`].
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Whether [`Self::to_nested`] includes the magnitude.
    #[must_use]
    pub const fn includes_magnitude(&self) -> bool {
        self.with_magnitude
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the table holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Field magnitudes in input order.
    #[must_use]
    pub fn magnitudes(&self) -> Vec<Scalar> {
        self.samples.iter().map(FieldSample::magnitude).collect()
    }

    /// Plain numeric table for export or plotting.
    ///
    /// Row-major tables have one row `[x, y, z, bx, by, bz]` per sample; column-major tables
    /// have six rows `[x...], [y...], [z...], [bx...], [by...], [bz...]`. With the magnitude
    /// enabled, `|b|` is appended as a seventh column or row.
    #[must_use]
    pub fn to_nested(&self) -> Vec<Vec<Scalar>> {
        let width = if self.with_magnitude { 7 } else { 6 };
        let row = |s: &FieldSample| {
            let mut values = Vec::with_capacity(width);
            values.extend(s.position.iter());
            values.extend(s.field.iter());
            if self.with_magnitude {
                values.push(s.magnitude());
            }
            values
        };
        match self.orientation {
            Orientation::RowMajor => self.samples.iter().map(row).collect(),
            Orientation::ColumnMajor => {
                let mut columns = vec![Vec::with_capacity(self.samples.len()); width];
                for sample in &self.samples {
                    for (column, value) in columns.iter_mut().zip(row(sample)) {
                        column.push(value);
                    }
                }
                columns
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn table(orientation: Orientation) -> FieldTable {
        FieldTable::new(
            vec![
                FieldSample::new(R3::new(0.0, 1.0, 2.0), R3::new(1.0, 2.0, 2.0)),
                FieldSample::new(R3::new(3.0, 4.0, 5.0), R3::zeros()),
            ],
            orientation,
        )
    }

    #[test]
    fn direction_handles_nonzero_and_zero_fields() {
        let t = table(Orientation::RowMajor);
        assert_relative_eq!(t.samples()[0].magnitude(), 3.0, epsilon = 1.0e-12);
        assert_relative_eq!(t.samples()[0].direction().norm(), 1.0, epsilon = 1.0e-12);
        assert_eq!(t.samples()[1].direction(), R3::zeros());
    }

    #[test]
    fn row_major_layout() {
        let nested = table(Orientation::RowMajor).with_magnitude(true).to_nested();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0], vec![0.0, 1.0, 2.0, 1.0, 2.0, 2.0, 3.0]);
        assert_eq!(nested[1], vec![3.0, 4.0, 5.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn column_major_layout() {
        let nested = table(Orientation::ColumnMajor).to_nested();
        assert_eq!(nested.len(), 6);
        assert_eq!(nested[0], vec![0.0, 3.0]);
        assert_eq!(nested[3], vec![1.0, 0.0]);
        assert_eq!(nested[5], vec![2.0, 0.0]);
    }
}
