//! Evaluation and sampling configuration.

use std::str::FromStr;

use crate::errors::{ensure_finite, CoilError, Result};
use crate::fields::IntegrationMethod;
use crate::math::Scalar;

/// How batch evaluations distribute work.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// Evaluate points one after another on the calling thread.
    Serial,
    /// Spread points (and coils) over the `rayon` thread pool.
    #[default]
    Parallel,
}

/// Parameters shared by every batch field evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationConfig {
    /// Quadrature rule for the line integral.
    pub method: IntegrationMethod,
    /// Current through the wire in amperes.
    pub current: Scalar,
    /// Work distribution; never changes the results.
    pub execution: Execution,
}

impl EvaluationConfig {
    /// Configuration for `current` amperes with the default rule and parallel execution.
    #[must_use]
    pub fn with_current(current: Scalar) -> Self {
        Self {
            current,
            ..Self::default()
        }
    }

    /// Replaces the quadrature rule.
    #[must_use]
    pub fn method(mut self, method: IntegrationMethod) -> Self {
        self.method = method;
        self
    }

    /// Replaces the execution mode.
    #[must_use]
    pub fn execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_finite("current", self.current)
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            method: IntegrationMethod::default(),
            current: 1.0,
            execution: Execution::default(),
        }
    }
}

/// Cartesian axis selector.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The x axis.
    X,
    /// The y axis.
    Y,
    /// The z axis.
    Z,
}

impl Axis {
    /// Component index of this axis in an `R3`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

impl FromStr for Axis {
    type Err = CoilError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            other => Err(CoilError::invalid(format!("unknown axis `{other}`"))),
        }
    }
}

/// Planar band of a sampling grid selected for focused inspection.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSlice {
    /// Axis normal to the plane.
    pub axis: Axis,
    /// Plane coordinate along `axis`; the middle of the grid span when `None`.
    pub value: Option<Scalar>,
    /// Full band thickness; one grid step when `None` or not positive.
    pub thickness: Option<Scalar>,
}

impl PlaneSlice {
    /// Mid-plane of the grid normal to `axis`, one grid step thick.
    #[must_use]
    pub const fn mid(axis: Axis) -> Self {
        Self {
            axis,
            value: None,
            thickness: None,
        }
    }

    /// Plane at `value` along `axis`, one grid step thick.
    #[must_use]
    pub const fn at(axis: Axis, value: Scalar) -> Self {
        Self {
            axis,
            value: Some(value),
            thickness: None,
        }
    }

    /// Replaces the band thickness.
    #[must_use]
    pub fn thickness(mut self, thickness: Scalar) -> Self {
        self.thickness = Some(thickness);
        self
    }
}

/// Sampling-grid ("cloud") evaluation parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudConfig {
    /// Margin added on every side of the coil bounding box (m).
    pub padding: Scalar,
    /// Samples per axis; the grid holds the cube of this.
    pub samples_per_axis: usize,
    /// Optional planar band returned alongside the full grid.
    pub slice: Option<PlaneSlice>,
    /// Upper bound on the total number of grid points, if any.
    pub max_points: Option<usize>,
}

impl CloudConfig {
    /// Grid of `samples_per_axis³` points around the coil with `padding` margin.
    #[must_use]
    pub fn new(padding: Scalar, samples_per_axis: usize) -> Self {
        Self {
            padding,
            samples_per_axis,
            ..Self::default()
        }
    }

    /// Adds a planar slice.
    #[must_use]
    pub fn with_slice(mut self, slice: PlaneSlice) -> Self {
        self.slice = Some(slice);
        self
    }

    /// Caps the number of grid points.
    #[must_use]
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    /// Total number of grid points this configuration produces.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.samples_per_axis.saturating_pow(3)
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            padding: 0.0,
            samples_per_axis: 10,
            slice: None,
            max_points: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_tool() {
        let eval = EvaluationConfig::default();
        assert_eq!(eval.method, IntegrationMethod::Simpson);
        assert_eq!(eval.current, 1.0);
        let cloud = CloudConfig::default();
        assert_eq!(cloud.samples_per_axis, 10);
        assert_eq!(cloud.point_count(), 1000);
    }

    #[test]
    fn axis_parses_case_insensitively() {
        assert_eq!("Z".parse::<Axis>().unwrap(), Axis::Z);
        assert_eq!(" y ".parse::<Axis>().unwrap().index(), 1);
        assert!("w".parse::<Axis>().is_err());
    }

    #[test]
    fn builders_chain() {
        let eval = EvaluationConfig::with_current(3.0)
            .method(IntegrationMethod::Riemann)
            .execution(Execution::Serial);
        assert_eq!(eval.current, 3.0);
        assert_eq!(eval.method, IntegrationMethod::Riemann);
        assert_eq!(eval.execution, Execution::Serial);
        assert!(EvaluationConfig::with_current(f64::NAN).validate().is_err());

        let cloud = CloudConfig::new(0.1, 5)
            .with_slice(PlaneSlice::at(Axis::X, 0.0).thickness(0.02))
            .with_max_points(200);
        assert_eq!(cloud.slice.unwrap().thickness, Some(0.02));
        assert_eq!(cloud.max_points, Some(200));
    }
}
