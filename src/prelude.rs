//! Convenience re-exports for building and evaluating coil assemblies.

pub use crate::coil::{Coil, Racetrack, Solenoid, Winding};
pub use crate::config::{Axis, CloudConfig, EvaluationConfig, Execution, PlaneSlice};
pub use crate::constants::*;
pub use crate::errors::{CoilError, Result};
pub use crate::fields::{
    cloud, cloud_with_progress, field_at_points, field_at_points_with_progress, magnetic_field,
    CloudField, FieldSample, FieldSource, FieldTable, IntegrationMethod, Quadrature, SamplingGrid,
    SliceView,
};
pub use crate::geometry::{
    arc, helicoid, line, race_track, racetrack_2d, racetrack_3d, ArcDirection, Path, PathBuilder,
};
pub use crate::materials::{CrossSection, WireMaterial};
pub use crate::math::{central_gradient, linspace, linspace_points, R3, Scalar};
pub use crate::points::{parse_points, Orientation, PointSet};
pub use crate::system::{combined_field, combined_field_at, series_length, series_resistance};
