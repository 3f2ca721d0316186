//! Biot–Savart evaluation of the magnetic field of thin-wire paths.
//!
//! The line integral is split into a dimensionless part that depends only on geometry
//! ([`Quadrature::integral`]) and the scale factor `I · μ₀/4π`. Every entry point, single
//! point or batch, goes through the same two steps, so a batch result is bit-identical to
//! the corresponding single-point result.

mod batch;
mod biot_savart;
mod cloud;
mod magnetic;

pub use batch::{field_at_points, field_at_points_with_progress};
pub use biot_savart::{magnetic_field, FieldSource, IntegrationMethod, Quadrature};
pub use cloud::{cloud, cloud_with_progress, CloudField, SamplingGrid, SliceView};
pub use magnetic::{FieldSample, FieldTable};
