#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Fundamental physical constants used throughout the library.
pub mod constants;
/// Shared mathematical utilities (vectors, spacing, finite differences).
pub mod math;
/// Wire material and conductor cross-section models.
pub mod materials;
/// Point arrays and their row/column orientation.
pub mod points;
/// Winding paths: primitives and composition.
pub mod geometry;
/// Coil entity and path-generation strategies.
pub mod coil;
/// Biot–Savart field evaluation for single points, point lists and sampling grids.
pub mod fields;
/// Superposition and series quantities for groups of coils.
pub mod system;
/// Evaluation and sampling configuration.
pub mod config;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
