//! Winding paths: validated point sequences, the primitives that generate them and the
//! composer that joins primitives into continuous windings.

mod path;
mod primitives;
mod racetrack;

pub use path::{Path, PathBuilder};
pub use primitives::{arc, helicoid, line, ArcDirection};
pub use racetrack::{race_track, racetrack_2d, racetrack_3d};
