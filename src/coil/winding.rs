use crate::errors::{ensure_finite, ensure_positive, CoilError, Result};
use crate::geometry::{helicoid, racetrack_3d, Path};
use crate::math::{R3, Scalar};

/// Helical solenoid wound around the z axis through `origin`.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawSolenoid")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solenoid {
    turns: u32,
    origin: R3,
    axial_length: Scalar,
    radius: Scalar,
    max_seg_len: Scalar,
}

impl Solenoid {
    /// Validates the shape parameters.
    ///
    /// `axial_length` may be zero (a flat multi-turn loop) or negative (winding towards -z).
    pub fn new(
        turns: u32,
        origin: R3,
        axial_length: Scalar,
        radius: Scalar,
        max_seg_len: Scalar,
    ) -> Result<Self> {
        if turns == 0 {
            return Err(CoilError::invalid("a solenoid needs at least one turn"));
        }
        if !origin.iter().all(|c| c.is_finite()) {
            return Err(CoilError::invalid("solenoid origin must be finite"));
        }
        ensure_finite("axial length", axial_length)?;
        ensure_positive("solenoid radius", radius)?;
        ensure_positive("maximum segment length", max_seg_len)?;
        Ok(Self {
            turns,
            origin,
            axial_length,
            radius,
            max_seg_len,
        })
    }

    /// Solenoid on the z axis running from `z_start` to `z_end`.
    pub fn between(
        turns: u32,
        z_start: Scalar,
        z_end: Scalar,
        radius: Scalar,
        max_seg_len: Scalar,
    ) -> Result<Self> {
        Self::new(turns, R3::new(0.0, 0.0, z_start), z_end - z_start, radius, max_seg_len)
    }

    /// Number of turns.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Center of the first turn.
    #[must_use]
    pub const fn origin(&self) -> R3 {
        self.origin
    }

    /// Advance along z over all turns (m).
    #[must_use]
    pub const fn axial_length(&self) -> Scalar {
        self.axial_length
    }

    /// Winding radius (m).
    #[must_use]
    pub const fn radius(&self) -> Scalar {
        self.radius
    }

    /// Generates the helical path.
    pub fn path(&self) -> Result<Path> {
        helicoid(self.turns, &self.origin, self.axial_length, self.radius, self.max_seg_len)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSolenoid {
    turns: u32,
    origin: R3,
    axial_length: Scalar,
    radius: Scalar,
    max_seg_len: Scalar,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSolenoid> for Solenoid {
    type Error = CoilError;

    fn try_from(raw: RawSolenoid) -> Result<Self> {
        Self::new(raw.turns, raw.origin, raw.axial_length, raw.radius, raw.max_seg_len)
    }
}

/// Racetrack winding: nested rounded rectangles, optionally stacked in layers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Racetrack {
    /// Center of the innermost turn of the bottom layer.
    pub center: R3,
    /// Straight-side width of the innermost turn (m).
    pub inner_width: Scalar,
    /// Straight-side length of the innermost turn (m).
    pub inner_length: Scalar,
    /// Corner radius of the innermost turn (m).
    pub inner_radius: Scalar,
    /// Radial build of the winding (m); one turn per segment length.
    pub thickness: Scalar,
    /// Axial build (m); zero for a single flat layer.
    pub height: Scalar,
    /// Maximum segment length, also the turn and layer pitch (m).
    pub max_seg_len: Scalar,
}

impl Racetrack {
    /// Single flat layer.
    #[must_use]
    pub const fn flat(
        center: R3,
        inner_width: Scalar,
        inner_length: Scalar,
        inner_radius: Scalar,
        thickness: Scalar,
        max_seg_len: Scalar,
    ) -> Self {
        Self {
            center,
            inner_width,
            inner_length,
            inner_radius,
            thickness,
            height: 0.0,
            max_seg_len,
        }
    }

    /// Same winding stacked to `height`.
    #[must_use]
    pub fn stacked(mut self, height: Scalar) -> Self {
        self.height = height;
        self
    }

    /// Generates the winding path.
    pub fn path(&self) -> Result<Path> {
        ensure_positive("racetrack corner radius", self.inner_radius)?;
        ensure_positive("maximum segment length", self.max_seg_len)?;
        racetrack_3d(
            &self.center,
            self.inner_width,
            self.inner_length,
            self.max_seg_len,
            self.inner_radius,
            self.thickness,
            self.height,
        )
    }
}

/// Strategy that generates a coil's path from shape parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Winding {
    /// Helical solenoid.
    Solenoid(Solenoid),
    /// Racetrack stack.
    Racetrack(Racetrack),
}

impl Winding {
    /// Generates the path for this winding.
    pub fn path(&self) -> Result<Path> {
        match self {
            Self::Solenoid(solenoid) => solenoid.path(),
            Self::Racetrack(racetrack) => racetrack.path(),
        }
    }

    /// Short name of the winding kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Solenoid(_) => "solenoid",
            Self::Racetrack(_) => "racetrack",
        }
    }
}

impl From<Solenoid> for Winding {
    fn from(solenoid: Solenoid) -> Self {
        Self::Solenoid(solenoid)
    }
}

impl From<Racetrack> for Winding {
    fn from(racetrack: Racetrack) -> Self {
        Self::Racetrack(racetrack)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::racetrack_2d;

    #[test]
    fn solenoid_between_spans_z_range() {
        let solenoid = Solenoid::between(5, 0.1, 0.6, 0.05, 0.002).unwrap();
        let path = solenoid.path().unwrap();
        assert_relative_eq!(path.first().z, 0.1);
        assert_relative_eq!(path.last().z, 0.6, epsilon = 1.0e-12);
        assert_relative_eq!(solenoid.axial_length(), 0.5, epsilon = 1.0e-12);
    }

    #[test]
    fn solenoid_rejects_bad_shapes() {
        assert!(Solenoid::between(0, 0.0, 1.0, 0.1, 0.01).is_err());
        assert!(Solenoid::between(3, 0.0, 1.0, 0.0, 0.01).is_err());
        assert!(Solenoid::between(3, 0.0, 1.0, 0.1, -0.01).is_err());
        assert!(Solenoid::new(3, R3::new(f64::NAN, 0.0, 0.0), 1.0, 0.1, 0.01).is_err());
    }

    #[test]
    fn flat_racetrack_matches_geometry_helper() {
        let track = Racetrack::flat(R3::zeros(), 0.4, 0.8, 0.1, 0.05, 0.02);
        let expected = racetrack_2d(&R3::zeros(), 0.4, 0.8, 0.02, 0.1, 0.05).unwrap();
        assert_eq!(Winding::from(track).path().unwrap(), expected);
        assert_eq!(Winding::from(track).kind(), "racetrack");
    }

    #[test]
    fn racetrack_rejects_non_positive_radius() {
        let track = Racetrack::flat(R3::zeros(), 0.4, 0.8, 0.0, 0.05, 0.02);
        assert!(track.path().is_err());
    }
}
