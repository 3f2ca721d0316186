//! Wire material and conductor cross-section models.

use crate::constants::COPPER_RESISTIVITY;
use crate::errors::{ensure_positive, CoilError, Result};
use crate::math::Scalar;

/// Electrical properties of the wire a coil is wound from, in SI units.
///
/// Both quantities are validated on construction, so a live value is always physical.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawMaterial")
)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireMaterial {
    resistivity: Scalar,
    cross_sectional_area: Scalar,
}

impl WireMaterial {
    /// Creates a material from resistivity (Ω·m) and conductor cross-sectional area (m²).
    pub fn new(resistivity: Scalar, cross_sectional_area: Scalar) -> Result<Self> {
        ensure_positive("resistivity", resistivity)?;
        ensure_positive("cross-sectional area", cross_sectional_area)?;
        Ok(Self {
            resistivity,
            cross_sectional_area,
        })
    }

    /// Copper wire with the given cross-sectional area (m²).
    pub fn copper(cross_sectional_area: Scalar) -> Result<Self> {
        Self::new(COPPER_RESISTIVITY, cross_sectional_area)
    }

    /// Resistivity ρ in Ω·m.
    #[must_use]
    pub const fn resistivity(&self) -> Scalar {
        self.resistivity
    }

    /// Cross-sectional area in m².
    #[must_use]
    pub const fn cross_sectional_area(&self) -> Scalar {
        self.cross_sectional_area
    }

    /// Resistance in ohms of `length` meters of this wire.
    #[must_use]
    pub fn resistance_of(&self, length: Scalar) -> Scalar {
        length * self.resistivity / self.cross_sectional_area
    }

    pub(crate) fn with_resistivity(self, resistivity: Scalar) -> Result<Self> {
        Self::new(resistivity, self.cross_sectional_area)
    }

    pub(crate) fn with_cross_sectional_area(self, cross_sectional_area: Scalar) -> Result<Self> {
        Self::new(self.resistivity, cross_sectional_area)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMaterial {
    resistivity: Scalar,
    cross_sectional_area: Scalar,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMaterial> for WireMaterial {
    type Error = CoilError;

    fn try_from(raw: RawMaterial) -> Result<Self> {
        Self::new(raw.resistivity, raw.cross_sectional_area)
    }
}

impl Default for WireMaterial {
    /// Copper with a unit cross-sectional area.
    fn default() -> Self {
        Self {
            resistivity: COPPER_RESISTIVITY,
            cross_sectional_area: 1.0,
        }
    }
}

/// Geometric shape of a conductor cross-section.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossSection {
    /// Round wire of the given radius (m).
    Circle {
        /// Radius in meters.
        radius: Scalar,
    },
    /// Rectangular strip (m × m).
    Rectangle {
        /// Width in meters.
        width: Scalar,
        /// Length in meters.
        length: Scalar,
    },
    /// Square bar with the given side (m).
    Square {
        /// Side in meters.
        side: Scalar,
    },
}

impl CrossSection {
    /// Geometric area in m².
    pub fn area(&self) -> Result<Scalar> {
        match *self {
            Self::Circle { radius } => {
                ensure_positive("radius", radius)?;
                Ok(std::f64::consts::PI * radius * radius)
            }
            Self::Rectangle { width, length } => {
                ensure_positive("width", width)?;
                ensure_positive("length", length)?;
                Ok(width * length)
            }
            Self::Square { side } => {
                ensure_positive("side", side)?;
                Ok(side * side)
            }
        }
    }

    /// Area actually occupied by conductor when only `fill_ratio` of the shape is metal
    /// (stranded or insulated windings).
    pub fn conductor_area(&self, fill_ratio: Scalar) -> Result<Scalar> {
        if !(fill_ratio > 0.0 && fill_ratio <= 1.0) {
            return Err(CoilError::invalid(format!(
                "fill ratio must lie in (0, 1], got {fill_ratio}"
            )));
        }
        Ok(self.area()? * fill_ratio)
    }
}
