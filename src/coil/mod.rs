//! Coil entity: a wire path with material data, derived electrical quantities and access to
//! the field solver.
//!
//! `length` and `resistance` are cached and recomputed inside every mutator, after the new
//! value has been validated, so a live [`Coil`] is never stale.

mod winding;

pub use winding::{Racetrack, Solenoid, Winding};

use tracing::{debug, trace};

use crate::config::{CloudConfig, EvaluationConfig};
use crate::errors::{ensure_positive, Result};
use crate::fields::{self, CloudField, FieldSource, FieldTable, IntegrationMethod};
use crate::geometry::Path;
use crate::materials::WireMaterial;
use crate::math::{R3, Scalar};
use crate::points::{Orientation, PointSet};

/// Current-carrying thin wire with material properties.
///
/// With the `serde` feature, deserialization rebuilds the coil from its path, winding and
/// material; stored `length` and `resistance` are recomputed, so a resistance override does
/// not survive a round trip.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawCoil")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct Coil {
    path: Path,
    winding: Option<Winding>,
    material: WireMaterial,
    length: Scalar,
    resistance: Scalar,
}

impl Coil {
    /// Coil along a caller-supplied path.
    #[must_use]
    pub fn new(path: Path, material: WireMaterial) -> Self {
        Self::assemble(path, None, material)
    }

    /// Coil along a nested coordinate array, transposed once if it is column-major.
    pub fn from_nested(
        rows: &[Vec<Scalar>],
        orientation: Option<Orientation>,
        material: WireMaterial,
    ) -> Result<Self> {
        Ok(Self::new(Path::from_nested(rows, orientation)?, material))
    }

    /// Coil whose path is generated by `winding`.
    pub fn from_winding(winding: impl Into<Winding>, material: WireMaterial) -> Result<Self> {
        let winding = winding.into();
        let path = winding.path()?;
        Ok(Self::assemble(path, Some(winding), material))
    }

    fn assemble(path: Path, winding: Option<Winding>, material: WireMaterial) -> Self {
        let length = path.length();
        let resistance = material.resistance_of(length);
        debug!(
            points = path.len(),
            length,
            resistance,
            winding = winding.as_ref().map_or("custom", Winding::kind),
            "coil assembled"
        );
        Self {
            path,
            winding,
            material,
            length,
            resistance,
        }
    }

    /// Wire path in current-flow order.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Winding that generated the path, if any.
    #[must_use]
    pub const fn winding(&self) -> Option<&Winding> {
        self.winding.as_ref()
    }

    /// Wire material.
    #[must_use]
    pub const fn material(&self) -> &WireMaterial {
        &self.material
    }

    /// Wire length (m).
    #[must_use]
    pub const fn length(&self) -> Scalar {
        self.length
    }

    /// Resistance (Ω).
    #[must_use]
    pub const fn resistance(&self) -> Scalar {
        self.resistance
    }

    /// Resistivity (Ω·m).
    #[must_use]
    pub const fn resistivity(&self) -> Scalar {
        self.material.resistivity()
    }

    /// Conductor cross-sectional area (m²).
    #[must_use]
    pub const fn cross_sectional_area(&self) -> Scalar {
        self.material.cross_sectional_area()
    }

    /// Replaces the resistivity and recomputes the resistance.
    pub fn set_resistivity(&mut self, resistivity: Scalar) -> Result<()> {
        self.material = self.material.with_resistivity(resistivity)?;
        self.refresh_resistance();
        Ok(())
    }

    /// Replaces the cross-sectional area and recomputes the resistance.
    pub fn set_cross_sectional_area(&mut self, area: Scalar) -> Result<()> {
        self.material = self.material.with_cross_sectional_area(area)?;
        self.refresh_resistance();
        Ok(())
    }

    /// Overrides the resistance directly.
    ///
    /// Length and material are left untouched, so afterwards the resistance no longer
    /// follows from them. The next material change or [`Self::rewind`] recomputes it.
    pub fn set_resistance(&mut self, resistance: Scalar) -> Result<()> {
        ensure_positive("resistance", resistance)?;
        trace!(resistance, "resistance overridden");
        self.resistance = resistance;
        Ok(())
    }

    /// Regenerates the whole path from a new winding and recomputes length and resistance.
    ///
    /// On error the coil is left unchanged.
    pub fn rewind(&mut self, winding: impl Into<Winding>) -> Result<()> {
        let winding = winding.into();
        let path = winding.path()?;
        *self = Self::assemble(path, Some(winding), self.material);
        Ok(())
    }

    fn refresh_resistance(&mut self) {
        self.resistance = self.material.resistance_of(self.length);
        trace!(
            resistivity = self.material.resistivity(),
            area = self.material.cross_sectional_area(),
            resistance = self.resistance,
            "resistance recomputed"
        );
    }

    /// Power dissipated in the wire (W) at `current` amperes.
    #[must_use]
    pub fn dissipated_power(&self, current: Scalar) -> Scalar {
        self.resistance * current * current
    }

    /// Magnetic flux density (T) at `point` for `current` amperes.
    #[must_use]
    pub fn magnetic_field(&self, point: &R3, current: Scalar, method: IntegrationMethod) -> R3 {
        fields::magnetic_field(self, point, current, method)
    }

    /// Field at every point of `points`, see [`fields::field_at_points`].
    pub fn field_at_points(&self, points: &PointSet, config: &EvaluationConfig) -> Result<FieldTable> {
        fields::field_at_points(self, points, config)
    }

    /// Field over a sampling grid around the coil, see [`fields::cloud`].
    pub fn cloud(&self, cloud: &CloudConfig, config: &EvaluationConfig) -> Result<CloudField> {
        fields::cloud(self, cloud, config)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawCoil {
    path: Path,
    winding: Option<Winding>,
    material: WireMaterial,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoil> for Coil {
    type Error = crate::errors::CoilError;

    fn try_from(raw: RawCoil) -> Result<Self> {
        if let Some(winding) = &raw.winding {
            if winding.path()? != raw.path {
                return Err(crate::errors::CoilError::invalid(format!(
                    "stored path does not match its {} winding",
                    winding.kind()
                )));
            }
        }
        Ok(Self::assemble(raw.path, raw.winding, raw.material))
    }
}

impl FieldSource for Coil {
    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::constants::{COPPER_RESISTIVITY, VACUUM_PERMEABILITY};
    use crate::errors::CoilError;
    use crate::geometry::line;

    fn straight(max_seg_len: f64) -> Coil {
        let path = line(&R3::zeros(), &R3::new(3.0, 4.0, 0.0), max_seg_len, None).unwrap();
        Coil::new(path, WireMaterial::copper(1.0e-6).unwrap())
    }

    #[test]
    fn derived_quantities_at_construction() {
        let coil = straight(0.1);
        assert_relative_eq!(coil.length(), 5.0, max_relative = 1.0e-12);
        assert_relative_eq!(coil.resistance(), 5.0 * COPPER_RESISTIVITY / 1.0e-6, max_relative = 1.0e-12);
        assert_relative_eq!(coil.dissipated_power(2.0), 4.0 * coil.resistance(), max_relative = 1.0e-12);
    }

    #[test]
    fn length_does_not_depend_on_discretization() {
        assert_relative_eq!(straight(0.013).length(), straight(1.0).length(), max_relative = 1.0e-12);
    }

    #[test]
    fn setters_recompute_resistance_immediately() {
        let mut coil = straight(0.5);
        let base = coil.resistance();
        coil.set_resistivity(2.0 * COPPER_RESISTIVITY).unwrap();
        assert_relative_eq!(coil.resistance(), 2.0 * base, max_relative = 1.0e-12);
        coil.set_cross_sectional_area(4.0e-6).unwrap();
        assert_relative_eq!(coil.resistance(), 0.5 * base, max_relative = 1.0e-12);
    }

    #[test]
    fn invalid_updates_leave_the_coil_untouched() {
        let mut coil = straight(0.5);
        let before = coil.clone();
        assert!(matches!(coil.set_resistivity(0.0), Err(CoilError::InvalidArgument(_))));
        assert!(coil.set_cross_sectional_area(-1.0).is_err());
        assert!(coil.set_resistance(0.0).is_err());
        let too_thin = Racetrack::flat(R3::zeros(), 0.4, 0.8, 0.1, 0.01, 0.02);
        assert!(coil.rewind(too_thin).is_err());
        assert_eq!(coil, before);
    }

    #[test]
    fn resistance_override_lasts_until_material_changes() {
        let mut coil = straight(0.5);
        coil.set_resistance(42.0).unwrap();
        assert_eq!(coil.resistance(), 42.0);
        assert_relative_eq!(coil.length(), 5.0, max_relative = 1.0e-12);
        coil.set_resistivity(COPPER_RESISTIVITY).unwrap();
        assert_relative_eq!(coil.resistance(), coil.material().resistance_of(coil.length()));
    }

    #[test]
    fn rewinding_regenerates_path_and_quantities() {
        let mut coil = Coil::from_winding(
            Solenoid::between(2, 0.0, 0.1, 0.05, 0.005).unwrap(),
            WireMaterial::default(),
        )
        .unwrap();
        let short = coil.length();
        coil.rewind(Solenoid::between(4, 0.0, 0.1, 0.05, 0.005).unwrap()).unwrap();
        assert!(coil.length() > 1.9 * short);
        assert_relative_eq!(coil.resistance(), coil.material().resistance_of(coil.length()));
        assert!(matches!(coil.winding(), Some(Winding::Solenoid(s)) if s.turns() == 4));
    }

    #[test]
    fn nested_three_point_path_needs_orientation() {
        let rows = vec![vec![0.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 2.0, 0.0]];
        let material = WireMaterial::default();
        assert!(matches!(
            Coil::from_nested(&rows, None, material),
            Err(CoilError::ShapeMismatch(_))
        ));
        let coil = Coil::from_nested(&rows, Some(Orientation::ColumnMajor), material).unwrap();
        // Each row is one axis: point 1 takes the second entry of every row.
        assert_eq!(coil.path().points()[1], R3::new(0.0, 1.0, 2.0));
    }

    #[test]
    fn long_solenoid_center_field() {
        let turns = 100;
        let length = 1.0;
        let radius = 0.05;
        let solenoid = Solenoid::between(turns, -0.5, 0.5, radius, 0.005).unwrap();
        let coil = Coil::from_winding(solenoid, WireMaterial::default()).unwrap();
        let n = f64::from(turns) / length;
        let expected = VACUUM_PERMEABILITY * n * length / (length * length + 4.0 * radius * radius).sqrt();
        for method in [IntegrationMethod::Riemann, IntegrationMethod::Simpson] {
            let b = coil.magnetic_field(&R3::zeros(), 1.0, method);
            assert_relative_eq!(b.z.abs(), expected, max_relative = 2.0e-2);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_recomputes_derived_quantities() {
        let coil = straight(0.5);
        let mut value = serde_json::to_value(&coil).unwrap();
        value["length"] = serde_json::json!(123.0);
        value["resistance"] = serde_json::json!(-4.0);
        let restored: Coil = serde_json::from_value(value).unwrap();
        assert_eq!(restored, coil);

        let mut bad_material = serde_json::to_value(&coil).unwrap();
        bad_material["material"]["resistivity"] = serde_json::json!(-1.0);
        assert!(serde_json::from_value::<Coil>(bad_material).is_err());
        let zero_area = r#"{"resistivity":1.7e-8,"cross_sectional_area":0.0}"#;
        assert!(serde_json::from_str::<WireMaterial>(zero_area).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_winding_must_match_its_path() {
        let solenoid = Solenoid::between(2, 0.0, 0.1, 0.05, 0.005).unwrap();
        let coil = Coil::from_winding(solenoid, WireMaterial::default()).unwrap();
        let json = serde_json::to_string(&coil).unwrap();
        assert_eq!(serde_json::from_str::<Coil>(&json).unwrap(), coil);

        let mut tampered = serde_json::to_value(&coil).unwrap();
        tampered["path"] = serde_json::to_value(straight(0.5).path()).unwrap();
        assert!(serde_json::from_value::<Coil>(tampered).is_err());

        let mut no_turns = serde_json::to_value(&coil).unwrap();
        no_turns["winding"]["Solenoid"]["turns"] = serde_json::json!(0);
        assert!(serde_json::from_value::<Coil>(no_turns).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn racetrack_coil_survives_a_round_trip() {
        let track = Racetrack::flat(R3::zeros(), 0.4, 0.8, 0.1, 0.05, 0.02).stacked(0.04);
        let coil = Coil::from_winding(track, WireMaterial::default()).unwrap();
        let json = serde_json::to_string(&coil).unwrap();
        assert_eq!(serde_json::from_str::<Coil>(&json).unwrap(), coil);
    }
}
