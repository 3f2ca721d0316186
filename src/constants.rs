//! Physical constants and numerical thresholds.
//!
//! ## Accuracy
//!
//! The Biot–Savart prefactor μ₀/4π is fixed at exactly 10⁻⁷ T·m/A (the pre-2019 SI value).
//! The post-2019 measured permeability differs in the tenth significant digit, which is far
//! below the discretization error of any practical winding path.

use std::f64::consts::PI;

/// Biot–Savart prefactor μ₀/4π in tesla meters per ampere (T·m/A).
pub const MU0_OVER_4PI: f64 = 1.0e-7;
/// Vacuum permeability μ₀ in henries per meter (H/m), consistent with [`MU0_OVER_4PI`].
pub const VACUUM_PERMEABILITY: f64 = 4.0 * PI * MU0_OVER_4PI;
/// Resistivity of annealed copper in ohm meters (Ω·m), the default wire material.
pub const COPPER_RESISTIVITY: f64 = 1.7e-8;
/// Smallest source-to-field distance (m) used by the integration rules.
pub const MIN_SOURCE_DISTANCE: f64 = 1.0e-12;

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn permeability_matches_reference() {
        assert_relative_eq!(VACUUM_PERMEABILITY, 1.256_637_061_4e-6, max_relative = 1.0e-9);
    }
}
