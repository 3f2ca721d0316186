use std::fmt;
use std::str::FromStr;

use crate::constants::{MIN_SOURCE_DISTANCE, MU0_OVER_4PI};
use crate::errors::CoilError;
use crate::geometry::Path;
use crate::math::{central_gradient, R3, Scalar};

/// Quadrature rule for the Biot–Savart line integral.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegrationMethod {
    /// Midpoint rule over segments: `Σ dl × r' / |r'|³` with `r'` measured from each
    /// segment midpoint.
    Riemann,
    /// Composite Simpson over vertices with central-difference tangents.
    ///
    /// Weights `1, 4, 2, 4, …, 4, 1` are scaled by `h/3`, where `h` is the length of the
    /// first segment. The rule assumes uniform spacing along the path; on non-uniformly
    /// sampled paths the result is biased.
    #[default]
    Simpson,
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Riemann => f.write_str("Riemann"),
            Self::Simpson => f.write_str("Simpson"),
        }
    }
}

impl FromStr for IntegrationMethod {
    type Err = CoilError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "riemann" => Ok(Self::Riemann),
            "simpson" => Ok(Self::Simpson),
            _ => Err(CoilError::invalid(format!("unknown integration method `{s}`"))),
        }
    }
}

/// Anything that owns a wire path the solver can integrate over.
pub trait FieldSource {
    /// The source path in current-flow order.
    fn path(&self) -> &Path;
}

impl FieldSource for Path {
    fn path(&self) -> &Path {
        self
    }
}

/// Path-only data for one integration rule, reusable across field points.
#[derive(Debug, Clone)]
pub enum Quadrature {
    /// Segment vectors and midpoints.
    Riemann {
        /// `p[i+1] - p[i]` per segment.
        segments: Vec<R3>,
        /// `(p[i] + p[i+1]) / 2` per segment.
        midpoints: Vec<R3>,
    },
    /// Vertices with their tangents and Simpson weights.
    Simpson {
        /// Path vertices.
        vertices: Vec<R3>,
        /// Unit-step tangents from central differences.
        tangents: Vec<R3>,
        /// Composite Simpson weights.
        weights: Vec<Scalar>,
        /// Step length (first segment).
        step: Scalar,
    },
}

impl Quadrature {
    /// Prepares `path` for repeated evaluation with `method`.
    #[must_use]
    pub fn new(path: &Path, method: IntegrationMethod) -> Self {
        let points = path.points();
        match method {
            IntegrationMethod::Riemann => {
                let (segments, midpoints) = points
                    .windows(2)
                    .map(|w| (w[1] - w[0], (w[0] + w[1]) * 0.5))
                    .unzip();
                Self::Riemann {
                    segments,
                    midpoints,
                }
            }
            IntegrationMethod::Simpson => {
                let step = (points[1] - points[0]).norm();
                let n = points.len();
                let weights = (0..n)
                    .map(|i| match i {
                        0 => 1.0,
                        _ if i == n - 1 => 1.0,
                        _ if i % 2 == 1 => 4.0,
                        _ => 2.0,
                    })
                    .collect();
                Self::Simpson {
                    vertices: points.to_vec(),
                    tangents: central_gradient(points, step),
                    weights,
                    step,
                }
            }
        }
    }

    /// Dimensionless Biot–Savart integral at `point` (current and μ₀/4π factored out).
    ///
    /// Source distances below [`MIN_SOURCE_DISTANCE`] are clamped, so points on the wire
    /// produce large but finite values instead of failing.
    #[must_use]
    pub fn integral(&self, point: &R3) -> R3 {
        match self {
            Self::Riemann {
                segments,
                midpoints,
            } => segments
                .iter()
                .zip(midpoints)
                .fold(R3::zeros(), |acc, (dl, mid)| acc + kernel(dl, &(point - mid))),
            Self::Simpson {
                vertices,
                tangents,
                weights,
                step,
            } => {
                let sum = vertices
                    .iter()
                    .zip(tangents)
                    .zip(weights)
                    .fold(R3::zeros(), |acc, ((vertex, dl), w)| {
                        acc + kernel(dl, &(point - vertex)) * *w
                    });
                sum * (step / 3.0)
            }
        }
    }

    /// Magnetic flux density (T) at `point` for `current` amperes.
    #[must_use]
    pub fn field(&self, point: &R3, current: Scalar) -> R3 {
        self.integral(point) * (current * MU0_OVER_4PI)
    }
}

#[inline]
fn kernel(dl: &R3, r: &R3) -> R3 {
    let distance = r.norm().max(MIN_SOURCE_DISTANCE);
    dl.cross(r) / (distance * distance * distance)
}

/// Magnetic flux density (T) at `point` due to `current` amperes through `source`.
#[must_use]
pub fn magnetic_field<S: FieldSource + ?Sized>(
    source: &S,
    point: &R3,
    current: Scalar,
    method: IntegrationMethod,
) -> R3 {
    Quadrature::new(source.path(), method).field(point, current)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    use super::*;
    use crate::constants::VACUUM_PERMEABILITY;
    use crate::geometry::{arc, line, ArcDirection};

    const METHODS: [IntegrationMethod; 2] = [IntegrationMethod::Riemann, IntegrationMethod::Simpson];

    fn finite_wire_field(half_length: f64, distance: f64, current: f64) -> f64 {
        let sin = half_length / (half_length * half_length + distance * distance).sqrt();
        MU0_OVER_4PI * current / distance * 2.0 * sin
    }

    #[test]
    fn method_names_parse() {
        assert_eq!("Riemann".parse::<IntegrationMethod>().unwrap(), IntegrationMethod::Riemann);
        assert_eq!("simpson".parse::<IntegrationMethod>().unwrap(), IntegrationMethod::Simpson);
        assert!(matches!(
            "trapezoid".parse::<IntegrationMethod>(),
            Err(CoilError::InvalidArgument(_))
        ));
        assert_eq!(IntegrationMethod::Simpson.to_string(), "Simpson");
    }

    #[test]
    fn straight_wire_matches_analytic_field() {
        let wire = line(&R3::new(-5.0, 0.0, 0.0), &R3::new(5.0, 0.0, 0.0), 0.01, None).unwrap();
        assert_eq!(wire.len(), 1001);
        let point = R3::new(0.0, 1.0, 0.0);
        let expected = finite_wire_field(5.0, 1.0, 1.0);
        for method in METHODS {
            let b = magnetic_field(&wire, &point, 1.0, method);
            assert_relative_eq!(b.z, expected, max_relative = 1.0e-3);
            assert!(b.x.abs() < 1.0e-15 && b.y.abs() < 1.0e-15);
        }
    }

    #[test]
    fn long_wire_approaches_infinite_wire_field() {
        let wire = line(&R3::new(-50.0, 0.0, 0.0), &R3::new(50.0, 0.0, 0.0), 0.01, None).unwrap();
        let point = R3::new(0.0, 0.0, 1.0);
        let infinite = VACUUM_PERMEABILITY * 1.0 / (2.0 * PI * 1.0);
        for method in METHODS {
            let b = magnetic_field(&wire, &point, 1.0, method);
            assert_relative_eq!(b.norm(), infinite, max_relative = 1.0e-2);
            assert_relative_eq!(b.norm(), 2.0e-7, max_relative = 1.0e-2);
        }
    }

    #[test]
    fn loop_center_matches_analytic_field() {
        let radius = 0.5;
        let current = 3.0;
        let ring = arc(&R3::zeros(), radius, 0.0, 2.0 * PI, 1.0e-3, Some(2001), ArcDirection::Clockwise)
            .unwrap();
        let expected = VACUUM_PERMEABILITY * current / (2.0 * radius);
        for method in METHODS {
            let b = magnetic_field(&ring, &R3::zeros(), current, method);
            // Clockwise seen from +z: the field at the center points along -z.
            assert_relative_eq!(b.z, -expected, max_relative = 1.0e-4);
            assert!(b.xy().norm() < expected * 1.0e-6);
        }
    }

    #[test]
    fn reversing_the_winding_flips_the_field() {
        let ring = arc(&R3::zeros(), 1.0, 0.0, 2.0 * PI, 0.01, None, ArcDirection::Clockwise).unwrap();
        let reversed = ring.reversed();
        for method in METHODS {
            for z in [0.0, 0.3, -1.2] {
                let point = R3::new(0.0, 0.0, z);
                let forward = magnetic_field(&ring, &point, 1.0, method);
                let backward = magnetic_field(&reversed, &point, 1.0, method);
                assert_relative_eq!(backward, -forward, max_relative = 1.0e-9, epsilon = 1.0e-18);
            }
        }
    }

    #[test]
    fn field_is_linear_in_current() {
        let wire = line(&R3::zeros(), &R3::new(0.0, 0.0, 1.0), 0.05, None).unwrap();
        let q = Quadrature::new(&wire, IntegrationMethod::Simpson);
        let p = R3::new(0.2, 0.1, 0.4);
        assert_relative_eq!(q.field(&p, 2.5), q.field(&p, 1.0) * 2.5, max_relative = 1.0e-12);
    }

    #[test]
    fn points_on_the_wire_stay_finite() {
        let wire = line(&R3::zeros(), &R3::new(1.0, 0.0, 0.0), 0.1, None).unwrap();
        for method in METHODS {
            let on_vertex = magnetic_field(&wire, &R3::new(0.5, 0.0, 0.0), 1.0, method);
            let on_midpoint = magnetic_field(&wire, &R3::new(0.05, 0.0, 0.0), 1.0, method);
            assert!(on_vertex.iter().all(|c| c.is_finite()));
            assert!(on_midpoint.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn simpson_weights_follow_composite_pattern() {
        let wire = line(&R3::zeros(), &R3::new(1.0, 0.0, 0.0), 0.25, None).unwrap();
        match Quadrature::new(&wire, IntegrationMethod::Simpson) {
            Quadrature::Simpson { weights, step, .. } => {
                assert_eq!(weights, vec![1.0, 4.0, 2.0, 4.0, 1.0]);
                assert_relative_eq!(step, 0.25);
            }
            Quadrature::Riemann { .. } => panic!("expected Simpson data"),
        }
        let even = line(&R3::zeros(), &R3::new(1.0, 0.0, 0.0), 0.34, None).unwrap();
        match Quadrature::new(&even, IntegrationMethod::Simpson) {
            Quadrature::Simpson { weights, .. } => assert_eq!(weights, vec![1.0, 4.0, 2.0, 1.0]),
            Quadrature::Riemann { .. } => panic!("expected Simpson data"),
        }
    }
}
