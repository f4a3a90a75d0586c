//! Mollweide (homolographic) equal-area projection.
//!
//! Planar coordinates `(x, y)` on an ellipse of semi-axes `2√2·R` and `√2·R`
//! map to geographic coordinates through the auxiliary angle θ:
//!
//! - θ = arcsin(y / (R·√2))
//! - lat = arcsin((2θ + sin 2θ) / π)
//! - lon = π·x / (2√2·R·cos θ)
//!
//! The central meridian is 0° and the projection is spherical.

use ndarray::{Array2, ArrayView2, Zip};
use std::f64::consts::{PI, SQRT_2};

use crate::ProjectionError;

const NEWTON_TOLERANCE: f64 = 1e-12;
const NEWTON_MAX_ITER: usize = 50;

/// Spherical Mollweide projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mollweide {
    /// Sphere radius in planar units
    pub radius: f64,
}

impl Mollweide {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    /// Convert planar coordinates to (lon, lat) in degrees.
    pub fn to_geographic(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let ratio = y / (self.radius * SQRT_2);
        if !ratio.is_finite() || ratio.abs() >= 1.0 {
            return Err(ProjectionError::OutOfDomain { x, y });
        }

        let theta = ratio.asin();
        let lat = ((2.0 * theta + (2.0 * theta).sin()) / PI).asin();
        let lon = x * PI / (self.radius * 2.0 * SQRT_2 * theta.cos());

        Ok((lon.to_degrees(), lat.to_degrees()))
    }

    /// Convert (lon, lat) in degrees to planar coordinates.
    ///
    /// Solves 2θ + sin 2θ = π·sin(lat) with Newton's method.
    pub fn from_geographic(&self, lon: f64, lat: f64) -> (f64, f64) {
        let phi = lat.to_radians();
        let target = PI * phi.sin();

        let mut theta = phi;
        for _ in 0..NEWTON_MAX_ITER {
            let f = 2.0 * theta + (2.0 * theta).sin() - target;
            let df = 2.0 + 2.0 * (2.0 * theta).cos();
            if df.abs() < f64::EPSILON {
                break;
            }
            let step = f / df;
            theta -= step;
            if step.abs() < NEWTON_TOLERANCE {
                break;
            }
        }

        let x = 2.0 * SQRT_2 * self.radius * lon.to_radians() * theta.cos() / PI;
        let y = SQRT_2 * self.radius * theta.sin();
        (x, y)
    }

    /// Project whole planar grids, returning `(lon, lat)` grids in degrees.
    pub fn project_grid(
        &self,
        xx: ArrayView2<f64>,
        yy: ArrayView2<f64>,
    ) -> Result<(Array2<f64>, Array2<f64>), ProjectionError> {
        if xx.shape() != yy.shape() {
            return Err(ProjectionError::ShapeMismatch(
                xx.shape().to_vec(),
                yy.shape().to_vec(),
            ));
        }

        let mut lon = Array2::zeros(xx.raw_dim());
        let mut lat = Array2::zeros(xx.raw_dim());
        let mut failure = None;
        Zip::from(&mut lon)
            .and(&mut lat)
            .and(&xx)
            .and(&yy)
            .for_each(|lon, lat, &x, &y| match self.to_geographic(x, y) {
                Ok((lo, la)) => {
                    *lon = lo;
                    *lat = la;
                }
                Err(e) => {
                    failure.get_or_insert(e);
                }
            });

        match failure {
            Some(e) => Err(e),
            None => Ok((lon, lat)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use test_utils::{assert_approx_eq, assert_coords_approx_eq};

    #[test]
    fn test_origin() {
        let proj = Mollweide::new(50.0);
        assert_coords_approx_eq!(proj.to_geographic(0.0, 0.0).unwrap(), (0.0, 0.0), 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let proj = Mollweide::new(50.0);
        let (lon_a, lat_a) = proj.to_geographic(25.0, 25.0).unwrap();
        let (lon_b, lat_b) = proj.to_geographic(-25.0, -25.0).unwrap();
        assert_approx_eq!(lon_a, -lon_b, 1e-12);
        assert_approx_eq!(lat_a, -lat_b, 1e-12);
    }

    #[test]
    fn test_equator_is_linear_in_x() {
        // On the equator cos θ = 1, so lon = x·π / (2√2·R) radians.
        let proj = Mollweide::new(50.0);
        let (lon, _) = proj.to_geographic(-25.0, 0.0).unwrap();
        assert_approx_eq!(lon, (-25.0 * PI / (100.0 * SQRT_2)).to_degrees(), 1e-12);
    }

    #[test]
    fn test_inverse_then_forward() {
        let proj = Mollweide::new(50.0);
        for &(x, y) in &[(10.0, 20.0), (-27.5, -27.5), (5.0, -12.5)] {
            let (lon, lat) = proj.to_geographic(x, y).unwrap();
            assert_coords_approx_eq!(proj.from_geographic(lon, lat), (x, y), 1e-9);
        }
    }

    #[test]
    fn test_out_of_domain() {
        let proj = Mollweide::new(50.0);
        assert!(matches!(
            proj.to_geographic(0.0, 80.0),
            Err(ProjectionError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn test_project_grid_shape_mismatch() {
        let proj = Mollweide::new(50.0);
        let xx = array![[0.0, 1.0]];
        let yy = array![[0.0], [1.0]];
        assert!(matches!(
            proj.project_grid(xx.view(), yy.view()),
            Err(ProjectionError::ShapeMismatch(_, _))
        ));
    }
}
