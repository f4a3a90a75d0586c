//! Data generators for creating synthetic, reproducible fixture values.
//!
//! Random fields draw from a `StdRng` seeded per fixture rather than a
//! global RNG, so a fixture's values depend only on its seed.

use ndarray::{Array3, ArrayD, ArrayView1, IxDyn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use std::f64::consts::PI;

/// Creates an array of standard-normal values.
///
/// The same `(shape, seed)` always yields the same array; different seeds
/// yield different arrays.
///
/// # Arguments
///
/// * `shape` - Array shape
/// * `seed` - Seed for the generator
pub fn gaussian_array(shape: &[usize], seed: u32) -> ArrayD<f64> {
    let mut rng = StdRng::seed_from_u64(u64::from(seed));
    ArrayD::from_shape_simple_fn(IxDyn(shape), || rng.sample(StandardNormal))
}

/// Creates an `int64` array holding `0, 1, 2, ...` in row-major order.
pub fn arange_array(shape: &[usize]) -> ArrayD<i64> {
    let n: usize = shape.iter().product();
    ArrayD::from_shape_vec(IxDyn(shape), (0..n as i64).collect())
        .unwrap_or_else(|_| ArrayD::zeros(IxDyn(shape)))
}

/// Creates a (time, lat, lon) air temperature field in Kelvin.
///
/// Temperature falls off towards the poles, with a zonal wave and a
/// diurnal swing so that every axis carries signal:
///
/// `T = 243 + 57·cos²(lat) + 4·sin(2·lon) + 2·sin(2π·t/4)`
///
/// Values stay within roughly 230K to 310K.
pub fn air_temperature_field(
    times: usize,
    lat: ArrayView1<f64>,
    lon: ArrayView1<f64>,
) -> Array3<f32> {
    Array3::from_shape_fn((times, lat.len(), lon.len()), |(t, j, i)| {
        let phi = lat[j].to_radians();
        let lambda = lon[i].to_radians();
        let temp = 243.0
            + 57.0 * phi.cos().powi(2)
            + 4.0 * (2.0 * lambda).sin()
            + 2.0 * (2.0 * PI * t as f64 / 4.0).sin();
        // Quantize like the packed upstream data (precision = 2).
        ((temp * 100.0).round() / 100.0) as f32
    })
}
