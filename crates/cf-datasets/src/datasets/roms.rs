//! ROMS-style ocean dataset on a stretched s-coordinate.
//!
//! `s_rho` carries the `ocean_s_coordinate_g2` formula terms. The `temp`
//! variable keeps a `coordinates` attribute that differs from its encoded
//! `coordinates`; consumers must not assume the two agree.

use cf_common::{attrs, Dataset, Variable};
use ndarray::{arr1, Array2};

use crate::config::CatalogConfig;
use crate::error::CatalogResult;
use crate::generators::gaussian_array;

pub const NAME: &str = "romsds";

const S_RHO: [f64; 30] = [
    -0.983333, -0.95, -0.916667, -0.883333, -0.85, -0.816667, -0.783333, -0.75, -0.716667,
    -0.683333, -0.65, -0.616667, -0.583333, -0.55, -0.516667, -0.483333, -0.45, -0.416667,
    -0.383333, -0.35, -0.316667, -0.283333, -0.25, -0.216667, -0.183333, -0.15, -0.116667,
    -0.083333, -0.05, -0.016667,
];

const CS_R: [f64; 30] = [
    -9.33010396e-01, -8.09234736e-01, -6.98779853e-01, -6.01008926e-01, -5.15058562e-01,
    -4.39938913e-01, -3.74609181e-01, -3.18031817e-01, -2.69209327e-01, -2.27207488e-01,
    -1.91168387e-01, -1.60316097e-01, -1.33957253e-01, -1.11478268e-01, -9.23404709e-02,
    -7.60741092e-02, -6.22718662e-02, -5.05823390e-02, -4.07037635e-02, -3.23781605e-02,
    -2.53860004e-02, -1.95414261e-02, -1.46880431e-02, -1.06952600e-02, -7.45515186e-03,
    -4.87981407e-03, -2.89916971e-03, -1.45919898e-03, -5.20560097e-04, -5.75774004e-05,
];

const ZETA: [f64; 2] = [-0.155356, -0.127435];

/// Gaussian stream offset so `z_rho_dummy` never repeats the `anc` fields.
const Z_RHO_SEED_OFFSET: u32 = 2;

pub fn build(config: &CatalogConfig) -> CatalogResult<Dataset> {
    let mut ds = Dataset::new();

    ds.add_data_var(
        "s_rho",
        Variable::new(&["s_rho"], arr1(&S_RHO))?.with_attrs(attrs! {
            "long_name" => "S-coordinate at RHO-points",
            "valid_min" => -1.0,
            "valid_max" => 0.0,
            "standard_name" => "ocean_s_coordinate_g2",
            "formula_terms" => "s: s_rho C: Cs_r eta: zeta depth: h depth_c: hc",
            "field" => "s_rho, scalar",
        }),
    )?;
    ds.add_coord("hc", Variable::scalar(20.0))?;
    ds.add_coord("h", Variable::scalar(603.9))?;
    ds.add_coord("Vtransform", Variable::scalar(2.0))?;
    ds.add_coord("Cs_r", Variable::new(&["s_rho"], arr1(&CS_R))?)?;

    ds.add_data_var("zeta", Variable::new(&["ocean_time"], arr1(&ZETA))?)?;

    let levels = S_RHO.len();
    let temp = Array2::from_shape_fn((ZETA.len(), levels), |(_, k)| {
        20.0 + 10.0 * k as f64 / (levels - 1) as f64
    });
    ds.add_data_var(
        "temp",
        Variable::new(&["ocean_time", "s_rho"], temp)?
            .with_attrs(attrs! {
                "coordinates" => "z_rho_dummy",
                "standard_name" => "sea_water_potential_temperature",
            })
            .with_encoding(attrs! { "coordinates" => "s_rho" }),
    )?;

    let z_rho = gaussian_array(
        &[ZETA.len(), levels],
        config.random_seed.wrapping_add(Z_RHO_SEED_OFFSET),
    );
    ds.add_coord(
        "z_rho_dummy",
        Variable::new(&["ocean_time", "s_rho"], z_rho)?.with_attrs(attrs! { "positive" => "up" }),
    )?;

    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_common::AttrValue;
    use test_utils::assert_approx_eq;

    #[test]
    fn test_s_coordinate() {
        let ds = build(&CatalogConfig::default()).unwrap();
        assert!(ds.is_coord("s_rho"));
        assert_eq!(ds.size("s_rho"), Some(30));
        assert_eq!(ds.size("ocean_time"), Some(2));
        let hc = ds.get("hc").unwrap().data.as_f64().unwrap();
        assert_eq!(hc.iter().next().copied(), Some(20.0));
        let cs_r = ds.get("Cs_r").unwrap().data.as_f64().unwrap();
        assert_approx_eq!(cs_r[[29]], -5.75774004e-05, 1e-15);
    }

    #[test]
    fn test_temp_profile() {
        let ds = build(&CatalogConfig::default()).unwrap();
        let temp = ds.get("temp").unwrap().data.as_f64().unwrap();
        assert_eq!(temp[[0, 0]], 20.0);
        assert_approx_eq!(temp[[1, 29]], 30.0, 1e-12);
        assert_eq!(temp[[0, 7]], temp[[1, 7]]);
    }

    #[test]
    fn test_coordinates_divergence_preserved() {
        let ds = build(&CatalogConfig::default()).unwrap();
        let temp = ds.get("temp").unwrap();
        assert_eq!(temp.attr_str("coordinates"), Some("z_rho_dummy"));
        assert_eq!(
            temp.encoding.get("coordinates"),
            Some(&AttrValue::from("s_rho"))
        );
    }
}
