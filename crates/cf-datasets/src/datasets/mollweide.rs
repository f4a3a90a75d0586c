//! Curvilinear grid obtained by inverting a Mollweide projection.
//!
//! An 11×11 grid of planar cell centres and the 12×12 grid of cell corners
//! around it are mapped to longitude/latitude. Corner grids are also stored
//! as CF-style four-corner bounds.

use cf_common::{attrs, vertices_to_bounds, Dataset, Variable};
use ndarray::Array2;
use projection::Mollweide;

use crate::error::CatalogResult;

pub const NAME: &str = "mollwds";

const RADIUS: f64 = 50.0;
const CENTERS: usize = 11;
const SPACING: f64 = 5.0;
const ORIGIN: f64 = -25.0;

/// Planar `(XX, YY)` grids: `XX` varies along the first axis, `YY` along
/// the second.
fn planar_grid(n: usize, origin: f64) -> (Array2<f64>, Array2<f64>) {
    let xx = Array2::from_shape_fn((n, n), |(i, _)| SPACING * i as f64 + origin);
    let yy = Array2::from_shape_fn((n, n), |(_, j)| SPACING * j as f64 + origin);
    (xx, yy)
}

pub fn build() -> CatalogResult<Dataset> {
    let proj = Mollweide::new(RADIUS);

    let (xx, yy) = planar_grid(CENTERS, ORIGIN);
    let (lon, lat) = proj.project_grid(xx.view(), yy.view())?;

    let (xx_bnds, yy_bnds) = planar_grid(CENTERS + 1, ORIGIN - SPACING / 2.0);
    let (lon_vertices, lat_vertices) = proj.project_grid(xx_bnds.view(), yy_bnds.view())?;

    let lon_bounds = vertices_to_bounds(lon_vertices.view())?;
    let lat_bounds = vertices_to_bounds(lat_vertices.view())?;

    let mut ds = Dataset::new();
    ds.add_coord(
        "lon",
        Variable::new(&["x", "y"], lon)?.with_attrs(attrs! {
            "units" => "degrees_east",
            "bounds" => "lon_bounds",
        }),
    )?;
    ds.add_coord(
        "lat",
        Variable::new(&["x", "y"], lat)?.with_attrs(attrs! {
            "units" => "degrees_north",
            "bounds" => "lat_bounds",
        }),
    )?;

    ds.add_data_var(
        "lon_bounds",
        Variable::new(&["bounds", "x", "y"], lon_bounds)?
            .with_attrs(attrs! { "units" => "degrees_east" }),
    )?;
    ds.add_data_var(
        "lat_bounds",
        Variable::new(&["bounds", "x", "y"], lat_bounds)?
            .with_attrs(attrs! { "units" => "degrees_north" }),
    )?;
    ds.add_data_var(
        "lon_vertices",
        Variable::new(&["x_vertices", "y_vertices"], lon_vertices)?,
    )?;
    ds.add_data_var(
        "lat_vertices",
        Variable::new(&["x_vertices", "y_vertices"], lat_vertices)?,
    )?;

    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::assert_approx_eq;

    #[test]
    fn test_grid_shapes() {
        let ds = build().unwrap();
        assert_eq!(ds.get("lon").unwrap().shape(), &[11, 11]);
        assert_eq!(ds.get("lat_vertices").unwrap().shape(), &[12, 12]);
        assert_eq!(ds.get("lon_bounds").unwrap().shape(), &[4, 11, 11]);
        assert_eq!(ds.size("bounds"), Some(4));
    }

    #[test]
    fn test_centre_cell_is_origin() {
        let ds = build().unwrap();
        let lon = ds.get("lon").unwrap().data.as_f64().unwrap();
        let lat = ds.get("lat").unwrap().data.as_f64().unwrap();
        assert_approx_eq!(lon[[5, 5]], 0.0, 1e-12);
        assert_approx_eq!(lat[[5, 5]], 0.0, 1e-12);
        // Latitude follows the second axis only.
        assert_eq!(lat[[0, 3]], lat[[10, 3]]);
        assert!(lat[[0, 10]] > lat[[0, 0]]);
    }

    #[test]
    fn test_bounds_enclose_centres() {
        let ds = build().unwrap();
        let lat = ds.get("lat").unwrap().data.as_f64().unwrap();
        let bounds = ds.get("lat_bounds").unwrap().data.as_f64().unwrap();
        for j in 0..11 {
            let c = lat[[4, j]];
            // Corners 0 and 3 sit on the lower y edge, 1 and 2 on the upper one.
            assert!(bounds[[0, 4, j]] < c && c < bounds[[1, 4, j]]);
            assert!(bounds[[3, 4, j]] < c && c < bounds[[2, 4, j]]);
        }
    }
}
