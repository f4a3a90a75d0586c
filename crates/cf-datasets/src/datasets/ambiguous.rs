//! Bounds variables whose names do not follow `<coord>_bnds`.
//!
//! Only the `bounds` attributes tie `lat`/`lon` to `vertices_latitude` and
//! `vertices_longitude`.

use cf_common::{attrs, Dataset, Variable};
use ndarray::{Array1, Array2};

use crate::error::CatalogResult;

pub const NAME: &str = "ambig";

const POINTS: usize = 5;

pub fn build() -> CatalogResult<Dataset> {
    let mut ds = Dataset::new();

    ds.add_coord(
        "lat",
        Variable::new(&["lat"], Array1::<f64>::zeros(POINTS))?.with_attrs(attrs! {
            "bounds" => "vertices_latitude",
            "units" => "degrees_north",
            "long_name" => "latitude",
            "standard_name" => "latitude",
            "axis" => "Y",
        }),
    )?;
    ds.add_coord(
        "lon",
        Variable::new(&["lon"], Array1::<f64>::zeros(POINTS))?.with_attrs(attrs! {
            "bounds" => "vertices_longitude",
            "units" => "degrees_east",
            "long_name" => "longitude",
            "standard_name" => "longitude",
            "axis" => "X",
        }),
    )?;
    ds.add_coord(
        "vertices_latitude",
        Variable::new(&["lat", "bnds"], Array2::<f64>::zeros((POINTS, 2)))?.with_attrs(attrs! {
            "long_name" => "latitude_bounds",
            "units" => "degrees_north",
        }),
    )?;
    ds.add_coord(
        "vertices_longitude",
        Variable::new(&["lon", "bnds"], Array2::<f64>::zeros((POINTS, 2)))?.with_attrs(attrs! {
            "long_name" => "longitude_bounds",
            "units" => "degrees_east",
        }),
    )?;

    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_common::find_bounds;

    #[test]
    fn test_bounds_resolved_by_attribute_only() {
        let ds = build().unwrap();
        assert!(ds.data_vars.is_empty());
        assert_eq!(find_bounds(&ds, "lat"), Some("vertices_latitude"));
        assert_eq!(find_bounds(&ds, "lon"), Some("vertices_longitude"));

        // Without attributes the conventional names find nothing.
        let bare = ds.strip_attrs();
        assert_eq!(find_bounds(&bare, "lat"), None);
    }
}
