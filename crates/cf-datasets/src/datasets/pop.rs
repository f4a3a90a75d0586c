//! Curvilinear ocean grid in the style of POP model output.
//!
//! Two staggered position grids (T and U points) as constant 2-D coordinate
//! arrays, each referenced by a data variable through `coordinates`.

use cf_common::{attrs, Dataset, Variable};
use ndarray::{Array1, Array2};

use crate::error::CatalogResult;

pub const NAME: &str = "popds";

const NLAT: usize = 20;
const NLON: usize = 30;

pub fn build() -> CatalogResult<Dataset> {
    let filled = |value: f64| Array2::from_elem((NLAT, NLON), value);
    let mut ds = Dataset::new();

    for (name, value, units) in [
        ("TLONG", 1.0, "degrees_east"),
        ("TLAT", 2.0, "degrees_north"),
        ("ULONG", 0.5, "degrees_east"),
        ("ULAT", 2.5, "degrees_north"),
    ] {
        ds.add_coord(
            name,
            Variable::new(&["nlat", "nlon"], filled(value))?
                .with_attrs(attrs! { "units" => units }),
        )?;
    }

    ds.add_data_var(
        "UVEL",
        Variable::new(&["nlat", "nlon"], filled(15.0))?.with_attrs(attrs! {
            "coordinates" => "ULONG ULAT",
            "standard_name" => "sea_water_x_velocity",
        }),
    )?;
    ds.add_data_var(
        "TEMP",
        Variable::new(&["nlat", "nlon"], filled(15.0))?.with_attrs(attrs! {
            "coordinates" => "TLONG TLAT",
            "standard_name" => "sea_water_potential_temperature",
        }),
    )?;

    // Index variables named after their dimension become dimension coordinates.
    ds.add_data_var(
        "nlon",
        Variable::new(&["nlon"], Array1::from_iter(0..NLON as i64))?
            .with_attrs(attrs! { "axis" => "X" }),
    )?;
    ds.add_data_var(
        "nlat",
        Variable::new(&["nlat"], Array1::from_iter(0..NLAT as i64))?
            .with_attrs(attrs! { "axis" => "Y" }),
    )?;

    Ok(ds)
}
