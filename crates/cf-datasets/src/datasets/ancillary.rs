//! Humidity with ancillary error and detection-limit variables.

use cf_common::{attrs, Dataset, Variable};

use crate::config::CatalogConfig;
use crate::error::CatalogResult;
use crate::generators::gaussian_array;

pub const NAME: &str = "anc";

const SHAPE: [usize; 2] = [10, 20];

pub fn build(config: &CatalogConfig) -> CatalogResult<Dataset> {
    let mut ds = Dataset::new();

    ds.add_data_var(
        "q",
        Variable::new(&["x", "y"], gaussian_array(&SHAPE, config.random_seed))?.with_attrs(
            attrs! {
                "standard_name" => "specific_humidity",
                "units" => "g/g",
                "ancillary_variables" => "q_error_limit q_detection_limit",
            },
        ),
    )?;
    ds.add_data_var(
        "q_error_limit",
        Variable::new(
            &["x", "y"],
            gaussian_array(&SHAPE, config.random_seed.wrapping_add(1)),
        )?
        .with_attrs(attrs! {
            "standard_name" => "specific_humidity standard_error",
            "units" => "g/g",
        }),
    )?;
    ds.add_data_var(
        "q_detection_limit",
        Variable::scalar(1e-3).with_attrs(attrs! {
            "standard_name" => "specific_humidity detection_minimum",
            "units" => "g/g",
        }),
    )?;

    Ok(ds)
}
