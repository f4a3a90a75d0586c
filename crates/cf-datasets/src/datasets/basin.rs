//! Categorical flag array classifying ocean basins.

use cf_common::{attrs, NamedArray, Variable};
use ndarray::arr1;

use crate::error::CatalogResult;

pub const NAME: &str = "basin";

pub fn build() -> CatalogResult<NamedArray> {
    let codes = arr1(&[1i64, 2, 1, 1, 2, 2, 3, 3, 3, 3]);
    let variable = Variable::new(&["time"], codes)?.with_attrs(attrs! {
        "flag_values" => vec![1i64, 2, 3],
        "flag_meanings" => "atlantic_ocean pacific_ocean indian_ocean",
        "standard_name" => "region",
    });
    Ok(NamedArray::new(NAME, variable))
}
