//! Two independent grids in one dataset.

use cf_common::{attrs, Dataset, Variable};
use ndarray::{Array1, Array2};

use crate::error::CatalogResult;

pub const NAME: &str = "multiple";

pub fn build() -> CatalogResult<Dataset> {
    let mut ds = Dataset::new();

    for (name, size, axis) in [("x1", 30, "X"), ("y1", 20, "Y"), ("x2", 10, "X"), ("y2", 5, "Y")] {
        ds.add_coord(
            name,
            Variable::new(&[name], Array1::from_iter(0..size as i64))?
                .with_attrs(attrs! { "axis" => axis }),
        )?;
    }

    ds.add_data_var(
        "v1",
        Variable::new(&["x1", "y1"], Array2::from_elem((30, 20), 15.0))?,
    )?;
    ds.add_data_var(
        "v2",
        Variable::new(&["x2", "y2"], Array2::from_elem((10, 5), 15.0))?,
    )?;

    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grids_share_no_dimensions() {
        let ds = build().unwrap();
        let v1 = ds.get("v1").unwrap();
        let v2 = ds.get("v2").unwrap();
        assert!(v1.dims.iter().all(|d| !v2.dims.contains(d)));
        assert_eq!(ds.dims.len(), 4);
        assert_eq!(v2.shape(), &[10, 5]);
    }
}
