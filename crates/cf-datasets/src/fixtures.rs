//! Process-wide sample datasets, each built on first access.
//!
//! These use [`CatalogConfig::default`] so the values never depend on the
//! environment. A malformed fixture panics on first access with the fixture
//! name; there is nothing a caller could recover from.

use cf_common::{Dataset, NamedArray};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::datasets::{
    air, ambiguous, ancillary, basin as basin_fixture, forecast as forecast_fixture, mollweide,
    multiple as multiple_fixture, pop, roms, vert as vert_fixture,
};
use crate::error::CatalogResult;

fn fixture<T>(name: &str, result: CatalogResult<T>) -> T {
    match result {
        Ok(value) => {
            debug!(dataset = name, "Initialized shared sample dataset");
            value
        }
        Err(e) => panic!("sample dataset '{}' is malformed: {}", name, e),
    }
}

static AIRDS: Lazy<Dataset> =
    Lazy::new(|| fixture(air::NAME, air::build(&CatalogConfig::default())));
static DS_NO_ATTRS: Lazy<Dataset> = Lazy::new(|| air::build_no_attrs(&AIRDS));
static POPDS: Lazy<Dataset> = Lazy::new(|| fixture(pop::NAME, pop::build()));
static ANC: Lazy<Dataset> =
    Lazy::new(|| fixture(ancillary::NAME, ancillary::build(&CatalogConfig::default())));
static MULTIPLE: Lazy<Dataset> =
    Lazy::new(|| fixture(multiple_fixture::NAME, multiple_fixture::build()));
static ROMSDS: Lazy<Dataset> =
    Lazy::new(|| fixture(roms::NAME, roms::build(&CatalogConfig::default())));
static MOLLWDS: Lazy<Dataset> = Lazy::new(|| fixture(mollweide::NAME, mollweide::build()));
static FORECAST: Lazy<Dataset> =
    Lazy::new(|| fixture(forecast_fixture::NAME, forecast_fixture::build()));
static BASIN: Lazy<NamedArray> = Lazy::new(|| fixture(basin_fixture::NAME, basin_fixture::build()));
static AMBIG: Lazy<Dataset> = Lazy::new(|| fixture(ambiguous::NAME, ambiguous::build()));
static VERT: Lazy<Dataset> = Lazy::new(|| fixture(vert_fixture::NAME, vert_fixture::build()));

/// Four six-hourly steps of reanalysis air temperature with a cell-area
/// measure.
pub fn airds() -> &'static Dataset {
    &AIRDS
}

/// [`airds`] with every variable's attributes removed.
pub fn ds_no_attrs() -> &'static Dataset {
    &DS_NO_ATTRS
}

/// Curvilinear ocean grid with staggered T and U positions.
pub fn popds() -> &'static Dataset {
    &POPDS
}

/// Humidity with ancillary variables.
pub fn anc() -> &'static Dataset {
    &ANC
}

/// Two unrelated grids in one dataset.
pub fn multiple() -> &'static Dataset {
    &MULTIPLE
}

/// Ocean s-coordinate dataset with formula terms.
pub fn romsds() -> &'static Dataset {
    &ROMSDS
}

/// Mollweide-projected curvilinear grid with vertices and bounds.
pub fn mollwds() -> &'static Dataset {
    &MOLLWDS
}

/// Decoded seasonal forecast on a 360-day calendar.
pub fn forecast() -> &'static Dataset {
    &FORECAST
}

/// Ocean basin flag array.
pub fn basin() -> &'static NamedArray {
    &BASIN
}

/// Bounds linked only through `bounds` attributes.
pub fn ambig() -> &'static Dataset {
    &AMBIG
}

/// Hybrid sigma-pressure ozone dataset with full CF bounds.
pub fn vert() -> &'static Dataset {
    &VERT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_statics_match_default_catalog() {
        let catalog = Catalog::build(&CatalogConfig::default()).unwrap();
        assert_eq!(airds(), &catalog.airds);
        assert_eq!(anc(), &catalog.anc);
        assert_eq!(romsds(), &catalog.romsds);
        assert_eq!(basin(), &catalog.basin);
    }

    #[test]
    fn test_statics_built_once() {
        assert!(std::ptr::eq(mollwds(), mollwds()));
        assert!(std::ptr::eq(ds_no_attrs(), ds_no_attrs()));
    }
}
