//! Sample CF-convention datasets for tests.
//!
//! Each fixture is a small in-memory dataset that exercises one structural
//! case of the CF conventions:
//! - `airds` / `ds_no_attrs`: regular grid with a cell measure, and its
//!   attribute-free twin
//! - `popds`: curvilinear grid with staggered positions
//! - `anc`: ancillary variables
//! - `multiple`: two independent grids
//! - `romsds`: ocean s-coordinate with formula terms
//! - `mollwds`: projected grid with vertices and four-corner bounds
//! - `forecast`: non-CF conventions, decoded on a 360-day calendar
//! - `basin`: flag variable
//! - `ambig`: bounds not named `<coord>_bnds`
//! - `vert`: hybrid sigma-pressure coordinate with bounds on every axis
//!
//! The accessor functions return shared fixtures built on first use. Use
//! [`Catalog::build`] for owned copies built from a custom
//! [`CatalogConfig`].

// The dictionary literals are deep enough for `json!` to need more room.
#![recursion_limit = "256"]

pub mod catalog;
pub mod config;
pub mod datasets;
pub mod error;
pub mod fixtures;
pub mod generators;

pub use catalog::{Catalog, Fixture};
pub use config::{CatalogConfig, ConfigError};
pub use error::{CatalogError, CatalogResult};
pub use fixtures::{
    airds, ambig, anc, basin, ds_no_attrs, forecast, mollwds, multiple, popds, romsds, vert,
};
