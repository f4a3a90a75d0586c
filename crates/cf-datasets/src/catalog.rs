//! The set of sample datasets, built together from one configuration.

use std::borrow::Cow;

use cf_common::{Dataset, NamedArray};
use tracing::debug;

use crate::config::CatalogConfig;
use crate::datasets::{
    air, ambiguous, ancillary, basin, forecast, mollweide, multiple, pop, roms, vert,
};
use crate::error::{CatalogError, CatalogResult};

/// Fixture names in catalog order.
pub const NAMES: [&str; 11] = [
    air::NAME,
    air::NO_ATTRS_NAME,
    pop::NAME,
    ancillary::NAME,
    multiple::NAME,
    roms::NAME,
    mollweide::NAME,
    forecast::NAME,
    basin::NAME,
    ambiguous::NAME,
    vert::NAME,
];

/// A catalog entry: every fixture is a dataset except `basin`.
#[derive(Debug, Clone, Copy)]
pub enum Fixture<'a> {
    Dataset(&'a Dataset),
    Array(&'a NamedArray),
}

impl<'a> Fixture<'a> {
    /// View the fixture as a dataset. A named array becomes a dataset
    /// holding it as its only data variable.
    pub fn to_dataset(&self) -> CatalogResult<Cow<'a, Dataset>> {
        match *self {
            Fixture::Dataset(ds) => Ok(Cow::Borrowed(ds)),
            Fixture::Array(array) => Ok(Cow::Owned(array.to_dataset()?)),
        }
    }
}

/// Owned copies of every sample dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub airds: Dataset,
    pub ds_no_attrs: Dataset,
    pub popds: Dataset,
    pub anc: Dataset,
    pub multiple: Dataset,
    pub romsds: Dataset,
    pub mollwds: Dataset,
    pub forecast: Dataset,
    pub basin: NamedArray,
    pub ambig: Dataset,
    pub vert: Dataset,
}

impl Catalog {
    /// Build every fixture.
    pub fn build(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let airds = logged(air::NAME, air::build(config)?);
        let ds_no_attrs = logged(air::NO_ATTRS_NAME, air::build_no_attrs(&airds));
        let basin = basin::build()?;
        debug!(
            dataset = basin::NAME,
            len = basin.variable.data.len(),
            "Built sample array"
        );

        Ok(Self {
            airds,
            ds_no_attrs,
            popds: logged(pop::NAME, pop::build()?),
            anc: logged(ancillary::NAME, ancillary::build(config)?),
            multiple: logged(multiple::NAME, multiple::build()?),
            romsds: logged(roms::NAME, roms::build(config)?),
            mollwds: logged(mollweide::NAME, mollweide::build()?),
            forecast: logged(forecast::NAME, forecast::build()?),
            basin,
            ambig: logged(ambiguous::NAME, ambiguous::build()?),
            vert: logged(vert::NAME, vert::build()?),
        })
    }

    /// Fixture names in catalog order.
    pub fn names() -> &'static [&'static str] {
        &NAMES
    }

    /// Look up a fixture by name.
    pub fn get(&self, name: &str) -> CatalogResult<Fixture<'_>> {
        let fixture = match name {
            air::NAME => Fixture::Dataset(&self.airds),
            air::NO_ATTRS_NAME => Fixture::Dataset(&self.ds_no_attrs),
            pop::NAME => Fixture::Dataset(&self.popds),
            ancillary::NAME => Fixture::Dataset(&self.anc),
            multiple::NAME => Fixture::Dataset(&self.multiple),
            roms::NAME => Fixture::Dataset(&self.romsds),
            mollweide::NAME => Fixture::Dataset(&self.mollwds),
            forecast::NAME => Fixture::Dataset(&self.forecast),
            basin::NAME => Fixture::Array(&self.basin),
            ambiguous::NAME => Fixture::Dataset(&self.ambig),
            vert::NAME => Fixture::Dataset(&self.vert),
            other => return Err(CatalogError::UnknownDataset(other.to_string())),
        };
        Ok(fixture)
    }

    /// Iterate over `(name, fixture)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Fixture<'_>)> + '_ {
        NAMES
            .iter()
            .filter_map(move |&name| self.get(name).ok().map(|fixture| (name, fixture)))
    }
}

fn logged(name: &str, ds: Dataset) -> Dataset {
    debug!(
        dataset = name,
        variables = ds.variables().count(),
        dims = ds.dims.len(),
        "Built sample dataset"
    );
    ds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_names_resolve() {
        let catalog = Catalog::build(&CatalogConfig::default()).unwrap();
        for name in Catalog::names() {
            assert!(catalog.get(name).is_ok(), "{} did not resolve", name);
        }
        assert_eq!(catalog.iter().count(), NAMES.len());
    }

    #[test]
    fn test_unknown_name() {
        let catalog = Catalog::build(&CatalogConfig::default()).unwrap();
        assert!(matches!(
            catalog.get("rasm"),
            Err(CatalogError::UnknownDataset(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = CatalogConfig {
            air_time_steps: 0,
            ..Default::default()
        };
        assert!(matches!(
            Catalog::build(&config),
            Err(CatalogError::Config(ConfigError::OutOfRange { .. }))
        ));
    }

    #[test]
    fn test_basin_as_dataset() {
        let catalog = Catalog::build(&CatalogConfig::default()).unwrap();
        let ds = catalog.get("basin").unwrap().to_dataset().unwrap();
        assert!(matches!(ds, Cow::Owned(_)));
        assert_eq!(ds.size("time"), Some(10));
    }
}
