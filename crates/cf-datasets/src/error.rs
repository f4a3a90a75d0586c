//! Error types for catalog construction.

use cf_common::CfError;
use projection::ProjectionError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error types for building sample datasets.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Invalid catalog configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Malformed fixture literal (shapes, dimensions, dictionary structure)
    #[error("Dataset construction failed: {0}")]
    Dataset(#[from] CfError),

    /// Projection of a fixture grid failed
    #[error("Projection failed: {0}")]
    Projection(#[from] ProjectionError),

    /// Fixture name not in the catalog
    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}
