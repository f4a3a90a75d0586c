//! Closed-form map projections for building curvilinear sample grids.
//!
//! Only the inverse direction (planar to geographic) is needed to build a
//! grid; forward transforms are provided for checking round trips.

pub mod mollweide;

pub use mollweide::Mollweide;

use thiserror::Error;

/// Errors raised by projection transforms.
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// Planar point lies outside the projection's valid domain
    #[error("Point ({x}, {y}) is outside the projection domain")]
    OutOfDomain { x: f64, y: f64 },

    /// Input grids of different shapes
    #[error("Grid shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),
}
