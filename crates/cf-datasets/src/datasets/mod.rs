//! Fixture builders, one module per sample dataset.
//!
//! Every builder constructs its dataset from literals or closed-form
//! transforms; an error means the literal itself is malformed.

pub mod air;
pub mod ambiguous;
pub mod ancillary;
pub mod basin;
pub mod forecast;
pub mod mollweide;
pub mod multiple;
pub mod pop;
pub mod roms;
pub mod vert;
