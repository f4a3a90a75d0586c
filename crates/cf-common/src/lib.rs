//! Common types shared across the CF sample-dataset workspace.
//!
//! Provides a small labeled-array model (named dimensions, coordinate and data
//! variables, attributes) together with the CF convention helpers the sample
//! catalog is built from:
//! - Dictionary construction (`Dataset::from_dict`)
//! - CF decoding (masking, unpacking, calendar-aware time decoding)
//! - Corner bounds for curvilinear grids
//! - Consistency checks for dimensions and metadata cross-references
//! - ncdump-style headers (`Dataset::header`)

pub mod attrs;
pub mod bounds;
pub mod dataset;
pub mod decode;
pub mod dict;
pub mod error;
pub mod header;
pub mod time;
pub mod validate;
pub mod variable;

pub use attrs::{AttrValue, Attributes};
pub use bounds::{bounds_to_vertices, vertices_to_bounds};
pub use dataset::Dataset;
pub use decode::{decode_cf, decode_variable};
pub use error::{CfError, CfResult};
pub use time::{Calendar, CfDatetime, TimeUnits};
pub use validate::{
    check_consistency, check_dimensions, check_encoding, check_references, find_bounds,
    parse_references, ConsistencyIssue, IssueKind,
};
pub use variable::{DataType, NamedArray, Variable, VariableData};
