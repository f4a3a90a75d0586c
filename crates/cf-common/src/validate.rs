//! Consistency checks for datasets: dimension extents and metadata
//! cross-references.

use serde::Serialize;
use std::fmt;

use crate::dataset::Dataset;

/// Attributes whose values name other variables.
pub const REFERENCE_ATTRIBUTES: [&str; 5] = [
    "bounds",
    "coordinates",
    "ancillary_variables",
    "cell_measures",
    "formula_terms",
];

/// Category of a consistency problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Variable extent differs from the dataset's dimension map
    DimensionMismatch,
    /// Variable uses a dimension the dataset does not record
    UnknownDimension,
    /// Attribute names a variable that does not exist
    DanglingReference,
    /// Encoding and attributes disagree on a cross-reference
    EncodingDivergence,
}

/// A single consistency problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsistencyIssue {
    pub kind: IssueKind,
    pub variable: String,
    pub attribute: Option<String>,
    pub message: String,
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attr) => write!(f, "{}.{}: {}", self.variable, attr, self.message),
            None => write!(f, "{}: {}", self.variable, self.message),
        }
    }
}

/// Names referenced by a cross-reference attribute.
///
/// `bounds` holds a single name; `coordinates` and `ancillary_variables` are
/// whitespace-separated lists; `cell_measures` and `formula_terms` are
/// `key: name` pairs, of which the names are returned.
pub fn parse_references(attribute: &str, value: &str) -> Vec<String> {
    match attribute {
        "bounds" => {
            let name = value.trim();
            if name.is_empty() {
                Vec::new()
            } else {
                vec![name.to_string()]
            }
        }
        "coordinates" | "ancillary_variables" => {
            value.split_whitespace().map(str::to_string).collect()
        }
        "cell_measures" | "formula_terms" => value
            .split_whitespace()
            .filter(|token| !token.ends_with(':'))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Check every variable's extents against the dataset's dimension map.
pub fn check_dimensions(ds: &Dataset) -> Vec<ConsistencyIssue> {
    let mut issues = Vec::new();
    for (name, var) in ds.variables() {
        if var.dims.len() != var.data.ndim() {
            issues.push(ConsistencyIssue {
                kind: IssueKind::DimensionMismatch,
                variable: name.to_string(),
                attribute: None,
                message: format!(
                    "{} dimensions declared for data of rank {}",
                    var.dims.len(),
                    var.data.ndim()
                ),
            });
            continue;
        }
        for (dim, size) in var.sizes() {
            match ds.size(dim) {
                None => issues.push(ConsistencyIssue {
                    kind: IssueKind::UnknownDimension,
                    variable: name.to_string(),
                    attribute: None,
                    message: format!("dimension '{}' is not recorded", dim),
                }),
                Some(expected) if expected != size => issues.push(ConsistencyIssue {
                    kind: IssueKind::DimensionMismatch,
                    variable: name.to_string(),
                    attribute: None,
                    message: format!("dimension '{}' has size {} but dataset says {}", dim, size, expected),
                }),
                Some(_) => {}
            }
        }
    }
    issues
}

/// Check that every cross-reference attribute names an existing variable.
pub fn check_references(ds: &Dataset) -> Vec<ConsistencyIssue> {
    let mut issues = Vec::new();
    for (name, var) in ds.variables() {
        for attribute in REFERENCE_ATTRIBUTES {
            let Some(value) = var.attr_str(attribute) else {
                continue;
            };
            for target in parse_references(attribute, value) {
                if !ds.contains(&target) {
                    issues.push(ConsistencyIssue {
                        kind: IssueKind::DanglingReference,
                        variable: name.to_string(),
                        attribute: Some(attribute.to_string()),
                        message: format!("references missing variable '{}'", target),
                    });
                }
            }
        }
    }
    issues
}

/// Report variables whose encoding carries a cross-reference attribute that
/// differs from the attribute of the same name.
///
/// Not part of [`check_consistency`]: a divergence can be deliberate.
pub fn check_encoding(ds: &Dataset) -> Vec<ConsistencyIssue> {
    let mut issues = Vec::new();
    for (name, var) in ds.variables() {
        for attribute in REFERENCE_ATTRIBUTES {
            let (Some(encoded), Some(declared)) = (
                var.encoding.get(attribute).and_then(|v| v.as_str()),
                var.attr_str(attribute),
            ) else {
                continue;
            };
            if encoded != declared {
                issues.push(ConsistencyIssue {
                    kind: IssueKind::EncodingDivergence,
                    variable: name.to_string(),
                    attribute: Some(attribute.to_string()),
                    message: format!("encoding says '{}' but attribute says '{}'", encoded, declared),
                });
            }
        }
    }
    issues
}

/// Run all checks.
pub fn check_consistency(ds: &Dataset) -> Vec<ConsistencyIssue> {
    let mut issues = check_dimensions(ds);
    issues.extend(check_references(ds));
    issues
}

/// Find the bounds variable of a coordinate.
///
/// Uses the `bounds` attribute when it names an existing variable, otherwise
/// falls back to the common `<name>_bnds` and `<name>_bounds` spellings.
pub fn find_bounds<'a>(ds: &'a Dataset, coord: &str) -> Option<&'a str> {
    if let Some(var) = ds.variable(coord) {
        if let Some(target) = var.attr_str("bounds") {
            if let Some((name, _)) = ds.variables().find(|(name, _)| *name == target) {
                return Some(name);
            }
        }
    }
    [format!("{}_bnds", coord), format!("{}_bounds", coord)]
        .iter()
        .find_map(|candidate| {
            ds.variables()
                .find(|(name, _)| *name == candidate.as_str())
                .map(|(name, _)| name)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use crate::variable::Variable;
    use ndarray::{Array1, Array2};

    #[test]
    fn test_parse_references() {
        assert_eq!(parse_references("bounds", "lat_bnds"), vec!["lat_bnds"]);
        assert_eq!(
            parse_references("coordinates", "ULONG ULAT"),
            vec!["ULONG", "ULAT"]
        );
        assert_eq!(
            parse_references("cell_measures", "area: cell_area"),
            vec!["cell_area"]
        );
        assert_eq!(
            parse_references("formula_terms", "s: s_rho C: Cs_r eta: zeta depth: h depth_c: hc"),
            vec!["s_rho", "Cs_r", "zeta", "h", "hc"]
        );
        assert!(parse_references("units", "K").is_empty());
    }

    fn dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.add_coord(
            "lat",
            Variable::new(&["lat"], Array1::<f64>::zeros(3))
                .unwrap()
                .with_attrs(attrs! { "bounds" => "lat_bnds" }),
        )
        .unwrap();
        ds.add_coord(
            "lat_bnds",
            Variable::new(&["lat", "bnds"], Array2::<f64>::zeros((3, 2))).unwrap(),
        )
        .unwrap();
        ds
    }

    #[test]
    fn test_clean_dataset() {
        assert!(check_consistency(&dataset()).is_empty());
    }

    #[test]
    fn test_dangling_reference() {
        let mut ds = dataset();
        ds.add_data_var(
            "q",
            Variable::new(&["lat"], Array1::<f64>::zeros(3))
                .unwrap()
                .with_attrs(attrs! { "ancillary_variables" => "q_error_limit" }),
        )
        .unwrap();
        let issues = check_references(&ds);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::DanglingReference);
        assert_eq!(issues[0].to_string(), "q.ancillary_variables: references missing variable 'q_error_limit'");
    }

    #[test]
    fn test_dimension_mismatch_detected() {
        let mut ds = dataset();
        // Bypass the checked insert to simulate a hand-edited dataset.
        ds.dims.insert("lat".to_string(), 4);
        let issues = check_dimensions(&ds);
        assert!(issues.iter().all(|i| i.kind == IssueKind::DimensionMismatch));
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_encoding_divergence() {
        let mut ds = dataset();
        ds.add_data_var(
            "t",
            Variable::new(&["lat"], Array1::<f64>::zeros(3))
                .unwrap()
                .with_attrs(attrs! { "coordinates" => "lat_bnds" })
                .with_encoding(attrs! { "coordinates" => "lat" }),
        )
        .unwrap();
        let issues = check_encoding(&ds);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::EncodingDivergence);
        assert!(check_consistency(&ds).is_empty());
    }

    #[test]
    fn test_find_bounds() {
        let ds = dataset();
        assert_eq!(find_bounds(&ds, "lat"), Some("lat_bnds"));
        assert_eq!(find_bounds(&ds, "lon"), None);
    }
}
