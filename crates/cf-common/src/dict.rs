//! Building datasets from nested dictionary literals and dumping them back.
//!
//! The dictionary layout is:
//!
//! ```json
//! {
//!   "coords":    { "<name>": { "dims": [...], "attrs": {...}, "data": [...] } },
//!   "data_vars": { "<name>": { "dims": [...], "attrs": {...}, "data": [...] } },
//!   "attrs":     { ... },
//!   "dims":      { "<dim>": <size> }
//! }
//! ```
//!
//! `data` is a scalar or nested arrays of numbers. An optional `"dtype":
//! "float32"` stores the values as 32-bit floats; otherwise all-integer data
//! becomes `int64` and anything else `float64`.

use ndarray::{ArrayD, IxDyn};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::attrs::Attributes;
use crate::dataset::Dataset;
use crate::error::{CfError, CfResult};
use crate::variable::{Variable, VariableData};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetDict {
    #[serde(default)]
    coords: BTreeMap<String, VariableDict>,
    #[serde(default)]
    data_vars: BTreeMap<String, VariableDict>,
    #[serde(default)]
    attrs: Attributes,
    #[serde(default)]
    dims: BTreeMap<String, usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VariableDict {
    dims: Vec<String>,
    #[serde(default)]
    attrs: Attributes,
    #[serde(default)]
    encoding: Attributes,
    data: Value,
    #[serde(default)]
    dtype: Option<String>,
}

impl Dataset {
    /// Build a dataset from a dictionary literal.
    pub fn from_dict(value: &Value) -> CfResult<Self> {
        let dict = DatasetDict::deserialize(value)?;

        let mut ds = Dataset::new().with_attrs(dict.attrs);
        for (name, var) in dict.coords {
            let var = var.into_variable(&name)?;
            ds.add_coord(name, var)?;
        }
        for (name, var) in dict.data_vars {
            let var = var.into_variable(&name)?;
            ds.add_data_var(name, var)?;
        }

        for (dim, size) in dict.dims {
            match ds.size(&dim) {
                Some(actual) if actual != size => {
                    return Err(CfError::InvalidDict(format!(
                        "dimension '{}' declared with size {} but variables use {}",
                        dim, size, actual
                    )));
                }
                Some(_) => {}
                None => {
                    ds.dims.insert(dim, size);
                }
            }
        }

        tracing::trace!(
            variables = ds.variables().count(),
            dims = ds.dims.len(),
            "Built dataset from dictionary"
        );
        Ok(ds)
    }

    /// Dump the dataset as a dictionary in the layout accepted by
    /// [`Dataset::from_dict`]. With `include_data = false` each variable
    /// carries `shape` and `dtype` instead of `data`.
    ///
    /// Datetimes are written as `YYYY-MM-DD hh:mm:ss` strings, which
    /// `from_dict` does not read back. Dump a dataset before
    /// [`decode_cf`](crate::decode::decode_cf) to get a dictionary that
    /// round-trips.
    pub fn to_dict(&self, include_data: bool) -> Value {
        let section = |vars: &BTreeMap<String, Variable>| -> Value {
            let mut out = Map::new();
            for (name, var) in vars {
                out.insert(name.clone(), variable_to_dict(var, include_data));
            }
            Value::Object(out)
        };

        json!({
            "coords": section(&self.coords),
            "data_vars": section(&self.data_vars),
            "attrs": self.attrs,
            "dims": self.dims,
        })
    }
}

fn variable_to_dict(var: &Variable, include_data: bool) -> Value {
    let mut out = Map::new();
    out.insert("dims".to_string(), json!(var.dims));
    out.insert("attrs".to_string(), json!(var.attrs));
    if !var.encoding.is_empty() {
        out.insert("encoding".to_string(), json!(var.encoding));
    }
    if include_data {
        out.insert("data".to_string(), data_to_value(&var.data));
        if let VariableData::Float32(_) = var.data {
            out.insert("dtype".to_string(), json!("float32"));
        }
    } else {
        out.insert("shape".to_string(), json!(var.shape()));
        out.insert("dtype".to_string(), json!(var.data.dtype()));
    }
    Value::Object(out)
}

impl VariableData {
    /// Values as nested JSON arrays, the `data` form read by
    /// [`Dataset::from_dict`].
    pub fn to_json(&self) -> Value {
        data_to_value(self)
    }
}

fn data_to_value(data: &VariableData) -> Value {
    fn nest<T>(array: &ArrayD<T>, leaf: impl Fn(&T) -> Value) -> Value {
        let shape = array.shape().to_vec();
        let flat: Vec<Value> = array.iter().map(&leaf).collect();
        build_nested(&flat, &shape)
    }

    match data {
        VariableData::Float64(a) => nest(a, |v| float_value(*v)),
        VariableData::Float32(a) => nest(a, |v| float_value(*v as f64)),
        VariableData::Int64(a) => nest(a, |v| json!(v)),
        VariableData::Time(a) => nest(a, |v| json!(v.to_string())),
    }
}

fn float_value(v: f64) -> Value {
    // JSON has no NaN; masked values are written as null.
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn build_nested(flat: &[Value], shape: &[usize]) -> Value {
    match shape.split_first() {
        None => flat.first().cloned().unwrap_or(Value::Null),
        Some((&n, rest)) => {
            let stride: usize = rest.iter().product();
            let items = (0..n)
                .map(|i| build_nested(&flat[i * stride..(i + 1) * stride], rest))
                .collect();
            Value::Array(items)
        }
    }
}

impl VariableDict {
    fn into_variable(self, name: &str) -> CfResult<Variable> {
        let parsed = parse_nested(name, &self.data)?;
        let shape = parsed.shape;

        if shape.len() != self.dims.len() {
            return Err(CfError::RankMismatch {
                variable: name.to_string(),
                dims: self.dims.len(),
                rank: shape.len(),
            });
        }

        let shape_err = |e: ndarray::ShapeError| CfError::ShapeError {
            variable: name.to_string(),
            message: e.to_string(),
        };
        let int_overflow = || {
            CfError::InvalidDict(format!(
                "integer data in '{}' does not fit in int64",
                name
            ))
        };

        let data = match (self.dtype.as_deref(), parsed.ints) {
            (Some("float32"), _) => VariableData::Float32(
                ArrayD::from_shape_vec(
                    IxDyn(&shape),
                    parsed.floats.iter().map(|&v| v as f32).collect(),
                )
                .map_err(shape_err)?,
            ),
            (Some("float64"), _) => VariableData::Float64(
                ArrayD::from_shape_vec(IxDyn(&shape), parsed.floats).map_err(shape_err)?,
            ),
            (Some("int64") | None, Ints::Exact(ints)) => VariableData::Int64(
                ArrayD::from_shape_vec(IxDyn(&shape), ints).map_err(shape_err)?,
            ),
            (Some("int64") | None, Ints::Overflow) => return Err(int_overflow()),
            (Some("int64"), Ints::NotIntegral) => {
                return Err(CfError::InvalidDict(format!(
                    "dtype 'int64' on '{}' needs integer data, found floats or nulls",
                    name
                )))
            }
            (None, Ints::NotIntegral) => VariableData::Float64(
                ArrayD::from_shape_vec(IxDyn(&shape), parsed.floats).map_err(shape_err)?,
            ),
            (Some(other), _) => {
                return Err(CfError::InvalidDict(format!(
                    "unsupported dtype '{}' for variable '{}'",
                    other, name
                )))
            }
        };

        Ok(Variable {
            dims: self.dims,
            data,
            attrs: self.attrs,
            encoding: self.encoding,
        })
    }
}

/// Integer view of a flattened data literal.
enum Ints {
    /// Every element is an integer that fits in `i64`.
    Exact(Vec<i64>),
    /// Every element is an integer but at least one exceeds `i64`.
    Overflow,
    /// Some element is a float or null.
    NotIntegral,
}

struct Flattened {
    shape: Vec<usize>,
    floats: Vec<f64>,
    ints: Ints,
}

/// Infer the shape of nested arrays and flatten them in row-major order.
///
/// Integers are kept exactly alongside the float view so int64 data never
/// passes through `f64`.
fn parse_nested(name: &str, value: &Value) -> CfResult<Flattened> {
    let mut shape = Vec::new();
    let mut head = value;
    while let Value::Array(items) = head {
        shape.push(items.len());
        match items.first() {
            Some(first) => head = first,
            None => break,
        }
    }

    let len = shape.iter().product();
    let mut out = Flattened {
        shape,
        floats: Vec::with_capacity(len),
        ints: Ints::Exact(Vec::with_capacity(len)),
    };
    flatten(name, value, 0, &mut out)?;
    Ok(out)
}

fn flatten(name: &str, value: &Value, depth: usize, out: &mut Flattened) -> CfResult<()> {
    let ragged = || CfError::ShapeError {
        variable: name.to_string(),
        message: format!("ragged nested array at depth {}", depth),
    };

    match value {
        Value::Array(items) => {
            if depth >= out.shape.len() || items.len() != out.shape[depth] {
                return Err(ragged());
            }
            for item in items {
                flatten(name, item, depth + 1, out)?;
            }
            Ok(())
        }
        Value::Number(n) => {
            if depth != out.shape.len() {
                return Err(ragged());
            }
            let v = n.as_f64().ok_or_else(|| CfError::InvalidDict(format!(
                "non-numeric value in '{}'",
                name
            )))?;
            out.floats.push(v);

            let is_integer = n.is_i64() || n.is_u64();
            let next = match (&mut out.ints, n.as_i64()) {
                (Ints::Exact(ints), Some(i)) => {
                    ints.push(i);
                    None
                }
                (Ints::Exact(_), None) if n.is_u64() => Some(Ints::Overflow),
                (Ints::Overflow, _) if is_integer => None,
                (Ints::NotIntegral, _) => None,
                _ => Some(Ints::NotIntegral),
            };
            if let Some(next) = next {
                out.ints = next;
            }
            Ok(())
        }
        Value::Null if depth == out.shape.len() => {
            out.floats.push(f64::NAN);
            out.ints = Ints::NotIntegral;
            Ok(())
        }
        other => Err(CfError::InvalidDict(format!(
            "unsupported data element in '{}': {}",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dict_infers_types() {
        let ds = Dataset::from_dict(&json!({
            "coords": {
                "x": {"dims": ["x"], "data": [0, 1, 2]},
                "y": {"dims": ["y"], "data": [0.0, 0.5]},
            },
            "data_vars": {
                "v": {"dims": ["x", "y"], "data": [[1, 2], [3, 4], [5, 6]], "dtype": "float32"},
                "s": {"dims": [], "data": 1e-3},
            },
            "attrs": {"Conventions": "CF-1.7"},
            "dims": {"x": 3, "y": 2},
        }))
        .unwrap();

        assert!(ds.get("x").unwrap().data.as_i64().is_some());
        assert!(ds.get("y").unwrap().data.as_f64().is_some());
        assert_eq!(ds.get("v").unwrap().data.as_f32().unwrap().shape(), &[3, 2]);
        assert_eq!(ds.get("s").unwrap().shape(), &[] as &[usize]);
        assert_eq!(ds.attrs["Conventions"].as_str(), Some("CF-1.7"));
    }

    #[test]
    fn test_from_dict_ragged() {
        let result = Dataset::from_dict(&json!({
            "data_vars": {"v": {"dims": ["a", "b"], "data": [[1, 2], [3]]}},
        }));
        assert!(matches!(result, Err(CfError::ShapeError { .. })));
    }

    #[test]
    fn test_from_dict_declared_dim_mismatch() {
        let result = Dataset::from_dict(&json!({
            "coords": {"x": {"dims": ["x"], "data": [0, 1]}},
            "dims": {"x": 3},
        }));
        assert!(matches!(result, Err(CfError::InvalidDict(_))));
    }

    #[test]
    fn test_from_dict_rank_mismatch() {
        let result = Dataset::from_dict(&json!({
            "coords": {"x": {"dims": ["x", "y"], "data": [0, 1]}},
        }));
        assert!(matches!(result, Err(CfError::RankMismatch { .. })));
    }

    #[test]
    fn test_from_dict_unknown_section() {
        let result = Dataset::from_dict(&json!({ "variables": {} }));
        assert!(matches!(result, Err(CfError::InvalidDict(_))));
    }

    #[test]
    fn test_from_dict_keeps_large_integers_exact() {
        let ds = Dataset::from_dict(&json!({
            "data_vars": {"id": {"dims": ["n"], "data": [9_007_199_254_740_993i64, i64::MAX, i64::MIN]}},
        }))
        .unwrap();
        let ids = ds.get("id").unwrap().data.as_i64().unwrap();
        assert_eq!(ids[[0]], 9_007_199_254_740_993);
        assert_eq!(ids[[1]], i64::MAX);
        assert_eq!(ids[[2]], i64::MIN);

        let again = Dataset::from_dict(&ds.to_dict(true)).unwrap();
        assert_eq!(ds, again);
    }

    #[test]
    fn test_from_dict_integer_overflow() {
        let result = Dataset::from_dict(&json!({
            "data_vars": {"id": {"dims": ["n"], "data": [1, u64::MAX]}},
        }));
        assert!(matches!(result, Err(CfError::InvalidDict(msg)) if msg.contains("int64")));

        // An explicit float dtype accepts the same literal.
        let ds = Dataset::from_dict(&json!({
            "data_vars": {"id": {"dims": ["n"], "data": [1, u64::MAX], "dtype": "float64"}},
        }))
        .unwrap();
        assert!(ds.get("id").unwrap().data.as_f64().is_some());
    }

    #[test]
    fn test_from_dict_int64_dtype_on_floats() {
        let result = Dataset::from_dict(&json!({
            "data_vars": {"v": {"dims": ["n"], "data": [1, 2.5], "dtype": "int64"}},
        }));
        match result {
            Err(CfError::InvalidDict(msg)) => {
                assert!(msg.contains("needs integer data"), "unexpected message: {}", msg);
                assert!(!msg.contains("unsupported"));
            }
            other => panic!("expected InvalidDict, got {:?}", other),
        }

        let ds = Dataset::from_dict(&json!({
            "data_vars": {"v": {"dims": ["n"], "data": [1, 2], "dtype": "int64"}},
        }))
        .unwrap();
        assert!(ds.get("v").unwrap().data.as_i64().is_some());
    }

    #[test]
    fn test_decoded_times_dump_as_strings() {
        let raw = Dataset::from_dict(&json!({
            "coords": {"t": {"dims": ["t"], "attrs": {"units": "days since 2000-01-01"}, "data": [0, 1]}},
        }))
        .unwrap();
        let decoded = crate::decode::decode_cf(&raw).unwrap();
        let dumped = decoded.to_dict(true);
        assert_eq!(dumped["coords"]["t"]["data"], json!(["2000-01-01 00:00:00", "2000-01-02 00:00:00"]));
        assert!(Dataset::from_dict(&dumped).is_err());

        // The undecoded form round-trips.
        assert_eq!(Dataset::from_dict(&raw.to_dict(true)).unwrap(), raw);
    }

    #[test]
    fn test_to_dict_roundtrip() {
        let source = json!({
            "coords": {"lat": {"dims": ["lat"], "attrs": {"units": "degrees_north"}, "data": [0.0, 1.0]}},
            "data_vars": {"ps": {"dims": ["lat"], "data": [1.0, 1.0], "dtype": "float32"}},
            "attrs": {},
            "dims": {"lat": 2},
        });
        let ds = Dataset::from_dict(&source).unwrap();
        let again = Dataset::from_dict(&ds.to_dict(true)).unwrap();
        assert_eq!(ds, again);

        assert_eq!(
            ds.get("lat").unwrap().data.to_json(),
            json!([0.0, 1.0])
        );

        let schema = ds.to_dict(false);
        assert_eq!(schema["data_vars"]["ps"]["shape"], json!([2]));
        assert_eq!(schema["data_vars"]["ps"]["dtype"], json!("float32"));
    }
}
