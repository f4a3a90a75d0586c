//! Variables: named dimensions, an n-dimensional array and metadata.

use ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::attrs::{AttrValue, Attributes};
use crate::dataset::Dataset;
use crate::error::{CfError, CfResult};
use crate::time::CfDatetime;

/// Element type of a variable's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Float64,
    Float32,
    Int64,
    Datetime,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Float64 => "double",
            DataType::Float32 => "float",
            DataType::Int64 => "int64",
            DataType::Datetime => "datetime",
        };
        write!(f, "{}", name)
    }
}

/// Array storage for a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableData {
    Float64(ArrayD<f64>),
    Float32(ArrayD<f32>),
    Int64(ArrayD<i64>),
    Time(ArrayD<CfDatetime>),
}

impl VariableData {
    /// 0-d float64 array.
    pub fn scalar(value: f64) -> Self {
        VariableData::Float64(ArrayD::from_elem(IxDyn(&[]), value))
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            VariableData::Float64(a) => a.shape(),
            VariableData::Float32(a) => a.shape(),
            VariableData::Int64(a) => a.shape(),
            VariableData::Time(a) => a.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DataType {
        match self {
            VariableData::Float64(_) => DataType::Float64,
            VariableData::Float32(_) => DataType::Float32,
            VariableData::Int64(_) => DataType::Int64,
            VariableData::Time(_) => DataType::Datetime,
        }
    }

    /// Numeric values widened to f64. `None` for datetimes.
    pub fn to_f64(&self) -> Option<ArrayD<f64>> {
        match self {
            VariableData::Float64(a) => Some(a.clone()),
            VariableData::Float32(a) => Some(a.mapv(|v| v as f64)),
            VariableData::Int64(a) => Some(a.mapv(|v| v as f64)),
            VariableData::Time(_) => None,
        }
    }

    pub fn as_f64(&self) -> Option<&ArrayD<f64>> {
        match self {
            VariableData::Float64(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<&ArrayD<f32>> {
        match self {
            VariableData::Float32(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<&ArrayD<i64>> {
        match self {
            VariableData::Int64(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&ArrayD<CfDatetime>> {
        match self {
            VariableData::Time(a) => Some(a),
            _ => None,
        }
    }
}

impl<D: ndarray::Dimension> From<ndarray::Array<f64, D>> for VariableData {
    fn from(a: ndarray::Array<f64, D>) -> Self {
        VariableData::Float64(a.into_dyn())
    }
}

impl<D: ndarray::Dimension> From<ndarray::Array<f32, D>> for VariableData {
    fn from(a: ndarray::Array<f32, D>) -> Self {
        VariableData::Float32(a.into_dyn())
    }
}

impl<D: ndarray::Dimension> From<ndarray::Array<i64, D>> for VariableData {
    fn from(a: ndarray::Array<i64, D>) -> Self {
        VariableData::Int64(a.into_dyn())
    }
}

impl<D: ndarray::Dimension> From<ndarray::Array<CfDatetime, D>> for VariableData {
    fn from(a: ndarray::Array<CfDatetime, D>) -> Self {
        VariableData::Time(a.into_dyn())
    }
}

/// A named-dimension array with attributes and encoding hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub dims: Vec<String>,
    pub data: VariableData,
    pub attrs: Attributes,
    /// Storage-level hints kept apart from `attrs` (e.g. an encoding-level
    /// `coordinates` string, or `units`/`calendar` after time decoding).
    pub encoding: Attributes,
}

impl Variable {
    /// Create a variable, checking that the data rank matches `dims`.
    pub fn new<S: AsRef<str>>(dims: &[S], data: impl Into<VariableData>) -> CfResult<Self> {
        let data = data.into();
        let dims: Vec<String> = dims.iter().map(|d| d.as_ref().to_string()).collect();
        if dims.len() != data.ndim() {
            return Err(CfError::RankMismatch {
                variable: String::new(),
                dims: dims.len(),
                rank: data.ndim(),
            });
        }
        Ok(Self {
            dims,
            data,
            attrs: Attributes::new(),
            encoding: Attributes::new(),
        })
    }

    /// A 0-d float64 variable.
    pub fn scalar(value: f64) -> Self {
        Self {
            dims: Vec::new(),
            data: VariableData::scalar(value),
            attrs: Attributes::new(),
            encoding: Attributes::new(),
        }
    }

    pub fn with_attrs(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    pub fn with_encoding(mut self, encoding: Attributes) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(AttrValue::as_str)
    }

    /// Pair each dimension name with its extent.
    pub fn sizes(&self) -> impl Iterator<Item = (&str, usize)> {
        self.dims
            .iter()
            .map(String::as_str)
            .zip(self.data.shape().iter().copied())
    }
}

/// A standalone named variable, the counterpart of a dataset-less data array.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedArray {
    pub name: String,
    pub variable: Variable,
}

impl NamedArray {
    pub fn new(name: impl Into<String>, variable: Variable) -> Self {
        Self {
            name: name.into(),
            variable,
        }
    }

    /// Wrap the array in a dataset holding it as its only data variable.
    pub fn to_dataset(&self) -> CfResult<Dataset> {
        let mut ds = Dataset::new();
        ds.add_data_var(self.name.clone(), self.variable.clone())?;
        Ok(ds)
    }

    /// Pair each `flag_values` entry with the matching `flag_meanings` token.
    pub fn flags(&self) -> CfResult<Vec<(i64, String)>> {
        let values = match self.variable.attr("flag_values") {
            Some(AttrValue::IntList(v)) => v.clone(),
            Some(AttrValue::Int(v)) => vec![*v],
            Some(_) => {
                return Err(CfError::InvalidAttribute {
                    variable: self.name.clone(),
                    attr: "flag_values".to_string(),
                    message: "expected integer flag values".to_string(),
                })
            }
            None => return Err(CfError::VariableNotFound(format!("{}.flag_values", self.name))),
        };
        let meanings: Vec<String> = self
            .variable
            .attr_str("flag_meanings")
            .ok_or_else(|| CfError::InvalidAttribute {
                variable: self.name.clone(),
                attr: "flag_meanings".to_string(),
                message: "missing or not a string".to_string(),
            })?
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if values.len() != meanings.len() {
            return Err(CfError::FlagMismatch {
                variable: self.name.clone(),
                values: values.len(),
                meanings: meanings.len(),
            });
        }
        Ok(values.into_iter().zip(meanings).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;
    use ndarray::{arr1, Array2};

    #[test]
    fn test_rank_mismatch() {
        let result = Variable::new(&["x"], Array2::<f64>::zeros((2, 3)));
        assert!(matches!(result, Err(CfError::RankMismatch { dims: 1, rank: 2, .. })));
    }

    #[test]
    fn test_sizes() {
        let var = Variable::new(&["x", "y"], Array2::<f32>::zeros((2, 3))).unwrap();
        let sizes: Vec<_> = var.sizes().collect();
        assert_eq!(sizes, vec![("x", 2), ("y", 3)]);
        assert_eq!(var.data.dtype(), DataType::Float32);
    }

    #[test]
    fn test_flags_mismatch() {
        let var = Variable::new(&["time"], arr1(&[1i64, 2]))
            .unwrap()
            .with_attrs(attrs! {
                "flag_values" => vec![1i64, 2],
                "flag_meanings" => "only_one",
            });
        let named = NamedArray::new("region", var);
        assert!(matches!(
            named.flags(),
            Err(CfError::FlagMismatch { values: 2, meanings: 1, .. })
        ));
    }

    #[test]
    fn test_named_array_to_dataset() {
        let var = Variable::new(&["time"], arr1(&[1i64, 2, 3])).unwrap();
        let ds = NamedArray::new("basin", var).to_dataset().unwrap();
        assert_eq!(ds.data_var_names(), vec!["basin"]);
        assert_eq!(ds.size("time"), Some(3));
    }

    #[test]
    fn test_scalar_is_zero_dimensional() {
        let var = Variable::scalar(20.0);
        assert!(var.dims.is_empty());
        assert_eq!(var.data.len(), 1);
        assert_eq!(var.data.ndim(), 0);
    }
}
