//! Attribute values attached to variables and datasets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered attribute mapping (attribute name -> value).
pub type Attributes = BTreeMap<String, AttrValue>;

/// A single metadata attribute value.
///
/// Mirrors the value types NetCDF attributes can carry: text, scalar numbers
/// and 1-D numeric lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Int(i64),
    Float(f64),
    Str(String),
    IntList(Vec<i64>),
    FloatList(Vec<f64>),
}

impl AttrValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of a scalar attribute.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Int(v) => Some(*v as f64),
            AttrValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of a scalar or list attribute as a list.
    pub fn to_f64_list(&self) -> Option<Vec<f64>> {
        match self {
            AttrValue::Int(v) => Some(vec![*v as f64]),
            AttrValue::Float(v) => Some(vec![*v]),
            AttrValue::IntList(v) => Some(v.iter().map(|&x| x as f64).collect()),
            AttrValue::FloatList(v) => Some(v.clone()),
            AttrValue::Str(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{:?}", v),
            AttrValue::Str(s) => write!(f, "\"{}\"", s),
            AttrValue::IntList(v) => {
                let parts: Vec<String> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "{}", parts.join(", "))
            }
            AttrValue::FloatList(v) => {
                let parts: Vec<String> = v.iter().map(|x| format!("{:?}", x)).collect();
                write!(f, "{}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<Vec<i64>> for AttrValue {
    fn from(v: Vec<i64>) -> Self {
        AttrValue::IntList(v)
    }
}

impl From<Vec<f64>> for AttrValue {
    fn from(v: Vec<f64>) -> Self {
        AttrValue::FloatList(v)
    }
}

/// Build an [`Attributes`] map from `key => value` pairs.
///
/// ```
/// use cf_common::attrs;
///
/// let a = attrs! { "units" => "degrees_north", "valid_min" => -90.0 };
/// assert_eq!(a.len(), 2);
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Attributes::new();
        $(
            map.insert(($key).to_string(), $crate::AttrValue::from($value));
        )+
        map
    }};
}
