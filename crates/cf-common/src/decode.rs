//! CF decoding: masking, unpacking, time decoding and coordinate promotion.
//!
//! Encoding attributes consumed by a step are moved from `attrs` into the
//! variable's `encoding`, so a decoded dataset still records how it was
//! stored.

use ndarray::ArrayD;
use tracing::debug;

use crate::attrs::AttrValue;
use crate::dataset::Dataset;
use crate::error::{CfError, CfResult};
use crate::time::{Calendar, TimeUnits};
use crate::variable::{Variable, VariableData};

const FILL_ATTRS: [&str; 2] = ["_FillValue", "missing_value"];

/// Decode every variable of a dataset according to CF conventions.
///
/// Steps, in order, per variable:
/// 1. `_FillValue` / `missing_value` entries become NaN.
/// 2. `scale_factor` / `add_offset` are applied.
/// 3. `units` of the form `<unit> since <date>` turn the values into
///    datetimes in the variable's `calendar`.
///
/// Datetimes have no missing value, so a time variable whose offsets are
/// masked to NaN (or are otherwise non-finite) fails with
/// [`CfError::InvalidTimeUnits`] instead of decoding.
///
/// Finally, names listed in a data variable's `coordinates` attribute are
/// promoted to coordinates and the attribute moves to the encoding.
pub fn decode_cf(ds: &Dataset) -> CfResult<Dataset> {
    let mut out = Dataset::new().with_attrs(ds.attrs.clone());

    for (name, var) in &ds.coords {
        out.add_coord(name.clone(), decode_variable(name, var)?)?;
    }
    for (name, var) in &ds.data_vars {
        out.add_data_var(name.clone(), decode_variable(name, var)?)?;
    }
    for (dim, &size) in &ds.dims {
        out.dims.entry(dim.clone()).or_insert(size);
    }

    decode_coordinates(&mut out)?;
    Ok(out)
}

/// Decode a single variable (masking, unpacking, time decoding).
pub fn decode_variable(name: &str, var: &Variable) -> CfResult<Variable> {
    let mut var = var.clone();
    mask_fill_values(name, &mut var)?;
    unpack(&mut var);
    decode_times(name, &mut var)?;
    Ok(var)
}

fn take_attr(var: &mut Variable, key: &str) -> Option<AttrValue> {
    let value = var.attrs.remove(key)?;
    var.encoding.insert(key.to_string(), value.clone());
    Some(value)
}

fn mask_fill_values(name: &str, var: &mut Variable) -> CfResult<()> {
    if matches!(var.data, VariableData::Time(_)) {
        return Ok(());
    }
    let mut fills = Vec::new();
    for key in FILL_ATTRS {
        if let Some(value) = take_attr(var, key) {
            let values = value.to_f64_list().ok_or_else(|| CfError::InvalidAttribute {
                variable: name.to_string(),
                attr: key.to_string(),
                message: "expected a numeric fill value".to_string(),
            })?;
            fills.extend(values);
        }
    }
    if fills.is_empty() {
        return Ok(());
    }

    let is_fill = |v: f64| fills.iter().any(|&f| v == f || (v.is_nan() && f.is_nan()));
    var.data = match &var.data {
        VariableData::Float64(a) => {
            VariableData::Float64(a.mapv(|v| if is_fill(v) { f64::NAN } else { v }))
        }
        VariableData::Float32(a) => {
            // Compare at storage precision: 1e20 as f32 is not 1e20 as f64.
            let fills32: Vec<f32> = fills.iter().map(|&f| f as f32).collect();
            VariableData::Float32(a.mapv(|v| {
                if fills32.iter().any(|&f| v == f || (v.is_nan() && f.is_nan())) {
                    f32::NAN
                } else {
                    v
                }
            }))
        }
        // Integers cannot hold NaN, so masking widens them.
        VariableData::Int64(a) => VariableData::Float64(a.mapv(|v| {
            let v = v as f64;
            if is_fill(v) {
                f64::NAN
            } else {
                v
            }
        })),
        VariableData::Time(a) => VariableData::Time(a.clone()),
    };
    debug!(variable = name, fill_values = ?fills, "Masked fill values");
    Ok(())
}

fn unpack(var: &mut Variable) {
    let scale = var.attrs.get("scale_factor").and_then(AttrValue::as_f64);
    let offset = var.attrs.get("add_offset").and_then(AttrValue::as_f64);
    if scale.is_none() && offset.is_none() {
        return;
    }
    take_attr(var, "scale_factor");
    take_attr(var, "add_offset");

    let scale = scale.unwrap_or(1.0);
    let offset = offset.unwrap_or(0.0);
    if let Some(values) = var.data.to_f64() {
        var.data = VariableData::Float64(values.mapv(|v| v * scale + offset));
    }
}

fn decode_times(name: &str, var: &mut Variable) -> CfResult<()> {
    let units = match var.attr_str("units") {
        Some(units) if TimeUnits::is_time_units(units) => units.to_string(),
        _ => return Ok(()),
    };
    let calendar = match var.attr_str("calendar") {
        Some(cal) => Calendar::parse(cal)?,
        None => Calendar::default(),
    };
    let parsed = TimeUnits::parse(&units, calendar)?;

    let values = var.data.to_f64().ok_or_else(|| CfError::InvalidAttribute {
        variable: name.to_string(),
        attr: "units".to_string(),
        message: "time units on non-numeric data".to_string(),
    })?;
    let decoded = values
        .iter()
        .map(|&v| parsed.decode(v))
        .collect::<CfResult<Vec<_>>>()?;
    var.data = VariableData::Time(ArrayD::from_shape_vec(values.raw_dim(), decoded)?);

    take_attr(var, "units");
    take_attr(var, "calendar");
    debug!(variable = name, units = %units, calendar = calendar.name(), "Decoded time variable");
    Ok(())
}

/// Promote variables named in `coordinates` attributes to coordinates.
fn decode_coordinates(ds: &mut Dataset) -> CfResult<()> {
    let mut promote = Vec::new();
    for var in ds.data_vars.values_mut() {
        if let Some(AttrValue::Str(coords)) = var.attrs.remove("coordinates") {
            promote.extend(coords.split_whitespace().map(str::to_string));
            var.encoding
                .insert("coordinates".to_string(), AttrValue::Str(coords));
        }
    }
    for name in promote {
        if ds.data_vars.contains_key(&name) {
            ds.set_coord(&name)?;
        }
    }
    Ok(())
}
