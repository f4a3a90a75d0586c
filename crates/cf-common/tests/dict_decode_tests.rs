//! End-to-end tests: dictionary construction followed by CF decoding.

use cf_common::{
    decode_cf, find_bounds, AttrValue, Calendar, CfDatetime, CfError, Dataset, DataType,
};
use serde_json::json;
use test_utils::assert_consistent;

fn cmip_like() -> serde_json::Value {
    json!({
        "coords": {
            "time": {
                "dims": ["time"],
                "attrs": {
                    "units": "days since 1850-01-01",
                    "calendar": "noleap",
                    "bounds": "time_bnds",
                },
                "data": [0.5, 365.5],
            },
            "time_bnds": {
                "dims": ["time", "bnds"],
                "data": [[0.0, 1.0], [365.0, 366.0]],
            },
            "lat": {"dims": ["lat"], "data": [-45.0, 45.0]},
        },
        "data_vars": {
            "tas": {
                "dims": ["time", "lat"],
                "attrs": {
                    "units": "K",
                    "_FillValue": 1e20,
                    "coordinates": "height",
                },
                "data": [[280.0, 1e20], [281.5, 279.0]],
                "dtype": "float32",
            },
            "height": {"dims": [], "data": 2.0},
        },
        "attrs": {"Conventions": "CF-1.7"},
    })
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_dict_builds_consistent_dataset() {
    let ds = Dataset::from_dict(&cmip_like()).unwrap();
    assert_consistent!(&ds);
    assert_eq!(ds.size("bnds"), Some(2));
    assert_eq!(find_bounds(&ds, "time"), Some("time_bnds"));
    assert_eq!(ds.get("tas").unwrap().data.dtype(), DataType::Float32);
}

#[test]
fn test_from_dict_conflicting_dimensions() {
    let result = Dataset::from_dict(&json!({
        "coords": {"x": {"dims": ["x"], "data": [0, 1, 2]}},
        "data_vars": {"v": {"dims": ["x"], "data": [1.0, 2.0]}},
    }));
    assert!(matches!(result, Err(CfError::DimensionConflict { .. })));
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_noleap_times() {
    let ds = decode_cf(&Dataset::from_dict(&cmip_like()).unwrap()).unwrap();
    let times = ds.get("time").unwrap().data.as_time().unwrap();
    assert_eq!(
        times[[1]],
        CfDatetime::new(1851, 1, 1, Calendar::NoLeap).with_time(12, 0, 0)
    );
    // Bounds carry no units attribute of their own here, so stay numeric.
    assert_eq!(ds.get("time_bnds").unwrap().data.dtype(), DataType::Float64);
}

#[test]
fn test_decode_masks_and_promotes() {
    let ds = decode_cf(&Dataset::from_dict(&cmip_like()).unwrap()).unwrap();
    let tas = ds.get("tas").unwrap();
    let values = tas.data.as_f32().unwrap();
    assert!(values[[0, 1]].is_nan());
    assert_eq!(values[[1, 0]], 281.5);
    assert_eq!(tas.encoding.get("_FillValue"), Some(&AttrValue::Float(1e20)));

    assert!(ds.is_coord("height"));
    assert!(tas.attr("coordinates").is_none());
    assert_eq!(tas.encoding["coordinates"].as_str(), Some("height"));
}

#[test]
fn test_decode_rejects_months_on_gregorian_calendar() {
    let ds = Dataset::from_dict(&json!({
        "coords": {
            "t": {
                "dims": ["t"],
                "attrs": {"units": "months since 2000-01-01"},
                "data": [0, 1],
            },
        },
    }))
    .unwrap();
    assert!(matches!(decode_cf(&ds), Err(CfError::InvalidTimeUnits(_))));
}
