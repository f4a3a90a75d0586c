//! Gridded air temperature with a cell-area measure.
//!
//! A subset of the NCEP reanalysis 4x-daily surface air temperature sample:
//! the first time steps and longitudes of a 2.5° grid over North America.
//! Values are synthesized by [`air_temperature_field`] so the fixture needs
//! no download.

use cf_common::{attrs, decode_variable, Dataset, Variable};
use ndarray::{Array1, Array2};

use crate::config::CatalogConfig;
use crate::error::CatalogResult;
use crate::generators::air_temperature_field;

pub const NAME: &str = "airds";
pub const NO_ATTRS_NAME: &str = "ds_no_attrs";

/// Hours from 1800-01-01 to 2013-01-01, the first sample time.
const FIRST_HOUR: f64 = 1_867_128.0;
const STEP_HOURS: f64 = 6.0;

const LAT_POINTS: usize = 25;
const LAT_START: f64 = 75.0;
const LON_START: f64 = 200.0;
const SPACING: f64 = 2.5;

/// Earth cell extents used by the area measure, in metres.
const CELL_DX: f32 = 105e3;
const CELL_DY: f32 = 110e3;

pub fn build(config: &CatalogConfig) -> CatalogResult<Dataset> {
    let lat = Array1::from_shape_fn(LAT_POINTS, |j| LAT_START - SPACING * j as f64);
    let lon = Array1::from_shape_fn(config.air_lon_points, |i| LON_START + SPACING * i as f64);
    let hours = Array1::from_shape_fn(config.air_time_steps, |t| {
        FIRST_HOUR + STEP_HOURS * t as f64
    });

    let mut ds = Dataset::new().with_attrs(attrs! {
        "Conventions" => "COARDS",
        "title" => "4x daily NMC reanalysis (1948)",
        "description" => "Data is from NMC initialized reanalysis\n(4x/day).  These are the 0.9950 sigma level values.",
        "platform" => "Model",
        "references" => "http://www.esrl.noaa.gov/psd/data/gridded/data.ncep.reanalysis.html",
    });

    let time = Variable::new(&["time"], hours)?.with_attrs(attrs! {
        "standard_name" => "time",
        "long_name" => "Time",
        "units" => "hours since 1800-01-01",
        "calendar" => "standard",
    });
    ds.add_coord("time", decode_variable("time", &time)?)?;

    ds.add_coord(
        "lat",
        Variable::new(&["lat"], lat.mapv(|v| v as f32))?.with_attrs(attrs! {
            "standard_name" => "latitude",
            "long_name" => "Latitude",
            "units" => "degrees_north",
            "axis" => "Y",
        }),
    )?;
    ds.add_coord(
        "lon",
        Variable::new(&["lon"], lon.mapv(|v| v as f32))?.with_attrs(attrs! {
            "standard_name" => "longitude",
            "long_name" => "Longitude",
            "units" => "degrees_east",
            "axis" => "X",
        }),
    )?;

    // Arithmetic on labeled arrays drops attributes, so the measure has none.
    let cell_area = Array2::from_shape_fn((lat.len(), lon.len()), |(j, _)| {
        (lat[j] as f32).to_radians().cos() * CELL_DX * CELL_DY
    });
    ds.add_coord("cell_area", Variable::new(&["lat", "lon"], cell_area)?)?;

    let air = air_temperature_field(config.air_time_steps, lat.view(), lon.view());
    ds.add_data_var(
        "air",
        Variable::new(&["time", "lat", "lon"], air)?.with_attrs(attrs! {
            "long_name" => "4xDaily Air temperature at sigma level 995",
            "units" => "degK",
            "precision" => 2,
            "GRIB_id" => 11,
            "GRIB_name" => "TMP",
            "var_desc" => "Air temperature",
            "dataset" => "NMC Reanalysis",
            "level_desc" => "Surface",
            "statistic" => "Individual Obs",
            "parent_stat" => "Other",
            "actual_range" => vec![185.16, 322.1],
            "cell_measures" => "area: cell_area",
            "standard_name" => "air_temperature",
        }),
    )?;

    Ok(ds)
}

/// The air dataset with every variable's attributes removed.
pub fn build_no_attrs(airds: &Dataset) -> Dataset {
    airds.strip_attrs()
}
