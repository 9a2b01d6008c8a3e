//! EPW weather file header.
//!
//! Only the LOCATION record is read here. The editor attaches a weather file
//! to a model so downstream simulation tooling can find it; hourly records
//! stay with the engine.

use crate::error::{IdfError, IdfResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Parsed LOCATION record of an EPW file.
///
/// Layout: `LOCATION,city,state,country,source,WMO,lat,lon,tz,elevation`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherHeader {
    pub path: PathBuf,
    pub city: String,
    pub state_province: String,
    pub country: String,
    pub source: String,
    pub wmo_station: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Offset from UTC in hours (negative west).
    pub timezone_hours: f64,
    pub elevation_m: f64,
}

pub fn read_weather_header(path: &Path) -> IdfResult<WeatherHeader> {
    let content = std::fs::read_to_string(path).map_err(|e| IdfError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_location_line(content.lines().next().unwrap_or(""), path)
}

fn parse_location_line(line: &str, path: &Path) -> IdfResult<WeatherHeader> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 10 || !fields[0].eq_ignore_ascii_case("LOCATION") {
        return Err(IdfError::Parse {
            message: format!(
                "weather file {} does not start with a LOCATION record",
                path.display()
            ),
        });
    }
    let number = |index: usize, what: &str| -> IdfResult<f64> {
        fields[index].parse::<f64>().map_err(|_| IdfError::Parse {
            message: format!("LOCATION {what} is not a number: {:?}", fields[index]),
        })
    };
    Ok(WeatherHeader {
        path: path.to_path_buf(),
        city: fields[1].to_string(),
        state_province: fields[2].to_string(),
        country: fields[3].to_string(),
        source: fields[4].to_string(),
        wmo_station: fields[5].to_string(),
        latitude_deg: number(6, "latitude")?,
        longitude_deg: number(7, "longitude")?,
        timezone_hours: number(8, "time zone")?,
        elevation_m: number(9, "elevation")?,
    })
}
