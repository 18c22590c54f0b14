//! Dataset loader
//!
//! Reads a city's CSV file into a `TripTable` and applies the month/day filter.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::consts::DATETIME_FORMAT;
use crate::core::types::{City, Filter, TripRecord, TripTable};
use crate::error::AppError;

const REQUIRED_COLUMNS: [&str; 4] = ["Start Time", "Trip Duration", "Start Station", "End Station"];

/// Immutable city → file mapping rooted at a data directory
#[derive(Debug, Clone)]
pub(crate) struct CityFiles {
    data_dir: PathBuf,
    files: BTreeMap<City, String>,
}

impl CityFiles {
    pub(crate) fn new(data_dir: impl Into<PathBuf>) -> Self {
        let files = City::ALL
            .iter()
            .map(|c| (*c, c.default_file_name().to_string()))
            .collect();
        CityFiles {
            data_dir: data_dir.into(),
            files,
        }
    }

    pub(crate) fn with_file(mut self, city: City, file_name: impl Into<String>) -> Self {
        self.files.insert(city, file_name.into());
        self
    }

    pub(crate) fn path(&self, city: City) -> PathBuf {
        let name = self
            .files
            .get(&city)
            .map_or(city.default_file_name(), String::as_str);
        self.data_dir.join(name)
    }
}

/// Row layout shared by all city files. Washington lacks the demographic columns.
#[derive(Debug, Deserialize)]
struct CsvTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time", default)]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

pub(crate) fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    [DATETIME_FORMAT, "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn read_table(path: &Path, city: City) -> Result<TripTable, AppError> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::MissingData {
                city: city.name().to_string(),
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(AppError::Io(e)),
    };

    // Row deserialization matches on these trimmed header names
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| AppError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !has_column(c)) {
        return Err(AppError::InvalidRow {
            path: path.to_path_buf(),
            line: 1,
            reason: format!("missing column \"{missing}\""),
        });
    }
    let has_demographics = has_column("Gender") && has_column("Birth Year");

    let mut records = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        let more = reader.read_record(&mut record).map_err(|source| AppError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if !more {
            break;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let row: CsvTrip = record
            .deserialize(Some(&headers))
            .map_err(|e| AppError::InvalidRow {
                path: path.to_path_buf(),
                line,
                reason: e.to_string(),
            })?;

        let start_time = parse_start_time(&row.start_time).ok_or_else(|| AppError::InvalidRow {
            path: path.to_path_buf(),
            line,
            reason: format!("invalid start time \"{}\"", row.start_time),
        })?;

        records.push(TripRecord::new(
            start_time,
            row.end_time.unwrap_or_default(),
            row.trip_duration,
            row.start_station,
            row.end_station,
            non_empty(row.user_type),
            non_empty(row.gender),
            row.birth_year.map(|y| y as i32),
        ));
    }

    Ok(TripTable::new(city, records, has_demographics))
}

/// Load every trip recorded for `city`
pub(crate) fn load_all(files: &CityFiles, city: City) -> Result<TripTable, AppError> {
    let path = files.path(city);
    let start = Instant::now();
    let table = read_table(&path, city)?;
    tracing::debug!(
        city = city.name(),
        path = %path.display(),
        rows = table.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "loaded trip table"
    );
    Ok(table)
}

/// Load `city` and narrow it to the rows matching `filter`
pub(crate) fn load(files: &CityFiles, city: City, filter: &Filter) -> Result<TripTable, AppError> {
    let table = load_all(files, city)?;
    if *filter == Filter::default() {
        return Ok(table);
    }
    let filtered = table.filter(filter);
    tracing::debug!(
        city = city.name(),
        filter = %filter.describe(),
        kept = filtered.len(),
        total = table.len(),
        "applied filter"
    );
    Ok(filtered)
}
