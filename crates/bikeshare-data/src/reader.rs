//! CSV loading for bikeshare trip files.
//!
//! Reads one city's file from the data directory, checks that the header
//! carries every column the city schema requires, and converts each row into
//! a [`TripRecord`] with its derived month, weekday and hour populated.

use std::io::Read;
use std::path::{Path, PathBuf};

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::models::{City, CitySchema, TripDataset, TripRecord};
use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

// ── Column names ──────────────────────────────────────────────────────────────

pub const START_TIME: &str = "Start Time";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

const REQUIRED_COLUMNS: [&str; 5] = [
    START_TIME,
    START_STATION,
    END_STATION,
    TRIP_DURATION,
    USER_TYPE,
];

/// Timestamp layouts accepted in the `Start Time` column.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// One row as it appears in the file. Extra columns (the unnamed index,
/// `End Time`) are ignored.
#[derive(Debug, Deserialize)]
struct RawTripRow {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: String,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<f64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Path of `city`'s data file inside `data_dir`.
pub fn city_file_path(data_dir: &Path, city: City) -> PathBuf {
    data_dir.join(city.file_name())
}

/// Load every trip for `city` from `data_dir`.
pub fn load_city(data_dir: &Path, city: City) -> Result<TripDataset> {
    let path = city_file_path(data_dir, city);
    let file = std::fs::File::open(&path).map_err(|source| BikeshareError::FileRead {
        path: path.clone(),
        source,
    })?;

    let records = read_trips(file, city.schema(), &path)?;
    debug!("Loaded {} trips from {}", records.len(), path.display());

    Ok(TripDataset::new(city, records))
}

/// Parse trip rows from any reader.
///
/// `source` only labels errors; nothing is opened through it.
pub fn read_trips<R: Read>(
    reader: R,
    schema: CitySchema,
    source: &Path,
) -> Result<Vec<TripRecord>> {
    let csv_err = |e: csv::Error| BikeshareError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    check_columns(&headers, schema, source)?;

    let mut records = Vec::new();
    for (idx, row) in rdr.deserialize::<RawTripRow>().enumerate() {
        let row = row.map_err(csv_err)?;
        // Header is line 1.
        let line = idx + 2;
        records.push(into_record(row, schema, line)?);
    }

    Ok(records)
}

/// Parse a `Start Time` cell.
pub fn parse_start_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn check_columns(headers: &csv::StringRecord, schema: CitySchema, source: &Path) -> Result<()> {
    let optional = [(schema.gender, GENDER), (schema.birth_year, BIRTH_YEAR)];
    let wanted = REQUIRED_COLUMNS
        .iter()
        .copied()
        .chain(optional.iter().filter(|(on, _)| *on).map(|(_, name)| *name));

    for column in wanted {
        if !headers.iter().any(|h| h == column) {
            return Err(BikeshareError::MissingColumn {
                path: source.to_path_buf(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn into_record(row: RawTripRow, schema: CitySchema, line: usize) -> Result<TripRecord> {
    let start_time = parse_start_time(&row.start_time).ok_or_else(|| {
        BikeshareError::TimestampParse(format!("line {line}: {:?}", row.start_time))
    })?;

    let trip_duration = row
        .trip_duration
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .ok_or_else(|| {
            BikeshareError::InvalidDuration(format!("line {line}: {:?}", row.trip_duration))
        })?;

    Ok(TripRecord::new(
        start_time,
        row.start_station,
        row.end_station,
        trip_duration,
        non_empty(row.user_type),
        if schema.gender { non_empty(row.gender) } else { None },
        if schema.birth_year { row.birth_year } else { None },
    ))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};
    use tempfile::TempDir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Subscriber,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
482740,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    fn chicago_schema() -> CitySchema {
        City::Chicago.schema()
    }

    #[test]
    fn test_read_trips_chicago_rows() {
        let trips = read_trips(
            CHICAGO.as_bytes(),
            chicago_schema(),
            Path::new("chicago.csv"),
        )
        .expect("parse");
        assert_eq!(trips.len(), 3);

        let first = &trips[0];
        assert_eq!(first.start_station, "Wood St & Hubbard St");
        assert_eq!(first.end_station, "Damen Ave & Chicago Ave");
        assert_eq!(first.trip_duration, 321.0);
        assert_eq!(first.user_type.as_deref(), Some("Subscriber"));
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992.0));
        assert_eq!(first.month, 6);
        assert_eq!(first.weekday, Weekday::Fri);
        assert_eq!(first.hour, 15);
    }

    #[test]
    fn test_read_trips_empty_optional_cells_are_none() {
        let trips = read_trips(
            CHICAGO.as_bytes(),
            chicago_schema(),
            Path::new("chicago.csv"),
        )
        .expect("parse");
        let last = &trips[2];
        assert_eq!(last.gender, None);
        assert_eq!(last.birth_year, None);
    }

    #[test]
    fn test_read_trips_washington_has_no_demographics() {
        let trips = read_trips(
            WASHINGTON.as_bytes(),
            City::Washington.schema(),
            Path::new("washington.csv"),
        )
        .expect("parse");
        assert_eq!(trips.len(), 2);
        assert!((trips[0].trip_duration - 489.066).abs() < 1e-9);
        assert!(trips.iter().all(|t| t.gender.is_none() && t.birth_year.is_none()));
    }

    #[test]
    fn test_schema_ignores_undeclared_columns() {
        let trips = read_trips(
            CHICAGO.as_bytes(),
            City::Washington.schema(),
            Path::new("chicago.csv"),
        )
        .expect("parse");
        assert!(trips.iter().all(|t| t.gender.is_none()));
    }

    #[test]
    fn test_missing_required_column() {
        let data = "\
Start Time,End Station,Trip Duration,User Type
2017-01-01 00:00:00,B,10,Customer
";
        let err = read_trips(data.as_bytes(), City::Washington.schema(), Path::new("w.csv"))
            .unwrap_err();
        match err {
            BikeshareError::MissingColumn { column, .. } => assert_eq!(column, START_STATION),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_schema_column() {
        let err = read_trips(WASHINGTON.as_bytes(), chicago_schema(), Path::new("w.csv"))
            .unwrap_err();
        match err {
            BikeshareError::MissingColumn { column, .. } => assert_eq!(column, GENDER),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_timestamp_reports_line() {
        let data = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:00:00,10,A,B,Customer
not a time,10,A,B,Customer
";
        let err = read_trips(data.as_bytes(), City::Washington.schema(), Path::new("w.csv"))
            .unwrap_err();
        assert!(matches!(err, BikeshareError::TimestampParse(_)));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_bad_duration() {
        let data = "\
Start Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:00:00,-5,A,B,Customer
";
        let err = read_trips(data.as_bytes(), City::Washington.schema(), Path::new("w.csv"))
            .unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidDuration(_)));
    }

    #[test]
    fn test_parse_start_time_variants() {
        let ts = parse_start_time("2017-02-28 23:59:01").expect("plain");
        assert_eq!((ts.month(), ts.day(), ts.hour()), (2, 28, 23));
        assert!(parse_start_time("2017-02-28 23:59:01.250").is_some());
        assert!(parse_start_time("2017-02-28T23:59:01").is_some());
        assert!(parse_start_time("28/02/2017").is_none());
    }

    #[test]
    fn test_load_city_from_data_dir() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::write(tmp.path().join("chicago.csv"), CHICAGO).expect("write");

        let dataset = load_city(tmp.path(), City::Chicago).expect("load");
        assert_eq!(dataset.city, City::Chicago);
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_load_city_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let err = load_city(tmp.path(), City::NewYorkCity).unwrap_err();
        match err {
            BikeshareError::FileRead { path, .. } => {
                assert!(path.ends_with("new_york_city.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
