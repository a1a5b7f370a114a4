//! Descriptive statistics over a filtered trip dataset.
//!
//! Each report type is a plain serializable struct computed from a
//! [`TripDataset`]. Every value is optional so an empty dataset yields an
//! empty report instead of a failure.

use std::collections::BTreeMap;

use bikeshare_core::formatting::seconds_to_hours;
use bikeshare_core::models::{month_name, TripDataset};
use serde::Serialize;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Most frequent value. Ties resolve to the smallest value in natural order.
///
/// Returns `None` for an empty input.
pub fn mode<T: Ord>(values: impl IntoIterator<Item = T>) -> Option<T> {
    let mut best: Option<(T, usize)> = None;
    // BTreeMap iterates in ascending order, so a strict `>` keeps the first.
    for (value, count) in tally(values) {
        if best.as_ref().map_or(true, |(_, n)| count > *n) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// Occurrences of each distinct value, most frequent first; equal counts are
/// ordered by value.
pub fn value_counts<T: Ord>(values: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = tally(values).into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn tally<T: Ord>(values: impl IntoIterator<Item = T>) -> BTreeMap<T, usize> {
    let mut map = BTreeMap::new();
    for value in values {
        *map.entry(value).or_insert(0) += 1;
    }
    map
}

/// A distinct value and how many trips carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

fn to_value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
    value_counts(values)
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect()
}

// ── TimeStats ─────────────────────────────────────────────────────────────────

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub trips: usize,
    pub popular_month: Option<String>,
    pub popular_day: Option<String>,
    pub popular_hour: Option<u32>,
}

impl TimeStats {
    pub fn compute(dataset: &TripDataset) -> Self {
        let records = &dataset.records;
        Self {
            trips: records.len(),
            popular_month: mode(records.iter().map(|r| r.month))
                .and_then(month_name)
                .map(str::to_string),
            popular_day: mode(records.iter().map(|r| r.weekday_name())).map(str::to_string),
            popular_hour: mode(records.iter().map(|r| r.hour)),
        }
    }
}

// ── StationStats ──────────────────────────────────────────────────────────────

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub trips: usize,
    pub popular_start_station: Option<String>,
    pub popular_end_station: Option<String>,
    /// `"<start> to <end>"` for the most frequent station pair.
    pub popular_trip: Option<String>,
}

impl StationStats {
    pub fn compute(dataset: &TripDataset) -> Self {
        let records = &dataset.records;
        let popular_trip = mode(
            records
                .iter()
                .map(|r| format!("{} to {}", r.start_station, r.end_station)),
        );
        Self {
            trips: records.len(),
            popular_start_station: mode(records.iter().map(|r| r.start_station.as_str()))
                .map(str::to_string),
            popular_end_station: mode(records.iter().map(|r| r.end_station.as_str()))
                .map(str::to_string),
            popular_trip,
        }
    }
}

// ── DurationStats ─────────────────────────────────────────────────────────────

/// Total and average trip duration, in hours rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total_hours: f64,
    /// `None` when there are no trips.
    pub mean_hours: Option<f64>,
}

impl DurationStats {
    pub fn compute(dataset: &TripDataset) -> Self {
        let records = &dataset.records;
        let total_seconds: f64 = records.iter().map(|r| r.trip_duration).sum();
        let mean_hours = (!records.is_empty())
            .then(|| seconds_to_hours(total_seconds / records.len() as f64));
        Self {
            trips: records.len(),
            total_hours: seconds_to_hours(total_seconds),
            mean_hours,
        }
    }
}

// ── UserStats ─────────────────────────────────────────────────────────────────

/// Oldest, youngest and most common birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

/// User demographics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub trips: usize,
    pub user_types: Vec<ValueCount>,
    /// `None` when the city has no gender column.
    pub genders: Option<Vec<ValueCount>>,
    /// `None` when the city has no birth-year column or no trip has one.
    pub birth_years: Option<BirthYearStats>,
}

impl UserStats {
    pub fn compute(dataset: &TripDataset) -> Self {
        let records = &dataset.records;
        let schema = dataset.schema();

        let user_types = to_value_counts(records.iter().filter_map(|r| r.user_type.as_deref()));

        let genders = schema
            .gender
            .then(|| to_value_counts(records.iter().filter_map(|r| r.gender.as_deref())));

        let birth_years = if schema.birth_year {
            // Birth years are whole numbers stored as decimals; truncation
            // keeps min/max/mode consistent with the raw column.
            let years: Vec<i64> = records
                .iter()
                .filter_map(|r| r.birth_year)
                .map(|y| y as i64)
                .collect();
            birth_year_stats(&years)
        } else {
            None
        };

        Self {
            trips: records.len(),
            user_types,
            genders,
            birth_years,
        }
    }
}

fn birth_year_stats(years: &[i64]) -> Option<BirthYearStats> {
    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        most_recent: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
