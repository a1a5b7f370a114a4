use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDateTime, Timelike, Weekday};

use crate::error::BikeshareError;

// ── City table ────────────────────────────────────────────────────────────────

/// A city for which trip data is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

/// Optional columns carried by a city's data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CitySchema {
    /// The file has a `Gender` column.
    pub gender: bool,
    /// The file has a `Birth Year` column.
    pub birth_year: bool,
}

/// Static mapping of every supported city to its lowercase name, data file
/// and column schema.
pub const CITY_DATA: [(City, &str, &str, CitySchema); 3] = [
    (
        City::Chicago,
        "chicago",
        "chicago.csv",
        CitySchema {
            gender: true,
            birth_year: true,
        },
    ),
    (
        City::NewYorkCity,
        "new york city",
        "new_york_city.csv",
        CitySchema {
            gender: true,
            birth_year: true,
        },
    ),
    (
        City::Washington,
        "washington",
        "washington.csv",
        CitySchema {
            gender: false,
            birth_year: false,
        },
    ),
];

impl City {
    /// All supported cities in menu order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    fn entry(self) -> (City, &'static str, &'static str, CitySchema) {
        // CITY_DATA lists every variant in declaration order.
        CITY_DATA[self as usize]
    }

    /// Lowercase name accepted at the prompt, e.g. `"new york city"`.
    pub fn key(self) -> &'static str {
        self.entry().1
    }

    /// File name of the city's CSV data, relative to the data directory.
    pub fn file_name(self) -> &'static str {
        self.entry().2
    }

    /// Optional columns present in this city's file.
    pub fn schema(self) -> CitySchema {
        self.entry().3
    }

    /// Display name, e.g. `"New York City"`.
    pub fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    /// Case-insensitive match against the keys in [`CITY_DATA`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CITY_DATA
            .iter()
            .find(|(_, key, _, _)| *key == wanted)
            .map(|(city, _, _, _)| *city)
            .ok_or_else(|| BikeshareError::InvalidSelection {
                field: "city",
                value: s.to_string(),
            })
    }
}

// ── Calendar names ────────────────────────────────────────────────────────────

/// Months that can be chosen as a filter.
pub const FILTER_MONTHS: [Month; 6] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
];

const ALL_MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const WEEKDAYS: [(Weekday, &str); 7] = [
    (Weekday::Mon, "Monday"),
    (Weekday::Tue, "Tuesday"),
    (Weekday::Wed, "Wednesday"),
    (Weekday::Thu, "Thursday"),
    (Weekday::Fri, "Friday"),
    (Weekday::Sat, "Saturday"),
    (Weekday::Sun, "Sunday"),
];

/// Full English name of `day`, e.g. `"Wednesday"`.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize].1
}

/// Full English name of a 1-based month number, or `None` outside 1–12.
pub fn month_name(number: u32) -> Option<&'static str> {
    let idx = usize::try_from(number).ok()?.checked_sub(1)?;
    ALL_MONTHS.get(idx).map(|m| m.name())
}

// ── Filters ───────────────────────────────────────────────────────────────────

/// Month restriction applied to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Only(Month),
}

impl MonthFilter {
    /// Returns `true` when a record in `month` (1-based) passes the filter.
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => m.number_from_month() == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("all"),
            MonthFilter::Only(m) => f.write_str(m.name()),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(MonthFilter::All);
        }
        FILTER_MONTHS
            .iter()
            .find(|m| m.name().to_lowercase() == wanted)
            .map(|m| MonthFilter::Only(*m))
            .ok_or_else(|| BikeshareError::InvalidSelection {
                field: "month",
                value: s.to_string(),
            })
    }
}

/// Day-of-week restriction applied to a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayFilter {
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn matches(self, day: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => d == day,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("all"),
            DayFilter::Only(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .iter()
            .find(|(_, name)| name.to_lowercase() == wanted)
            .map(|(day, _)| DayFilter::Only(*day))
            .ok_or_else(|| BikeshareError::InvalidSelection {
                field: "day",
                value: s.to_string(),
            })
    }
}

/// A validated (city, month, day) selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filters {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (month: {}, day: {})", self.city, self.month, self.day)
    }
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// One row of bikeshare usage data, with fields derived from the start time.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Local start time of the trip as recorded in the file.
    pub start_time: NaiveDateTime,
    pub start_station: String,
    pub end_station: String,
    /// Trip length in seconds.
    pub trip_duration: f64,
    /// `None` when the cell is empty.
    pub user_type: Option<String>,
    /// `None` when the city has no gender column or the cell is empty.
    pub gender: Option<String>,
    /// `None` when the city has no birth-year column or the cell is empty.
    pub birth_year: Option<f64>,
    /// Derived month number, 1–12.
    pub month: u32,
    /// Derived day of the week.
    pub weekday: Weekday,
    /// Derived start hour, 0–23.
    pub hour: u32,
}

impl TripRecord {
    /// Build a record and populate the derived month, weekday and hour.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: String,
        end_station: String,
        trip_duration: f64,
        user_type: Option<String>,
        gender: Option<String>,
        birth_year: Option<f64>,
    ) -> Self {
        Self {
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            start_time,
            start_station,
            end_station,
            trip_duration,
            user_type,
            gender,
            birth_year,
        }
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

// ── TripDataset ───────────────────────────────────────────────────────────────

/// Ordered trip records for one city.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDataset {
    pub city: City,
    pub records: Vec<TripRecord>,
}

impl TripDataset {
    pub fn new(city: City, records: Vec<TripRecord>) -> Self {
        Self { city, records }
    }

    pub fn schema(&self) -> CitySchema {
        self.city.schema()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record outside `month` and `day`, keeping the original order.
    pub fn retain_matching(&mut self, month: MonthFilter, day: DayFilter) {
        self.records
            .retain(|r| month.matches(r.month) && day.matches(r.weekday));
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_city_parse_is_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("NEW YORK CITY".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("  washington ".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn test_city_parse_rejects_unknown() {
        let err = "boston".parse::<City>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid city: boston");
    }

    #[test]
    fn test_city_table_is_consistent() {
        for city in City::ALL {
            assert_eq!(city.key().parse::<City>().unwrap(), city);
        }
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert!(City::Chicago.schema().gender);
        assert!(!City::Washington.schema().birth_year);
    }

    #[test]
    fn test_month_filter_parse() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!(
            "March".parse::<MonthFilter>().unwrap(),
            MonthFilter::Only(Month::March)
        );
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_month_filter_matches_number() {
        let june = MonthFilter::Only(Month::June);
        assert!(june.matches(6));
        assert!(!june.matches(5));
        assert!(MonthFilter::All.matches(11));
    }

    #[test]
    fn test_day_filter_parse() {
        assert_eq!("ALL".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!(
            "sunday".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Sun)
        );
        assert_eq!(
            "Monday".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Mon)
        );
        assert!("mon".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_month_name_bounds() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn test_trip_record_derives_fields() {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(9, 7, 57)
            .unwrap();
        let trip = TripRecord::new(
            start,
            "A".to_string(),
            "B".to_string(),
            776.0,
            Some("Customer".to_string()),
            None,
            None,
        );
        assert_eq!(trip.month, 1);
        assert_eq!(trip.weekday, Weekday::Sun);
        assert_eq!(trip.weekday_name(), "Sunday");
        assert_eq!(trip.hour, 9);
    }

    #[test]
    fn test_dataset_retain_matching_keeps_order() {
        let at = |d: u32, m: u32, h: u32| {
            NaiveDate::from_ymd_opt(2017, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap()
        };
        let trip = |start| {
            TripRecord::new(start, "A".into(), "B".into(), 60.0, None, None, None)
        };
        // 2017-03-06 and 2017-03-13 are Mondays, 2017-03-07 is a Tuesday.
        let mut dataset = TripDataset::new(
            City::Washington,
            vec![
                trip(at(13, 3, 8)),
                trip(at(7, 3, 9)),
                trip(at(6, 3, 10)),
                trip(at(6, 4, 11)),
            ],
        );
        dataset.retain_matching(MonthFilter::Only(Month::March), DayFilter::Only(Weekday::Mon));
        let hours: Vec<u32> = dataset.records.iter().map(|r| r.hour).collect();
        assert_eq!(hours, vec![8, 10]);
        assert!(!dataset.is_empty());
        assert!(!dataset.schema().gender);
    }

    #[test]
    fn test_filters_display() {
        let filters = Filters {
            city: City::NewYorkCity,
            month: MonthFilter::Only(Month::February),
            day: DayFilter::All,
        };
        assert_eq!(
            filters.to_string(),
            "New York City (month: February, day: all)"
        );
    }
}
