//! Rendering of statistics reports as console text or JSON lines.

use std::io::Write;
use std::time::Duration;

use bikeshare_core::error::Result;
use bikeshare_core::formatting::{display_width, format_elapsed, pad_label, SEPARATOR};
use bikeshare_core::settings::OutputFormat;
use bikeshare_data::stats::{DurationStats, StationStats, TimeStats, UserStats, ValueCount};
use serde::Serialize;

pub const NO_TRIPS: &str = "No trips match the selected filters.";

/// One of the four statistics reports, in the order they are shown.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Time(TimeStats),
    Station(StationStats),
    Duration(DurationStats),
    User(UserStats),
}

impl Report {
    /// Tag used in JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Report::Time(_) => "time_stats",
            Report::Station(_) => "station_stats",
            Report::Duration(_) => "trip_duration_stats",
            Report::User(_) => "user_stats",
        }
    }

    /// Banner shown before the text report.
    pub fn title(&self) -> &'static str {
        match self {
            Report::Time(_) => "Calculating The Most Frequent Times of Travel...",
            Report::Station(_) => "Calculating The Most Popular Stations and Trip...",
            Report::Duration(_) => "Calculating Trip Duration...",
            Report::User(_) => "Calculating User Stats...",
        }
    }

    fn trips(&self) -> usize {
        match self {
            Report::Time(s) => s.trips,
            Report::Station(s) => s.trips,
            Report::Duration(s) => s.trips,
            Report::User(s) => s.trips,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a, T: Serialize> {
    report: &'static str,
    #[serde(flatten)]
    stats: &'a T,
    elapsed_seconds: f64,
}

/// Writes reports in the configured [`OutputFormat`].
#[derive(Debug, Clone, Copy)]
pub struct ReportWriter {
    format: OutputFormat,
}

impl ReportWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn write<W: Write>(&self, out: &mut W, report: &Report, elapsed: Duration) -> Result<()> {
        match self.format {
            OutputFormat::Text => write_text(out, report, elapsed),
            OutputFormat::Json => write_json(out, report, elapsed),
        }
    }
}

// ── JSON ──────────────────────────────────────────────────────────────────────

fn write_json<W: Write>(out: &mut W, report: &Report, elapsed: Duration) -> Result<()> {
    let elapsed_seconds = elapsed.as_secs_f64();
    let name = report.name();
    let line = match report {
        Report::Time(s) => json_line(name, s, elapsed_seconds)?,
        Report::Station(s) => json_line(name, s, elapsed_seconds)?,
        Report::Duration(s) => json_line(name, s, elapsed_seconds)?,
        Report::User(s) => json_line(name, s, elapsed_seconds)?,
    };
    writeln!(out, "{line}")?;
    Ok(())
}

fn json_line<T: Serialize>(
    report: &'static str,
    stats: &T,
    elapsed_seconds: f64,
) -> Result<String> {
    Ok(serde_json::to_string(&JsonReport {
        report,
        stats,
        elapsed_seconds,
    })?)
}

// ── Text ──────────────────────────────────────────────────────────────────────

fn write_text<W: Write>(out: &mut W, report: &Report, elapsed: Duration) -> Result<()> {
    writeln!(out, "\n{}\n", report.title())?;

    if report.trips() == 0 {
        writeln!(out, "\n{NO_TRIPS}")?;
    } else {
        match report {
            Report::Time(s) => write_time(out, s)?,
            Report::Station(s) => write_station(out, s)?,
            Report::Duration(s) => write_duration(out, s)?,
            Report::User(s) => write_user(out, s)?,
        }
    }

    writeln!(out, "\nThis took {} seconds.", format_elapsed(elapsed))?;
    writeln!(out, "{SEPARATOR}")?;
    Ok(())
}

fn line<W: Write>(out: &mut W, label: &str, value: Option<impl std::fmt::Display>) -> Result<()> {
    if let Some(value) = value {
        writeln!(out, "\n{label}: {value}")?;
    }
    Ok(())
}

fn write_time<W: Write>(out: &mut W, s: &TimeStats) -> Result<()> {
    line(out, "The most frequent month of travel is", s.popular_month.as_deref())?;
    line(out, "The most frequent day of the week travelled is", s.popular_day.as_deref())?;
    line(out, "The most frequent start hour is", s.popular_hour)?;
    Ok(())
}

fn write_station<W: Write>(out: &mut W, s: &StationStats) -> Result<()> {
    line(out, "The most frequent start station is", s.popular_start_station.as_deref())?;
    line(out, "The most frequent end station is", s.popular_end_station.as_deref())?;
    line(
        out,
        "The most frequent combination of start station and end station trip is",
        s.popular_trip.as_deref(),
    )?;
    Ok(())
}

fn write_duration<W: Write>(out: &mut W, s: &DurationStats) -> Result<()> {
    writeln!(
        out,
        "\nTotal travel time for this time period is: {:.2} hours",
        s.total_hours
    )?;
    if let Some(mean) = s.mean_hours {
        writeln!(out, "\nThe mean travel time is: {mean:.2} hours")?;
    }
    Ok(())
}

fn write_user<W: Write>(out: &mut W, s: &UserStats) -> Result<()> {
    writeln!(out, "Counts of user types:")?;
    write_counts(out, &s.user_types)?;

    if let Some(genders) = &s.genders {
        writeln!(out, "\nCounts of gender:")?;
        write_counts(out, genders)?;
    }

    if let Some(years) = &s.birth_years {
        writeln!(
            out,
            "\nThe eldest person to use the bikeshare was born in: {}",
            years.earliest
        )?;
        writeln!(
            out,
            "\nThe youngest person to use the bikeshare was born in: {}",
            years.most_recent
        )?;
        writeln!(
            out,
            "\nThe most common year of birth amongst bikesharers was: {}",
            years.most_common
        )?;
    }
    Ok(())
}

/// Two-column listing with labels padded to the widest entry.
fn write_counts<W: Write>(out: &mut W, counts: &[ValueCount]) -> Result<()> {
    let width = counts
        .iter()
        .map(|c| display_width(&c.value))
        .max()
        .unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|c| c.count.to_string().len())
        .max()
        .unwrap_or(0);
    for c in counts {
        writeln!(
            out,
            "{}    {:>count_width$}",
            pad_label(&c.value, width),
            c.count
        )?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
