use std::path::PathBuf;

use clap::Parser;

use crate::error::{BikeshareError, Result};
use crate::models::{City, DayFilter, MonthFilter};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data from the command line
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data from the command line",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// City to analyze; skips the city prompt and runs a single pass
    #[arg(long)]
    pub city: Option<String>,

    /// Month filter (all, january .. june); skips the month prompt
    #[arg(long)]
    pub month: Option<String>,

    /// Day filter (all, monday .. sunday); skips the day prompt
    #[arg(long)]
    pub day: Option<String>,

    /// Invalid answers allowed per prompt (0 = unlimited)
    #[arg(long, default_value = "5")]
    pub max_attempts: u32,

    /// Report output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub output: String,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Presets ────────────────────────────────────────────────────────────────────

/// Filter values supplied on the command line, already validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Presets {
    pub city: Option<City>,
    pub month: Option<MonthFilter>,
    pub day: Option<DayFilter>,
}

impl Presets {
    /// A preset city means the session runs once without prompting to restart.
    pub fn is_batch(&self) -> bool {
        self.city.is_some()
    }
}

/// How statistics reports are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments from the process environment and apply `--debug`.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// Validate the `--city`, `--month` and `--day` values with the same
    /// parsers the interactive prompts use.
    pub fn presets(&self) -> Result<Presets> {
        Ok(Presets {
            city: parse_preset(self.city.as_deref(), "--city")?,
            month: parse_preset(self.month.as_deref(), "--month")?,
            day: parse_preset(self.day.as_deref(), "--day")?,
        })
    }

    /// Prompt attempt limit; `None` when unlimited.
    pub fn attempt_limit(&self) -> Option<u32> {
        (self.max_attempts > 0).then_some(self.max_attempts)
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.output.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

fn parse_preset<T>(raw: Option<&str>, flag: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = BikeshareError>,
{
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|e| BikeshareError::Config(format!("{flag}: {e}")))
    })
    .transpose()
}

// ── Tests ──────────────────────────────────────────────────────────────────────
