//! Interactive session loop.
//!
//! Each pass collects filters, loads and filters the city's trips, and prints
//! the time, station, duration and user reports in that order. The loop then
//! asks whether to restart; only `yes` runs another pass. A session with a
//! preset city runs exactly once.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use bikeshare_core::error::Result;
use bikeshare_core::models::TripDataset;
use bikeshare_core::settings::{OutputFormat, Presets};
use bikeshare_data::filter::load_data;
use bikeshare_data::stats::{DurationStats, StationStats, TimeStats, UserStats};
use bikeshare_ui::prompt::Prompter;
use bikeshare_ui::report::{Report, ReportWriter};
use tracing::{debug, info};

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything a session needs besides its input and output streams.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory holding the per-city CSV files.
    pub data_dir: PathBuf,
    /// Filter values supplied on the command line.
    pub presets: Presets,
    pub format: OutputFormat,
    /// Invalid answers allowed per prompt; `None` means unlimited.
    pub max_attempts: Option<u32>,
}

/// Outcome of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Number of statistics passes that ran to completion.
    pub passes: usize,
}

/// Builds one report from a filtered dataset.
type ReportFn = fn(&TripDataset) -> Report;

/// Reports in display order.
const REPORTS: [ReportFn; 4] = [
    |d| Report::Time(TimeStats::compute(d)),
    |d| Report::Station(StationStats::compute(d)),
    |d| Report::Duration(DurationStats::compute(d)),
    |d| Report::User(UserStats::compute(d)),
];

// ── Session ───────────────────────────────────────────────────────────────────

pub struct Session<R, W> {
    config: SessionConfig,
    prompter: Prompter<R, W>,
    writer: ReportWriter,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: SessionConfig, input: R, output: W) -> Self {
        let prompter = Prompter::new(input, output, config.max_attempts);
        let writer = ReportWriter::new(config.format);
        Self {
            config,
            prompter,
            writer,
        }
    }

    /// Run passes until the user declines to restart.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut passes = 0;
        loop {
            self.run_pass()?;
            passes += 1;

            if self.config.presets.is_batch() {
                debug!("Preset city given; not offering a restart");
                break;
            }
            if !self.prompter.ask_restart()? {
                break;
            }
        }

        info!("Session finished after {} pass(es)", passes);
        Ok(SessionSummary { passes })
    }

    /// Collect filters, load the matching trips and print every report.
    pub fn run_pass(&mut self) -> Result<()> {
        let filters = self.prompter.collect_filters(&self.config.presets)?;
        let dataset = load_data(&self.config.data_dir, &filters)?;
        info!("Reporting on {} trips for {}", dataset.len(), filters);

        for build in REPORTS {
            let started = Instant::now();
            let report = build(&dataset);
            self.writer
                .write(self.prompter.output(), &report, started.elapsed())?;
        }
        self.prompter.output().flush()?;
        Ok(())
    }

    /// Consume the session and return its output stream.
    pub fn into_output(self) -> W {
        self.prompter.into_inner().1
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
