//! Line-oriented console prompts.
//!
//! [`Prompter`] asks for the city, month and day, re-asking after each
//! invalid answer up to a configurable limit. End of input at any prompt is
//! reported as [`BikeshareError::InputClosed`].

use std::io::{BufRead, Write};
use std::str::FromStr;

use bikeshare_core::error::{BikeshareError, Result};
use bikeshare_core::formatting::SEPARATOR;
use bikeshare_core::models::{City, DayFilter, Filters, MonthFilter};
use bikeshare_core::settings::Presets;
use tracing::debug;

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";

pub const CITY_QUESTION: &str =
    "Data from which of the following cities would you like to analyze? Chicago, New York City, or Washington?";
pub const MONTH_QUESTION: &str =
    "Data from what month would you like to analyze? January, February, March, April, May, June or All?";
pub const DAY_QUESTION: &str =
    "Data from what day of the week would you like to analyze? Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday or All.";
pub const RESTART_QUESTION: &str = "Would you like to restart? Enter yes or no.";

/// Reads answers from `input` and writes questions to `output`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    /// Invalid answers allowed per question; `None` means unlimited.
    max_attempts: Option<u32>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, max_attempts: Option<u32>) -> Self {
        Self {
            input,
            output,
            max_attempts,
        }
    }

    /// The stream questions are written to; reports share it.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Collect a validated city/month/day selection.
    ///
    /// Values present in `presets` are used as-is and their prompts skipped.
    /// The greeting and closing separator are printed only when at least one
    /// question is asked.
    pub fn collect_filters(&mut self, presets: &Presets) -> Result<Filters> {
        let interactive =
            presets.city.is_none() || presets.month.is_none() || presets.day.is_none();
        if interactive {
            writeln!(self.output, "{GREETING}")?;
        }

        let city = match presets.city {
            Some(city) => city,
            None => self.ask::<City>("city", CITY_QUESTION)?,
        };
        let month = match presets.month {
            Some(month) => month,
            None => self.ask::<MonthFilter>("month", MONTH_QUESTION)?,
        };
        let day = match presets.day {
            Some(day) => day,
            None => self.ask::<DayFilter>("day", DAY_QUESTION)?,
        };

        if interactive {
            writeln!(self.output, "{SEPARATOR}")?;
        }

        let filters = Filters { city, month, day };
        debug!("Selected {}", filters);
        Ok(filters)
    }

    /// Ask `question` until the answer parses as `T`.
    ///
    /// With a limit of `n`, `n` invalid answers are re-asked and the next
    /// one fails without a retry message.
    pub fn ask<T>(&mut self, field: &'static str, question: &str) -> Result<T>
    where
        T: FromStr<Err = BikeshareError>,
    {
        let mut attempts = 0u32;
        loop {
            let answer = self.read_answer(question)?;
            match answer.parse::<T>() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempts += 1;
                    debug!("Rejected {} answer: {}", field, e);
                    if self.max_attempts.is_some_and(|max| attempts > max) {
                        return Err(BikeshareError::TooManyAttempts { field, attempts });
                    }
                    writeln!(
                        self.output,
                        "Sorry, you have input an invalid {field}, please try again.\n"
                    )?;
                }
            }
        }
    }

    /// Ask whether to run another pass. Only `yes` (any case) continues;
    /// end of input counts as `no`.
    pub fn ask_restart(&mut self) -> Result<bool> {
        match self.read_answer(&format!("\n{RESTART_QUESTION}")) {
            Ok(answer) => Ok(answer.eq_ignore_ascii_case("yes")),
            Err(BikeshareError::InputClosed) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Write `question` on its own line and read one trimmed line back.
    fn read_answer(&mut self, question: &str) -> Result<String> {
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
