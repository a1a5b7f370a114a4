use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city data file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV row could not be read or deserialized.
    #[error("Failed to parse CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A column required by the city schema is absent from the file header.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: PathBuf, column: String },

    /// A start timestamp did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A trip duration cell was not a number of seconds.
    #[error("Invalid trip duration: {0}")]
    InvalidDuration(String),

    /// A city, month or day selection is not one of the accepted values.
    #[error("Invalid {field}: {value}")]
    InvalidSelection { field: &'static str, value: String },

    /// The user gave too many invalid answers to a single prompt.
    #[error("Too many invalid {field} entries ({attempts} attempts)")]
    TooManyAttempts { field: &'static str, attempts: u32 },

    /// Standard input reached end-of-file while waiting for an answer.
    #[error("Input closed before a response was given")]
    InputClosed,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A report could not be serialized to JSON.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
