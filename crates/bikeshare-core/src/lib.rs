//! Domain model and shared plumbing for the bikeshare explorer.
//!
//! Holds the city table, trip records and filters, the command-line
//! [`settings::Settings`], the crate-wide error type and small formatting
//! helpers used by the report renderers.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{BikeshareError, Result};
