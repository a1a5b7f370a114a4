//! Data layer for the bikeshare explorer.
//!
//! Loads per-city CSV files into typed trip records, applies the month and
//! day filters, and computes the statistics shown by the reports.

pub mod filter;
pub mod reader;
pub mod stats;

pub use bikeshare_core as core;
