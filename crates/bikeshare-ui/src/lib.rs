//! Console layer for the bikeshare explorer.
//!
//! Interactive prompts that collect the city and filters, and renderers that
//! print the four statistics reports as text or JSON lines.

pub mod prompt;
pub mod report;

pub use bikeshare_core as core;
