//! Runtime layer for the bikeshare explorer.
//!
//! Ties the prompt, data and report layers together into the
//! collect → load → report → restart session loop.

pub mod session;

pub use bikeshare_core as core;
pub use bikeshare_data as data;
