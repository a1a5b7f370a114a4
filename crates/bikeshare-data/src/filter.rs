//! Month and day narrowing of a loaded city dataset.

use std::path::Path;

use bikeshare_core::error::Result;
use bikeshare_core::models::{DayFilter, Filters, MonthFilter, TripDataset};
use tracing::debug;

use crate::reader::load_city;

/// Load the dataset for `filters.city` and narrow it to the chosen month and
/// day. The result may be empty.
pub fn load_data(data_dir: &Path, filters: &Filters) -> Result<TripDataset> {
    let dataset = load_city(data_dir, filters.city)?;
    let loaded = dataset.len();

    let filtered = apply_filters(dataset, filters.month, filters.day);
    debug!(
        "Filtered {}: {} of {} trips kept",
        filters,
        filtered.len(),
        loaded
    );

    Ok(filtered)
}

/// Keep only trips in `month` and on `day`. Record order is preserved.
pub fn apply_filters(mut dataset: TripDataset, month: MonthFilter, day: DayFilter) -> TripDataset {
    dataset.retain_matching(month, day);
    dataset
}

// ── Tests ─────────────────────────────────────────────────────────────────────
