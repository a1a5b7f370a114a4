use std::time::Duration;

use unicode_width::UnicodeWidthStr;

/// Horizontal rule printed after each prompt block and report.
pub const SEPARATOR: &str = "----------------------------------------";

/// Round `value` to `decimal_places`, sending exact halves to the even
/// neighbour.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::round_to;
///
/// assert_eq!(round_to(1.23456, 2), 1.23);
/// assert_eq!(round_to(2.5, 0), 2.0);
/// assert_eq!(round_to(3.5, 0), 4.0);
/// assert_eq!(round_to(0.0, 2), 0.0);
/// ```
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10_f64.powi(decimal_places as i32);
    (value * factor).round_ties_even() / factor
}

/// Convert a duration in seconds to hours, rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::seconds_to_hours;
///
/// assert_eq!(seconds_to_hours(10_800.0), 3.0);
/// assert_eq!(seconds_to_hours(5_400.0), 1.5);
/// assert_eq!(seconds_to_hours(776.0), 0.22);
/// ```
pub fn seconds_to_hours(seconds: f64) -> f64 {
    round_to(seconds / 3600.0, 2)
}

/// Render a compute duration the way the reports show it: fractional
/// seconds with six decimal places.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use bikeshare_core::formatting::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::from_millis(1500)), "1.500000");
/// assert_eq!(format_elapsed(Duration::ZERO), "0.000000");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.6}", elapsed.as_secs_f64())
}

/// Terminal column width of `s`, counting wide characters as two columns.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Pad `label` with spaces on the right to `width` terminal columns.
///
/// Labels already at or beyond `width` are returned unchanged.
///
/// # Examples
///
/// ```
/// use bikeshare_core::formatting::pad_label;
///
/// assert_eq!(pad_label("Male", 8), "Male    ");
/// assert_eq!(pad_label("Subscriber", 4), "Subscriber");
/// ```
pub fn pad_label(label: &str, width: usize) -> String {
    let pad = width.saturating_sub(display_width(label));
    format!("{}{}", label, " ".repeat(pad))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separator_is_forty_dashes() {
        assert_eq!(SEPARATOR.len(), 40);
        assert!(SEPARATOR.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_seconds_to_hours_sum_and_mean() {
        // [3600, 7200] seconds: sum 3.0 h, mean 1.5 h.
        let durations = [3600.0_f64, 7200.0];
        let total: f64 = durations.iter().sum();
        assert_eq!(seconds_to_hours(total), 3.0);
        assert_eq!(seconds_to_hours(total / durations.len() as f64), 1.5);
    }

    #[test]
    fn test_seconds_to_hours_halves_round_to_even() {
        // 0.125 h and 0.625 h are exact binary halves at two decimals.
        assert_eq!(seconds_to_hours(450.0), 0.12);
        assert_eq!(seconds_to_hours(2250.0), 0.62);
        assert_eq!(seconds_to_hours(1350.0), 0.38);
    }

    #[test]
    fn test_round_to_negative() {
        assert_eq!(round_to(-1.005_1, 2), -1.01);
    }

    #[test]
    fn test_display_width_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("駅"), 2);
    }

    #[test]
    fn test_pad_label_accounts_for_wide_chars() {
        assert_eq!(pad_label("駅", 4), "駅  ");
        assert_eq!(pad_label("", 3), "   ");
    }
}
