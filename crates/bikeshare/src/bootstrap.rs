use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bikeshare_core::models::City;

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"warn"` if the level string is not recognised. Output goes
/// to stderr so it never interleaves with reports on stdout.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(normalise_level(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

/// Map Python-style level names onto tracing directives.
fn normalise_level(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

// ── Data-dir discovery ─────────────────────────────────────────────────────────

/// Resolve the directory that holds the city CSV files.
///
/// An explicit `--data-dir` wins. Otherwise the first candidate containing
/// the Chicago file is used:
/// 1. the current directory
/// 2. `./data`
/// 3. `<platform data dir>/bikeshare`
///
/// Falls back to the current directory so the loader reports the missing
/// file by name.
pub fn resolve_data_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    discover_data_dir(&data_dir_candidates()).unwrap_or_else(|| PathBuf::from("."))
}

fn data_dir_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("."), PathBuf::from("data")];
    if let Some(platform) = dirs::data_dir() {
        candidates.push(platform.join("bikeshare"));
    }
    candidates
}

/// First of `candidates` that contains a city file.
fn discover_data_dir(candidates: &[PathBuf]) -> Option<PathBuf> {
    let marker = City::Chicago.file_name();
    candidates
        .iter()
        .find(|dir| dir.join(marker).is_file())
        .cloned()
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalise_level() {
        assert_eq!(normalise_level("WARNING"), "warn");
        assert_eq!(normalise_level("debug"), "debug");
        assert_eq!(normalise_level("ERROR"), "error");
        assert_eq!(normalise_level("trace"), "trace");
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = resolve_data_dir(Some(Path::new("/srv/bikeshare")));
        assert_eq!(dir, PathBuf::from("/srv/bikeshare"));
    }

    #[test]
    fn test_discover_skips_dirs_without_city_file() {
        let empty = TempDir::new().expect("tempdir");
        let full = TempDir::new().expect("tempdir");
        std::fs::write(full.path().join("chicago.csv"), "").expect("write");

        let candidates = vec![empty.path().to_path_buf(), full.path().to_path_buf()];
        assert_eq!(
            discover_data_dir(&candidates),
            Some(full.path().to_path_buf())
        );
    }

    #[test]
    fn test_discover_returns_none_when_absent() {
        let empty = TempDir::new().expect("tempdir");
        assert_eq!(discover_data_dir(&[empty.path().to_path_buf()]), None);
    }

    #[test]
    fn test_candidates_start_with_working_dir() {
        let candidates = data_dir_candidates();
        assert_eq!(candidates[0], PathBuf::from("."));
        assert_eq!(candidates[1], PathBuf::from("data"));
    }
}
