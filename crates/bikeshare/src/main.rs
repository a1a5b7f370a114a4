mod bootstrap;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use bikeshare_core::error::BikeshareError;
use bikeshare_core::settings::Settings;
use bikeshare_runtime::session::{Session, SessionConfig};

fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;
    tracing::info!("bikeshare v{} starting", env!("CARGO_PKG_VERSION"));

    let presets = settings.presets()?;
    let data_dir = bootstrap::resolve_data_dir(settings.data_dir.as_deref());
    tracing::debug!("Using data directory {}", data_dir.display());

    let config = SessionConfig {
        data_dir,
        presets,
        format: settings.output_format(),
        max_attempts: settings.attempt_limit(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(config, stdin.lock(), stdout.lock());

    match session.run() {
        Ok(summary) => {
            tracing::debug!("Completed {} pass(es)", summary.passes);
            Ok(ExitCode::SUCCESS)
        }
        // Ctrl+D at a prompt ends the session quietly.
        Err(BikeshareError::InputClosed) => {
            tracing::info!("Input closed; exiting");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => Err(e).context("bikeshare session failed"),
    }
}
