//! Logging utilities

use std::path::PathBuf;

use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    self, filter::EnvFilter, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt, Layer,
};

use super::paths::{get_data_dir, LOG_ENV, LOG_FILE};

/// Filter directives: `RUST_LOG`, then `FORMFIELDS_LOGLEVEL`, then info for
/// this crate only.
fn filter_directives(rust_log: Option<String>, project_log: Option<String>) -> String {
    rust_log
        .or(project_log)
        .filter(|directives| !directives.trim().is_empty())
        .unwrap_or_else(|| format!("{}=info", env!("CARGO_CRATE_NAME")))
}

/// Sends `tracing` and `log` records to `<data_dir>/formfields.log`.
/// Returns the path of the log file.
pub fn initialize_logging() -> Result<PathBuf> {
    let directory = get_data_dir();
    std::fs::create_dir_all(&directory)?;
    let log_path = directory.join(LOG_FILE.as_str());
    let log_file = std::fs::File::create(&log_path)?;

    let directives = filter_directives(
        std::env::var("RUST_LOG").ok(),
        std::env::var(LOG_ENV.as_str()).ok(),
    );
    let file_subscriber = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(EnvFilter::new(directives));
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    tracing::info!(path = %log_path.display(), "logging initialized");
    Ok(log_path)
}
