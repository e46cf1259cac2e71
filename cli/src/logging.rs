//! Logging initialization. Stdout carries the protocol, so logs go to stderr and,
//! when a log file is configured, also to that file (plain text, no ANSI).

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Filter for `level`, which may be a bare level (`debug`) or full directives
/// (`radix=debug,info`). Unparsable input falls back to `info`.
pub fn filter_for(level: &str) -> EnvFilter {
    let directives = format!("{},hyper_util=off", level.trim());
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info,hyper_util=off"))
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber. Keep the returned guard alive for the life of the
/// process; dropping it flushes and stops the file writer.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_filter(filter_for(level));

    match log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(path)?);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter_for(level));
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .try_init()?;
            tracing::info!(path = %path.display(), "logging to file");
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(stderr_layer).try_init()?;
            Ok(None)
        }
    }
}
