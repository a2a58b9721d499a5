use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Routes all tracing output to an append-only log file.
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_file_logging(path: &Path) -> anyhow::Result<WorkerGuard> {
    let log_file = open_file_for_append(path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("patchpulse=info"));

    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(filter);
    tracing_subscriber::registry().with(file_layer).init();

    Ok(guard)
}

fn open_file_for_append(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create log directory '{}'", parent.display()))?;
        }
    }
    OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .with_context(|| format!("open log file '{}'", path.display()))
}
