//! Conversion logging
//!
//! Builds the `tracing` dispatcher for one conversion. The dispatcher is
//! installed scoped to the conversion by the runner, so concurrent
//! conversions can log at different verbosity.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// How much the converter reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// `--quiet` wins over any number of `-v`
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, _) => Verbosity::Debug,
        }
    }

    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "off",
            Verbosity::Normal => "pixfont=warn",
            Verbosity::Verbose => "pixfont=info",
            Verbosity::Debug => "pixfont=debug",
        }
    }
}

/// `RUST_LOG` when set, otherwise the verbosity's directive
fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()))
}

/// Build the log dispatcher, writing to stderr or appending to `log_file`
///
/// The returned guard flushes the file writer when dropped and must be kept
/// alive for the duration of the conversion.
pub fn dispatcher(
    verbosity: Verbosity,
    log_file: Option<&Path>,
) -> Result<(Dispatch, Option<WorkerGuard>)> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_target(false);

    match log_file {
        None => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            Ok((Dispatch::new(subscriber), None))
        }
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let subscriber = builder.with_writer(writer).with_ansi(false).finish();
            Ok((Dispatch::new(subscriber), Some(guard)))
        }
    }
}
