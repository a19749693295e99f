//! Log setup and stage timing.
//!
//! [`init_logging`] installs a `tracing` subscriber that writes to stderr at
//! the configured level and, optionally, every DEBUG event to a log file.
//! [`StageTimer`] logs the start, duration and output of a pipeline stage.

use crate::config::LoggingConfig;
use anyhow::Context;
use std::fmt::Debug;
use std::time::Instant;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialise the global `tracing` subscriber.
///
/// Returns the file writer's guard when a log file is configured; keep it
/// alive until the process exits so buffered lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(console_filter);

    let Some(path) = config.file.as_ref() else {
        tracing_subscriber::registry()
            .with(console_layer)
            .try_init()
            .context("failed to install log subscriber")?;
        return Ok(None);
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(&dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(Some(guard))
}

/// Measures one pipeline stage.
#[derive(Debug)]
pub struct StageTimer {
    stage: &'static str,
    started: Instant,
}

impl StageTimer {
    pub fn start(stage: &'static str) -> Self {
        debug!(stage, "{} started", stage);
        Self {
            stage,
            started: Instant::now(),
        }
    }

    /// Logs the elapsed time and returns it in seconds.
    pub fn finish(self) -> f64 {
        let elapsed = self.started.elapsed().as_secs_f64();
        info!(stage = self.stage, elapsed, "{} finished in {:.3} seconds", self.stage, elapsed);
        elapsed
    }

    /// Like [`StageTimer::finish`], also logging `output` at DEBUG unless it is empty.
    pub fn finish_with<T>(self, output: &T) -> f64
    where
        T: Debug + ?Sized,
    {
        let stage = self.stage;
        let elapsed = self.finish();
        let rendered = format!("{:?}", output);
        if !matches!(rendered.as_str(), "" | "[]" | "{}" | "()") {
            debug!(stage, "{} output: {}", stage, rendered);
        }
        elapsed
    }
}
