//! Logging initialisation.

mod logging;

pub use logging::{LogFormat, LoggingConfig};

use crate::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Installs the global tracing subscriber.
///
/// Events go to stderr, or are appended to `config.file` when one is set.
///
/// # Errors
///
/// Returns an error if logging has already been initialized, the filter
/// directive is invalid, or the log file cannot be opened.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if LOGGING_INIT.get().is_some() {
        return Err(init_failed("logging already initialized"));
    }

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| init_failed(format!("invalid filter '{}': {e}", config.filter)))?;

    let layer = if let Some(path) = &config.file {
        fmt_layer(config.format, Mutex::new(append_to(path)?), false)
    } else {
        fmt_layer(config.format, io::stderr, true)
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| init_failed(e.to_string()))?;
    LOGGING_INIT
        .set(())
        .map_err(|()| init_failed("failed to mark logging initialized"))?;

    tracing::debug!(
        format = config.format.as_str(),
        filter = %config.filter,
        to_file = config.file.is_some(),
        "Logging initialized"
    );
    Ok(())
}

fn fmt_layer<W>(format: LogFormat, writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    match format {
        LogFormat::Json => layer
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

/// Opens `path` in append mode, creating missing parent directories.
fn append_to(path: &Path) -> Result<File> {
    let target = |e: io::Error| init_failed(format!("{}: {e}", path.display()));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(target)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(target)
}

fn init_failed(cause: impl Into<String>) -> Error {
    Error::OperationFailed {
        operation: "logging_init".to_string(),
        cause: cause.into(),
    }
}
