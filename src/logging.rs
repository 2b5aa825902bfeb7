//! Logging for the JNI bridge
//!
//! Structured logging through `tracing`. The bridge only emits events; a host
//! that wants them installs a subscriber, either its own or the one built by
//! `init_logging`.

use crate::interop::{JObject, JThrowable};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

// Re-export tracing macros for use throughout the crate
pub use tracing::{debug, error, info, trace, warn, Level};

static LOGGER_INITIALIZED: OnceCell<()> = OnceCell::new();

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line
    Pretty,
    /// One line per event
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Log output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Daily-rotated files `<directory>/<prefix>.<date>`
    File { directory: String, prefix: String },
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub output: LogOutput,
    /// Emit span open/close events for the high-level calls
    pub span_events: bool,
    /// Extra filter directives, e.g. `"jnicall::call=trace"`
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            span_events: false,
            filter: None,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Rotated JSON files under `log_dir`, the usual setup inside an app
    /// process that has no useful stderr.
    pub fn to_directory(log_dir: impl AsRef<Path>) -> Self {
        Self::default().with_format(LogFormat::Json).with_output(LogOutput::File {
            directory: log_dir.as_ref().to_string_lossy().to_string(),
            prefix: "jnicall".to_string(),
        })
    }
}

/// Install a global subscriber for `config`.
///
/// Only the first call installs anything; later calls, or a call made when
/// the host already set a global subscriber, return `None`. Keep the returned
/// guard alive until shutdown so buffered lines are flushed.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    if LOGGER_INITIALIZED.get().is_some() {
        return None;
    }

    let (writer, guard) = match &config.output {
        LogOutput::Stdout => tracing_appender::non_blocking(std::io::stdout()),
        LogOutput::Stderr => tracing_appender::non_blocking(std::io::stderr()),
        LogOutput::File { directory, prefix } => {
            tracing_appender::non_blocking(rolling::daily(directory, prefix))
        }
    };

    let span_events = span_events_config(config.span_events);
    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(writer)
            .pretty()
            .with_span_events(span_events)
            .with_filter(build_filter(config))
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_writer(writer)
            .compact()
            .with_span_events(span_events)
            .with_filter(build_filter(config))
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_writer(writer)
            .json()
            .with_span_events(span_events)
            .with_filter(build_filter(config))
            .boxed(),
    };

    if tracing_subscriber::registry().with(layer).try_init().is_err() {
        return None;
    }
    LOGGER_INITIALIZED.set(()).ok();
    Some(guard)
}

fn build_filter(config: &LogConfig) -> EnvFilter {
    let base = EnvFilter::from_default_env().add_directive(config.level.into());

    match &config.filter {
        Some(directives) => directives
            .split(',')
            .map(str::trim)
            .filter(|directive| !directive.is_empty())
            .fold(base, |filter, directive| match directive.parse() {
                Ok(parsed) => filter.add_directive(parsed),
                Err(_) => {
                    warn!("Invalid filter directive: {}", directive);
                    filter
                }
            }),
        None => base,
    }
}

fn span_events_config(enabled: bool) -> FmtSpan {
    if enabled {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// A pending exception was captured and cleared
#[inline]
pub fn log_foreign_fault(exception: JThrowable) {
    warn!(
        target: "jnicall::exception",
        throwable = ?exception.as_raw(),
        "JNI exception occurred"
    );
}

/// A class or member is being resolved
#[inline]
pub fn log_lookup(member: &str, name: &str, signature: Option<&str>) {
    debug!(
        target: "jnicall::lookup",
        member,
        name,
        signature = signature.unwrap_or(""),
        "resolving"
    );
}

/// A guard deleted the local reference it owned
#[inline]
pub fn log_reference_release(obj: JObject) {
    debug!(
        target: "jnicall::refs",
        handle = ?obj.as_raw(),
        "deleted local reference"
    );
}

/// The packer created or released strings for a call
#[inline]
pub fn log_transient_strings(count: usize, released: bool) {
    trace!(
        target: "jnicall::args",
        count,
        released,
        "transient argument strings"
    );
}
