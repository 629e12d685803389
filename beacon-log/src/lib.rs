//! Logging setup for Beacon
//!
//! Library crates in this workspace log through `tracing` macros. This crate
//! installs the global subscriber that turns those events into output.
//! Defaults to JSON on STDOUT at INFO level.
//!
//! # Example
//!
//! ```no_run
//! use beacon_log::{LogConfig, LogFormat, LogLevel};
//!
//! # fn main() -> Result<(), beacon_log::LogError> {
//! let _guard = LogConfig::new()
//!     .level(LogLevel::Debug)
//!     .format(LogFormat::Pretty)
//!     .init()?;
//!
//! beacon_log::info!("notifier starting");
//! # Ok(())
//! # }
//! ```
//!
//! `RUST_LOG` takes precedence over the configured level unless an explicit
//! filter was set with [`LogConfig::with_env_filter`].

use serde::Deserialize;
use std::io;
use std::str::FromStr;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub use tracing::{debug, error, info, trace, warn};

/// Errors raised while installing the subscriber.
#[derive(Debug, Error)]
pub enum LogError {
    /// Log file could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    File {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Unknown level name.
    #[error("Unknown log level: {0}")]
    UnknownLevel(String),

    /// Unknown format name.
    #[error("Unknown log format: {0}")]
    UnknownFormat(String),

    /// A global subscriber was already installed.
    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Log level for filtering events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Directive string for `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(LogError::UnknownLevel(other.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, LogError> {
        value.parse()
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Structured, one JSON object per line
    Json,
    Plain,
    /// Multi-line, for local development
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "plain" => Ok(LogFormat::Plain),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(LogError::UnknownFormat(other.to_string())),
        }
    }
}

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stdout,
    Stderr,
    /// Append to a single file
    File(String),
    /// Rotating files under `directory`, named `prefix.<date>`
    RollingFile {
        directory: String,
        prefix: String,
        rotation: Rotation,
    },
}

/// Rotation period for [`LogOutput::RollingFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Minutely,
    Hourly,
    Daily,
    Never,
}

impl Rotation {
    fn to_tracing_rotation(self) -> tracing_appender::rolling::Rotation {
        match self {
            Rotation::Minutely => tracing_appender::rolling::Rotation::MINUTELY,
            Rotation::Hourly => tracing_appender::rolling::Rotation::HOURLY,
            Rotation::Daily => tracing_appender::rolling::Rotation::DAILY,
            Rotation::Never => tracing_appender::rolling::Rotation::NEVER,
        }
    }
}

/// Subscriber configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub output: LogOutput,
    pub thread_ids: bool,
    /// Include the module path of each event
    pub targets: bool,
    pub file_line: bool,
    /// Emit span close events with timings
    pub spans: bool,
    /// ANSI colors, ignored for JSON
    pub colors: bool,
    /// Explicit filter directives, overrides `level` and `RUST_LOG`
    pub env_filter: Option<String>,
}

impl LogConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn with_thread_ids(mut self, enable: bool) -> Self {
        self.thread_ids = enable;
        self
    }

    pub fn with_targets(mut self, enable: bool) -> Self {
        self.targets = enable;
        self
    }

    pub fn with_file_line(mut self, enable: bool) -> Self {
        self.file_line = enable;
        self
    }

    pub fn with_spans(mut self, enable: bool) -> Self {
        self.spans = enable;
        self
    }

    pub fn with_colors(mut self, enable: bool) -> Self {
        self.colors = enable;
        self
    }

    /// Set filter directives such as `"beacon_bots=debug,reqwest=warn"`.
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Build the `EnvFilter` this configuration resolves to.
    ///
    /// An explicit filter that fails to parse falls back to the configured
    /// level.
    pub fn build_filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(directives) => EnvFilter::try_new(directives)
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str())),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str())),
        }
    }

    /// Install the global subscriber.
    ///
    /// The returned guard flushes buffered lines when dropped and must be
    /// held for the life of the program.
    pub fn init(self) -> Result<WorkerGuard, LogError> {
        let filter = self.build_filter();

        let (writer, guard) = match &self.output {
            LogOutput::Stdout => tracing_appender::non_blocking(io::stdout()),
            LogOutput::Stderr => tracing_appender::non_blocking(io::stderr()),
            LogOutput::File(path) => {
                let file = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|source| LogError::File {
                        path: path.clone(),
                        source,
                    })?;
                tracing_appender::non_blocking(file)
            }
            LogOutput::RollingFile {
                directory,
                prefix,
                rotation,
            } => {
                let appender = tracing_appender::rolling::RollingFileAppender::new(
                    rotation.to_tracing_rotation(),
                    directory,
                    prefix,
                );
                tracing_appender::non_blocking(appender)
            }
        };

        tracing_subscriber::registry()
            .with(self.fmt_layer(writer))
            .with(filter)
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))?;

        Ok(guard)
    }

    fn fmt_layer<W>(&self, writer: W) -> Box<dyn Layer<Registry> + Send + Sync>
    where
        W: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
    {
        let span_events = if self.spans {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(self.spans)
                .with_span_list(self.spans)
                .with_target(self.targets)
                .with_thread_ids(self.thread_ids)
                .with_file(self.file_line)
                .with_line_number(self.file_line)
                .with_span_events(span_events)
                .boxed(),
            LogFormat::Plain => fmt::layer()
                .with_writer(writer)
                .with_target(self.targets)
                .with_thread_ids(self.thread_ids)
                .with_file(self.file_line)
                .with_line_number(self.file_line)
                .with_ansi(self.colors)
                .with_span_events(span_events)
                .boxed(),
            LogFormat::Pretty => fmt::layer()
                .pretty()
                .with_writer(writer)
                .with_target(self.targets)
                .with_thread_ids(self.thread_ids)
                .with_file(self.file_line)
                .with_line_number(self.file_line)
                .with_ansi(self.colors)
                .with_span_events(span_events)
                .boxed(),
            LogFormat::Compact => fmt::layer()
                .compact()
                .with_writer(writer)
                .with_target(self.targets)
                .with_thread_ids(self.thread_ids)
                .with_ansi(self.colors)
                .with_span_events(span_events)
                .boxed(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Json,
            output: LogOutput::Stdout,
            thread_ids: false,
            targets: true,
            file_line: false,
            spans: false,
            colors: false,
            env_filter: None,
        }
    }
}
