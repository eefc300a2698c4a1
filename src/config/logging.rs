//! Logging configuration and subscriber setup.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, TripwiseError};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level.
    pub level: LogLevel,

    /// Log format.
    pub format: LogFormat,

    /// Log output destination. Stdout is reserved for command output by
    /// default, so logs go to stderr.
    pub output: LogOutput,

    /// Log file path (when output = file).
    pub file_path: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Text,
            output: LogOutput::Stderr,
            file_path: None,
        }
    }
}

impl LoggingConfig {
    /// Installs the global tracing subscriber.
    ///
    /// `level_override` comes from the command line and wins over the
    /// configured level. `RUST_LOG`, when set, wins over both.
    pub fn init(&self, level_override: Option<LogLevel>) -> Result<()> {
        let level: tracing::Level = level_override.unwrap_or(self.level).into();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true);

        let result = match (self.output, self.format) {
            (LogOutput::Stdout, LogFormat::Text) => {
                builder.with_writer(std::io::stdout).try_init()
            }
            (LogOutput::Stdout, LogFormat::Json) => {
                builder.json().with_writer(std::io::stdout).try_init()
            }
            (LogOutput::Stderr, LogFormat::Text) => {
                builder.with_writer(std::io::stderr).try_init()
            }
            (LogOutput::Stderr, LogFormat::Json) => {
                builder.json().with_writer(std::io::stderr).try_init()
            }
            (LogOutput::File, format) => {
                let path = self.file_path.as_deref().ok_or_else(|| {
                    TripwiseError::config("logging.file_path is required when output is file")
                })?;
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        TripwiseError::config_with_source(
                            format!("Failed to open log file '{}'", path),
                            e,
                        )
                    })?;
                let writer = Mutex::new(file);

                match format {
                    LogFormat::Text => builder.with_ansi(false).with_writer(writer).try_init(),
                    LogFormat::Json => builder.json().with_writer(writer).try_init(),
                }
            }
        };

        result.map_err(|e| {
            TripwiseError::config(format!("Failed to initialize logging: {}", e))
        })
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warn level.
    Warn,
    /// Error level.
    Error,
}

impl FromStr for LogLevel {
    type Err = TripwiseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(TripwiseError::config(format!("Unknown log level: {}", s))),
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard output.
    Stdout,
    /// Standard error.
    #[default]
    Stderr,
    /// File output.
    File,
}
