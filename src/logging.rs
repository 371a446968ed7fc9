//! Logging initialization

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "debug", "trace")
    pub level: String,
    /// Enable JSON formatting for structured logs
    pub json_format: bool,
    /// Enable span open/close events
    pub enable_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            enable_spans: false,
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. Fails with
/// [`Error::Config`] if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Config(format!("invalid log level {:?}: {}", config.level, e)))?;

    let span_events = if config.enable_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let installed = if config.json_format {
        let fmt_layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_thread_names(true);
        Registry::default().with(filter).with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_span_events(span_events)
            .with_thread_ids(false)
            .with_thread_names(false)
            .pretty();
        Registry::default().with(filter).with(fmt_layer).try_init()
    };
    installed.map_err(|e| Error::Config(format!("logging already initialized: {e}")))?;

    tracing::info!("langident v{} - logging initialized", env!("CARGO_PKG_VERSION"));
    tracing::info!("Log level: {}", config.level);
    Ok(())
}
