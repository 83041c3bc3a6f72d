//! Logger builder implementation

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Keeps the root `app` span entered for as long as it lives.
#[derive(Debug)]
#[must_use = "dropping the guard exits the root span"]
pub struct LoggerGuard {
    _root_span: Option<tracing::span::EnteredSpan>,
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global subscriber.
    ///
    /// Events are written to stderr so that stdout stays free for program
    /// output.
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            directive: self.config.level.clone(),
            reason: e.to_string(),
        })?;

        let Config {
            format,
            ansi,
            source,
            ..
        } = self.config;
        let registry = Registry::default().with(filter);

        let installed = match format {
            Format::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr)
                        .with_ansi(ansi)
                        .with_file(source)
                        .with_line_number(source),
                )
                .try_init(),
            Format::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr)
                        .with_ansi(ansi)
                        .with_file(source)
                        .with_line_number(source),
                )
                .try_init(),
            Format::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_writer(std::io::stderr)
                        .with_file(source)
                        .with_line_number(source),
                )
                .try_init(),
        };
        installed.map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;

        let root_span = self
            .config
            .service
            .as_deref()
            .map(|service| tracing::info_span!("app", service).entered());

        tracing::debug!(level = %self.config.level, %format, "logger initialised");
        Ok(LoggerGuard {
            _root_span: root_span,
        })
    }
}
