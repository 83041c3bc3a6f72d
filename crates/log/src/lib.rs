//! # mealdesk-log
//!
//! Installs the global `tracing` subscriber for Mealdesk binaries. Libraries
//! only emit events; the binary picks a [`Config`] and calls [`init_with`].
//!
//! ```no_run
//! let _guard = mealdesk_log::init_with(mealdesk_log::Config::development())?;
//! tracing::info!("ready");
//! # Ok::<(), mealdesk_log::LogError>(())
//! ```
//!
//! The filter follows `EnvFilter` syntax. [`Config::from_env`] reads
//! `MEALDESK_LOG` (falling back to `RUST_LOG`) and `MEALDESK_LOG_FORMAT`.

mod builder;
mod config;
mod error;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, Format};
pub use error::{LogError, LogResult};

/// Initialises logging from the environment.
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::from_env())
}

/// Initialises logging with `config`.
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
