//! Configuration presets for common scenarios

use super::{Config, Format};

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "MEALDESK_LOG";
/// Format variable: `pretty`, `compact` or `json`.
pub const LOG_FORMAT_ENV: &str = "MEALDESK_LOG_FORMAT";

impl Config {
    /// Create configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    ///
    /// An unrecognised format value keeps the default format.
    #[must_use]
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = var(LOG_ENV).or_else(|| var("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = var(LOG_FORMAT_ENV).and_then(|f| f.parse().ok()) {
            config.format = format;
            config.ansi = format == Format::Pretty;
        }

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_owned(),
            format: Format::Pretty,
            ansi: true,
            source: true,
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::Json,
            ..Self::default()
        }
    }
}
