//! Logger configuration

mod presets;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human oriented
    Pretty,
    /// One line per event
    #[default]
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pretty => "pretty",
            Self::Compact => "compact",
            Self::Json => "json",
        })
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format `{other}`")),
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directive, e.g. `info` or `mealdesk_validator=trace,warn`
    pub level: String,
    pub format: Format,
    /// Colored output
    pub ansi: bool,
    /// Include file and line of each event
    pub source: bool,
    /// When set, every event is recorded inside an `app` span carrying this name
    pub service: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "warn".to_owned(),
            format: Format::Compact,
            ansi: false,
            source: false,
            service: None,
        }
    }
}

impl Config {
    #[must_use = "builder methods must be chained or built"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }
}
