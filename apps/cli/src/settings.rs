//! Layered settings: defaults → settings file → `MEALDESK_*` env → flags.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use mealdesk_log::Format;
use mealdesk_validator::{FailurePolicy, ValidatorConfig};
use serde::{Deserialize, Serialize};

/// Settings file looked up in the working directory.
pub const DEFAULT_FILE: &str = "mealdesk.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: FailurePolicy,
    /// Rule name to message template.
    pub messages: BTreeMap<String, String>,
    pub log_level: Option<String>,
    pub log_format: Option<Format>,
}

/// Values given on the command line; unset flags leave lower layers alone.
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<FailurePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<Format>,
}

impl Settings {
    /// Loads settings. An explicit `config` path must exist; the default
    /// file is optional.
    pub fn load(config: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let file: PathBuf = match config {
            Some(path) if !path.is_file() => bail!("settings file {} not found", path.display()),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_FILE),
        };

        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(&file))
            .merge(Env::prefixed("MEALDESK_").only(&["policy", "log_level", "log_format"]))
            .merge(Serialized::defaults(overrides))
            .extract()
            .with_context(|| format!("loading settings (file: {})", file.display()))
    }

    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            policy: self.policy,
            messages: self.messages.clone(),
        }
    }

    /// Logger config: environment first, then settings.
    pub fn log_config(&self) -> mealdesk_log::Config {
        let mut config = mealdesk_log::Config::from_env();
        if let Some(level) = &self.log_level {
            config.level.clone_from(level);
        }
        if let Some(format) = self.log_format {
            config.format = format;
        }
        config.with_service("mealdesk")
    }
}
