//! CLI settings with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/loancalc/loancalc.toml`
//! 3. Environment variables: `LOANCALC_*` prefix, `__` between nested keys
//!    (`LOANCALC_MAIL__RELAY_URL`)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// How result mail leaves the machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransportKind {
    /// Drop each message as a JSON file into `outbox_dir`.
    #[default]
    Outbox,
    /// POST each message as JSON to `relay_url`.
    Http,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MailSettings {
    pub transport: MailTransportKind,
    /// Defaults to `<data_dir>/outbox`.
    pub outbox_dir: Option<PathBuf>,
    pub relay_url: Option<String>,
    /// Envelope sender address.
    pub sender: String,
}

impl Default for MailSettings {
    fn default() -> Self {
        Self {
            transport: MailTransportKind::Outbox,
            outbox_dir: None,
            relay_url: None,
            sender: "noreply@bank-calculator.local".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root for every file the CLI keeps.
    pub data_dir: PathBuf,
    /// Defaults to `<data_dir>/catalog.json`.
    pub catalog_path: Option<PathBuf>,
    /// Defaults to `<data_dir>/metrics.jsonl`.
    pub metrics_path: Option<PathBuf>,
    /// Defaults to `<data_dir>/history.json`.
    pub history_path: Option<PathBuf>,
    pub mail: MailSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_path: None,
            metrics_path: None,
            history_path: None,
            mail: MailSettings::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    ProjectDirs::from("", "", "loancalc")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".loancalc"))
}

/// Path of the global config file, if the platform has a config directory.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "loancalc").map(|dirs| dirs.config_dir().join("loancalc.toml"))
}

impl Settings {
    /// Defaults, then the global config file, then `LOANCALC_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Like [`Settings::load`] with an explicit config file.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("data_dir", defaults.data_dir.to_string_lossy().to_string())?
            .set_default("mail.transport", "outbox")?
            .set_default("mail.sender", defaults.mail.sender.clone())?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("LOANCALC")
                .prefix_separator("_")
                .separator("__"),
        );

        builder.build()?.try_deserialize()
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("catalog.json"))
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.metrics_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("metrics.jsonl"))
    }

    pub fn history_path(&self) -> PathBuf {
        self.history_path
            .clone()
            .unwrap_or_else(|| self.data_dir.join("history.json"))
    }

    pub fn outbox_dir(&self) -> PathBuf {
        self.mail
            .outbox_dir
            .clone()
            .unwrap_or_else(|| self.data_dir.join("outbox"))
    }
}
