use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// User-configurable ledger preferences. Every field has a serde default so older
/// files keep loading as settings are added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    /// `local`, `utc`, or a fixed offset such as `+02:00`.
    #[serde(default = "Config::default_month_zone")]
    pub month_zone: String,
    #[serde(default = "Config::enabled")]
    pub enforce_validation: bool,
    #[serde(default = "Config::enabled")]
    pub seed_defaults: bool,
    #[serde(default = "Config::enabled")]
    pub autosave: bool,
    #[serde(default = "Config::default_finance_key")]
    pub finance_key: String,
    #[serde(default = "Config::default_auth_key")]
    pub auth_key: String,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for persisted state. Defaults to `<base>/state`.
    pub state_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for exports. Defaults to `<base>/exports`.
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: Self::default_currency(),
            month_zone: Self::default_month_zone(),
            enforce_validation: true,
            seed_defaults: true,
            autosave: true,
            finance_key: Self::default_finance_key(),
            auth_key: Self::default_auth_key(),
            backup_retention: Self::default_backup_retention(),
            state_dir: None,
            export_dir: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 10] = [
        "currency",
        "month_zone",
        "enforce_validation",
        "seed_defaults",
        "autosave",
        "finance_key",
        "auth_key",
        "backup_retention",
        "state_dir",
        "export_dir",
    ];

    fn default_currency() -> String {
        "ZAR".into()
    }

    fn default_month_zone() -> String {
        "local".into()
    }

    fn default_finance_key() -> String {
        "finance-store".into()
    }

    fn default_auth_key() -> String {
        "auth-store".into()
    }

    fn default_backup_retention() -> usize {
        5
    }

    fn enabled() -> bool {
        true
    }

    pub fn resolve_state_dir(&self, base: &Path) -> PathBuf {
        self.state_dir
            .clone()
            .unwrap_or_else(|| base.join("state"))
    }

    pub fn resolve_export_dir(&self, base: &Path) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| base.join("exports"))
    }

    /// Current value of a setting, rendered as text.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        let value = match key {
            "currency" => self.currency.clone(),
            "month_zone" => self.month_zone.clone(),
            "enforce_validation" => self.enforce_validation.to_string(),
            "seed_defaults" => self.seed_defaults.to_string(),
            "autosave" => self.autosave.to_string(),
            "finance_key" => self.finance_key.clone(),
            "auth_key" => self.auth_key.clone(),
            "backup_retention" => self.backup_retention.to_string(),
            "state_dir" => display_path(self.state_dir.as_deref()),
            "export_dir" => display_path(self.export_dir.as_deref()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// Updates a setting from text. Empty values clear the optional directories.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let trimmed = value.trim();
        match key {
            "currency" => self.currency = non_empty(key, trimmed)?.to_ascii_uppercase(),
            "month_zone" => self.month_zone = non_empty(key, trimmed)?,
            "enforce_validation" => self.enforce_validation = parse_bool(key, trimmed)?,
            "seed_defaults" => self.seed_defaults = parse_bool(key, trimmed)?,
            "autosave" => self.autosave = parse_bool(key, trimmed)?,
            "finance_key" => self.finance_key = non_empty(key, trimmed)?,
            "auth_key" => self.auth_key = non_empty(key, trimmed)?,
            "backup_retention" => {
                self.backup_retention = trimmed.parse().map_err(|_| invalid(key, trimmed))?
            }
            "state_dir" => self.state_dir = optional_path(trimmed),
            "export_dir" => self.export_dir = optional_path(trimmed),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

fn optional_path(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        Err(invalid(key, value))
    } else {
        Ok(value.to_string())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
