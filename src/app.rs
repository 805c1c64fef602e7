//! Wiring for one running instance: config, storage, both stores and the export target.

use std::{path::PathBuf, sync::Arc};

use onsite_config::{Config, ConfigManager};
use onsite_core::{
    FinanceOptions, FinanceStore, KeyValueStore, MonthZone, SessionStore, SystemClock,
    ValidationPolicy,
};
use onsite_storage_json::{canonical_key, JsonKeyValueStore};
use tracing::debug;

use crate::{
    delivery::DirectoryDelivery,
    errors::{CliError, Result},
};

/// Owns the stores for the lifetime of the process. Built once at startup and
/// handed to whatever needs the ledger or session.
pub struct AppContext {
    config: Config,
    config_manager: ConfigManager,
    storage: Arc<JsonKeyValueStore>,
    delivery: DirectoryDelivery,
    pub finance: FinanceStore,
    pub session: SessionStore,
}

impl AppContext {
    pub fn open_at(base: PathBuf) -> Result<Self> {
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        let base = config_manager.base_dir().to_path_buf();

        let storage = Arc::new(JsonKeyValueStore::with_retention(
            config.resolve_state_dir(&base),
            config.backup_retention,
        )?);
        let finance = open_finance(&storage, &config)?;
        let shared: Arc<dyn KeyValueStore> = storage.clone();
        let session = SessionStore::hydrate(shared, config.auth_key.clone())?;
        let delivery = DirectoryDelivery::new(config.resolve_export_dir(&base));
        debug!(base = %base.display(), "app context ready");

        Ok(Self {
            config,
            config_manager,
            storage,
            delivery,
            finance,
            session,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub fn storage(&self) -> &JsonKeyValueStore {
        &self.storage
    }

    pub fn delivery(&self) -> &DirectoryDelivery {
        &self.delivery
    }

    /// Adopts a config that was already validated and saved. Store-level
    /// settings apply from the next start.
    pub(crate) fn replace_config(&mut self, config: Config) {
        self.config = config;
    }

    /// Re-reads the ledger from storage, dropping the in-memory copy.
    pub fn reload_finance(&mut self) -> Result<()> {
        self.finance = open_finance(&self.storage, &self.config)?;
        Ok(())
    }
}

fn open_finance(storage: &Arc<JsonKeyValueStore>, config: &Config) -> Result<FinanceStore> {
    let shared: Arc<dyn KeyValueStore> = storage.clone();
    Ok(FinanceStore::hydrate(
        shared,
        Arc::new(SystemClock),
        finance_options(config)?,
    )?)
}

/// Store options for `config`. Fails when the month zone does not parse or when
/// the finance and session records would share one stored file.
pub fn finance_options(config: &Config) -> Result<FinanceOptions> {
    let zone: MonthZone = config.month_zone.parse().map_err(CliError::Input)?;
    if canonical_key(&config.finance_key) == canonical_key(&config.auth_key) {
        return Err(CliError::Input(format!(
            "finance_key `{}` and auth_key `{}` would be stored as the same record",
            config.finance_key, config.auth_key
        )));
    }
    Ok(FinanceOptions {
        key: config.finance_key.clone(),
        zone,
        policy: if config.enforce_validation {
            ValidationPolicy::Enforce
        } else {
            ValidationPolicy::Trust
        },
        seed_defaults: config.seed_defaults,
        autosave: config.autosave,
    })
}
