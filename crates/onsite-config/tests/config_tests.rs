use std::{fs, path::PathBuf};

use onsite_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn default_config_targets_the_local_business() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, "ZAR");
    assert_eq!(cfg.month_zone, "local");
    assert_eq!(cfg.finance_key, "finance-store");
    assert_eq!(cfg.auth_key, "auth-store");
    assert!(cfg.enforce_validation && cfg.seed_defaults && cfg.autosave);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert_eq!(manager.load().expect("defaults"), Config::default());

    let mut cfg = Config::default();
    cfg.set_value("month_zone", "+02:00").unwrap();
    cfg.set_value("autosave", "off").unwrap();
    cfg.set_value("export_dir", "/tmp/onsite-exports").unwrap();

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.export_dir, Some(PathBuf::from("/tmp/onsite-exports")));
    assert_eq!(manager.config_path(), dir.path().join("config").join("config.json"));
}

#[test]
fn partial_files_fill_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), r#"{ "currency": "USD" }"#).unwrap();

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.currency, "USD");
    assert_eq!(loaded.month_zone, "local");
    assert_eq!(loaded.backup_retention, 5);
}

#[test]
fn directories_resolve_under_the_base() {
    let cfg = Config::default();
    let base = PathBuf::from("/srv/onsite");
    assert_eq!(cfg.resolve_state_dir(&base), base.join("state"));
    assert_eq!(cfg.resolve_export_dir(&base), base.join("exports"));
}

#[test]
fn bad_settings_are_rejected() {
    let mut cfg = Config::default();
    assert!(matches!(
        cfg.set_value("colour", "red"),
        Err(ConfigError::UnknownKey(_))
    ));
    assert!(matches!(
        cfg.set_value("autosave", "sometimes"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(cfg.set_value("currency", "  ").is_err());
    cfg.set_value("currency", "usd").unwrap();
    assert_eq!(cfg.get_value("currency").unwrap(), "USD");
    for key in Config::KEYS {
        assert!(cfg.get_value(key).is_ok(), "missing getter for {key}");
    }
}

#[test]
fn malformed_file_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(manager.config_path(), "{ nope").unwrap();
    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}
