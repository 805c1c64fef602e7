#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use onsite::{cli::args::ParsedArgs, cli::execute, AppContext, CliError};
use onsite_config::{Config, ConfigManager};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Writes a config (UTC months, then `configure`) into a fresh base and opens it.
pub fn setup_test_env(configure: impl FnOnce(&mut Config)) -> (AppContext, PathBuf) {
    let base = temp_base();
    let manager = ConfigManager::with_base_dir(base.clone()).expect("config manager");
    let mut config = Config::default();
    config.month_zone = "utc".into();
    configure(&mut config);
    manager.save(&config).expect("save config");
    let context = AppContext::open_at(base.clone()).expect("open context");
    (context, base)
}

/// Runs one command line (already split into words) and returns its stdout.
pub fn run(context: &mut AppContext, words: &[&str]) -> Result<String, CliError> {
    let args = ParsedArgs::parse(words.iter().copied())?;
    let mut out = Vec::new();
    execute(context, &args, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}
