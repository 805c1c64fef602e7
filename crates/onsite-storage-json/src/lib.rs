//! onsite-storage-json
//!
//! Filesystem-backed key-value surface. Each key is one JSON document at
//! `<root>/<key>.json`; the previous few versions of every key are kept under
//! `<root>/backups/<key>/`.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use onsite_core::{CoreError, KeyValueStore};
use tracing::debug;

const EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Describes one retained previous version of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub key: String,
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct JsonKeyValueStore {
    root: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonKeyValueStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(root, DEFAULT_RETENTION)
    }

    /// `retention` of zero disables backups.
    pub fn with_retention(root: PathBuf, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&root).map_err(|err| io_error(&root, err))?;
        let backups_dir = root.join("backups");
        Ok(Self {
            root,
            backups_dir,
            retention,
        })
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), EXTENSION))
    }

    fn backup_dir(&self, key: &str) -> PathBuf {
        self.backups_dir.join(canonical_key(key))
    }

    /// Retained versions of `key`, newest first.
    pub fn list_backups(&self, key: &str) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir(key);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir).map_err(|err| io_error(&dir, err))? {
            let path = entry.map_err(|err| io_error(&dir, err))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    key: canonical_key(key),
                    id: file_name.to_string(),
                    created_at: parse_backup_name(file_name).map(|(created_at, _)| created_at),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by(|a, b| {
            Reverse(parse_backup_name(&a.id))
                .cmp(&Reverse(parse_backup_name(&b.id)))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    /// Puts a retained version back in place of the current value of its key.
    pub fn restore_backup(&self, backup: &BackupInfo) -> Result<(), CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Persistence(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let data = fs::read_to_string(&backup.path).map_err(|err| io_error(&backup.path, err))?;
        self.write(&backup.key, &data)
    }

    fn backup_existing(&self, key: &str, path: &Path) -> Result<(), CoreError> {
        if self.retention == 0 || !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(key);
        fs::create_dir_all(&dir).map_err(|err| io_error(&dir, err))?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_path = unique_backup_path(&dir, key, &timestamp);
        fs::copy(path, &backup_path).map_err(|err| io_error(&backup_path, err))?;
        self.prune_backups(key)
    }

    fn prune_backups(&self, key: &str) -> Result<(), CoreError> {
        for entry in self.list_backups(key)?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl KeyValueStore for JsonKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path).map_err(|err| io_error(&path, err))?;
        Ok(Some(data))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        self.backup_existing(key, &path)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path).map_err(|err| io_error(&path, err))?;
        debug!(key, path = %path.display(), bytes = value.len(), "key written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(&path).map_err(|err| io_error(&path, err))?;
        }
        Ok(())
    }
}

fn io_error(path: &Path, err: std::io::Error) -> CoreError {
    CoreError::Persistence(format!("{}: {}", path.display(), err))
}

/// File stem used for `key`: trimmed, lowercased, and with every character other
/// than `a-z`, `0-9` and `-` replaced by `_`. Keys with the same canonical form
/// share one file.
pub fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches(|c| c == '_' || c == '-').is_empty() {
        "store".into()
    } else {
        sanitized
    }
}

/// `<key>_<stamp>.json`, or `<key>_<stamp>-<n>.json` when that second is taken.
fn unique_backup_path(dir: &Path, key: &str, timestamp: &str) -> PathBuf {
    let stem = format!("{}_{}", canonical_key(key), timestamp);
    let mut candidate = dir.join(format!("{}.{}", stem, EXTENSION));
    let mut sequence = 1u32;
    while candidate.exists() {
        candidate = dir.join(format!("{}-{}.{}", stem, sequence, EXTENSION));
        sequence += 1;
    }
    candidate
}

/// Creation time and same-second sequence encoded in a backup file name.
fn parse_backup_name(name: &str) -> Option<(DateTime<Utc>, u32)> {
    let trimmed = name.strip_suffix(&format!(".{}", EXTENSION))?;
    let mut segments = trimmed.rsplitn(3, '_');
    let last = segments.next()?;
    let (time, sequence) = match last.split_once('-') {
        Some((time, sequence)) => (time, sequence.parse().ok()?),
        None => (last, 0),
    };
    let date = segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    let raw = format!("{}{}", date, time);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| (DateTime::from_naive_utc_and_offset(naive, Utc), sequence))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
    }
    let mut file = File::create(path).map_err(|err| io_error(path, err))?;
    file.write_all(data.as_bytes())
        .and_then(|_| file.flush())
        .map_err(|err| io_error(path, err))?;
    Ok(())
}
