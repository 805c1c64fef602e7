use std::{collections::HashMap, sync::Mutex};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::CoreError;

/// Version written into every persisted envelope.
pub const STATE_VERSION: u32 = 0;

/// Flat key-value surface the stores persist into. Each key holds one whole JSON document.
pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), CoreError>;
    fn remove(&self, key: &str) -> Result<(), CoreError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Reads the state stored under `key`, or `None` when nothing was persisted yet.
pub fn load_state<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, CoreError> {
    let Some(raw) = store.read(key)? else {
        return Ok(None);
    };
    let envelope: Envelope<T> = serde_json::from_str(&raw).map_err(|err| {
        CoreError::Persistence(format!("state under `{}` is unreadable: {}", key, err))
    })?;
    if envelope.version > STATE_VERSION {
        return Err(CoreError::Persistence(format!(
            "state under `{}` has version {}, newer than supported version {}",
            key, envelope.version, STATE_VERSION
        )));
    }
    Ok(Some(envelope.state))
}

/// Writes `state` under `key`, replacing whatever was there.
pub fn save_state<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    state: &T,
) -> Result<(), CoreError> {
    let envelope = Envelope {
        state,
        version: STATE_VERSION,
    };
    let json = serde_json::to_string(&envelope)?;
    store.write(key, &json)
}

/// Process-local store, used for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) -> Result<(), CoreError> {
        self.write(&key.into(), &value.into())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self.entries.lock().map_err(CoreError::persistence)?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().map_err(CoreError::persistence)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let mut entries = self.entries.lock().map_err(CoreError::persistence)?;
        entries.remove(key);
        Ok(())
    }
}
