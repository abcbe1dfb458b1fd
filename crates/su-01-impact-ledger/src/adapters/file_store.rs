//! JSON file-backed CounterStore
//!
//! All counters live in one JSON object. Every write rewrites a temporary file
//! and renames it over the original, so a crash never leaves a half-written file.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::errors::StoreError;
use crate::ports::CounterStore;

pub struct JsonFileCounterStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, f64>>,
}

impl JsonFileCounterStore {
    /// Open the store at `path`, creating an empty one if the file does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
                key: path.display().to_string(),
                reason: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        debug!(path = %path.display(), counters = values.len(), "Opened counter file");

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_file(&self, values: &BTreeMap<String, f64>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(values).map_err(|e| StoreError::Corrupt {
            key: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl CounterStore for JsonFileCounterStore {
    async fn get(&self, key: &str) -> Result<Option<f64>, StoreError> {
        Ok(self.values.lock().await.get(key).copied())
    }

    async fn set(&self, key: &str, value: f64) -> Result<(), StoreError> {
        self.set_many(&[(key.to_string(), value)]).await
    }

    async fn set_many(&self, entries: &[(String, f64)]) -> Result<(), StoreError> {
        if let Some((key, _)) = entries.iter().find(|(_, v)| !v.is_finite()) {
            return Err(StoreError::Corrupt {
                key: key.clone(),
                reason: "non-finite value".into(),
            });
        }

        let mut values = self.values.lock().await;
        let mut next = values.clone();
        for (key, value) in entries {
            next.insert(key.clone(), *value);
        }

        // Cache only advances once the file is durable
        self.write_file(&next).await?;
        *values = next;
        Ok(())
    }
}
