//! In-memory CounterStore

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::errors::StoreError;
use crate::ports::CounterStore;

/// In-memory implementation of CounterStore for tests and ephemeral sessions
#[derive(Default)]
pub struct InMemoryCounterStore {
    values: RwLock<HashMap<String, f64>>,
    /// Number of upcoming writes to reject
    failing_writes: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate counters, e.g. to simulate a returning user.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let store = Self::new();
        {
            let mut map = store.values.write();
            for (key, value) in values {
                map.insert(key.into(), value);
            }
        }
        store
    }

    /// Reject the next `count` writes with `StoreError::Unavailable`.
    pub fn fail_next_writes(&self, count: usize) {
        self.failing_writes.store(count, Ordering::SeqCst);
    }

    pub fn value(&self, key: &str) -> Option<f64> {
        self.values.read().get(key).copied()
    }

    /// Successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

#[async_trait]
impl CounterStore for InMemoryCounterStore {
    async fn get(&self, key: &str) -> Result<Option<f64>, StoreError> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: f64) -> Result<(), StoreError> {
        let injected = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if injected.is_ok() {
            return Err(StoreError::Unavailable(format!("write to {} rejected", key)));
        }

        self.values.write().insert(key.to_string(), value);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
