use crate::core::constants::STORAGE_KEY;
use crate::core::errors::SplitshotError;
use crate::core::models::Expense;
use crate::infrastructure::storage::ExpenseStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// String key-value store holding serialized JSON, like a device's local storage.
#[derive(Clone)]
pub struct InMemoryStore {
    key: String,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::with_key(STORAGE_KEY)
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        InMemoryStore {
            key: key.into(),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Raw stored value, for inspecting what was persisted.
    pub async fn raw(&self) -> Option<String> {
        self.entries.read().await.get(&self.key).cloned()
    }

    /// Overwrites the stored value verbatim.
    pub async fn put_raw(&self, value: impl Into<String>) {
        self.entries.write().await.insert(self.key.clone(), value.into());
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        InMemoryStore::new()
    }
}

#[async_trait]
impl ExpenseStore for InMemoryStore {
    async fn load(&self) -> Result<Vec<Expense>, SplitshotError> {
        let entries = self.entries.read().await;
        match entries.get(&self.key) {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save(&self, expenses: &[Expense]) -> Result<(), SplitshotError> {
        let json = serde_json::to_string(expenses)?;
        self.entries.write().await.insert(self.key.clone(), json);
        Ok(())
    }
}
