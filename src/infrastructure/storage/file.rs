use crate::core::constants::STORAGE_KEY;
use crate::core::errors::SplitshotError;
use crate::core::models::Expense;
use crate::infrastructure::storage::ExpenseStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists the expense list as one JSON file per key under a data directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        FileStore::with_key(data_dir, STORAGE_KEY)
    }

    pub fn with_key(data_dir: impl AsRef<Path>, key: &str) -> Self {
        FileStore {
            path: data_dir.as_ref().join(format!("{}.json", file_stem(key))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

// "@split_expenses" -> "split_expenses"
fn file_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .filter_map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '_' | '-' => Some(c),
            '.' | '/' | '\\' | ' ' => Some('_'),
            _ => None,
        })
        .collect();
    if stem.is_empty() { "expenses".to_string() } else { stem }
}

#[async_trait]
impl ExpenseStore for FileStore {
    async fn load(&self) -> Result<Vec<Expense>, SplitshotError> {
        let json = match tokio::fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No expense file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(SplitshotError::StorageError(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };
        Ok(serde_json::from_str(&json)?)
    }

    async fn save(&self, expenses: &[Expense]) -> Result<(), SplitshotError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        // The visible file is only ever replaced whole, via rename
        let json = serde_json::to_string_pretty(expenses)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!("Saved {} expenses to {}", expenses.len(), self.path.display());
        Ok(())
    }
}
