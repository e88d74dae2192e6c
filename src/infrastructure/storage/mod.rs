use crate::core::errors::SplitshotError;
use crate::core::models::Expense;
use async_trait::async_trait;

/// Key-value persistence for the whole expense list.
///
/// The list is always read and written in one piece under a single fixed key;
/// there is no query or partial update.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Returns an empty list when nothing has been saved yet.
    async fn load(&self) -> Result<Vec<Expense>, SplitshotError>;
    async fn save(&self, expenses: &[Expense]) -> Result<(), SplitshotError>;
}

pub mod file;
pub mod in_memory;
