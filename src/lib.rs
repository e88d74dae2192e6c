pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::SplitshotError;
pub use crate::core::services::ExpenseService;
pub use crate::core::settlement::{
    compute_average, compute_balances, compute_net_balances, compute_totals_by_person,
};
pub use crate::infrastructure::storage::{ExpenseStore, file::FileStore, in_memory::InMemoryStore};

#[cfg(test)]
mod tests;
