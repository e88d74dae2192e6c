mod api_tests;
mod report_tests;

use crate::core::models::{Expense, NewExpense, User};
use crate::core::services::ExpenseService;
use crate::infrastructure::report::html::HtmlReportRenderer;
use crate::infrastructure::storage::in_memory::InMemoryStore;
use chrono::{TimeZone, Utc};

pub fn roster() -> Vec<User> {
    vec![User::new("1", "Juan"), User::new("2", "María"), User::new("3", "Pedro")]
}

pub fn expense(id: &str, amount: f64, paid_by: &str, participants: &[&str]) -> Expense {
    Expense {
        id: id.to_string(),
        description: format!("Expense {}", id),
        amount,
        paid_by: paid_by.to_string(),
        paid_by_name: String::new(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        date: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        receipt_uri: format!("file:///receipts/{}.jpg", id),
    }
}

pub fn new_expense(description: &str, amount: f64, paid_by: &str, participants: &[&str]) -> NewExpense {
    NewExpense {
        description: description.to_string(),
        amount,
        paid_by: paid_by.to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        receipt_uri: "file:///receipts/photo.jpg".to_string(),
    }
}

pub fn create_test_service() -> ExpenseService<InMemoryStore, HtmlReportRenderer> {
    let _ = env_logger::try_init();
    ExpenseService::new(roster(), InMemoryStore::new(), HtmlReportRenderer::new("Test Report")).unwrap()
}
