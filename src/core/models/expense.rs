use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single shared purchase. Immutable once recorded.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    /// Roster id of the payer
    pub paid_by: String,
    /// Payer display name at the time the expense was recorded
    #[serde(default)]
    pub paid_by_name: String,
    /// Roster ids the amount is split evenly between
    pub participants: Vec<String>,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub date: DateTime<Utc>,
    pub receipt_uri: String,
}

impl Expense {
    pub fn share(&self) -> f64 {
        self.amount / self.participants.len() as f64
    }
}

/// Input for recording a new expense; id, date and payer name are assigned on insert.
#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    pub participants: Vec<String>,
    pub receipt_uri: String,
}

/// Gallery entry pairing a receipt photo with the expense it documents.
#[derive(Clone, Debug, Serialize, ToSchema, PartialEq)]
pub struct ReceiptEntry {
    pub expense_id: String,
    pub description: String,
    pub paid_by_name: String,
    pub receipt_uri: String,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub date: DateTime<Utc>,
}

impl From<&Expense> for ReceiptEntry {
    fn from(expense: &Expense) -> Self {
        ReceiptEntry {
            expense_id: expense.id.clone(),
            description: expense.description.clone(),
            paid_by_name: expense.paid_by_name.clone(),
            receipt_uri: expense.receipt_uri.clone(),
            date: expense.date,
        }
    }
}
