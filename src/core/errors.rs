use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum SplitshotError {
    /// Balances cannot be computed over nobody
    #[error("Roster must contain at least one user")]
    EmptyRoster,

    /// Two roster entries share an id or a display name
    #[error("Duplicate roster entry: {0}")]
    DuplicateRosterEntry(String),

    /// Payer or participant id is not part of the roster
    #[error("User {0} is not in the roster")]
    UnknownUser(String),

    /// Amount is zero, negative, NaN or infinite
    #[error("Expense {0} has an invalid amount")]
    InvalidAmount(String),

    /// Nobody to split the expense between
    #[error("Expense {0} has no participants")]
    EmptyParticipants(String),

    /// Same participant listed more than once on an expense
    #[error("Participant {0} is listed more than once")]
    DuplicateParticipant(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("No expenses recorded yet")]
    NoExpenses,

    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SplitshotError {
    /// True for errors caused by malformed input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SplitshotError::EmptyRoster
                | SplitshotError::DuplicateRosterEntry(_)
                | SplitshotError::UnknownUser(_)
                | SplitshotError::InvalidAmount(_)
                | SplitshotError::EmptyParticipants(_)
                | SplitshotError::DuplicateParticipant(_)
                | SplitshotError::InvalidInput(_, _)
                | SplitshotError::NoExpenses
        )
    }

    pub(crate) fn invalid_input(field: &str, title: &str, description: impl Into<String>) -> Self {
        SplitshotError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.to_string(),
                description: description.into(),
            },
        )
    }
}

impl From<serde_json::Error> for SplitshotError {
    fn from(err: serde_json::Error) -> Self {
        SplitshotError::StorageError(format!("Serialization failed: {}", err))
    }
}

impl From<std::io::Error> for SplitshotError {
    fn from(err: std::io::Error) -> Self {
        SplitshotError::StorageError(err.to_string())
    }
}
