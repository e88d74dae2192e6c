use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::SplitshotError;
use crate::core::models::NewExpense;

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    pub participants: Vec<String>,
    /// Location of the receipt photo; required
    pub receipt_uri: String,
}

impl From<AddExpenseRequest> for NewExpense {
    fn from(req: AddExpenseRequest) -> Self {
        NewExpense {
            description: req.description,
            amount: req.amount,
            paid_by: req.paid_by,
            participants: req.participants,
            receipt_uri: req.receipt_uri,
        }
    }
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for SplitshotError to implement IntoResponse
#[derive(Debug)]
pub struct ApiError(pub SplitshotError);

impl From<SplitshotError> for ApiError {
    fn from(err: SplitshotError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            err if err.is_validation() => StatusCode::BAD_REQUEST,
            SplitshotError::ExpenseNotFound(_) => StatusCode::NOT_FOUND,
            // Storage, report and config failures
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match &self.0 {
            SplitshotError::InvalidInput(_, detail) => format!("{}: {}", detail.title, detail.description),
            err => err.to_string(),
        };
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}
