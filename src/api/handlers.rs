use crate::{
    api::models::*,
    core::{
        models::{BalanceSummary, Expense, ReceiptEntry, User},
        services::ExpenseService,
    },
    infrastructure::{
        report::{chart::BalanceChart, html::HtmlReportRenderer},
        storage::ExpenseStore,
    },
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde_json::Value;
use std::sync::Arc;

/// Service shared by every handler; the store is chosen by the binary.
pub type AppService<S> = ExpenseService<S, HtmlReportRenderer>;

// Define API routes
pub fn api_routes<S: ExpenseStore + 'static>(service: Arc<AppService<S>>) -> Router {
    Router::new()
        .route("/roster", get(get_roster::<S>))
        .route("/expenses", get(list_expenses::<S>).post(add_expense::<S>))
        .route("/expenses/{expense_id}", get(get_expense::<S>))
        .route("/receipts", get(list_receipts::<S>))
        .route("/balances", get(get_balances::<S>))
        .route("/balances/chart", get(get_balance_chart::<S>))
        .route("/report", get(get_report::<S>))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/api/roster",
    responses(
        (status = 200, description = "Fixed roster of people sharing expenses", body = Vec<User>)
    )
)]
pub(crate) async fn get_roster<S: ExpenseStore + 'static>(
    State(service): State<Arc<AppService<S>>>,
) -> Json<Vec<User>> {
    Json(service.roster().to_vec())
}

#[utoipa::path(
    get,
    path = "/api/expenses",
    responses(
        (status = 200, description = "All recorded expenses in insertion order", body = Vec<Expense>)
    )
)]
pub(crate) async fn list_expenses<S: ExpenseStore + 'static>(
    State(service): State<Arc<AppService<S>>>,
) -> Json<Vec<Expense>> {
    Json(service.expenses().await)
}

#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = AddExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded", body = Expense),
        (status = 400, description = "Invalid expense", body = ErrorResponse),
        (status = 500, description = "Expense could not be persisted", body = ErrorResponse)
    )
)]
pub(crate) async fn add_expense<S: ExpenseStore + 'static>(
    State(service): State<Arc<AppService<S>>>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = service.add_expense(req.into()).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

#[utoipa::path(
    get,
    path = "/api/expenses/{expense_id}",
    params(("expense_id" = String, Path, description = "Expense id")),
    responses(
        (status = 200, description = "Expense found", body = Expense),
        (status = 404, description = "Expense not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_expense<S: ExpenseStore + 'static>(
    State(service): State<Arc<AppService<S>>>,
    Path(expense_id): Path<String>,
) -> Result<Json<Expense>, ApiError> {
    let expense = service.get_expense(&expense_id).await?;
    Ok(Json(expense))
}

#[utoipa::path(
    get,
    path = "/api/receipts",
    responses(
        (status = 200, description = "Receipt photo gallery", body = Vec<ReceiptEntry>)
    )
)]
pub(crate) async fn list_receipts<S: ExpenseStore + 'static>(
    State(service): State<Arc<AppService<S>>>,
) -> Json<Vec<ReceiptEntry>> {
    Json(service.receipts().await)
}

#[utoipa::path(
    get,
    path = "/api/balances",
    responses(
        (status = 200, description = "Totals, average and settlement transfers", body = BalanceSummary),
        (status = 400, description = "Stored expenses do not match the roster", body = ErrorResponse)
    )
)]
pub(crate) async fn get_balances<S: ExpenseStore + 'static>(
    State(service): State<Arc<AppService<S>>>,
) -> Result<Json<BalanceSummary>, ApiError> {
    let summary = service.summary().await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/balances/chart",
    responses(
        (status = 200, description = "Chart.js bar chart of net balances"),
        (status = 400, description = "Stored expenses do not match the roster", body = ErrorResponse)
    )
)]
pub(crate) async fn get_balance_chart<S: ExpenseStore + 'static>(
    State(service): State<Arc<AppService<S>>>,
) -> Result<Json<Value>, ApiError> {
    let net_balances = service.net_balances().await?;
    Ok(Json(BalanceChart::net_balance_chart(&net_balances, "Net balances")))
}

#[utoipa::path(
    get,
    path = "/api/report",
    responses(
        (status = 200, description = "Rendered expense report", body = String, content_type = "text/html"),
        (status = 400, description = "No expenses recorded yet", body = ErrorResponse),
        (status = 500, description = "Report could not be rendered", body = ErrorResponse)
    )
)]
pub(crate) async fn get_report<S: ExpenseStore + 'static>(
    State(service): State<Arc<AppService<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let report = service.render_report().await?;
    Ok(([(header::CONTENT_TYPE, report.content_type)], report.body))
}
