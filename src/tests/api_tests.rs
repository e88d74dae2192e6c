use crate::api::handlers::{
    AppService, add_expense, get_balances, get_expense, get_report, get_roster, list_receipts,
};
use crate::api::models::{AddExpenseRequest, ApiError};
use crate::core::errors::SplitshotError;
use crate::infrastructure::report::html::HtmlReportRenderer;
use crate::infrastructure::storage::ExpenseStore;
use crate::infrastructure::storage::file::FileStore;
use crate::infrastructure::storage::in_memory::InMemoryStore;
use crate::tests::roster;
use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tempfile::tempdir;

fn create_app_service() -> Arc<AppService<InMemoryStore>> {
    let _ = env_logger::try_init();
    let service = AppService::new(roster(), InMemoryStore::new(), HtmlReportRenderer::new("Trip")).unwrap();
    Arc::new(service)
}

fn request(description: &str, amount: f64, paid_by: &str, participants: &[&str]) -> AddExpenseRequest {
    AddExpenseRequest {
        description: description.to_string(),
        amount,
        paid_by: paid_by.to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        receipt_uri: "file:///receipts/ticket.jpg".to_string(),
    }
}

#[tokio::test]
async fn test_add_expense_then_query_balances() {
    let service = create_app_service();

    let Ok((status, Json(created))) =
        add_expense(State(service.clone()), Json(request("Hotel", 120.0, "3", &["1", "2", "3"]))).await
    else {
        panic!("expense should be accepted");
    };
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.paid_by_name, "Pedro");

    let Json(found) = get_expense(State(service.clone()), Path(created.id.clone())).await.unwrap();
    assert_eq!(found, created);

    let Json(summary) = get_balances(State(service.clone())).await.unwrap();
    assert_eq!(summary.expense_count, 1);
    assert_eq!(summary.total_amount, 120.0);
    assert_eq!(summary.balances.len(), 2);
    assert!(summary.balances.iter().all(|b| b.to == "Pedro" && b.amount == 40.0));

    let Json(receipts) = list_receipts(State(service.clone())).await;
    assert_eq!(receipts[0].receipt_uri, "file:///receipts/ticket.jpg");

    let Json(users) = get_roster(State(service)).await;
    assert_eq!(users, roster());
}

#[tokio::test]
async fn test_added_expense_lands_in_the_data_dir() {
    let tmp = tempdir().unwrap();
    let service = Arc::new(
        AppService::new(roster(), FileStore::new(tmp.path()), HtmlReportRenderer::new("Trip")).unwrap(),
    );

    let Ok((_, Json(created))) =
        add_expense(State(service.clone()), Json(request("Taxi", 30.0, "1", &["1", "2"]))).await
    else {
        panic!("expense should be accepted");
    };

    let reopened = FileStore::new(tmp.path());
    assert_eq!(reopened.load().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn test_rejected_expense_maps_to_bad_request() {
    let service = create_app_service();

    let Err(err) = add_expense(State(service.clone()), Json(request("Hotel", -1.0, "3", &["3"]))).await else {
        panic!("negative amount should be rejected");
    };
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let Err(err) = add_expense(State(service.clone()), Json(request("Hotel", 10.0, "3", &["3", "5"]))).await else {
        panic!("unknown participant should be rejected");
    };
    assert_eq!(err.0, SplitshotError::UnknownUser("5".to_string()));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    assert!(service.expenses().await.is_empty());
    assert!(service.storage().raw().await.is_none());
}

#[tokio::test]
async fn test_missing_expense_maps_to_not_found() {
    let service = create_app_service();

    let err = get_expense(State(service), Path("nope".to_string())).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_report_is_served_as_html() {
    let service = create_app_service();
    add_expense(State(service.clone()), Json(request("Cena", 45.0, "2", &["1", "2", "3"])))
        .await
        .unwrap();

    let Ok(report) = get_report(State(service)).await else {
        panic!("report should render");
    };
    let response = report.into_response();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html; charset=utf-8"
    );
}

#[tokio::test]
async fn test_report_without_expenses_is_bad_request() {
    let service = create_app_service();

    let Err(err) = get_report(State(service)).await else {
        panic!("an empty list has nothing to report");
    };
    assert_eq!(err.0, SplitshotError::NoExpenses);
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_storage_failure_maps_to_server_error() {
    let err = ApiError::from(SplitshotError::StorageError("disk full".to_string()));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}
