use utoipa::OpenApi;

use crate::{
    api::models::{AddExpenseRequest, ErrorResponse},
    core::models::{Balance, BalanceSummary, Category, Expense, NetBalance, ReceiptEntry, User},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::get_roster,
        super::handlers::list_expenses,
        super::handlers::add_expense,
        super::handlers::get_expense,
        super::handlers::list_receipts,
        super::handlers::get_balances,
        super::handlers::get_balance_chart,
        super::handlers::get_report
    ),
    components(schemas(
        AddExpenseRequest,
        ErrorResponse,
        User,
        Expense,
        ReceiptEntry,
        Balance,
        NetBalance,
        BalanceSummary,
        Category
    )),
    info(
        title = "Splitshot API",
        description = "Shared expenses with mandatory receipts, settled into pairwise transfers",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
