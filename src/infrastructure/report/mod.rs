pub mod chart;
pub mod html;

use crate::core::errors::SplitshotError;
use crate::core::models::{Balance, Expense, TotalsByPerson};
use chrono::{DateTime, Utc};

/// Snapshot handed to a renderer. Field names and 2-decimal amounts are the
/// contract between settlement output and the rendered document.
pub struct ReportInput<'a> {
    pub expenses: &'a [Expense],
    pub balances: &'a [Balance],
    pub totals_by_person: &'a TotalsByPerson,
    pub generated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RenderedReport {
    pub content_type: &'static str,
    pub body: String,
}

pub trait ReportRenderer: Send + Sync {
    fn render(&self, input: &ReportInput<'_>) -> Result<RenderedReport, SplitshotError>;
}

pub(crate) fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}
