use crate::core::constants::{
    BALANCES_QUERIED, EXPENSE_ADDED, EXPENSES_LOADED, EXPENSES_SAVE_FAILED, MAX_DESCRIPTION_LENGTH,
    REPORT_GENERATED,
};
use crate::core::errors::SplitshotError;
use crate::core::models::{
    Balance, BalanceSummary, Expense, NetBalance, NewExpense, ReceiptEntry, User,
};
use crate::core::settlement::{self, validate_expense, validate_roster};
use crate::infrastructure::report::{RenderedReport, ReportInput, ReportRenderer};
use crate::infrastructure::storage::ExpenseStore;
use chrono::Utc;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Expense list as persisted, next to the part of it the roster can settle.
#[derive(Default)]
struct ExpenseLedger {
    /// Written back whole on every save, including held-back records
    stored: Vec<Expense>,
    active: Vec<Expense>,
}

/// Application state: the fixed roster plus the append-only expense list.
///
/// Settlement figures are always derived from a snapshot of the list taken
/// under the read lock; nothing derived is cached or persisted.
pub struct ExpenseService<S: ExpenseStore, R: ReportRenderer> {
    roster: Vec<User>,
    ledger: RwLock<ExpenseLedger>,
    storage: S,
    renderer: R,
}

impl<S: ExpenseStore, R: ReportRenderer> ExpenseService<S, R> {
    pub fn new(roster: Vec<User>, storage: S, renderer: R) -> Result<Self, SplitshotError> {
        validate_roster(&roster)?;
        Ok(ExpenseService {
            roster,
            ledger: RwLock::new(ExpenseLedger::default()),
            storage,
            renderer,
        })
    }

    pub fn roster(&self) -> &[User] {
        &self.roster
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replaces the in-memory list with whatever the store holds.
    ///
    /// A failed read leaves the service with an empty list. Stored expenses
    /// that no longer fit the roster are held back: they are left out of every
    /// view and calculation but still written back on save. Returns the number
    /// kept.
    pub async fn load(&self) -> usize {
        let stored = match self.storage.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to load expenses, starting with an empty list");
                Vec::new()
            }
        };

        let total = stored.len();
        let active: Vec<Expense> = stored
            .iter()
            .filter(|expense| match validate_expense(expense, &self.roster) {
                Ok(()) => true,
                Err(e) => {
                    warn!(expense_id = %expense.id, error = %e, "Holding back stored expense");
                    false
                }
            })
            .cloned()
            .collect();

        let kept = active.len();
        *self.ledger.write().await = ExpenseLedger { stored, active };
        info!(action = EXPENSES_LOADED, kept, held_back = total - kept, "Expenses loaded");
        kept
    }

    pub async fn expenses(&self) -> Vec<Expense> {
        self.ledger.read().await.active.clone()
    }

    pub async fn get_expense(&self, expense_id: &str) -> Result<Expense, SplitshotError> {
        self.ledger
            .read()
            .await
            .active
            .iter()
            .find(|e| e.id == expense_id)
            .cloned()
            .ok_or_else(|| SplitshotError::ExpenseNotFound(expense_id.to_string()))
    }

    pub async fn receipts(&self) -> Vec<ReceiptEntry> {
        self.ledger.read().await.active.iter().map(ReceiptEntry::from).collect()
    }

    /// Validates and records a new expense, then persists the whole list.
    ///
    /// If saving fails the expense stays in memory and the storage error is
    /// returned so the caller can warn the user.
    pub async fn add_expense(&self, new_expense: NewExpense) -> Result<Expense, SplitshotError> {
        let description = new_expense.description.trim().to_string();
        self.validate_string_input("description", &description, MAX_DESCRIPTION_LENGTH)?;
        self.validate_amount_input("amount", new_expense.amount)?;

        let payer = self
            .roster
            .iter()
            .find(|u| u.id == new_expense.paid_by)
            .ok_or_else(|| SplitshotError::UnknownUser(new_expense.paid_by.clone()))?;

        self.validate_participants(&new_expense.participants)?;

        if new_expense.receipt_uri.trim().is_empty() {
            return Err(SplitshotError::invalid_input(
                "receipt_uri",
                "Receipt Required",
                "A receipt photo is mandatory for every expense",
            ));
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            description,
            amount: new_expense.amount,
            paid_by: payer.id.clone(),
            paid_by_name: payer.name.clone(),
            participants: new_expense.participants,
            date: Utc::now(),
            receipt_uri: new_expense.receipt_uri.trim().to_string(),
        };
        validate_expense(&expense, &self.roster)?;

        let mut ledger = self.ledger.write().await;
        ledger.active.push(expense.clone());
        ledger.stored.push(expense.clone());
        if let Err(e) = self.storage.save(&ledger.stored).await {
            warn!(action = EXPENSES_SAVE_FAILED, expense_id = %expense.id, error = %e, "Expense kept in memory only");
            return Err(e);
        }

        info!(
            action = EXPENSE_ADDED,
            expense_id = %expense.id,
            amount = expense.amount,
            paid_by = %expense.paid_by,
            "Expense recorded"
        );
        Ok(expense)
    }

    pub async fn balances(&self) -> Result<Vec<Balance>, SplitshotError> {
        let ledger = self.ledger.read().await;
        let expenses = &ledger.active;
        settlement::compute_balances(expenses, &self.roster)
    }

    pub async fn net_balances(&self) -> Result<Vec<NetBalance>, SplitshotError> {
        let ledger = self.ledger.read().await;
        let expenses = &ledger.active;
        settlement::compute_net_balances(expenses, &self.roster)
    }

    pub async fn summary(&self) -> Result<BalanceSummary, SplitshotError> {
        let ledger = self.ledger.read().await;
        let expenses = &ledger.active;

        let summary = BalanceSummary {
            expense_count: expenses.len(),
            total_amount: settlement::total_amount(expenses),
            average: settlement::compute_average(expenses, &self.roster)?,
            totals_by_person: settlement::compute_totals_by_person(expenses, &self.roster)?,
            balances: settlement::compute_balances(expenses, &self.roster)?,
        };
        debug!(action = BALANCES_QUERIED, transfers = summary.balances.len(), "Balance summary computed");
        Ok(summary)
    }

    pub async fn render_report(&self) -> Result<RenderedReport, SplitshotError> {
        let ledger = self.ledger.read().await;
        let expenses = &ledger.active;
        if expenses.is_empty() {
            return Err(SplitshotError::NoExpenses);
        }
        let balances = settlement::compute_balances(expenses, &self.roster)?;
        let totals_by_person = settlement::compute_totals_by_person(expenses, &self.roster)?;

        let report = self.renderer.render(&ReportInput {
            expenses,
            balances: &balances,
            totals_by_person: &totals_by_person,
            generated_at: Utc::now(),
        })?;
        info!(action = REPORT_GENERATED, expenses = expenses.len(), bytes = report.body.len(), "Report rendered");
        Ok(report)
    }

    fn validate_participants(&self, participants: &[String]) -> Result<(), SplitshotError> {
        if participants.is_empty() {
            return Err(SplitshotError::invalid_input(
                "participants",
                "Invalid participants",
                "Select at least one participant",
            ));
        }

        let mut seen = HashSet::with_capacity(participants.len());
        for participant in participants {
            if !self.roster.iter().any(|u| u.id == *participant) {
                return Err(SplitshotError::UnknownUser(participant.clone()));
            }
            if !seen.insert(participant.as_str()) {
                return Err(SplitshotError::DuplicateParticipant(participant.clone()));
            }
        }
        Ok(())
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), SplitshotError> {
        if value.trim().is_empty() {
            return Err(SplitshotError::invalid_input(
                field,
                &format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.chars().count() > max_length {
            return Err(SplitshotError::invalid_input(
                field,
                &format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(SplitshotError::invalid_input(
                field,
                &format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), SplitshotError> {
        if !amount.is_finite() {
            return Err(SplitshotError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number",
            ));
        }
        if amount <= 0.0 {
            return Err(SplitshotError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be greater than 0",
            ));
        }
        Ok(())
    }
}
