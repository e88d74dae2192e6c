//! Debt settlement over a snapshot of expenses.
//!
//! Every function here is pure: it takes the expense list and the roster by
//! reference, validates them, and derives its result without touching any
//! shared state. Intermediate shares stay unrounded; only recorded transfers
//! are rounded to cents.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::core::constants::SETTLEMENT_EPSILON;
use crate::core::errors::SplitshotError;
use crate::core::models::{Balance, Expense, NetBalance, TotalsByPerson, User};

/// Roster id -> position in the roster.
type RosterIndex<'a> = HashMap<&'a str, usize>;

/// Rejects an empty roster and duplicate ids or display names.
pub fn validate_roster(roster: &[User]) -> Result<(), SplitshotError> {
    index_roster(roster).map(|_| ())
}

fn index_roster(roster: &[User]) -> Result<RosterIndex<'_>, SplitshotError> {
    if roster.is_empty() {
        return Err(SplitshotError::EmptyRoster);
    }

    let mut index = HashMap::with_capacity(roster.len());
    let mut names = HashSet::with_capacity(roster.len());
    for (position, user) in roster.iter().enumerate() {
        if index.insert(user.id.as_str(), position).is_some() {
            return Err(SplitshotError::DuplicateRosterEntry(user.id.clone()));
        }
        if !names.insert(user.name.as_str()) {
            return Err(SplitshotError::DuplicateRosterEntry(user.name.clone()));
        }
    }
    Ok(index)
}

/// Checks a single expense against the roster.
pub fn validate_expense(expense: &Expense, roster: &[User]) -> Result<(), SplitshotError> {
    let index = index_roster(roster)?;
    check_expense(expense, &index)
}

fn check_expense(expense: &Expense, index: &RosterIndex<'_>) -> Result<(), SplitshotError> {
    if !expense.amount.is_finite() || expense.amount <= 0.0 {
        return Err(SplitshotError::InvalidAmount(expense.id.clone()));
    }
    if !index.contains_key(expense.paid_by.as_str()) {
        return Err(SplitshotError::UnknownUser(expense.paid_by.clone()));
    }
    if expense.participants.is_empty() {
        return Err(SplitshotError::EmptyParticipants(expense.id.clone()));
    }

    let mut seen = HashSet::with_capacity(expense.participants.len());
    for participant in &expense.participants {
        if !index.contains_key(participant.as_str()) {
            return Err(SplitshotError::UnknownUser(participant.clone()));
        }
        if !seen.insert(participant.as_str()) {
            return Err(SplitshotError::DuplicateParticipant(participant.clone()));
        }
    }
    Ok(())
}

fn validate_all<'a>(
    expenses: &[Expense],
    roster: &'a [User],
) -> Result<RosterIndex<'a>, SplitshotError> {
    let index = index_roster(roster)?;
    for expense in expenses {
        check_expense(expense, &index)?;
    }
    Ok(index)
}

/// Paid and owed per roster position. Input must already be validated.
fn accumulate(expenses: &[Expense], roster_len: usize, index: &RosterIndex<'_>) -> Vec<(f64, f64)> {
    let mut ledger = vec![(0.0_f64, 0.0_f64); roster_len];

    for expense in expenses {
        ledger[index[expense.paid_by.as_str()]].0 += expense.amount;
        let share = expense.share();
        for participant in &expense.participants {
            ledger[index[participant.as_str()]].1 += share;
        }
    }
    ledger
}

/// Paid, owed and net position for every roster user, in roster order.
pub fn compute_net_balances(
    expenses: &[Expense],
    roster: &[User],
) -> Result<Vec<NetBalance>, SplitshotError> {
    let index = validate_all(expenses, roster)?;
    let ledger = accumulate(expenses, roster.len(), &index);

    Ok(roster
        .iter()
        .zip(ledger)
        .map(|(user, (paid, owed))| NetBalance {
            user_id: user.id.clone(),
            name: user.name.clone(),
            paid,
            owed,
            net: paid - owed,
        })
        .collect())
}

/// Reduces all obligations to a short list of pairwise transfers.
///
/// Debtors and creditors are each ordered by descending magnitude (stable, so
/// ties keep roster order) and matched greedily, largest against largest.
/// Transfers at or below one cent are dropped.
pub fn compute_balances(expenses: &[Expense], roster: &[User]) -> Result<Vec<Balance>, SplitshotError> {
    let index = validate_all(expenses, roster)?;
    let ledger = accumulate(expenses, roster.len(), &index);

    let mut debtors: Vec<(usize, f64)> = Vec::new();
    let mut creditors: Vec<(usize, f64)> = Vec::new();
    for (position, (paid, owed)) in ledger.into_iter().enumerate() {
        let net = paid - owed;
        if net < -SETTLEMENT_EPSILON {
            debtors.push((position, -net));
        } else if net > SETTLEMENT_EPSILON {
            creditors.push((position, net));
        }
    }

    debtors.sort_by(|a, b| b.1.total_cmp(&a.1));
    creditors.sort_by(|a, b| b.1.total_cmp(&a.1));
    debug!("Settling {} debtors against {} creditors", debtors.len(), creditors.len());

    let mut settled = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let transfer = debtors[i].1.min(creditors[j].1);

        if transfer > SETTLEMENT_EPSILON {
            settled.push(Balance {
                from: roster[debtors[i].0].name.clone(),
                to: roster[creditors[j].0].name.clone(),
                amount: round_cents(transfer),
            });
        }

        debtors[i].1 -= transfer;
        creditors[j].1 -= transfer;

        if debtors[i].1 < SETTLEMENT_EPSILON {
            i += 1;
        }
        if creditors[j].1 < SETTLEMENT_EPSILON {
            j += 1;
        }
    }

    debug!("Settlement produced {} transfers", settled.len());
    Ok(settled)
}

/// Sum paid by each roster user, zero for users who paid nothing.
pub fn compute_totals_by_person(
    expenses: &[Expense],
    roster: &[User],
) -> Result<TotalsByPerson, SplitshotError> {
    let index = validate_all(expenses, roster)?;
    let mut totals: Vec<(String, f64)> = roster.iter().map(|u| (u.name.clone(), 0.0)).collect();

    for expense in expenses {
        totals[index[expense.paid_by.as_str()]].1 += expense.amount;
    }
    Ok(TotalsByPerson::from_entries(totals))
}

/// Total spend divided by roster size.
///
/// Not the mean expense and not weighted by participation: a roster member who
/// joined no expense still counts in the denominator.
pub fn compute_average(expenses: &[Expense], roster: &[User]) -> Result<f64, SplitshotError> {
    validate_all(expenses, roster)?;
    Ok(total_amount(expenses) / roster.len() as f64)
}

/// Sum of all amounts; `0.0` (never `-0.0`) for an empty list.
pub fn total_amount(expenses: &[Expense]) -> f64 {
    expenses.iter().fold(0.0, |acc, e| acc + e.amount)
}

/// Rounds half away from zero to two decimals.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
