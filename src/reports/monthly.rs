//! Monthly Report
//!
//! A read-only projection of the ledger: a private copy of the account
//! balances plus both operation logs in (date, id) order. Filtering to one
//! calendar month rolls the copied balances back to that month's close.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::ledger::{sort_entries, AccountRegistry, Direction, LedgerEntry};
use crate::models::{FinanceOperation, NeutralOperation};

/// Snapshot of accounts and operation history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    accounts: AccountRegistry,
    finance_operations: Vec<FinanceOperation>,
    neutral_operations: Vec<NeutralOperation>,
}

impl Report {
    /// The report returned for a month that does not exist
    pub const EMPTY: Report = Report {
        accounts: AccountRegistry::EMPTY,
        finance_operations: Vec::new(),
        neutral_operations: Vec::new(),
    };

    pub fn new(
        accounts: AccountRegistry,
        mut finance_operations: Vec<FinanceOperation>,
        mut neutral_operations: Vec<NeutralOperation>,
    ) -> Self {
        sort_entries(&mut finance_operations);
        sort_entries(&mut neutral_operations);
        Self {
            accounts,
            finance_operations,
            neutral_operations,
        }
    }

    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    pub fn finance_operations(&self) -> &[FinanceOperation] {
        &self.finance_operations
    }

    pub fn neutral_operations(&self) -> &[NeutralOperation] {
        &self.neutral_operations
    }

    /// Sum of every balance in the snapshot
    pub fn total(&self) -> i128 {
        self.accounts.total()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
            && self.finance_operations.is_empty()
            && self.neutral_operations.is_empty()
    }

    /// Operations of one calendar month with balances as of its close
    ///
    /// Every operation dated on or after the first day of the following month
    /// is undone, latest first, against a copy of the balances. A month outside
    /// 1..=12 yields [`Report::EMPTY`].
    pub fn filter_by_month_and_year(&self, month: u32, year: i32) -> Report {
        let Some(cutoff) = start_of_next_month(month, year) else {
            return Report::EMPTY;
        };

        let in_month = |date: NaiveDateTime| date.month() == month && date.year() == year;

        let mut accounts = self.accounts.clone();
        roll_back(&mut accounts, &self.neutral_operations, cutoff);
        roll_back(&mut accounts, &self.finance_operations, cutoff);

        Report {
            accounts,
            finance_operations: self
                .finance_operations
                .iter()
                .filter(|op| in_month(op.date()))
                .cloned()
                .collect(),
            neutral_operations: self
                .neutral_operations
                .iter()
                .filter(|op| in_month(op.date()))
                .cloned()
                .collect(),
        }
    }
}

/// Midnight on the first day after the given month
fn start_of_next_month(month: u32, year: i32) -> Option<NaiveDateTime> {
    if !(1..=12).contains(&month) {
        return None;
    }

    let (next_month, next_year) = if month == 12 {
        (1, year.checked_add(1)?)
    } else {
        (month + 1, year)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.and_hms_opt(0, 0, 0)
}

/// Undo every entry dated at or after `cutoff`, newest first
fn roll_back<E: LedgerEntry>(accounts: &mut AccountRegistry, entries: &[E], cutoff: NaiveDateTime) {
    for entry in entries.iter().rev().filter(|entry| entry.date() >= cutoff) {
        if let Err(e) = entry.apply_to(accounts, Direction::Reverse) {
            tracing::warn!("Skipping operation {} while rolling back: {}", entry.id(), e);
        }
    }
}
