//! Balance fold over the operation log
//!
//! Current balances are never trusted from storage: they are the initial
//! amounts with every operation applied forward. Reports run the same fold in
//! reverse to roll balances back to an earlier month.

use chrono::NaiveDateTime;

use super::registry::AccountRegistry;
use crate::error::DiaryResult;
use crate::models::{FinanceOperation, NeutralOperation, OperationId, OperationType};

/// Whether operations are applied or undone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

/// An entry in the operation log that moves money between accounts
pub trait LedgerEntry {
    fn id(&self) -> OperationId;

    fn date(&self) -> NaiveDateTime;

    /// Apply (or undo) this entry against the registry
    ///
    /// Either every affected balance changes or none does.
    fn apply_to(&self, accounts: &mut AccountRegistry, direction: Direction) -> DiaryResult<()>;
}

impl LedgerEntry for FinanceOperation {
    fn id(&self) -> OperationId {
        FinanceOperation::id(self)
    }

    fn date(&self) -> NaiveDateTime {
        FinanceOperation::date(self)
    }

    fn apply_to(&self, accounts: &mut AccountRegistry, direction: Direction) -> DiaryResult<()> {
        let account = accounts.default_account_mut()?;
        match (self.operation_type(), direction) {
            (OperationType::Deposit, Direction::Forward)
            | (OperationType::Withdraw, Direction::Reverse) => account.deposit(self.amount())?,
            (OperationType::Withdraw, Direction::Forward)
            | (OperationType::Deposit, Direction::Reverse) => account.withdraw(self.amount())?,
        }
        Ok(())
    }
}

impl LedgerEntry for NeutralOperation {
    fn id(&self) -> OperationId {
        NeutralOperation::id(self)
    }

    fn date(&self) -> NaiveDateTime {
        NeutralOperation::date(self)
    }

    fn apply_to(&self, accounts: &mut AccountRegistry, direction: Direction) -> DiaryResult<()> {
        let (from, to) = match direction {
            Direction::Forward => (self.source_account(), self.destination_account()),
            Direction::Reverse => (self.destination_account(), self.source_account()),
        };

        let (from, to) = accounts.pair_mut(from, to)?;
        from.withdraw(self.amount())?;
        if let Err(e) = to.deposit(self.amount()) {
            // Restores the balance `from` had a moment ago, so it cannot overflow
            from.deposit(self.amount())?;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Fold `entries` into the registry in the given direction
///
/// Stops at the first entry that references an unknown account; entries
/// before it stay applied.
pub fn replay<'a, E, I>(
    accounts: &mut AccountRegistry,
    entries: I,
    direction: Direction,
) -> DiaryResult<()>
where
    E: LedgerEntry + 'a,
    I: IntoIterator<Item = &'a E>,
{
    for entry in entries {
        entry.apply_to(accounts, direction)?;
    }
    Ok(())
}

/// Order entries by date, then id
pub fn sort_entries<E: LedgerEntry>(entries: &mut [E]) {
    entries.sort_by(|a, b| a.date().cmp(&b.date()).then(a.id().cmp(&b.id())));
}
