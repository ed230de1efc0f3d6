//! Operation factory
//!
//! Validates raw operation input and stamps each accepted operation with the
//! next sequential id. Rejected input does not consume an id.

use super::ids::IdGenerator;
use crate::error::ValidationError;
use crate::models::{FinanceOperation, NeutralOperation, OperationId};

#[derive(Debug, Clone, Default)]
pub struct OperationFactory {
    ids: IdGenerator,
}

impl OperationFactory {
    pub fn new(ids: IdGenerator) -> Self {
        Self { ids }
    }

    /// Build a deposit or withdrawal; see [`FinanceOperation::new`] for the check order
    pub fn create_finance_operation<S: AsRef<str>>(
        &mut self,
        date: &str,
        operation_type: &str,
        amount: i64,
        kinds: &[S],
        reason: &str,
    ) -> Result<FinanceOperation, ValidationError> {
        let operation = FinanceOperation::new(
            self.ids.peek(),
            date,
            operation_type,
            amount,
            kinds,
            reason,
        )?;
        self.ids.next_id();
        Ok(operation)
    }

    /// Build a transfer between two named accounts
    pub fn create_neutral_operation(
        &mut self,
        date: &str,
        amount: i64,
        source_account: &str,
        destination_account: &str,
        reason: &str,
    ) -> Result<NeutralOperation, ValidationError> {
        let operation = NeutralOperation::new(
            self.ids.peek(),
            date,
            amount,
            source_account,
            destination_account,
            reason,
        )?;
        self.ids.next_id();
        Ok(operation)
    }

    /// Return the id of an operation the ledger could not apply
    pub fn reclaim(&mut self, id: OperationId) {
        self.ids.reclaim(id);
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }
}
