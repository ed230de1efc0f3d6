//! Flat CSV records for each persisted collection
//!
//! Records are plain rows. Converting a record back into a model runs the same
//! validation as interactive input.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{
    format_storage_date, Account, FinanceOperation, NeutralOperation, OperationId,
};

pub const ACCOUNT_HEADERS: &[&str] = &["Name", "InitialAmount", "CurrentAmount"];

pub const FINANCE_OPERATION_HEADERS: &[&str] = &[
    "Id",
    "Date",
    "OperationType",
    "Amount",
    "OperationKinds",
    "Reason",
];

pub const NEUTRAL_OPERATION_HEADERS: &[&str] = &[
    "Id",
    "Date",
    "Amount",
    "SourceAccount",
    "DestinationAccount",
    "Reason",
];

/// Separator between tags in the OperationKinds column
const KIND_SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRecord {
    pub name: String,
    /// Older files carry no initial amount; those accounts start from zero
    #[serde(default)]
    pub initial_amount: i64,
    #[serde(default)]
    pub current_amount: i64,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name().to_string(),
            initial_amount: account.initial_amount(),
            current_amount: account.current_amount(),
        }
    }
}

impl TryFrom<AccountRecord> for Account {
    type Error = ValidationError;

    fn try_from(record: AccountRecord) -> Result<Self, Self::Error> {
        Account::with_balance(record.name, record.initial_amount, record.current_amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FinanceOperationRecord {
    pub id: u64,
    pub date: String,
    pub operation_type: String,
    pub amount: i64,
    pub operation_kinds: String,
    pub reason: String,
}

impl From<&FinanceOperation> for FinanceOperationRecord {
    fn from(operation: &FinanceOperation) -> Self {
        Self {
            id: operation.id().value(),
            date: format_storage_date(&operation.date()),
            operation_type: operation.operation_type().to_string(),
            amount: operation.amount().value(),
            operation_kinds: operation.kinds().to_string(),
            reason: operation.reason().to_string(),
        }
    }
}

impl TryFrom<FinanceOperationRecord> for FinanceOperation {
    type Error = ValidationError;

    fn try_from(record: FinanceOperationRecord) -> Result<Self, Self::Error> {
        let kinds: Vec<&str> = record.operation_kinds.split(KIND_SEPARATOR).collect();
        FinanceOperation::new(
            OperationId::new(record.id),
            &record.date,
            &record.operation_type,
            record.amount,
            &kinds,
            &record.reason,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NeutralOperationRecord {
    pub id: u64,
    pub date: String,
    pub amount: i64,
    pub source_account: String,
    pub destination_account: String,
    pub reason: String,
}

impl From<&NeutralOperation> for NeutralOperationRecord {
    fn from(operation: &NeutralOperation) -> Self {
        Self {
            id: operation.id().value(),
            date: format_storage_date(&operation.date()),
            amount: operation.amount().value(),
            source_account: operation.source_account().to_string(),
            destination_account: operation.destination_account().to_string(),
            reason: operation.reason().to_string(),
        }
    }
}

impl TryFrom<NeutralOperationRecord> for NeutralOperation {
    type Error = ValidationError;

    fn try_from(record: NeutralOperationRecord) -> Result<Self, Self::Error> {
        NeutralOperation::new(
            OperationId::new(record.id),
            &record.date,
            record.amount,
            &record.source_account,
            &record.destination_account,
            &record.reason,
        )
    }
}
