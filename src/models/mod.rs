//! Core data models for Finance Diary
//!
//! This module contains the value types of the ledger: accounts, amounts,
//! operation ids, and the two kinds of operations.

pub mod account;
pub mod amount;
pub mod date;
pub mod ids;
pub mod operation;

pub use account::{normalize_name, total_balance, Account};
pub use amount::Amount;
pub use date::{
    format_display_date, format_storage_date, is_valid_display_format, parse_operation_date,
    DISPLAY_DATE_FORMAT, STORAGE_DATE_FORMAT,
};
pub use ids::OperationId;
pub use operation::{
    FinanceOperation, NeutralOperation, OperationKind, OperationKinds, OperationType,
};
