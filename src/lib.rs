//! Finance Diary - personal finance ledger for the terminal
//!
//! This library tracks named accounts ("cash registers"), deposits and
//! withdrawals against a default account, and transfers between accounts.
//! Everything is stored in CSV files and reported month by month.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Accounts, amounts and the two kinds of operations
//! - `ledger`: Account registry, operation factory and the balance fold
//! - `reports`: Monthly report engine and "since" ranges
//! - `storage`: CSV storage layer
//! - `display`: Terminal tables
//! - `cli`: Interactive shell
//!
//! # Example
//!
//! ```rust,ignore
//! use finance_diary::config::{DiaryPaths, Settings};
//! use finance_diary::ledger::Ledger;
//! use finance_diary::storage::CsvStore;
//!
//! let paths = DiaryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut ledger = Ledger::load(CsvStore::new(paths), &settings.default_account_name)?;
//! ledger.add_finance_operation("24/06/2020", "deposit", 500, &["Salary"], "june pay");
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod storage;

pub use error::{DiaryError, DiaryResult, ValidationError};
