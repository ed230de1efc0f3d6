//! Storage layer for Finance Diary
//!
//! Provides CSV file storage with atomic writes and automatic directory
//! creation. The ledger only sees the [`LedgerStore`] trait.

pub mod csv_store;
pub mod file_io;
pub mod init;
pub mod records;

pub use csv_store::CsvStore;
pub use file_io::{read_csv, to_csv_bytes, write_atomic};
pub use init::initialize_storage;

use crate::error::DiaryResult;
use crate::models::{Account, FinanceOperation, NeutralOperation};

/// Persistence for the four collections the ledger owns
///
/// Loads happen once at startup. Saves replace the stored collection
/// wholesale and are independent of each other, so callers may run them
/// concurrently.
#[allow(async_fn_in_trait)]
pub trait LedgerStore {
    fn load_accounts(&self) -> DiaryResult<Vec<Account>>;

    fn load_finance_operations(&self) -> DiaryResult<Vec<FinanceOperation>>;

    fn load_neutral_operations(&self) -> DiaryResult<Vec<NeutralOperation>>;

    /// Next id to issue; 0 when nothing was ever saved
    fn load_last_id(&self) -> DiaryResult<u64>;

    async fn save_accounts(&self, accounts: &[Account]) -> DiaryResult<()>;

    async fn save_finance_operations(&self, operations: &[FinanceOperation]) -> DiaryResult<()>;

    async fn save_neutral_operations(&self, operations: &[NeutralOperation]) -> DiaryResult<()>;

    async fn save_last_id(&self, next_id: u64) -> DiaryResult<()>;
}
