//! CSV-backed ledger storage
//!
//! One headed CSV file per collection plus a plain text file holding the next
//! operation id, all under the data directory.

use std::path::Path;

use serde::de::DeserializeOwned;

use super::file_io::{read_csv, to_csv_bytes, write_atomic};
use super::records::{
    AccountRecord, FinanceOperationRecord, NeutralOperationRecord, ACCOUNT_HEADERS,
    FINANCE_OPERATION_HEADERS, NEUTRAL_OPERATION_HEADERS,
};
use super::LedgerStore;
use crate::config::paths::DiaryPaths;
use crate::error::{DiaryError, DiaryResult, ValidationError};
use crate::models::{Account, FinanceOperation, NeutralOperation};

/// Ledger storage in the data directory of a [`DiaryPaths`]
#[derive(Debug, Clone)]
pub struct CsvStore {
    paths: DiaryPaths,
}

impl CsvStore {
    pub fn new(paths: DiaryPaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &DiaryPaths {
        &self.paths
    }
}

/// Read records and convert each through its validating constructor
fn load_validated<R, T>(path: &Path) -> DiaryResult<Vec<T>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = ValidationError>,
{
    let records: Vec<R> = read_csv(path)?;
    let items = records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            T::try_from(record).map_err(|e| {
                DiaryError::Storage(format!(
                    "Invalid record {} in {}: {}",
                    row + 1,
                    path.display(),
                    e
                ))
            })
        })
        .collect::<DiaryResult<Vec<T>>>()?;

    tracing::debug!("Loaded {} records from {}", items.len(), path.display());
    Ok(items)
}

impl LedgerStore for CsvStore {
    fn load_accounts(&self) -> DiaryResult<Vec<Account>> {
        load_validated::<AccountRecord, Account>(&self.paths.accounts_file())
    }

    fn load_finance_operations(&self) -> DiaryResult<Vec<FinanceOperation>> {
        load_validated::<FinanceOperationRecord, FinanceOperation>(
            &self.paths.finance_operations_file(),
        )
    }

    fn load_neutral_operations(&self) -> DiaryResult<Vec<NeutralOperation>> {
        load_validated::<NeutralOperationRecord, NeutralOperation>(
            &self.paths.neutral_operations_file(),
        )
    }

    fn load_last_id(&self) -> DiaryResult<u64> {
        let path = self.paths.id_state_file();
        if !path.exists() {
            tracing::debug!("No id state at {}, starting from 0", path.display());
            return Ok(0);
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|e| DiaryError::Storage(format!("Failed to read {}: {}", path.display(), e)))?;

        content
            .trim()
            .parse::<u64>()
            .map_err(|_| DiaryError::CorruptIdState {
                path,
                content: content.trim().to_string(),
            })
    }

    async fn save_accounts(&self, accounts: &[Account]) -> DiaryResult<()> {
        let records: Vec<AccountRecord> = accounts.iter().map(AccountRecord::from).collect();
        let bytes = to_csv_bytes(&records, ACCOUNT_HEADERS)?;
        write_atomic(self.paths.accounts_file(), &bytes).await
    }

    async fn save_finance_operations(&self, operations: &[FinanceOperation]) -> DiaryResult<()> {
        let records: Vec<FinanceOperationRecord> =
            operations.iter().map(FinanceOperationRecord::from).collect();
        let bytes = to_csv_bytes(&records, FINANCE_OPERATION_HEADERS)?;
        write_atomic(self.paths.finance_operations_file(), &bytes).await
    }

    async fn save_neutral_operations(&self, operations: &[NeutralOperation]) -> DiaryResult<()> {
        let records: Vec<NeutralOperationRecord> =
            operations.iter().map(NeutralOperationRecord::from).collect();
        let bytes = to_csv_bytes(&records, NEUTRAL_OPERATION_HEADERS)?;
        write_atomic(self.paths.neutral_operations_file(), &bytes).await
    }

    async fn save_last_id(&self, next_id: u64) -> DiaryResult<()> {
        write_atomic(self.paths.id_state_file(), next_id.to_string().as_bytes()).await
    }
}
