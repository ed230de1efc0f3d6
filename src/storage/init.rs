//! Storage initialization
//!
//! Handles first-run setup: the default account and the id state file.

use super::csv_store::CsvStore;
use super::LedgerStore;
use crate::config::paths::DiaryPaths;
use crate::error::DiaryError;
use crate::models::Account;

/// Initialize storage for a fresh installation
///
/// Existing files are left alone, so running this twice is harmless.
pub async fn initialize_storage(
    paths: &DiaryPaths,
    default_account_name: &str,
    initial_amount: i64,
) -> Result<(), DiaryError> {
    paths.ensure_directories()?;
    let store = CsvStore::new(paths.clone());

    if !paths.accounts_file().exists() {
        let account = Account::new(default_account_name, initial_amount)?;
        store.save_accounts(&[account]).await?;
        tracing::info!(
            "Created '{}' with {} in {}",
            default_account_name,
            initial_amount,
            paths.accounts_file().display()
        );
    }

    if !paths.id_state_file().exists() {
        store.save_last_id(0).await?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &DiaryPaths) -> bool {
    !paths.is_initialized()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert!(needs_initialization(&paths));

        initialize_storage(&paths, "Default Account", 0).await.unwrap();

        assert!(!needs_initialization(&paths));
        assert!(paths.data_dir().exists());

        let store = CsvStore::new(paths.clone());
        let accounts = store.load_accounts().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].name(), "Default Account");
        assert_eq!(store.load_last_id().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_initial_amount() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths, "Wallet", 250).await.unwrap();

        let accounts = CsvStore::new(paths).load_accounts().unwrap();
        assert_eq!(accounts[0].name(), "Wallet");
        assert_eq!(accounts[0].initial_amount(), 250);
        assert_eq!(accounts[0].current_amount(), 250);
    }

    #[tokio::test]
    async fn test_doesnt_overwrite_existing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = CsvStore::new(paths.clone());

        initialize_storage(&paths, "Default Account", 0).await.unwrap();

        let accounts = vec![
            Account::new("Default Account", 0).unwrap(),
            Account::new("cash1", 2000).unwrap(),
        ];
        store.save_accounts(&accounts).await.unwrap();
        store.save_last_id(12).await.unwrap();

        initialize_storage(&paths, "Default Account", 0).await.unwrap();

        assert_eq!(store.load_accounts().unwrap().len(), 2);
        assert_eq!(store.load_last_id().unwrap(), 12);
    }

    #[tokio::test]
    async fn test_empty_default_name_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());

        let err = initialize_storage(&paths, "  ", 0).await.unwrap_err();
        assert!(err.is_validation());
    }
}
