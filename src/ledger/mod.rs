//! Ledger aggregate
//!
//! Owns the account registry, the two operation logs and the operation
//! factory. Every accepted operation is validated, applied to the balances and
//! appended to its log in one step; rejected input leaves no trace.

pub mod factory;
pub mod ids;
pub mod registry;
pub mod replay;

pub use factory::OperationFactory;
pub use ids::IdGenerator;
pub use registry::AccountRegistry;
pub use replay::{replay, sort_entries, Direction, LedgerEntry};

use crate::error::{DiaryError, DiaryResult, ValidationError};
use crate::models::{normalize_name, Account, FinanceOperation, NeutralOperation};
use crate::reports::Report;
use crate::storage::LedgerStore;

/// In-memory ledger backed by a [`LedgerStore`]
pub struct Ledger<S: LedgerStore> {
    store: S,
    accounts: AccountRegistry,
    factory: OperationFactory,
    finance_operations: Vec<FinanceOperation>,
    neutral_operations: Vec<NeutralOperation>,
    dirty: bool,
}

impl<S: LedgerStore> Ledger<S> {
    /// Load every collection and rebuild current balances
    ///
    /// Stored balances are ignored: each account restarts from its initial
    /// amount and the operation logs are replayed forward in (date, id) order.
    pub fn load(store: S, default_account_name: &str) -> DiaryResult<Self> {
        let mut accounts =
            AccountRegistry::from_accounts(default_account_name, store.load_accounts()?)?;

        let mut finance_operations = store.load_finance_operations()?;
        let mut neutral_operations = store.load_neutral_operations()?;
        sort_entries(&mut finance_operations);
        sort_entries(&mut neutral_operations);

        let mut ids = IdGenerator::from_state(store.load_last_id()?);
        let issued = finance_operations
            .iter()
            .map(FinanceOperation::id)
            .chain(neutral_operations.iter().map(NeutralOperation::id))
            .max();
        if let Some(issued) = issued {
            ids.ensure_after(issued);
        }

        accounts.reset_balances();
        replay(&mut accounts, &finance_operations, Direction::Forward)?;
        replay(&mut accounts, &neutral_operations, Direction::Forward)?;

        tracing::info!(
            "Loaded {} accounts, {} finance operations and {} neutral operations",
            accounts.len(),
            finance_operations.len(),
            neutral_operations.len()
        );

        Ok(Self {
            store,
            accounts,
            factory: OperationFactory::new(ids),
            finance_operations,
            neutral_operations,
            dirty: false,
        })
    }

    /// Copy of every account in registration order
    pub fn list_accounts(&self) -> Vec<Account> {
        self.accounts.all().to_vec()
    }

    /// Full history with a private copy of the current balances
    pub fn report(&self) -> Report {
        Report::new(
            self.accounts.clone(),
            self.finance_operations.clone(),
            self.neutral_operations.clone(),
        )
    }

    pub fn finance_operations(&self) -> &[FinanceOperation] {
        &self.finance_operations
    }

    pub fn neutral_operations(&self) -> &[NeutralOperation] {
        &self.neutral_operations
    }

    /// Register a new account; false if the name is taken in any case
    pub fn add_account(&mut self, name: &str, initial_amount: i64) -> bool {
        match self.try_add_account(name, initial_amount) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    "Registration of account '{}' with initial amount {} failed: {}",
                    name,
                    initial_amount,
                    e
                );
                false
            }
        }
    }

    pub fn try_add_account(&mut self, name: &str, initial_amount: i64) -> DiaryResult<()> {
        let account = Account::new(name, initial_amount)?;
        if !self.accounts.add(account) {
            return Err(DiaryError::duplicate_account(name.trim()));
        }

        tracing::debug!("Registered account '{}' with {}", name.trim(), initial_amount);
        self.dirty = true;
        Ok(())
    }

    /// Record a deposit or withdrawal against the default account
    pub fn try_add_finance_operation<K: AsRef<str>>(
        &mut self,
        date: &str,
        operation_type: &str,
        amount: i64,
        kinds: &[K],
        reason: &str,
    ) -> DiaryResult<&FinanceOperation> {
        // Resolve the default account before issuing an id
        self.accounts.default_account()?;

        let operation = self
            .factory
            .create_finance_operation(date, operation_type, amount, kinds, reason)?;
        if let Err(e) = operation.apply_to(&mut self.accounts, Direction::Forward) {
            self.factory.reclaim(operation.id());
            return Err(e);
        }

        tracing::debug!(
            "Applied finance operation {}: {} {} on {} ({})",
            operation.id(),
            operation.operation_type(),
            operation.amount(),
            operation.date(),
            operation.reason()
        );

        self.finance_operations.push(operation);
        self.dirty = true;
        Ok(&self.finance_operations[self.finance_operations.len() - 1])
    }

    pub fn add_finance_operation<K: AsRef<str>>(
        &mut self,
        date: &str,
        operation_type: &str,
        amount: i64,
        kinds: &[K],
        reason: &str,
    ) -> bool {
        match self.try_add_finance_operation(date, operation_type, amount, kinds, reason) {
            Ok(_) => true,
            Err(e) => {
                let kinds: Vec<&str> = kinds.iter().map(AsRef::as_ref).collect();
                tracing::warn!(
                    "{} operation of {} at {} of kind {} and reason {} failed: {}",
                    operation_type,
                    amount,
                    date,
                    kinds.join(","),
                    reason,
                    e
                );
                false
            }
        }
    }

    /// Record a transfer between two registered accounts
    ///
    /// Both endpoints are resolved before anything is issued or applied.
    pub fn try_add_neutral_operation(
        &mut self,
        date: &str,
        amount: i64,
        source_account: &str,
        destination_account: &str,
        reason: &str,
    ) -> DiaryResult<&NeutralOperation> {
        if normalize_name(source_account) == normalize_name(destination_account) {
            return Err(ValidationError::SameAccount(source_account.to_string()).into());
        }
        for name in [source_account, destination_account] {
            if !self.accounts.contains(name) {
                return Err(DiaryError::account_not_found(name));
            }
        }

        let operation = self.factory.create_neutral_operation(
            date,
            amount,
            source_account,
            destination_account,
            reason,
        )?;
        if let Err(e) = operation.apply_to(&mut self.accounts, Direction::Forward) {
            self.factory.reclaim(operation.id());
            return Err(e);
        }

        tracing::debug!(
            "Applied neutral operation {}: {} from '{}' to '{}' on {} ({})",
            operation.id(),
            operation.amount(),
            operation.source_account(),
            operation.destination_account(),
            operation.date(),
            operation.reason()
        );

        self.neutral_operations.push(operation);
        self.dirty = true;
        Ok(&self.neutral_operations[self.neutral_operations.len() - 1])
    }

    pub fn add_neutral_operation(
        &mut self,
        date: &str,
        amount: i64,
        source_account: &str,
        destination_account: &str,
        reason: &str,
    ) -> bool {
        match self.try_add_neutral_operation(
            date,
            amount,
            source_account,
            destination_account,
            reason,
        ) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    "Neutral operation of {} at {} from {} to {} and reason {} failed: {}",
                    amount,
                    date,
                    source_account,
                    destination_account,
                    reason,
                    e
                );
                false
            }
        }
    }

    /// Persist all four collections concurrently
    ///
    /// Fails as soon as any write fails; changes stay pending in that case.
    pub async fn save(&mut self) -> DiaryResult<()> {
        let next_id = self.factory.ids().state();

        tokio::try_join!(
            self.store.save_accounts(self.accounts.all()),
            self.store.save_finance_operations(&self.finance_operations),
            self.store.save_neutral_operations(&self.neutral_operations),
            self.store.save_last_id(next_id),
        )?;

        self.dirty = false;
        tracing::info!(
            "Saved {} accounts, {} finance operations and {} neutral operations",
            self.accounts.len(),
            self.finance_operations.len(),
            self.neutral_operations.len()
        );
        Ok(())
    }

    /// Check whether anything changed since the last load or save
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Id the next accepted operation receives
    pub fn next_id(&self) -> u64 {
        self.factory.ids().state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DiaryPaths;
    use crate::models::total_balance;
    use crate::storage::{initialize_storage, CsvStore};
    use tempfile::TempDir;

    const DEFAULT: &str = "Default Account";

    async fn create_test_ledger() -> (TempDir, Ledger<CsvStore>) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, DEFAULT, 0).await.unwrap();
        let ledger = Ledger::load(CsvStore::new(paths), DEFAULT).unwrap();
        (temp_dir, ledger)
    }

    fn balance(ledger: &Ledger<CsvStore>, name: &str) -> i64 {
        ledger
            .list_accounts()
            .into_iter()
            .find(|account| account.is_named(name))
            .unwrap()
            .current_amount()
    }

    #[tokio::test]
    async fn test_add_account_case_insensitive() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;

        assert!(ledger.add_account("cash1", 0));
        assert!(!ledger.add_account("CASH1", 100));
        assert_eq!(ledger.list_accounts().len(), 2);
    }

    #[tokio::test]
    async fn test_deposit_then_withdraw_round_trip() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        ledger.add_account("cash1", 2000);

        assert!(ledger.add_finance_operation("24/06/2020", "deposit", 500, &["Salary"], "pay"));
        assert_eq!(balance(&ledger, DEFAULT), 500);
        assert_eq!(balance(&ledger, "cash1"), 2000);

        assert!(ledger.add_finance_operation("25/06/2020", "withdraw", 500, &["Food"], "food"));
        assert_eq!(balance(&ledger, DEFAULT), 0);
    }

    #[tokio::test]
    async fn test_rejected_finance_operation_changes_nothing() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;

        assert!(!ledger.add_finance_operation("24/06/2020", "deposit", 0, &["Food"], "x"));
        assert!(!ledger.add_finance_operation("not a date", "deposit", 10, &["Food"], "x"));
        assert!(!ledger.add_finance_operation("24/06/2020", "deposit", 10, &["Food"], "\"\""));

        assert!(ledger.finance_operations().is_empty());
        assert_eq!(balance(&ledger, DEFAULT), 0);
        assert_eq!(ledger.next_id(), 0);
        assert!(!ledger.has_unsaved_changes());
    }

    #[tokio::test]
    async fn test_overflowing_deposit_rejected() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;

        assert!(ledger.add_finance_operation("24/06/2020", "deposit", i64::MAX, &["Salary"], "x"));
        assert!(!ledger.add_finance_operation("25/06/2020", "deposit", 1, &["Salary"], "y"));

        assert_eq!(balance(&ledger, DEFAULT), i64::MAX);
        assert_eq!(ledger.finance_operations().len(), 1);
        assert_eq!(ledger.next_id(), 1);

        // The ledger keeps accepting operations afterwards
        assert!(ledger.add_finance_operation("26/06/2020", "withdraw", 1, &["Food"], "z"));
        assert_eq!(ledger.finance_operations()[1].id().value(), 1);
    }

    #[tokio::test]
    async fn test_overflowing_transfer_rejected() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        ledger.add_account("cash1", 10);
        assert!(ledger.add_finance_operation("24/06/2020", "deposit", i64::MAX, &["Salary"], "x"));

        let err = ledger
            .try_add_neutral_operation("25/06/2020", 5, "cash1", DEFAULT, "atm")
            .unwrap_err();
        assert!(matches!(
            err,
            DiaryError::Validation(ValidationError::BalanceOverflow(_))
        ));

        assert_eq!(balance(&ledger, "cash1"), 10);
        assert_eq!(balance(&ledger, DEFAULT), i64::MAX);
        assert!(ledger.neutral_operations().is_empty());
        assert_eq!(ledger.next_id(), 1);
    }

    #[tokio::test]
    async fn test_first_validation_failure_reported() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;

        let err = ledger
            .try_add_finance_operation("bad", "sideways", -1, &["Nope"], "")
            .unwrap_err();
        assert!(matches!(
            err,
            DiaryError::Validation(ValidationError::InvalidDate(_))
        ));

        let err = ledger
            .try_add_finance_operation("24/06/2020", "deposit", -1, &["Nope"], "")
            .unwrap_err();
        assert!(matches!(
            err,
            DiaryError::Validation(ValidationError::InvalidAmount(-1))
        ));
    }

    #[tokio::test]
    async fn test_transfer_conserves_total() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        ledger.add_account("cash1", 2000);
        let before = total_balance(&ledger.list_accounts());

        assert!(ledger.add_neutral_operation("21/06/2020", 400, "CASH1", "default account", "atm"));

        assert_eq!(balance(&ledger, "cash1"), 1600);
        assert_eq!(balance(&ledger, DEFAULT), 400);
        let after = total_balance(&ledger.list_accounts());
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_transfer_to_unknown_account_changes_nothing() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        ledger.add_account("cash1", 2000);

        let err = ledger
            .try_add_neutral_operation("21/06/2020", 400, "cash1", "ghost", "atm")
            .unwrap_err();
        assert!(err.is_not_found());

        let err = ledger
            .try_add_neutral_operation("21/06/2020", 400, "cash1", "Cash1", "atm")
            .unwrap_err();
        assert!(matches!(
            err,
            DiaryError::Validation(ValidationError::SameAccount(_))
        ));

        assert_eq!(balance(&ledger, "cash1"), 2000);
        assert!(ledger.neutral_operations().is_empty());
        assert_eq!(ledger.next_id(), 0);
    }

    #[tokio::test]
    async fn test_list_accounts_is_a_snapshot() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        let snapshot = ledger.list_accounts();

        ledger.add_finance_operation("24/06/2020", "deposit", 500, &["Salary"], "pay");

        assert_eq!(snapshot[0].current_amount(), 0);
        assert_eq!(balance(&ledger, DEFAULT), 500);
    }

    #[tokio::test]
    async fn test_report_does_not_touch_live_balances() {
        let (_temp_dir, mut ledger) = create_test_ledger().await;
        ledger.add_finance_operation("24/06/2020", "deposit", 500, &["Salary"], "pay");
        ledger.add_finance_operation("24/07/2020", "deposit", 600, &["Salary"], "pay");

        let june = ledger.report().filter_by_month_and_year(6, 2020);
        assert_eq!(june.accounts().default_account().unwrap().current_amount(), 500);
        assert_eq!(balance(&ledger, DEFAULT), 1100);
    }

    #[tokio::test]
    async fn test_save_and_reload_replays_balances() {
        let (temp_dir, mut ledger) = create_test_ledger().await;
        ledger.add_account("cash1", 2000);
        ledger.add_finance_operation("24/06/2020", "deposit", 500, &["Friends"], "dinner");
        ledger.add_neutral_operation("21/06/2020", 400, "cash1", DEFAULT, "atm");

        assert!(ledger.has_unsaved_changes());
        ledger.save().await.unwrap();
        assert!(!ledger.has_unsaved_changes());

        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reloaded = Ledger::load(CsvStore::new(paths), DEFAULT).unwrap();

        assert_eq!(reloaded.list_accounts(), ledger.list_accounts());
        assert_eq!(reloaded.finance_operations().len(), 1);
        assert_eq!(reloaded.neutral_operations().len(), 1);
        assert_eq!(reloaded.next_id(), 2);
    }

    #[tokio::test]
    async fn test_stored_current_amount_is_not_trusted() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = CsvStore::new(paths.clone());

        store
            .save_accounts(&[Account::with_balance(DEFAULT, 100, 999_999).unwrap()])
            .await
            .unwrap();
        let finance = vec![FinanceOperation::new(
            crate::models::OperationId::new(7),
            "24/06/2020",
            "withdraw",
            30,
            &["Food"],
            "lunch",
        )
        .unwrap()];
        store.save_finance_operations(&finance).await.unwrap();

        let ledger = Ledger::load(store, DEFAULT).unwrap();
        assert_eq!(balance(&ledger, DEFAULT), 70);
        // No id file: issuing continues after the highest stored id
        assert_eq!(ledger.next_id(), 8);
    }

    #[tokio::test]
    async fn test_missing_default_account_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());
        let store = CsvStore::new(paths);
        store
            .save_accounts(&[Account::new("cash1", 0).unwrap()])
            .await
            .unwrap();

        let err = Ledger::load(store, DEFAULT).err().unwrap();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let (temp_dir, mut ledger) = create_test_ledger().await;
        ledger.add_finance_operation("24/06/2020", "deposit", 500, &["Salary"], "pay");

        // A directory in place of the file makes the final rename fail
        let paths = DiaryPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::create_dir_all(paths.neutral_operations_file()).unwrap();

        assert!(ledger.save().await.is_err());
        assert!(ledger.has_unsaved_changes());
    }
}
