//! Account model
//!
//! Represents a named cash register. Identity is the case-insensitive name;
//! the initial amount is fixed at creation and the current amount is derived
//! by applying operations on top of it.

use std::fmt;

use super::amount::Amount;
use crate::error::ValidationError;

/// Normalize an account name for identity comparisons
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Sum of current balances, widened so that no number of accounts can overflow it
pub fn total_balance<'a>(accounts: impl IntoIterator<Item = &'a Account>) -> i128 {
    accounts
        .into_iter()
        .map(|account| i128::from(account.current_amount))
        .sum()
}

/// A named balance bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    initial_amount: i64,
    current_amount: i64,
}

impl Account {
    /// Create an account whose balance starts at `initial_amount`
    pub fn new(name: impl Into<String>, initial_amount: i64) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::EmptyAccountName);
        }

        Ok(Self {
            name,
            initial_amount,
            current_amount: initial_amount,
        })
    }

    /// Restore an account with a stored balance
    pub fn with_balance(
        name: impl Into<String>,
        initial_amount: i64,
        current_amount: i64,
    ) -> Result<Self, ValidationError> {
        let mut account = Self::new(name, initial_amount)?;
        account.current_amount = current_amount;
        Ok(account)
    }

    /// Display name as registered
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased name used for identity
    pub fn key(&self) -> String {
        normalize_name(&self.name)
    }

    /// Balance at creation
    pub fn initial_amount(&self) -> i64 {
        self.initial_amount
    }

    /// Running balance
    pub fn current_amount(&self) -> i64 {
        self.current_amount
    }

    /// Check whether `name` refers to this account
    pub fn is_named(&self, name: &str) -> bool {
        self.key() == normalize_name(name)
    }

    /// Add `amount` to the balance; the balance is unchanged on overflow
    pub fn deposit(&mut self, amount: Amount) -> Result<(), ValidationError> {
        self.current_amount = self
            .current_amount
            .checked_add(amount.value())
            .ok_or_else(|| ValidationError::BalanceOverflow(self.name.clone()))?;
        Ok(())
    }

    /// No overdraft protection: the balance may go negative
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), ValidationError> {
        self.current_amount = self
            .current_amount
            .checked_sub(amount.value())
            .ok_or_else(|| ValidationError::BalanceOverflow(self.name.clone()))?;
        Ok(())
    }

    /// Drop all applied operations, back to the initial amount
    pub fn reset_to_initial(&mut self) {
        self.current_amount = self.initial_amount;
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.current_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: i64) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_new_account() {
        let account = Account::new("cash1", 2000).unwrap();
        assert_eq!(account.name(), "cash1");
        assert_eq!(account.initial_amount(), 2000);
        assert_eq!(account.current_amount(), 2000);
    }

    #[test]
    fn test_empty_name_rejected() {
        assert_eq!(Account::new("", 0), Err(ValidationError::EmptyAccountName));
        assert_eq!(Account::new("   ", 0), Err(ValidationError::EmptyAccountName));
    }

    #[test]
    fn test_case_insensitive_identity() {
        let account = Account::new("My Wallet", 0).unwrap();
        assert_eq!(account.key(), "my wallet");
        assert!(account.is_named("MY WALLET"));
        assert!(!account.is_named("other"));
    }

    #[test]
    fn test_deposit_withdraw_round_trip() {
        let mut account = Account::new("cash", 100).unwrap();
        account.deposit(amount(40)).unwrap();
        assert_eq!(account.current_amount(), 140);
        account.withdraw(amount(40)).unwrap();
        assert_eq!(account.current_amount(), 100);
    }

    #[test]
    fn test_withdraw_can_go_negative() {
        let mut account = Account::new("cash", 0).unwrap();
        account.withdraw(amount(75)).unwrap();
        assert_eq!(account.current_amount(), -75);
    }

    #[test]
    fn test_deposit_overflow_keeps_balance() {
        let mut account = Account::new("cash", i64::MAX).unwrap();
        assert_eq!(
            account.deposit(amount(1)),
            Err(ValidationError::BalanceOverflow("cash".into()))
        );
        assert_eq!(account.current_amount(), i64::MAX);
    }

    #[test]
    fn test_withdraw_overflow_keeps_balance() {
        let mut account = Account::new("cash", i64::MIN + 5).unwrap();
        assert!(account.withdraw(amount(6)).is_err());
        assert_eq!(account.current_amount(), i64::MIN + 5);
        account.withdraw(amount(5)).unwrap();
        assert_eq!(account.current_amount(), i64::MIN);
    }

    #[test]
    fn test_total_balance_past_i64() {
        let accounts = vec![
            Account::new("a", i64::MAX).unwrap(),
            Account::new("b", i64::MAX).unwrap(),
            Account::new("c", -1).unwrap(),
        ];
        assert_eq!(total_balance(&accounts), 2 * i128::from(i64::MAX) - 1);
        assert_eq!(total_balance(&Vec::<Account>::new()), 0);
    }

    #[test]
    fn test_reset_to_initial() {
        let mut account = Account::with_balance("cash", 10, 999).unwrap();
        assert_eq!(account.current_amount(), 999);
        account.reset_to_initial();
        assert_eq!(account.current_amount(), 10);
    }

    #[test]
    fn test_display() {
        let account = Account::new("Default Account", 300).unwrap();
        assert_eq!(format!("{}", account), "Default Account (300)");
    }
}
