//! Account registry
//!
//! Owns every account, keyed by lower-cased name, in registration order. The
//! default account is always present once the registry is built.

use std::collections::BTreeMap;

use crate::error::{DiaryError, DiaryResult};
use crate::models::{normalize_name, total_balance, Account};

/// Set of accounts with case-insensitive name identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRegistry {
    accounts: Vec<Account>,
    index: BTreeMap<String, usize>,
    default_key: String,
}

impl AccountRegistry {
    /// A registry with no accounts at all, not even the default one
    pub(crate) const EMPTY: AccountRegistry = AccountRegistry {
        accounts: Vec::new(),
        index: BTreeMap::new(),
        default_key: String::new(),
    };

    /// Create a registry holding only the default account
    pub fn new(default_account: Account) -> Self {
        let mut registry = Self {
            default_key: default_account.key(),
            ..Self::EMPTY
        };
        registry.add(default_account);
        registry
    }

    /// Build a registry from loaded accounts
    ///
    /// The default account must be among them. Later duplicates of a name are
    /// dropped with a warning.
    pub fn from_accounts(
        default_account_name: &str,
        accounts: impl IntoIterator<Item = Account>,
    ) -> DiaryResult<Self> {
        let mut registry = Self {
            default_key: normalize_name(default_account_name),
            ..Self::EMPTY
        };

        for account in accounts {
            let name = account.name().to_string();
            if !registry.add(account) {
                tracing::warn!("Skipping duplicate stored account '{}'", name);
            }
        }

        if !registry.index.contains_key(&registry.default_key) {
            return Err(DiaryError::MissingDefaultAccount(
                default_account_name.to_string(),
            ));
        }

        Ok(registry)
    }

    /// Add an account; false if the name (any case) is already registered
    pub fn add(&mut self, account: Account) -> bool {
        let key = account.key();
        if self.index.contains_key(&key) {
            return false;
        }

        self.index.insert(key, self.accounts.len());
        self.accounts.push(account);
        true
    }

    /// Find an account by name (case-insensitive)
    pub fn find(&self, name: &str) -> Option<&Account> {
        self.index
            .get(&normalize_name(name))
            .map(|&position| &self.accounts[position])
    }

    /// Find an account by name for mutation; changes are seen by later reads
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Account> {
        let position = *self.index.get(&normalize_name(name))?;
        self.accounts.get_mut(position)
    }

    /// Check if an account name is already taken
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(&normalize_name(name))
    }

    /// The reserved default account
    pub fn default_account(&self) -> DiaryResult<&Account> {
        let key = self.default_key.clone();
        self.find(&key)
            .ok_or(DiaryError::MissingDefaultAccount(key))
    }

    pub fn default_account_mut(&mut self) -> DiaryResult<&mut Account> {
        let key = self.default_key.clone();
        match self.index.get(&key) {
            Some(&position) => Ok(&mut self.accounts[position]),
            None => Err(DiaryError::MissingDefaultAccount(key)),
        }
    }

    /// Look up two distinct accounts for mutation at once
    ///
    /// Fails without touching anything if either is missing.
    pub fn pair_mut(
        &mut self,
        first: &str,
        second: &str,
    ) -> DiaryResult<(&mut Account, &mut Account)> {
        let first_position = *self
            .index
            .get(&normalize_name(first))
            .ok_or_else(|| DiaryError::account_not_found(first))?;
        let second_position = *self
            .index
            .get(&normalize_name(second))
            .ok_or_else(|| DiaryError::account_not_found(second))?;

        if first_position == second_position {
            return Err(crate::error::ValidationError::SameAccount(second.to_string()).into());
        }

        if first_position < second_position {
            let (head, tail) = self.accounts.split_at_mut(second_position);
            Ok((&mut head[first_position], &mut tail[0]))
        } else {
            let (head, tail) = self.accounts.split_at_mut(first_position);
            Ok((&mut tail[0], &mut head[second_position]))
        }
    }

    /// All accounts in registration order
    pub fn all(&self) -> &[Account] {
        &self.accounts
    }

    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of every current balance
    pub fn total(&self) -> i128 {
        total_balance(&self.accounts)
    }

    /// Put every balance back to its initial amount
    pub fn reset_balances(&mut self) {
        for account in &mut self.accounts {
            account.reset_to_initial();
        }
    }
}
