//! Account repository

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountId, BudgetId};

/// Accounts keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Account>", into = "Vec<Account>")]
pub struct AccountRepository {
    accounts: HashMap<AccountId, Account>,
}

impl AccountRepository {
    pub fn create(&mut self, account: Account) -> LedgerResult<()> {
        if self.accounts.contains_key(&account.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "Account",
                identifier: account.id.to_string(),
            });
        }
        self.accounts.insert(account.id, account);
        Ok(())
    }

    /// Get an account of the budget; accounts of other budgets are not found
    pub fn get(&self, budget_id: BudgetId, id: AccountId) -> LedgerResult<Account> {
        self.accounts
            .get(&id)
            .filter(|a| a.budget_id == budget_id)
            .cloned()
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Look up an account without a budget check
    pub fn find(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    /// All accounts of a budget, sorted by name
    pub fn get_for_budget(&self, budget_id: BudgetId) -> Vec<Account> {
        let mut list: Vec<_> = self
            .accounts
            .values()
            .filter(|a| a.budget_id == budget_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        list
    }

    /// Find an account by name (case-insensitive)
    pub fn get_by_name(&self, budget_id: BudgetId, name: &str) -> Option<Account> {
        let name_lower = name.trim().to_lowercase();
        self.accounts
            .values()
            .find(|a| a.budget_id == budget_id && a.name.to_lowercase() == name_lower)
            .cloned()
    }
}

impl From<Vec<Account>> for AccountRepository {
    fn from(list: Vec<Account>) -> Self {
        Self {
            accounts: list.into_iter().map(|a| (a.id, a)).collect(),
        }
    }
}

impl From<AccountRepository> for Vec<Account> {
    fn from(repo: AccountRepository) -> Self {
        let mut list: Vec<_> = repo.accounts.into_values().collect();
        list.sort_by_key(|a| a.created_at);
        list
    }
}
