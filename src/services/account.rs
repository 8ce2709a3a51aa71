//! Account service

use tracing::info;

use crate::auth::BudgetAuthContext;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, AccountId, AccountWithBalance};
use crate::storage::Database;

/// Service for account management
pub struct AccountService<'a> {
    db: &'a Database,
}

impl<'a> AccountService<'a> {
    /// Create a new account service
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a new account
    pub fn create(&self, ctx: &BudgetAuthContext, name: &str) -> LedgerResult<Account> {
        let account = Account::new(ctx.budget_id(), name);
        account.validate()?;

        self.db.exec_tx(|store| {
            if store.accounts.get_by_name(ctx.budget_id(), &account.name).is_some() {
                return Err(LedgerError::Validation(format!(
                    "An account named '{}' already exists.",
                    account.name
                )));
            }
            store.accounts.create(account.clone())
        })?;

        info!(budget = %ctx.budget_id(), account = %account.id, "account created");
        Ok(account)
    }

    /// Get an account of the budget
    pub fn get(&self, ctx: &BudgetAuthContext, id: AccountId) -> LedgerResult<Account> {
        self.db.read()?.accounts.get(ctx.budget_id(), id)
    }

    /// Find an account by name or ID string
    pub fn find(&self, ctx: &BudgetAuthContext, identifier: &str) -> LedgerResult<Option<Account>> {
        let store = self.db.read()?;
        if let Some(account) = store.accounts.get_by_name(ctx.budget_id(), identifier) {
            return Ok(Some(account));
        }

        if let Ok(id) = identifier.parse::<AccountId>() {
            return Ok(store.accounts.get(ctx.budget_id(), id).ok());
        }

        Ok(None)
    }

    /// Every account of the budget with its balance
    pub fn get_all(&self, ctx: &BudgetAuthContext) -> LedgerResult<Vec<AccountWithBalance>> {
        self.db.read()?.get_accounts_with_balance(ctx.budget_id())
    }
}
