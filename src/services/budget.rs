//! Budget service
//!
//! Budgets are created with their Income group and category already in place,
//! and with the current month, so a fresh budget can be viewed straight away.

use tracing::info;

use crate::auth::{AuthContext, BudgetAuthContext};
use crate::error::{LedgerError, LedgerResult};
use crate::models::budget::INCOME_NAME;
use crate::models::{Budget, BudgetId, Category, CategoryGroup, MonthDate};
use crate::services::backfill::ensure_month;
use crate::storage::Database;

/// Service for budget management
pub struct BudgetService<'a> {
    db: &'a Database,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a budget owned by the caller
    pub fn create(&self, auth: &AuthContext, name: &str) -> LedgerResult<Budget> {
        let budget = Budget::new(name, auth.user_id);
        budget.validate()?;

        self.db.exec_tx(|store| {
            store.budgets.create(budget.clone())?;

            let group = CategoryGroup::income(budget.id, INCOME_NAME);
            let category = Category::new(&group, INCOME_NAME);
            store.categories.create_group(group)?;
            store.categories.create(category)?;

            ensure_month(store, budget.id, MonthDate::current())?;
            Ok(())
        })?;

        info!(budget = %budget.id, name = %budget.name, "budget created");
        Ok(budget)
    }

    /// Get a budget the caller belongs to
    ///
    /// Budgets the caller is not a member of are reported as not found.
    pub fn get(&self, auth: &AuthContext, id: BudgetId) -> LedgerResult<Budget> {
        let budget = self.db.read()?.budgets.get(id)?;
        if budget.user_has_access(auth.user_id) {
            Ok(budget)
        } else {
            Err(LedgerError::budget_not_found(id))
        }
    }

    /// Every budget the caller belongs to, sorted by name
    pub fn get_all(&self, auth: &AuthContext) -> LedgerResult<Vec<Budget>> {
        Ok(self.db.read()?.budgets.get_for_user(auth.user_id))
    }

    /// Find a budget by name or ID string
    pub fn find(&self, auth: &AuthContext, identifier: &str) -> LedgerResult<Option<Budget>> {
        let budgets = self.get_all(auth)?;
        let name = identifier.trim().to_lowercase();
        if let Some(budget) = budgets.iter().find(|b| b.name.to_lowercase() == name) {
            return Ok(Some(budget.clone()));
        }

        if let Ok(id) = identifier.parse::<BudgetId>() {
            return Ok(budgets.into_iter().find(|b| b.id == id));
        }

        Ok(None)
    }

    /// Check membership and build the context budget-scoped services take
    pub fn authorize(&self, auth: &AuthContext, id: BudgetId) -> LedgerResult<BudgetAuthContext> {
        let budget = self.get(auth, id)?;
        Ok(BudgetAuthContext {
            auth: auth.clone(),
            budget,
        })
    }
}
