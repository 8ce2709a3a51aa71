//! Budget repository

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Budget, BudgetId, UserId};

/// Budgets keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Budget>", into = "Vec<Budget>")]
pub struct BudgetRepository {
    budgets: HashMap<BudgetId, Budget>,
}

impl BudgetRepository {
    pub fn create(&mut self, budget: Budget) -> LedgerResult<()> {
        if self.budgets.contains_key(&budget.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "Budget",
                identifier: budget.id.to_string(),
            });
        }
        self.budgets.insert(budget.id, budget);
        Ok(())
    }

    /// Get a budget by id, including its user list
    pub fn get(&self, id: BudgetId) -> LedgerResult<Budget> {
        self.budgets
            .get(&id)
            .cloned()
            .ok_or_else(|| LedgerError::budget_not_found(id))
    }

    /// Every budget the user has access to, by name
    pub fn get_for_user(&self, user_id: UserId) -> Vec<Budget> {
        let mut list: Vec<_> = self
            .budgets
            .values()
            .filter(|b| b.user_has_access(user_id))
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        list
    }

    pub fn count(&self) -> usize {
        self.budgets.len()
    }
}

impl From<Vec<Budget>> for BudgetRepository {
    fn from(list: Vec<Budget>) -> Self {
        Self {
            budgets: list.into_iter().map(|b| (b.id, b)).collect(),
        }
    }
}

impl From<BudgetRepository> for Vec<Budget> {
    fn from(repo: BudgetRepository) -> Self {
        let mut list: Vec<_> = repo.budgets.into_values().collect();
        list.sort_by_key(|b| b.created_at);
        list
    }
}
