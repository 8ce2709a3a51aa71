//! Payee repository

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetId, Payee, PayeeId};

/// Payees keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Payee>", into = "Vec<Payee>")]
pub struct PayeeRepository {
    payees: HashMap<PayeeId, Payee>,
}

impl PayeeRepository {
    pub fn create(&mut self, payee: Payee) -> LedgerResult<()> {
        if self.payees.contains_key(&payee.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "Payee",
                identifier: payee.id.to_string(),
            });
        }
        self.payees.insert(payee.id, payee);
        Ok(())
    }

    pub fn get(&self, budget_id: BudgetId, id: PayeeId) -> LedgerResult<Payee> {
        self.payees
            .get(&id)
            .filter(|p| p.budget_id == budget_id)
            .cloned()
            .ok_or_else(|| LedgerError::payee_not_found(id))
    }

    pub fn find(&self, id: PayeeId) -> Option<&Payee> {
        self.payees.get(&id)
    }

    /// All payees of a budget, sorted by name
    pub fn get_for_budget(&self, budget_id: BudgetId) -> Vec<Payee> {
        let mut list: Vec<_> = self
            .payees
            .values()
            .filter(|p| p.budget_id == budget_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        list
    }

    /// Find a payee by name (case-insensitive)
    pub fn get_by_name(&self, budget_id: BudgetId, name: &str) -> Option<Payee> {
        let name_lower = name.trim().to_lowercase();
        self.payees
            .values()
            .find(|p| p.budget_id == budget_id && p.name.to_lowercase() == name_lower)
            .cloned()
    }
}

impl From<Vec<Payee>> for PayeeRepository {
    fn from(list: Vec<Payee>) -> Self {
        Self {
            payees: list.into_iter().map(|p| (p.id, p)).collect(),
        }
    }
}

impl From<PayeeRepository> for Vec<Payee> {
    fn from(repo: PayeeRepository) -> Self {
        let mut list: Vec<_> = repo.payees.into_values().collect();
        list.sort_by_key(|p| p.created_at);
        list
    }
}
