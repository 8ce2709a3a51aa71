//! Month repository
//!
//! Months are unique per (budget, month date).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetId, Month, MonthDate, MonthId};

/// Months keyed by id, indexed by budget and date
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Month>", into = "Vec<Month>")]
pub struct MonthRepository {
    months: HashMap<MonthId, Month>,
    by_date: HashMap<(BudgetId, MonthDate), MonthId>,
}

impl MonthRepository {
    /// Insert a month; a second month for the same budget and date is a
    /// [`LedgerError::Duplicate`]
    pub fn create(&mut self, month: Month) -> LedgerResult<()> {
        let key = (month.budget_id, month.date);
        if self.months.contains_key(&month.id) || self.by_date.contains_key(&key) {
            return Err(LedgerError::Duplicate {
                entity_type: "Month",
                identifier: format!("{} {}", month.budget_id, month.date),
            });
        }
        self.by_date.insert(key, month.id);
        self.months.insert(month.id, month);
        Ok(())
    }

    /// Get a month of the budget; months of other budgets are not found
    pub fn get(&self, budget_id: BudgetId, id: MonthId) -> LedgerResult<Month> {
        self.months
            .get(&id)
            .filter(|m| m.budget_id == budget_id)
            .cloned()
            .ok_or_else(|| LedgerError::month_not_found(id))
    }

    pub fn find(&self, id: MonthId) -> Option<&Month> {
        self.months.get(&id)
    }

    pub fn find_by_date(&self, budget_id: BudgetId, date: MonthDate) -> Option<&Month> {
        self.by_date
            .get(&(budget_id, date))
            .and_then(|id| self.months.get(id))
    }

    /// Return the month for `date`, creating it if needed
    ///
    /// The flag is true when the month was created by this call. Lookup and
    /// insert happen under one `&mut` borrow, which inside a
    /// [`Tx`](super::Tx) means under the exclusive lock, so racing callers
    /// serialize and the later one finds the earlier one's month.
    pub fn get_or_create(&mut self, budget_id: BudgetId, date: MonthDate) -> LedgerResult<(Month, bool)> {
        if let Some(month) = self.find_by_date(budget_id, date) {
            return Ok((month.clone(), false));
        }

        let month = Month::new(budget_id, date);
        self.create(month.clone())?;
        Ok((month, true))
    }

    /// All months of a budget in calendar order
    pub fn get_for_budget(&self, budget_id: BudgetId) -> Vec<Month> {
        let mut list: Vec<_> = self
            .months
            .values()
            .filter(|m| m.budget_id == budget_id)
            .cloned()
            .collect();
        list.sort_by_key(|m| m.date);
        list
    }

    /// Persist a changed carryover; other fields are left as stored
    pub fn update(&mut self, month: &Month) -> LedgerResult<()> {
        let stored = self
            .months
            .get_mut(&month.id)
            .ok_or_else(|| LedgerError::month_not_found(month.id))?;
        stored.carryover = month.carryover.clone();
        stored.updated_at = month.updated_at;
        Ok(())
    }
}

impl From<Vec<Month>> for MonthRepository {
    fn from(list: Vec<Month>) -> Self {
        let mut repo = Self::default();
        for month in list {
            repo.by_date.insert((month.budget_id, month.date), month.id);
            repo.months.insert(month.id, month);
        }
        repo
    }
}

impl From<MonthRepository> for Vec<Month> {
    fn from(repo: MonthRepository) -> Self {
        let mut list: Vec<_> = repo.months.into_values().collect();
        list.sort_by_key(|m| (m.date, m.created_at));
        list
    }
}
