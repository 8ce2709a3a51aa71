//! Month category repository
//!
//! Assignment rows are unique per (month, category).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, CategoryId, MonthCategory, MonthCategoryId, MonthId};

/// Assignment rows keyed by id, indexed by month and category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<MonthCategory>", into = "Vec<MonthCategory>")]
pub struct MonthCategoryRepository {
    rows: HashMap<MonthCategoryId, MonthCategory>,
    by_pair: HashMap<(MonthId, CategoryId), MonthCategoryId>,
}

impl MonthCategoryRepository {
    /// Insert a row; a second row for the same month and category is a
    /// [`LedgerError::Duplicate`]
    pub fn create(&mut self, row: MonthCategory) -> LedgerResult<()> {
        let key = (row.month_id, row.category_id);
        if self.rows.contains_key(&row.id) || self.by_pair.contains_key(&key) {
            return Err(LedgerError::Duplicate {
                entity_type: "Month Category",
                identifier: format!("{} {}", row.month_id, row.category_id),
            });
        }
        self.by_pair.insert(key, row.id);
        self.rows.insert(row.id, row);
        Ok(())
    }

    pub fn find(&self, month_id: MonthId, category_id: CategoryId) -> Option<&MonthCategory> {
        self.by_pair
            .get(&(month_id, category_id))
            .and_then(|id| self.rows.get(id))
    }

    /// Return the row for the pair, creating a zero row if needed
    ///
    /// The flag is true when the row was created by this call. As with
    /// months, the transaction lock serializes racing callers.
    pub fn get_or_create(
        &mut self,
        month_id: MonthId,
        category_id: CategoryId,
    ) -> LedgerResult<(MonthCategory, bool)> {
        if let Some(row) = self.find(month_id, category_id) {
            return Ok((row.clone(), false));
        }

        let row = MonthCategory::new(month_id, category_id);
        self.create(row.clone())?;
        Ok((row, true))
    }

    /// Overwrite the assigned amount of a row
    pub fn update_amount(&mut self, id: MonthCategoryId, amount: Amount) -> LedgerResult<()> {
        let row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| LedgerError::month_category_not_found(id))?;
        row.amount = amount;
        Ok(())
    }

    /// Every row of a month
    pub fn get_for_month(&self, month_id: MonthId) -> Vec<&MonthCategory> {
        self.rows
            .values()
            .filter(|r| r.month_id == month_id)
            .collect()
    }

    /// Sum of the amounts assigned in a month
    pub fn get_assigned_in_month(&self, month_id: MonthId) -> LedgerResult<Amount> {
        let assigned = Amount::sum(self.get_for_month(month_id).into_iter().map(|r| &r.amount))?;
        Ok(assigned)
    }

    pub fn count_for_month(&self, month_id: MonthId) -> usize {
        self.rows.values().filter(|r| r.month_id == month_id).count()
    }

    pub fn count_for_category(&self, category_id: CategoryId) -> usize {
        self.rows
            .values()
            .filter(|r| r.category_id == category_id)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthCategory> {
        self.rows.values()
    }
}

impl From<Vec<MonthCategory>> for MonthCategoryRepository {
    fn from(list: Vec<MonthCategory>) -> Self {
        let mut repo = Self::default();
        for row in list {
            repo.by_pair.insert((row.month_id, row.category_id), row.id);
            repo.rows.insert(row.id, row);
        }
        repo
    }
}

impl From<MonthCategoryRepository> for Vec<MonthCategory> {
    fn from(repo: MonthCategoryRepository) -> Self {
        let mut list: Vec<_> = repo.rows.into_values().collect();
        list.sort_by_key(|r| (r.month_id, r.category_id));
        list
    }
}
