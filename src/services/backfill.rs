//! Month/category completeness
//!
//! Every month of a budget carries exactly one assignment row per category of
//! that budget. These helpers run inside a [`Database`](crate::storage::Database)
//! transaction and create the rows a new month or a new category needs, so a
//! failure anywhere rolls back the whole change.

use tracing::info;

use crate::error::LedgerResult;
use crate::models::{BudgetId, Category, Month, MonthCategory, MonthDate};
use crate::storage::Store;

/// Get or create the month for `date`, making sure it has a row for every category
///
/// Calling this again for an existing month returns the same month and adds no
/// rows.
pub fn ensure_month(store: &mut Store, budget_id: BudgetId, date: MonthDate) -> LedgerResult<Month> {
    let (month, created) = store.months.get_or_create(budget_id, date)?;

    let mut rows = 0;
    for category in store.categories.get_for_budget(budget_id) {
        let (_, row_created) = store.month_categories.get_or_create(month.id, category.id)?;
        if row_created {
            rows += 1;
        }
    }

    if created {
        info!(budget = %budget_id, month = %date, rows, "month created");
    }
    Ok(month)
}

/// Give a new category a zero row in every existing month of its budget
///
/// Returns the number of rows created. A row that already exists is a conflict,
/// since the category was only just created.
pub fn backfill_category(store: &mut Store, category: &Category) -> LedgerResult<usize> {
    let months = store.months.get_for_budget(category.budget_id);
    for month in &months {
        store
            .month_categories
            .create(MonthCategory::new(month.id, category.id))?;
    }
    Ok(months.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, CategoryGroup, UserId};

    fn md(s: &str) -> MonthDate {
        s.parse().unwrap()
    }

    fn store_with_budget() -> (Store, BudgetId, CategoryGroup) {
        let mut store = Store::default();
        let budget = Budget::new("B", UserId::new());
        let budget_id = budget.id;
        store.budgets.create(budget).unwrap();
        let group = CategoryGroup::new(budget_id, "Bills");
        store.categories.create_group(group.clone()).unwrap();
        (store, budget_id, group)
    }

    fn add_category(store: &mut Store, group: &CategoryGroup, name: &str) -> Category {
        let category = Category::new(group, name);
        store.categories.create(category.clone()).unwrap();
        category
    }

    #[test]
    fn test_new_month_gets_a_row_per_category() {
        let (mut store, budget_id, group) = store_with_budget();
        for name in ["Electric", "Water", "Rent"] {
            add_category(&mut store, &group, name);
        }

        let month = ensure_month(&mut store, budget_id, md("2022-05")).unwrap();

        assert_eq!(store.month_categories.count_for_month(month.id), 3);
        assert!(store
            .month_categories
            .get_for_month(month.id)
            .iter()
            .all(|row| row.amount.is_zero()));
    }

    #[test]
    fn test_ensure_month_is_idempotent() {
        let (mut store, budget_id, group) = store_with_budget();
        add_category(&mut store, &group, "Electric");

        let first = ensure_month(&mut store, budget_id, md("2022-05")).unwrap();
        let second = ensure_month(&mut store, budget_id, md("2022-05-20")).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.months.get_for_budget(budget_id).len(), 1);
        assert_eq!(store.month_categories.count_for_month(first.id), 1);
    }

    #[test]
    fn test_new_category_gets_a_row_per_month() {
        let (mut store, budget_id, group) = store_with_budget();
        for month in ["2022-03", "2022-04", "2022-05"] {
            ensure_month(&mut store, budget_id, md(month)).unwrap();
        }

        let category = add_category(&mut store, &group, "Electric");
        let rows = backfill_category(&mut store, &category).unwrap();

        assert_eq!(rows, 3);
        assert_eq!(store.month_categories.count_for_category(category.id), 3);
    }

    #[test]
    fn test_backfill_ignores_other_budgets() {
        let (mut store, budget_id, group) = store_with_budget();
        ensure_month(&mut store, budget_id, md("2022-05")).unwrap();
        ensure_month(&mut store, BudgetId::new(), md("2022-05")).unwrap();

        let category = add_category(&mut store, &group, "Electric");
        assert_eq!(backfill_category(&mut store, &category).unwrap(), 1);
    }

    #[test]
    fn test_backfill_conflict_is_an_error() {
        let (mut store, budget_id, group) = store_with_budget();
        let category = add_category(&mut store, &group, "Electric");
        // Month creation already gave the category its row
        ensure_month(&mut store, budget_id, md("2022-05")).unwrap();

        let err = backfill_category(&mut store, &category).unwrap_err();
        assert!(err.is_duplicate());
    }
}
