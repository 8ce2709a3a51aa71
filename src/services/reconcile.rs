//! Month reconciliation
//!
//! Computes the figures of one month from committed data without writing
//! anything:
//!
//! - income: income-category transactions dated within the month
//! - assigned: the month's assignment rows summed
//! - budgetable: income + previous carryover - carryover - assigned
//! - per category, activity within the month and the running available balance
//!
//! Available is never clamped, so overspending rolls forward as a negative
//! balance.

use std::collections::HashMap;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, CategoryId, Month, MonthCategoryView, MonthView};
use crate::storage::Store;

/// Build the view of `month`, crediting `previous`'s carryover
pub fn reconcile(store: &Store, month: &Month, previous: &Month) -> LedgerResult<MonthView> {
    let budget_id = month.budget_id;
    let first_day = month.date.first_day();
    let last_day = month.date.last_day();

    let income = store.get_income_between(budget_id, first_day, last_day)?;
    let assigned = store.month_categories.get_assigned_in_month(month.id)?;
    let carried_over = previous.carryover.clone();
    let budgetable = income
        .add(&carried_over)?
        .sub(&month.carryover)?
        .sub(&assigned)?;

    let activity = store.get_activity_by_category(budget_id, first_day, last_day)?;
    let activity_before = store.get_activity_before(budget_id, first_day)?;
    let assigned_before = store.get_assigned_before(budget_id, month.date)?;

    let mut categories = Vec::new();
    for row in store.month_categories.get_for_month(month.id) {
        let category = store.categories.find(row.category_id).ok_or_else(|| {
            LedgerError::Consistency(format!(
                "month category {} refers to missing category {}",
                row.id, row.category_id
            ))
        })?;
        let group = store.categories.find_group(category.group_id).ok_or_else(|| {
            LedgerError::Consistency(format!(
                "category {} refers to missing group {}",
                category.id, category.group_id
            ))
        })?;

        let month_activity = lookup(&activity, category.id);
        let available = Amount::sum([
            &lookup(&assigned_before, category.id),
            &lookup(&activity_before, category.id),
            &row.amount,
            &month_activity,
        ])?;

        categories.push(MonthCategoryView {
            id: row.id,
            category_id: category.id,
            category_name: category.name.clone(),
            group_id: group.id,
            group_name: group.name.clone(),
            is_income: group.is_income,
            amount: row.amount.clone().or_zero(),
            activity: month_activity,
            available,
        });
    }

    categories.sort_by(|a, b| {
        b.is_income
            .cmp(&a.is_income)
            .then_with(|| a.group_name.to_lowercase().cmp(&b.group_name.to_lowercase()))
            .then_with(|| a.category_name.to_lowercase().cmp(&b.category_name.to_lowercase()))
    });

    Ok(MonthView {
        month: month.clone(),
        carried_over,
        income,
        assigned,
        budgetable,
        categories,
    })
}

fn lookup(sums: &HashMap<CategoryId, Amount>, id: CategoryId) -> Amount {
    sums.get(&id).cloned().unwrap_or_else(Amount::zero)
}
