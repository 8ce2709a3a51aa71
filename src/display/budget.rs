//! Budget display formatting

use crate::models::{Budget, BudgetId};

/// List budgets, marking the one commands currently act on
pub fn format_budget_list(budgets: &[Budget], current: Option<BudgetId>) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let mut output = String::new();
    for budget in budgets {
        let marker = if Some(budget.id) == current { "*" } else { " " };
        output.push_str(&format!("{} {}  ({})\n", marker, budget.name, budget.id.full()));
    }
    output
}
