//! Month view formatting

use super::{format_money, truncate};
use crate::models::{Amount, MonthView};

/// Format the reconciled month: the summary block, then one row per category
pub fn format_month_view(view: &MonthView, currency: &str) -> String {
    let money = |a: &Amount| format_money(a, currency);
    let mut output = String::new();

    output.push_str(&format!("Month: {}\n", view.month.date));
    output.push_str(&format!("  Income:        {:>14}\n", money(&view.income)));
    output.push_str(&format!("  Carried over:  {:>14}\n", money(&view.carried_over)));
    output.push_str(&format!("  Carryover:     {:>14}\n", money(&view.month.carryover)));
    output.push_str(&format!("  Assigned:      {:>14}\n", money(&view.assigned)));
    output.push_str(&format!("  Budgetable:    {:>14}\n", money(&view.budgetable)));
    output.push('\n');

    output.push_str(&format!(
        "{:<20} {:<24} {:>12} {:>12} {:>12}\n",
        "Group", "Category", "Assigned", "Activity", "Available"
    ));
    output.push_str(&"-".repeat(84));
    output.push('\n');

    for row in &view.categories {
        output.push_str(&format!(
            "{:<20} {:<24} {:>12} {:>12} {:>12}\n",
            truncate(&row.group_name, 20),
            truncate(&row.category_name, 24),
            money(&row.amount),
            money(&row.activity),
            money(&row.available),
        ));
    }

    output
}
