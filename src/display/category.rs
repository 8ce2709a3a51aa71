//! Category display formatting
//!
//! Formats categories as a tree grouped by category group.

use crate::models::CategoryGroupWithCategories;

/// Format categories as a tree structure grouped by category group
pub fn format_category_tree(groups: &[CategoryGroupWithCategories]) -> String {
    if groups.is_empty() {
        return "No categories found.".to_string();
    }

    let mut output = String::new();

    for (i, gwc) in groups.iter().enumerate() {
        let income = if gwc.group.is_income { " (income)" } else { "" };
        output.push_str(&format!("{}{}\n", gwc.group.name, income));

        if gwc.categories.is_empty() {
            output.push_str("  (no categories)\n");
        } else {
            for (j, category) in gwc.categories.iter().enumerate() {
                let is_last = j == gwc.categories.len() - 1;
                let prefix = if is_last { "└── " } else { "├── " };
                output.push_str(&format!("  {}{}\n", prefix, category.name));
            }
        }

        // Blank line between groups
        if i < groups.len() - 1 {
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, Category, CategoryGroup};

    #[test]
    fn test_tree() {
        let budget_id = BudgetId::new();
        let income = CategoryGroup::income(budget_id, "Income");
        let bills = CategoryGroup::new(budget_id, "Bills");
        let groups = vec![
            CategoryGroupWithCategories {
                categories: vec![Category::new(&income, "Income")],
                group: income,
            },
            CategoryGroupWithCategories {
                categories: vec![Category::new(&bills, "Electric"), Category::new(&bills, "Water")],
                group: bills,
            },
        ];

        let output = format_category_tree(&groups);
        assert!(output.starts_with("Income (income)\n  └── Income\n\nBills\n"));
        assert!(output.contains("├── Electric"));
        assert!(output.contains("└── Water"));
    }

    #[test]
    fn test_empty_group() {
        let group = CategoryGroup::new(BudgetId::new(), "Savings");
        let output = format_category_tree(&[CategoryGroupWithCategories {
            group,
            categories: vec![],
        }]);
        assert!(output.contains("(no categories)"));
    }
}
