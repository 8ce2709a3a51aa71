//! Account display formatting

use super::format_money;
use crate::models::{Amount, AccountWithBalance};

/// Format a list of accounts with balances as a table
pub fn format_account_list(accounts: &[AccountWithBalance], currency: &str) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.account.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>14}\n",
        "Name",
        "Balance",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->14}\n",
        "",
        "",
        name_width = name_width,
    ));

    for row in accounts {
        output.push_str(&format!(
            "{:<name_width$}  {:>14}\n",
            row.account.name,
            format_money(&row.balance, currency),
            name_width = name_width,
        ));
    }

    let total = Amount::sum(accounts.iter().map(|a| &a.balance))
        .map(|t| format_money(&t, currency))
        .unwrap_or_else(|_| "?".to_string());
    output.push_str(&format!(
        "{:-<name_width$}  {:->14}\n",
        "",
        "",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:<name_width$}  {:>14}\n",
        "TOTAL",
        total,
        name_width = name_width,
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, BudgetId};

    #[test]
    fn test_empty_list() {
        assert_eq!(format_account_list(&[], "$"), "No accounts found.");
    }

    #[test]
    fn test_list_with_total() {
        let budget_id = BudgetId::new();
        let rows = vec![
            AccountWithBalance {
                account: Account::new(budget_id, "Checking"),
                balance: "120.50".parse().unwrap(),
            },
            AccountWithBalance {
                account: Account::new(budget_id, "Card"),
                balance: "-20.25".parse().unwrap(),
            },
        ];

        let output = format_account_list(&rows, "$");
        assert!(output.contains("Checking"));
        assert!(output.contains("$120.50"));
        assert!(output.contains("-$20.25"));
        assert!(output.contains("TOTAL"));
        assert!(output.contains("$100.25"));
    }
}
