//! Display formatting for terminal output
//!
//! Every formatter returns a `String`; the CLI decides where it goes.

pub mod account;
pub mod budget;
pub mod category;
pub mod month;
pub mod payee;
pub mod transaction;

pub use account::format_account_list;
pub use budget::format_budget_list;
pub use category::format_category_tree;
pub use month::format_month_view;
pub use payee::format_payee_list;
pub use transaction::{format_transaction_details, format_transaction_register};

use crate::models::Amount;

/// Render an amount with a currency symbol, e.g. `-$5.00`
pub fn format_money(amount: &Amount, currency: &str) -> String {
    if amount.is_negative() {
        format!("-{}{}", currency, amount.negate())
    } else {
        format!("{}{}", currency, amount.clone().or_zero())
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
