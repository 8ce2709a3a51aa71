//! Transaction display formatting
//!
//! Register (one row per transaction) and detail views.

use super::{format_money, truncate};
use crate::models::TransactionDetails;

/// Format a single transaction as a register row
pub fn format_transaction_row(details: &TransactionDetails, currency: &str, date_format: &str) -> String {
    let txn = &details.transaction;
    format!(
        "{:<36} {:<10} {:<16} {:<16} {:<16} {:>12}",
        txn.id.full(),
        txn.date.format(date_format),
        truncate(&details.account_name, 16),
        truncate(details.payee_name.as_deref().unwrap_or(""), 16),
        truncate(details.category_name.as_deref().unwrap_or("(uncategorized)"), 16),
        format_money(&txn.amount, currency),
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[TransactionDetails],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<36} {:<10} {:<16} {:<16} {:<16} {:>12}\n",
        "ID", "Date", "Account", "Payee", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(111));
    output.push('\n');

    for details in transactions {
        output.push_str(&format_transaction_row(details, currency, date_format));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(details: &TransactionDetails, currency: &str, date_format: &str) -> String {
    let txn = &details.transaction;
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id.full()));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!("Amount:      {}\n", format_money(&txn.amount, currency)));
    output.push_str(&format!("Account:     {}\n", details.account_name));

    if let Some(payee) = &details.payee_name {
        output.push_str(&format!("Payee:       {}\n", payee));
    }

    match &details.category_name {
        Some(name) => output.push_str(&format!("Category:    {}\n", name)),
        None => output.push_str("Category:    (uncategorized)\n"),
    }

    if let Some(notes) = &txn.notes {
        output.push_str(&format!("Notes:       {}\n", notes));
    }

    output
}
