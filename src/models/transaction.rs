//! Transaction model
//!
//! A transaction moves money in or out of an account. When it carries a
//! category it counts toward that category's activity, or toward income if the
//! category sits in the income group.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::{AccountId, CategoryId, PayeeId, TransactionId};
use crate::error::LedgerResult;
use crate::validation::{
    max_decimal_places, max_integer_digits, max_length, required, validate_fields, Field,
};

/// Maximum number of decimal places accepted on a transaction amount
pub const MAX_AMOUNT_PLACES: u32 = 2;

/// Digits allowed before the decimal point of any amount
pub const MAX_AMOUNT_DIGITS: u64 = 13;

/// Maximum length of transaction notes
pub const MAX_NOTES_LENGTH: usize = 255;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Category, if the transaction is categorized
    pub category_id: Option<CategoryId>,

    /// Payee, if any
    pub payee_id: Option<PayeeId>,

    /// Signed amount: negative for outflows
    pub amount: Amount,

    /// Transaction date
    pub date: NaiveDate,

    /// Free-form notes
    #[serde(default)]
    pub notes: Option<String>,

    /// When the transaction was created
    pub created_at: DateTime<Utc>,

    /// When the transaction was last modified
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction from validated parameters
    pub fn new(account_id: AccountId, amount: Amount, date: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            id: TransactionId::new(),
            account_id,
            category_id: None,
            payee_id: None,
            amount,
            date,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every editable field
    pub fn apply(&mut self, account_id: AccountId, params: &TransactionParams, date: NaiveDate) {
        self.account_id = account_id;
        self.category_id = params.category_id;
        self.payee_id = params.payee_id;
        self.amount = params.amount.clone();
        self.date = date;
        self.notes = params.clean_notes();
        self.updated_at = Utc::now();
    }

    /// Check if this is an outflow (negative amount)
    pub fn is_outflow(&self) -> bool {
        self.amount.is_negative()
    }

    /// Check if this is an inflow (positive amount)
    pub fn is_inflow(&self) -> bool {
        self.amount.is_positive()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.amount)?;
        if let Some(notes) = &self.notes {
            write!(f, " {}", notes)?;
        }
        Ok(())
    }
}

/// Input for creating or editing a transaction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionParams {
    pub account_id: Option<AccountId>,
    pub category_id: Option<CategoryId>,
    pub payee_id: Option<PayeeId>,
    pub amount: Amount,
    pub date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl TransactionParams {
    /// Check every field, reporting all failures together
    pub fn validate(&self) -> LedgerResult<()> {
        let notes = self.notes.as_deref().unwrap_or("");
        validate_fields(&[
            Field::new("Account ID", [required(&self.account_id)]),
            Field::new(
                "Amount",
                [
                    required(&self.amount),
                    max_decimal_places(&self.amount, MAX_AMOUNT_PLACES),
                    max_integer_digits(&self.amount, MAX_AMOUNT_DIGITS),
                ],
            ),
            Field::new("Date", [required(&self.date)]),
            Field::new("Notes", [max_length(notes, MAX_NOTES_LENGTH)]),
        ])
    }

    /// Notes trimmed, with blank notes dropped
    pub fn clean_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

/// A transaction with the names of what it refers to
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetails {
    pub transaction: Transaction,
    pub account_name: String,
    pub category_name: Option<String>,
    pub payee_name: Option<String>,
}
