//! Account model
//!
//! Represents the accounts (checking, savings, cash, ...) transactions are
//! recorded against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::{AccountId, BudgetId};
use crate::error::LedgerResult;
use crate::validation::validate_name;

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Owning budget
    pub budget_id: BudgetId,

    /// Account name (e.g., "Chase Checking")
    pub name: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    pub fn new(budget_id: BudgetId, name: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            budget_id,
            name: name.into().trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Validate the account
    pub fn validate(&self) -> LedgerResult<()> {
        validate_name("Name", &self.name)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An account with the sum of its transactions
#[derive(Debug, Clone, Serialize)]
pub struct AccountWithBalance {
    pub account: Account,
    pub balance: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account() {
        let budget_id = BudgetId::new();
        let account = Account::new(budget_id, "Checking ");
        assert_eq!(account.name, "Checking");
        assert_eq!(account.budget_id, budget_id);
    }

    #[test]
    fn test_validation() {
        let mut account = Account::new(BudgetId::new(), "Valid Name");
        assert!(account.validate().is_ok());

        account.name = String::new();
        assert_eq!(
            account.validate().unwrap_err().to_string(),
            "Name is required."
        );

        account.name = "a".repeat(256);
        assert_eq!(
            account.validate().unwrap_err().to_string(),
            "Name must be at most 255 characters."
        );
    }

    #[test]
    fn test_serialization() {
        let account = Account::new(BudgetId::new(), "Test");
        let json = serde_json::to_string(&account).unwrap();
        let deserialized: Account = serde_json::from_str(&json).unwrap();
        assert_eq!(account.id, deserialized.id);
        assert_eq!(account.name, deserialized.name);
    }

    #[test]
    fn test_display() {
        let account = Account::new(BudgetId::new(), "My Checking");
        assert_eq!(format!("{}", account), "My Checking");
    }
}
