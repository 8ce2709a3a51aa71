//! Budget model
//!
//! A budget is the top-level container every other entity hangs off. It can be
//! shared by several users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, UserId};
use crate::error::LedgerResult;
use crate::validation::validate_name;

/// Name of the category group and category seeded into every new budget
pub const INCOME_NAME: &str = "Income";

/// A budget shared by one or more users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Budget name
    pub name: String,

    /// Users with access to this budget
    #[serde(default)]
    pub user_ids: Vec<UserId>,

    /// When the budget was created
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget owned by a single user
    pub fn new(name: impl Into<String>, owner: UserId) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into().trim().to_string(),
            user_ids: vec![owner],
            created_at: Utc::now(),
        }
    }

    /// Check whether a user may see this budget
    pub fn user_has_access(&self, user_id: UserId) -> bool {
        self.user_ids.contains(&user_id)
    }

    /// Grant another user access
    pub fn add_user(&mut self, user_id: UserId) {
        if !self.user_has_access(user_id) {
            self.user_ids.push(user_id);
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> LedgerResult<()> {
        validate_name("Name", &self.name)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let owner = UserId::new();
        let budget = Budget::new("  Household ", owner);

        assert_eq!(budget.name, "Household");
        assert_eq!(budget.user_ids, vec![owner]);
        assert!(budget.user_has_access(owner));
        assert!(!budget.user_has_access(UserId::new()));
    }

    #[test]
    fn test_add_user_is_idempotent() {
        let owner = UserId::new();
        let partner = UserId::new();
        let mut budget = Budget::new("Shared", owner);

        budget.add_user(partner);
        budget.add_user(partner);
        assert_eq!(budget.user_ids.len(), 2);
        assert!(budget.user_has_access(partner));
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new("Valid", UserId::new());
        assert!(budget.validate().is_ok());

        budget.name = String::new();
        assert!(budget.validate().unwrap_err().is_validation());

        budget.name = "a".repeat(256);
        assert!(budget.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let budget = Budget::new("Test", UserId::new());
        let json = serde_json::to_string(&budget).unwrap();
        let deserialized: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(budget.id, deserialized.id);
        assert_eq!(budget.user_ids, deserialized.user_ids);
    }
}
