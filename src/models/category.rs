//! Category and CategoryGroup models
//!
//! Categories are organized into groups. A group flagged `is_income` holds the
//! categories whose transactions count as income rather than activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryGroupId, CategoryId};
use crate::error::LedgerResult;
use crate::validation::validate_name;

/// A group of related categories (e.g., "Bills", "Needs", "Wants")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    /// Unique identifier
    pub id: CategoryGroupId,

    /// Owning budget
    pub budget_id: BudgetId,

    /// Group name
    pub name: String,

    /// Whether this is the budget's income group
    #[serde(default)]
    pub is_income: bool,

    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl CategoryGroup {
    /// Create a new spending group
    pub fn new(budget_id: BudgetId, name: impl Into<String>) -> Self {
        Self {
            id: CategoryGroupId::new(),
            budget_id,
            name: name.into().trim().to_string(),
            is_income: false,
            created_at: Utc::now(),
        }
    }

    /// Create the income group for a budget
    pub fn income(budget_id: BudgetId, name: impl Into<String>) -> Self {
        let mut group = Self::new(budget_id, name);
        group.is_income = true;
        group
    }

    /// Validate the group
    pub fn validate(&self) -> LedgerResult<()> {
        validate_name("Name", &self.name)
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A budget category within a group
///
/// Categories are never deleted; transactions keep referring to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Owning budget, denormalized from the group
    pub budget_id: BudgetId,

    /// The group this category belongs to
    pub group_id: CategoryGroupId,

    /// Category name
    pub name: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category inside `group`
    pub fn new(group: &CategoryGroup, name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            budget_id: group.budget_id,
            group_id: group.id,
            name: name.into().trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Validate the category
    pub fn validate(&self) -> LedgerResult<()> {
        validate_name("Name", &self.name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A group together with its categories, for listing
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroupWithCategories {
    pub group: CategoryGroup,
    pub categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_group() {
        let budget_id = BudgetId::new();
        let group = CategoryGroup::new(budget_id, "Bills");
        assert_eq!(group.name, "Bills");
        assert_eq!(group.budget_id, budget_id);
        assert!(!group.is_income);

        let income = CategoryGroup::income(budget_id, "Income");
        assert!(income.is_income);
    }

    #[test]
    fn test_new_category_inherits_budget() {
        let group = CategoryGroup::new(BudgetId::new(), "Bills");
        let category = Category::new(&group, " Electric ");

        assert_eq!(category.name, "Electric");
        assert_eq!(category.group_id, group.id);
        assert_eq!(category.budget_id, group.budget_id);
    }

    #[test]
    fn test_validation() {
        let mut group = CategoryGroup::new(BudgetId::new(), "Valid");
        assert!(group.validate().is_ok());

        group.name = "   ".to_string();
        assert_eq!(
            group.validate().unwrap_err().to_string(),
            "Name is required."
        );

        let mut category = Category::new(&CategoryGroup::new(BudgetId::new(), "G"), "Valid");
        assert!(category.validate().is_ok());
        category.name = "a".repeat(256);
        assert!(category.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_serialization() {
        let group = CategoryGroup::income(BudgetId::new(), "Income");
        let json = serde_json::to_string(&group).unwrap();
        let deserialized: CategoryGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(group.id, deserialized.id);
        assert!(deserialized.is_income);

        let category = Category::new(&group, "Income");
        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category.id, deserialized.id);
        assert_eq!(category.group_id, deserialized.group_id);
    }
}
