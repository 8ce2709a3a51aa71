//! Category and CategoryGroup repository

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{BudgetId, Category, CategoryGroup, CategoryGroupId, CategoryId};

/// Serializable category data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryData {
    #[serde(default)]
    pub groups: Vec<CategoryGroup>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

/// Groups and categories keyed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CategoryData", into = "CategoryData")]
pub struct CategoryRepository {
    groups: HashMap<CategoryGroupId, CategoryGroup>,
    categories: HashMap<CategoryId, Category>,
}

fn by_name<T>(list: &mut [T], name: impl Fn(&T) -> &str) {
    list.sort_by(|a, b| name(a).to_lowercase().cmp(&name(b).to_lowercase()));
}

impl CategoryRepository {
    // Group operations

    pub fn create_group(&mut self, group: CategoryGroup) -> LedgerResult<()> {
        if self.groups.contains_key(&group.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "Category Group",
                identifier: group.id.to_string(),
            });
        }
        self.groups.insert(group.id, group);
        Ok(())
    }

    /// Whether the group exists in the budget
    pub fn group_exists(&self, budget_id: BudgetId, id: CategoryGroupId) -> bool {
        self.groups
            .get(&id)
            .is_some_and(|g| g.budget_id == budget_id)
    }

    pub fn get_group(&self, budget_id: BudgetId, id: CategoryGroupId) -> LedgerResult<CategoryGroup> {
        self.groups
            .get(&id)
            .filter(|g| g.budget_id == budget_id)
            .cloned()
            .ok_or_else(|| LedgerError::group_not_found(id))
    }

    pub fn find_group(&self, id: CategoryGroupId) -> Option<&CategoryGroup> {
        self.groups.get(&id)
    }

    /// Groups of a budget: the income group first, then by name
    pub fn get_groups_for_budget(&self, budget_id: BudgetId) -> Vec<CategoryGroup> {
        let mut list: Vec<_> = self
            .groups
            .values()
            .filter(|g| g.budget_id == budget_id)
            .cloned()
            .collect();
        by_name(&mut list, |g| &g.name);
        list.sort_by_key(|g| !g.is_income);
        list
    }

    /// Find a group by name (case-insensitive)
    pub fn get_group_by_name(&self, budget_id: BudgetId, name: &str) -> Option<CategoryGroup> {
        let name_lower = name.trim().to_lowercase();
        self.groups
            .values()
            .find(|g| g.budget_id == budget_id && g.name.to_lowercase() == name_lower)
            .cloned()
    }

    // Category operations

    pub fn create(&mut self, category: Category) -> LedgerResult<()> {
        if self.categories.contains_key(&category.id) {
            return Err(LedgerError::Duplicate {
                entity_type: "Category",
                identifier: category.id.to_string(),
            });
        }
        self.categories.insert(category.id, category);
        Ok(())
    }

    /// Get a category of the budget; categories of other budgets are not found
    pub fn get_single_for_budget(&self, budget_id: BudgetId, id: CategoryId) -> LedgerResult<Category> {
        self.categories
            .get(&id)
            .filter(|c| c.budget_id == budget_id)
            .cloned()
            .ok_or_else(|| LedgerError::category_not_found(id))
    }

    pub fn find(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    /// All categories of a budget, sorted by name
    pub fn get_for_budget(&self, budget_id: BudgetId) -> Vec<Category> {
        let mut list: Vec<_> = self
            .categories
            .values()
            .filter(|c| c.budget_id == budget_id)
            .cloned()
            .collect();
        by_name(&mut list, |c| &c.name);
        list
    }

    /// Categories in a group, sorted by name
    pub fn get_by_group(&self, group_id: CategoryGroupId) -> Vec<Category> {
        let mut list: Vec<_> = self
            .categories
            .values()
            .filter(|c| c.group_id == group_id)
            .cloned()
            .collect();
        by_name(&mut list, |c| &c.name);
        list
    }

    /// Find a category by name (case-insensitive)
    pub fn get_by_name(&self, budget_id: BudgetId, name: &str) -> Option<Category> {
        let name_lower = name.trim().to_lowercase();
        self.categories
            .values()
            .find(|c| c.budget_id == budget_id && c.name.to_lowercase() == name_lower)
            .cloned()
    }

    /// Whether the category sits in an income group
    pub fn is_income(&self, id: CategoryId) -> bool {
        self.categories
            .get(&id)
            .and_then(|c| self.groups.get(&c.group_id))
            .is_some_and(|g| g.is_income)
    }
}

impl From<CategoryData> for CategoryRepository {
    fn from(data: CategoryData) -> Self {
        Self {
            groups: data.groups.into_iter().map(|g| (g.id, g)).collect(),
            categories: data.categories.into_iter().map(|c| (c.id, c)).collect(),
        }
    }
}

impl From<CategoryRepository> for CategoryData {
    fn from(repo: CategoryRepository) -> Self {
        let mut groups: Vec<_> = repo.groups.into_values().collect();
        groups.sort_by_key(|g| g.created_at);
        let mut categories: Vec<_> = repo.categories.into_values().collect();
        categories.sort_by_key(|c| c.created_at);
        Self { groups, categories }
    }
}
