//! Category service
//!
//! Category creation also gives the new category a zero assignment row in
//! every existing month of the budget, in the same transaction.

use tracing::info;

use crate::auth::BudgetAuthContext;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, CategoryGroup, CategoryGroupId, CategoryGroupWithCategories, CategoryId};
use crate::services::backfill::backfill_category;
use crate::storage::Database;

/// Service for category and category group management
pub struct CategoryService<'a> {
    db: &'a Database,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    // === Group Operations ===

    /// Create a new (non-income) category group
    pub fn create_group(&self, ctx: &BudgetAuthContext, name: &str) -> LedgerResult<CategoryGroup> {
        let group = CategoryGroup::new(ctx.budget_id(), name);
        group.validate()?;

        self.db.exec_tx(|store| {
            if store
                .categories
                .get_group_by_name(ctx.budget_id(), &group.name)
                .is_some()
            {
                return Err(LedgerError::Validation(format!(
                    "A category group named '{}' already exists.",
                    group.name
                )));
            }
            store.categories.create_group(group.clone())
        })?;

        info!(budget = %ctx.budget_id(), group = %group.id, "category group created");
        Ok(group)
    }

    /// Get a group of the budget
    pub fn get_group(&self, ctx: &BudgetAuthContext, id: CategoryGroupId) -> LedgerResult<CategoryGroup> {
        self.db.read()?.categories.get_group(ctx.budget_id(), id)
    }

    /// Find a group by name or ID string
    pub fn find_group(&self, ctx: &BudgetAuthContext, identifier: &str) -> LedgerResult<Option<CategoryGroup>> {
        let store = self.db.read()?;
        if let Some(group) = store.categories.get_group_by_name(ctx.budget_id(), identifier) {
            return Ok(Some(group));
        }

        if let Ok(id) = identifier.parse::<CategoryGroupId>() {
            return Ok(store.categories.get_group(ctx.budget_id(), id).ok());
        }

        Ok(None)
    }

    // === Category Operations ===

    /// Create a category in a group and backfill it into every month
    pub fn create_category(
        &self,
        ctx: &BudgetAuthContext,
        group_id: CategoryGroupId,
        name: &str,
    ) -> LedgerResult<Category> {
        let (category, rows) = self.db.exec_tx(|store| {
            let group = store.categories.get_group(ctx.budget_id(), group_id)?;
            let category = Category::new(&group, name);
            category.validate()?;

            if store
                .categories
                .get_by_name(ctx.budget_id(), &category.name)
                .is_some()
            {
                return Err(LedgerError::Validation(format!(
                    "A category named '{}' already exists.",
                    category.name
                )));
            }

            store.categories.create(category.clone())?;
            let rows = backfill_category(store, &category)?;
            Ok((category, rows))
        })?;

        info!(
            budget = %ctx.budget_id(),
            category = %category.id,
            rows,
            "category created"
        );
        Ok(category)
    }

    /// Get a category of the budget
    pub fn get_category(&self, ctx: &BudgetAuthContext, id: CategoryId) -> LedgerResult<Category> {
        self.db
            .read()?
            .categories
            .get_single_for_budget(ctx.budget_id(), id)
    }

    /// Find a category by name or ID string
    pub fn find_category(&self, ctx: &BudgetAuthContext, identifier: &str) -> LedgerResult<Option<Category>> {
        let store = self.db.read()?;
        if let Some(category) = store.categories.get_by_name(ctx.budget_id(), identifier) {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return Ok(store
                .categories
                .get_single_for_budget(ctx.budget_id(), id)
                .ok());
        }

        Ok(None)
    }

    /// Every group of the budget with its categories, the income group first
    pub fn get_all(&self, ctx: &BudgetAuthContext) -> LedgerResult<Vec<CategoryGroupWithCategories>> {
        let store = self.db.read()?;
        Ok(store
            .categories
            .get_groups_for_budget(ctx.budget_id())
            .into_iter()
            .map(|group| {
                let categories = store.categories.get_by_group(group.id);
                CategoryGroupWithCategories { group, categories }
            })
            .collect())
    }
}
