//! Month category model
//!
//! A month category is the assignment row for one (month, category) pair.
//! Every month of a budget has exactly one row per category of that budget.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::ids::{CategoryGroupId, CategoryId, MonthCategoryId, MonthId};

/// Funds assigned to a category in a month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthCategory {
    pub id: MonthCategoryId,

    pub month_id: MonthId,

    pub category_id: CategoryId,

    /// Assigned amount; rows start at zero
    #[serde(default)]
    pub amount: Amount,
}

impl MonthCategory {
    /// Create a row with nothing assigned
    pub fn new(month_id: MonthId, category_id: CategoryId) -> Self {
        Self {
            id: MonthCategoryId::new(),
            month_id,
            category_id,
            amount: Amount::zero(),
        }
    }
}

/// A month category with its computed figures
#[derive(Debug, Clone, Serialize)]
pub struct MonthCategoryView {
    pub id: MonthCategoryId,
    pub category_id: CategoryId,
    pub category_name: String,
    pub group_id: CategoryGroupId,
    pub group_name: String,
    pub is_income: bool,

    /// Assigned this month
    pub amount: Amount,

    /// Transactions against the category dated within the month
    pub activity: Amount,

    /// Running balance through the end of the month
    pub available: Amount,
}
