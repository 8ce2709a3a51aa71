//! Core data models for the ledger
//!
//! This module contains the data structures of the budgeting domain: the exact
//! decimal amount type, budgets, accounts, categories, months and their
//! assignment rows, payees, transactions, and users.

pub mod account;
pub mod amount;
pub mod budget;
pub mod category;
pub mod ids;
pub mod month;
pub mod month_category;
pub mod payee;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountWithBalance};
pub use amount::{Amount, AmountError, AmountParseError};
pub use budget::Budget;
pub use category::{Category, CategoryGroup, CategoryGroupWithCategories};
pub use ids::{
    AccountId, BudgetId, CategoryGroupId, CategoryId, MonthCategoryId, MonthId, PayeeId,
    TransactionId, UserId,
};
pub use month::{Month, MonthDate, MonthView};
pub use month_category::{MonthCategory, MonthCategoryView};
pub use payee::Payee;
pub use transaction::{Transaction, TransactionDetails, TransactionParams};
pub use user::{User, UserPublic};
