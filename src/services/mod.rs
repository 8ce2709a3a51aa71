//! Service layer for the ledger
//!
//! Services add validation, budget scoping and cross-entity consistency on top
//! of the storage layer. Every budget-scoped operation takes a
//! [`BudgetAuthContext`](crate::auth::BudgetAuthContext); entities belonging to
//! another budget are reported as not found.

pub mod account;
pub mod backfill;
pub mod budget;
pub mod category;
pub mod month;
pub mod payee;
pub mod reconcile;
pub mod transaction;
pub mod user;

pub use account::AccountService;
pub use budget::BudgetService;
pub use category::CategoryService;
pub use month::MonthService;
pub use payee::PayeeService;
pub use transaction::TransactionService;
pub use user::UserService;
