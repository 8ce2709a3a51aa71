//! beans - a zero-based budgeting ledger
//!
//! Users assign money to spending categories month by month and record
//! transactions against accounts. The ledger answers how much is available in
//! every category and how much is still free to assign in every month, using
//! exact decimal arithmetic throughout.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: The exact-decimal [`Amount`](models::Amount) and every ledger entity
//! - `validation`: Field rules and their aggregated error messages
//! - `storage`: Repositories, the transaction manager and JSON persistence
//! - `services`: Budget-scoped operations, month backfill and reconciliation
//! - `auth`: Password hashing, sessions and authenticated contexts
//! - `config`: Path resolution and user settings
//! - `logging`: `tracing` subscriber setup
//! - `display` and `cli`: The `beans` command line
//!
//! # Example
//!
//! ```rust,ignore
//! use beans::services::MonthService;
//!
//! let view = MonthService::new(&db).get_or_create(&ctx, "2022-05".parse()?)?;
//! println!("Budgetable: {}", view.budgetable);
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{ErrorCode, LedgerError, LedgerResult};
