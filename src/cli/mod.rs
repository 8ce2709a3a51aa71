//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the clap
//! argument parsing with the service layer. The command line acts for the user
//! and budget stored in the local profile; each run opens a process-local
//! session for that user.

pub mod account;
pub mod budget;
pub mod category;
pub mod init;
pub mod month;
pub mod payee;
pub mod transaction;

pub use account::{handle_account_command, AccountCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use init::handle_init_command;
pub use month::{handle_month_command, MonthCommands};
pub use payee::{handle_payee_command, PayeeCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::auth::{AuthContext, BudgetAuthContext, SessionStore};
use crate::config::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Amount, MonthDate};
use crate::services::{BudgetService, UserService};
use crate::storage::Database;

/// Everything a budget-scoped command needs
pub struct CliContext<'a> {
    pub db: &'a Database,
    pub settings: &'a Settings,
    pub budget: BudgetAuthContext,
}

impl<'a> CliContext<'a> {
    /// Open a session for the profile's user and authorize the profile's budget
    pub fn open(db: &'a Database, sessions: &dyn SessionStore, settings: &'a Settings) -> LedgerResult<Self> {
        let auth = authenticate(db, sessions, settings)?;
        let profile = settings.require_profile()?;
        let budget = BudgetService::new(db).authorize(&auth, profile.budget_id)?;
        Ok(Self { db, settings, budget })
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    pub fn date_format(&self) -> &str {
        &self.settings.date_format
    }
}

/// Open a session for the profile's user
pub fn authenticate(db: &Database, sessions: &dyn SessionStore, settings: &Settings) -> LedgerResult<AuthContext> {
    let profile = settings.require_profile()?;
    UserService::new(db, sessions).open_session(profile.user_id)
}

/// Parse a decimal amount such as `-12.50`
pub fn parse_amount(s: &str) -> LedgerResult<Amount> {
    s.parse().map_err(|_| {
        LedgerError::Validation(format!(
            "Invalid amount: '{}'. Use a decimal like '12.50' or '-12.50'.",
            s
        ))
    })
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD format.", s))
    })
}

/// Parse `YYYY-MM`, a full date, or nothing for the current month
pub fn parse_month(s: Option<&str>) -> LedgerResult<MonthDate> {
    match s {
        None => Ok(MonthDate::current()),
        Some(s) => s
            .parse::<MonthDate>()
            .map_err(|e| LedgerError::Validation(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("-12.50").unwrap(), Amount::new(-1250, -2));
        assert!(parse_amount("twelve").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2022-05-15").unwrap(), NaiveDate::from_ymd_opt(2022, 5, 15).unwrap());
        assert!(parse_date("15/05/2022").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month(Some("2022-05")).unwrap(), MonthDate::from_ymd(2022, 5).unwrap());
        assert_eq!(parse_month(None).unwrap(), MonthDate::current());
        assert!(parse_month(Some("May")).unwrap_err().is_validation());
    }
}
