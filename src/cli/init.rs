//! The `init` command
//!
//! Registers the local user, creates their first budget and stores both in the
//! local profile.

use tracing::info;

use crate::auth::{Password, SessionStore};
use crate::config::{LedgerPaths, LocalProfile, Settings};
use crate::error::{LedgerError, LedgerResult};
use crate::services::{BudgetService, UserService};
use crate::storage::Database;

/// Set up the local profile
///
/// When `password` is `None` it is read from the terminal without echo.
pub fn handle_init_command(
    db: &Database,
    sessions: &dyn SessionStore,
    paths: &LedgerPaths,
    settings: &mut Settings,
    username: &str,
    password: Option<String>,
    budget_name: &str,
) -> LedgerResult<()> {
    if settings.profile.is_some() {
        return Err(LedgerError::Validation(
            "Already initialized. Use 'beans budget create' to add another budget.".into(),
        ));
    }

    let password = match password {
        Some(p) => Password::new(p),
        None => prompt_password()?,
    };

    paths.ensure_directories()?;
    let users = UserService::new(db, sessions);
    let user = users.register(username, &password)?;
    let auth = users.login(username, &password)?;
    let budget = BudgetService::new(db).create(&auth, budget_name)?;

    settings.profile = Some(LocalProfile {
        user_id: user.id,
        budget_id: budget.id,
    });
    settings.save(paths)?;
    info!(user = %user.id, budget = %budget.id, "local profile initialized");

    println!("Initialized beans at: {}", paths.base_dir().display());
    println!("  User:   {}", user.username);
    println!("  Budget: {}", budget.name);
    println!();
    println!("Run 'beans account create <name>' to add your first account.");
    Ok(())
}

/// Prompt for a password (hidden input), asking twice
fn prompt_password() -> LedgerResult<Password> {
    let read = |prompt: &str| {
        rpassword::prompt_password(prompt)
            .map(Password::new)
            .map_err(|e| LedgerError::Io(format!("Failed to read password: {}", e)))
    };

    let first = read("Password: ")?;
    let second = read("Confirm password: ")?;
    if first.as_str() != second.as_str() {
        return Err(LedgerError::Validation("Passwords do not match.".into()));
    }
    Ok(first)
}
