//! Budget CLI commands
//!
//! Creating budgets, listing the ones the local user belongs to, and choosing
//! which one the other commands act on.

use clap::Subcommand;

use super::authenticate;
use crate::auth::SessionStore;
use crate::config::{LedgerPaths, LocalProfile, Settings};
use crate::display::budget::format_budget_list;
use crate::error::{LedgerError, LedgerResult};
use crate::services::BudgetService;
use crate::storage::Database;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a new budget
    Create {
        /// Budget name
        name: String,
        /// Switch to the new budget
        #[arg(long = "use")]
        switch: bool,
    },

    /// List your budgets; the current one is marked with *
    List,

    /// Switch the budget other commands act on
    Use {
        /// Budget name or ID
        budget: String,
    },
}

/// Handle a budget command
pub fn handle_budget_command(
    db: &Database,
    sessions: &dyn SessionStore,
    paths: &LedgerPaths,
    settings: &mut Settings,
    cmd: BudgetCommands,
) -> LedgerResult<()> {
    let auth = authenticate(db, sessions, settings)?;
    let service = BudgetService::new(db);

    match cmd {
        BudgetCommands::Create { name, switch } => {
            let budget = service.create(&auth, &name)?;
            println!("Created budget: {}", budget.name);
            println!("  ID: {}", budget.id.full());

            if switch {
                settings.profile = Some(LocalProfile {
                    user_id: auth.user_id,
                    budget_id: budget.id,
                });
                settings.save(paths)?;
                println!("Now using budget: {}", budget.name);
            }
        }

        BudgetCommands::List => {
            let budgets = service.get_all(&auth)?;
            let current = settings.profile.map(|p| p.budget_id);
            print!("{}", format_budget_list(&budgets, current));
        }

        BudgetCommands::Use { budget } => {
            let found = service
                .find(&auth, &budget)?
                .ok_or_else(|| LedgerError::budget_not_found(&budget))?;

            settings.profile = Some(LocalProfile {
                user_id: auth.user_id,
                budget_id: found.id,
            });
            settings.save(paths)?;
            println!("Now using budget: {}", found.name);
        }
    }

    Ok(())
}
