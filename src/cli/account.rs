//! Account CLI commands

use clap::Subcommand;

use super::CliContext;
use crate::display::account::format_account_list;
use crate::error::LedgerResult;
use crate::services::AccountService;

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        /// Account name
        name: String,
    },
    /// List all accounts with their balances
    List,
}

/// Handle an account command
pub fn handle_account_command(cli: &CliContext, cmd: AccountCommands) -> LedgerResult<()> {
    let service = AccountService::new(cli.db);

    match cmd {
        AccountCommands::Create { name } => {
            let account = service.create(&cli.budget, &name)?;
            println!("Created account: {}", account.name);
            println!("  ID: {}", account.id.full());
        }

        AccountCommands::List => {
            let accounts = service.get_all(&cli.budget)?;
            println!("{}", format_account_list(&accounts, cli.currency()));
        }
    }

    Ok(())
}
