//! Payee CLI commands

use clap::Subcommand;

use super::CliContext;
use crate::display::payee::format_payee_list;
use crate::error::LedgerResult;
use crate::services::PayeeService;

/// Payee subcommands
#[derive(Subcommand)]
pub enum PayeeCommands {
    /// Create a new payee
    Create {
        /// Payee name
        name: String,
    },
    /// List all payees
    List,
}

/// Handle a payee command
pub fn handle_payee_command(cli: &CliContext, cmd: PayeeCommands) -> LedgerResult<()> {
    let service = PayeeService::new(cli.db);

    match cmd {
        PayeeCommands::Create { name } => {
            let payee = service.create(&cli.budget, &name)?;
            println!("Created payee: {}", payee.name);
            println!("  ID: {}", payee.id.full());
        }

        PayeeCommands::List => {
            print!("{}", format_payee_list(&service.get_all(&cli.budget)?));
        }
    }

    Ok(())
}
