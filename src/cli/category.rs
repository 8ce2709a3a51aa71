//! Category CLI commands
//!
//! Implements CLI commands for category and category group management.

use clap::Subcommand;

use super::CliContext;
use crate::display::category::format_category_tree;
use crate::error::{LedgerError, LedgerResult};
use crate::services::CategoryService;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories (organized by group)
    List,

    /// Create a new category
    Create {
        /// Category name
        name: String,
        /// Category group name or ID
        #[arg(short, long)]
        group: String,
    },

    /// Create a new category group
    #[command(alias = "create-group")]
    Group {
        /// Group name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(cli: &CliContext, cmd: CategoryCommands) -> LedgerResult<()> {
    let service = CategoryService::new(cli.db);

    match cmd {
        CategoryCommands::List => {
            let groups = service.get_all(&cli.budget)?;
            print!("{}", format_category_tree(&groups));
        }

        CategoryCommands::Create { name, group } => {
            let group = service
                .find_group(&cli.budget, &group)?
                .ok_or_else(|| LedgerError::group_not_found(&group))?;

            let category = service.create_category(&cli.budget, group.id, &name)?;

            println!("Created category: {}", category.name);
            println!("  Group: {}", group.name);
            println!("  ID: {}", category.id.full());
        }

        CategoryCommands::Group { name } => {
            let group = service.create_group(&cli.budget, &name)?;
            println!("Created category group: {}", group.name);
            println!("  ID: {}", group.id.full());
        }
    }

    Ok(())
}
