//! Month CLI commands
//!
//! Viewing a month, setting its carryover, and assigning funds to categories.

use clap::Subcommand;

use super::{parse_amount, parse_month, CliContext};
use crate::display::format_money;
use crate::display::month::format_month_view;
use crate::error::{LedgerError, LedgerResult};
use crate::services::{CategoryService, MonthService};

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Show a month's income, budgetable funds and category balances
    Show {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
    },

    /// Set the funds held back from a month into the next
    Carryover {
        /// Month (YYYY-MM)
        month: String,
        /// Amount (e.g., "25.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Assign funds to a category for a month
    Assign {
        /// Month (YYYY-MM)
        month: String,
        /// Category name or ID
        category: String,
        /// Amount (e.g., "100" or "100.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle a month command
pub fn handle_month_command(cli: &CliContext, cmd: MonthCommands) -> LedgerResult<()> {
    let service = MonthService::new(cli.db);

    match cmd {
        MonthCommands::Show { month } => {
            let date = parse_month(month.as_deref())?;
            let view = service.get_or_create(&cli.budget, date)?;
            print!("{}", format_month_view(&view, cli.currency()));
        }

        MonthCommands::Carryover { month, amount } => {
            let date = parse_month(Some(&month))?;
            let carryover = parse_amount(&amount)?;
            let view = service.get_or_create(&cli.budget, date)?;
            let updated = service.update(&cli.budget, view.month.id, carryover)?;

            println!(
                "Carryover for {} set to {}",
                updated.date,
                format_money(&updated.carryover, cli.currency())
            );
        }

        MonthCommands::Assign {
            month,
            category,
            amount,
        } => {
            let date = parse_month(Some(&month))?;
            let amount = parse_amount(&amount)?;
            let category = CategoryService::new(cli.db)
                .find_category(&cli.budget, &category)?
                .ok_or_else(|| LedgerError::category_not_found(&category))?;

            let view = service.get_or_create(&cli.budget, date)?;
            let row = service.set_category_amount(&cli.budget, view.month.id, category.id, amount)?;

            println!(
                "Assigned {} to {} for {}",
                format_money(&row.amount, cli.currency()),
                category.name,
                view.month.date
            );
        }
    }

    Ok(())
}
