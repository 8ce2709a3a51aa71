//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use chrono::Local;
use clap::Subcommand;

use super::{parse_amount, parse_date, CliContext};
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AccountId, CategoryId, PayeeId, TransactionDetails, TransactionId, TransactionParams};
use crate::services::{AccountService, CategoryService, PayeeService, TransactionService};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Account name or ID
        account: String,
        /// Amount (e.g., "-50.00" for outflow, "100.00" for inflow)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Payee name or ID; unknown names are created
        #[arg(short, long)]
        payee: Option<String>,
        /// Category name or ID
        #[arg(short, long)]
        category: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New account name or ID
        #[arg(short = 'A', long)]
        account: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New payee name or ID
        #[arg(short, long)]
        payee: Option<String>,
        /// New category name or ID
        #[arg(short, long, conflicts_with = "uncategorize")]
        category: Option<String>,
        /// Remove the category
        #[arg(long)]
        uncategorize: bool,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete transactions
    Delete {
        /// Transaction IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// List transactions, newest first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(cli: &CliContext, cmd: TransactionCommands) -> LedgerResult<()> {
    let service = TransactionService::new(cli.db);

    match cmd {
        TransactionCommands::Add {
            account,
            amount,
            payee,
            category,
            date,
            notes,
        } => {
            let params = TransactionParams {
                account_id: Some(resolve_account(cli, &account)?),
                category_id: category.map(|c| resolve_category(cli, &c)).transpose()?,
                payee_id: payee.map(|p| resolve_payee(cli, &p)).transpose()?,
                amount: parse_amount(&amount)?,
                date: Some(match date {
                    Some(d) => parse_date(&d)?,
                    None => Local::now().date_naive(),
                }),
                notes,
            };

            let txn = service.create(&cli.budget, params)?;
            let details = service.get(&cli.budget, txn.id)?;
            println!("Created transaction:");
            print!("{}", format_transaction_details(&details, cli.currency(), cli.date_format()));
        }

        TransactionCommands::Edit {
            id,
            account,
            amount,
            payee,
            category,
            uncategorize,
            date,
            notes,
        } => {
            let existing = find_transaction(cli, &id)?;
            let txn = existing.transaction;

            let mut params = TransactionParams {
                account_id: Some(txn.account_id),
                category_id: txn.category_id,
                payee_id: txn.payee_id,
                amount: txn.amount.clone(),
                date: Some(txn.date),
                notes: txn.notes.clone(),
            };
            if let Some(account) = account {
                params.account_id = Some(resolve_account(cli, &account)?);
            }
            if let Some(amount) = amount {
                params.amount = parse_amount(&amount)?;
            }
            if let Some(payee) = payee {
                params.payee_id = Some(resolve_payee(cli, &payee)?);
            }
            if let Some(category) = category {
                params.category_id = Some(resolve_category(cli, &category)?);
            }
            if uncategorize {
                params.category_id = None;
            }
            if let Some(date) = date {
                params.date = Some(parse_date(&date)?);
            }
            if notes.is_some() {
                params.notes = notes;
            }

            let updated = service.update(&cli.budget, txn.id, params)?;
            let details = service.get(&cli.budget, updated.id)?;
            println!("Updated transaction:");
            print!("{}", format_transaction_details(&details, cli.currency(), cli.date_format()));
        }

        TransactionCommands::Delete { ids } => {
            let ids = ids
                .iter()
                .map(|id| {
                    id.parse::<TransactionId>()
                        .map_err(|_| LedgerError::transaction_not_found(id))
                })
                .collect::<LedgerResult<Vec<_>>>()?;

            let deleted = service.delete(&cli.budget, &ids)?;
            println!("Deleted {} transaction(s)", deleted);
        }

        TransactionCommands::List { limit } => {
            let mut transactions = service.get_all(&cli.budget)?;
            transactions.truncate(limit);
            print!(
                "{}",
                format_transaction_register(&transactions, cli.currency(), cli.date_format())
            );
        }

        TransactionCommands::Show { id } => {
            let details = find_transaction(cli, &id)?;
            print!("{}", format_transaction_details(&details, cli.currency(), cli.date_format()));
        }
    }

    Ok(())
}

fn find_transaction(cli: &CliContext, id: &str) -> LedgerResult<TransactionDetails> {
    TransactionService::new(cli.db)
        .find(&cli.budget, id)?
        .ok_or_else(|| LedgerError::transaction_not_found(id))
}

fn resolve_account(cli: &CliContext, identifier: &str) -> LedgerResult<AccountId> {
    AccountService::new(cli.db)
        .find(&cli.budget, identifier)?
        .map(|a| a.id)
        .ok_or_else(|| LedgerError::account_not_found(identifier))
}

fn resolve_category(cli: &CliContext, identifier: &str) -> LedgerResult<CategoryId> {
    CategoryService::new(cli.db)
        .find_category(&cli.budget, identifier)?
        .map(|c| c.id)
        .ok_or_else(|| LedgerError::category_not_found(identifier))
}

/// Find a payee by name or ID, creating it when the name is new
fn resolve_payee(cli: &CliContext, identifier: &str) -> LedgerResult<PayeeId> {
    let service = PayeeService::new(cli.db);
    match service.find(&cli.budget, identifier)? {
        Some(payee) => Ok(payee.id),
        None => Ok(service.create(&cli.budget, identifier)?.id),
    }
}
