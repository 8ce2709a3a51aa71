use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;

use beans::auth::{InMemorySessionStore, SessionStore};
use beans::cli::{
    handle_account_command, handle_budget_command, handle_category_command, handle_init_command,
    handle_month_command, handle_payee_command, handle_transaction_command, CliContext,
};
use beans::config::{LedgerPaths, Settings};
use beans::logging::init_tracing;
use beans::storage::Database;
use beans::{ErrorCode, LedgerError, LedgerResult};

#[derive(Parser)]
#[command(
    name = "beans",
    version,
    about = "Zero-based budgeting ledger",
    long_about = "beans is a zero-based budgeting ledger. Assign every dollar to a \
                  category month by month, record transactions against accounts, \
                  and see exactly what is available in each category."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the local user and a first budget
    Init {
        /// Login name
        #[arg(short, long)]
        username: String,
        /// Password; prompted for when omitted
        #[arg(short, long, env = "BEANS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Name of the first budget
        #[arg(short, long, default_value = "My Budget")]
        budget: String,
    },

    /// Budget management commands
    #[command(subcommand)]
    Budget(beans::cli::BudgetCommands),

    /// Account management commands
    #[command(subcommand)]
    Account(beans::cli::AccountCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(beans::cli::CategoryCommands),

    /// Payee management commands
    #[command(subcommand)]
    Payee(beans::cli::PayeeCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(beans::cli::TransactionCommands),

    /// Month views, carryover and assignments
    #[command(subcommand)]
    Month(beans::cli::MonthCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new().context("Failed to resolve the data directory")?;
    let mut settings = Settings::load_or_create(&paths).context("Failed to load settings")?;
    init_tracing(&settings.log_filter);

    let db = Database::open(paths.ledger_file()).context("Failed to open the ledger")?;
    let sessions = InMemorySessionStore::new();

    run(cli, &db, &sessions, &paths, &mut settings).map_err(user_facing)
}

fn run(
    cli: Cli,
    db: &Database,
    sessions: &dyn SessionStore,
    paths: &LedgerPaths,
    settings: &mut Settings,
) -> LedgerResult<()> {
    match cli.command {
        Some(Commands::Init {
            username,
            password,
            budget,
        }) => handle_init_command(db, sessions, paths, settings, &username, password, &budget),
        Some(Commands::Budget(cmd)) => handle_budget_command(db, sessions, paths, settings, cmd),
        Some(Commands::Account(cmd)) => {
            handle_account_command(&CliContext::open(db, sessions, settings)?, cmd)
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&CliContext::open(db, sessions, settings)?, cmd)
        }
        Some(Commands::Payee(cmd)) => {
            handle_payee_command(&CliContext::open(db, sessions, settings)?, cmd)
        }
        Some(Commands::Txn(cmd)) => {
            handle_transaction_command(&CliContext::open(db, sessions, settings)?, cmd)
        }
        Some(Commands::Month(cmd)) => {
            handle_month_command(&CliContext::open(db, sessions, settings)?, cmd)
        }
        Some(Commands::Config) => {
            println!("beans configuration");
            println!("===================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Ledger file:    {}", paths.ledger_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Log filter:      {}", settings.log_filter);
            match &settings.profile {
                Some(profile) => {
                    println!("  User ID:         {}", profile.user_id.full());
                    println!("  Budget ID:       {}", profile.budget_id.full());
                }
                None => println!("  Profile:         (not initialized)"),
            }
            Ok(())
        }
        None => {
            println!("beans - zero-based budgeting ledger");
            println!();
            println!("Run 'beans --help' for usage information.");
            println!("Run 'beans init --username <name>' to get started.");
            Ok(())
        }
    }
}

/// Turn a ledger error into what the user sees; internal detail only goes to the log
fn user_facing(err: LedgerError) -> anyhow::Error {
    match (&err, err.code()) {
        (LedgerError::Config(msg), _) => anyhow!("{}", msg),
        (_, ErrorCode::Internal) => {
            error!(error = %err, "command failed");
            anyhow!("{} ({})", err.public_message(), err.code())
        }
        (_, code) => anyhow!("{} ({})", err.public_message(), code),
    }
}
