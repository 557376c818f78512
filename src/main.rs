use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use paycontrol::cli::{
    handle_account_command, handle_expense_command, handle_export_command, handle_fixed_command,
    handle_import, handle_month, handle_overview, handle_pay, handle_subscription_command,
    handle_summary, handle_unpay, Session,
};
use paycontrol::config::{BudgetPaths, Settings};
use paycontrol::storage::{initialize_storage, needs_initialization, LedgerStore};

#[derive(Parser)]
#[command(
    name = "paycontrol",
    version,
    about = "Household annual budget ledger",
    long_about = "paycontrol keeps one ledger per calendar year: accounts, fixed \
                  expenses, subscriptions and one-off expenses, plus the record of \
                  which recurring items were paid in which month."
)]
struct Cli {
    /// Ledger year to work on (default: the year in config.json)
    #[arg(short, long, global = true)]
    year: Option<i32>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create config.json and the ledger for the year
    Init,

    /// Show current configuration and paths
    Config,

    /// Account management commands
    #[command(subcommand)]
    Account(paycontrol::cli::AccountCommands),

    /// Fixed expense commands
    #[command(subcommand)]
    Fixed(paycontrol::cli::FixedCommands),

    /// Subscription commands
    #[command(subcommand, alias = "subscription")]
    Sub(paycontrol::cli::SubscriptionCommands),

    /// One-off expense commands
    #[command(subcommand)]
    Expense(paycontrol::cli::ExpenseCommands),

    /// Record that a fixed expense or subscription was paid for a month
    Pay {
        /// Fixed expense or subscription ID
        expense_id: String,
        /// Month (YYYY-MM)
        month: String,
        /// Date the payment was made (YYYY-MM-DD)
        #[arg(long = "on")]
        paid_on: Option<String>,
    },

    /// Clear the payment of a fixed expense or subscription for a month
    Unpay {
        /// Fixed expense or subscription ID
        expense_id: String,
        /// Month (YYYY-MM)
        month: String,
    },

    /// Show everything due in a month
    Month {
        /// Month (YYYY-MM, default current)
        month: Option<String>,
    },

    /// Per-account paid, pending and balance totals
    Summary,

    /// Twelve-month overview of the year
    Overview,

    /// Export commands
    #[command(subcommand)]
    Export(paycontrol::cli::ExportCommands),

    /// Replace the year's ledger with a JSON or YAML export
    Import {
        /// Path to the export file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    paycontrol::init_tracing();

    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let year = cli.year.unwrap_or(settings.year);

    let store = LedgerStore::new(paths.clone(), settings.defaults.clone())?;
    let mut session = Session::new(store, year);

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing paycontrol at: {}", paths.data_dir().display());
            let report = initialize_storage(&paths, &settings, year)?;
            if report.settings_created {
                println!("  Created {}", paths.settings_file().display());
            }
            if report.ledger_created {
                println!("  Created {}", paths.ledger_file(year).display());
            } else {
                println!("  Ledger {} already exists", year);
            }
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("paycontrol Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Year:        {}", settings.year);
            println!("  Control day: {}", settings.control_day);
            println!("  Currency:    {}", settings.currency_symbol);
            println!("  Date format: {}", settings.date_format);
            println!();
            let years = session.store().list_years()?;
            if years.is_empty() {
                println!("No ledgers yet.");
            } else {
                let years: Vec<String> = years.iter().map(|y| y.to_string()).collect();
                println!("Ledgers: {}", years.join(", "));
            }
        }
        Some(Commands::Account(cmd)) => handle_account_command(&mut session, &settings, cmd)?,
        Some(Commands::Fixed(cmd)) => handle_fixed_command(&mut session, &settings, cmd)?,
        Some(Commands::Sub(cmd)) => handle_subscription_command(&mut session, &settings, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&mut session, &settings, cmd)?,
        Some(Commands::Pay {
            expense_id,
            month,
            paid_on,
        }) => handle_pay(&mut session, &expense_id, &month, paid_on.as_deref())?,
        Some(Commands::Unpay { expense_id, month }) => {
            handle_unpay(&mut session, &expense_id, &month)?
        }
        Some(Commands::Month { month }) => handle_month(&mut session, &settings, month.as_deref())?,
        Some(Commands::Summary) => handle_summary(&mut session, &settings)?,
        Some(Commands::Overview) => handle_overview(&mut session, &settings)?,
        Some(Commands::Export(cmd)) => handle_export_command(&mut session, &settings, cmd)?,
        Some(Commands::Import { file }) => handle_import(&mut session, &file)?,
        None => {
            println!("paycontrol - household annual budget ledger");
            println!();
            if needs_initialization(&paths) {
                println!("Run 'paycontrol init' to get started.");
            }
            println!("Run 'paycontrol --help' for usage information.");
        }
    }

    Ok(())
}
