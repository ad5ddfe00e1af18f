use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_expense_command, handle_export_command, handle_history_command, handle_report_command,
    ExpenseCommands, ExportArgs, ReportCommands, Shell,
};
use expense_tracker::config::{ExpensePaths, Settings};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    author = "Kaylee Beyene",
    version,
    about = "Terminal-based personal expense tracker",
    long_about = "Records expenses (amount, category, date) in a plain text file \
                  and reports totals, monthly summaries and category breakdowns. \
                  Run without a subcommand for the interactive menu."
)]
struct Cli {
    /// Expense store file (defaults to expenses.txt in the data directory)
    #[arg(long, global = true, env = "EXPENSE_TRACKER_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Export all expenses
    Export(ExportArgs),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        count: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings to the settings file
        #[arg(long)]
        save: bool,
    },

    /// Launch the interactive menu
    #[command(alias = "menu")]
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let mut paths = ExpensePaths::new()?;
    if let Some(file) = cli.file {
        paths = paths.with_store_file(file);
    }
    let settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone(), &settings)?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&storage, args)?;
        }
        Some(Commands::History { count }) => {
            handle_history_command(&storage, count)?;
        }
        Some(Commands::Config { save }) => {
            if save {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }

            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Expense store:  {}", paths.expenses_file().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Audit enabled:   {}", settings.audit_enabled);
        }
        Some(Commands::Shell) | None => {
            let stdin = io::stdin();
            Shell::new(&mut storage, &settings, stdin.lock(), io::stdout()).run()?;
        }
    }

    Ok(())
}
