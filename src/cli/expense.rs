//! Expense CLI commands
//!
//! Implements the one-shot add, list, edit, delete and total commands.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_amount, format_expense_details, format_expense_list};
use crate::error::ExpenseResult;
use crate::models::{parse_amount, parse_date_time, ExpenseUpdate};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "12.50"; negative values are allowed)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category label
        category: String,
        /// Date (YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS"), defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all expenses with their IDs
    #[command(alias = "ls")]
    List,
    /// Edit an expense; omitted fields keep their value
    Edit {
        /// Expense ID as shown by `list`
        #[arg(allow_negative_numbers = true)]
        id: i64,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Delete an expense; later IDs shift down by one
    #[command(alias = "rm")]
    Delete {
        /// Expense ID as shown by `list`
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Show the sum of all expenses
    Total,
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let currency = settings.currency_symbol.as_str();
    let mut service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(d) => parse_date_time(&d)?,
                None => chrono::Local::now().naive_local(),
            };

            let index = service.add(amount, category, date)?;
            println!("Expense added!");
            print!("{}", format_expense_details(index, service.get(index)?, currency));
        }

        ExpenseCommands::List => {
            print!(
                "{}",
                format_expense_list(&service.list(), currency, &settings.date_format)
            );
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
        } => {
            let index = service.position(id)?;

            let mut update = ExpenseUpdate::new();
            if let Some(amount) = amount {
                update = update.amount(parse_amount(&amount)?);
            }
            if let Some(category) = category {
                update = update.category(category);
            }
            if let Some(date) = date {
                update = update.date(parse_date_time(&date)?);
            }

            if update.is_empty() {
                println!("Nothing to change. Use --amount, --category or --date.");
                return Ok(());
            }

            let edited = service.edit(index, update)?;
            println!("Expense updated!");
            print!("{}", format_expense_details(index, &edited, currency));
        }

        ExpenseCommands::Delete { id } => {
            let index = service.position(id)?;
            let removed = service.delete(index)?;
            println!(
                "Expense deleted! ({} - {})",
                format_amount(removed.amount, currency),
                removed.category
            );
        }

        ExpenseCommands::Total => {
            println!(
                "Total expenses: {}",
                format_amount(service.total_amount(), currency)
            );
        }
    }

    if let Some(e) = storage.take_audit_error() {
        eprintln!("Warning: change saved but not written to the audit log: {}", e);
    }

    Ok(())
}
