//! CLI commands for reports

use clap::Subcommand;

use crate::config::Settings;
use crate::error::ExpenseResult;
use crate::reports::{CategoryReport, MonthlySummary};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Summarize one calendar month
    #[command(alias = "month")]
    Monthly {
        /// Year (e.g., 2025)
        year: i32,
        /// Month (1-12)
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },

    /// Break down all expenses by category
    #[command(alias = "report")]
    Categories,
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    match cmd {
        ReportCommands::Monthly { year, month } => {
            let summary = MonthlySummary::generate(storage, year, month)?;
            print!(
                "{}",
                summary.format_terminal(&settings.currency_symbol, &settings.date_format)
            );
        }
        ReportCommands::Categories => {
            let report = CategoryReport::generate(storage);
            print!("{}", report.format_terminal(&settings.currency_symbol));
        }
    }

    Ok(())
}
