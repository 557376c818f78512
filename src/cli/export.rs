//! CLI commands for data export and import

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{csv, json, pending, yaml};
use crate::export::import_ledger_file;

use super::session::Session;
use super::{default_month, parse_month};

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Write the unpaid items of a month to pending_<YYYY-MM>.txt
    Pending {
        /// Month (YYYY-MM, default current)
        month: Option<String>,
        /// Output directory (default: the exports directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the full ledger year to JSON
    Json {
        /// Output file path
        output: PathBuf,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Export the full ledger year to YAML
    Yaml {
        /// Output file path
        output: PathBuf,
    },
    /// Export a month view to CSV
    Csv {
        /// Output file path
        output: PathBuf,
        /// Month (YYYY-MM, default current)
        #[arg(short, long)]
        month: Option<String>,
    },
}

fn create_output(output: &Path) -> BudgetResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        BudgetError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn finish(mut writer: BufWriter<File>) -> BudgetResult<()> {
    writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))
}

/// Handle export commands
pub fn handle_export_command(
    session: &mut Session,
    settings: &Settings,
    cmd: ExportCommands,
) -> BudgetResult<()> {
    let year = session.year();
    let export_dir = session.store().paths().export_dir();
    let ledger = session.ledger()?;

    match cmd {
        ExportCommands::Pending { month, output } => {
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => default_month(year),
            };
            let dir = output.unwrap_or(export_dir);
            let path = pending::export_pending(ledger, month, &dir, &settings.currency_symbol)?;
            println!("Pending list written to: {}", path.display());
        }

        ExportCommands::Json { output, pretty } => {
            let mut writer = create_output(&output)?;
            json::export_ledger_json(ledger, &mut writer, pretty)?;
            finish(writer)?;
            println!("Ledger {} exported to: {}", year, output.display());
        }

        ExportCommands::Yaml { output } => {
            let mut writer = create_output(&output)?;
            yaml::export_ledger_yaml(ledger, &mut writer)?;
            finish(writer)?;
            println!("Ledger {} exported to: {}", year, output.display());
        }

        ExportCommands::Csv { output, month } => {
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => default_month(year),
            };
            let mut writer = create_output(&output)?;
            csv::export_month_csv(ledger, month, &mut writer)?;
            finish(writer)?;
            println!("Month {} exported to: {}", month, output.display());
        }
    }

    Ok(())
}

/// Replace the session's ledger with the one in a JSON or YAML export
pub fn handle_import(session: &mut Session, file: &Path) -> BudgetResult<()> {
    let export = import_ledger_file(file)?;

    if export.ledger.year() != session.year() {
        return Err(BudgetError::Import(format!(
            "{} holds year {}, not {}; use --year {}",
            file.display(),
            export.ledger.year(),
            session.year(),
            export.ledger.year()
        )));
    }

    let ledger = export.ledger;
    let counts = (
        ledger.accounts().count(),
        ledger.fixed_expenses().len(),
        ledger.subscriptions().len(),
        ledger.expenses().len(),
        ledger.payments().len(),
    );
    session.replace(ledger)?;

    println!("Imported ledger {} from: {}", session.year(), file.display());
    println!("  Accounts:       {}", counts.0);
    println!("  Fixed expenses: {}", counts.1);
    println!("  Subscriptions:  {}", counts.2);
    println!("  Expenses:       {}", counts.3);
    println!("  Payments:       {}", counts.4);
    Ok(())
}
