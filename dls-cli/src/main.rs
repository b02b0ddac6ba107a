//! DLS CLI - command-line interface for par score calculation

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use dls_core::{
    render_json, render_table_text, render_text, CalcRequest, Calculation, CalculationReport,
    DlsError, MatchFormat, RawInputs, ResourceTable,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dls")]
#[command(about = "Duckworth-Lewis-Stern par score calculator for interrupted cricket matches")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the par score for a disruption scenario
    Calculate {
        /// Scenario identifier (e.g. SecondInningsDelayed)
        #[arg(long, required_unless_present = "request")]
        scenario: Option<String>,

        /// Match format (T10, T20, or ODI)
        #[arg(long, default_value = "T20")]
        match_format: String,

        /// Input field as NAME=VALUE (repeatable)
        #[arg(long = "input", value_name = "NAME=VALUE")]
        inputs: Vec<String>,

        /// Read the full request from a JSON file instead of flags
        #[arg(long, conflicts_with_all = ["scenario", "inputs", "match_format"])]
        request: Option<PathBuf>,

        /// Load the resource table from a CSV file instead of the built-in one
        #[arg(long)]
        table: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the resource table for a match format
    Table {
        /// Match format (T10, T20, or ODI)
        #[arg(long, default_value = "T20")]
        match_format: String,

        /// Load the resource table from a CSV file instead of the built-in one
        #[arg(long)]
        table: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Calculate {
            scenario,
            match_format,
            inputs,
            request,
            table,
            format,
        } => {
            let calc_request = match request {
                Some(path) => load_request(&path)?,
                None => {
                    // clap guarantees --scenario when --request is absent
                    let scenario = scenario.unwrap_or_default();
                    CalcRequest {
                        scenario_type: scenario,
                        match_format,
                        inputs: parse_inputs(&inputs)?,
                    }
                }
            };

            let result = run_calculation(&calc_request, table.as_deref())?;
            let report = CalculationReport::new(
                calc_request.scenario().map_err(into_cli_error)?,
                calc_request.format().map_err(into_cli_error)?,
                &result,
            );

            match format {
                OutputFormat::Text => print!("{}", render_text(&report)),
                OutputFormat::Json => println!("{}", render_json(&report)),
            }
        }
        Commands::Table {
            match_format,
            table,
            format,
        } => {
            let resolved = MatchFormat::from_name(&match_format)
                .ok_or_else(|| anyhow::anyhow!("unknown match format: {}", match_format))?;
            let view = match table {
                Some(path) => load_table(resolved, &path)?.view(),
                None => ResourceTable::builtin(resolved)
                    .map_err(anyhow::Error::new)?
                    .view(),
            };

            match format {
                OutputFormat::Text => print!("{}", render_table_text(&view)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&view).context("failed to serialize table")?
                ),
            }
        }
    }

    Ok(())
}

/// Run the calculation against the built-in or an explicitly loaded table
fn run_calculation(
    request: &CalcRequest,
    table_path: Option<&std::path::Path>,
) -> anyhow::Result<Calculation> {
    let result = match table_path {
        Some(path) => {
            let format = request.format().map_err(into_cli_error)?;
            let table = load_table(format, path)?;
            request.calculate_with_table(&table)
        }
        None => request.calculate(),
    };
    result.map_err(into_cli_error)
}

/// Read a full request envelope from a JSON file
fn load_request(path: &std::path::Path) -> anyhow::Result<CalcRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid request JSON: {}", path.display()))
}

/// Load a resource table from a CSV file
fn load_table(format: MatchFormat, path: &std::path::Path) -> anyhow::Result<ResourceTable> {
    ResourceTable::from_csv_path(format, path)
        .with_context(|| format!("failed to load resource table: {}", path.display()))
}

/// Parse repeated NAME=VALUE pairs into the raw input map
///
/// Values stay raw: numeric strings are coerced during validation, so the
/// CLI does not need to second-guess what the core accepts.
fn parse_inputs(pairs: &[String]) -> anyhow::Result<RawInputs> {
    let mut inputs = RawInputs::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("invalid input (expected NAME=VALUE): {}", pair))?;
        inputs.insert(
            name.trim().to_string(),
            serde_json::Value::String(value.trim().to_string()),
        );
    }
    Ok(inputs)
}

/// Turn a calculation error into a CLI failure
///
/// Field-level problems are printed one per line so the user sees every
/// failing field, then the process exits non-zero through the returned error.
fn into_cli_error(error: DlsError) -> anyhow::Error {
    match error.field_errors() {
        Some(fields) => {
            for (field, messages) in fields.iter() {
                for message in messages {
                    eprintln!("{}: {}", field, message);
                }
            }
            anyhow::anyhow!("input validation failed")
        }
        None => anyhow::Error::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_file_rejects_inline_flags() {
        // A request file carries its own scenario, format, and inputs; the
        // inline flags must conflict rather than being silently ignored
        assert!(Cli::try_parse_from(["dls", "calculate", "--request", "req.json"]).is_ok());
        assert!(Cli::try_parse_from([
            "dls",
            "calculate",
            "--request",
            "req.json",
            "--match-format",
            "T10",
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "dls",
            "calculate",
            "--request",
            "req.json",
            "--scenario",
            "SecondInningsDelayed",
        ])
        .is_err());
    }

    #[test]
    fn test_parse_inputs_splits_name_value_pairs() {
        let inputs = parse_inputs(&["runs_scored_by_team_1=150".to_string()]).unwrap();
        assert_eq!(
            inputs["runs_scored_by_team_1"],
            serde_json::Value::String("150".to_string())
        );
        assert!(parse_inputs(&["no-equals-sign".to_string()]).is_err());
    }
}
