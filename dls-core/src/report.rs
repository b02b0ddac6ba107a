//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Identical input yields byte-for-byte identical output

use crate::dispatch::Calculation;
use crate::format::MatchFormat;
use crate::scenario::Scenario;
use crate::table::ResourceTableView;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Result envelope for a completed calculation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct CalculationReport {
    pub scenario: String,
    pub match_format: String,
    pub par_score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_target: Option<i64>,
    pub messages: Vec<String>,
}

impl CalculationReport {
    /// Build the report for a calculation outcome
    pub fn new(scenario: Scenario, match_format: MatchFormat, result: &Calculation) -> Self {
        let mut messages = vec![format!(
            "Par score after the {} adjustment is {}.",
            scenario, result.par_score
        )];
        match result.revised_target {
            Some(target) => {
                messages.push(format!("Team 2 win with a score of {} or more.", target));
            }
            None => {
                messages.push(
                    "The innings is over: Team 2 win if they beat the par score.".to_string(),
                );
            }
        }

        CalculationReport {
            scenario: scenario.as_str().to_string(),
            match_format: match_format.as_str().to_string(),
            par_score: result.par_score,
            revised_target: result.revised_target,
            messages,
        }
    }
}

/// Render a calculation report as pretty JSON
pub fn render_json(report: &CalculationReport) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}

/// Render a calculation report as human-readable text
pub fn render_text(report: &CalculationReport) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{} ({}): par score {}",
        report.scenario, report.match_format, report.par_score
    );
    if let Some(target) = report.revised_target {
        let _ = writeln!(output, "Revised target: {}", target);
    }
    for message in &report.messages {
        let _ = writeln!(output, "  {}", message);
    }
    output
}

/// Render a resource table view as a text grid
pub fn render_table_text(view: &ResourceTableView) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Resource table ({})", view.match_format.as_str());

    let _ = write!(output, "{:>6}", "balls");
    for label in &view.wickets_lost {
        let _ = write!(output, "{:>7}", label);
    }
    let _ = writeln!(output);

    for (row, balls) in view.balls.iter().enumerate() {
        let _ = write!(output, "{:>6}", balls);
        for column in &view.columns {
            let _ = write!(output, "{:>7.1}", column[row]);
        }
        let _ = writeln!(output);
    }
    output
}
