//! Scenario dispatch: the single entry point callers use
//!
//! Resolves the rule set for a scenario, runs both validation passes,
//! assembles the typed inputs, and invokes the matching formula. Stateless:
//! each call owns its table (or borrows an injected immutable one), so
//! concurrent calls need no coordination.

use crate::error::DlsError;
use crate::format::MatchFormat;
use crate::formula;
use crate::scenario::{Scenario, ScenarioInputs};
use crate::table::{ResourceTable, ResourceTableView, TableError};
use crate::validate::{self, RawInputs};
use serde::{Deserialize, Serialize};

/// Rounded calculation outcome
///
/// `revised_target` is the score that wins outright (par + 1). It is omitted
/// for a curtailed second innings, where the match is already over and the
/// par alone decides the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Calculation {
    pub par_score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_target: Option<i64>,
}

/// Calculate a par score using the built-in table for a format
pub fn calculate(
    scenario: Scenario,
    match_format: MatchFormat,
    inputs: &RawInputs,
) -> Result<Calculation, DlsError> {
    let table = ResourceTable::builtin(match_format)?;
    calculate_with_table(scenario, &table, inputs)
}

/// Calculate a par score against an explicitly provided table
pub fn calculate_with_table(
    scenario: Scenario,
    table: &ResourceTable,
    inputs: &RawInputs,
) -> Result<Calculation, DlsError> {
    let values = validate::coerce_required(scenario, inputs)?;
    validate::check_cross_field(scenario, &values)?;

    let typed = ScenarioInputs::from_values(scenario, &values)?;
    let par = formula::par_score(&typed, table)?;

    // Round half away from zero
    let par_score = par.round() as i64;
    let revised_target = match scenario {
        Scenario::SecondInningsCurtailed => None,
        _ => Some(par_score + 1),
    };

    Ok(Calculation {
        par_score,
        revised_target,
    })
}

/// Read-only view of the built-in resource table for a format
pub fn resource_table_view(match_format: MatchFormat) -> Result<ResourceTableView, TableError> {
    Ok(ResourceTable::builtin(match_format)?.view())
}
