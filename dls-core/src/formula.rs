//! Scenario par-score formulas
//!
//! Global invariants enforced:
//! - Formulas are pure: no I/O, no state, deterministic
//! - A zero team-1 resource denominator is a typed error, never NaN/infinity
//! - Zero balls faced projects a run rate of 0 rather than dividing by zero

use crate::overs::overs_to_balls;
use crate::scenario::{
    FirstInningsCurtailedInputs, FirstInningsInterruptedInputs, ScenarioInputs,
    SecondInningsCurtailedInputs, SecondInningsDelayedInputs, SecondInningsInterruptedInputs,
};
use crate::table::ResourceTable;
use thiserror::Error;

/// Computation failures distinct from input validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ComputeError {
    #[error("team 1 resource percentage is zero, the par score ratio is undefined")]
    DegenerateDenominator,
}

/// Compute the par score for any scenario
pub fn par_score(inputs: &ScenarioInputs, table: &ResourceTable) -> Result<f64, ComputeError> {
    match inputs {
        ScenarioInputs::FirstInningsCurtailed(record) => first_innings_curtailed(record, table),
        ScenarioInputs::FirstInningsInterrupted(record) => {
            first_innings_interrupted(record, table)
        }
        ScenarioInputs::SecondInningsCurtailed(record) => second_innings_curtailed(record, table),
        ScenarioInputs::SecondInningsDelayed(record) => second_innings_delayed(record, table),
        ScenarioInputs::SecondInningsInterrupted(record) => {
            second_innings_interrupted(record, table)
        }
    }
}

/// Run-rate projection of a full innings ("G50 score")
fn g50_projection(runs: f64, balls_used: u32, balls_allotted: u32) -> f64 {
    let run_rate = if balls_used > 0 {
        runs / balls_used as f64
    } else {
        0.0
    };
    run_rate * balls_allotted as f64
}

/// Team 1 stopped early, no resumption: project what they would have scored
/// and scale the difference between the two sides' resources.
pub fn first_innings_curtailed(
    inputs: &FirstInningsCurtailedInputs,
    table: &ResourceTable,
) -> Result<f64, ComputeError> {
    let balls_allotted_team1 = overs_to_balls(inputs.overs_allotted_team1);
    let balls_used_team1 = overs_to_balls(inputs.overs_used_team1);
    let balls_allotted_team2 = overs_to_balls(inputs.overs_allotted_team2);
    let balls_remaining_team1 = balls_allotted_team1.saturating_sub(balls_used_team1);

    let g50 = g50_projection(inputs.runs_team1, balls_used_team1, balls_allotted_team1);

    let resource_used_team1 = table.percent_remaining(balls_allotted_team1, 0)
        - table.percent_remaining(balls_remaining_team1, inputs.wickets_lost_team1);
    let resource_team2 = table.percent_remaining(balls_allotted_team2, 0);

    Ok(inputs.runs_team1 + g50 * (resource_team2 - resource_used_team1) / 100.0)
}

/// Team 1 interrupted and resumed with reduced overs: subtract the resource
/// lost to the stoppage from their full allotment before comparing sides.
pub fn first_innings_interrupted(
    inputs: &FirstInningsInterruptedInputs,
    table: &ResourceTable,
) -> Result<f64, ComputeError> {
    let balls_allotted_team1 = overs_to_balls(inputs.overs_allotted_team1);
    let balls_used_team1 = overs_to_balls(inputs.overs_used_at_interruption);
    let balls_revised_team1 = overs_to_balls(inputs.revised_overs_team1);
    let balls_allotted_team2 = overs_to_balls(inputs.overs_allotted_team2);

    let remaining_at_interruption = balls_allotted_team1.saturating_sub(balls_used_team1);
    let remaining_after_resumption = balls_revised_team1.saturating_sub(balls_used_team1);

    let g50 = g50_projection(
        inputs.final_runs_team1,
        balls_used_team1,
        balls_allotted_team1,
    );

    let resource_lost = table
        .percent_remaining(remaining_at_interruption, inputs.wickets_lost_at_interruption)
        - table.percent_remaining(
            remaining_after_resumption,
            inputs.wickets_lost_at_interruption,
        );
    let total_resource_team1 = table.percent_remaining(balls_allotted_team1, 0) - resource_lost;
    let resource_team2 = table.percent_remaining(balls_allotted_team2, 0);

    Ok(inputs.final_runs_team1 + g50 * (resource_team2 - total_resource_team1) / 100.0)
}

/// Team 2's chase stopped early, no resumption: scale team 1's total by the
/// share of resource team 2 actually consumed.
pub fn second_innings_curtailed(
    inputs: &SecondInningsCurtailedInputs,
    table: &ResourceTable,
) -> Result<f64, ComputeError> {
    let balls_allotted_team1 = overs_to_balls(inputs.overs_allotted_team1);
    let balls_allotted_team2 = overs_to_balls(inputs.overs_allotted_team2);
    let balls_used_team2 = overs_to_balls(inputs.overs_used_team2);
    let balls_remaining_team2 = balls_allotted_team2.saturating_sub(balls_used_team2);

    let resource_team1 = team1_resource(table, balls_allotted_team1)?;
    let resource_used_team2 = table.percent_remaining(balls_allotted_team2, 0)
        - table.percent_remaining(balls_remaining_team2, inputs.wickets_lost_team2);

    Ok(inputs.runs_team1 * resource_used_team2 / resource_team1)
}

/// Team 2 started late with fewer overs: a straight ratio of the two sides'
/// starting resources.
pub fn second_innings_delayed(
    inputs: &SecondInningsDelayedInputs,
    table: &ResourceTable,
) -> Result<f64, ComputeError> {
    let balls_allotted_team1 = overs_to_balls(inputs.overs_allotted_team1);
    let balls_allotted_team2 = overs_to_balls(inputs.overs_allotted_team2);

    let resource_team1 = team1_resource(table, balls_allotted_team1)?;
    let resource_team2 = table.percent_remaining(balls_allotted_team2, 0);

    Ok(inputs.runs_team1 * resource_team2 / resource_team1)
}

/// Team 2 interrupted mid-chase and resumed with reduced overs: subtract the
/// resource lost to the stoppage, then scale team 1's total.
pub fn second_innings_interrupted(
    inputs: &SecondInningsInterruptedInputs,
    table: &ResourceTable,
) -> Result<f64, ComputeError> {
    let balls_allotted_team1 = overs_to_balls(inputs.overs_allotted_team1);
    let balls_allotted_team2 = overs_to_balls(inputs.overs_allotted_team2);
    let balls_used_team2 = overs_to_balls(inputs.overs_used_at_interruption);
    let balls_revised_team2 = overs_to_balls(inputs.revised_overs_team2);

    let remaining_at_interruption = balls_allotted_team2.saturating_sub(balls_used_team2);
    let remaining_after_resumption = balls_revised_team2.saturating_sub(balls_used_team2);

    let resource_team1 = team1_resource(table, balls_allotted_team1)?;
    let resource_lost = table
        .percent_remaining(remaining_at_interruption, inputs.wickets_lost_team2)
        - table.percent_remaining(remaining_after_resumption, inputs.wickets_lost_team2);
    let total_resource_team2 = table.percent_remaining(balls_allotted_team2, 0) - resource_lost;

    Ok(inputs.runs_team1 * total_resource_team2 / resource_team1)
}

/// Team 1's starting resource, rejecting the degenerate 0-ball allotment
fn team1_resource(table: &ResourceTable, balls_allotted: u32) -> Result<f64, ComputeError> {
    let resource = table.percent_remaining(balls_allotted, 0);
    if resource <= 0.0 {
        return Err(ComputeError::DegenerateDenominator);
    }
    Ok(resource)
}
