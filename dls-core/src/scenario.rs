//! Disruption scenarios and their typed inputs
//!
//! Each scenario is a variant of a closed enum carrying its own typed input
//! record, so formula dispatch is an exhaustive match rather than a
//! string-keyed lookup that can fail at runtime.

use crate::validate::FieldErrors;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Input field names, as used on the wire and in error messages
pub mod field {
    pub const OVERS_TEAM1_START: &str = "overs_available_to_team_1_at_start";
    pub const RUNS_TEAM1: &str = "runs_scored_by_team_1";
    pub const WICKETS_TEAM1_CURTAILED: &str = "wickets_lost_by_team_1_during_curtailed";
    pub const OVERS_USED_TEAM1_CURTAILED: &str = "overs_used_by_team_1_during_curtailed";
    pub const OVERS_USED_TEAM1_INTERRUPTION: &str = "overs_used_by_team_1_during_interruption";
    pub const WICKETS_TEAM1_INTERRUPTION: &str = "wickets_lost_by_team_1_during_interruption";
    pub const REVISED_OVERS_TEAM1: &str = "revised_overs_to_team_1_after_resumption";
    pub const OVERS_TEAM2_START: &str = "overs_available_to_team_2_at_start";
    pub const OVERS_USED_TEAM2_CURTAILED: &str = "overs_used_by_team_2_during_curtailed";
    pub const WICKETS_TEAM2_CURTAILED: &str = "wickets_lost_by_team_2_during_curtailed";
    pub const OVERS_USED_TEAM2_INTERRUPTION: &str = "overs_used_by_team_2_during_interruption";
    pub const WICKETS_TEAM2_INTERRUPTION: &str = "wickets_lost_by_team_2_during_interruption";
    pub const REVISED_OVERS_TEAM2: &str = "revised_overs_to_team_2_after_resumption";
}

/// Disruption scenario identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    FirstInningsCurtailed,
    FirstInningsInterrupted,
    SecondInningsCurtailed,
    SecondInningsDelayed,
    SecondInningsInterrupted,
}

impl Scenario {
    /// All scenarios, in dispatch-table order
    pub const ALL: [Scenario; 5] = [
        Scenario::FirstInningsCurtailed,
        Scenario::FirstInningsInterrupted,
        Scenario::SecondInningsCurtailed,
        Scenario::SecondInningsDelayed,
        Scenario::SecondInningsInterrupted,
    ];

    /// Get scenario name as string (the wire name)
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::FirstInningsCurtailed => "FirstInningsCurtailed",
            Scenario::FirstInningsInterrupted => "FirstInningsInterrupted",
            Scenario::SecondInningsCurtailed => "SecondInningsCurtailed",
            Scenario::SecondInningsDelayed => "SecondInningsDelayed",
            Scenario::SecondInningsInterrupted => "SecondInningsInterrupted",
        }
    }

    /// Resolve a wire name back to a scenario
    pub fn from_name(name: &str) -> Option<Scenario> {
        Scenario::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Input fields the scenario's formula consumes, in wire order
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Scenario::FirstInningsCurtailed => &[
                field::OVERS_TEAM1_START,
                field::RUNS_TEAM1,
                field::WICKETS_TEAM1_CURTAILED,
                field::OVERS_USED_TEAM1_CURTAILED,
                field::OVERS_TEAM2_START,
            ],
            Scenario::FirstInningsInterrupted => &[
                field::OVERS_TEAM1_START,
                field::OVERS_USED_TEAM1_INTERRUPTION,
                field::WICKETS_TEAM1_INTERRUPTION,
                field::REVISED_OVERS_TEAM1,
                field::RUNS_TEAM1,
                field::OVERS_TEAM2_START,
            ],
            Scenario::SecondInningsCurtailed => &[
                field::OVERS_TEAM1_START,
                field::RUNS_TEAM1,
                field::OVERS_TEAM2_START,
                field::OVERS_USED_TEAM2_CURTAILED,
                field::WICKETS_TEAM2_CURTAILED,
            ],
            Scenario::SecondInningsDelayed => &[
                field::OVERS_TEAM1_START,
                field::RUNS_TEAM1,
                field::OVERS_TEAM2_START,
            ],
            Scenario::SecondInningsInterrupted => &[
                field::OVERS_TEAM1_START,
                field::RUNS_TEAM1,
                field::OVERS_TEAM2_START,
                field::OVERS_USED_TEAM2_INTERRUPTION,
                field::WICKETS_TEAM2_INTERRUPTION,
                field::REVISED_OVERS_TEAM2,
            ],
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Team 1's innings ended early with no resumption
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstInningsCurtailedInputs {
    pub overs_allotted_team1: f64,
    pub runs_team1: f64,
    pub wickets_lost_team1: u32,
    pub overs_used_team1: f64,
    pub overs_allotted_team2: f64,
}

/// Team 1's innings paused, then resumed with reduced overs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstInningsInterruptedInputs {
    pub overs_allotted_team1: f64,
    pub overs_used_at_interruption: f64,
    pub wickets_lost_at_interruption: u32,
    pub revised_overs_team1: f64,
    pub final_runs_team1: f64,
    pub overs_allotted_team2: f64,
}

/// Team 2's chase ended early with no resumption
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondInningsCurtailedInputs {
    pub overs_allotted_team1: f64,
    pub runs_team1: f64,
    pub overs_allotted_team2: f64,
    pub overs_used_team2: f64,
    pub wickets_lost_team2: u32,
}

/// Team 2 started late with fewer overs and no further stoppage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondInningsDelayedInputs {
    pub overs_allotted_team1: f64,
    pub runs_team1: f64,
    pub overs_allotted_team2: f64,
}

/// Team 2's chase paused, then resumed with reduced overs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondInningsInterruptedInputs {
    pub overs_allotted_team1: f64,
    pub runs_team1: f64,
    pub overs_allotted_team2: f64,
    pub overs_used_at_interruption: f64,
    pub wickets_lost_team2: u32,
    pub revised_overs_team2: f64,
}

/// Typed inputs for one scenario, built from a validated flat input map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioInputs {
    FirstInningsCurtailed(FirstInningsCurtailedInputs),
    FirstInningsInterrupted(FirstInningsInterruptedInputs),
    SecondInningsCurtailed(SecondInningsCurtailedInputs),
    SecondInningsDelayed(SecondInningsDelayedInputs),
    SecondInningsInterrupted(SecondInningsInterruptedInputs),
}

impl ScenarioInputs {
    /// Assemble the typed record for a scenario from coerced numeric values
    ///
    /// The values map normally comes out of the required-field pass, so every
    /// field is present; a missing field is still reported as a field error
    /// rather than panicking.
    pub fn from_values(
        scenario: Scenario,
        values: &BTreeMap<String, f64>,
    ) -> Result<ScenarioInputs, FieldErrors> {
        let num = |name: &str| -> Result<f64, FieldErrors> {
            values.get(name).copied().ok_or_else(|| {
                FieldErrors::single(
                    name,
                    format!("This field is required for the {} scenario.", scenario),
                )
            })
        };
        let wickets = |name: &str| -> Result<u32, FieldErrors> { Ok(num(name)?.max(0.0) as u32) };

        let inputs = match scenario {
            Scenario::FirstInningsCurtailed => {
                ScenarioInputs::FirstInningsCurtailed(FirstInningsCurtailedInputs {
                    overs_allotted_team1: num(field::OVERS_TEAM1_START)?,
                    runs_team1: num(field::RUNS_TEAM1)?,
                    wickets_lost_team1: wickets(field::WICKETS_TEAM1_CURTAILED)?,
                    overs_used_team1: num(field::OVERS_USED_TEAM1_CURTAILED)?,
                    overs_allotted_team2: num(field::OVERS_TEAM2_START)?,
                })
            }
            Scenario::FirstInningsInterrupted => {
                ScenarioInputs::FirstInningsInterrupted(FirstInningsInterruptedInputs {
                    overs_allotted_team1: num(field::OVERS_TEAM1_START)?,
                    overs_used_at_interruption: num(field::OVERS_USED_TEAM1_INTERRUPTION)?,
                    wickets_lost_at_interruption: wickets(field::WICKETS_TEAM1_INTERRUPTION)?,
                    revised_overs_team1: num(field::REVISED_OVERS_TEAM1)?,
                    final_runs_team1: num(field::RUNS_TEAM1)?,
                    overs_allotted_team2: num(field::OVERS_TEAM2_START)?,
                })
            }
            Scenario::SecondInningsCurtailed => {
                ScenarioInputs::SecondInningsCurtailed(SecondInningsCurtailedInputs {
                    overs_allotted_team1: num(field::OVERS_TEAM1_START)?,
                    runs_team1: num(field::RUNS_TEAM1)?,
                    overs_allotted_team2: num(field::OVERS_TEAM2_START)?,
                    overs_used_team2: num(field::OVERS_USED_TEAM2_CURTAILED)?,
                    wickets_lost_team2: wickets(field::WICKETS_TEAM2_CURTAILED)?,
                })
            }
            Scenario::SecondInningsDelayed => {
                ScenarioInputs::SecondInningsDelayed(SecondInningsDelayedInputs {
                    overs_allotted_team1: num(field::OVERS_TEAM1_START)?,
                    runs_team1: num(field::RUNS_TEAM1)?,
                    overs_allotted_team2: num(field::OVERS_TEAM2_START)?,
                })
            }
            Scenario::SecondInningsInterrupted => {
                ScenarioInputs::SecondInningsInterrupted(SecondInningsInterruptedInputs {
                    overs_allotted_team1: num(field::OVERS_TEAM1_START)?,
                    runs_team1: num(field::RUNS_TEAM1)?,
                    overs_allotted_team2: num(field::OVERS_TEAM2_START)?,
                    overs_used_at_interruption: num(field::OVERS_USED_TEAM2_INTERRUPTION)?,
                    wickets_lost_team2: wickets(field::WICKETS_TEAM2_INTERRUPTION)?,
                    revised_overs_team2: num(field::REVISED_OVERS_TEAM2)?,
                })
            }
        };

        Ok(inputs)
    }

    /// The scenario this record belongs to
    pub fn scenario(&self) -> Scenario {
        match self {
            ScenarioInputs::FirstInningsCurtailed(_) => Scenario::FirstInningsCurtailed,
            ScenarioInputs::FirstInningsInterrupted(_) => Scenario::FirstInningsInterrupted,
            ScenarioInputs::SecondInningsCurtailed(_) => Scenario::SecondInningsCurtailed,
            ScenarioInputs::SecondInningsDelayed(_) => Scenario::SecondInningsDelayed,
            ScenarioInputs::SecondInningsInterrupted(_) => Scenario::SecondInningsInterrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_name(scenario.as_str()), Some(scenario));
        }
        assert_eq!(Scenario::from_name("InvalidScenario"), None);
    }

    #[test]
    fn test_every_scenario_requires_team1_basics() {
        for scenario in Scenario::ALL {
            let fields = scenario.required_fields();
            assert!(fields.contains(&field::OVERS_TEAM1_START));
            assert!(fields.contains(&field::RUNS_TEAM1));
            assert!(fields.contains(&field::OVERS_TEAM2_START));
        }
    }

    #[test]
    fn test_from_values_builds_typed_record() {
        let mut values = BTreeMap::new();
        values.insert(field::OVERS_TEAM1_START.to_string(), 20.0);
        values.insert(field::RUNS_TEAM1.to_string(), 150.0);
        values.insert(field::OVERS_TEAM2_START.to_string(), 18.0);

        let inputs = ScenarioInputs::from_values(Scenario::SecondInningsDelayed, &values).unwrap();
        match inputs {
            ScenarioInputs::SecondInningsDelayed(record) => {
                assert_eq!(record.overs_allotted_team1, 20.0);
                assert_eq!(record.runs_team1, 150.0);
                assert_eq!(record.overs_allotted_team2, 18.0);
            }
            other => panic!("unexpected record: {:?}", other),
        }
        assert_eq!(inputs.scenario(), Scenario::SecondInningsDelayed);
    }

    #[test]
    fn test_from_values_reports_missing_field() {
        let values = BTreeMap::new();
        let error =
            ScenarioInputs::from_values(Scenario::SecondInningsDelayed, &values).unwrap_err();
        assert!(error.contains(field::OVERS_TEAM1_START));
    }
}
