//! Request envelope, as submitted by an outer transport layer
//!
//! The scenario and format arrive as strings so an unknown identifier can be
//! reported as a field error instead of failing deserialization.

use crate::dispatch::{self, Calculation};
use crate::error::DlsError;
use crate::format::MatchFormat;
use crate::scenario::Scenario;
use crate::table::ResourceTable;
use crate::validate::RawInputs;
use serde::{Deserialize, Serialize};

/// A complete calculation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CalcRequest {
    pub scenario_type: String,
    pub match_format: String,
    pub inputs: RawInputs,
}

impl CalcRequest {
    /// Resolve the scenario identifier
    pub fn scenario(&self) -> Result<Scenario, DlsError> {
        Scenario::from_name(&self.scenario_type).ok_or_else(|| DlsError::UnknownScenario {
            name: self.scenario_type.clone(),
        })
    }

    /// Resolve the match format identifier
    pub fn format(&self) -> Result<MatchFormat, DlsError> {
        MatchFormat::from_name(&self.match_format).ok_or_else(|| DlsError::UnknownFormat {
            name: self.match_format.clone(),
        })
    }

    /// Run the calculation with the built-in table for the request's format
    pub fn calculate(&self) -> Result<Calculation, DlsError> {
        dispatch::calculate(self.scenario()?, self.format()?, &self.inputs)
    }

    /// Run the calculation against an explicitly provided table
    pub fn calculate_with_table(&self, table: &ResourceTable) -> Result<Calculation, DlsError> {
        dispatch::calculate_with_table(self.scenario()?, table, &self.inputs)
    }
}
