//! Error taxonomy for the calculation pipeline
//!
//! Every variant is terminal for the request; nothing here is retried.

use crate::formula::ComputeError;
use crate::table::TableError;
use crate::validate::FieldErrors;
use thiserror::Error;

/// Wire field names errors are attached to when the scenario or format
/// identifier itself is unknown
pub const SCENARIO_FIELD: &str = "scenario_type";
pub const MATCH_FORMAT_FIELD: &str = "match_format";

#[derive(Debug, Error)]
pub enum DlsError {
    /// Scenario identifier not in the dispatch table
    #[error("unknown scenario: {name}")]
    UnknownScenario { name: String },

    /// Match format identifier not recognized
    #[error("unknown match format: {name}")]
    UnknownFormat { name: String },

    /// Input map failed the required-field, numeric, or cross-field pass
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Formula could not produce a meaningful score
    #[error(transparent)]
    Compute(#[from] ComputeError),

    /// Resource table could not be constructed
    #[error(transparent)]
    Table(#[from] TableError),
}

impl DlsError {
    /// Express the error as per-field messages where that makes sense
    ///
    /// Unknown identifiers attach to the envelope field carrying them, so a
    /// caller can report every category of input problem the same way.
    /// Computation and table errors are not field errors and return `None`.
    pub fn field_errors(&self) -> Option<FieldErrors> {
        match self {
            DlsError::UnknownScenario { name } => Some(FieldErrors::single(
                SCENARIO_FIELD,
                format!("Unknown scenario: {}", name),
            )),
            DlsError::UnknownFormat { name } => Some(FieldErrors::single(
                MATCH_FORMAT_FIELD,
                format!("Unknown match format: {}", name),
            )),
            DlsError::Validation(errors) => Some(errors.clone()),
            DlsError::Compute(_) | DlsError::Table(_) => None,
        }
    }
}

impl From<FieldErrors> for DlsError {
    fn from(errors: FieldErrors) -> Self {
        DlsError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_scenario_attaches_to_scenario_field() {
        let error = DlsError::UnknownScenario {
            name: "InvalidScenario".to_string(),
        };
        let fields = error.field_errors().unwrap();
        assert!(fields.contains(SCENARIO_FIELD));
        assert_eq!(
            fields.messages(SCENARIO_FIELD),
            ["Unknown scenario: InvalidScenario"]
        );
    }

    #[test]
    fn test_compute_errors_are_not_field_errors() {
        let error = DlsError::Compute(ComputeError::DegenerateDenominator);
        assert!(error.field_errors().is_none());
    }
}
