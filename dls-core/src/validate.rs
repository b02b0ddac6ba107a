//! Scenario rule sets: required-field, numeric, and cross-field validation
//!
//! Validation runs as two independent passes. The first pass confirms every
//! required field is present and coercible to a number; only when it is clean
//! does the second pass apply the scenario's ordering rules. All failures in
//! a pass are collected and returned together, never fail-fast.

use crate::scenario::{field, Scenario};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Raw per-request input map, as handed over by the outer layer
pub type RawInputs = BTreeMap<String, Value>;

/// Field-level validation errors, keyed by input field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors(BTreeMap::new())
    }

    /// Build a one-field, one-message error set
    pub fn single(field: &str, message: String) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(field, message);
        errors
    }

    /// Attach a message to a field
    pub fn push(&mut self, field: &str, message: String) {
        self.0.entry(field.to_string()).or_default().push(message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one error
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages attached to one field
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate fields and their messages in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for (field, messages) in self.iter() {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Coerce a raw value to a finite number
///
/// JSON numbers pass through; strings are parsed. Anything else - or a
/// non-finite parse like "inf" - is rejected.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64().filter(|n| n.is_finite()),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Pass 1: required fields present and numeric
///
/// On success returns the coerced values for exactly the scenario's required
/// fields; extra fields in the input map are ignored.
pub fn coerce_required(
    scenario: Scenario,
    inputs: &RawInputs,
) -> Result<BTreeMap<String, f64>, FieldErrors> {
    let mut errors = FieldErrors::new();
    let mut values = BTreeMap::new();

    for &name in scenario.required_fields() {
        match inputs.get(name) {
            None => errors.push(
                name,
                format!("This field is required for the {} scenario.", scenario),
            ),
            Some(value) => match coerce_number(value) {
                Some(number) => {
                    values.insert(name.to_string(), number);
                }
                None => errors.push(name, "Must be a number.".to_string()),
            },
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

/// Strictness of an ordering rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Strict,
    Inclusive,
}

/// One cross-field ordering rule: `lesser` must stay below `greater`
/// (or at it, for an inclusive bound).
///
/// A violation is always reported against the `lesser` field - the one the
/// user is most likely to fix - with a message naming the other field.
#[derive(Debug, Clone, Copy)]
struct OrderingRule {
    lesser: &'static str,
    greater: &'static str,
    bound: Bound,
}

impl OrderingRule {
    const fn strict(lesser: &'static str, greater: &'static str) -> Self {
        OrderingRule {
            lesser,
            greater,
            bound: Bound::Strict,
        }
    }

    const fn inclusive(lesser: &'static str, greater: &'static str) -> Self {
        OrderingRule {
            lesser,
            greater,
            bound: Bound::Inclusive,
        }
    }

    /// Check the rule; `None` when satisfied
    fn check(&self, values: &BTreeMap<String, f64>) -> Option<(&'static str, String)> {
        let lesser = values.get(self.lesser)?;
        let greater = values.get(self.greater)?;
        let violated = match self.bound {
            Bound::Strict => lesser >= greater,
            Bound::Inclusive => lesser > greater,
        };
        if !violated {
            return None;
        }
        let message = match self.bound {
            Bound::Strict => format!("Must be lesser than {}", self.greater),
            Bound::Inclusive => format!("Must be lesser than or equal to {}", self.greater),
        };
        Some((self.lesser, message))
    }
}

/// Ordering rules per scenario, reflecting the physical match constraints
fn rules_for(scenario: Scenario) -> &'static [OrderingRule] {
    const FIRST_INNINGS_CURTAILED: &[OrderingRule] = &[
        OrderingRule::strict(field::OVERS_USED_TEAM1_CURTAILED, field::OVERS_TEAM1_START),
        OrderingRule::inclusive(field::OVERS_TEAM2_START, field::OVERS_TEAM1_START),
    ];
    const FIRST_INNINGS_INTERRUPTED: &[OrderingRule] = &[
        OrderingRule::strict(
            field::OVERS_USED_TEAM1_INTERRUPTION,
            field::OVERS_TEAM1_START,
        ),
        OrderingRule::strict(field::REVISED_OVERS_TEAM1, field::OVERS_TEAM1_START),
        OrderingRule::strict(
            field::OVERS_USED_TEAM1_INTERRUPTION,
            field::REVISED_OVERS_TEAM1,
        ),
        OrderingRule::inclusive(field::OVERS_TEAM2_START, field::REVISED_OVERS_TEAM1),
    ];
    const SECOND_INNINGS_CURTAILED: &[OrderingRule] = &[
        OrderingRule::strict(field::OVERS_USED_TEAM2_CURTAILED, field::OVERS_TEAM2_START),
        OrderingRule::inclusive(field::OVERS_TEAM2_START, field::OVERS_TEAM1_START),
    ];
    const SECOND_INNINGS_DELAYED: &[OrderingRule] = &[OrderingRule::inclusive(
        field::OVERS_TEAM2_START,
        field::OVERS_TEAM1_START,
    )];
    const SECOND_INNINGS_INTERRUPTED: &[OrderingRule] = &[
        OrderingRule::strict(
            field::OVERS_USED_TEAM2_INTERRUPTION,
            field::OVERS_TEAM2_START,
        ),
        OrderingRule::strict(field::REVISED_OVERS_TEAM2, field::OVERS_TEAM2_START),
        OrderingRule::strict(
            field::OVERS_USED_TEAM2_INTERRUPTION,
            field::REVISED_OVERS_TEAM2,
        ),
        OrderingRule::inclusive(field::OVERS_TEAM2_START, field::OVERS_TEAM1_START),
    ];

    match scenario {
        Scenario::FirstInningsCurtailed => FIRST_INNINGS_CURTAILED,
        Scenario::FirstInningsInterrupted => FIRST_INNINGS_INTERRUPTED,
        Scenario::SecondInningsCurtailed => SECOND_INNINGS_CURTAILED,
        Scenario::SecondInningsDelayed => SECOND_INNINGS_DELAYED,
        Scenario::SecondInningsInterrupted => SECOND_INNINGS_INTERRUPTED,
    }
}

/// Pass 2: scenario ordering rules over coerced values
///
/// Runs only after [`coerce_required`] succeeded. All violated rules are
/// reported together.
pub fn check_cross_field(
    scenario: Scenario,
    values: &BTreeMap<String, f64>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for rule in rules_for(scenario) {
        if let Some((field, message)) = rule.check(values) {
            errors.push(field, message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
