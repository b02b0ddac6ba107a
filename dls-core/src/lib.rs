//! DLS core library - Duckworth-Lewis-Stern par score calculation for limited-overs cricket

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Calculation is pure: no I/O after table construction, no global state
// - No randomness, clocks, threads, or async
// - Resource tables are immutable once constructed
// - Validation reports every failing field, not just the first
// - Identical input yields byte-for-byte identical output

pub mod dispatch;
pub mod error;
pub mod format;
pub mod formula;
pub mod overs;
pub mod report;
pub mod request;
pub mod scenario;
pub mod table;
pub mod validate;

pub use dispatch::{calculate, calculate_with_table, resource_table_view, Calculation};
pub use error::DlsError;
pub use format::MatchFormat;
pub use report::{render_json, render_table_text, render_text, CalculationReport};
pub use request::CalcRequest;
pub use scenario::Scenario;
pub use table::{ResourceTable, ResourceTableView, TableError};
pub use validate::{FieldErrors, RawInputs};
