//! Per-table record validation.
//!
//! Pure logic with no persistence access. Every violation is collected; the
//! caller decides whether a non-empty report blocks the save.

pub mod dates;
pub mod evaluator;
pub mod rules;

pub use evaluator::{validate_record, validate_record_for_year};
pub use rules::{FieldViolation, ValidationReport};
