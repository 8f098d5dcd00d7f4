//! Record evaluator — pure logic, no persistence access.

use chrono::Datelike;
use serde_json::Value;

use super::dates::{parse_date, DateError};
use super::rules::ValidationReport;
use crate::prosecution::Prosecution;
use crate::tables::{
    TableMeta, TableType, FIELD_AGE, FIELD_ESTIMATED_VALUE, FIELD_NOTIFIED_COUNT,
    FIELD_PROSECUTION, FIELD_QUANTITY, FIELD_YEAR,
};
use crate::types::Record;

pub const MIN_AGE: f64 = 0.0;
pub const MAX_AGE: f64 = 150.0;
pub const MIN_YEAR: i32 = 1900;

/// Validate a UI-shape record against its table's rules, using today's year
/// as the reference for the year range.
pub fn validate_record(table: TableType, record: &Record) -> ValidationReport {
    validate_record_for_year(table, record, chrono::Utc::now().year())
}

/// Validate a UI-shape record with an explicit reference year.
pub fn validate_record_for_year(
    table: TableType,
    record: &Record,
    current_year: i32,
) -> ValidationReport {
    let meta = table.meta();
    let mut report = ValidationReport::default();

    check_required(meta, record, &mut report);
    check_dates(meta, record, &mut report);
    check_numbers(meta, record, current_year, &mut report);
    check_prosecution(record, &mut report);

    report
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn check_required(meta: &TableMeta, record: &Record, report: &mut ValidationReport) {
    for field in meta.required_fields {
        if is_blank(record.get(*field)) {
            report.push(field, format!("{} es obligatorio", meta.label(field)));
        }
    }
}

fn check_dates(meta: &TableMeta, record: &Record, report: &mut ValidationReport) {
    for field in meta.date_fields {
        let value = record.get(*field);
        if is_blank(value) {
            continue;
        }
        let label = meta.label(field);
        let parsed = match value {
            Some(Value::String(s)) => parse_date(s),
            _ => Err(DateError::Format),
        };
        match parsed {
            Ok(_) => {}
            Err(DateError::Format) => report.push(
                field,
                format!("{label} debe tener el formato AAAA-MM-DD, DD/MM/AAAA o DD-MM-AAAA"),
            ),
            Err(DateError::Calendar) => {
                report.push(field, format!("{label} no es una fecha válida"))
            }
        }
    }
}

/// Read a numeric field that may arrive as a JSON number or as form text.
///
/// `Ok(None)` when absent or blank, `Err(())` when present but not numeric.
fn numeric(record: &Record, field: &str) -> Result<Option<f64>, ()> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().map(Some).ok_or(()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<f64>().map(Some).map_err(|_| ()),
        Some(_) => Err(()),
    }
}

fn check_numbers(
    meta: &TableMeta,
    record: &Record,
    current_year: i32,
    report: &mut ValidationReport,
) {
    let max_year = current_year + 1;
    let rules: [(&str, Box<dyn Fn(f64) -> bool>, String); 5] = [
        (
            FIELD_AGE,
            Box::new(|n| (MIN_AGE..=MAX_AGE).contains(&n)),
            format!("{} debe estar entre 0 y 150 años", meta.label(FIELD_AGE)),
        ),
        (
            FIELD_YEAR,
            Box::new(move |n| (f64::from(MIN_YEAR)..=f64::from(max_year)).contains(&n)),
            format!(
                "{} debe estar entre {MIN_YEAR} y {max_year}",
                meta.label(FIELD_YEAR)
            ),
        ),
        (
            FIELD_QUANTITY,
            Box::new(|n| n > 0.0),
            format!("{} debe ser mayor que 0", meta.label(FIELD_QUANTITY)),
        ),
        (
            FIELD_ESTIMATED_VALUE,
            Box::new(|n| n >= 0.0),
            format!("{} no puede ser negativo", meta.label(FIELD_ESTIMATED_VALUE)),
        ),
        (
            FIELD_NOTIFIED_COUNT,
            Box::new(|n| n >= 0.0),
            format!("{} no puede ser negativo", meta.label(FIELD_NOTIFIED_COUNT)),
        ),
    ];

    for (field, in_range, message) in rules {
        match numeric(record, field) {
            Ok(None) => {}
            Ok(Some(n)) if in_range(n) => {}
            Ok(Some(_)) => report.push(field, message),
            Err(()) => report.push(field, format!("{} debe ser un número", meta.label(field))),
        }
    }
}

fn check_prosecution(record: &Record, report: &mut ValidationReport) {
    if let Err(err) = Prosecution::from_value(record.get(FIELD_PROSECUTION)) {
        report.push(FIELD_PROSECUTION, err.to_string());
    }
}
