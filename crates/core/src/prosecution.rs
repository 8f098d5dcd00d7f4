//! The prosecution ("procuraduría") flag.
//!
//! Persisted as the literal strings `"SI"` / `"NO"`; the backend column
//! expects exactly those. In memory the flag is a tri-state so "not
//! recorded" is never confused with "no".

use std::fmt;

use serde_json::Value;

use crate::tables::FIELD_PROSECUTION;
use crate::types::Record;

pub const PROSECUTION_YES: &str = "SI";
pub const PROSECUTION_NO: &str = "NO";

/// Whether a case was referred to the prosecutor's office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prosecution {
    Yes,
    No,
    Unknown,
}

/// A prosecution value that is neither `SI`, `NO` nor empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Procuraduría debe ser SI o NO (valor recibido: '{0}')")]
pub struct InvalidProsecution(pub String);

impl Prosecution {
    /// Parse from a stored or submitted value.
    ///
    /// Case-insensitive, surrounding whitespace ignored. Missing, null and
    /// blank values are [`Prosecution::Unknown`].
    pub fn from_value(value: Option<&Value>) -> Result<Self, InvalidProsecution> {
        match value {
            None | Some(Value::Null) => Ok(Prosecution::Unknown),
            Some(Value::String(s)) => Self::parse(s),
            Some(Value::Bool(true)) => Ok(Prosecution::Yes),
            Some(Value::Bool(false)) => Ok(Prosecution::No),
            Some(other) => Err(InvalidProsecution(other.to_string())),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, InvalidProsecution> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Ok(Prosecution::Unknown)
        } else if trimmed.eq_ignore_ascii_case(PROSECUTION_YES) {
            Ok(Prosecution::Yes)
        } else if trimmed.eq_ignore_ascii_case(PROSECUTION_NO) {
            Ok(Prosecution::No)
        } else {
            Err(InvalidProsecution(raw.to_string()))
        }
    }

    /// The persisted string, or `None` when unknown (the key is omitted).
    pub fn as_stored(self) -> Option<&'static str> {
        match self {
            Prosecution::Yes => Some(PROSECUTION_YES),
            Prosecution::No => Some(PROSECUTION_NO),
            Prosecution::Unknown => None,
        }
    }
}

/// Rewrite the flag in a UI-shape record to its persisted form.
///
/// `"si"` becomes `"SI"`. A blank flag becomes null, which a create skips
/// and an update writes as a cleared column. An absent flag stays absent.
pub fn normalize_prosecution(record: &mut Record) -> Result<Prosecution, InvalidProsecution> {
    let flag = Prosecution::from_value(record.get(FIELD_PROSECUTION))?;
    match flag.as_stored() {
        Some(stored) => {
            record.insert(FIELD_PROSECUTION.to_string(), Value::String(stored.to_string()));
        }
        None if record.contains_key(FIELD_PROSECUTION) => {
            record.insert(FIELD_PROSECUTION.to_string(), Value::Null);
        }
        None => {}
    }
    Ok(flag)
}

impl fmt::Display for Prosecution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_stored().unwrap_or("-"))
    }
}
