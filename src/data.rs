//! Scalar cell values and the text coercion rules that produce them.
//!
//! A [`Scalar`] is a closed union over the four cell types a table can hold.
//! [`coerce_scalar()`] turns a raw text field into the narrowest matching
//! variant; [`ColumnTypeGuard`] pins a column to the type of its first value
//! and rejects later values of any other type.

use std::{cmp::Ordering, fmt};

use serde::Serialize;

use crate::error::{Result, TableError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarType {
    Boolean,
    Integer,
    Float,
    Text,
}

impl ScalarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Boolean => "Boolean",
            ScalarType::Integer => "Integer",
            ScalarType::Float => "Float",
            ScalarType::Text => "Text",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::Boolean(_) => ScalarType::Boolean,
            Scalar::Integer(_) => ScalarType::Integer,
            Scalar::Float(_) => ScalarType::Float,
            Scalar::Text(_) => ScalarType::Text,
        }
    }

    /// Renders the value the way the writer serialises it.
    pub fn as_display(&self) -> String {
        match self {
            Scalar::Boolean(true) => "True".to_string(),
            Scalar::Boolean(false) => "False".to_string(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Float(f) => format_float(*f),
            Scalar::Text(s) => s.clone(),
        }
    }

    /// Natural ordering within one scalar type.
    ///
    /// Cells of different types only meet on the spreadsheet path, where
    /// Integer and Float compare numerically and every other pairing falls
    /// back to `Boolean < numeric < Text`.
    pub fn natural_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Scalar::Boolean(a), Scalar::Boolean(b)) => a.cmp(b),
            (Scalar::Integer(a), Scalar::Integer(b)) => a.cmp(b),
            (Scalar::Float(a), Scalar::Float(b)) => a.total_cmp(b),
            (Scalar::Text(a), Scalar::Text(b)) => a.cmp(b),
            (Scalar::Integer(a), Scalar::Float(b)) => (*a as f64).total_cmp(b),
            (Scalar::Float(a), Scalar::Integer(b)) => a.total_cmp(&(*b as f64)),
            _ => type_rank(self).cmp(&type_rank(other)),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

fn type_rank(value: &Scalar) -> u8 {
    match value {
        Scalar::Boolean(_) => 0,
        Scalar::Integer(_) | Scalar::Float(_) => 1,
        Scalar::Text(_) => 2,
    }
}

// Whole floats keep a fractional part so they are read back as Float.
fn format_float(value: f64) -> String {
    let rendered = value.to_string();
    if rendered.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        format!("{rendered}.0")
    } else {
        rendered
    }
}

fn parse_integer(value: &str) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Coerces a raw text field, trying boolean, integer, float, then text.
pub fn coerce_scalar(raw: &str) -> Scalar {
    if raw.eq_ignore_ascii_case("true") {
        return Scalar::Boolean(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Scalar::Boolean(false);
    }
    if let Some(parsed) = parse_integer(raw) {
        return Scalar::Integer(parsed);
    }
    if let Ok(parsed) = raw.parse::<f64>() {
        return Scalar::Float(parsed);
    }
    Scalar::Text(raw.to_string())
}

/// Tracks the reference type of one column while rows stream in.
#[derive(Debug, Clone, Default)]
pub struct ColumnTypeGuard {
    reference: Option<ScalarType>,
}

impl ColumnTypeGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference(&self) -> Option<ScalarType> {
        self.reference
    }

    /// Coerces `raw` and checks it against the column's reference type,
    /// fixing the reference on the first call.
    pub fn admit(&mut self, raw: &str, row: usize, column: &str) -> Result<Scalar> {
        let value = coerce_scalar(raw);
        let actual = value.scalar_type();
        match self.reference {
            None => {
                self.reference = Some(actual);
                Ok(value)
            }
            Some(expected) if expected == actual => Ok(value),
            Some(expected) => Err(TableError::TypeMismatch {
                row,
                column: column.to_string(),
                expected,
                actual,
            }),
        }
    }
}
