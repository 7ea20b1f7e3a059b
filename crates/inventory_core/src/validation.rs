//! Write payload validation.
//!
//! # Responsibility
//! - Decide whether proposed column/value pairs may reach storage.
//! - Enforce the full-column shape required for inserts.
//!
//! # Invariants
//! - Only columns present in the payload are checked, so partial updates pass
//!   when every touched column is valid.
//! - Type tags are checked, never coerced (`Text("5")` is not a price).
//! - `_id` and unknown columns are rejected; the identifier is immutable.

use crate::contract::ProductColumn;
use crate::model::values::{ColumnValue, ContentValues};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Reason a write payload was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Column is not one of the five writable product columns.
    UnknownColumn(String),
    /// Insert payload does not hold exactly the writable columns.
    IncompleteInsert {
        missing: Vec<&'static str>,
        unexpected: Vec<String>,
    },
    /// Value carries the wrong type tag for its column.
    WrongType {
        column: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
    /// Text column holds an empty string.
    EmptyText(&'static str),
    /// Integer column holds a negative number.
    Negative { column: &'static str, value: i64 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownColumn(column) => write!(f, "column `{column}` is not writable"),
            Self::IncompleteInsert {
                missing,
                unexpected,
            } => write!(
                f,
                "insert requires exactly the product columns; missing=[{}] unexpected=[{}]",
                missing.join(","),
                unexpected.join(",")
            ),
            Self::WrongType {
                column,
                expected,
                actual,
            } => write!(f, "column `{column}` expects {expected}, got {actual}"),
            Self::EmptyText(column) => write!(f, "column `{column}` must not be empty"),
            Self::Negative { column, value } => {
                write!(f, "column `{column}` must be >= 0, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// Validates every column present in `values`.
///
/// Absent columns are not checked. The first failing column is reported.
pub fn validate_values(values: &ContentValues) -> ValidationResult {
    for (name, value) in values.iter() {
        let column = ProductColumn::parse(name)
            .ok_or_else(|| ValidationError::UnknownColumn(name.to_string()))?;
        validate_column(column, value)?;
    }
    Ok(())
}

/// Validates an insert payload.
///
/// The column set must equal the five writable columns before any value is
/// inspected; then every value must pass [`validate_values`].
pub fn validate_insert_values(values: &ContentValues) -> ValidationResult {
    let present: BTreeSet<&str> = values.keys().collect();
    let missing: Vec<&'static str> = ProductColumn::ALL
        .iter()
        .map(|column| column.as_str())
        .filter(|name| !present.contains(name))
        .collect();
    let unexpected: Vec<String> = present
        .iter()
        .filter(|name| ProductColumn::parse(name).is_none())
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(ValidationError::IncompleteInsert {
            missing,
            unexpected,
        });
    }

    validate_values(values)
}

fn validate_column(column: ProductColumn, value: &ColumnValue) -> ValidationResult {
    match column {
        ProductColumn::Name | ProductColumn::Supplier => match value {
            ColumnValue::Text(text) if text.is_empty() => {
                Err(ValidationError::EmptyText(column.as_str()))
            }
            ColumnValue::Text(_) => Ok(()),
            other => Err(wrong_type(column, "text", other)),
        },
        ProductColumn::Price | ProductColumn::Quantity => match value {
            ColumnValue::Integer(number) if *number < 0 => Err(ValidationError::Negative {
                column: column.as_str(),
                value: *number,
            }),
            ColumnValue::Integer(_) => Ok(()),
            other => Err(wrong_type(column, "integer", other)),
        },
        ProductColumn::Picture => match value {
            ColumnValue::Blob(_) => Ok(()),
            other => Err(wrong_type(column, "blob", other)),
        },
    }
}

fn wrong_type(
    column: ProductColumn,
    expected: &'static str,
    actual: &ColumnValue,
) -> ValidationError {
    ValidationError::WrongType {
        column: column.as_str(),
        expected,
        actual: actual.type_name(),
    }
}
