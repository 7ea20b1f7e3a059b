//! Dynamically typed column payloads.
//!
//! # Responsibility
//! - Carry proposed column/value pairs for insert and update requests.
//! - Bridge tagged values to and from SQLite storage values.
//!
//! # Invariants
//! - Each value keeps the type tag it was created with.
//! - Keys iterate in sorted order so generated SQL is deterministic.

use rusqlite::types::{Value, ValueRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One tagged column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ColumnValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ColumnValue {
    /// Stable type tag name used in validation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Text(_) => "text",
            Self::Blob(_) => "blob",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    pub(crate) fn to_sql_value(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Integer(value) => Value::Integer(*value),
            Self::Real(value) => Value::Real(*value),
            Self::Text(value) => Value::Text(value.clone()),
            Self::Blob(value) => Value::Blob(value.clone()),
        }
    }

    pub(crate) fn from_value_ref(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(value) => Self::Integer(value),
            ValueRef::Real(value) => Self::Real(value),
            ValueRef::Text(bytes) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
            ValueRef::Blob(bytes) => Self::Blob(bytes.to_vec()),
        }
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for ColumnValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl From<&[u8]> for ColumnValue {
    fn from(value: &[u8]) -> Self {
        Self::Blob(value.to_vec())
    }
}

/// Proposed column/value mapping for a write request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentValues {
    values: BTreeMap<String, ColumnValue>,
}

impl ContentValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`, replacing any previous value.
    pub fn put(&mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> &mut Self {
        self.values.insert(column.into(), value.into());
        self
    }

    /// Builder form of [`ContentValues::put`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<ColumnValue>) -> Self {
        self.put(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&ColumnValue> {
        self.values.get(column)
    }

    pub fn contains_key(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnValue)> {
        self.values
            .iter()
            .map(|(column, value)| (column.as_str(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnValue, ContentValues};

    #[test]
    fn put_keeps_type_tags() {
        let values = ContentValues::new()
            .with("name", "Red T-Shirt")
            .with("price", 1000)
            .with("picture", vec![0_u8, 1, 2, 3]);

        assert_eq!(values.get("name").and_then(ColumnValue::as_str), Some("Red T-Shirt"));
        assert_eq!(values.get("price").and_then(ColumnValue::as_i64), Some(1000));
        assert_eq!(values.get("picture").map(ColumnValue::type_name), Some("blob"));
        assert_eq!(values.get("price").and_then(ColumnValue::as_str), None);
    }

    #[test]
    fn put_replaces_existing_value() {
        let mut values = ContentValues::new();
        values.put("price", 1).put("price", "one");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("price"), Some(&ColumnValue::Text("one".to_string())));
    }

    #[test]
    fn keys_iterate_sorted() {
        let values = ContentValues::new().with("supplier", "s").with("name", "n");
        let keys: Vec<_> = values.keys().collect();
        assert_eq!(keys, vec!["name", "supplier"]);
    }
}
