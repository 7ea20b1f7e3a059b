//! Materialized query results.

use crate::contract::{
    Locator, COLUMN_ID, COLUMN_NAME, COLUMN_PICTURE, COLUMN_PRICE, COLUMN_QUANTITY,
    COLUMN_SUPPLIER,
};
use crate::model::product::Product;
use crate::model::values::ColumnValue;
use crate::provider::{ProviderError, ProviderResult};

/// Rows returned by `ProductProvider::query`.
///
/// The cursor owns its rows; no statement or connection stays borrowed, so
/// dropping it releases everything the query held. The notification locator
/// is the locator the query addressed and is what callers pass to
/// `ProductProvider::watch` to hear about later changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCursor {
    locator: Locator,
    columns: Vec<String>,
    rows: Vec<Vec<ColumnValue>>,
}

impl ProductCursor {
    pub(crate) fn new(locator: Locator, columns: Vec<String>, rows: Vec<Vec<ColumnValue>>) -> Self {
        Self {
            locator,
            columns,
            rows,
        }
    }

    pub fn notification_locator(&self) -> Locator {
        self.locator
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of `column` in the projection.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|name| name == column)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&ColumnValue> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    pub fn get_i64(&self, row: usize, column: &str) -> Option<i64> {
        self.get(row, column).and_then(ColumnValue::as_i64)
    }

    pub fn get_str(&self, row: usize, column: &str) -> Option<&str> {
        self.get(row, column).and_then(ColumnValue::as_str)
    }

    pub fn get_blob(&self, row: usize, column: &str) -> Option<&[u8]> {
        self.get(row, column).and_then(ColumnValue::as_blob)
    }

    /// Decodes every row into a typed record.
    ///
    /// # Errors
    /// - `InvalidData` when the projection lacks a column or a stored value has
    ///   an unexpected type.
    pub fn products(&self) -> ProviderResult<Vec<Product>> {
        (0..self.rows.len())
            .map(|row| self.product_at(row))
            .collect()
    }

    fn product_at(&self, row: usize) -> ProviderResult<Product> {
        Ok(Product {
            id: self.required(row, COLUMN_ID, ColumnValue::as_i64)?,
            name: self
                .required(row, COLUMN_NAME, ColumnValue::as_str)?
                .to_string(),
            price: self.required(row, COLUMN_PRICE, ColumnValue::as_i64)?,
            quantity: self.required(row, COLUMN_QUANTITY, ColumnValue::as_i64)?,
            supplier: self
                .required(row, COLUMN_SUPPLIER, ColumnValue::as_str)?
                .to_string(),
            picture: self
                .required(row, COLUMN_PICTURE, ColumnValue::as_blob)?
                .to_vec(),
        })
    }

    fn required<'a, T>(
        &'a self,
        row: usize,
        column: &str,
        read: impl Fn(&'a ColumnValue) -> Option<T>,
    ) -> ProviderResult<T> {
        let value = self.get(row, column).ok_or_else(|| {
            ProviderError::InvalidData(format!("column `{column}` missing from projection"))
        })?;
        read(value).ok_or_else(|| {
            ProviderError::InvalidData(format!(
                "column `{column}` holds unexpected {} value in row {row}",
                value.type_name()
            ))
        })
    }
}
