//! Product records.
//!
//! # Responsibility
//! - Typed read model for one `products` row.
//! - Typed insert payload that always carries every writable column.
//!
//! # Invariants
//! - `NewProduct::to_content_values` yields exactly the five writable columns.
//! - Column constraints are enforced by `validation`, not by these types.

use crate::contract::ProductColumn;
use crate::model::values::ContentValues;
use serde::{Deserialize, Serialize};

/// Storage-assigned product identifier.
pub type ProductId = i64;

/// One stored product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Auto-incremented by SQLite; serialized as `_id` to match the column.
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    /// Minor currency units.
    pub price: i64,
    pub quantity: i64,
    pub supplier: String,
    /// Raw encoded image bytes; may be empty.
    pub picture: Vec<u8>,
}

/// Insert payload for a product that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    pub supplier: String,
    pub picture: Vec<u8>,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        price: i64,
        quantity: i64,
        supplier: impl Into<String>,
        picture: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            supplier: supplier.into(),
            picture,
        }
    }

    /// Full-column write payload for the provider insert path.
    pub fn to_content_values(&self) -> ContentValues {
        let mut values = ContentValues::new();
        values
            .put(ProductColumn::Name.as_str(), self.name.as_str())
            .put(ProductColumn::Price.as_str(), self.price)
            .put(ProductColumn::Quantity.as_str(), self.quantity)
            .put(ProductColumn::Supplier.as_str(), self.supplier.as_str())
            .put(ProductColumn::Picture.as_str(), self.picture.clone());
        values
    }
}

impl Product {
    /// Returns the insertable part of this record, dropping the identifier.
    pub fn to_new_product(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            price: self.price,
            quantity: self.quantity,
            supplier: self.supplier.clone(),
            picture: self.picture.clone(),
        }
    }
}
