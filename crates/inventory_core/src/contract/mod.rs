//! Storage contract shared by every core layer.
//!
//! # Responsibility
//! - Name the single `products` table and its columns.
//! - Define the content authority and locator shapes used by the provider.
//!
//! # Invariants
//! - Table and column names are part of the on-disk contract and must not
//!   change; existing databases and admin tooling depend on them verbatim.
//! - `_id` is owned by storage and is never part of a write payload.

pub mod locator;

pub use locator::{Locator, LocatorMatcher};

/// Default content authority for product locators.
pub const CONTENT_AUTHORITY: &str = "inventory.tracker";
/// Locator scheme prefix.
pub const CONTENT_SCHEME: &str = "content";
/// Path segment addressing the product collection.
pub const PATH_PRODUCTS: &str = "products";

/// Default database file name.
pub const DB_FILE_NAME: &str = "products.db";

pub const TABLE_NAME: &str = "products";
pub const COLUMN_ID: &str = "_id";
pub const COLUMN_NAME: &str = "name";
pub const COLUMN_PRICE: &str = "price";
pub const COLUMN_QUANTITY: &str = "quantity";
pub const COLUMN_SUPPLIER: &str = "supplier";
pub const COLUMN_PICTURE: &str = "picture";

/// MIME prefix for a cursor over many rows.
pub const CURSOR_DIR_BASE_TYPE: &str = "vnd.android.cursor.dir";
/// MIME prefix for a cursor over one row.
pub const CURSOR_ITEM_BASE_TYPE: &str = "vnd.android.cursor.item";

/// Writable data columns of the `products` table, in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProductColumn {
    Name,
    Price,
    Quantity,
    Supplier,
    Picture,
}

impl ProductColumn {
    /// Every writable column. An insert payload must hold exactly these.
    pub const ALL: [ProductColumn; 5] = [
        Self::Name,
        Self::Price,
        Self::Quantity,
        Self::Supplier,
        Self::Picture,
    ];

    /// Column name as stored in SQLite.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => COLUMN_NAME,
            Self::Price => COLUMN_PRICE,
            Self::Quantity => COLUMN_QUANTITY,
            Self::Supplier => COLUMN_SUPPLIER,
            Self::Picture => COLUMN_PICTURE,
        }
    }

    /// Resolves a writable column from its stored name.
    ///
    /// Returns `None` for `_id` and unknown names.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            COLUMN_NAME => Some(Self::Name),
            COLUMN_PRICE => Some(Self::Price),
            COLUMN_QUANTITY => Some(Self::Quantity),
            COLUMN_SUPPLIER => Some(Self::Supplier),
            COLUMN_PICTURE => Some(Self::Picture),
            _ => None,
        }
    }
}

/// Every readable column, identifier first.
pub const ALL_COLUMNS: &[&str] = &[
    COLUMN_ID,
    COLUMN_NAME,
    COLUMN_PRICE,
    COLUMN_QUANTITY,
    COLUMN_SUPPLIER,
    COLUMN_PICTURE,
];

/// Stored spelling of a readable column, matched case-insensitively.
pub fn canonical_column(name: &str) -> Option<&'static str> {
    ALL_COLUMNS
        .iter()
        .copied()
        .find(|column| column.eq_ignore_ascii_case(name))
}

/// Returns whether `name` is a readable column of `products`, in any case.
pub fn is_known_column(name: &str) -> bool {
    canonical_column(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::{canonical_column, is_known_column, ProductColumn, ALL_COLUMNS, COLUMN_ID};

    #[test]
    fn writable_columns_round_trip_through_names() {
        for column in ProductColumn::ALL {
            assert_eq!(ProductColumn::parse(column.as_str()), Some(column));
        }
    }

    #[test]
    fn identifier_is_readable_but_not_writable() {
        assert!(is_known_column(COLUMN_ID));
        assert_eq!(ProductColumn::parse(COLUMN_ID), None);
        assert_eq!(ALL_COLUMNS.len(), ProductColumn::ALL.len() + 1);
    }

    #[test]
    fn column_lookup_ignores_case() {
        assert_eq!(canonical_column("PRICE"), Some("price"));
        assert_eq!(canonical_column("_Id"), Some("_id"));
        assert!(is_known_column("Supplier"));
        assert_eq!(canonical_column("color"), None);
    }
}
