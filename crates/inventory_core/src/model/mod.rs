//! Product domain model.
//!
//! # Responsibility
//! - Define the typed product record read back from storage.
//! - Define the dynamically typed column/value payload used for writes.
//!
//! # Invariants
//! - `ColumnValue` keeps its storage type tag; nothing here coerces types.
//! - `Product::id` is assigned by storage and never set by write payloads.

pub mod product;
pub mod values;
