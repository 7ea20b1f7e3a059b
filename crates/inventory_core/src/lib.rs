//! Core data-access logic for the inventory tracker.
//! This crate is the single source of truth for product storage invariants.

pub mod contract;
pub mod db;
pub mod logging;
pub mod model;
pub mod provider;
pub mod service;
pub mod validation;

pub use contract::{Locator, LocatorMatcher, ProductColumn};
pub use db::{DbError, DbLocation, DbResult};
pub use logging::{init_logging, logging_status};
pub use model::product::{NewProduct, Product, ProductId};
pub use model::values::{ColumnValue, ContentValues};
pub use provider::{
    ChangeEvent, ChangeListener, ProductCursor, ProductProvider, ProviderConfig, ProviderError,
    ProviderResult, WatchId,
};
pub use service::inventory_service::{InventoryService, ServiceError, ServiceResult};
pub use validation::{validate_insert_values, validate_values, ValidationError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
