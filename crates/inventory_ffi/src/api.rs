//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level product functions to Dart via FRB.
//! - Translate core `Result`s into flat envelopes and count sentinels.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Count-returning calls return `FAILURE_SENTINEL` (-1) only when the
//!   request could not be performed; real counts are always >= 0.
//! - Every call opens its own provider; SQLite serializes writers.

use inventory_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ContentValues, DbLocation, InventoryService, NewProduct, Product, ProductProvider,
    ProviderConfig, ServiceResult,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Returned by count-returning calls when the request failed.
pub const FAILURE_SENTINEL: i64 = -1;

const DB_PATH_ENV: &str = "INVENTORY_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the database file used by every later call.
///
/// # FFI contract
/// - First successful call wins; repeating the same path is accepted.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_database(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active == requested {
        String::new()
    } else {
        format!(
            "database already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        )
    }
}

/// Product row returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductItem {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub quantity: i64,
    pub supplier: String,
    pub picture: Vec<u8>,
}

/// List response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListResponse {
    pub ok: bool,
    pub items: Vec<ProductItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Write response envelope for create flows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductActionResponse {
    pub ok: bool,
    /// Created product id on success.
    pub product_id: Option<i64>,
    pub message: String,
}

impl ProductActionResponse {
    fn from_result(operation: &str, result: ServiceResult<i64>) -> Self {
        match result {
            Ok(id) => Self {
                ok: true,
                product_id: Some(id),
                message: "Product saved.".to_string(),
            },
            Err(err) => Self {
                ok: false,
                product_id: None,
                message: format!("{operation} failed: {err}"),
            },
        }
    }
}

/// Inserts a product from the editor form.
#[flutter_rust_bridge::frb(sync)]
pub fn insert_product(
    name: String,
    price: i64,
    quantity: i64,
    supplier: String,
    picture: Vec<u8>,
) -> ProductActionResponse {
    let product = NewProduct::new(name.trim(), price, quantity, supplier.trim(), picture);
    ProductActionResponse::from_result(
        "insert_product",
        with_service(|service| service.add_product(&product)),
    )
}

/// Inserts one random placeholder product ("Add dummy" action).
#[flutter_rust_bridge::frb(sync)]
pub fn insert_dummy_product() -> ProductActionResponse {
    ProductActionResponse::from_result(
        "insert_dummy_product",
        with_service(|service| service.insert_dummy_product()),
    )
}

/// Lists every product ordered by id.
#[flutter_rust_bridge::frb(sync)]
pub fn list_products() -> ProductListResponse {
    match with_service(|service| service.list_products()) {
        Ok(products) => {
            let items: Vec<ProductItem> = products.into_iter().map(to_product_item).collect();
            ProductListResponse {
                ok: true,
                message: format!("Found {} product(s).", items.len()),
                items,
            }
        }
        Err(err) => ProductListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("list_products failed: {err}"),
        },
    }
}

/// Sets the price of one product. Returns rows updated or `-1`.
#[flutter_rust_bridge::frb(sync)]
pub fn update_product_price(id: i64, price: i64) -> i64 {
    update_item_column("update_product_price", id, "price", price)
}

/// Sets the quantity of one product. Returns rows updated or `-1`.
#[flutter_rust_bridge::frb(sync)]
pub fn update_product_quantity(id: i64, quantity: i64) -> i64 {
    update_item_column("update_product_quantity", id, "quantity", quantity)
}

/// Adds `delta` to one product's quantity, clamping at zero.
///
/// # FFI contract
/// - Returns the quantity written, or `-1` when the product is missing or
///   the request fails. Stored quantities are never negative.
#[flutter_rust_bridge::frb(sync)]
pub fn adjust_product_quantity(id: i64, delta: i64) -> i64 {
    match with_service(|service| service.adjust_quantity(id, delta)) {
        Ok(quantity) => quantity,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op=adjust_product_quantity error={err}");
            FAILURE_SENTINEL
        }
    }
}

/// Deletes one product. Returns rows deleted or `-1`.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_product(id: i64) -> i64 {
    count_or_sentinel(
        "delete_product",
        with_service(|service| {
            let provider = service.provider();
            Ok(provider.delete(&provider.item_uri(id), None, &[])?)
        }),
    )
}

/// Deletes every product ("Delete all" action). Returns rows deleted or `-1`.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_all_products() -> i64 {
    count_or_sentinel(
        "delete_all_products",
        with_service(|service| service.delete_all_products()),
    )
}

fn update_item_column(operation: &str, id: i64, column: &str, value: i64) -> i64 {
    count_or_sentinel(
        operation,
        with_service(|service| {
            let provider = service.provider();
            let values = ContentValues::new().with(column, value);
            Ok(provider.update(&provider.item_uri(id), &values, None, &[])?)
        }),
    )
}

fn count_or_sentinel(operation: &str, result: ServiceResult<usize>) -> i64 {
    match result {
        Ok(count) => i64::try_from(count).unwrap_or(i64::MAX),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error op={operation} error={err}");
            FAILURE_SENTINEL
        }
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(inventory_core::contract::DB_FILE_NAME)
        })
        .clone()
}

fn with_service<T>(f: impl FnOnce(&InventoryService) -> ServiceResult<T>) -> ServiceResult<T> {
    let provider = ProductProvider::new(ProviderConfig {
        location: DbLocation::File(resolve_db_path()),
        ..ProviderConfig::default()
    })?;
    f(&InventoryService::new(provider))
}

fn to_product_item(product: Product) -> ProductItem {
    ProductItem {
        id: product.id,
        name: product.name,
        price: product.price,
        quantity: product.quantity,
        supplier: product.supplier,
        picture: product.picture,
    }
}
