//! Locator-addressed product provider.
//!
//! # Responsibility
//! - Route insert/query/update/delete requests by locator classification.
//! - Validate write payloads before they reach storage.
//! - Notify registered listeners after committed changes.
//!
//! # Invariants
//! - Failures are returned as `ProviderError`; no count or locator is ever
//!   returned for a request that could not be performed.
//! - "Zero rows affected" is `Ok(0)`, distinct from any failure.

use crate::contract::locator::InvalidAuthority;
use crate::contract::CONTENT_AUTHORITY;
use crate::db::{DbError, DbLocation};
use crate::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod cursor;
mod notify;
mod router;

pub use cursor::ProductCursor;
pub use notify::{ChangeEvent, ChangeListener, ChangeNotifier, WatchId};
pub use router::ProductProvider;

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Construction-time provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Content authority accepted in locators.
    pub authority: String,
    /// Backing database location.
    pub location: DbLocation,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            authority: CONTENT_AUTHORITY.to_string(),
            location: DbLocation::default(),
        }
    }
}

impl ProviderConfig {
    /// Default authority over an in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: DbLocation::Memory,
            ..Self::default()
        }
    }
}

/// Provider request failure.
#[derive(Debug)]
pub enum ProviderError {
    /// Write payload rejected before touching storage.
    Validation(ValidationError),
    /// Locator is neither the collection nor an item.
    UnrecognizedLocator(String),
    /// Inserts only target the collection locator.
    UnsupportedInsertTarget(String),
    /// Projection or sort order references something outside the schema.
    InvalidQuery(String),
    /// Configuration rejected at construction.
    InvalidConfig(InvalidAuthority),
    /// Row data could not be decoded into a typed record.
    InvalidData(String),
    Storage(DbError),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnrecognizedLocator(locator) => write!(f, "unrecognized locator: {locator}"),
            Self::UnsupportedInsertTarget(locator) => {
                write!(f, "insert is not supported for locator: {locator}")
            }
            Self::InvalidQuery(message) => write!(f, "invalid query: {message}"),
            Self::InvalidConfig(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid product data: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidConfig(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::UnrecognizedLocator(_)
            | Self::UnsupportedInsertTarget(_)
            | Self::InvalidQuery(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl ProviderError {
    /// Stable short code for logs and FFI diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::UnrecognizedLocator(_) => "unrecognized_locator",
            Self::UnsupportedInsertTarget(_) => "unsupported_insert_target",
            Self::InvalidQuery(_) => "invalid_query",
            Self::InvalidConfig(_) => "invalid_config",
            Self::InvalidData(_) => "invalid_data",
            Self::Storage(_) => "storage_failed",
        }
    }
}

impl From<ValidationError> for ProviderError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<InvalidAuthority> for ProviderError {
    fn from(value: InvalidAuthority) -> Self {
        Self::InvalidConfig(value)
    }
}

impl From<DbError> for ProviderError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for ProviderError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}
