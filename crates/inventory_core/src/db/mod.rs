//! SQLite storage bootstrap and handle ownership.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the inventory core.
//! - Create the pinned `products` schema on first access.
//! - Hand out read-only and read/write handles to the provider.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version` and pinned at 1.
//! - Core code must not read/write product data before the schema exists.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod helper;
mod open;
pub mod schema;

pub use helper::{ProductDbHelper, ReadableDatabase};
pub use open::{open_db, open_db_in_memory, open_location};

pub type DbResult<T> = Result<T, DbError>;

/// Where the products database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    Memory,
}

impl Default for DbLocation {
    fn default() -> Self {
        Self::File(PathBuf::from(crate::contract::DB_FILE_NAME))
    }
}

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// A statement that writes was prepared through a read-only handle.
    WriteOnReadHandle(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::WriteOnReadHandle(sql) => {
                write!(f, "statement is not read-only: {sql}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::WriteOnReadHandle(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
