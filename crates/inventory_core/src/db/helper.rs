//! Lazy owner of the products database connection.
//!
//! # Responsibility
//! - Open the configured database on first handle request.
//! - Hand out read-only and read/write views over the same connection.
//!
//! # Invariants
//! - The schema is created at most once per helper; later handle requests
//!   reuse the open connection.
//! - A failed open leaves the helper unopened, so the next request tries again
//!   from scratch; the helper itself never retries.
//! - Statements prepared through `ReadableDatabase` cannot write.

use super::open::open_location;
use super::{DbError, DbLocation, DbResult};
use once_cell::unsync::OnceCell;
use rusqlite::{Connection, Statement};

/// Owns the lazily opened products connection.
pub struct ProductDbHelper {
    location: DbLocation,
    conn: OnceCell<Connection>,
}

impl ProductDbHelper {
    /// Creates a helper; nothing is opened until the first handle request.
    pub fn new(location: DbLocation) -> Self {
        Self {
            location,
            conn: OnceCell::new(),
        }
    }

    /// Whether a connection has been opened.
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Returns the read/write handle, opening the database when needed.
    pub fn writable_database(&self) -> DbResult<&Connection> {
        self.conn.get_or_try_init(|| open_location(&self.location))
    }

    /// Returns a read-only view, opening the database when needed.
    pub fn readable_database(&self) -> DbResult<ReadableDatabase<'_>> {
        Ok(ReadableDatabase {
            conn: self.writable_database()?,
        })
    }
}

/// Read-only view over the products connection.
pub struct ReadableDatabase<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ReadableDatabase<'conn> {
    /// Prepares `sql`, refusing statements that would modify the database.
    pub fn prepare(&self, sql: &str) -> DbResult<Statement<'conn>> {
        let stmt = self.conn.prepare(sql)?;
        if !stmt.readonly() {
            return Err(DbError::WriteOnReadHandle(sql.to_string()));
        }
        Ok(stmt)
    }
}

#[cfg(test)]
mod tests {
    use super::ProductDbHelper;
    use crate::db::{DbError, DbLocation};

    #[test]
    fn helper_opens_lazily_and_reuses_connection() {
        let helper = ProductDbHelper::new(DbLocation::Memory);
        assert!(!helper.is_open());

        let first = helper.writable_database().unwrap();
        first
            .execute(
                "INSERT INTO products (name, price, quantity, supplier, picture)
                 VALUES ('a', 1, 1, 's', x'00');",
                [],
            )
            .unwrap();
        assert!(helper.is_open());

        let second = helper.writable_database().unwrap();
        let count: i64 = second
            .query_row("SELECT COUNT(*) FROM products;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn readable_database_refuses_writes() {
        let helper = ProductDbHelper::new(DbLocation::Memory);
        let readable = helper.readable_database().unwrap();

        assert!(readable.prepare("SELECT _id FROM products;").is_ok());
        let err = readable
            .prepare("DELETE FROM products;")
            .err()
            .expect("delete must be refused");
        assert!(matches!(err, DbError::WriteOnReadHandle(_)));
    }
}
