//! Request routing for the product provider.
//!
//! # Responsibility
//! - Classify each request locator once and dispatch on the result.
//! - Run validation ahead of every write.
//! - Emit change events after committed writes that touched rows.
//!
//! # Invariants
//! - Item locators replace any caller selection with `_id = <id>`.
//! - Inserts only accept the collection locator and a full-column payload.
//! - Update with an empty payload is `Ok(0)` and never touches storage.
//! - Selection arguments bind as text, in order, after any SET values.

use crate::contract::{
    canonical_column, is_known_column, Locator, LocatorMatcher, ALL_COLUMNS, COLUMN_ID,
    TABLE_NAME,
};
use crate::db::ProductDbHelper;
use crate::model::values::{ColumnValue, ContentValues};
use crate::provider::cursor::ProductCursor;
use crate::provider::notify::{ChangeEvent, ChangeListener, ChangeNotifier, WatchId};
use crate::provider::{ProviderConfig, ProviderError, ProviderResult};
use crate::validation::{validate_insert_values, validate_values};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use std::sync::Arc;
use std::time::Instant;

const DEFAULT_SORT_ORDER: &str = "_id ASC";

static SORT_TERM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([a-z_][a-z0-9_]*)(?:\s+(?:asc|desc))?\s*$").expect("valid sort regex")
});

/// Locator-addressed mediator over the products table.
///
/// One provider owns one connection. It is `Send` but not `Sync`; callers
/// sharing it across threads must serialize access themselves.
pub struct ProductProvider {
    matcher: LocatorMatcher,
    db: ProductDbHelper,
    notifier: ChangeNotifier,
}

impl ProductProvider {
    /// Builds a provider; the database opens on the first request.
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        Ok(Self {
            matcher: LocatorMatcher::try_new(&config.authority)?,
            db: ProductDbHelper::new(config.location),
            notifier: ChangeNotifier::new(),
        })
    }

    /// Provider over a fresh in-memory database with the default authority.
    pub fn in_memory() -> ProviderResult<Self> {
        Self::new(ProviderConfig::in_memory())
    }

    pub fn matcher(&self) -> &LocatorMatcher {
        &self.matcher
    }

    pub fn collection_uri(&self) -> String {
        self.matcher.collection_uri()
    }

    pub fn item_uri(&self, id: i64) -> String {
        self.matcher.item_uri(id)
    }

    /// MIME type for `locator`, or `None` when it is unrecognized.
    pub fn get_type(&self, locator: &str) -> Option<String> {
        self.matcher
            .classify(locator)
            .map(|classified| self.matcher.mime_type(classified))
    }

    /// Inserts one product and returns its item locator.
    ///
    /// # Errors
    /// - `Validation` when `values` is not exactly the five valid columns.
    /// - `UnsupportedInsertTarget` / `UnrecognizedLocator` for any locator
    ///   other than the collection.
    /// - `Storage` when SQLite refuses the row.
    pub fn insert(&self, locator: &str, values: &ContentValues) -> ProviderResult<String> {
        let started_at = Instant::now();
        let result = self.insert_inner(locator, values);
        log_outcome("provider_insert", started_at, &result, |uri| {
            format!("uri={uri}")
        });
        result
    }

    /// Queries products addressed by `locator`.
    ///
    /// `projection = None` selects every column. For item locators the
    /// caller's `selection` and `selection_args` are ignored.
    pub fn query(
        &self,
        locator: &str,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        selection_args: &[&str],
        sort_order: Option<&str>,
    ) -> ProviderResult<ProductCursor> {
        let started_at = Instant::now();
        let result = self.query_inner(locator, projection, selection, selection_args, sort_order);
        log_outcome("provider_query", started_at, &result, |cursor| {
            format!("rows={}", cursor.len())
        });
        result
    }

    /// Updates the products addressed by `locator`; returns rows affected.
    ///
    /// Only columns present in `values` are validated and written.
    pub fn update(
        &self,
        locator: &str,
        values: &ContentValues,
        selection: Option<&str>,
        selection_args: &[&str],
    ) -> ProviderResult<usize> {
        let started_at = Instant::now();
        let result = self.update_inner(locator, values, selection, selection_args);
        log_outcome("provider_update", started_at, &result, |count| {
            format!("rows={count}")
        });
        result
    }

    /// Deletes the products addressed by `locator`; returns rows removed.
    pub fn delete(
        &self,
        locator: &str,
        selection: Option<&str>,
        selection_args: &[&str],
    ) -> ProviderResult<usize> {
        let started_at = Instant::now();
        let result = self.delete_inner(locator, selection, selection_args);
        log_outcome("provider_delete", started_at, &result, |count| {
            format!("rows={count}")
        });
        result
    }

    /// Registers `listener` for changes under `locator`.
    pub fn register_listener(
        &mut self,
        locator: &str,
        listener: Arc<dyn ChangeListener>,
    ) -> ProviderResult<WatchId> {
        let classified = self.classify(locator)?;
        Ok(self.notifier.register(classified, listener))
    }

    /// Registers `listener` on the locator `cursor` was queried from.
    pub fn watch(&mut self, cursor: &ProductCursor, listener: Arc<dyn ChangeListener>) -> WatchId {
        self.notifier
            .register(cursor.notification_locator(), listener)
    }

    pub fn unregister_listener(&mut self, id: WatchId) -> bool {
        self.notifier.unregister(id)
    }

    fn insert_inner(&self, locator: &str, values: &ContentValues) -> ProviderResult<String> {
        validate_insert_values(values)?;

        match self.classify(locator)? {
            Locator::Collection => {}
            Locator::Item(_) => {
                return Err(ProviderError::UnsupportedInsertTarget(locator.to_string()))
            }
        }

        let columns: Vec<&str> = values.keys().collect();
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {TABLE_NAME} ({}) VALUES ({placeholders});",
            columns.join(", ")
        );
        let bind_values: Vec<Value> =
            values.iter().map(|(_, value)| value.to_sql_value()).collect();

        let conn = self.db.writable_database()?;
        conn.execute(&sql, params_from_iter(bind_values))?;
        let id = conn.last_insert_rowid();

        self.notify(Locator::Collection);
        Ok(self.matcher.item_uri(id))
    }

    fn query_inner(
        &self,
        locator: &str,
        projection: Option<&[&str]>,
        selection: Option<&str>,
        selection_args: &[&str],
        sort_order: Option<&str>,
    ) -> ProviderResult<ProductCursor> {
        let classified = self.classify(locator)?;
        let columns = resolve_projection(projection)?;
        let order_by = resolve_sort_order(sort_order)?;
        let filter = Filter::resolve(classified, selection, selection_args);

        let mut sql = format!("SELECT {} FROM {TABLE_NAME}", columns.join(", "));
        filter.append_where(&mut sql);
        sql.push_str(&format!(" ORDER BY {order_by};"));

        let readable = self.db.readable_database()?;
        let mut stmt = readable.prepare(&sql)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        let column_count = column_names.len();

        let mut rows = stmt.query(params_from_iter(filter.args))?;
        let mut materialized = Vec::new();
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for index in 0..column_count {
                values.push(ColumnValue::from_value_ref(row.get_ref(index)?));
            }
            materialized.push(values);
        }

        Ok(ProductCursor::new(classified, column_names, materialized))
    }

    fn update_inner(
        &self,
        locator: &str,
        values: &ContentValues,
        selection: Option<&str>,
        selection_args: &[&str],
    ) -> ProviderResult<usize> {
        if values.is_empty() {
            return Ok(0);
        }
        validate_values(values)?;

        let classified = self.classify(locator)?;
        let filter = Filter::resolve(classified, selection, selection_args);

        let assignments: Vec<String> =
            values.keys().map(|column| format!("{column} = ?")).collect();
        let mut sql = format!("UPDATE {TABLE_NAME} SET {}", assignments.join(", "));
        filter.append_where(&mut sql);
        sql.push(';');

        let mut bind_values: Vec<Value> =
            values.iter().map(|(_, value)| value.to_sql_value()).collect();
        bind_values.extend(filter.args);

        let conn = self.db.writable_database()?;
        let changed = conn.execute(&sql, params_from_iter(bind_values))?;

        if changed > 0 {
            self.notify(classified);
        }
        Ok(changed)
    }

    fn delete_inner(
        &self,
        locator: &str,
        selection: Option<&str>,
        selection_args: &[&str],
    ) -> ProviderResult<usize> {
        let classified = self.classify(locator)?;
        let filter = Filter::resolve(classified, selection, selection_args);

        let mut sql = format!("DELETE FROM {TABLE_NAME}");
        filter.append_where(&mut sql);
        sql.push(';');

        let conn = self.db.writable_database()?;
        let changed = conn.execute(&sql, params_from_iter(filter.args))?;

        if changed > 0 {
            self.notify(classified);
        }
        Ok(changed)
    }

    fn classify(&self, locator: &str) -> ProviderResult<Locator> {
        self.matcher
            .classify(locator)
            .ok_or_else(|| ProviderError::UnrecognizedLocator(locator.to_string()))
    }

    fn notify(&self, locator: Locator) {
        self.notifier.notify(&ChangeEvent {
            locator,
            uri: self.matcher.to_uri(locator),
        });
    }
}

/// Effective WHERE clause after locator classification.
struct Filter {
    clause: Option<String>,
    args: Vec<Value>,
}

impl Filter {
    fn resolve(locator: Locator, selection: Option<&str>, selection_args: &[&str]) -> Self {
        match locator {
            Locator::Item(id) => Self {
                clause: Some(format!("{COLUMN_ID} = ?")),
                args: vec![Value::Integer(id)],
            },
            Locator::Collection => Self {
                clause: selection
                    .map(str::trim)
                    .filter(|clause| !clause.is_empty())
                    .map(|clause| format!("({clause})")),
                args: selection_args
                    .iter()
                    .map(|arg| Value::Text((*arg).to_string()))
                    .collect(),
            },
        }
    }

    fn append_where(&self, sql: &mut String) {
        if let Some(clause) = &self.clause {
            sql.push_str(" WHERE ");
            sql.push_str(clause);
        }
    }
}

/// Projection in stored column spelling; cursor lookups use those names.
fn resolve_projection(projection: Option<&[&str]>) -> ProviderResult<Vec<&'static str>> {
    let Some(columns) = projection else {
        return Ok(ALL_COLUMNS.to_vec());
    };
    if columns.is_empty() {
        return Err(ProviderError::InvalidQuery(
            "projection must name at least one column".to_string(),
        ));
    }
    columns
        .iter()
        .map(|column| {
            canonical_column(column).ok_or_else(|| {
                ProviderError::InvalidQuery(format!("unknown projection column `{column}`"))
            })
        })
        .collect()
}

fn resolve_sort_order(sort_order: Option<&str>) -> ProviderResult<String> {
    let Some(order) = sort_order.map(str::trim).filter(|order| !order.is_empty()) else {
        return Ok(DEFAULT_SORT_ORDER.to_string());
    };

    for term in order.split(',') {
        let column = SORT_TERM_RE
            .captures(term)
            .and_then(|captures| captures.get(1))
            .map(|column| column.as_str())
            .ok_or_else(|| ProviderError::InvalidQuery(format!("invalid sort term `{term}`")))?;
        if !is_known_column(column) {
            return Err(ProviderError::InvalidQuery(format!(
                "unknown sort column `{column}`"
            )));
        }
    }
    Ok(order.to_string())
}

fn log_outcome<T>(
    event: &str,
    started_at: Instant,
    result: &ProviderResult<T>,
    describe: impl FnOnce(&T) -> String,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(value) => debug!(
            "event={} module=provider status=ok duration_ms={} {}",
            event,
            duration_ms,
            describe(value)
        ),
        Err(err) => debug!(
            "event={} module=provider status=rejected duration_ms={} error_code={}",
            event,
            duration_ms,
            err.code()
        ),
    }
}
