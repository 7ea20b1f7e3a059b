//! Resource locators for the product provider.
//!
//! # Responsibility
//! - Classify locator strings into collection or single-item addressing.
//! - Build canonical locator strings for a configured authority.
//!
//! # Invariants
//! - Classification is the only dispatch key used by the provider.
//! - Item identifiers are strictly positive.
//! - A matcher is built per provider instance; there is no process-wide table.

use super::{CONTENT_SCHEME, CURSOR_DIR_BASE_TYPE, CURSOR_ITEM_BASE_TYPE, PATH_PRODUCTS};
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Addressing mode resolved from a locator string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Every product row.
    Collection,
    /// One product row by identifier.
    Item(i64),
}

impl Locator {
    /// Returns whether a change at `changed` is visible to a watcher on `self`.
    ///
    /// Collection watchers see every change. Item watchers see changes to
    /// their own row and to the whole collection.
    pub fn observes(self, changed: Locator) -> bool {
        match (self, changed) {
            (Self::Collection, _) => true,
            (Self::Item(_), Self::Collection) => true,
            (Self::Item(watched), Self::Item(id)) => watched == id,
        }
    }
}

/// Authority validation error raised when building a matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAuthority(pub String);

impl Display for InvalidAuthority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid content authority `{}`; expected [A-Za-z0-9._-]+",
            self.0
        )
    }
}

impl Error for InvalidAuthority {}

/// Locator classifier bound to one content authority.
#[derive(Debug, Clone)]
pub struct LocatorMatcher {
    authority: String,
    pattern: Regex,
}

impl LocatorMatcher {
    /// Builds a matcher for `content://<authority>/products[/<id>]`.
    ///
    /// # Errors
    /// - Returns `InvalidAuthority` when `authority` is empty or contains
    ///   characters outside `[A-Za-z0-9._-]`.
    pub fn try_new(authority: &str) -> Result<Self, InvalidAuthority> {
        let trimmed = authority.trim();
        let valid = !trimmed.is_empty()
            && trimmed
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'));
        if !valid {
            return Err(InvalidAuthority(authority.to_string()));
        }

        let pattern = Regex::new(&format!(
            r"^{}://{}/{}(?:/(\d+))?$",
            CONTENT_SCHEME,
            regex::escape(trimmed),
            PATH_PRODUCTS
        ))
        .map_err(|_| InvalidAuthority(authority.to_string()))?;

        Ok(Self {
            authority: trimmed.to_string(),
            pattern,
        })
    }

    /// Classifies `locator`; `None` means unrecognized.
    pub fn classify(&self, locator: &str) -> Option<Locator> {
        let captures = self.pattern.captures(locator)?;
        match captures.get(1) {
            None => Some(Locator::Collection),
            Some(segment) => match segment.as_str().parse::<i64>() {
                Ok(id) if id > 0 => Some(Locator::Item(id)),
                _ => None,
            },
        }
    }

    /// Collection locator string.
    pub fn collection_uri(&self) -> String {
        format!("{CONTENT_SCHEME}://{}/{PATH_PRODUCTS}", self.authority)
    }

    /// Item locator string for `id`.
    pub fn item_uri(&self, id: i64) -> String {
        format!("{}/{id}", self.collection_uri())
    }

    /// Canonical string form of `locator`.
    pub fn to_uri(&self, locator: Locator) -> String {
        match locator {
            Locator::Collection => self.collection_uri(),
            Locator::Item(id) => self.item_uri(id),
        }
    }

    /// MIME type of data addressed by `locator`.
    pub fn mime_type(&self, locator: Locator) -> String {
        let base = match locator {
            Locator::Collection => CURSOR_DIR_BASE_TYPE,
            Locator::Item(_) => CURSOR_ITEM_BASE_TYPE,
        };
        format!("{base}/{}/{PATH_PRODUCTS}", self.authority)
    }
}
