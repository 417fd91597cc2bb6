//! Ordered, display-formattable result lists.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Pagination block the panel attaches to list responses under `meta.pagination`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// Total number of items across all pages.
    pub total: u64,
    /// Number of items on this page.
    pub count: u64,
    /// Page size.
    pub per_page: u64,
    /// One-based index of this page.
    pub current_page: u64,
    /// Number of pages available.
    pub total_pages: u64,
}

impl Pagination {
    /// Returns true if another page follows this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Resources returned by a list endpoint, in the order the panel sent them.
///
/// Rendering with `Display` produces one ` - item` line per element.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList<T> {
    items: Vec<T>,
    pagination: Option<Pagination>,
}

impl<T> ResourceList<T> {
    /// Wrap items without pagination metadata.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self {
            items,
            pagination: None,
        }
    }

    /// Wrap items together with the page they came from.
    #[must_use]
    pub const fn with_pagination(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        Self { items, pagination }
    }

    /// Pagination metadata, when the panel sent any.
    #[must_use]
    pub const fn pagination(&self) -> Option<&Pagination> {
        self.pagination.as_ref()
    }

    /// Unwrap into the underlying vector.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Deref for ResourceList<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for ResourceList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> FromIterator<T> for ResourceList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for ResourceList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResourceList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: fmt::Display> fmt::Display for ResourceList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_list(&self.items))
    }
}

/// Render items as bulleted lines, one per element.
#[must_use]
pub fn render_list<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| format!(" - {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
