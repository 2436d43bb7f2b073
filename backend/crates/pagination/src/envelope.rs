//! Response envelope for paginated collections.

use serde::Serialize;

use crate::Cursor;

/// A single page of results together with the continuation token.
///
/// `next_cursor` is absent on the final page. The envelope serialises with
/// camelCase keys to match the rest of the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in request order.
    pub items: Vec<T>,
    /// Token resuming after the last item, when more results exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
}

impl<T> Page<T> {
    /// Assemble a page from its items and optional continuation token.
    #[must_use]
    pub const fn new(items: Vec<T>, next_cursor: Option<Cursor>) -> Self {
        Self { items, next_cursor }
    }

    /// Map the item type while preserving the continuation token.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}
