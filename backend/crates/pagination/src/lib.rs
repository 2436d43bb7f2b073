//! Opaque cursor pagination primitives shared by backend endpoints.
//!
//! Endpoints that return collections use a forward-only cursor scheme: the
//! response carries an opaque token identifying the position after the last
//! returned item, and clients resume from it verbatim. Tokens are
//! URL-safe base64 over a JSON payload, so handlers can evolve the payload
//! shape without breaking the wire contract.
//!
//! The crate deliberately knows nothing about domain types. Handlers define
//! their own cursor payloads and rely on this crate for encoding, limit
//! clamping, the response envelope, and RFC 5988 `Link` header construction.
//!
//! # Example
//!
//! ```
//! use pagination::{Cursor, Page, PageLimits};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Position {
//!     offset: u64,
//! }
//!
//! let limits = PageLimits::new(25, 100);
//! assert_eq!(limits.clamp(Some(500)), 100);
//!
//! let cursor = Cursor::encode(&Position { offset: 25 }).expect("encodable");
//! let page = Page::new(vec!["a", "b"], Some(cursor.clone()));
//! assert_eq!(page.items.len(), 2);
//!
//! let decoded: Position = cursor.decode().expect("valid cursor");
//! assert_eq!(decoded.offset, 25);
//! ```

mod cursor;
mod envelope;
mod link;

pub use cursor::{Cursor, CursorError};
pub use envelope::Page;
pub use link::next_link;

/// Limit policy for a paginated endpoint.
///
/// Each endpoint declares its default page size and a hard ceiling. Requested
/// limits are clamped rather than rejected so that clients asking for "as
/// much as possible" degrade gracefully instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default: usize,
    max: usize,
}

impl PageLimits {
    /// Create a limit policy with the given default and maximum page sizes.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `default` is zero or exceeds `max`; both
    /// values are endpoint constants, so a violation is a programming error.
    #[must_use]
    pub const fn new(default: usize, max: usize) -> Self {
        debug_assert!(default > 0);
        debug_assert!(default <= max);
        Self { default, max }
    }

    /// Resolve a requested limit against this policy.
    ///
    /// `None` yields the default. Zero is treated as absent, and values above
    /// the maximum are clamped down to it.
    #[must_use]
    pub fn clamp(&self, requested: Option<usize>) -> usize {
        match requested {
            None | Some(0) => self.default,
            Some(value) => value.min(self.max),
        }
    }

    /// The default page size.
    #[must_use]
    pub const fn default_limit(&self) -> usize {
        self.default
    }

    /// The maximum page size.
    #[must_use]
    pub const fn max_limit(&self) -> usize {
        self.max
    }
}
