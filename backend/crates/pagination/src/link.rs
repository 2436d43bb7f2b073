//! RFC 5988 `Link` header construction for continuation URLs.

use url::Url;

use crate::Cursor;

/// Name of the query parameter carrying the continuation token.
const CURSOR_PARAM: &str = "cursor";

/// Build a `Link` header value pointing at the next page.
///
/// The continuation URL is the request URL with its `cursor` query parameter
/// replaced by the new token; other query parameters (such as `limit`) are
/// preserved so the client keeps its page size.
///
/// # Example
///
/// ```
/// use pagination::{Cursor, next_link};
/// use url::Url;
///
/// let request = Url::parse("https://api.example.test/contacts?limit=10").expect("valid url");
/// let cursor = Cursor::from_raw("abc123");
/// let header = next_link(&request, &cursor);
/// assert_eq!(
///     header,
///     "<https://api.example.test/contacts?limit=10&cursor=abc123>; rel=\"next\""
/// );
/// ```
#[must_use]
pub fn next_link(request_url: &Url, cursor: &Cursor) -> String {
    let mut next = request_url.clone();
    let retained: Vec<(String, String)> = next
        .query_pairs()
        .filter(|(name, _)| name != CURSOR_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    next.set_query(None);
    if !retained.is_empty() || !cursor.as_str().is_empty() {
        let mut pairs = next.query_pairs_mut();
        for (name, value) in &retained {
            pairs.append_pair(name, value);
        }
        pairs.append_pair(CURSOR_PARAM, cursor.as_str());
    }

    format!("<{next}>; rel=\"next\"")
}
