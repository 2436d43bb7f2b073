//! Opaque cursor encoding and decoding.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while encoding or decoding a cursor.
#[derive(Debug, Error)]
pub enum CursorError {
    /// The cursor payload could not be serialised to JSON.
    #[error("cursor payload could not be serialised: {0}")]
    Serialise(#[source] serde_json::Error),
    /// The supplied token is not valid URL-safe base64.
    #[error("cursor is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    /// The decoded payload did not match the expected shape.
    #[error("cursor payload is not valid: {0}")]
    Payload(#[source] serde_json::Error),
}

/// An opaque pagination token.
///
/// The wire form is URL-safe base64 without padding over a JSON payload.
/// Clients must treat the token as a black box; only the issuing endpoint
/// understands the payload inside.
///
/// # Example
///
/// ```
/// use pagination::Cursor;
///
/// let cursor = Cursor::encode(&42_u64).expect("encodable");
/// let value: u64 = cursor.decode().expect("valid cursor");
/// assert_eq!(value, 42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    /// Encode a payload into an opaque cursor token.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Serialise`] if the payload cannot be converted
    /// to JSON. Payload types are plain data structs, so this indicates a
    /// programming error rather than bad input.
    pub fn encode<T: Serialize>(payload: &T) -> Result<Self, CursorError> {
        let json = serde_json::to_vec(payload).map_err(CursorError::Serialise)?;
        Ok(Self(URL_SAFE_NO_PAD.encode(json)))
    }

    /// Decode the cursor back into its payload.
    ///
    /// # Errors
    ///
    /// Returns [`CursorError::Encoding`] when the token is not valid base64
    /// and [`CursorError::Payload`] when the decoded bytes do not parse as
    /// the expected payload type. Both indicate a tampered or stale token.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, CursorError> {
        let bytes = URL_SAFE_NO_PAD.decode(&self.0)?;
        serde_json::from_slice(&bytes).map_err(CursorError::Payload)
    }

    /// Wrap a raw token received from a client without validating it.
    ///
    /// Validation happens on [`Cursor::decode`], keeping the error surface in
    /// one place.
    #[must_use]
    pub fn from_raw(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The wire form of the token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
