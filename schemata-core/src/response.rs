//! Response sink and conversion traits.

use crate::error::EncodeError;
use bytes::Bytes;
use serde::Serialize;
use std::fmt;

/// Content type of every JSON body.
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// Content type of diagnostic bodies.
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=UTF-8";

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Status(u16);

impl Status {
    /// `200 OK`
    pub const OK: Status = Status(200);
    /// `404 Not Found`
    pub const NOT_FOUND: Status = Status(404);
    /// `405 Method Not Allowed`
    pub const METHOD_NOT_ALLOWED: Status = Status(405);
    /// `500 Internal Server Error`
    pub const INTERNAL_SERVER_ERROR: Status = Status(500);
    /// `501 Not Implemented`
    pub const NOT_IMPLEMENTED: Status = Status(501);

    /// Wrap a raw status code.
    pub const fn from_u16(code: u16) -> Self {
        Self(code)
    }

    /// The numeric code.
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encode `value` as JSON, indented with two spaces when `pretty` is set.
pub fn encode_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<Bytes, EncodeError> {
    let encoded = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    Ok(Bytes::from(encoded))
}

/// What a handler writes back: status, headers, body. Written exactly once
/// per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code.
    pub status: Status,
    /// Header pairs; names are lower-case.
    pub headers: Vec<(&'static str, String)>,
    /// Body bytes.
    pub body: Bytes,
}

impl Response {
    /// A JSON response with the given body bytes.
    pub fn new(status: Status, body: Bytes) -> Self {
        Self {
            status,
            headers: vec![("content-type", CONTENT_TYPE_JSON.to_string())],
            body,
        }
    }

    /// A JSON response with an empty body.
    pub fn empty(status: Status) -> Self {
        Self::new(status, Bytes::new())
    }

    /// Encode `value` and respond with `status`.
    ///
    /// Encoding failures turn into a `500` with a diagnostic body.
    pub fn json<T: Serialize + ?Sized>(status: Status, value: &T, pretty: bool) -> Self {
        encode_json(value, pretty)
            .map(|body| Self::new(status, body))
            .into_response()
    }

    /// A plain-text diagnostic response.
    pub fn text(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("content-type", CONTENT_TYPE_TEXT.to_string())],
            body: Bytes::from(message.into()),
        }
    }

    /// Append a header.
    pub fn with_header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// First value of a header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The body as UTF-8, if it is valid UTF-8.
    pub fn body_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }
}

/// Conversion into a [`Response`].
///
/// # Default Implementations
///
/// - `Response` → As is
/// - `Status` → Empty JSON body with that status
/// - `Result<T, EncodeError>` → Delegates to `T`, or `500` with a diagnostic body
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not an `IntoResponse`",
    label = "missing `IntoResponse` implementation",
    note = "IntoResponse must implement the `into_response` method."
)]
pub trait IntoResponse {
    /// Convert into a response.
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response {
        self
    }
}

impl IntoResponse for Status {
    fn into_response(self) -> Response {
        Response::empty(self)
    }
}

impl<T: IntoResponse> IntoResponse for Result<T, EncodeError> {
    fn into_response(self) -> Response {
        match self {
            Ok(t) => t.into_response(),
            Err(e) => Response::text(
                Status::INTERNAL_SERVER_ERROR,
                format!("something went wrong marshalling: {e}"),
            ),
        }
    }
}
