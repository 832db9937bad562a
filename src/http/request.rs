use std::fmt;

use crate::http::status::StatusCode;

/// HTTP request methods.
///
/// Only GET and POST are recognized; both are served the same way. Any other
/// token parses to `UNDEFINED`, which is answered with 405 Method Not Allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Accepted, but handled exactly like GET (no body is read)
    POST,
    /// Anything else, including a missing method token
    #[default]
    UNDEFINED,
}

/// Represents a parsed HTTP request line.
///
/// Fields the parser could not reach keep their defaults (`UNDEFINED` and
/// empty strings); [`Request::classify`] turns those into a status code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The normalized request target (e.g., "/index.html")
    pub path: String,
    /// HTTP version token (typically "HTTP/1.1")
    pub version: String,
}

impl Method {
    /// Parses a method token.
    ///
    /// Matching is case-sensitive except that the all-lowercase forms are
    /// accepted as well.
    ///
    /// # Example
    ///
    /// ```
    /// # use docroot::http::request::Method;
    /// assert_eq!(Method::from_token(b"GET"), Method::GET);
    /// assert_eq!(Method::from_token(b"post"), Method::POST);
    /// assert_eq!(Method::from_token(b"Get"), Method::UNDEFINED);
    /// ```
    pub fn from_token(token: &[u8]) -> Self {
        match token {
            b"GET" | b"get" => Method::GET,
            b"POST" | b"post" => Method::POST,
            _ => Method::UNDEFINED,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::UNDEFINED => "UNDEFINED",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Request {
    /// Checks the request against protocol minima.
    ///
    /// Returns the error status for the first failing rule, in this fixed
    /// order: undefined method (405), path not starting with `/` (400),
    /// version not starting with `HTTP/` (505). `None` means the request is
    /// good enough to resolve.
    pub fn classify(&self) -> Option<StatusCode> {
        if self.method == Method::UNDEFINED {
            return Some(StatusCode::METHOD_NOT_ALLOWED);
        }

        if !self.path.starts_with('/') {
            return Some(StatusCode::BAD_REQUEST);
        }

        if !self.version.starts_with("HTTP/") {
            return Some(StatusCode::HTTP_VERSION_NOT_SUPPORTED);
        }

        None
    }
}
