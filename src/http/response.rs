use bytes::Bytes;

use crate::http::request::Request;
use crate::http::resource::{Content, DocumentRoot};
use crate::http::status::StatusCode;

/// Version used in the status line when the request did not carry a usable one.
pub const FALLBACK_VERSION: &str = "HTTP/1.1";

/// Content type of every synthesized body.
pub const HTML_CONTENT_TYPE: &str = "text/html";

/// Represents a complete HTTP response ready to be serialized.
///
/// The status decides where the body comes from: a 2xx/3xx response with
/// resolved content serves the file, anything else gets a one-line HTML
/// page naming the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP version echoed from the request
    pub version: String,
    /// The HTTP status code
    pub status: StatusCode,
    /// The resolved resource, if any
    pub content: Option<Content>,
}

impl Default for Response {
    fn default() -> Self {
        Self {
            version: FALLBACK_VERSION.to_string(),
            status: StatusCode::default(),
            content: None,
        }
    }
}

impl Response {
    /// Creates a response without content.
    ///
    /// The request's version is echoed when it has the `HTTP/<major>.<minor>`
    /// shape, otherwise [`FALLBACK_VERSION`] is used so the status line stays
    /// valid.
    pub fn new(request_version: &str, status: StatusCode) -> Self {
        let version = if is_echoable_version(request_version) {
            request_version.to_string()
        } else {
            FALLBACK_VERSION.to_string()
        };

        Self {
            version,
            status,
            content: None,
        }
    }

    /// Creates a 200 OK response serving `content`.
    pub fn ok(request_version: &str, content: Content) -> Self {
        Self {
            content: Some(content),
            ..Self::new(request_version, StatusCode::OK)
        }
    }

    /// Builds the response for a parsed request.
    ///
    /// Requests rejected by [`Request::classify`] get that status without
    /// touching the filesystem. Otherwise the target is resolved and read
    /// eagerly under `root`.
    pub async fn for_request(request: &Request, root: &DocumentRoot) -> Self {
        if let Some(status) = request.classify() {
            tracing::warn!(
                status = status.as_u16(),
                method = %request.method,
                path = %request.path,
                version = %request.version,
                "Invalid HTTP request"
            );
            return Self::new(&request.version, status);
        }

        match root.resolve(&request.path).await {
            Ok(content) => Self::ok(&request.version, content),
            Err(e) => {
                let status = e.status();
                tracing::warn!(
                    status = status.as_u16(),
                    path = %request.path,
                    error = %e,
                    "Resource not served"
                );
                Self::new(&request.version, status)
            }
        }
    }

    /// The status actually sent.
    ///
    /// A sub-400 status without content cannot be honored and is reported as
    /// 404 Not Found.
    pub fn effective_status(&self) -> StatusCode {
        if self.status.as_u16() < 400 && self.content.is_none() {
            StatusCode::NOT_FOUND
        } else {
            self.status
        }
    }

    /// The resolved content, if it is what gets sent.
    pub fn served_content(&self) -> Option<&Content> {
        if self.effective_status().serves_content() {
            self.content.as_ref()
        } else {
            None
        }
    }

    /// Value of the `Content-Type` header.
    pub fn content_type(&self) -> &'static str {
        self.served_content()
            .map(|c| c.content_type)
            .unwrap_or(HTML_CONTENT_TYPE)
    }

    /// The bytes sent after the header block.
    pub fn body(&self) -> Bytes {
        match self.served_content() {
            Some(content) => content.body.clone(),
            None => Bytes::from(html_template(self.effective_status())),
        }
    }
}

/// True for `HTTP/` followed by `digits.digits` and nothing else.
///
/// # Example
///
/// ```
/// # use docroot::http::response::is_echoable_version;
/// assert!(is_echoable_version("HTTP/1.1"));
/// assert!(!is_echoable_version("HTTP/1.1\nSet-Cookie: a=b"));
/// assert!(!is_echoable_version("HTTP/2"));
/// ```
pub fn is_echoable_version(version: &str) -> bool {
    let Some((major, minor)) = version
        .strip_prefix("HTTP/")
        .and_then(|rest| rest.split_once('.'))
    else {
        return false;
    };

    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    is_number(major) && is_number(minor)
}

/// The one-line page sent for statuses that do not serve a file.
///
/// # Example
///
/// ```
/// # use docroot::http::response::html_template;
/// # use docroot::http::status::StatusCode;
/// assert_eq!(html_template(StatusCode::NOT_FOUND), "<h1>404 Not Found</h1>");
/// ```
pub fn html_template(status: StatusCode) -> String {
    format!("<h1>{} {}</h1>", status.as_u16(), status.reason_phrase())
}
