use crate::http::request::{Method, Request};

const SP: &[u8] = b" ";
const CRLF: &[u8] = b"\r\n";

/// Framing outcome for a receive buffer that cannot be parsed yet.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// No CRLF yet, keep reading.
    Incomplete,
    /// The request line did not end within the size limit.
    TooLarge,
}

/// Parses a request line, best effort.
///
/// Tokens are read in order: method up to the first space, target up to the
/// next space, version up to CRLF. As soon as a delimiter is missing the
/// request parsed so far is returned, and an unrecognized method stops
/// parsing right away. This never fails; validity is decided later by
/// [`Request::classify`].
pub fn parse_request(buf: &[u8]) -> Request {
    let mut request = Request::default();

    let Some(method_end) = find(buf, 0, SP) else {
        return request;
    };

    request.method = Method::from_token(&buf[..method_end]);
    if request.method == Method::UNDEFINED {
        return request;
    }

    let target_start = method_end + 1;
    let Some(target_end) = find(buf, target_start, SP) else {
        return request;
    };

    request.path = normalize_target(&String::from_utf8_lossy(&buf[target_start..target_end]));

    let version_start = target_end + 1;
    let Some(version_end) = find(buf, version_start, CRLF) else {
        return request;
    };

    request.version = String::from_utf8_lossy(&buf[version_start..version_end]).into_owned();

    request
}

/// Rewrites `/` to `/index.html` and strips any trailing slashes.
///
/// # Example
///
/// ```
/// # use docroot::http::parser::normalize_target;
/// assert_eq!(normalize_target("/"), "/index.html");
/// assert_eq!(normalize_target("/a/b///"), "/a/b");
/// ```
pub fn normalize_target(raw: &str) -> String {
    if raw == "/" {
        return "/index.html".to_string();
    }

    raw.trim_end_matches('/').to_string()
}

/// Decides whether `buf` holds a complete request line.
///
/// Returns the offset just past the first CRLF. Only the first `max_len`
/// bytes are searched; a buffer that reaches `max_len` without a CRLF is
/// too large.
pub fn frame_request_line(buf: &[u8], max_len: usize) -> Result<usize, ParseError> {
    let window = &buf[..buf.len().min(max_len)];

    match find(window, 0, CRLF) {
        Some(pos) => Ok(pos + CRLF.len()),
        None if buf.len() >= max_len => Err(ParseError::TooLarge),
        None => Err(ParseError::Incomplete),
    }
}

fn find(buf: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from >= buf.len() {
        return None;
    }

    buf[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| from + pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_request(req);

        assert_eq!(parsed.method, Method::GET);
        assert_eq!(parsed.path, "/index.html");
        assert_eq!(parsed.version, "HTTP/1.1");
    }

    #[test]
    fn find_past_end_is_none() {
        assert_eq!(find(b"GET ", 4, SP), None);
        assert_eq!(find(b"", 0, SP), None);
    }
}
