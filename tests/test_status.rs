use docroot::http::status::{StatusCode, UNKNOWN_REASON_PHRASE};

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::OK.as_u16(), 200);
    assert_eq!(StatusCode::BAD_REQUEST.as_u16(), 400);
    assert_eq!(StatusCode::FORBIDDEN.as_u16(), 403);
    assert_eq!(StatusCode::NOT_FOUND.as_u16(), 404);
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED.as_u16(), 405);
    assert_eq!(StatusCode::UNSUPPORTED_MEDIA_TYPE.as_u16(), 415);
    assert_eq!(StatusCode::HTTP_VERSION_NOT_SUPPORTED.as_u16(), 505);
}

#[test]
fn test_every_emitted_status_has_a_reason_phrase() {
    let emitted = [200, 400, 403, 404, 405, 408, 413, 415, 503, 505];

    for code in emitted {
        assert!(
            StatusCode::from_u16(code).known_reason_phrase().is_some(),
            "missing reason phrase for {}",
            code
        );
    }
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::OK.reason_phrase(), "OK");
    assert_eq!(StatusCode::BAD_REQUEST.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::FORBIDDEN.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NOT_FOUND.reason_phrase(), "Not Found");
    assert_eq!(StatusCode::METHOD_NOT_ALLOWED.reason_phrase(), "Method Not Allowed");
    assert_eq!(
        StatusCode::UNSUPPORTED_MEDIA_TYPE.reason_phrase(),
        "Unsupported Media Type"
    );
    assert_eq!(
        StatusCode::HTTP_VERSION_NOT_SUPPORTED.reason_phrase(),
        "HTTP Version not supported"
    );
}

#[test]
fn test_unknown_status_uses_fallback_phrase() {
    assert_eq!(StatusCode::from_u16(299).known_reason_phrase(), None);
    assert_eq!(StatusCode::from_u16(299).reason_phrase(), UNKNOWN_REASON_PHRASE);
    assert_eq!(StatusCode::from_u16(999).reason_phrase(), UNKNOWN_REASON_PHRASE);
}

#[test]
fn test_default_status_is_503() {
    assert_eq!(StatusCode::default(), StatusCode::SERVICE_UNAVAILABLE);
}

#[test]
fn test_serves_content_range() {
    assert!(!StatusCode::from_u16(199).serves_content());
    assert!(StatusCode::OK.serves_content());
    assert!(StatusCode::from_u16(304).serves_content());
    assert!(!StatusCode::BAD_REQUEST.serves_content());
}

#[test]
fn test_status_display() {
    assert_eq!(StatusCode::NOT_FOUND.to_string(), "404 Not Found");
    assert_eq!(StatusCode::from(418).to_string(), "418 Unknown Status Code");
}
