use docroot::http::mime::{MimeLookup, content_type_for_extension, is_text, lookup};

#[test]
fn test_common_extensions() {
    let table = [
        ("html", "text/html"),
        ("htm", "text/html"),
        ("css", "text/css"),
        ("js", "text/javascript"),
        ("json", "application/json"),
        ("png", "image/png"),
        ("jpg", "image/jpeg"),
        ("jpeg", "image/jpeg"),
        ("svg", "image/svg+xml"),
        ("txt", "text/plain"),
        ("pdf", "application/pdf"),
        ("7z", "application/x-7z-compressed"),
    ];

    for (ext, expected) in table {
        assert_eq!(content_type_for_extension(ext), Some(expected), "extension {}", ext);
    }
}

#[test]
fn test_extension_match_is_case_sensitive() {
    assert_eq!(content_type_for_extension("HTML"), None);
    assert_eq!(lookup("INDEX.HTML"), MimeLookup::Unknown("HTML"));
}

#[test]
fn test_lookup_variants() {
    assert_eq!(lookup("index.html"), MimeLookup::Found("text/html"));
    assert_eq!(lookup("data.unknownext"), MimeLookup::Unknown("unknownext"));
    assert_eq!(lookup("data"), MimeLookup::NoExtension);
    assert_eq!(lookup(""), MimeLookup::NoExtension);
}

#[test]
fn test_dotfile_extension() {
    // ".json" has an empty stem, not an empty extension
    assert_eq!(lookup(".json"), MimeLookup::Found("application/json"));
}

#[test]
fn test_is_text() {
    assert!(is_text("text/html"));
    assert!(is_text("text/css"));
    assert!(!is_text("image/png"));
    assert!(!is_text("application/json"));
}
