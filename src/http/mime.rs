//! MIME type detection based on file extensions.

/// Outcome of looking a file name up in the extension table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeLookup<'a> {
    /// The extension is known.
    Found(&'static str),
    /// The name has an extension the server does not serve.
    Unknown(&'a str),
    /// The name has no extension at all (treated like a directory).
    NoExtension,
}

/// Maps a file extension (without the dot) to its content type.
///
/// Matching is case-sensitive: `html` is known, `HTML` is not.
pub fn content_type_for_extension(ext: &str) -> Option<&'static str> {
    let content_type = match ext {
        "bmp" => "image/bmp",
        "css" => "text/css",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "gz" => "application/gzip",
        "gif" => "image/gif",
        "htm" | "html" => "text/html",
        "ico" => "image/vnd.microsoft.icon",
        "jpeg" | "jpg" => "image/jpeg",
        "js" => "text/javascript",
        "json" => "application/json",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "mpeg" => "video/mpeg",
        "png" => "image/png",
        "pdf" => "application/pdf",
        "php" => "application/x-httpd-php",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "rar" => "application/vnd.rar",
        "sh" => "application/x-sh",
        "svg" => "image/svg+xml",
        "tar" => "application/x-tar",
        "txt" => "text/plain",
        "wav" => "audio/wav",
        "weba" | "webm" => "audio/webm",
        "webp" => "image/webp",
        "xhtml" => "application/xhtml+xml",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "zip" => "application/zip",
        "7z" => "application/x-7z-compressed",
        _ => return None,
    };
    Some(content_type)
}

/// Classifies a file name (the final path segment) by its extension.
///
/// The extension is whatever follows the last `.`; a name without a dot, or
/// ending in one, has no extension.
///
/// # Example
///
/// ```
/// # use docroot::http::mime::{lookup, MimeLookup};
/// assert_eq!(lookup("index.html"), MimeLookup::Found("text/html"));
/// assert_eq!(lookup("archive.xyz"), MimeLookup::Unknown("xyz"));
/// assert_eq!(lookup("data"), MimeLookup::NoExtension);
/// ```
pub fn lookup(name: &str) -> MimeLookup<'_> {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => match content_type_for_extension(ext) {
            Some(content_type) => MimeLookup::Found(content_type),
            None => MimeLookup::Unknown(ext),
        },
        _ => MimeLookup::NoExtension,
    }
}

/// Text types are the ones whose content type lives under `text/`.
pub fn is_text(content_type: &str) -> bool {
    content_type.starts_with("text/")
}
