//! Resolution of request targets to files under the document root.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;

use crate::http::mime::{self, MimeLookup};
use crate::http::status::StatusCode;

/// A resolved resource: its content type and full contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub content_type: &'static str,
    pub body: Bytes,
}

/// Why a target could not be served.
#[derive(Debug)]
pub enum ResourceError {
    /// The last path segment has no extension.
    NoExtension,
    /// The extension is not in the content-type table.
    UnsupportedType(String),
    /// The target climbs out of the document root.
    Traversal,
    /// The file could not be opened or read.
    Unreadable(io::Error),
}

impl ResourceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ResourceError::NoExtension => StatusCode::FORBIDDEN,
            ResourceError::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ResourceError::Traversal => StatusCode::FORBIDDEN,
            ResourceError::Unreadable(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::NoExtension => write!(f, "missing file extension"),
            ResourceError::UnsupportedType(ext) => write!(f, "unknown file type .{}", ext),
            ResourceError::Traversal => write!(f, "path escapes the document root"),
            ResourceError::Unreadable(e) => write!(f, "reading file failed: {}", e),
        }
    }
}

impl std::error::Error for ResourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResourceError::Unreadable(e) => Some(e),
            _ => None,
        }
    }
}

/// The directory request targets are resolved against.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a normalized target (always starting with `/`) to a file path.
    pub fn file_path(&self, target: &str) -> PathBuf {
        self.root.join(target.trim_start_matches('/'))
    }

    /// Resolves `target` to a content type and reads the whole file.
    ///
    /// Checks run in order: extension present (403), extension known (415),
    /// no `..` segment (403), file readable (404).
    pub async fn resolve(&self, target: &str) -> Result<Content, ResourceError> {
        let name = target.rsplit('/').next().unwrap_or(target);

        let content_type = match mime::lookup(name) {
            MimeLookup::Found(content_type) => content_type,
            MimeLookup::Unknown(ext) => return Err(ResourceError::UnsupportedType(ext.to_string())),
            MimeLookup::NoExtension => return Err(ResourceError::NoExtension),
        };

        if target.split('/').any(|segment| segment == "..") {
            return Err(ResourceError::Traversal);
        }

        let path = self.file_path(target);
        tracing::trace!(
            path = %path.display(),
            content_type,
            text = mime::is_text(content_type),
            "Reading file"
        );

        let body = tokio::fs::read(&path)
            .await
            .map_err(ResourceError::Unreadable)?;

        Ok(Content {
            content_type,
            body: Bytes::from(body),
        })
    }
}
