//! docroot - static file HTTP/1.x server
//!
//! Core library: request-line parsing, status policy, document-root
//! resolution and response serialization.

pub mod config;
pub mod http;
pub mod server;
