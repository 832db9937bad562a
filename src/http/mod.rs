//! HTTP protocol implementation.
//!
//! This module implements a one-shot HTTP/1.x static file server: each
//! connection carries exactly one request and is closed after the response.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine, read limits and timeout
//! - **`parser`**: Best-effort request-line parser and framing
//! - **`request`**: Request representation and status policy
//! - **`resource`**: Resolves targets to files under the document root
//! - **`response`**: Response representation and body selection
//! - **`writer`**: Serializes and writes responses to the client
//! - **`mime`**: MIME type detection based on file extensions
//! - **`status`**: Status codes and reason phrases
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a CRLF-terminated request line
//!        └──────┬──────┘
//!               │ Request line received
//!               │ (too large / timed out → 413 / 408, skip to Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Classify, resolve file, build response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use docroot::http::connection::{Connection, ConnectionLimits};
//! use docroot::http::resource::DocumentRoot;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:12345").await?;
//!     let root = Arc::new(DocumentRoot::new("."));
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let root = root.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, root, ConnectionLimits::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod resource;
pub mod response;
pub mod status;
pub mod writer;
