use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::{MAX_LINE, ServerConfig};
use crate::http::parser::{ParseError, frame_request_line, parse_request};
use crate::http::request::Request;
use crate::http::resource::DocumentRoot;
use crate::http::response::{FALLBACK_VERSION, Response};
use crate::http::status::StatusCode;
use crate::http::writer::ResponseWriter;

/// Bytes requested from the socket per read.
const READ_CHUNK: usize = MAX_LINE - 1;

/// Unread request bytes discarded after the response, at most.
pub const DRAIN_LIMIT: usize = 64 * 1024;
/// How long to keep discarding unread request bytes after the response.
pub const DRAIN_TIMEOUT: Duration = Duration::from_millis(100);

/// Per-connection read limits.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub max_request_bytes: usize,
    pub read_timeout: Option<Duration>,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for ConnectionLimits {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            max_request_bytes: cfg.max_request_bytes,
            read_timeout: cfg.read_timeout(),
        }
    }
}

/// A request that was refused before it could be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// No CRLF within the size limit.
    TooLarge,
    /// The request line did not arrive in time.
    TimedOut,
}

impl ReadError {
    pub fn status(&self) -> StatusCode {
        match self {
            ReadError::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ReadError::TimedOut => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::TooLarge => write!(f, "request line exceeds size limit"),
            ReadError::TimedOut => write!(f, "timed out waiting for request line"),
        }
    }
}

impl std::error::Error for ReadError {}

/// What the read phase produced.
#[derive(Debug)]
pub enum ReadOutcome {
    Request(Request),
    Rejected(ReadError),
    /// The peer closed without sending anything.
    Closed,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// One request/response cycle over a stream, then close.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    root: Arc<DocumentRoot>,
    limits: ConnectionLimits,
    state: ConnectionState,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, root: Arc<DocumentRoot>, limits: ConnectionLimits) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            root,
            limits,
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        ReadOutcome::Request(req) => ConnectionState::Processing(req),
                        ReadOutcome::Rejected(e) => {
                            tracing::warn!(status = e.status().as_u16(), error = %e, "Request rejected");
                            let response = Response::new(FALLBACK_VERSION, e.status());
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                        ReadOutcome::Closed => {
                            tracing::debug!("Connection closed before any request data");
                            ConnectionState::Closed
                        }
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = Response::for_request(&req, &self.root).await;
                    let writer = ResponseWriter::new(&response);

                    tracing::info!(
                        status = response.effective_status().as_u16(),
                        method = %req.method,
                        path = %req.path,
                        bytes = writer.len(),
                        "Response ready"
                    );

                    self.state = ConnectionState::Writing(writer);
                }

                ConnectionState::Writing(mut writer) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }

                    // Closing with unread input pending resets the socket,
                    // which can discard the response on the client side.
                    let drained = self.drain_unread().await;
                    tracing::trace!(drained, "Discarded unread request bytes");
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until the buffer holds a complete request line, the size limit
    /// is hit, the timeout expires or the peer closes.
    pub async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        match self.limits.read_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.fill_request_line()).await {
                Ok(outcome) => outcome,
                Err(_) => Ok(ReadOutcome::Rejected(ReadError::TimedOut)),
            },
            None => self.fill_request_line().await,
        }
    }

    async fn fill_request_line(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            match frame_request_line(&self.buffer, self.limits.max_request_bytes) {
                Ok(end) => return Ok(ReadOutcome::Request(parse_request(&self.buffer[..end]))),
                Err(ParseError::TooLarge) => return Ok(ReadOutcome::Rejected(ReadError::TooLarge)),
                Err(ParseError::Incomplete) => {}
            }

            self.buffer.reserve(READ_CHUNK);
            let n = self
                .stream
                .read_buf(&mut self.buffer)
                .await
                .context("failed to read request")?;

            if n == 0 {
                if self.buffer.is_empty() {
                    return Ok(ReadOutcome::Closed);
                }

                // Peer half-closed mid-line; parse what arrived.
                tracing::debug!(buffered = self.buffer.len(), "Peer closed before CRLF");
                return Ok(ReadOutcome::Request(parse_request(&self.buffer)));
            }

            tracing::trace!(read = n, buffered = self.buffer.len(), "Read request bytes");
        }
    }

    /// Reads and discards whatever the peer still sends, up to
    /// [`DRAIN_LIMIT`] bytes or [`DRAIN_TIMEOUT`], whichever comes first.
    /// Returns the number of bytes discarded.
    pub async fn drain_unread(&mut self) -> usize {
        let mut drained = 0;
        let mut chunk = [0u8; 1024];

        let drain = async {
            while drained < DRAIN_LIMIT {
                match self.stream.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => drained += n,
                }
            }
        };
        let _ = tokio::time::timeout(DRAIN_TIMEOUT, drain).await;

        drained
    }
}
