use std::time::SystemTime;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

/// Serializes a response using the current time for the `Date` header.
pub fn serialize_response(resp: &Response) -> Bytes {
    serialize_response_at(resp, SystemTime::now())
}

/// Serializes a response with `now` as the `Date` header.
///
/// Header order is fixed: Date, Content-Type, Connection, Content-Length.
pub fn serialize_response_at(resp: &Response, now: SystemTime) -> Bytes {
    let status = resp.effective_status();
    let body = resp.body();

    let head = format!(
        "{} {} {}\r\n\
         Date: {}\r\n\
         Content-Type: {}\r\n\
         Connection: close\r\n\
         Content-Length: {}\r\n\
         \r\n",
        resp.version,
        status.as_u16(),
        status.reason_phrase(),
        httpdate::fmt_http_date(now),
        resp.content_type(),
        body.len(),
    );

    let mut buf = BytesMut::with_capacity(head.len() + body.len());
    buf.put_slice(head.as_bytes());
    buf.put_slice(&body);

    buf.freeze()
}

pub struct ResponseWriter {
    buffer: Bytes,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;

        Ok(())
    }
}
