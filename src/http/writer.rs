use std::io::{self, Write};

use flate2::Compression;
use flate2::write::GzEncoder;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Headers the encoder always writes itself.
const RESERVED_HEADERS: [&str; 4] = [
    "Content-Type",
    "Connection",
    "Content-Length",
    "Content-Encoding",
];

/// Serializes `resp` to wire bytes, gzip-compressing a non-empty body when
/// `gzip` is set.
///
/// The declared Content-Length always matches the bytes that follow the
/// blank line.
pub fn encode_response(resp: &Response, gzip: bool) -> io::Result<Vec<u8>> {
    let compress = gzip && !resp.body.is_empty();
    let body = if compress {
        gzip_bytes(&resp.body)?
    } else {
        resp.body.clone()
    };

    let mut buf = Vec::with_capacity(body.len() + 256);

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Caller headers
    for (k, v) in resp.headers.iter() {
        if RESERVED_HEADERS.iter().any(|r| r.eq_ignore_ascii_case(k)) {
            continue;
        }
        write_header(&mut buf, k, v);
    }

    write_header(&mut buf, "Content-Type", &resp.content_type);
    write_header(&mut buf, "Connection", "close");
    if compress {
        write_header(&mut buf, "Content-Encoding", "gzip");
    }
    write_header(&mut buf, "Content-Length", &body.len().to_string());

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    // Body
    buf.extend_from_slice(&body);

    Ok(buf)
}

fn write_header(buf: &mut Vec<u8>, key: &str, value: &str) {
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

fn gzip_bytes(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Holds an encoded response and tracks how much of it reached the peer.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response, gzip: bool) -> io::Result<Self> {
        Ok(Self {
            buffer: encode_response(response, gzip)?,
            written: 0,
        })
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
