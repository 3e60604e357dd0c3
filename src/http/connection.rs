use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::http::parser::{declared_content_length, find_headers_end, parse_http_request};
use crate::http::request::{Method, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::site::{self, Site};

pub const READ_TIMEOUT: Duration = Duration::from_secs(5);
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(5);

const READ_CHUNK: usize = 8192;

/// One accepted client connection. Serves a single request, then closes.
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    site: Arc<Site>,
    buffer: BytesMut,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

impl Connection {
    pub fn new(stream: TcpStream, peer: SocketAddr, site: Arc<Site>) -> Self {
        Self {
            stream,
            peer,
            site,
            buffer: BytesMut::with_capacity(READ_CHUNK),
            state: ConnectionState::Reading,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        Some(raw) => self.parse(&raw)?,
                        // Peer left before sending a usable request
                        None => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = site::respond(&self.site, &req).await;
                    let gzip = self.site.enable_gzip && req.accepts_gzip();

                    tracing::debug!(
                        peer = %self.peer,
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        gzip,
                        "Responding"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response, gzip)?);
                }

                ConnectionState::Writing(mut writer) => {
                    timeout(WRITE_TIMEOUT, writer.write_to_stream(&mut self.stream))
                        .await
                        .context("write timed out")??;

                    // No keep-alive: every response ends the connection
                    let _ = self.stream.shutdown().await;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Accumulates bytes until a full request is framed.
    ///
    /// Returns `None` when the peer closed without ever completing a header
    /// section.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<BytesMut>> {
        loop {
            self.buffer.reserve(READ_CHUNK);

            let n = timeout(READ_TIMEOUT, self.stream.read_buf(&mut self.buffer))
                .await
                .context("read timed out")??;

            if n == 0 {
                // Client closed connection; use what we have
                break;
            }

            if is_complete(&self.buffer) {
                return Ok(Some(self.buffer.split()));
            }
        }

        if find_headers_end(&self.buffer).is_none() {
            return Ok(None);
        }

        Ok(Some(self.buffer.split()))
    }

    fn parse(&self, raw: &[u8]) -> anyhow::Result<ConnectionState> {
        match parse_http_request(raw, self.peer) {
            Ok(req) => {
                self.site.log.log(&request_log_line(&req));
                Ok(ConnectionState::Processing(req))
            }
            Err(e) => {
                tracing::debug!(peer = %self.peer, error = %e, "Malformed request");
                self.site
                    .log
                    .log(&format!("{} - Bad request: {}", self.peer.ip(), e));

                let writer = ResponseWriter::new(&Response::bad_request(), false)?;
                Ok(ConnectionState::Writing(writer))
            }
        }
    }
}

/// Whether `buf` holds a header section plus the declared body length.
pub fn is_complete(buf: &[u8]) -> bool {
    match find_headers_end(buf) {
        Some(end) => buf.len() - (end + 4) >= declared_content_length(&buf[..end]),
        None => false,
    }
}

/// Request log entry: `<ip> <METHOD> <path>[ ?query][ BODY=...]`.
///
/// POST bodies are included verbatim for form submissions and as base64
/// otherwise.
pub fn request_log_line(req: &Request) -> String {
    let mut line = format!("{} {} {}", req.remote_addr.ip(), req.method, req.path);

    if !req.query.is_empty() {
        line.push_str(" ?");
        line.push_str(&req.query_string());
    }

    if req.method == Method::POST && !req.body.is_empty() {
        let is_form = req
            .header("Content-Type")
            .map(|ct| {
                ct.to_ascii_lowercase()
                    .starts_with("application/x-www-form-urlencoded")
            })
            .unwrap_or(false);

        let body = if is_form {
            String::from_utf8_lossy(&req.body).into_owned()
        } else {
            STANDARD.encode(&req.body)
        };

        line.push_str(" BODY=");
        line.push_str(&body);
    }

    line
}
