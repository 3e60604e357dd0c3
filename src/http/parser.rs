use std::net::SocketAddr;

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::http::fields::{Headers, QueryParams};
use crate::http::request::{Method, Request};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("missing header terminator")]
    MissingTerminator,
    #[error("invalid request line")]
    InvalidRequestLine,
}

/// Parses one complete request out of `buf`.
///
/// `buf` holds the header section, the blank line and whatever body bytes the
/// connection accumulated. The body is taken verbatim and is not checked
/// against Content-Length here; framing already did that.
pub fn parse_http_request(buf: &[u8], remote_addr: SocketAddr) -> Result<Request, ParseError> {
    let headers_end = find_headers_end(buf).ok_or(ParseError::MissingTerminator)?;
    let header_text = String::from_utf8_lossy(&buf[..headers_end]);
    let body = buf[headers_end + HEADER_TERMINATOR.len()..].to_vec();

    let mut lines = header_text.split("\r\n");

    // Request line: METHOD SP TARGET SP VERSION
    let request_line = lines.next().unwrap_or_default();
    let parts: Vec<&str> = request_line.split(' ').collect();
    if parts.len() < 3 {
        return Err(ParseError::InvalidRequestLine);
    }

    let method = Method::parse(parts[0]);
    let target = parts[1].trim();
    let version = parts[2].trim().to_string();

    let headers: Headers = lines.filter_map(parse_header_line).collect();

    let (raw_path, raw_query) = match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    };

    let query = raw_query.map(parse_query).unwrap_or_default();

    Ok(Request {
        method,
        path: decode(raw_path),
        version,
        headers,
        query,
        body,
        remote_addr,
    })
}

/// Position of the first `\r\n\r\n`, if any.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

/// Content-Length declared in a raw header section.
///
/// Missing or unparsable values count as 0.
pub fn declared_content_length(header_bytes: &[u8]) -> usize {
    String::from_utf8_lossy(header_bytes)
        .split("\r\n")
        .skip(1)
        .filter_map(parse_header_line)
        .find(|(name, _)| name.eq_ignore_ascii_case("Content-Length"))
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(0)
}

/// Splits `Name: value` on the first colon.
///
/// Lines without a colon, or starting with one, are ignored.
fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    if line.trim().is_empty() {
        return None;
    }

    match line.find(':') {
        Some(colon) if colon > 0 => Some((line[..colon].trim(), line[colon + 1..].trim())),
        _ => None,
    }
}

fn parse_query(query: &str) -> QueryParams {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (decode(k), decode(v)),
            None => (decode(pair), String::new()),
        })
        .collect()
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
