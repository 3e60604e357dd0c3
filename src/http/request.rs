use std::fmt;
use std::net::SocketAddr;

use crate::http::fields::{Headers, QueryParams};

/// HTTP request methods.
///
/// The server only answers GET and POST. Every other token still parses so the
/// router can reject it with 405 Method Not Allowed rather than 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit data (served like GET, body is logged)
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
    /// Any other token, already upper-cased
    Other(String),
}

impl Method {
    /// Parses a method token, upper-casing it first.
    ///
    /// ```
    /// # use lantern::http::request::Method;
    /// assert_eq!(Method::parse("get"), Method::GET);
    /// assert_eq!(Method::parse("brew"), Method::Other("BREW".to_string()));
    /// ```
    pub fn parse(token: &str) -> Self {
        let upper = token.trim().to_ascii_uppercase();
        match upper.as_str() {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "OPTIONS" => Method::OPTIONS,
            "PATCH" => Method::PATCH,
            _ => Method::Other(upper),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
            Method::Other(token) => token.as_str(),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Built once by the parser and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.)
    pub method: Method,
    /// Percent-decoded path, without the query string
    pub path: String,
    /// HTTP version token as sent (typically "HTTP/1.1")
    pub version: String,
    /// Request headers, case-insensitive
    pub headers: Headers,
    /// Decoded query string parameters
    pub query: QueryParams,
    /// Everything after the header terminator
    pub body: Vec<u8>,
    /// Peer address, for logging
    pub remote_addr: SocketAddr,
}

impl Request {
    /// Retrieves a header value by name, ignoring case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    /// Whether the client listed gzip in Accept-Encoding.
    ///
    /// This is a plain case-insensitive substring test; q-values are ignored.
    pub fn accepts_gzip(&self) -> bool {
        self.header("Accept-Encoding")
            .map(|v| v.to_ascii_lowercase().contains("gzip"))
            .unwrap_or(false)
    }

    /// The query parameters re-joined as `k=v&k=v`, decoded.
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}
