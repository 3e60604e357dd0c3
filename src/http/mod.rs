//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection,
//! Content-Length framing only, and `Connection: close` on every response.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine: framing, parsing, responding
//! - **`parser`**: Parses a framed byte buffer into a [`request::Request`]
//! - **`request`**: HTTP request representation
//! - **`fields`**: Case-insensitive map used for headers and query parameters
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes responses (optionally gzip-compressed) and writes them
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate bytes until the request is framed
//!        └──────┬──────┘
//!               │ Request framed
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Resolve against the document root
//!        └──────┬───────────┘
//!               │ Response ready (or 400 straight from Reading)
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod fields;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
