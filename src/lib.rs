//! Lantern - static file server
//!
//! Serves a document root over a small hand-written HTTP/1.1 subset on raw
//! TCP, with a daily request log and optional gzip.

pub mod config;
pub mod http;
pub mod logger;
pub mod server;
pub mod site;
