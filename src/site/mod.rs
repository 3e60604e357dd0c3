//! The static site being served.
//!
//! [`Site`] bundles what every connection needs to answer a request: the
//! resolver for the document root, whether gzip is enabled, and the request
//! log. It is shared read-only across connection tasks.

pub mod handler;
pub mod resolver;

use std::io;
use std::path::Path;
use std::sync::Arc;

use crate::logger::LogSink;

pub use handler::respond;
pub use resolver::{Resolution, Resolver, StaticFile};

pub struct Site {
    pub resolver: Resolver,
    pub enable_gzip: bool,
    pub log: Arc<dyn LogSink>,
}

impl Site {
    pub fn new(web_root: impl AsRef<Path>, enable_gzip: bool, log: Arc<dyn LogSink>) -> io::Result<Self> {
        Ok(Self {
            resolver: Resolver::new(web_root)?,
            enable_gzip,
            log,
        })
    }
}
