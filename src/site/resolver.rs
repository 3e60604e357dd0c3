//! Maps request paths to files under the document root.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::http::mime;

const INDEX_FILE: &str = "index.html";
const NOT_FOUND_FILE: &str = "404.html";

/// A file proven to live under the document root.
#[derive(Debug, Clone)]
pub struct StaticFile {
    pub path: PathBuf,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

/// Result of resolving a request path.
///
/// `Missing` and `Outside` are answered identically; they are kept apart only
/// so the request log can tell them apart.
#[derive(Debug)]
pub enum Resolution {
    Found(StaticFile),
    Missing(PathBuf),
    Outside(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    /// Creates a resolver for `root`, made absolute and normalized.
    pub fn new(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = std::path::absolute(root.as_ref())?;
        Ok(Self {
            root: normalize(&root),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute, normalized target for a request path, without touching the
    /// file system.
    pub fn map_path(&self, request_path: &str) -> PathBuf {
        let relative = request_path.strip_prefix('/').unwrap_or(request_path);
        let relative = if relative.is_empty() { INDEX_FILE } else { relative };
        normalize(&self.root.join(relative))
    }

    /// Whether `path` is the root itself or lies beneath it.
    ///
    /// Compares the string forms case-insensitively and requires a separator
    /// right after the root prefix.
    pub fn contains(&self, path: &Path) -> bool {
        let root = self.root.to_string_lossy().to_lowercase();
        let candidate = path.to_string_lossy().to_lowercase();

        match candidate.strip_prefix(&root) {
            Some(rest) => {
                rest.is_empty()
                    || root.ends_with(std::path::MAIN_SEPARATOR)
                    || rest.starts_with(std::path::MAIN_SEPARATOR)
            }
            None => false,
        }
    }

    pub async fn resolve(&self, request_path: &str) -> Resolution {
        let mut target = self.map_path(request_path);

        if !self.contains(&target) {
            return Resolution::Outside(target);
        }

        if !is_file(&target).await && is_dir(&target).await {
            target = target.join(INDEX_FILE);
        }

        if !is_file(&target).await {
            return Resolution::Missing(target);
        }

        match tokio::fs::read(&target).await {
            Ok(body) => Resolution::Found(StaticFile {
                content_type: mime::content_type_for(&target),
                path: target,
                body,
            }),
            Err(e) => {
                tracing::warn!(path = %target.display(), error = %e, "Failed to read file");
                Resolution::Missing(target)
            }
        }
    }

    /// Contents of `<root>/404.html`, if present.
    pub async fn not_found_page(&self) -> Option<Vec<u8>> {
        let page = self.root.join(NOT_FOUND_FILE);
        if !is_file(&page).await {
            return None;
        }
        tokio::fs::read(&page).await.ok()
    }
}

/// Resolves `.` and `..` lexically. `..` never climbs above the root
/// component.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}
