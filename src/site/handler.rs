use crate::http::mime::TEXT_HTML;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::site::Site;
use crate::site::resolver::Resolution;

/// Builds the response for a parsed request.
///
/// Only GET and POST are served; both read the mapped file. Paths that are
/// missing and paths that escape the document root get the same 404.
pub async fn respond(site: &Site, req: &Request) -> Response {
    if !matches!(req.method, Method::GET | Method::POST) {
        return Response::method_not_allowed();
    }

    site.log.log(&format!(
        "Map: path='{}' -> fullPath='{}'",
        req.path,
        site.resolver.map_path(&req.path).display()
    ));

    match site.resolver.resolve(&req.path).await {
        Resolution::Found(file) => Response::ok(file.content_type, file.body),
        Resolution::Missing(path) => {
            site.log.log(&format!("File not found: '{}'", path.display()));
            not_found(site).await
        }
        Resolution::Outside(path) => {
            site.log.log(&format!(
                "Path traversal blocked. root='{}' full='{}'",
                site.resolver.root().display(),
                path.display()
            ));
            not_found(site).await
        }
    }
}

async fn not_found(site: &Site) -> Response {
    match site.resolver.not_found_page().await {
        Some(page) => ResponseBuilder::new(StatusCode::NotFound)
            .content_type(TEXT_HTML)
            .body(page)
            .build(),
        None => Response::not_found(),
    }
}
