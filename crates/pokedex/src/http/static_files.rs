//! Static file fallback for everything outside the API.

use std::path::{Component, Path, PathBuf};

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::{ApiError, AppState};

const INDEX_FILE: &str = "index.html";

/// Serve `GET`/`HEAD` requests from the public directory.
pub async fn serve_static(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "method not allowed").into_response();
    }

    let Some(path) = resolve(state.public_dir(), uri.path()) else {
        return ApiError::not_found("not found").into_response();
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            debug!(path = %path.display(), "Serving static file");
            ([(CONTENT_TYPE, content_type(&path))], bytes).into_response()
        }
        Err(_) => ApiError::not_found("not found").into_response(),
    }
}

/// Map a request path onto a file below `root`.
///
/// Returns `None` for paths that try to leave `root`.
fn resolve(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let mut path = root.to_path_buf();

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if relative.is_empty() || relative.ends_with('/') {
        path.push(INDEX_FILE);
    }

    Some(path)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") | Some("mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_index() {
        let root = Path::new("/srv/public");
        assert_eq!(resolve(root, "/"), Some(root.join("index.html")));
        assert_eq!(
            resolve(root, "/sprites/"),
            Some(root.join("sprites").join("index.html"))
        );
    }

    #[test]
    fn nested_file() {
        let root = Path::new("/srv/public");
        assert_eq!(
            resolve(root, "/js/app.js"),
            Some(root.join("js").join("app.js"))
        );
    }

    #[test]
    fn parent_dir_is_rejected() {
        assert_eq!(resolve(Path::new("/srv/public"), "/../etc/passwd"), None);
        assert_eq!(resolve(Path::new("/srv/public"), "/a/../../b"), None);
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(content_type(Path::new("app.js")), "text/javascript; charset=utf-8");
        assert_eq!(content_type(Path::new("blob")), "application/octet-stream");
    }
}
