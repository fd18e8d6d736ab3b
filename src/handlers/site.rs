// src/handlers/site.rs

use std::path::PathBuf;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Serves extensionless "pretty" URLs from the static build,
/// so `/contato` resolves to `contato.html`.
///
/// Used as the fallback of the `ServeDir` mounted at the root; anything with
/// a dot in it, or any parent-directory segment, is a plain 404.
pub async fn pretty_url(State(root): State<PathBuf>, req: Request<Body>) -> Response {
    let path = req.uri().path().trim_matches('/');

    if path.is_empty() || path.contains('.') || path.contains('\\') {
        return StatusCode::NOT_FOUND.into_response();
    }

    let file = root.join(format!("{}.html", path));
    match ServeFile::new(file).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
