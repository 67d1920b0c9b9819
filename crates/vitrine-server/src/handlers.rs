//! Request handlers: static assets by extension, everything else rendered.
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use vitrine_core::{escape_html, normalize_route};

use crate::{assets, AppState};

/// Single entry point for every request path
pub async fn serve(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    match assets::content_type(path) {
        Some(content_type) => static_file(&state, path, content_type).await,
        None => page(&state, path),
    }
}

async fn static_file(state: &AppState, path: &str, content_type: &'static str) -> Response {
    let Some(file) = assets::resolve(&state.static_root, path) else {
        return file_not_found();
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(e) => {
            tracing::debug!(path, error = %e, "static file unavailable");
            file_not_found()
        }
    }
}

fn file_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain")],
        "File not found",
    )
        .into_response()
}

fn page(state: &AppState, path: &str) -> Response {
    match state.site.render_document(path) {
        Ok(doc) => {
            // Unknown paths still get the not-found document as a page; only a
            // root with neither `/` nor `/home` registered is a real 404
            let status = if doc.is_found() || normalize_route(path) != "/" {
                StatusCode::OK
            } else {
                StatusCode::NOT_FOUND
            };
            (status, Html(doc.html)).into_response()
        }
        Err(e) => {
            tracing::error!(path, error = %e, "failed to render page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    "<h1>Error rendering page</h1><p>{}</p>",
                    escape_html(&e.to_string())
                )),
            )
                .into_response()
        }
    }
}
