use std::convert::Infallible;
use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Request},
    response::{Html, IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::data::models::LookupError;
use crate::features::lookup::{DictionaryService, SearchOutcome};
use crate::handlers::run_blocking;
use crate::utils;

pub async fn index() -> &'static str {
    "server is running"
}

pub async fn search(
    State(service): State<Arc<DictionaryService>>,
    Path(key): Path<String>,
) -> Result<Response, LookupError> {
    respond(service, key, false).await
}

pub async fn search_recursive(
    State(service): State<Arc<DictionaryService>>,
    Path(key): Path<String>,
) -> Result<Response, LookupError> {
    respond(service, key, true).await
}

async fn respond(
    service: Arc<DictionaryService>,
    key: String,
    recursive: bool,
) -> Result<Response, LookupError> {
    if let Some((name, path)) = service.config().stylesheet() {
        if key == name {
            return Ok(serve_stylesheet(path).await);
        }
    }

    let outcome = run_blocking(&service, move |service| service.search(&key, recursive)).await?;
    Ok(match outcome {
        SearchOutcome::Html(html) => Html(html).into_response(),
        SearchOutcome::Attachment { key, data } => {
            ([(header::CONTENT_TYPE, utils::content_type_for(&key))], data).into_response()
        }
    })
}

async fn serve_stylesheet(path: &FsPath) -> Response {
    let request = Request::new(Body::empty());
    ServeFile::new(path)
        .oneshot(request)
        .await
        .map(IntoResponse::into_response)
        .unwrap_or_else(|never: Infallible| match never {})
}
