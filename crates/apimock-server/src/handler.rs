use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use apimock_store::{Entry, ResourceStore, StoreError};

use crate::error::{ServerError, ServerResult};

/// Shared state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResourceStore>,
    pub max_body_size: usize,
}

/// A stored entry written back to the client.
struct EntryResponse {
    status: StatusCode,
    location: Option<String>,
    entry: Entry,
}

impl IntoResponse for EntryResponse {
    fn into_response(self) -> Response {
        let (body, content_type) = self.entry.into_parts();
        let mut response = (self.status, body).into_response();
        let headers = response.headers_mut();

        // Serve exactly what was stored, never the octet-stream fallback.
        headers.remove(CONTENT_TYPE);
        if !content_type.is_empty() {
            match HeaderValue::from_str(&content_type) {
                Ok(value) => {
                    headers.insert(CONTENT_TYPE, value);
                }
                Err(_) => warn!(content_type = %content_type, "unrepresentable content type"),
            }
        }
        if let Some(location) = self.location {
            match HeaderValue::from_str(&location) {
                Ok(value) => {
                    headers.insert(LOCATION, value);
                }
                Err(_) => warn!(location = %location, "unrepresentable location"),
            }
        }
        response
    }
}

/// Entry point for every request: dispatch on the HTTP method.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> ServerResult<Response> {
    let path = uri.path();
    let store = state.store.as_ref();
    match method {
        Method::GET => get_resource(store, path),
        Method::PUT => {
            let body = read_body(body, state.max_body_size).await?;
            put_resource(store, path, request_content_type(&headers), body)
        }
        Method::POST => {
            let body = read_body(body, state.max_body_size).await?;
            post_resource(store, path, request_content_type(&headers), body)
        }
        Method::DELETE => delete_resource(store, path),
        Method::OPTIONS => Ok(StatusCode::NO_CONTENT.into_response()),
        other => {
            warn!(method = %other, path, "not implemented");
            Err(ServerError::NotImplemented(other.to_string()))
        }
    }
}

fn request_content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

async fn read_body(body: Body, limit: usize) -> ServerResult<Bytes> {
    axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| ServerError::BodyRead(e.to_string()))
}

fn get_resource(store: &dyn ResourceStore, path: &str) -> ServerResult<Response> {
    let entry = store
        .get(path)
        .ok_or_else(|| StoreError::NotFound(path.to_string()))?;
    Ok(EntryResponse { status: StatusCode::OK, location: None, entry }.into_response())
}

fn put_resource(
    store: &dyn ResourceStore,
    path: &str,
    content_type: &str,
    body: Bytes,
) -> ServerResult<Response> {
    let entry = store.replace(path, &mut &body[..], content_type)?;
    Ok(EntryResponse { status: StatusCode::OK, location: None, entry }.into_response())
}

fn post_resource(
    store: &dyn ResourceStore,
    path: &str,
    content_type: &str,
    body: Bytes,
) -> ServerResult<Response> {
    let created = store.create_child(path, &mut &body[..], content_type)?;
    Ok(EntryResponse {
        status: StatusCode::CREATED,
        location: Some(created.path),
        entry: created.entry,
    }
    .into_response())
}

fn delete_resource(store: &dyn ResourceStore, path: &str) -> ServerResult<Response> {
    if store.delete(path)? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(StoreError::NotFound(path.to_string()).into())
    }
}
