//! Media HTTP Routes
//!
//! Serves stored images back under the same relative URLs the registry
//! persists in `imageF`.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};

use crate::media::{ImageStore, MediaError};

use super::animal_routes::ErrorResponse;

/// Media state shared across handlers
pub struct MediaState {
    pub images: ImageStore,
}

impl MediaState {
    pub fn new(images: ImageStore) -> Self {
        Self { images }
    }
}

/// Create media routes
pub fn media_routes(state: Arc<MediaState>) -> Router {
    Router::new()
        .route("/:name", get(serve_image_handler))
        .with_state(state)
}

fn media_error(e: MediaError) -> (StatusCode, Json<ErrorResponse>) {
    let code = e.status_code();
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(ErrorResponse::new(code, e.to_string())),
    )
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

async fn serve_image_handler(
    State(state): State<Arc<MediaState>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, HeaderMap, Bytes), (StatusCode, Json<ErrorResponse>)> {
    let data = state.images.read(&name).map_err(media_error)?;

    let mut headers = HeaderMap::new();
    if let Ok(value) = content_type_for(&name).parse() {
        headers.insert("content-type", value);
    }

    Ok((StatusCode::OK, headers, Bytes::from(data)))
}
