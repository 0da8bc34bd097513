//! Handlers backing the browser editor: the layout shell and image upload.

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// GET /api/getEmailLayout
///
/// The raw layout shell with its placeholders, for client-side preview.
pub async fn get_email_layout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let layout = state.templates.layout().await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        layout,
    ))
}

/// POST /api/uploadImage
///
/// Accepts a multipart form with a required `image` field.
pub async fn upload_image(
    user: AuthUser,
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        image = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        image.ok_or_else(|| AppError::BadRequest("Missing required 'image' field".into()))?;

    let stored = state.uploads.store_image(&filename, &data).await?;
    let host = headers.get(header::HOST).and_then(|h| h.to_str().ok());

    tracing::info!(user_id = %user.user_id, filename = %stored, "Image uploaded");
    Ok(Json(UploadResponse {
        url: state.uploads.public_url(&stored, host),
    }))
}
