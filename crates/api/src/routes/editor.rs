//! Route definitions backing the browser editor.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::editor;
use crate::state::AppState;

/// Editor routes, merged at the `/api` root.
///
/// ```text
/// GET  /getEmailLayout  -> get_email_layout
/// POST /uploadImage     -> upload_image (multipart, body capped at `max_upload_bytes`)
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/getEmailLayout", get(editor::get_email_layout))
        .route(
            "/uploadImage",
            post(editor::upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
