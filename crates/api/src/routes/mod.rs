pub mod auth;
pub mod editor;
pub mod health;
pub mod templates;

use axum::routing::post;
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
///
/// /templates                       list (?public=true), create
/// /templates/{id}                  get, update, delete
/// /renderAndDownloadTemplate       render to HTML attachment (POST)
///
/// /getEmailLayout                  raw layout shell (public)
/// /uploadImage                     multipart image upload (POST)
/// ```
///
/// Everything except `/auth/*` and `/getEmailLayout` requires a Bearer token.
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/templates", templates::router())
        .route(
            "/renderAndDownloadTemplate",
            post(handlers::templates::render_and_download),
        )
        .merge(editor::router(config.max_upload_bytes))
}
