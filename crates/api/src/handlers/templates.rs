//! Handlers for the `/templates` resource and the render download.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use letterpress_db::models::template::{Template, UpdateTemplate};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::services::{parse_template_id, TemplateDraft};
use crate::state::AppState;

/// Query parameters for `GET /templates`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Include other users' public templates. Any non-empty value other than
    /// `false` or `0` turns it on (`?public=true`, `?public=1`, `?public=yes`).
    pub public: Option<String>,
}

impl ListParams {
    pub fn include_public(&self) -> bool {
        match self.public.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(v) => !v.eq_ignore_ascii_case("false") && v != "0",
        }
    }
}

/// Request body for `POST /renderAndDownloadTemplate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub template_id: String,
}

/// GET /api/templates?public=true
pub async fn list_templates(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Template>>> {
    let templates = state.templates.list(&user.caller(), params.include_public()).await?;
    Ok(Json(templates))
}

/// GET /api/templates/{id}
pub async fn get_template(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Template>> {
    let id = parse_template_id(&id)?;
    Ok(Json(state.templates.get(&user.caller(), id).await?))
}

/// POST /api/templates
pub async fn create_template(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<TemplateDraft>,
) -> AppResult<(StatusCode, Json<Template>)> {
    let template = state.templates.create(&user.caller(), input).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

/// PUT /api/templates/{id}
pub async fn update_template(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<Json<Template>> {
    let id = parse_template_id(&id)?;
    Ok(Json(state.templates.update(&user.caller(), id, input).await?))
}

/// DELETE /api/templates/{id}
pub async fn delete_template(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = parse_template_id(&id)?;
    state.templates.delete(&user.caller(), id).await?;
    Ok(Json(MessageResponse {
        message: "Template deleted",
    }))
}

/// POST /api/renderAndDownloadTemplate
///
/// Responds with the rendered HTML as an attachment.
pub async fn render_and_download(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<RenderRequest>,
) -> AppResult<impl IntoResponse> {
    let id = parse_template_id(&input.template_id)?;
    let doc = state.templates.render_and_download(&user.caller(), id).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", doc.filename),
            ),
        ],
        doc.html,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(public: Option<&str>) -> ListParams {
        ListParams {
            public: public.map(str::to_string),
        }
    }

    #[test]
    fn public_flag_is_lenient() {
        assert!(!params(None).include_public());
        assert!(!params(Some("")).include_public());
        assert!(!params(Some("false")).include_public());
        assert!(!params(Some("0")).include_public());

        assert!(params(Some("true")).include_public());
        assert!(params(Some("1")).include_public());
        assert!(params(Some("yes")).include_public());
    }
}
