//! Template Service: CRUD and rendering for email templates.
//!
//! Every operation takes the [`Caller`] resolved by the auth extractor.
//! Reads go through the access guard; writes are owner-scoped inside the
//! store query, so a non-owner sees the same `NotFound` as a missing id.

use std::sync::Arc;

use letterpress_core::access::{ensure_readable, Caller};
use letterpress_core::error::CoreError;
use letterpress_core::render::{render, RENDERED_FILENAME};
use letterpress_core::types::DbId;
use letterpress_core::validation::{require, validate_config, validate_title};
use letterpress_db::models::template::{CreateTemplate, Template, UpdateTemplate};
use letterpress_db::store::TemplateStore;
use serde::Deserialize;

use crate::error::AppResult;
use crate::layout::LayoutProvider;

const ENTITY: &str = "Template";

/// Create-template request body. Required fields are checked by
/// [`TemplateService::create`] so the client gets a validation error naming
/// the missing field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub config: Option<serde_json::Value>,
    pub is_public: Option<bool>,
    /// URLs of images uploaded for this template. Defaults to empty.
    pub images: Option<Vec<String>>,
}

/// A rendered template ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub filename: &'static str,
    pub html: String,
}

/// Parse a template id from a path or body value.
///
/// An id that is not a UUID cannot name any record, so it is reported as
/// `NotFound` rather than a validation failure.
pub fn parse_template_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| CoreError::not_found(ENTITY, raw))
}

pub struct TemplateService {
    store: Arc<dyn TemplateStore>,
    layouts: Arc<dyn LayoutProvider>,
}

impl TemplateService {
    pub fn new(store: Arc<dyn TemplateStore>, layouts: Arc<dyn LayoutProvider>) -> Self {
        Self { store, layouts }
    }

    /// The caller's templates, plus all public ones when `include_public`.
    /// Store failures propagate; an empty list always means "nothing visible".
    pub async fn list(&self, caller: &Caller, include_public: bool) -> AppResult<Vec<Template>> {
        Ok(self.store.list_visible(caller.id, include_public).await?)
    }

    pub async fn get(&self, caller: &Caller, id: DbId) -> AppResult<Template> {
        let found = self.store.find_by_id(id).await?;
        Ok(ensure_readable(caller, found, ENTITY, id)?)
    }

    pub async fn create(&self, caller: &Caller, draft: TemplateDraft) -> AppResult<Template> {
        let title = require(draft.title, "title")?;
        validate_title(&title)?;
        let content = require(draft.content, "content")?;
        let config = require(draft.config, "config")?;
        validate_config(&config)?;

        let template = self
            .store
            .insert(&CreateTemplate {
                owner_id: caller.id,
                title,
                content,
                config,
                is_public: draft.is_public.unwrap_or(false),
                images: draft.images.unwrap_or_default(),
            })
            .await?;

        tracing::info!(
            template_id = %template.id,
            user_id = %caller.id,
            is_public = template.is_public,
            "Template created",
        );
        Ok(template)
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: DbId,
        patch: UpdateTemplate,
    ) -> AppResult<Template> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(config) = &patch.config {
            validate_config(config)?;
        }

        let template = self
            .store
            .update_owned(id, caller.id, &patch)
            .await?
            .ok_or_else(|| CoreError::not_found(ENTITY, id))?;

        tracing::info!(template_id = %id, user_id = %caller.id, "Template updated");
        Ok(template)
    }

    pub async fn delete(&self, caller: &Caller, id: DbId) -> AppResult<()> {
        if !self.store.delete_owned(id, caller.id).await? {
            return Err(CoreError::not_found(ENTITY, id).into());
        }
        tracing::info!(template_id = %id, user_id = %caller.id, "Template deleted");
        Ok(())
    }

    /// Render a readable template into the current layout.
    pub async fn render_and_download(
        &self,
        caller: &Caller,
        id: DbId,
    ) -> AppResult<RenderedDocument> {
        let template = self.get(caller, id).await?;
        let layout = self.layouts.get_layout().await?;
        let html = render(&layout, &template.fields())?;

        tracing::info!(template_id = %id, user_id = %caller.id, bytes = html.len(), "Template rendered");
        Ok(RenderedDocument {
            filename: RENDERED_FILENAME,
            html,
        })
    }

    /// The raw layout shell, placeholders intact.
    pub async fn layout(&self) -> AppResult<String> {
        Ok(self.layouts.get_layout().await?)
    }

    pub async fn health_check(&self) -> bool {
        self.store.health_check().await.is_ok()
    }
}
