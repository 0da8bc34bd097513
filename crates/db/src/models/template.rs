//! Email template entity model and DTOs.

use letterpress_core::access::Owned;
use letterpress_core::render::TemplateFields;
use letterpress_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `templates` table.
///
/// Serialized with camelCase keys (`ownerId`, `isPublic`, ...) for the
/// browser client.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    /// Rich-text HTML fragment produced by the editor.
    pub content: String,
    /// Open key-value rendering parameters (always a JSON object).
    pub config: serde_json::Value,
    pub is_public: bool,
    /// URLs of images uploaded for this template's content.
    pub images: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Template {
    /// Borrow the fields that take part in rendering.
    pub fn fields(&self) -> TemplateFields<'_> {
        TemplateFields {
            title: &self.title,
            content: &self.content,
            config: &self.config,
        }
    }
}

impl Owned for Template {
    fn owner_id(&self) -> DbId {
        self.owner_id
    }

    fn is_public(&self) -> bool {
        self.is_public
    }
}

/// Validated input for inserting a template. The owner comes from the
/// caller identity, never from the request body.
#[derive(Debug, Clone)]
pub struct CreateTemplate {
    pub owner_id: DbId,
    pub title: String,
    pub content: String,
    pub config: serde_json::Value,
    pub is_public: bool,
    pub images: Vec<String>,
}

/// DTO for partially updating a template. Absent fields are left unchanged;
/// a present `config` replaces the stored one wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub config: Option<serde_json::Value>,
    pub is_public: Option<bool>,
    /// Replaces the stored list wholesale.
    pub images: Option<Vec<String>>,
}

impl UpdateTemplate {
    /// Apply this patch to an in-memory record.
    pub fn apply_to(&self, template: &mut Template) {
        if let Some(title) = &self.title {
            template.title = title.clone();
        }
        if let Some(content) = &self.content {
            template.content = content.clone();
        }
        if let Some(config) = &self.config {
            template.config = config.clone();
        }
        if let Some(is_public) = self.is_public {
            template.is_public = is_public;
        }
        if let Some(images) = &self.images {
            template.images = images.clone();
        }
    }
}
