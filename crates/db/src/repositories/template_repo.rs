//! Repository for the `templates` table.

use async_trait::async_trait;
use letterpress_core::types::{new_id, DbId};
use sqlx::PgPool;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};
use crate::store::{StoreError, TemplateStore};

/// Column list for `templates` queries.
const COLUMNS: &str =
    "id, owner_id, title, content, config, is_public, images, created_at, updated_at";

/// Template persistence on PostgreSQL.
#[derive(Debug, Clone)]
pub struct TemplateRepo {
    pool: PgPool,
}

impl TemplateRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateStore for TemplateRepo {
    async fn list_visible(
        &self,
        owner_id: DbId,
        include_public: bool,
    ) -> Result<Vec<Template>, StoreError> {
        let query = format!(
            "SELECT {COLUMNS} FROM templates \
             WHERE owner_id = $1 OR ($2 AND is_public) \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, Template>(&query)
            .bind(owner_id)
            .bind(include_public)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Template>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM templates WHERE id = $1");
        let row = sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, input: &CreateTemplate) -> Result<Template, StoreError> {
        let query = format!(
            "INSERT INTO templates (id, owner_id, title, content, config, is_public, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Template>(&query)
            .bind(new_id())
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.config)
            .bind(input.is_public)
            .bind(&input.images)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update_owned(
        &self,
        id: DbId,
        owner_id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, StoreError> {
        let query = format!(
            "UPDATE templates SET \
                 title = COALESCE($3, title), \
                 content = COALESCE($4, content), \
                 config = COALESCE($5, config), \
                 is_public = COALESCE($6, is_public), \
                 images = COALESCE($7, images), \
                 updated_at = now() \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.config)
            .bind(input.is_public)
            .bind(&input.images)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_owned(&self, id: DbId, owner_id: DbId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM templates WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
