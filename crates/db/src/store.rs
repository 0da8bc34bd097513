//! Store traits consumed by the API layer.
//!
//! Each call is a single atomic operation on one record (or one query for
//! lists). Owner scoping for writes lives inside the store query itself, so
//! there is no read-then-write window in callers.

use async_trait::async_trait;
use letterpress_core::types::DbId;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};
use crate::models::user::{CreateUser, User};

/// Errors raised by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness rule was violated (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Templates owned by `owner_id`, plus every public template when
    /// `include_public` is set. Newest first by `created_at`; each record
    /// appears once.
    async fn list_visible(
        &self,
        owner_id: DbId,
        include_public: bool,
    ) -> Result<Vec<Template>, StoreError>;

    /// Unscoped lookup by id. Callers apply the access guard.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Template>, StoreError>;

    /// Insert a new template, assigning `id`, `created_at` and `updated_at`.
    async fn insert(&self, input: &CreateTemplate) -> Result<Template, StoreError>;

    /// Patch the template only if it is owned by `owner_id`.
    /// Returns `None` when no owned record matches.
    async fn update_owned(
        &self,
        id: DbId,
        owner_id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, StoreError>;

    /// Delete the template only if it is owned by `owner_id`.
    /// Returns `true` if a row was removed.
    async fn delete_owned(&self, id: DbId, owner_id: DbId) -> Result<bool, StoreError>;

    /// Confirm the backing store is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. Fails with [`StoreError::Conflict`] if the email is taken.
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError>;

    /// Lookup by normalised email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
