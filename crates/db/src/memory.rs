//! In-process store implementations.
//!
//! Behave like the PostgreSQL repositories (owner-scoped writes, newest-first
//! listing, unique emails) without a database. Timestamps handed out by one
//! store are strictly increasing so ordering never depends on clock ties.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use letterpress_core::types::{new_id, DbId, Timestamp};
use tokio::sync::RwLock;

use crate::models::template::{CreateTemplate, Template, UpdateTemplate};
use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, TemplateStore, UserStore};

#[derive(Debug, Default)]
struct Clock {
    last: Option<Timestamp>,
}

impl Clock {
    fn tick(&mut self) -> Timestamp {
        let now = Utc::now();
        let stamp = match self.last {
            Some(last) if now <= last => last + chrono::Duration::microseconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }
}

#[derive(Debug, Default)]
struct TemplateTable {
    rows: HashMap<DbId, Template>,
    clock: Clock,
}

/// Template store held in memory.
#[derive(Debug, Default)]
pub struct MemoryTemplateStore {
    table: RwLock<TemplateTable>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn list_visible(
        &self,
        owner_id: DbId,
        include_public: bool,
    ) -> Result<Vec<Template>, StoreError> {
        let table = self.table.read().await;
        let mut rows: Vec<Template> = table
            .rows
            .values()
            .filter(|t| t.owner_id == owner_id || (include_public && t.is_public))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Template>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, input: &CreateTemplate) -> Result<Template, StoreError> {
        let mut table = self.table.write().await;
        let now = table.clock.tick();
        let template = Template {
            id: new_id(),
            owner_id: input.owner_id,
            title: input.title.clone(),
            content: input.content.clone(),
            config: input.config.clone(),
            is_public: input.is_public,
            images: input.images.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(template.id, template.clone());
        Ok(template)
    }

    async fn update_owned(
        &self,
        id: DbId,
        owner_id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, StoreError> {
        let mut table = self.table.write().await;
        let now = table.clock.tick();
        let Some(template) = table
            .rows
            .get_mut(&id)
            .filter(|t| t.owner_id == owner_id)
        else {
            return Ok(None);
        };
        input.apply_to(template);
        template.updated_at = now;
        Ok(Some(template.clone()))
    }

    async fn delete_owned(&self, id: DbId, owner_id: DbId) -> Result<bool, StoreError> {
        let mut table = self.table.write().await;
        let owned = table.rows.get(&id).is_some_and(|t| t.owner_id == owner_id);
        if owned {
            table.rows.remove(&id);
        }
        Ok(owned)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct UserTable {
    rows: HashMap<DbId, User>,
    clock: Clock,
}

/// User store held in memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<UserTable>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.email == input.email) {
            return Err(StoreError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }
        let now = table.clock.tick();
        let user = User {
            id: new_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }
}
