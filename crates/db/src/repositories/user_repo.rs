//! Repository for the `users` table.

use async_trait::async_trait;
use letterpress_core::types::new_id;
use sqlx::PgPool;

use super::map_unique_violation;
use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, UserStore};

/// Column list for `users` queries.
const COLUMNS: &str = "id, name, email, password_hash, created_at, updated_at";

/// User persistence on PostgreSQL.
#[derive(Debug, Clone)]
pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn create(&self, input: &CreateUser) -> Result<User, StoreError> {
        let query = format!(
            "INSERT INTO users (id, name, email, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(new_id())
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, "A user with this email already exists"))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
