//! PostgreSQL-backed store implementations.

mod template_repo;
mod user_repo;

pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;

use crate::store::StoreError;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a unique-constraint violation to [`StoreError::Conflict`], passing
/// every other error through unchanged.
fn map_unique_violation(err: sqlx::Error, message: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Conflict(message.to_string());
        }
    }
    StoreError::Database(err)
}
