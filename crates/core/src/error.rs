#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The record does not exist, or the caller is not allowed to see it.
    /// Both cases share this variant so private records stay invisible.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Layout unavailable: {0}")]
    LayoutUnavailable(String),

    #[error("Template compile error: {0}")]
    TemplateCompile(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] on any displayable id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
