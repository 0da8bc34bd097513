//! Layout Provider: supplies the HTML shell templates are rendered into.

use std::path::PathBuf;

use async_trait::async_trait;
use letterpress_core::error::CoreError;

/// Source of the email layout shell.
#[async_trait]
pub trait LayoutProvider: Send + Sync {
    /// Return the layout HTML, or [`CoreError::LayoutUnavailable`].
    async fn get_layout(&self) -> Result<String, CoreError>;
}

/// Reads the layout from disk on every call, so edits take effect without a
/// restart.
#[derive(Debug, Clone)]
pub struct FileLayoutProvider {
    path: PathBuf,
}

impl FileLayoutProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LayoutProvider for FileLayoutProvider {
    async fn get_layout(&self) -> Result<String, CoreError> {
        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to read email layout");
            CoreError::LayoutUnavailable(format!("{}: {e}", self.path.display()))
        })
    }
}

/// Holds a fixed layout in memory.
#[derive(Debug, Clone)]
pub struct StaticLayoutProvider {
    layout: String,
}

impl StaticLayoutProvider {
    pub fn new(layout: impl Into<String>) -> Self {
        Self {
            layout: layout.into(),
        }
    }

    /// The default layout shipped in `templates/layout.html`.
    pub fn bundled() -> Self {
        Self::new(include_str!("../../../templates/layout.html"))
    }
}

#[async_trait]
impl LayoutProvider for StaticLayoutProvider {
    async fn get_layout(&self) -> Result<String, CoreError> {
        Ok(self.layout.clone())
    }
}
