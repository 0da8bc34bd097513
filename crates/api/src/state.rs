use std::sync::Arc;

use letterpress_db::store::UserStore;

use crate::config::ServerConfig;
use crate::services::TemplateService;
use crate::uploads::UploadStorage;

/// Shared application state, available to all handlers via Axum's `State` extractor.
///
/// Cheap to clone: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub users: Arc<dyn UserStore>,
    pub templates: Arc<TemplateService>,
    pub uploads: Arc<UploadStorage>,
}
