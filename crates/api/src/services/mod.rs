//! Application services composing the store, access guard and renderer.

pub mod template_service;

pub use template_service::{parse_template_id, RenderedDocument, TemplateDraft, TemplateService};
