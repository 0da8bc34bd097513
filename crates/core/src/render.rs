//! Layout rendering.
//!
//! A layout is an HTML document with `{{ name }}` placeholders. Rendering
//! binds a template's config entries, its content and its title into the
//! layout. Later sources win on key collisions:
//!
//! 1. every key of `config`
//! 2. `content`
//! 3. `title`
//!
//! `content` is owner-authored rich text and is inserted as raw HTML. Every
//! other value goes through HTML auto-escaping. Placeholders without a value
//! render as the empty string, including dotted lookups into missing config
//! objects and explicit `null` values. Booleans print as `true`/`false`.

use std::collections::BTreeMap;

use minijinja::value::ValueKind;
use minijinja::{
    escape_formatter, AutoEscape, Environment, Output, State, UndefinedBehavior, Value,
};

use crate::error::CoreError;

/// Suggested filename for a rendered template download.
pub const RENDERED_FILENAME: &str = "email-template.html";

/// The template fields that take part in rendering.
#[derive(Debug, Clone, Copy)]
pub struct TemplateFields<'a> {
    pub title: &'a str,
    pub content: &'a str,
    /// Expected to be a JSON object; any other shape contributes no keys.
    pub config: &'a serde_json::Value,
}

/// Render `fields` into `layout`.
///
/// Returns [`CoreError::TemplateCompile`] when the layout cannot be parsed or
/// evaluated. No partial output is ever returned.
pub fn render(layout: &str, fields: &TemplateFields<'_>) -> Result<String, CoreError> {
    let env = layout_environment();
    let template = env.template_from_str(layout).map_err(compile_error)?;
    template.render(build_context(fields)).map_err(compile_error)
}

/// Parse `layout` without rendering it.
pub fn check_layout(layout: &str) -> Result<(), CoreError> {
    let env = layout_environment();
    env.template_from_str(layout).map_err(compile_error)?;
    Ok(())
}

fn layout_environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    // Layouts are loaded from strings, so the name-based default would
    // leave escaping off.
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.set_undefined_behavior(UndefinedBehavior::Chainable);
    env.set_keep_trailing_newline(true);
    env.set_formatter(format_value);
    env
}

/// Print values the way JSON spells them: `null` and undefined as nothing,
/// booleans lowercase. Everything else goes through the escaping formatter.
fn format_value(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => Ok(()),
        ValueKind::Bool => {
            let text = if value.is_true() { "true" } else { "false" };
            escape_formatter(out, state, &Value::from(text))
        }
        _ => escape_formatter(out, state, value),
    }
}

fn build_context(fields: &TemplateFields<'_>) -> Value {
    let mut ctx: BTreeMap<String, Value> = BTreeMap::new();

    if let Some(config) = fields.config.as_object() {
        for (key, value) in config {
            ctx.insert(key.clone(), Value::from_serialize(value));
        }
    }

    ctx.insert(
        "content".to_string(),
        Value::from_safe_string(fields.content.to_string()),
    );
    ctx.insert("title".to_string(), Value::from(fields.title));

    Value::from(ctx)
}

fn compile_error(err: minijinja::Error) -> CoreError {
    CoreError::TemplateCompile(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn fields<'a>(title: &'a str, content: &'a str, config: &'a serde_json::Value) -> TemplateFields<'a> {
        TemplateFields {
            title,
            content,
            config,
        }
    }

    #[test]
    fn substitutes_title_content_and_config() {
        let config = json!({"company": "Acme"});
        let out = render(
            "<html>{{title}}{{content}}{{company}}</html>",
            &fields("Hi", "<b>x</b>", &config),
        )
        .unwrap();
        assert_eq!(out, "<html>Hi<b>x</b>Acme</html>");
    }

    #[test]
    fn config_values_are_escaped() {
        let config = json!({"company": "<i>Acme</i>"});
        let out = render("{{ company }}", &fields("t", "", &config)).unwrap();
        assert!(out.contains("&lt;i&gt;Acme"), "got {out}");
        assert!(!out.contains("<i>"));
    }

    #[test]
    fn title_is_escaped_content_is_not() {
        let config = json!({});
        let out = render(
            "{{ title }}|{{ content }}",
            &fields("<script>", "<p>raw</p>", &config),
        )
        .unwrap();
        assert!(out.starts_with("&lt;script&gt;|"), "got {out}");
        assert!(out.ends_with("|<p>raw</p>"));
    }

    #[test]
    fn missing_placeholders_render_empty() {
        let config = json!({});
        let out = render(
            "[{{ header }}][{{ style.color }}][{{ a.b.c }}]",
            &fields("t", "c", &config),
        )
        .unwrap();
        assert_eq!(out, "[][][]");
    }

    #[test]
    fn nested_and_non_string_config_values() {
        let config = json!({
            "style": {"fontSize": 14, "color": "#333333"},
            "showFooter": true
        });
        let out = render(
            "{{ style.fontSize }}px {{ style.color }} {{ showFooter }}",
            &fields("t", "c", &config),
        )
        .unwrap();
        assert_eq!(out, "14px #333333 true");
    }

    #[test]
    fn null_and_false_config_values() {
        let config = json!({"header": null, "showFooter": false, "style": {"color": null}});
        let out = render(
            "[{{ header }}][{{ showFooter }}][{{ style.color }}]",
            &fields("t", "c", &config),
        )
        .unwrap();
        assert_eq!(out, "[][false][]");
    }

    #[test]
    fn title_and_content_override_config_keys() {
        let config = json!({"title": "from config", "content": "from config"});
        let out = render("{{ title }}/{{ content }}", &fields("real", "<em>body</em>", &config))
            .unwrap();
        assert_eq!(out, "real/<em>body</em>");
    }

    #[test]
    fn non_object_config_contributes_nothing() {
        let config = json!(["not", "a", "map"]);
        let out = render("{{ title }}[{{ missing }}]", &fields("t", "", &config)).unwrap();
        assert_eq!(out, "t[]");
    }

    #[test]
    fn rendering_is_deterministic() {
        let config = json!({"b": "2", "a": "1", "z": {"y": "x"}});
        let layout = "{{ a }}{{ b }}{{ z.y }}{{ content }}";
        let first = render(layout, &fields("t", "<hr>", &config)).unwrap();
        let second = render(layout, &fields("t", "<hr>", &config)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn trailing_newline_is_preserved() {
        let config = json!({});
        let out = render("<html>{{ title }}</html>\n", &fields("t", "", &config)).unwrap();
        assert_eq!(out, "<html>t</html>\n");
    }

    #[test]
    fn malformed_layout_is_a_compile_error() {
        let config = json!({});
        let result = render("<html>{{ title </html>", &fields("t", "", &config));
        assert_matches!(result, Err(CoreError::TemplateCompile(_)));

        let result = render("{% if title %}open", &fields("t", "", &config));
        assert_matches!(result, Err(CoreError::TemplateCompile(_)));
    }

    #[test]
    fn check_layout_accepts_valid_and_rejects_broken() {
        assert!(check_layout("<p>{{ title }}</p>").is_ok());
        assert_matches!(check_layout("{{"), Err(CoreError::TemplateCompile(_)));
    }
}
