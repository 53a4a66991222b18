//! Page templates rendered with Tera
//!
//! The default templates ship embedded in the binary; a site's templates
//! directory may override any of them by name.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use tera::{Context, Tera};

const BUILTIN: &[(&str, &str)] = &[
    ("layout.html", include_str!("builtin/layout.html")),
    ("index.html", include_str!("builtin/index.html")),
    ("post.html", include_str!("builtin/post.html")),
    ("tag.html", include_str!("builtin/tag.html")),
];

/// Template renderer with the embedded default templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a renderer with the embedded templates only.
    pub fn new() -> Result<Self> {
        Self::with_overrides(None)
    }

    /// Create a renderer, overlaying same-named files from `dir` over the
    /// embedded defaults.
    pub fn with_overrides(dir: Option<&Path>) -> Result<Self> {
        let mut tera = Tera::default();

        // Page bodies arrive as already-rendered HTML fragments
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(BUILTIN.to_vec())?;

        if let Some(dir) = dir {
            for (name, _) in BUILTIN {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    tera.add_template_file(&candidate, Some(name))?;
                    tracing::debug!("Using template override {:?}", candidate);
                }
            }
        }

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with the given context. A template referencing an
    /// undefined value is an error, not a blank.
    pub fn render(&self, template_name: &str, context: &Context) -> tera::Result<String> {
        self.tera.render(template_name, context)
    }
}

/// Tera filter: strip HTML tags, keeping text content
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;
    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }
    Ok(tera::Value::String(result))
}

/// Tera filter: keep the first `n` characters
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let n = args
        .get("n")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| tera::Error::msg("truncate_chars expects an `n` argument"))?;
    let truncated: String = s.chars().take(n as usize).collect();
    Ok(tera::Value::String(truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout_block() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert(
            "site",
            &serde_json::json!({
                "title": "My Site",
                "subtitle": "",
                "description": "",
                "author": "",
                "root": "/",
            }),
        );
        context.insert(
            "post",
            &serde_json::json!({
                "title": "Hello",
                "date": "2020-06-16",
                "url": "/hello/",
                "tags": [],
                "content": "<p>Hi</p>",
            }),
        );

        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>Hi</p>"));
        assert!(html.contains("My Site"));
    }

    #[test]
    fn test_undefined_placeholder_is_an_error() {
        let mut renderer = TemplateRenderer::new().unwrap();
        renderer
            .tera
            .add_raw_template("bad.html", "{{ no_such_field }}")
            .unwrap();
        assert!(renderer.render("bad.html", &Context::new()).is_err());
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert(
            "site",
            &serde_json::json!({
                "title": "T", "subtitle": "", "description": "", "author": "", "root": "/",
            }),
        );
        context.insert("posts", &serde_json::json!([]));

        let one = renderer.render("index.html", &context).unwrap();
        let two = renderer.render("index.html", &context).unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn test_strip_html_filter() {
        let value = tera::Value::String("<p>Hello <em>world</em></p>".to_string());
        let out = strip_html_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(out, tera::Value::String("Hello world".to_string()));
    }

    #[test]
    fn test_truncate_chars_filter() {
        let value = tera::Value::String("abcdef".to_string());
        let mut args = HashMap::new();
        args.insert("n".to_string(), tera::Value::from(3u64));
        let out = truncate_chars_filter(&value, &args).unwrap();
        assert_eq!(out, tera::Value::String("abc".to_string()));
    }
}
