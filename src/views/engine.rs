//! Placeholder template engine
//!
//! Templates are plain text with `@{...}` placeholders:
//!
//! * `@{post.title}` prints a value looked up by dotted path, HTML escaped
//! * `@{!post.content}` prints the value raw
//! * `@{post.title | convert_case:"kebab"}` pipes the value through helpers
//!
//! Helper arguments are JSON literals. A bare word that is not valid JSON is
//! looked up in the template data first and used as a plain string otherwise.
//! Missing values render as nothing.

use crate::config::ThemeConfig;
use crate::definitions::HelperRegistry;
use crate::error::{Error, Result};
use crate::utils::object::{get, to_display};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@\{(!)?\s*([^{}]*?)\s*\}").expect("Template engine: invalid placeholder regex")
});

/// Renders `@{...}` placeholders against JSON data
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    helpers: Arc<HelperRegistry>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Engine with the built-in helpers
    pub fn new() -> Self {
        Self::with_helpers(Arc::new(HelperRegistry::new()))
    }

    /// Engine whose built-in helpers use the configured columns, glue and
    /// reading speed
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self::with_helpers(Arc::new(HelperRegistry::from_config(config)))
    }

    pub fn with_helpers(helpers: Arc<HelperRegistry>) -> Self {
        Self { helpers }
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    /// Render template source against `data`
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        let mut output = String::with_capacity(template.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let (whole, raw, expression) = placeholder_parts(&caps)?;
            output.push_str(&template[last..whole.start()]);

            let value = self
                .evaluate(expression, data)
                .map_err(|e| e.with_context(format!("in placeholder '{}'", whole.as_str())))?;
            let text = to_display(&value);

            if raw {
                output.push_str(&text);
            } else {
                output.push_str(&escape_html(&text));
            }
            last = whole.end();
        }

        output.push_str(&template[last..]);
        Ok(output)
    }

    /// Read and render a template file
    pub fn render_file(&self, path: &Path, data: &Value) -> Result<String> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::template_not_found(path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?;
        log::debug!("Rendering template {}", path.display());
        self.render(&source, data)
    }

    fn evaluate(&self, expression: &str, data: &Value) -> Result<Value> {
        let mut stages = split_unquoted(expression, '|').into_iter();
        let head = stages.next().unwrap_or_default();
        let mut value = resolve(head.trim(), data);

        for stage in stages {
            let stage = stage.trim();
            let (name, raw_args) = match stage.split_once(':') {
                Some((name, args)) => (name.trim(), Some(args)),
                None => (stage, None),
            };
            if name.is_empty() {
                return Err(Error::template("empty helper name"));
            }

            let mut args = vec![value];
            if let Some(raw_args) = raw_args {
                args.extend(
                    split_unquoted(raw_args, ',')
                        .iter()
                        .map(|arg| parse_argument(arg.trim(), data)),
                );
            }

            value = self.helpers.call(name, &args, Some(data))?;
        }

        Ok(value)
    }
}

fn placeholder_parts<'t>(caps: &Captures<'t>) -> Result<(regex::Match<'t>, bool, &'t str)> {
    let whole = caps
        .get(0)
        .ok_or_else(|| Error::internal("placeholder without a match"))?;
    let raw = caps.get(1).is_some();
    let expression = caps.get(2).map_or("", |m| m.as_str());
    Ok((whole, raw, expression))
}

/// Look up a dotted path; `null` when absent
fn resolve(path: &str, data: &Value) -> Value {
    if path.is_empty() {
        return Value::Null;
    }
    get(data, path).cloned().unwrap_or(Value::Null)
}

fn parse_argument(arg: &str, data: &Value) -> Value {
    if arg.is_empty() {
        return Value::Null;
    }
    if let Ok(value) = serde_json::from_str::<Value>(arg) {
        return value;
    }
    match get(data, arg) {
        Some(value) => value.clone(),
        None => Value::String(arg.to_string()),
    }
}

/// Split on `separator` outside double-quoted strings
fn split_unquoted(input: &str, separator: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for c in input.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => {
                current.push(c);
                escaped = true;
            }
            '"' => {
                current.push(c);
                in_quotes = !in_quotes;
            }
            c if c == separator && !in_quotes => {
                parts.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    parts.push(current);
    parts
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}
