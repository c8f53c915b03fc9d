//! Template helper system for view rendering
//!
//! Helpers are named functions over JSON values. Templates call them as
//! filters: `@{post.title | convert_case:"kebab"}` invokes the
//! `convert_case` helper with the title followed by `"kebab"`.

use crate::config::ThemeConfig;
use crate::error::{Error, Result};
use crate::utils::object::{as_text, to_display};
use crate::utils::{html, inflector, layout, string};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Type alias for helper function results
pub type HelperResult = Result<Value>;

/// Trait for template helper functions
pub trait Helper: Send + Sync {
    /// Execute the helper with its arguments and the template data
    fn call(&self, args: &[Value], context: Option<&Value>) -> HelperResult;

    /// Get the helper's name (for debugging)
    fn name(&self) -> &str {
        "unnamed"
    }

    /// Get the helper's description (for documentation)
    fn description(&self) -> &str {
        "No description available"
    }

    /// Validate arguments before execution
    fn validate_args(&self, _args: &[Value]) -> Result<()> {
        Ok(())
    }
}

/// Function-based helper implementation
struct FunctionHelper<F>
where
    F: Fn(&[Value], Option<&Value>) -> HelperResult + Send + Sync,
{
    func: F,
    name: String,
    description: String,
}

impl<F> Helper for FunctionHelper<F>
where
    F: Fn(&[Value], Option<&Value>) -> HelperResult + Send + Sync,
{
    fn call(&self, args: &[Value], context: Option<&Value>) -> HelperResult {
        (self.func)(args, context)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Registry for template helpers
pub struct HelperRegistry {
    helpers: HashMap<String, Arc<dyn Helper>>,
}

// Manual Debug implementation since Arc<dyn Helper> doesn't implement Debug
impl std::fmt::Debug for HelperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelperRegistry")
            .field("helper_count", &self.helpers.len())
            .field("helper_names", &self.helpers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HelperRegistry {
    /// Registry with the built-in helpers and default settings
    pub fn new() -> Self {
        Self::from_config(&ThemeConfig::default())
    }

    /// Registry whose built-in helpers take their defaults from `config`
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut registry = Self::empty();
        registry.register_builtin_helpers(config);
        registry
    }

    /// Registry without any helpers
    pub fn empty() -> Self {
        Self {
            helpers: HashMap::new(),
        }
    }

    /// Register a helper, replacing any helper with the same name
    pub fn register(&mut self, name: &str, helper: impl Helper + 'static) {
        log::debug!("Registering template helper: {}", name);
        self.helpers.insert(name.to_string(), Arc::new(helper));
    }

    /// Register a function as a helper
    pub fn register_fn<F>(&mut self, name: &str, description: &str, func: F)
    where
        F: Fn(&[Value], Option<&Value>) -> HelperResult + Send + Sync + 'static,
    {
        let helper = FunctionHelper {
            func,
            name: name.to_string(),
            description: description.to_string(),
        };
        self.register(name, helper);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Helper>> {
        self.helpers.get(name).cloned()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.helpers.contains_key(name)
    }

    pub fn count(&self) -> usize {
        self.helpers.len()
    }

    /// Registered helper names, sorted
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.helpers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Call a helper by name
    pub fn call(&self, name: &str, args: &[Value], context: Option<&Value>) -> HelperResult {
        match self.helpers.get(name) {
            Some(helper) => {
                helper.validate_args(args)?;
                helper.call(args, context)
            }
            None => Err(Error::template(format!("Helper '{}' not found", name))),
        }
    }

    fn register_builtin_helpers(&mut self, config: &ThemeConfig) {
        let max_columns = config.layout.max_columns;
        let words_per_minute = config.reading.words_per_minute;
        let glue = config.formatting.glue.clone();
        let last_glue = config.formatting.last_glue.clone();

        self.register_fn(
            "convert_case",
            "Convert text to camel, pascal, kebab, snake, title, human, singular, plural or html case",
            |args, _| {
                let text = text_arg(args, 0);
                let result = match args.get(1).and_then(Value::as_str) {
                    Some(style) => inflector::convert_case_named(&text, style),
                    None => inflector::convert_case(&text, inflector::CaseStyle::default()),
                };
                Ok(Value::String(result))
            },
        );

        self.register_fn(
            "optimal_col_count",
            "Best column count for a number of items (or a list) under a column cap",
            move |args, _| {
                let items = match args.first() {
                    Some(Value::Array(list)) => list.len() as i64,
                    Some(Value::Object(map)) => map.len() as i64,
                    Some(value) => int_arg(value, "item count")?,
                    None => 0,
                };
                let max = match args.get(1) {
                    Some(value) => int_arg(value, "column cap")?,
                    None => max_columns,
                };
                Ok(Value::from(layout::optimal_col_count(items, max)?))
            },
        );

        self.register_fn(
            "implode_and",
            "Join a list with a separate glue before the final item",
            move |args, _| {
                let items: Vec<String> = match args.first() {
                    Some(Value::Array(list)) => list.iter().map(to_display).collect(),
                    Some(Value::Null) | None => Vec::new(),
                    Some(other) => vec![to_display(other)],
                };
                let glue = args.get(1).and_then(Value::as_str).unwrap_or(&glue);
                let last_glue = args.get(2).and_then(Value::as_str).unwrap_or(&last_glue);
                Ok(Value::String(string::implode_and(&items, glue, last_glue)))
            },
        );

        self.register_fn(
            "reading_time",
            "Estimated reading time in minutes",
            move |args, _| {
                let wpm = match args.get(1) {
                    Some(value) => value.as_u64().ok_or_else(|| {
                        Error::invalid_argument("reading_time: words per minute must be a positive integer")
                    })?,
                    None => words_per_minute,
                };
                Ok(Value::from(string::reading_time(&text_arg(args, 0), wpm)?))
            },
        );

        self.register_fn("youtube_id", "Extract a YouTube video id", |args, _| {
            Ok(html::youtube_id(&text_arg(args, 0))
                .map(Value::String)
                .unwrap_or(Value::Null))
        });

        self.register_fn(
            "add_iframe_args",
            "Add query arguments and attributes to an iframe",
            |args, _| {
                let query: Vec<(String, Option<String>)> = match args.get(1) {
                    Some(Value::Object(map)) => map
                        .iter()
                        .map(|(key, value)| (key.clone(), as_text(value)))
                        .collect(),
                    _ => Vec::new(),
                };
                let attributes = text_arg(args, 2);
                Ok(Value::String(html::add_iframe_args(
                    &text_arg(args, 0),
                    &query,
                    &attributes,
                )))
            },
        );

        self.register_fn("strip_tags", "Remove HTML tags", |args, _| {
            Ok(Value::String(string::strip_tags(&text_arg(args, 0))))
        });

        self.register_fn("json", "Convert value to JSON string", |args, _| {
            let json = match args.first() {
                Some(value) => serde_json::to_string(value)?,
                None => "null".to_string(),
            };
            Ok(Value::String(json))
        });

        self.register_fn(
            "default",
            "Return default if value is null/empty",
            |args, _| {
                let fallback = args.get(1).cloned().unwrap_or(Value::Null);

                match args.first() {
                    None | Some(Value::Null) => Ok(fallback),
                    Some(Value::String(s)) if s.is_empty() => Ok(fallback),
                    Some(Value::Array(a)) if a.is_empty() => Ok(fallback),
                    Some(Value::Object(o)) if o.is_empty() => Ok(fallback),
                    Some(value) => Ok(value.clone()),
                }
            },
        );
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn text_arg(args: &[Value], index: usize) -> String {
    args.get(index).and_then(as_text).unwrap_or_default()
}

fn int_arg(value: &Value, what: &str) -> Result<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| Error::invalid_argument(format!("{} must be an integer", what))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| Error::invalid_argument(format!("{} must be an integer", what))),
        _ => Err(Error::invalid_argument(format!("{} must be an integer", what))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_helpers_registered() {
        let registry = HelperRegistry::new();
        assert_eq!(
            registry.list(),
            vec![
                "add_iframe_args",
                "convert_case",
                "default",
                "implode_and",
                "json",
                "optimal_col_count",
                "reading_time",
                "strip_tags",
                "youtube_id",
            ]
        );
        assert!(HelperRegistry::empty().list().is_empty());
    }

    #[test]
    fn test_convert_case_helper() {
        let registry = HelperRegistry::new();

        let result = registry
            .call("convert_case", &[json!("my_post_type"), json!("pascal")], None)
            .unwrap();
        assert_eq!(result, json!("MyPostType"));

        let result = registry
            .call("convert_case", &[json!("my_post_type")], None)
            .unwrap();
        assert_eq!(result, json!("myPostType"));

        let result = registry
            .call("convert_case", &[json!("my_post_type"), json!("bogus")], None)
            .unwrap();
        assert_eq!(result, json!("my_post_type"));
    }

    #[test]
    fn test_optimal_col_count_helper() {
        let registry = HelperRegistry::new();

        let result = registry
            .call("optimal_col_count", &[json!(12)], None)
            .unwrap();
        assert_eq!(result, json!(4));

        let result = registry
            .call("optimal_col_count", &[json!([1, 2, 3, 4, 5, 6, 7, 8, 9])], None)
            .unwrap();
        assert_eq!(result, json!(3));

        let result = registry
            .call("optimal_col_count", &[json!("10"), json!(2)], None)
            .unwrap();
        assert_eq!(result, json!(2));

        assert!(registry
            .call("optimal_col_count", &[json!(-4)], None)
            .is_err());
    }

    #[test]
    fn test_helpers_follow_config_defaults() {
        let mut config = ThemeConfig::default();
        config.layout.max_columns = 3;
        config.formatting.last_glue = " and ".to_string();
        let registry = HelperRegistry::from_config(&config);

        let result = registry
            .call("optimal_col_count", &[json!(12)], None)
            .unwrap();
        assert_eq!(result, json!(3));

        let result = registry
            .call("implode_and", &[json!(["tea", "cake", "jam"])], None)
            .unwrap();
        assert_eq!(result, json!("tea, cake and jam"));
    }

    #[test]
    fn test_implode_and_helper() {
        let registry = HelperRegistry::new();

        let result = registry
            .call("implode_and", &[json!(["a", 2, "c"])], None)
            .unwrap();
        assert_eq!(result, json!("a, 2 & c"));

        let result = registry
            .call("implode_and", &[json!(["a", "b"]), json!("/"), json!(" or ")], None)
            .unwrap();
        assert_eq!(result, json!("a or b"));
    }

    #[test]
    fn test_reading_time_helper() {
        let registry = HelperRegistry::new();
        let text = vec!["word"; 201].join(" ");

        let result = registry.call("reading_time", &[json!(text)], None).unwrap();
        assert_eq!(result, json!(2));

        let result = registry
            .call("reading_time", &[json!(text), json!(300)], None)
            .unwrap();
        assert_eq!(result, json!(1));

        assert!(registry
            .call("reading_time", &[json!(text), json!(0)], None)
            .is_err());
    }

    #[test]
    fn test_html_helpers() {
        let registry = HelperRegistry::new();
        let iframe = r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>"#;

        let result = registry.call("youtube_id", &[json!(iframe)], None).unwrap();
        assert_eq!(result, json!("dQw4w9WgXcQ"));

        let result = registry.call("youtube_id", &[json!("nothing")], None).unwrap();
        assert_eq!(result, Value::Null);

        let result = registry
            .call(
                "add_iframe_args",
                &[json!(iframe), json!({"rel": 0}), json!("title=\"Video\"")],
                None,
            )
            .unwrap();
        assert_eq!(
            result,
            json!(r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0" title="Video"></iframe>"#)
        );
    }

    #[test]
    fn test_default_and_json_helpers() {
        let registry = HelperRegistry::new();

        let result = registry
            .call("default", &[json!(""), json!("Untitled")], None)
            .unwrap();
        assert_eq!(result, json!("Untitled"));

        let result = registry
            .call("default", &[json!("Title"), json!("Untitled")], None)
            .unwrap();
        assert_eq!(result, json!("Title"));

        let result = registry.call("json", &[json!({"a": [1]})], None).unwrap();
        assert_eq!(result, json!(r#"{"a":[1]}"#));
    }

    #[test]
    fn test_custom_helper_and_missing_helper() {
        let mut registry = HelperRegistry::empty();
        registry.register_fn("shout", "Uppercase text", |args, _| {
            Ok(Value::String(text_arg(args, 0).to_uppercase()))
        });

        assert!(registry.exists("shout"));
        assert_eq!(registry.count(), 1);
        assert_eq!(
            registry.get("shout").map(|h| h.description().to_string()),
            Some("Uppercase text".to_string())
        );
        assert_eq!(
            registry.call("shout", &[json!("hey")], None).unwrap(),
            json!("HEY")
        );
        assert!(matches!(
            registry.call("whisper", &[], None),
            Err(Error::Template(_))
        ));
    }
}
