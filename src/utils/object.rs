//! JSON value helpers shared by templates and helpers

use serde_json::Value;

/// Get a nested property by dot-separated path
///
/// Numeric segments index into arrays.
///
/// # Example
/// ```rust,ignore
/// let data = json!({"post": {"tags": ["news", "rust"]}});
/// assert_eq!(get(&data, "post.tags.1"), Some(&json!("rust")));
/// assert_eq!(get(&data, "post.author"), None);
/// ```
pub fn get<'a>(obj: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = obj;

    for part in path.split('.') {
        match current {
            Value::Object(map) => {
                current = map.get(part)?;
            }
            Value::Array(arr) => {
                let index = part.parse::<usize>().ok()?;
                current = arr.get(index)?;
            }
            _ => return None,
        }
    }

    Some(current)
}

/// Loose truthiness used by the host platform for "is this variable set"
///
/// `null`, `false`, `0`, `0.0`, `""`, `"0"`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a value as template text: strings verbatim, `null` as nothing,
/// everything else as JSON
pub fn to_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Coerce a value to a string argument the way helpers expect
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_nested() {
        let data = json!({"post": {"title": "Hi", "tags": ["news", "rust"]}});
        assert_eq!(get(&data, "post.title"), Some(&json!("Hi")));
        assert_eq!(get(&data, "post.tags.1"), Some(&json!("rust")));
        assert_eq!(get(&data, "post.tags.x"), None);
        assert_eq!(get(&data, "post.title.length"), None);
        assert_eq!(get(&data, "missing"), None);
    }

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!("0"), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{} should be falsy", falsy);
        }
        for truthy in [json!(true), json!(1), json!(-2.5), json!("a"), json!("00"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn test_to_display() {
        assert_eq!(to_display(&json!(null)), "");
        assert_eq!(to_display(&json!("plain")), "plain");
        assert_eq!(to_display(&json!(3)), "3");
        assert_eq!(to_display(&json!([1, "a"])), r#"[1,"a"]"#);
    }

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(&json!("x")), Some("x".to_string()));
        assert_eq!(as_text(&json!(12)), Some("12".to_string()));
        assert_eq!(as_text(&json!(null)), None);
        assert_eq!(as_text(&json!({"a": 1})), None);
    }
}
