//! String formatting and text analysis utilities
//!
//! Joining lists for display, stripping markup, counting words and
//! estimating reading time.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Reading speed used when the caller has no preference
pub const DEFAULT_WORDS_PER_MINUTE: u64 = 200;

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("String utils: invalid tag regex")
});
static WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z'-]*").expect("String utils: invalid word regex")
});

/// Join items with `glue`, using `last_glue` before the final item
///
/// Empty parts are dropped before the final join, so a single item is
/// returned as is and an empty list gives an empty string.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(implode_and(&["red", "green", "blue"], ", ", " & "), "red, green & blue");
/// assert_eq!(implode_and(&["red"], ", ", " & "), "red");
/// ```
pub fn implode_and<S: AsRef<str>>(items: &[S], glue: &str, last_glue: &str) -> String {
    let Some((last, rest)) = items.split_last() else {
        return String::new();
    };

    let head = rest
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(glue);

    [head.as_str(), last.as_ref()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(last_glue)
}

/// Remove HTML tags and comments from a string
///
/// Tags are replaced by a space so text from adjacent blocks does not run
/// together; whitespace is collapsed afterwards.
///
/// # Example
/// ```rust,ignore
/// assert_eq!(strip_tags("<p>Hello <strong>world</strong></p><p>Again</p>"), "Hello world Again");
/// ```
pub fn strip_tags(input: &str) -> String {
    let text = TAG.replace_all(input, " ");
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Count words the way a reader would
///
/// A word is a run of letters that may contain, but not start with, an
/// apostrophe or hyphen. Numbers are not counted.
pub fn word_count(input: &str) -> usize {
    WORD.find_iter(input).count()
}

/// Estimated reading time in whole minutes, rounded up
///
/// Markup is stripped before counting.
///
/// # Errors
/// `Error::InvalidArgument` when `words_per_minute` is zero.
///
/// # Example
/// ```rust,ignore
/// let minutes = reading_time(&post.content, DEFAULT_WORDS_PER_MINUTE)?;
/// ```
pub fn reading_time(content: &str, words_per_minute: u64) -> Result<u64> {
    if words_per_minute == 0 {
        return Err(Error::invalid_argument("words_per_minute must be positive"));
    }

    let words = word_count(&strip_tags(content)) as u64;
    Ok(words.div_ceil(words_per_minute))
}

/// Check whether a JSON value is a plain list
///
/// Arrays always are. Objects are when their keys are exactly `"0"`, `"1"`, ...
/// in insertion order. Scalars are not.
pub fn is_sequential(value: &Value) -> bool {
    match value {
        Value::Array(_) => true,
        Value::Object(map) => map
            .keys()
            .enumerate()
            .all(|(index, key)| *key == index.to_string()),
        _ => false,
    }
}
