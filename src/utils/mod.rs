//! Theme utilities
//!
//! The building blocks are in the submodules; the `U` namespace gathers the
//! ones templates and themes call most often behind short names.
//!
//! # Usage
//! ```rust,ignore
//! use sleek_utils::U;
//!
//! let class = U::convert_case("Book review", "kebab");
//! let columns = U::optimal_col_count(10, 4)?;
//! let list = U::implode_and(&["tea", "cake", "jam"]);
//! ```

pub mod html;
pub mod inflector;
pub mod layout;
pub mod object;
pub mod string;

/// Short-name facade over the utility modules
#[allow(non_snake_case)]
pub mod U {
    use super::*;
    use crate::error::Result;
    use serde_json::Value;
    use std::string::String as StdString;

    /// String utilities namespace
    pub mod String {
        pub use super::super::string::*;
    }

    /// Case conversion namespace
    pub mod Inflector {
        pub use super::super::inflector::*;
    }

    /// Grid layout namespace
    pub mod Layout {
        pub use super::super::layout::*;
    }

    /// HTML post-processing namespace
    pub mod Html {
        pub use super::super::html::*;
    }

    /// JSON value namespace
    pub mod Object {
        pub use super::super::object::*;
    }

    /// Convert text to a named case style
    ///
    /// Unknown style names return the text unchanged.
    ///
    /// # Example
    /// ```rust,ignore
    /// assert_eq!(U::convert_case("book_review", "pascal"), "BookReview");
    /// ```
    pub fn convert_case(text: &str, style: &str) -> StdString {
        inflector::convert_case_named(text, style)
    }

    pub fn optimal_col_count(item_count: i64, max_columns: i64) -> Result<i64> {
        layout::optimal_col_count(item_count, max_columns)
    }

    /// Join with `", "` and `" & "` before the last item
    pub fn implode_and<S: AsRef<str>>(items: &[S]) -> StdString {
        string::implode_and(items, ", ", " & ")
    }

    /// Reading time in minutes at the default reading speed
    pub fn reading_time(content: &str) -> Result<u64> {
        string::reading_time(content, string::DEFAULT_WORDS_PER_MINUTE)
    }

    pub fn strip_tags(input: &str) -> StdString {
        string::strip_tags(input)
    }

    pub fn youtube_id(markup: &str) -> Option<StdString> {
        html::youtube_id(markup)
    }

    pub fn is_sequential(value: &Value) -> bool {
        string::is_sequential(value)
    }

    /// Get a nested value by dot-separated path
    pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
        object::get(value, path)
    }
}
