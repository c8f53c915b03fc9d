//! Sleek Utils - helpers for the presentation layer of a content site
//!
//! Sleek Utils provides:
//! - Case conversion between camel, pascal, kebab, snake, title and human styles
//! - Column count selection for grid layouts
//! - Partial templates with scoped locals
//! - Reading time, list joining and small HTML rewrites
//! - Header comment scanning for theme files

// Enforce error handling best practices
#![cfg_attr(
    not(test),
    warn(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
    )
)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used,))]

pub mod config;
pub mod content;
pub mod definitions;
pub mod error;
pub mod files;
pub mod utils;
pub mod views;

// Command-line front end
#[cfg(feature = "cli")]
pub mod cli;

// Re-export main types for public API
pub use config::{Environment, ThemeConfig};
pub use content::{
    current_post_type, reading_time_for, ContentSource, ContentStore, CurrentPostType,
    MemoryContentStore, QueriedObject, QueryContext,
};
pub use definitions::{Helper, HelperRegistry};
pub use error::{Error, Result};
pub use files::{scan, FileMeta};
pub use utils::html::{add_iframe_args, add_query_args, youtube_id, ConsoleLog};
pub use utils::inflector::{convert_case, convert_case_named, CaseStyle, Inflector};
pub use utils::layout::optimal_col_count;
pub use utils::string::{implode_and, is_sequential, reading_time, strip_tags};
pub use utils::U;
pub use views::{FileTemplateHost, Partials, QueryVars, TemplateEngine, TemplateHost};

// Re-export commonly used external types
pub use indexmap::IndexMap;
pub use serde_json::{json, Value};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::*;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::json;
}
