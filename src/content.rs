//! Content analysis against the host platform
//!
//! The host platform owns posts and the current query. These traits expose
//! the little the theme layer needs from it: post bodies for reading time
//! and the queried object for working out which post type a page shows.

use crate::error::{Error, Result};
use crate::utils::object::{is_truthy, to_display};
use crate::utils::string;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Post type reported when a query spans several post types
pub const MIXED_POST_TYPE: &str = "__mixed";

/// Read access to post bodies
pub trait ContentStore {
    /// Raw body of the post with `id`, `None` when there is no such post
    fn post_content(&self, id: u64) -> Option<String>;
}

/// In-memory [`ContentStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    posts: HashMap<u64, String>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: u64, content: impl Into<String>) {
        self.posts.insert(id, content.into());
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl ContentStore for MemoryContentStore {
    fn post_content(&self, id: u64) -> Option<String> {
        self.posts.get(&id).cloned()
    }
}

/// Either a post to look up or text already in hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentSource {
    Id(u64),
    Text(String),
}

impl From<u64> for ContentSource {
    fn from(id: u64) -> Self {
        ContentSource::Id(id)
    }
}

impl From<&str> for ContentSource {
    fn from(text: &str) -> Self {
        ContentSource::Text(text.to_string())
    }
}

impl From<String> for ContentSource {
    fn from(text: String) -> Self {
        ContentSource::Text(text)
    }
}

/// Estimated reading time in minutes for a post or a piece of text
///
/// # Errors
/// `Error::NotFound` when `source` names a post the store does not have,
/// `Error::InvalidArgument` when `words_per_minute` is zero.
pub fn reading_time_for<S: ContentStore + ?Sized>(
    store: &S,
    source: &ContentSource,
    words_per_minute: u64,
) -> Result<u64> {
    match source {
        ContentSource::Id(id) => {
            let content = store
                .post_content(*id)
                .ok_or_else(|| Error::not_found(format!("post {}", id)))?;
            string::reading_time(&content, words_per_minute)
        }
        ContentSource::Text(text) => string::reading_time(text, words_per_minute),
    }
}

/// What the current request is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueriedObject {
    /// A post type archive
    PostType { name: String },
    /// A single post; on the blog index this is the posts page
    Post { id: u64 },
    /// A taxonomy term archive
    Term { taxonomy: String, slug: String },
    /// Anything else, including nothing at all
    Other,
}

/// Read access to the current query
pub trait QueryContext {
    fn is_singular(&self) -> bool;

    /// Post type of the current (or first) post
    fn post_type(&self) -> Option<String>;

    fn queried_object(&self) -> QueriedObject;

    fn query_var(&self, name: &str) -> Option<Value>;

    /// Post types a taxonomy is registered for, in registration order
    fn taxonomy_object_types(&self, taxonomy: &str) -> Vec<String>;
}

/// Outcome of [`current_post_type`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentPostType {
    Single(String),
    Mixed,
    Unknown,
}

impl CurrentPostType {
    /// The post type name, [`MIXED_POST_TYPE`] for mixed queries
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CurrentPostType::Single(name) => Some(name),
            CurrentPostType::Mixed => Some(MIXED_POST_TYPE),
            CurrentPostType::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CurrentPostType::Unknown)
    }
}

impl fmt::Display for CurrentPostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().unwrap_or(""))
    }
}

/// Work out which post type the current page is showing
pub fn current_post_type<Q: QueryContext + ?Sized>(ctx: &Q) -> CurrentPostType {
    if ctx.is_singular() {
        return from_name(ctx.post_type());
    }

    match ctx.queried_object() {
        QueriedObject::PostType { name } => return from_name(Some(name)),
        QueriedObject::Post { .. } => return CurrentPostType::Single("post".to_string()),
        QueriedObject::Term { taxonomy, .. } => {
            let object_types = ctx.taxonomy_object_types(&taxonomy);
            if object_types.len() > 1 {
                log::debug!(
                    "Taxonomy '{}' spans {} post types, using the first",
                    taxonomy,
                    object_types.len()
                );
            }
            return from_name(object_types.into_iter().next());
        }
        QueriedObject::Other => {}
    }

    match ctx.query_var("post_type") {
        Some(Value::Array(types)) if !types.is_empty() => CurrentPostType::Mixed,
        Some(value) if is_truthy(&value) => CurrentPostType::Single(to_display(&value)),
        _ => from_name(ctx.post_type()),
    }
}

fn from_name(name: Option<String>) -> CurrentPostType {
    match name {
        Some(name) if !name.is_empty() => CurrentPostType::Single(name),
        _ => CurrentPostType::Unknown,
    }
}
