//! Extension points for templates
//!
//! Built-in and user-registered template helpers live in [`helpers`].

pub mod helpers;

pub use helpers::{Helper, HelperRegistry, HelperResult};
