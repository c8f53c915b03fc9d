//! Partial templates with scoped local variables
//!
//! A theme renders pieces of a page with [`Partials::get_template_part`],
//! passing locals that are visible to the partial through [`QueryVars`]
//! and removed again once the partial has rendered.

use crate::config::ThemeConfig;
use crate::error::{Error, Result};
use crate::utils::object::is_truthy;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod engine;

pub use engine::TemplateEngine;

/// Ordered variable store shared by the partials of one request
#[derive(Debug, Clone, Default)]
pub struct QueryVars {
    vars: IndexMap<String, Value>,
}

impl QueryVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.shift_remove(name)
    }

    /// A name counts as declared only when its value is truthy
    pub fn is_declared(&self, name: &str) -> bool {
        self.vars.get(name).is_some_and(is_truthy)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.vars.iter()
    }

    /// Snapshot as a JSON object, the shape templates render against
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.vars
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl From<IndexMap<String, Value>> for QueryVars {
    fn from(vars: IndexMap<String, Value>) -> Self {
        Self { vars }
    }
}

/// Where partials come from and how they turn into markup
pub trait TemplateHost {
    /// Find the file for `slug`, preferring the `name` specialisation
    fn locate(&self, slug: &str, name: Option<&str>) -> Option<PathBuf>;

    /// Render a located file with the current variables in scope
    fn render(&self, path: &Path, vars: &QueryVars) -> Result<String>;
}

/// Template host backed by a directory of template files
#[derive(Debug, Clone)]
pub struct FileTemplateHost {
    directory: PathBuf,
    extension: String,
    engine: TemplateEngine,
}

impl FileTemplateHost {
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self::with_engine(directory, extension, TemplateEngine::new())
    }

    pub fn with_engine(
        directory: impl Into<PathBuf>,
        extension: impl Into<String>,
        engine: TemplateEngine,
    ) -> Self {
        let extension: String = extension.into();
        Self {
            directory: directory.into(),
            extension: extension.trim_start_matches('.').to_string(),
            engine,
        }
    }

    /// Host for the configured views directory, rendering with helpers
    /// configured from the same theme settings
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self::with_engine(
            &config.views.directory,
            &config.views.extension,
            TemplateEngine::from_config(config),
        )
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    fn candidate(&self, stem: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", stem, self.extension))
    }
}

impl TemplateHost for FileTemplateHost {
    fn locate(&self, slug: &str, name: Option<&str>) -> Option<PathBuf> {
        let mut candidates = Vec::with_capacity(2);
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            candidates.push(self.candidate(&format!("{}-{}", slug, name)));
        }
        candidates.push(self.candidate(slug));

        candidates.into_iter().find(|path| path.is_file())
    }

    fn render(&self, path: &Path, vars: &QueryVars) -> Result<String> {
        self.engine.render_file(path, &vars.to_value())
    }
}

/// Renders partial templates with scoped locals
///
/// # Example
/// ```rust,ignore
/// let mut partials = Partials::new(FileTemplateHost::new("templates", "html"));
/// let mut args = IndexMap::new();
/// args.insert("heading".to_string(), json!("Latest posts"));
/// let html = partials.fetch_template_part("parts/list", Some("posts"), args)?;
/// ```
#[derive(Debug)]
pub struct Partials<H: TemplateHost> {
    host: H,
    vars: QueryVars,
}

impl<H: TemplateHost> Partials<H> {
    pub fn new(host: H) -> Self {
        Self::with_vars(host, QueryVars::new())
    }

    pub fn with_vars(host: H, vars: QueryVars) -> Self {
        Self { host, vars }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn vars(&self) -> &QueryVars {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut QueryVars {
        &mut self.vars
    }

    /// Render the `slug`/`name` partial into `out` with `args` in scope
    ///
    /// Args whose name is already set to a truthy value are skipped with a
    /// warning. Every arg declared here is removed afterwards, also when
    /// rendering fails. A partial that cannot be found renders nothing.
    pub fn get_template_part<W: fmt::Write>(
        &mut self,
        out: &mut W,
        slug: &str,
        name: Option<&str>,
        args: IndexMap<String, Value>,
    ) -> Result<()> {
        let mut declared = Vec::with_capacity(args.len());
        for (key, value) in args {
            if self.vars.is_declared(&key) {
                log::warn!(
                    "get_template_part: variable '{}' is already set, not overriding it for '{}'",
                    key,
                    slug
                );
                continue;
            }
            self.vars.set(key.clone(), value);
            declared.push(key);
        }

        let rendered = self.render_part(slug, name);

        for key in &declared {
            self.vars.remove(key);
        }

        let html = rendered?;
        out.write_str(&html)
            .map_err(|e| Error::internal(format!("failed to write partial '{}': {}", slug, e)))
    }

    /// Same as [`get_template_part`](Self::get_template_part), returning the markup
    pub fn fetch_template_part(
        &mut self,
        slug: &str,
        name: Option<&str>,
        args: IndexMap<String, Value>,
    ) -> Result<String> {
        let mut out = String::new();
        self.get_template_part(&mut out, slug, name, args)?;
        Ok(out)
    }

    /// Render one template file with `args` as its only variables
    pub fn fetch(&self, path: impl AsRef<Path>, args: IndexMap<String, Value>) -> Result<String> {
        self.host.render(path.as_ref(), &QueryVars::from(args))
    }

    fn render_part(&self, slug: &str, name: Option<&str>) -> Result<String> {
        match self.host.locate(slug, name) {
            Some(path) => self.host.render(&path, &self.vars),
            None => {
                log::debug!("No template found for '{}' ({:?})", slug, name);
                Ok(String::new())
            }
        }
    }
}
