//! Theme configuration
//!
//! Loaded from `config.toml` in a base directory, merged with an
//! environment specific `config.dev.toml` / `config.prod.toml`, then
//! overridden by `SLEEK_*` environment variables.

use crate::error::{Error, Result};
use crate::utils::layout::DEFAULT_MAX_COLUMNS;
use crate::utils::string::DEFAULT_WORDS_PER_MINUTE;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[cfg(feature = "config")]
use std::fs;

/// Environment type for configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Get environment from string; anything unrecognised is development
    pub fn parse(env: &str) -> Self {
        match env.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    /// Short name used in environment config file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "dev",
            Environment::Production => "prod",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub views: ViewConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub reading: ReadingConfig,

    #[serde(default)]
    pub formatting: FormattingConfig,

    #[serde(default)]
    pub scanner: ScannerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_views_dir")]
    pub directory: String,

    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_max_columns")]
    pub max_columns: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingConfig {
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormattingConfig {
    #[serde(default = "default_glue")]
    pub glue: String,

    #[serde(default = "default_last_glue")]
    pub last_glue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// How much of each file is searched for header comments
    #[serde(default = "default_header_bytes")]
    pub header_bytes: usize,

    #[serde(default = "default_headers")]
    pub headers: Vec<String>,
}

fn default_views_dir() -> String {
    "templates".to_string()
}
fn default_extension() -> String {
    "html".to_string()
}
fn default_max_columns() -> i64 {
    DEFAULT_MAX_COLUMNS
}
fn default_words_per_minute() -> u64 {
    DEFAULT_WORDS_PER_MINUTE
}
fn default_glue() -> String {
    ", ".to_string()
}
fn default_last_glue() -> String {
    " & ".to_string()
}
fn default_header_bytes() -> usize {
    8 * 1024
}
fn default_headers() -> Vec<String> {
    vec!["Name".to_string(), "Description".to_string()]
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            directory: default_views_dir(),
            extension: default_extension(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_columns: default_max_columns(),
        }
    }
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            words_per_minute: default_words_per_minute(),
        }
    }
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            glue: default_glue(),
            last_glue: default_last_glue(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            header_bytes: default_header_bytes(),
            headers: default_headers(),
        }
    }
}

impl ThemeConfig {
    /// Load configuration from the current directory
    #[cfg(feature = "config")]
    pub fn load() -> Result<Self> {
        Self::load_with_base_dir(".")
    }

    /// Load `config.toml` plus the environment specific file from `base_dir`
    #[cfg(feature = "config")]
    pub fn load_with_base_dir<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        let env = Self::detect_environment();

        let base_config_path = base_dir.join("config.toml");
        let mut merged_value = if base_config_path.exists() {
            Self::load_toml_value(&base_config_path)?
        } else {
            log::debug!(
                "No config.toml in {}, using defaults",
                base_dir.display()
            );
            toml::Value::Table(toml::map::Map::new())
        };

        let env_config_path = base_dir.join(format!("config.{}.toml", env.as_str()));
        if env_config_path.exists() {
            log::debug!(
                "Loading environment-specific config from: {}",
                env_config_path.display()
            );
            let env_value = Self::load_toml_value(&env_config_path)?;
            merged_value = serde_toml_merge::merge(merged_value, env_value).map_err(|e| {
                Error::config(format!("Failed to merge configuration files: {}", e))
            })?;
        }

        let json_value = serde_json::to_value(&merged_value).map_err(|e| {
            Error::config(format!("Failed to convert merged configuration: {}", e))
        })?;
        let mut config: ThemeConfig = serde_json::from_value(json_value).map_err(|e| {
            Error::config(format!("Failed to deserialize merged configuration: {}", e))
        })?;

        config.environment = env;
        config.apply_env_overrides()?;
        config.resolve_views_directory(base_dir);
        config.validate()?;

        log::info!(
            "Configuration loaded (environment: {})",
            config.environment.as_str()
        );

        Ok(config)
    }

    /// Load configuration from a single TOML file, without layering
    ///
    /// A relative views directory is resolved against the file's directory
    /// before validation.
    #[cfg(feature = "config")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::parse_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`from_file`](Self::from_file) with `SLEEK_*` overrides applied
    /// before validation
    #[cfg(feature = "config")]
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::parse_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    #[cfg(feature = "config")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Self::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "config")]
    fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path_ref.display(),
                e
            ))
        })?;

        let mut config = Self::parse_toml(&content).map_err(|e| {
            e.with_context(format!("Invalid config file '{}'", path_ref.display()))
        })?;

        config.resolve_views_directory(path_ref.parent().unwrap_or_else(|| Path::new(".")));
        Ok(config)
    }

    #[cfg(feature = "config")]
    fn parse_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse configuration: {}", e)))
    }

    #[cfg(feature = "config")]
    fn load_toml_value<P: AsRef<Path>>(path: P) -> Result<toml::Value> {
        let path_ref = path.as_ref();
        let content = fs::read_to_string(path_ref).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path_ref.display(),
                e
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}. Check TOML syntax.",
                path_ref.display(),
                e
            ))
        })
    }

    /// Defaults with environment variable overrides applied
    pub fn from_env() -> Result<Self> {
        let mut config = ThemeConfig::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Detect current environment from `SLEEK_ENV`
    pub fn detect_environment() -> Environment {
        env::var("SLEEK_ENV")
            .map(|env| Environment::parse(&env))
            .unwrap_or_default()
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| env::var(key).ok())
    }

    /// Apply `SLEEK_*` overrides read through `lookup`
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("SLEEK_ENV") {
            self.environment = Environment::parse(&env);
        }
        if let Some(views_dir) = lookup("SLEEK_VIEWS_DIR") {
            self.views.directory = views_dir;
        }
        if let Some(max_columns) = lookup("SLEEK_MAX_COLUMNS") {
            self.layout.max_columns = max_columns
                .trim()
                .parse()
                .map_err(|_| Error::config("Invalid SLEEK_MAX_COLUMNS value"))?;
        }
        if let Some(wpm) = lookup("SLEEK_WORDS_PER_MINUTE") {
            self.reading.words_per_minute = wpm
                .trim()
                .parse()
                .map_err(|_| Error::config("Invalid SLEEK_WORDS_PER_MINUTE value"))?;
        }
        Ok(())
    }

    /// Reject values the helpers cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.layout.max_columns <= 0 {
            return Err(Error::config("layout.max_columns must be positive"));
        }
        if self.reading.words_per_minute == 0 {
            return Err(Error::config("reading.words_per_minute must be positive"));
        }
        if self.views.extension.trim().is_empty() {
            return Err(Error::config("views.extension cannot be empty"));
        }
        if self.scanner.header_bytes == 0 {
            return Err(Error::config("scanner.header_bytes must be positive"));
        }

        if !Path::new(&self.views.directory).exists() {
            log::warn!("Views directory does not exist: {}", self.views.directory);
        }

        Ok(())
    }

    /// Make a relative views directory relative to `base_dir`
    fn resolve_views_directory<P: AsRef<Path>>(&mut self, base_dir: P) {
        let views_path = Path::new(&self.views.directory);
        if views_path.is_absolute() {
            return;
        }

        let resolved = base_dir.as_ref().join(views_path);
        self.views.directory = resolved.to_string_lossy().to_string();
        log::debug!("Resolved views directory: {}", self.views.directory);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ThemeConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.views.directory, "templates");
        assert_eq!(config.views.extension, "html");
        assert_eq!(config.layout.max_columns, 4);
        assert_eq!(config.reading.words_per_minute, 200);
        assert_eq!(config.formatting.glue, ", ");
        assert_eq!(config.formatting.last_glue, " & ");
        assert_eq!(config.scanner.header_bytes, 8192);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("PROD"), Environment::Production);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert_eq!(Environment::Production.as_str(), "prod");
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_str_partial_sections() {
        let config = ThemeConfig::from_toml_str(
            r#"
            [layout]
            max_columns = 6

            [formatting]
            last_glue = " and "
            "#,
        )
        .unwrap();

        assert_eq!(config.layout.max_columns, 6);
        assert_eq!(config.formatting.last_glue, " and ");
        assert_eq!(config.formatting.glue, ", ");
        assert_eq!(config.reading.words_per_minute, 200);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml_str_rejects_invalid_values() {
        let err = ThemeConfig::from_toml_str("[layout]\nmax_columns = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = ThemeConfig::from_toml_str("[reading]\nwords_per_minute = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        assert!(ThemeConfig::from_toml_str("[layout\n").is_err());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SLEEK_ENV", "prod"),
            ("SLEEK_VIEWS_DIR", "/srv/theme/views"),
            ("SLEEK_MAX_COLUMNS", "3"),
            ("SLEEK_WORDS_PER_MINUTE", " 250 "),
        ]
        .into_iter()
        .collect();

        let mut config = ThemeConfig::default();
        config
            .apply_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert!(config.environment.is_production());
        assert_eq!(config.views.directory, "/srv/theme/views");
        assert_eq!(config.layout.max_columns, 3);
        assert_eq!(config.reading.words_per_minute, 250);
    }

    #[test]
    fn test_invalid_override() {
        let mut config = ThemeConfig::default();
        let result = config.apply_overrides_from(|key| {
            (key == "SLEEK_MAX_COLUMNS").then(|| "many".to_string())
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
