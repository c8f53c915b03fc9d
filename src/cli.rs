//! Command-line front end for the `sleek` binary
//!
//! Every subcommand prints its result on stdout. Structured results are JSON.

use crate::config::ThemeConfig;
use crate::error::Error;
use crate::files;
use crate::utils::{inflector, layout, string};
use crate::views::{FileTemplateHost, Partials};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "sleek")]
#[command(about = "Theme-layer helpers: case conversion, column layout, partials and file headers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to config.toml layering in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert text to a case style (camel, pascal, kebab, snake, title, human, singular, plural, html)
    Case {
        style: String,
        text: String,
    },

    /// Pick a column count for a number of items
    Columns {
        items: i64,

        /// Column cap (defaults to layout.max_columns)
        #[arg(short, long)]
        max: Option<i64>,
    },

    /// Estimate reading time of a text or HTML file in minutes
    ReadingTime {
        file: PathBuf,

        /// Words per minute (defaults to reading.words_per_minute)
        #[arg(short, long)]
        wpm: Option<u64>,
    },

    /// List header comments of files under a directory
    Scan {
        dir: PathBuf,

        /// Glob pattern relative to the directory
        #[arg(short, long, default_value = "**/*")]
        pattern: String,

        /// Header to extract; repeat for several (defaults to scanner.headers)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,
    },

    /// Render a partial template from the views directory
    Render {
        slug: String,

        /// Preferred variant, tried as `{slug}-{name}` first
        #[arg(short, long)]
        name: Option<String>,

        /// Template variable as key=value; values are parsed as JSON when possible
        #[arg(short = 's', long = "set")]
        vars: Vec<String>,
    },
}

impl Cli {
    /// Load configuration for this invocation
    pub fn load_config(&self) -> crate::Result<ThemeConfig> {
        match &self.config {
            Some(path) => ThemeConfig::from_file_with_env(path),
            None => ThemeConfig::load(),
        }
    }
}

/// Run a parsed command and return what should be printed
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = cli.load_config()?;
    log::debug!("Running {:?}", cli.command);

    let output = match &cli.command {
        Commands::Case { style, text } => {
            let style: inflector::CaseStyle = style.parse()?;
            inflector::convert_case(text, style)
        }
        Commands::Columns { items, max } => {
            let max = max.unwrap_or(config.layout.max_columns);
            layout::optimal_col_count(*items, max)?.to_string()
        }
        Commands::ReadingTime { file, wpm } => {
            let content = std::fs::read_to_string(file)
                .map_err(|e| Error::Io(e).with_context(format!("reading {}", file.display())))?;
            let wpm = wpm.unwrap_or(config.reading.words_per_minute);
            string::reading_time(&content, wpm)?.to_string()
        }
        Commands::Scan {
            dir,
            pattern,
            headers,
        } => {
            let headers = if headers.is_empty() {
                &config.scanner.headers
            } else {
                headers
            };
            let found = files::scan(dir, pattern, headers, config.scanner.header_bytes)?;
            serde_json::to_string_pretty(&found)?
        }
        Commands::Render { slug, name, vars } => {
            let mut partials = Partials::new(FileTemplateHost::from_config(&config));
            let args = parse_vars(vars)?;
            partials.fetch_template_part(slug, name.as_deref(), args)?
        }
    };

    Ok(output)
}

/// Parse `key=value` pairs; values that are not JSON are taken as strings
pub fn parse_vars(pairs: &[String]) -> anyhow::Result<IndexMap<String, Value>> {
    let mut vars = IndexMap::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            anyhow::bail!("Invalid variable '{}', expected key=value", pair);
        };
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("Invalid variable '{}', key is empty", pair);
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| json!(value));
        vars.insert(key.to_string(), value);
    }
    Ok(vars)
}
