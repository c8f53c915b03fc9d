//! Header comment scanner for theme files
//!
//! Theme templates and assets declare metadata in a comment block near the
//! top of the file:
//!
//! ```text
//! /*
//!  * Name: Two column grid
//!  * Description: Posts laid out in two columns
//!  */
//! ```
//!
//! [`scan`] collects those headers from every file matching a glob pattern.

use crate::config::ScannerConfig;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Metadata read from one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMeta {
    pub path: PathBuf,
    /// File name without extension
    pub name: String,
    /// Requested headers in request order, empty when absent
    pub headers: IndexMap<String, String>,
}

impl FileMeta {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Scan files under `dir` matching `pattern` for header comments
///
/// Only the first `header_bytes` bytes of each file are searched. Results are
/// sorted by path.
///
/// # Example
/// ```rust,ignore
/// let templates = scan("templates", "**/*.html", &["Name", "Description"], 8192)?;
/// for file in templates {
///     println!("{}: {}", file.name, file.headers["Name"]);
/// }
/// ```
pub fn scan<S: AsRef<str>>(
    dir: impl AsRef<Path>,
    pattern: &str,
    headers: &[S],
    header_bytes: usize,
) -> Result<Vec<FileMeta>> {
    let dir = dir.as_ref();
    if header_bytes == 0 {
        return Err(Error::invalid_argument("header_bytes must be positive"));
    }

    let matchers = headers
        .iter()
        .map(|h| header_regex(h.as_ref()).map(|re| (h.as_ref().to_string(), re)))
        .collect::<Result<Vec<_>>>()?;

    let full_pattern = dir.join(pattern);
    let full_pattern = full_pattern.to_string_lossy();
    log::debug!("Scanning {} for {} header(s)", full_pattern, matchers.len());

    let mut paths = Vec::new();
    for entry in glob::glob(&full_pattern)? {
        let path = entry?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let head = read_head(&path, header_bytes)
            .map_err(|e| e.with_context(format!("reading {}", path.display())))?;

        let headers = matchers
            .iter()
            .map(|(name, re)| (name.clone(), extract_header(re, &head)))
            .collect();

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        results.push(FileMeta {
            path,
            name,
            headers,
        });
    }

    log::debug!("Scanned {} file(s)", results.len());
    Ok(results)
}

/// [`scan`] with the header list and read limit from configuration
pub fn scan_with_config(
    dir: impl AsRef<Path>,
    pattern: &str,
    config: &ScannerConfig,
) -> Result<Vec<FileMeta>> {
    scan(dir, pattern, &config.headers, config.header_bytes)
}

fn header_regex(header: &str) -> Result<Regex> {
    let header = header.trim();
    if header.is_empty() {
        return Err(Error::invalid_argument("header name must not be empty"));
    }
    Ok(Regex::new(&format!(
        r"(?mi)^[ \t/*#@]*{}:(.*)$",
        regex::escape(header)
    ))?)
}

fn read_head(path: &Path, limit: usize) -> Result<String> {
    let mut buffer = Vec::with_capacity(limit.min(64 * 1024));
    File::open(path)?
        .take(limit as u64)
        .read_to_end(&mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn extract_header(re: &Regex, head: &str) -> String {
    re.captures(head)
        .and_then(|c| c.get(1))
        .map(|m| clean_header_value(m.as_str()))
        .unwrap_or_default()
}

/// Drop a closing comment or PHP tag and everything after it
fn clean_header_value(value: &str) -> String {
    let end = ["*/", "?>"]
        .iter()
        .filter_map(|marker| value.find(marker))
        .min()
        .unwrap_or(value.len());
    value[..end].trim().to_string()
}
