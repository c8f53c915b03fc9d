//! HTML post-processing helpers
//!
//! Small rewrites applied to markup produced elsewhere, mostly oEmbed
//! iframes: adding query arguments and attributes, pulling out a video id,
//! and emitting `console.log` snippets for page footers.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static IFRAME_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"src="(.+?)""#).expect("HTML utils: invalid iframe src regex"));
static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\.be/|/embed/|/v/|/watch\?v=)([A-Za-z0-9_-]{5,11})")
        .expect("HTML utils: invalid YouTube id regex")
});

const IFRAME_CLOSE: &str = "></iframe>";

/// Merge query arguments into a URL
///
/// Existing keys are replaced in place, new keys are appended in order and a
/// `None` value removes the key. New values are URL encoded; the fragment is
/// kept. Works on absolute, relative and protocol-relative URLs.
///
/// # Example
/// ```rust,ignore
/// let url = add_query_args("//youtube.com/embed/abc?feature=oembed", &[("autoplay", Some("1"))]);
/// assert_eq!(url, "//youtube.com/embed/abc?feature=oembed&autoplay=1");
/// ```
pub fn add_query_args<K, V>(url: &str, args: &[(K, Option<V>)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let (without_fragment, fragment) = match url.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (url, None),
    };
    let (base, query) = match without_fragment.split_once('?') {
        Some((base, query)) => (base, query),
        None => (without_fragment, ""),
    };

    let mut params: IndexMap<String, Option<String>> = IndexMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        match pair.split_once('=') {
            Some((key, value)) => params.insert(key.to_string(), Some(value.to_string())),
            None => params.insert(pair.to_string(), None),
        };
    }

    for (key, value) in args {
        let key = key.as_ref();
        match value {
            Some(value) => {
                params.insert(
                    key.to_string(),
                    Some(urlencoding::encode(value.as_ref()).into_owned()),
                );
            }
            None => {
                params.shift_remove(key);
            }
        }
    }

    let mut result = base.to_string();
    if !params.is_empty() {
        let query = params
            .iter()
            .map(|(key, value)| match value {
                Some(value) => format!("{}={}", key, value),
                None => key.clone(),
            })
            .collect::<Vec<String>>()
            .join("&");
        result.push('?');
        result.push_str(&query);
    }
    if let Some(fragment) = fragment {
        result.push('#');
        result.push_str(fragment);
    }

    result
}

/// Add query arguments to an iframe's `src` and extra attributes to the element
///
/// Markup without a `src` attribute only gets the attributes. An empty
/// `attributes` string leaves the element untouched.
///
/// # Example
/// ```rust,ignore
/// let iframe = add_iframe_args(&embed, &[("rel", Some("0"))], r#"class="video""#);
/// ```
pub fn add_iframe_args<K, V>(iframe: &str, args: &[(K, Option<V>)], attributes: &str) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut html = iframe.to_string();

    if let Some(src) = IFRAME_SRC.captures(iframe).and_then(|c| c.get(1)) {
        let new_src = add_query_args(src.as_str(), args);
        html.replace_range(src.range(), &new_src);
    } else if !args.is_empty() {
        log::debug!("add_iframe_args: no src attribute found, skipping query args");
    }

    let attributes = attributes.trim();
    if !attributes.is_empty() {
        html = html.replace(IFRAME_CLOSE, &format!(" {}{}", attributes, IFRAME_CLOSE));
    }

    html
}

/// Extract a YouTube video id from an embed code or URL
///
/// # Example
/// ```rust,ignore
/// let id = youtube_id(r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ"></iframe>"#);
/// assert_eq!(id.as_deref(), Some("dQw4w9WgXcQ"));
/// ```
pub fn youtube_id(html: &str) -> Option<String> {
    YOUTUBE_ID
        .captures(html)
        .and_then(|c| c.get(2))
        .map(|m| m.as_str().to_string())
}

/// Render a `<script>` tag that logs `data` to the browser console
pub fn console_log_script(data: &Value) -> String {
    // `</` would close the script element early
    let payload = data.to_string().replace("</", "<\\/");
    format!("<script>console.log({})</script>", payload)
}

/// Queue of values to log in the browser console when the page footer renders
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    entries: Vec<Value>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a value for the footer
    pub fn log(&mut self, data: impl Into<Value>) {
        self.entries.push(data.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One script tag per queued value, newline separated
    pub fn footer_html(&self) -> String {
        self.entries
            .iter()
            .map(console_log_script)
            .collect::<Vec<String>>()
            .join("\n")
    }

    /// Render the footer and empty the queue
    pub fn flush(&mut self) -> String {
        let html = self.footer_html();
        self.entries.clear();
        html
    }
}
