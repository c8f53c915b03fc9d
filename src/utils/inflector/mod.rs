//! Case conversion and English inflection
//!
//! [`convert_case`] rewrites an identifier-like string into one of the
//! [`CaseStyle`] variants. Every style is built from two primitives on
//! [`Inflector`]: `underscore` (anything to `snake_case`) and `camelize`
//! (`snake_case`, kebab or spaced words to `CamelCase`).
//!
//! # Example
//! ```rust
//! use sleek_utils::utils::inflector::{convert_case, CaseStyle};
//!
//! assert_eq!(convert_case("my_post_type", CaseStyle::Pascal), "MyPostType");
//! assert_eq!(convert_case("MyPostType", CaseStyle::Snake), "my_post_type");
//! assert_eq!(convert_case("category", CaseStyle::Plural), "categories");
//! ```

pub mod inflections;

pub use inflections::{Inflections, Rule};

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static ENGLISH: Lazy<Inflector> = Lazy::new(Inflector::english);

static ACRONYM_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z\d]+)([A-Z][a-z])").expect("Inflector: invalid acronym boundary regex")
});
static CAMEL_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-z\d])([A-Z])").expect("Inflector: invalid camel boundary regex")
});
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-\s]+").expect("Inflector: invalid separator regex"));
static ID_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_id$").expect("Inflector: invalid id suffix regex"));

/// Target style for [`convert_case`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    /// `myPostType`
    #[default]
    Camel,
    /// `MyPostType`
    Pascal,
    /// `my-post-type`
    Kebab,
    /// `my_post_type`
    Snake,
    /// `My Post Type`
    Title,
    /// `My post type`
    Human,
    /// Final word singularized
    Singular,
    /// Final word pluralized
    Plural,
    /// `my-post-type`, restricted to `[a-z0-9-]`
    #[serde(alias = "html")]
    HtmlId,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 9] = [
        CaseStyle::Camel,
        CaseStyle::Pascal,
        CaseStyle::Kebab,
        CaseStyle::Snake,
        CaseStyle::Title,
        CaseStyle::Human,
        CaseStyle::Singular,
        CaseStyle::Plural,
        CaseStyle::HtmlId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStyle::Camel => "camel",
            CaseStyle::Pascal => "pascal",
            CaseStyle::Kebab => "kebab",
            CaseStyle::Snake => "snake",
            CaseStyle::Title => "title",
            CaseStyle::Human => "human",
            CaseStyle::Singular => "singular",
            CaseStyle::Plural => "plural",
            CaseStyle::HtmlId => "html_id",
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "camel" => Ok(CaseStyle::Camel),
            "pascal" => Ok(CaseStyle::Pascal),
            "kebab" => Ok(CaseStyle::Kebab),
            "snake" => Ok(CaseStyle::Snake),
            "title" => Ok(CaseStyle::Title),
            "human" => Ok(CaseStyle::Human),
            "singular" => Ok(CaseStyle::Singular),
            "plural" => Ok(CaseStyle::Plural),
            "html" | "html_id" | "html-id" | "htmlid" => Ok(CaseStyle::HtmlId),
            other => Err(Error::invalid_argument(format!(
                "unknown case style '{}'",
                other
            ))),
        }
    }
}

/// Inflection engine bound to one rule set
#[derive(Debug, Clone, Default)]
pub struct Inflector {
    inflections: Inflections,
}

impl Inflector {
    pub fn new(inflections: Inflections) -> Self {
        Self { inflections }
    }

    /// Inflector with the built-in English rules
    pub fn english() -> Self {
        Self::new(Inflections::english())
    }

    /// Shared English inflector
    pub fn global() -> &'static Inflector {
        &ENGLISH
    }

    pub fn inflections(&self) -> &Inflections {
        &self.inflections
    }

    pub fn inflections_mut(&mut self) -> &mut Inflections {
        &mut self.inflections
    }

    /// Rewrite `text` in the given style
    pub fn convert(&self, text: &str, style: CaseStyle) -> String {
        match style {
            CaseStyle::Camel => self.camelize(text, false),
            CaseStyle::Pascal => self.camelize(text, true),
            CaseStyle::Kebab => self.underscore(text).replace('_', "-"),
            CaseStyle::Snake => self.underscore(text),
            CaseStyle::Title => self.titleize(text),
            CaseStyle::Human => self.humanize(&self.underscore(text)),
            CaseStyle::Singular => self.singularize(text),
            CaseStyle::Plural => self.pluralize(text),
            CaseStyle::HtmlId => self.html_id(text),
        }
    }

    /// Convert to `snake_case`, splitting acronym and camel-case boundaries
    ///
    /// `"HTTPServer"` becomes `"http_server"`, `"my post-type"` becomes `"my_post_type"`.
    pub fn underscore(&self, text: &str) -> String {
        let word = ACRONYM_BOUNDARY.replace_all(text.trim(), "${1}_${2}");
        let word = CAMEL_BOUNDARY.replace_all(&word, "${1}_${2}");
        let word = SEPARATORS.replace_all(&word, "_");
        word.to_lowercase()
    }

    /// Join `_`, `-` or whitespace separated words into `CamelCase`
    ///
    /// Only the first letter of each word is touched, so already camel-cased
    /// input survives. With `capitalize_first` false the leading word (or
    /// leading acronym) is lowercased.
    ///
    /// `underscore(camelize(s))` gives back `underscore(s)` only when no word
    /// of `s` is a single letter or starts with a digit: `"a_b"` camelizes to
    /// `"AB"` and `"section_2"` to `"Section2"`, and neither boundary can be
    /// recovered.
    pub fn camelize(&self, text: &str, capitalize_first: bool) -> String {
        let mut result = String::with_capacity(text.len());
        let mut leading_acronym = None;

        for (index, word) in split_words(text).enumerate() {
            match self.inflections.acronym_for(word) {
                Some(acronym) => {
                    if index == 0 {
                        leading_acronym = Some(acronym.len());
                    }
                    result.push_str(acronym);
                }
                None => result.push_str(&upcase_first(word)),
            }
        }

        if capitalize_first {
            return result;
        }

        match leading_acronym {
            Some(len) => {
                let (head, tail) = result.split_at(len);
                format!("{}{}", head.to_lowercase(), tail)
            }
            None => downcase_first(&result),
        }
    }

    /// Lowercase, space separated words with a capital first letter
    ///
    /// Expects `lower_case_and_underscored` input; a trailing `_id` is dropped.
    pub fn humanize(&self, text: &str) -> String {
        let trimmed = text.trim();
        let word = self
            .inflections
            .humans()
            .iter()
            .find_map(|rule| rule.apply(trimmed))
            .unwrap_or_else(|| trimmed.to_string());

        let word = ID_SUFFIX.replace(&word, "");
        let words: Vec<String> = word
            .split('_')
            .flat_map(str::split_whitespace)
            .map(|w| match self.inflections.acronym_for(w) {
                Some(acronym) => acronym.to_string(),
                None => w.to_lowercase(),
            })
            .collect();

        upcase_first(&words.join(" "))
    }

    /// Capitalize every word of the humanized form
    pub fn titleize(&self, text: &str) -> String {
        self.humanize(&self.underscore(text))
            .split(' ')
            .map(upcase_first)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Pluralize the final word of `text`
    pub fn pluralize(&self, text: &str) -> String {
        self.inflect(text, Number::Plural)
    }

    /// Singularize the final word of `text`
    pub fn singularize(&self, text: &str) -> String {
        self.inflect(text, Number::Singular)
    }

    fn html_id(&self, text: &str) -> String {
        self.underscore(text)
            .replace('_', "-")
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
            .collect::<String>()
            .trim_matches('-')
            .to_string()
    }

    fn inflect(&self, text: &str, number: Number) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let split = text
            .char_indices()
            .rev()
            .find(|(_, c)| is_word_separator(*c))
            .map_or(0, |(i, c)| i + c.len_utf8());
        let (head, last) = text.split_at(split);

        if last.is_empty() || self.inflections.is_uncountable(last) {
            return text.to_string();
        }

        let lower = last.to_lowercase();
        for (singular, plural) in self.inflections.irregulars() {
            let (from, to) = match number {
                Number::Plural => (singular, plural),
                Number::Singular => (plural, singular),
            };
            if lower == *to {
                return text.to_string();
            }
            if lower == *from {
                return format!("{}{}", head, match_case(to, last));
            }
        }

        let rules = match number {
            Number::Plural => self.inflections.plurals(),
            Number::Singular => self.inflections.singulars(),
        };

        match rules.iter().find_map(|rule| rule.apply(last)) {
            Some(inflected) => format!("{}{}", head, inflected),
            None => text.to_string(),
        }
    }
}

#[derive(Clone, Copy)]
enum Number {
    Singular,
    Plural,
}

/// Convert `text` to `style` with the shared English inflector
pub fn convert_case(text: &str, style: CaseStyle) -> String {
    Inflector::global().convert(text, style)
}

/// Convert `text` to the style called `style`; unknown names return `text` unchanged
pub fn convert_case_named(text: &str, style: &str) -> String {
    match style.parse::<CaseStyle>() {
        Ok(style) => convert_case(text, style),
        Err(_) => {
            log::debug!("convert_case: unknown style '{}', returning input", style);
            text.to_string()
        }
    }
}

pub fn underscore(text: &str) -> String {
    Inflector::global().underscore(text)
}

pub fn camelize(text: &str, capitalize_first: bool) -> String {
    Inflector::global().camelize(text, capitalize_first)
}

pub fn pluralize(text: &str) -> String {
    Inflector::global().pluralize(text)
}

pub fn singularize(text: &str) -> String {
    Inflector::global().singularize(text)
}

fn is_word_separator(c: char) -> bool {
    c == '_' || c == '-' || c.is_whitespace()
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_word_separator).filter(|w| !w.is_empty())
}

fn upcase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn downcase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Give `replacement` the capitalization of `original`
fn match_case(replacement: &str, original: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        replacement.to_uppercase()
    } else if original.chars().next().is_some_and(char::is_uppercase) {
        upcase_first(replacement)
    } else {
        replacement.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_case_styles() {
        assert_eq!(convert_case("my_post_type", CaseStyle::Camel), "myPostType");
        assert_eq!(convert_case("my_post_type", CaseStyle::Pascal), "MyPostType");
        assert_eq!(convert_case("MyPostType", CaseStyle::Kebab), "my-post-type");
        assert_eq!(convert_case("MyPostType", CaseStyle::Snake), "my_post_type");
        assert_eq!(convert_case("my_post_type", CaseStyle::Title), "My Post Type");
        assert_eq!(convert_case("MyPostType", CaseStyle::Human), "My post type");
        assert_eq!(convert_case("categories", CaseStyle::Singular), "category");
        assert_eq!(convert_case("category", CaseStyle::Plural), "categories");
        assert_eq!(convert_case("my_post_type", CaseStyle::HtmlId), "my-post-type");
    }

    #[test]
    fn test_default_style_is_camel() {
        assert_eq!(CaseStyle::default(), CaseStyle::Camel);
    }

    #[test]
    fn test_underscore() {
        assert_eq!(underscore("HTTPServer"), "http_server");
        assert_eq!(underscore("myPostType"), "my_post_type");
        assert_eq!(underscore("my post-type"), "my_post_type");
        assert_eq!(underscore("already_snake"), "already_snake");
        assert_eq!(underscore("XMLHttpRequest"), "xml_http_request");
        assert_eq!(underscore("  Padded Words "), "padded_words");
        assert_eq!(underscore(""), "");
    }

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("user_account", true), "UserAccount");
        assert_eq!(camelize("xml-http-request", false), "xmlHttpRequest");
        assert_eq!(camelize("hello world test", false), "helloWorldTest");
        assert_eq!(camelize("MyPostType", true), "MyPostType");
        assert_eq!(camelize("", true), "");
    }

    #[test]
    fn test_camelize_with_acronyms() {
        let mut inflector = Inflector::english();
        inflector.inflections_mut().acronym("HTML");

        assert_eq!(inflector.camelize("html_parser", true), "HTMLParser");
        assert_eq!(inflector.camelize("html_parser", false), "htmlParser");
        assert_eq!(inflector.underscore("HTMLParser"), "html_parser");
        assert_eq!(inflector.humanize("html_block"), "HTML block");
    }

    #[test]
    fn test_humanize_and_titleize() {
        let inflector = Inflector::global();
        assert_eq!(inflector.humanize("author_id"), "Author");
        assert_eq!(inflector.humanize("employee_salary"), "Employee salary");
        assert_eq!(inflector.titleize("x-men: the last stand"), "X Men: The Last Stand");
        assert_eq!(inflector.titleize("RawScaledScorer"), "Raw Scaled Scorer");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("post"), "posts");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("knife"), "knives");
        assert_eq!(pluralize("status"), "statuses");
        assert_eq!(pluralize("quiz"), "quizzes");
        assert_eq!(pluralize("matrix"), "matrices");
        assert_eq!(pluralize("mouse"), "mice");
        assert_eq!(pluralize("day"), "days");
    }

    #[test]
    fn test_singularize() {
        assert_eq!(singularize("posts"), "post");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("knives"), "knife");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("status"), "status");
        assert_eq!(singularize("analyses"), "analysis");
        assert_eq!(singularize("movies"), "movie");
        assert_eq!(singularize("databases"), "database");
    }

    #[test]
    fn test_irregular_and_uncountable() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("people"), "people");
        assert_eq!(singularize("Children"), "Child");
        assert_eq!(pluralize("sales_person"), "sales_people");
        assert_eq!(pluralize("sheep"), "sheep");
        assert_eq!(singularize("news"), "news");
        assert_eq!(pluralize("Money"), "Money");
    }

    #[test]
    fn test_inflect_only_touches_final_word() {
        assert_eq!(pluralize("my_post_type"), "my_post_types");
        assert_eq!(singularize("case studies"), "case study");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn test_camelize_loses_single_letter_and_digit_boundaries() {
        assert_eq!(camelize("a_b", true), "AB");
        assert_eq!(underscore("AB"), "ab");
        assert_eq!(camelize("section_2", true), "Section2");
        assert_eq!(underscore("Section2"), "section2");
        assert_eq!(underscore(&camelize("post_type_2b", true)), "post_type2b");
    }

    #[test]
    fn test_anchored_rules_apply_to_final_word() {
        assert_eq!(pluralize("computer_mouse"), "computer_mice");
        assert_eq!(singularize("computer_mice"), "computer_mouse");
        assert_eq!(pluralize("big_ox"), "big_oxen");
        assert_eq!(singularize("big oxen"), "big ox");
        assert_eq!(pluralize("Computer Mouse"), "Computer Mice");
        assert_eq!(singularize("unit-tests"), "unit-test");
    }

    #[test]
    fn test_html_id() {
        assert_eq!(convert_case("My Post #2!", CaseStyle::HtmlId), "my-post-2");
        assert_eq!(convert_case("-Leading_and_trailing_", CaseStyle::HtmlId), "leading-and-trailing");
        assert_eq!(convert_case("Ünïcode Name", CaseStyle::HtmlId), "ncode-name");
    }

    #[test]
    fn test_named_styles() {
        assert_eq!(convert_case_named("my_post_type", "pascal"), "MyPostType");
        assert_eq!(convert_case_named("my_post_type", "html"), "my-post-type");
        assert_eq!(convert_case_named("my_post_type", "shouting"), "my_post_type");
        assert_eq!(convert_case_named("MyPostType", ""), "MyPostType");
    }

    #[test]
    fn test_style_parse_and_display() {
        for style in CaseStyle::ALL {
            assert_eq!(style.as_str().parse::<CaseStyle>().unwrap(), style);
            assert_eq!(style.to_string(), style.as_str());
        }
        assert!("unknown".parse::<CaseStyle>().is_err());
    }

    #[test]
    fn test_style_serde() {
        let style: CaseStyle = serde_json::from_str("\"html\"").unwrap();
        assert_eq!(style, CaseStyle::HtmlId);
        assert_eq!(serde_json::to_string(&CaseStyle::Pascal).unwrap(), "\"pascal\"");
    }

    #[test]
    fn test_snake_canonical_form_survives_camelize() {
        for input in [
            "my_post_type",
            "MyPostType",
            "http_server",
            "HTTPServer",
            "blog-post-archive",
            "featured image caption",
            "post2_type",
        ] {
            assert_eq!(
                underscore(&camelize(input, true)),
                underscore(input),
                "input: {}",
                input
            );
        }
    }
}
