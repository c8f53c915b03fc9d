//! Inflection rule sets
//!
//! Rules are kept in priority order: the most recently registered rule is
//! tried first, so callers can override the built-in English rules by simply
//! registering their own.

use crate::error::Result;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// A single regex substitution rule
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    /// Compile a case-insensitive rule. Replacements use `${1}` group syntax.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(&format!("(?i){}", pattern))?,
            replacement: replacement.to_string(),
        })
    }

    /// Apply the rule, returning `None` when the pattern does not match
    pub fn apply(&self, word: &str) -> Option<String> {
        if self.pattern.is_match(word) {
            Some(
                self.pattern
                    .replace(word, self.replacement.as_str())
                    .into_owned(),
            )
        } else {
            None
        }
    }
}

/// Plural, singular, irregular, uncountable, acronym and human rules for one locale
#[derive(Debug, Clone, Default)]
pub struct Inflections {
    plurals: Vec<Rule>,
    singulars: Vec<Rule>,
    humans: Vec<Rule>,
    /// (singular, plural), lowercase
    irregulars: Vec<(String, String)>,
    uncountables: HashSet<String>,
    /// lowercase -> display form
    acronyms: HashMap<String, String>,
}

impl Inflections {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English rules
    pub fn english() -> Self {
        let mut inflections = Self::new();

        for (pattern, replacement) in [
            ("$", "s"),
            ("s$", "s"),
            ("^(ax|test)is$", "${1}es"),
            ("(octop|vir)us$", "${1}i"),
            ("(octop|vir)i$", "${1}i"),
            ("(alias|status|campus)$", "${1}es"),
            ("(bu)s$", "${1}ses"),
            ("(buffal|tomat|her)o$", "${1}oes"),
            ("([ti])um$", "${1}a"),
            ("([ti])a$", "${1}a"),
            ("sis$", "ses"),
            ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
            ("(hive)$", "${1}s"),
            ("([^aeiouy]|qu)y$", "${1}ies"),
            ("(x|ch|ss|sh)$", "${1}es"),
            ("(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
            ("^(m|l)ouse$", "${1}ice"),
            ("^(m|l)ice$", "${1}ice"),
            ("^(ox)$", "${1}en"),
            ("^(oxen)$", "${1}"),
            ("(quiz)$", "${1}zes"),
        ] {
            inflections.register_builtin(RuleKind::Plural, pattern, replacement);
        }

        for (pattern, replacement) in [
            ("s$", ""),
            ("(ss)$", "${1}"),
            ("(n)ews$", "${1}ews"),
            ("([ti])a$", "${1}um"),
            (
                "((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
                "${1}sis",
            ),
            ("(^analy)(sis|ses)$", "${1}sis"),
            ("([^f])ves$", "${1}fe"),
            ("(hive)s$", "${1}"),
            ("(tive)s$", "${1}"),
            ("([lr])ves$", "${1}f"),
            ("([^aeiouy]|qu)ies$", "${1}y"),
            ("(s)eries$", "${1}eries"),
            ("(m)ovies$", "${1}ovie"),
            ("(x|ch|ss|sh)es$", "${1}"),
            ("^(m|l)ice$", "${1}ouse"),
            ("(bus)(es)?$", "${1}"),
            ("(o)es$", "${1}"),
            ("(shoe)s$", "${1}"),
            ("(cris|test)(is|es)$", "${1}is"),
            ("^(a)x[ie]s$", "${1}xis"),
            ("(octop|vir)(us|i)$", "${1}us"),
            ("(alias|status|campus)(es)?$", "${1}"),
            ("^(ox)en", "${1}"),
            ("(vert|ind)ices$", "${1}ex"),
            ("(matr)ices$", "${1}ix"),
            ("(quiz)zes$", "${1}"),
            ("(database)s$", "${1}"),
        ] {
            inflections.register_builtin(RuleKind::Singular, pattern, replacement);
        }

        for (singular, plural) in [
            ("person", "people"),
            ("man", "men"),
            ("woman", "women"),
            ("child", "children"),
            ("sex", "sexes"),
            ("move", "moves"),
            ("zombie", "zombies"),
            ("foot", "feet"),
            ("tooth", "teeth"),
            ("goose", "geese"),
        ] {
            inflections.irregular(singular, plural);
        }

        inflections.uncountable(&[
            "equipment",
            "information",
            "rice",
            "money",
            "species",
            "series",
            "fish",
            "sheep",
            "jeans",
            "police",
            "news",
        ]);

        inflections
    }

    fn register_builtin(&mut self, kind: RuleKind, pattern: &str, replacement: &str) {
        let registered = match kind {
            RuleKind::Plural => self.plural(pattern, replacement),
            RuleKind::Singular => self.singular(pattern, replacement),
        };
        if let Err(e) = registered {
            log::error!("Skipping built-in inflection rule '{}': {}", pattern, e);
        }
    }

    /// Register a pluralization rule with the highest priority
    pub fn plural(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        self.plurals.insert(0, Rule::new(pattern, replacement)?);
        Ok(())
    }

    /// Register a singularization rule with the highest priority
    pub fn singular(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        self.singulars.insert(0, Rule::new(pattern, replacement)?);
        Ok(())
    }

    /// Register a rule applied by `humanize` before any other processing
    pub fn human(&mut self, pattern: &str, replacement: &str) -> Result<()> {
        self.humans.insert(0, Rule::new(pattern, replacement)?);
        Ok(())
    }

    /// Register an irregular singular/plural pair
    pub fn irregular(&mut self, singular: &str, plural: &str) {
        let singular = singular.to_lowercase();
        let plural = plural.to_lowercase();
        self.uncountables.remove(&singular);
        self.uncountables.remove(&plural);
        self.irregulars.retain(|(s, p)| *s != singular && *p != plural);
        self.irregulars.insert(0, (singular, plural));
    }

    /// Mark words that never change between singular and plural
    pub fn uncountable(&mut self, words: &[&str]) {
        self.uncountables
            .extend(words.iter().map(|w| w.to_lowercase()));
    }

    /// Register an acronym kept in its given form by `camelize` and `humanize`
    pub fn acronym(&mut self, word: &str) {
        self.acronyms.insert(word.to_lowercase(), word.to_string());
    }

    pub fn plurals(&self) -> &[Rule] {
        &self.plurals
    }

    pub fn singulars(&self) -> &[Rule] {
        &self.singulars
    }

    pub fn humans(&self) -> &[Rule] {
        &self.humans
    }

    pub fn irregulars(&self) -> &[(String, String)] {
        &self.irregulars
    }

    pub fn is_uncountable(&self, word: &str) -> bool {
        self.uncountables.contains(&word.to_lowercase())
    }

    /// Display form of `word` when it is a registered acronym
    pub fn acronym_for(&self, word: &str) -> Option<&str> {
        self.acronyms.get(&word.to_lowercase()).map(String::as_str)
    }
}

#[derive(Clone, Copy)]
enum RuleKind {
    Plural,
    Singular,
}
