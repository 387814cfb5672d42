//! Display strings by key.
//!
//! The core never owns display text. Anything a person reads is looked up
//! through [`Translate`], keyed by stable identifiers such as
//! `"players.placeholder"`, with `{{name}}` parameters filled in by the
//! lookup. [`Catalog`] is the bundled implementation: English and Polish
//! strings compiled into the binary, falling back to English and then to
//! the key itself.

use serde_json::Value;
use std::collections::HashMap;
use std::env;

/// Language used when nothing better is known.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Languages with a bundled catalog.
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["en", "pl"];

const EN: &str = include_str!("../locales/en.json");
const PL: &str = include_str!("../locales/pl.json");

/// String lookup capability.
///
/// Implementations must leave `{{name}}` placeholders that have no matching
/// parameter in the returned text. Templates are filled in more than one
/// pass: [`Roster::localized`](crate::Roster::localized) looks up the
/// placeholder name once and substitutes `{{position}}` per player later.
pub trait Translate {
    /// Look up the display string for `key`, filling in `{{name}}` parameters.
    fn lookup(&self, key: &str, params: &[(&str, &str)]) -> String;
}

/// Flattened string table for one language, with an optional fallback table.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    language: String,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Catalog {
    /// Bundled catalog for `language`, falling back to English.
    ///
    /// Unsupported languages get the English catalog.
    #[must_use]
    pub fn bundled(language: &str) -> Self {
        let language = if SUPPORTED_LANGUAGES.contains(&language) {
            language
        } else {
            FALLBACK_LANGUAGE
        };
        let fallback = flatten_json(EN);
        let strings = match language {
            "pl" => flatten_json(PL),
            _ => fallback.clone(),
        };
        Self {
            language: language.to_string(),
            strings,
            fallback,
        }
    }

    /// Build a catalog from nested JSON, without a fallback.
    ///
    /// Nested objects become dotted keys: `{"home": {"history": "…"}}`
    /// is looked up as `home.history`. Non-string leaves are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not valid JSON.
    pub fn from_json(language: &str, json: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(json)?;
        let mut strings = HashMap::new();
        flatten("", &value, &mut strings);
        Ok(Self {
            language: language.to_string(),
            strings,
            fallback: HashMap::new(),
        })
    }

    /// Use `other`'s strings for keys missing from this catalog.
    #[must_use]
    pub fn with_fallback(mut self, other: &Catalog) -> Self {
        self.fallback.clone_from(&other.strings);
        self
    }

    /// Language code of this catalog.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Raw template for `key`, before interpolation.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
    }
}

impl Translate for Catalog {
    fn lookup(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.get(key)
            .map_or_else(|| key.to_string(), |template| interpolate(template, params))
    }
}

/// Replace `{{name}}` placeholders in `template` with matching `params`.
///
/// Placeholders without a matching parameter are left as they are, so a
/// template can be filled in several passes.
#[must_use]
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let Some(len) = rest[start + 2..].find("}}") else {
            break;
        };
        let end = start + 2 + len;
        let name = rest[start + 2..end].trim();

        output.push_str(&rest[..start]);
        match params.iter().find(|(k, _)| *k == name) {
            Some((_, value)) => output.push_str(value),
            None => output.push_str(&rest[start..end + 2]),
        }
        rest = &rest[end + 2..];
    }

    output.push_str(rest);
    output
}

/// Supported language code for a POSIX locale string such as `pl_PL.UTF-8`.
#[must_use]
pub fn language_from_locale(locale: &str) -> Option<&'static str> {
    let code = locale
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    SUPPORTED_LANGUAGES.into_iter().find(|lang| *lang == code)
}

/// Language of the current environment.
///
/// Reads the first of `LC_ALL`, `LC_MESSAGES` and `LANG` that is set and
/// non-empty. Unsupported or missing locales give [`FALLBACK_LANGUAGE`].
#[must_use]
pub fn detect_language() -> &'static str {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| env::var(var).ok())
        .find(|value| !value.is_empty())
        .and_then(|locale| language_from_locale(&locale))
        .unwrap_or(FALLBACK_LANGUAGE)
}

fn flatten_json(json: &str) -> HashMap<String, String> {
    let mut strings = HashMap::new();
    if let Ok(value) = serde_json::from_str::<Value>(json) {
        flatten("", &value, &mut strings);
    }
    strings
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}
