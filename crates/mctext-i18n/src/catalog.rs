//! Per-locale translation tables and a catalog that falls back across them.
//!
//! A lookup tries the requested locale, then each locale in the fallback
//! chain once, in order. A locale that is not loaded is skipped. Lookups take
//! `&self`, so a populated catalog can be shared between resolver threads.
//!
//! Errors: a repeated key in [`LocaleStrings::try_insert`] or in a `.lang`
//! source is [`I18nError::DuplicateKey`]; a `.lang` line without `=` is
//! [`I18nError::ParseError`]. A key no locale knows is `None`, and a
//! placeholder with no matching argument renders as its source text.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::debug;

use crate::lookup::TranslationLookup;
use crate::template::Template;

/// Locale identifier (e.g., `"en_us"`, `"de_de"`).
pub type Locale = String;

/// Failure loading translation tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum I18nError {
    /// A `.lang` source line could not be parsed.
    #[error("parse error on line {line}: {message}")]
    ParseError { line: usize, message: String },
    /// A key appeared twice in one locale.
    #[error("duplicate key '{key}'")]
    DuplicateKey { key: String },
}

/// Key to template table for one locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    strings: HashMap<String, String>,
}

impl LocaleStrings {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a legacy `.lang` file: one `key=value` per line, `#` comments,
    /// blank lines ignored. The value is everything after the first `=`.
    pub fn from_lang(source: &str) -> Result<Self, I18nError> {
        let mut strings = Self::new();
        for (idx, raw) in source.lines().enumerate() {
            let line = raw.trim_start_matches('\u{feff}').trim_end_matches('\r');
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| I18nError::ParseError {
                line: idx + 1,
                message: format!("expected key=value, got {line:?}"),
            })?;
            strings.try_insert(key.trim(), value)?;
        }
        debug!(entries = strings.len(), "parsed lang source");
        Ok(strings)
    }

    /// Insert a template, replacing any previous one for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Insert a template, failing if `key` is already present.
    pub fn try_insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), I18nError> {
        let key = key.into();
        if self.strings.contains_key(&key) {
            return Err(I18nError::DuplicateKey { key });
        }
        self.strings.insert(key, value.into());
        Ok(())
    }

    /// The template stored under `key` in this locale only.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Count of stored templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// `true` when no template is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Stored keys, unordered.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }
}

impl TranslationLookup for LocaleStrings {
    fn template(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(Cow::Borrowed)
    }
}

/// Locale tables plus the fallback order used when a key is absent.
///
/// # Example
///
/// ```
/// use mctext_i18n::{LocaleStrings, StringCatalog, TranslationLookup};
///
/// let mut us = LocaleStrings::new();
/// us.insert("tile.stone.name", "Stone");
/// us.insert("chat.type.announcement", "[{0}] {1}");
///
/// let mut tables = StringCatalog::new();
/// tables.add_locale("en_us", us);
/// tables.set_fallback_chain(vec!["en_us".into()]);
///
/// assert_eq!(tables.get("en_us", "tile.stone.name"), Some("Stone"));
/// assert_eq!(
///     tables.format("en_us", "chat.type.announcement", &["Server", "restart"]),
///     Some("[Server] restart".into())
/// );
/// assert_eq!(tables.locale("de_de").template("tile.stone.name").as_deref(), Some("Stone"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: HashMap<Locale, LocaleStrings>,
    fallback_chain: Vec<Locale>,
}

impl StringCatalog {
    /// A catalog with no locales and an empty fallback chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `strings` for `locale`, dropping any table already there.
    pub fn add_locale(&mut self, locale: impl Into<String>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// Locales consulted, first to last, after the requested one misses.
    pub fn set_fallback_chain(&mut self, chain: Vec<Locale>) {
        self.fallback_chain = chain;
    }

    /// Template for `key` in `locale`, or in the first fallback locale that
    /// has it.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        std::iter::once(locale)
            .chain(
                self.fallback_chain
                    .iter()
                    .map(String::as_str)
                    .filter(|tag| *tag != locale),
            )
            .find_map(|tag| self.locales.get(tag)?.get(key))
    }

    /// Look up a template and substitute positional string arguments.
    #[must_use]
    pub fn format(&self, locale: &str, key: &str, args: &[&str]) -> Option<String> {
        self.get(locale, key)
            .map(|template| Template::parse(template).render(args))
    }

    /// A lookup bound to one locale, for handing to a resolver.
    #[must_use]
    pub fn locale<'a>(&'a self, locale: &'a str) -> LocaleView<'a> {
        LocaleView {
            catalog: self,
            locale,
        }
    }

    /// Tags of the loaded locales, unordered.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }

    /// Collect all unique keys across every registered locale, sorted.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .locales
            .values()
            .flat_map(LocaleStrings::keys)
            .map(str::to_owned)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Keys from `reference_keys` that `locale` cannot resolve, even through
    /// the fallback chain. Sorted.
    #[must_use]
    pub fn missing_keys(&self, locale: &str, reference_keys: &[&str]) -> Vec<String> {
        let mut missing: Vec<String> = reference_keys
            .iter()
            .filter(|key| self.get(locale, key).is_none())
            .map(|key| (*key).to_string())
            .collect();
        missing.sort_unstable();
        missing
    }
}

/// A [`StringCatalog`] bound to one locale.
#[derive(Debug, Clone, Copy)]
pub struct LocaleView<'a> {
    catalog: &'a StringCatalog,
    locale: &'a str,
}

impl LocaleView<'_> {
    #[must_use]
    pub fn locale(&self) -> &str {
        self.locale
    }
}

impl TranslationLookup for LocaleView<'_> {
    fn template(&self, key: &str) -> Option<Cow<'_, str>> {
        self.catalog.get(self.locale, key).map(Cow::Borrowed)
    }
}
