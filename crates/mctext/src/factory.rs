//! One handle bundling the builder entry points, the legacy codec, and the
//! resolver under a single configuration.
//!
//! Construct it once at startup and pass it by reference wherever messages
//! are built, converted, or resolved.

use mctext_i18n::{Translatable, TranslationLookup};

use crate::builder::{ScoreBuilder, SelectorBuilder, TextBuilder, TranslatableBuilder};
use crate::config::TextConfig;
use crate::error::Result;
use crate::legacy::{self, LegacyCodec, LegacyRun, default_legacy_char};
use crate::message::{Message, ScoreRef};
use crate::resolve::Resolver;

/// Entry point for building, converting, and resolving messages.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use mctext::{MessageFactory, TextConfig};
///
/// let factory = MessageFactory::new(TextConfig::default().with_legacy_char('&'));
/// let msg = factory.from_legacy("&aReady");
/// assert_eq!(factory.to_legacy(&msg), "&aReady");
/// assert_eq!(factory.strip_codes("&aReady"), "Ready");
/// # let lookup: HashMap<&str, &str> = HashMap::new();
/// # assert_eq!(factory.resolve(&msg, &lookup)?, msg);
/// # Ok::<(), mctext::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFactory {
    codec: LegacyCodec,
    resolver: Resolver,
}

impl Default for MessageFactory {
    /// Default settings with the process-wide legacy character.
    fn default() -> Self {
        Self::new(TextConfig::default().with_legacy_char(default_legacy_char()))
    }
}

impl MessageFactory {
    #[must_use]
    pub fn new(config: TextConfig) -> Self {
        Self {
            codec: LegacyCodec::new(config.legacy_char),
            resolver: Resolver::from_config(&config),
        }
    }

    /// Load settings from the environment.
    pub fn from_env() -> Result<Self> {
        TextConfig::from_env().map(Self::new)
    }

    #[must_use]
    pub fn codec(&self) -> LegacyCodec {
        self.codec
    }

    #[must_use]
    pub fn resolver(&self) -> Resolver {
        self.resolver
    }

    /// Builder for an empty Text node.
    #[must_use]
    pub fn builder(&self) -> TextBuilder {
        TextBuilder::empty()
    }

    #[must_use]
    pub fn text_builder(&self, content: impl Into<String>) -> TextBuilder {
        TextBuilder::text(content)
    }

    #[must_use]
    pub fn translatable_builder(
        &self,
        key: impl Into<String>,
        args: impl IntoIterator<Item = Message>,
    ) -> TranslatableBuilder {
        TranslatableBuilder::translatable(key, args)
    }

    #[must_use]
    pub fn translatable_builder_from<T>(
        &self,
        source: &T,
        args: impl IntoIterator<Item = Message>,
    ) -> TranslatableBuilder
    where
        T: Translatable + ?Sized,
    {
        TranslatableBuilder::translatable_from(source, args)
    }

    #[must_use]
    pub fn selector_builder(&self, pattern: impl Into<String>) -> SelectorBuilder {
        SelectorBuilder::selector(pattern)
    }

    #[must_use]
    pub fn score_builder(&self, score: ScoreRef) -> ScoreBuilder {
        ScoreBuilder::score(score)
    }

    #[must_use]
    pub fn of(&self, content: impl Into<String>) -> Message {
        Message::of(content)
    }

    /// Marker used by the legacy methods without an explicit marker.
    #[must_use]
    pub fn legacy_char(&self) -> char {
        self.codec.marker()
    }

    #[must_use]
    pub fn from_legacy(&self, input: &str) -> Message {
        self.codec.from_legacy(input)
    }

    #[must_use]
    pub fn from_legacy_with(&self, input: &str, marker: char) -> Message {
        LegacyCodec::new(marker).from_legacy(input)
    }

    #[must_use]
    pub fn decode(&self, input: &str) -> Vec<LegacyRun> {
        self.codec.decode(input)
    }

    #[must_use]
    pub fn to_legacy(&self, msg: &Message) -> String {
        self.codec.encode(msg)
    }

    #[must_use]
    pub fn to_legacy_with(&self, msg: &Message, marker: char) -> String {
        legacy::encode(msg, marker)
    }

    #[must_use]
    pub fn strip_codes(&self, input: &str) -> String {
        self.codec.strip_codes(input)
    }

    #[must_use]
    pub fn strip_codes_with(&self, input: &str, marker: char) -> String {
        legacy::strip_codes(input, marker)
    }

    /// Rewrite codes written with `from` to this factory's marker.
    #[must_use]
    pub fn replace_codes(&self, input: &str, from: char) -> String {
        self.codec.replace_codes(input, from)
    }

    #[must_use]
    pub fn replace_codes_with(&self, input: &str, from: char, to: char) -> String {
        legacy::replace_codes(input, from, to)
    }

    pub fn resolve<L>(&self, msg: &Message, lookup: &L) -> Result<Message>
    where
        L: TranslationLookup + ?Sized,
    {
        self.resolver.resolve(msg, lookup)
    }

    pub fn resolve_to_string<L>(&self, msg: &Message, lookup: &L) -> Result<String>
    where
        L: TranslationLookup + ?Sized,
    {
        self.resolver.resolve_to_string(msg, lookup)
    }
}
