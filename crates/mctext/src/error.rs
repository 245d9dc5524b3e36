//! Error taxonomy for message construction, legacy codec setup, and
//! translation resolution.
//!
//! All failures are synchronous and local to the call that produced them;
//! nothing here is retried. The legacy codec itself never fails: malformed
//! input degrades to literal text.

use mctext_style::StyleError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A style field or value outside the recognized set.
    #[error(transparent)]
    InvalidStyleValue(#[from] StyleError),
    /// A builder was used after `build()`.
    #[error("message builder already finalized")]
    BuilderAlreadyFinalized,
    /// The translation lookup has no template for the key.
    #[error("unknown translation key '{key}'")]
    UnknownTranslationKey { key: String },
    /// Translatable arguments nest deeper than the configured limit.
    #[error("resolving '{key}' exceeded the translation recursion limit of {limit}")]
    TranslationRecursionLimitExceeded { key: String, limit: usize },
    /// The process-wide legacy character was already initialized.
    #[error("default legacy character already initialized to {current:?}")]
    DefaultMarkerAlreadySet { current: char },
    /// A configuration value could not be parsed.
    #[error("invalid value {value:?} for {name}")]
    InvalidConfig { name: &'static str, value: String },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
