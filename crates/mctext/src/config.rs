//! Runtime configuration, loaded from the environment or built in code.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `MCTEXT_LEGACY_CHAR` | legacy marker (first character) | `§` |
//! | `MCTEXT_MAX_RESOLVE_DEPTH` | translation nesting limit | `8` |
//! | `MCTEXT_MISSING_KEY` | `error` or `raw` | `error` |

use crate::error::{Error, Result};
use crate::legacy::DEFAULT_LEGACY_CHAR;
use crate::resolve::{DEFAULT_MAX_DEPTH, MissingKeyPolicy};

pub const ENV_LEGACY_CHAR: &str = "MCTEXT_LEGACY_CHAR";
pub const ENV_MAX_RESOLVE_DEPTH: &str = "MCTEXT_MAX_RESOLVE_DEPTH";
pub const ENV_MISSING_KEY: &str = "MCTEXT_MISSING_KEY";

/// Settings shared by the codec and the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextConfig {
    pub legacy_char: char,
    pub max_resolve_depth: usize,
    pub missing_key: MissingKeyPolicy,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            legacy_char: DEFAULT_LEGACY_CHAR,
            max_resolve_depth: DEFAULT_MAX_DEPTH,
            missing_key: MissingKeyPolicy::Error,
        }
    }
}

impl TextConfig {
    /// Read the process environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom lookup, for tests and
    /// embedding.
    pub fn from_env_with<F>(get_env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = get_env(ENV_LEGACY_CHAR) {
            config.legacy_char = parse_legacy_char(&value)?;
        }
        if let Some(value) = get_env(ENV_MAX_RESOLVE_DEPTH) {
            config.max_resolve_depth = value.trim().parse().map_err(|_| Error::InvalidConfig {
                name: ENV_MAX_RESOLVE_DEPTH,
                value: value.clone(),
            })?;
        }
        if let Some(value) = get_env(ENV_MISSING_KEY) {
            config.missing_key = parse_missing_key(&value)?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_legacy_char(mut self, marker: char) -> Self {
        self.legacy_char = marker;
        self
    }

    #[must_use]
    pub fn with_max_resolve_depth(mut self, depth: usize) -> Self {
        self.max_resolve_depth = depth;
        self
    }

    #[must_use]
    pub fn with_missing_key(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_key = policy;
        self
    }
}

pub(crate) fn parse_legacy_char(value: &str) -> Result<char> {
    value.chars().next().ok_or_else(|| Error::InvalidConfig {
        name: ENV_LEGACY_CHAR,
        value: value.to_owned(),
    })
}

fn parse_missing_key(value: &str) -> Result<MissingKeyPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "error" => Ok(MissingKeyPolicy::Error),
        "raw" | "raw_key" | "rawkey" => Ok(MissingKeyPolicy::RawKey),
        _ => Err(Error::InvalidConfig {
            name: ENV_MISSING_KEY,
            value: value.to_owned(),
        }),
    }
}
