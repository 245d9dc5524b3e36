#![forbid(unsafe_code)]

//! Translation store for mctext.
//!
//! Provides key-based template lookup with locale fallback chains, and the
//! placeholder grammar used when translatable messages are resolved.

pub mod catalog;
pub mod lookup;
pub mod template;

pub use catalog::{I18nError, LocaleStrings, LocaleView, StringCatalog};
pub use lookup::{Translatable, TranslationLookup};
pub use template::{Segment, Template};
