//! Read-only key → template lookup consumed by the resolver.

use std::borrow::{Borrow, Cow};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Source of translation templates.
///
/// Implementations are read-only from the resolver's point of view; any
/// synchronization of a shared backing store is the implementor's concern.
pub trait TranslationLookup {
    /// Template for `key`, or `None` if the key is unknown.
    fn template(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl<T: TranslationLookup + ?Sized> TranslationLookup for &T {
    fn template(&self, key: &str) -> Option<Cow<'_, str>> {
        (**self).template(key)
    }
}

impl<K, V, S> TranslationLookup for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn template(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl<K, V> TranslationLookup for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn template(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get(key).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

/// An object with a translation key, such as a block or item type.
pub trait Translatable {
    fn translation_key(&self) -> &str;
}

impl Translatable for str {
    fn translation_key(&self) -> &str {
        self
    }
}

impl Translatable for String {
    fn translation_key(&self) -> &str {
        self
    }
}
