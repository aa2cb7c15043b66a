//! Spell-correction capability and the bounded dictionary-handle cache.
//!
//! Spell-correction is the optional final pass of the upgrade pipeline,
//! used to clean residual transliteration artifacts. It is best-effort by
//! design: a missing dictionary is a diagnostic, never a failure.
//!
//! Dictionary construction is expensive and only a few languages are used
//! per process, so handles are kept in a small LRU cache
//! ([`DictCache`], capacity [`DICT_CACHE_CAPACITY`]).

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

/// Number of dictionary handles kept alive at once.
pub const DICT_CACHE_CAPACITY: usize = 5;

/// Errors reported by a spell-correction provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SpellError {
    /// The requested language has no dictionary.
    ///
    /// Recovered locally by the upgrade pipeline: the rewritten text is
    /// returned unfixed and a warning is emitted.
    #[error("no spell dictionary for language {0:?}")]
    DictionaryNotFound(String),
}

/// An opaque, language-specific dictionary handle.
pub trait SpellDictionary: Send + Sync + std::fmt::Debug {
    /// Returns `text` with spelling artifacts fixed.
    fn autofix(&self, text: &str) -> String;
}

/// A source of per-language spell dictionaries.
pub trait SpellProvider: Send + Sync {
    /// Obtains (or constructs) the dictionary for `language`.
    ///
    /// # Errors
    ///
    /// [`SpellError::DictionaryNotFound`] if no dictionary exists for the
    /// language.
    fn dictionary(&self, language: &str) -> Result<Arc<dyn SpellDictionary>, SpellError>;
}

/// Bounded LRU cache of dictionary handles, keyed by language.
///
/// Most-recently-used first; hits move to the front, inserts evict the
/// tail once capacity is reached.
pub(crate) struct DictCache {
    capacity: usize,
    entries: Mutex<Vec<(String, Arc<dyn SpellDictionary>)>>,
}

impl DictCache {
    pub(crate) fn new(capacity: usize) -> Self {
        DictCache {
            capacity,
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Returns the cached handle for `language`, loading it through
    /// `provider` on a miss.
    ///
    /// The lock is not held across the provider call, so a slow dictionary
    /// build never blocks cache hits on other languages.
    pub(crate) fn get_or_load(
        &self,
        provider: &dyn SpellProvider,
        language: &str,
    ) -> Result<Arc<dyn SpellDictionary>, SpellError> {
        {
            let mut entries = self.entries.lock();
            if let Some(pos) = entries.iter().position(|(tag, _)| tag == language) {
                let entry = entries.remove(pos);
                let dict = Arc::clone(&entry.1);
                entries.insert(0, entry);
                return Ok(dict);
            }
        }

        let dict = provider.dictionary(language)?;

        let mut entries = self.entries.lock();
        // A concurrent load may have won the race; keep the cache bounded
        // either way.
        if !entries.iter().any(|(tag, _)| tag == language) {
            entries.insert(0, (language.to_string(), Arc::clone(&dict)));
            entries.truncate(self.capacity);
        }
        Ok(dict)
    }
}
