//! The upgrade engine: heuristic reconstruction of Unicode typography.
//!
//! Upgrading partially undoes a prior downgrade without access to the
//! original: ASCII straight quotes become curly quotes (or guillemets with
//! the French spacing convention), hyphen runs become dashes, `...`
//! becomes an ellipsis, bare currency codes next to digits become
//! currency symbols. The rewrites are language-specific, resolved through
//! a fallback chain (exact tag, primary subtag, failsafe English), and
//! are followed by an optional spell-correction pass that cleans residual
//! transliteration artifacts. Spell-correction is best-effort: a missing
//! dictionary logs a warning and leaves the text as rewritten.

mod rules;

use std::env;
use std::sync::Arc;

use tracing::warn;

use crate::encoding::TargetEncoding;
use crate::error::Result;
use crate::spell::{DictCache, SpellError, SpellProvider, DICT_CACHE_CAPACITY};

pub(crate) use rules::FAILSAFE_LANGUAGE;

/// The upgrade engine.
pub struct Upgrader {
    spell: Option<Arc<dyn SpellProvider>>,
    dicts: DictCache,
    default_language: Option<String>,
}

impl Upgrader {
    /// Creates an engine.
    ///
    /// `default_language` is used when a call passes no language; when it
    /// is `None` as well, the process locale (`LC_ALL`, `LC_MESSAGES`,
    /// `LANG`) is consulted, and finally the failsafe table.
    pub fn new(spell: Option<Arc<dyn SpellProvider>>, default_language: Option<String>) -> Self {
        Upgrader {
            spell,
            dicts: DictCache::new(DICT_CACHE_CAPACITY),
            default_language,
        }
    }

    /// Tries to undo a downgraded transliteration.
    ///
    /// Never fails: unknown languages fall back to the failsafe table and
    /// spell-correction problems are advisory.
    pub fn upgrade(&self, text: &str, language: Option<&str>) -> String {
        let language = language
            .map(str::to_string)
            .or_else(|| self.default_language.clone())
            .or_else(locale_language)
            .unwrap_or_else(|| FAILSAFE_LANGUAGE.to_string());

        let mut text = text.to_string();
        for rule in rules::rules_for(&language) {
            text = rule.pattern.replace_all(&text, rule.replacement).into_owned();
        }

        if let Some(provider) = &self.spell {
            match self.dicts.get_or_load(provider.as_ref(), &language) {
                Ok(dict) => text = dict.autofix(&text),
                Err(SpellError::DictionaryNotFound(language)) => {
                    warn!(language = %language, "dictionary not found; skipping spell-correction");
                }
            }
        }

        text
    }

    /// Decodes `bytes` permissively and tries to undo a downgraded
    /// transliteration.
    ///
    /// # Errors
    ///
    /// [`TranslitError::UnknownEncoding`](crate::TranslitError::UnknownEncoding)
    /// if the label resolves to no known encoding.
    pub fn decode(&self, bytes: &[u8], encoding: &str, language: Option<&str>) -> Result<String> {
        let target = TargetEncoding::resolve(encoding)?;
        Ok(self.decode_from(bytes, target, language))
    }

    /// Decodes `bytes` from a resolved source encoding and upgrades.
    pub fn decode_from(
        &self,
        bytes: &[u8],
        source: TargetEncoding,
        language: Option<&str>,
    ) -> String {
        self.upgrade(&source.decode_lossy(bytes), language)
    }
}

/// Primary locale tag from the environment, `fr_FR.UTF-8` style values
/// reduced to `fr_FR`.
fn locale_language() -> Option<String> {
    for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        let Ok(value) = env::var(var) else { continue };
        let tag = value.split('.').next().unwrap_or_default();
        if !tag.is_empty() && tag != "C" && tag != "POSIX" {
            return Some(tag.to_string());
        }
    }
    None
}
