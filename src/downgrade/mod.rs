//! The downgrade engine: Unicode text into a narrower target encoding.
//!
//! Downgrading is a per-character decision pipeline layered from most to
//! least faithful:
//!
//! 1. **Native** — the character encodes as-is; keep it.
//! 2. **Platform transliteration** — a normalization substitute (or the
//!    original character) is handed to the platform converter in
//!    transliteration mode; the result is accepted only if it carries no
//!    `?` lossy-failure marker.
//! 3. **Substitute** — the normalization substitute itself, when it is
//!    natively encodable.
//! 4. **Romanization** — an ASCII approximation, always available.
//!
//! Before the per-character pass, a small set of encoding-agnostic
//! typographic rewrites (guillemets, `Æ`/`Þ`/`Œ` digraph expansions) runs
//! on the whole text, each only when its trigger character is not natively
//! encodable in the target.
//!
//! Every decision is memoized: rule applicability in the
//! needs-substitution cache, per-character replacements in the downgrade
//! cache, both keyed on (character, canonical encoding name). Repeated
//! characters and repeated documents in one encoding amortize to O(1) per
//! character after warm-up. The caches are pure performance state: they
//! never change a result, only its cost, and [`Downgrader::purge`] resets
//! them without observable effect beyond timing.

mod tables;

use std::borrow::Cow;
use std::sync::{Arc, RwLock};

use deunicode::deunicode_char;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::encoding::TargetEncoding;
use crate::error::Result;
use crate::platform::{Platform, SuffixMode};

/// Cache key: a character paired with the canonical encoding name.
type CacheKey = (char, &'static str);

/// The downgrade engine.
///
/// Owns the two decision caches and the probed platform conversion
/// capability. Cheap to share behind the [`Translit`](crate::Translit)
/// facade; all methods take `&self`.
pub struct Downgrader {
    platform: Arc<Platform>,
    needs_substitution: RwLock<FxHashMap<CacheKey, bool>>,
    replacements: RwLock<FxHashMap<CacheKey, Arc<str>>>,
}

impl Downgrader {
    /// Creates an engine over an already-probed platform capability.
    pub fn new(platform: Arc<Platform>) -> Self {
        Downgrader {
            platform,
            needs_substitution: RwLock::new(FxHashMap::default()),
            replacements: RwLock::new(FxHashMap::default()),
        }
    }

    /// Downgrades `text` to fit the encoding named by `encoding`.
    ///
    /// The result is guaranteed encodable in the target under strict
    /// error handling.
    ///
    /// # Errors
    ///
    /// [`TranslitError::UnknownEncoding`](crate::TranslitError::UnknownEncoding)
    /// if the label resolves to no known encoding.
    pub fn downgrade(&self, text: &str, encoding: &str) -> Result<String> {
        let target = TargetEncoding::resolve(encoding)?;
        Ok(self.downgrade_to(text, target))
    }

    /// Downgrades `text` for a resolved target encoding.
    pub fn downgrade_to(&self, text: &str, target: TargetEncoding) -> String {
        let text = self.apply_typographic_rules(text, target);

        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if (c as u32) < 0x80 {
                // Fast path: no cache lookup for ASCII.
                out.push(c);
            } else {
                out.push_str(&self.replacement_for(c, target));
            }
        }
        out
    }

    /// Downgrades and strictly encodes `text` in one step.
    ///
    /// # Errors
    ///
    /// [`TranslitError::UnknownEncoding`](crate::TranslitError::UnknownEncoding)
    /// for an unresolvable label, or
    /// [`TranslitError::StrictEncodeFailure`](crate::TranslitError::StrictEncodeFailure)
    /// should a character ever survive the fallback chain.
    pub fn encode(&self, text: &str, encoding: &str) -> Result<Vec<u8>> {
        let target = TargetEncoding::resolve(encoding)?;
        target.encode_strict(&self.downgrade_to(text, target))
    }

    /// Clears both caches.
    ///
    /// Useful after process-wide encoding defaults change. Subsequent
    /// calls recompute identical results; only their cost differs.
    pub fn purge(&self) {
        self.needs_substitution
            .write()
            .unwrap()
            .clear();
        self.replacements
            .write()
            .unwrap()
            .clear();
    }

    fn apply_typographic_rules<'t>(&self, text: &'t str, target: TargetEncoding) -> Cow<'t, str> {
        let mut text = Cow::Borrowed(text);
        for rule in tables::typographic_rules() {
            if !self.needs_substitution(rule.probe(), target) {
                continue;
            }
            if rule.triggers.iter().any(|&c| text.contains(c)) {
                text = Cow::Owned(rule.pattern.replace_all(&text, rule.replacement).into_owned());
            }
        }
        text
    }

    /// Memoized check whether a typographic rule is needed for `target`.
    fn needs_substitution(&self, probe: char, target: TargetEncoding) -> bool {
        let key = (probe, target.name());
        if let Some(&needed) = self
            .needs_substitution
            .read()
            .unwrap()
            .get(&key)
        {
            return needed;
        }
        let needed = !target.can_encode(probe);
        self.needs_substitution
            .write()
            .unwrap()
            .insert(key, needed);
        needed
    }

    /// Memoized per-character replacement lookup.
    fn replacement_for(&self, c: char, target: TargetEncoding) -> Arc<str> {
        let key = (c, target.name());
        if let Some(replacement) = self
            .replacements
            .read()
            .unwrap()
            .get(&key)
        {
            return Arc::clone(replacement);
        }
        let replacement = self.compute_replacement(c, target);
        self.replacements
            .write()
            .unwrap()
            .insert(key, Arc::clone(&replacement));
        replacement
    }

    /// The layered fallback chain, most faithful tier first.
    fn compute_replacement(&self, c: char, target: TargetEncoding) -> Arc<str> {
        if target.can_encode(c) {
            let mut buf = [0u8; 4];
            return Arc::from(&*c.encode_utf8(&mut buf));
        }

        let substitute = tables::unicode_substitute(c);

        if self.platform.is_available() {
            let mut buf = [0u8; 4];
            let candidate = match substitute {
                Some(substitute) => substitute,
                None => &*c.encode_utf8(&mut buf),
            };
            match self
                .platform
                .convert(candidate, target.name(), Some(SuffixMode::Translit))
            {
                Ok(bytes) if !bytes.contains(&b'?') => {
                    return Arc::from(target.decode_lossy(&bytes));
                }
                Ok(_) => debug!(character = %c, encoding = target.name(), "platform transliteration was lossy"),
                Err(e) => debug!(character = %c, encoding = target.name(), error = %e, "platform transliteration failed"),
            }
        }

        if let Some(substitute) = substitute {
            if substitute.chars().all(|sc| target.can_encode(sc)) {
                return Arc::from(substitute);
            }
        }

        Arc::from(deunicode_char(c).unwrap_or(""))
    }
}
