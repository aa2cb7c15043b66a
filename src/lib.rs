//! # libtranslit
//!
//! Bidirectional transliteration between Unicode text and legacy
//! character encodings.
//!
//! The **downgrade** direction turns arbitrary Unicode text into a form
//! representable in a narrower target encoding, falling back per
//! character from native encoding through platform transliteration and
//! normalization substitutes down to ASCII romanization — output streams
//! with a declared legacy charset never see an encoding failure. The
//! **upgrade** direction heuristically restores the typography a legacy
//! encoding cannot hold: curly quotes, guillemets, dashes, ellipses,
//! currency signs, ligatures, with language-specific rules and an
//! optional spell-correction pass.
//!
//! ## Example
//!
//! ```rust
//! use libtranslit::Translit;
//!
//! let engine = Translit::default();
//!
//! let down = engine.downgrade("«Æon» — déjà vu", "ascii").unwrap();
//! assert_eq!(down, "\"Aeon\" -- deja vu");
//!
//! let up = engine.upgrade("Wait... no--yes", Some("en"));
//! assert_eq!(up, "Wait… no—yes");
//! ```
//!
//! ## Collaborators
//!
//! A platform charset converter (iconv or equivalent) and a
//! spell-correction provider can be injected through
//! [`Translit::builder`]; both are optional and the engine's fallback
//! tiers are explicit about their absence. The converter's feature set is
//! probed once at construction and fixed for the engine's lifetime.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
mod downgrade;
mod encoding;
mod error;
pub mod platform;
pub mod spell;
mod upgrade;

use std::sync::Arc;

pub use crate::downgrade::Downgrader;
pub use crate::encoding::TargetEncoding;
pub use crate::error::{Result, TranslitError};
pub use crate::platform::{Capability, CharsetConverter, Platform};
pub use crate::upgrade::Upgrader;

use crate::spell::SpellProvider;

/// The transliteration engine: a downgrade engine, an upgrade engine and
/// their shared collaborators, owned by the caller.
///
/// All mutable state is internal cache state; every method takes `&self`
/// and the engine is safe to share across threads behind an [`Arc`].
pub struct Translit {
    downgrader: Downgrader,
    upgrader: Upgrader,
    capability: Capability,
}

impl Translit {
    /// Starts building an engine with injected collaborators.
    pub fn builder() -> TranslitBuilder {
        TranslitBuilder::new()
    }

    /// Downgrades `text` to fit the encoding named by `encoding`.
    ///
    /// # Errors
    ///
    /// [`TranslitError::UnknownEncoding`] for an unresolvable label.
    pub fn downgrade(&self, text: &str, encoding: &str) -> Result<String> {
        self.downgrader.downgrade(text, encoding)
    }

    /// Downgrades and strictly encodes `text` in one step.
    ///
    /// # Errors
    ///
    /// [`TranslitError::UnknownEncoding`] for an unresolvable label;
    /// [`TranslitError::StrictEncodeFailure`] should a character ever
    /// survive the fallback chain.
    pub fn encode(&self, text: &str, encoding: &str) -> Result<Vec<u8>> {
        self.downgrader.encode(text, encoding)
    }

    /// Tries to undo a downgraded transliteration.
    ///
    /// With `language` unset, the configured default (or the process
    /// locale) is used; unknown languages fall back to the failsafe
    /// rewrite table. Never fails.
    pub fn upgrade(&self, text: &str, language: Option<&str>) -> String {
        self.upgrader.upgrade(text, language)
    }

    /// Decodes `bytes` permissively and upgrades the result.
    ///
    /// # Errors
    ///
    /// [`TranslitError::UnknownEncoding`] for an unresolvable label.
    pub fn decode(&self, bytes: &[u8], encoding: &str, language: Option<&str>) -> Result<String> {
        self.upgrader.decode(bytes, encoding, language)
    }

    /// Clears the downgrade caches.
    ///
    /// Results of subsequent calls are unchanged; only their cost is.
    pub fn purge(&self) {
        self.downgrader.purge();
    }

    /// The probed platform conversion capability.
    #[inline]
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// The downgrade engine.
    #[inline]
    pub fn downgrader(&self) -> &Downgrader {
        &self.downgrader
    }

    /// The upgrade engine.
    #[inline]
    pub fn upgrader(&self) -> &Upgrader {
        &self.upgrader
    }
}

impl Default for Translit {
    /// An engine with no collaborators: downgrade uses substitutes and
    /// romanization only, upgrade skips spell-correction.
    fn default() -> Self {
        TranslitBuilder::new().build()
    }
}

/// Fluent builder for [`Translit`].
///
/// # Example
///
/// ```rust,ignore
/// use libtranslit::Translit;
///
/// let engine = Translit::builder()
///     .converter(my_iconv_binding)
///     .spell(my_dictionaries)
///     .default_language("fr")
///     .build();
/// ```
pub struct TranslitBuilder {
    converter: Option<Arc<dyn CharsetConverter>>,
    spell: Option<Arc<dyn SpellProvider>>,
    default_language: Option<String>,
}

impl TranslitBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        TranslitBuilder {
            converter: None,
            spell: None,
            default_language: None,
        }
    }

    /// Injects a platform charset converter.
    ///
    /// Its feature set is probed during [`build`](Self::build).
    pub fn converter(mut self, converter: Arc<dyn CharsetConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Injects a spell-correction provider.
    pub fn spell(mut self, spell: Arc<dyn SpellProvider>) -> Self {
        self.spell = Some(spell);
        self
    }

    /// Sets the language used when `upgrade` is called without one.
    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// Probes the converter (if any) and builds the engine.
    pub fn build(self) -> Translit {
        let platform = Arc::new(Platform::probe(self.converter));
        let capability = platform.capability();
        Translit {
            downgrader: Downgrader::new(platform),
            upgrader: Upgrader::new(self.spell, self.default_language),
            capability,
        }
    }
}

impl Default for TranslitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Common imports for convenient usage.
pub mod prelude {
    pub use crate::codec::{CodecName, TranslitCodec};
    pub use crate::platform::{Capability, CharsetConverter, PlatformError, SuffixMode};
    pub use crate::spell::{SpellDictionary, SpellError, SpellProvider};
    pub use crate::{TargetEncoding, Translit, TranslitBuilder, TranslitError};
}
